//! Family-code and capacity similarity between model designations.
//!
//! A designation such as `2CY-7.5/2.5D` is read as a family code (`2CY`) and a
//! capacity (`7.5`). The family code is the first token after splitting on `-`, `/`
//! and whitespace; a number glued to the end of that token (`2CY7.5`, `HGTHB6.3A`)
//! is split off as the capacity, otherwise the capacity is the leading number of the
//! next token.

use serde::{Deserialize, Serialize};

use crate::core::item::CatalogItem;
use crate::utils::validation::compact_model;

/// Minimum capacity ratio (`min / max`) and the points it earns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityTier {
    pub min_ratio: f64,
    pub points: f64,
}

/// Tunable constants of the similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Identical family codes
    pub family_exact: f64,
    /// One family code contains the other
    pub family_partial: f64,
    /// Numerically equal capacities
    pub capacity_exact: f64,
    /// Ratio tiers checked in order; the first tier whose ratio is exceeded wins
    pub capacity_tiers: Vec<CapacityTier>,
    /// Points for differing capacities below every tier
    pub capacity_floor: f64,
    /// Subtracted from a ratio score when the family codes differ
    pub family_mismatch_penalty: f64,
    /// Minimum similarity for a match to be accepted
    pub threshold: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            family_exact: 50.0,
            family_partial: 30.0,
            capacity_exact: 50.0,
            capacity_tiers: vec![
                CapacityTier {
                    min_ratio: 0.9,
                    points: 40.0,
                },
                CapacityTier {
                    min_ratio: 0.7,
                    points: 30.0,
                },
                CapacityTier {
                    min_ratio: 0.5,
                    points: 20.0,
                },
            ],
            capacity_floor: 10.0,
            family_mismatch_penalty: 10.0,
            threshold: 60.0,
        }
    }
}

/// Family code and capacity of one designation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTokens {
    pub family: String,
    pub capacity: Option<f64>,
}

impl ModelTokens {
    pub fn parse(model: &str) -> Self {
        let upper = model.to_uppercase();
        let mut tokens = upper
            .split(|c: char| c == '-' || c == '/' || c.is_whitespace())
            .filter(|t| !t.is_empty());

        let Some(first) = tokens.next() else {
            return Self {
                family: String::new(),
                capacity: None,
            };
        };

        match split_glued_capacity(first) {
            Some((family, capacity)) => Self {
                family: family.to_string(),
                capacity: Some(capacity),
            },
            None => Self {
                family: first.to_string(),
                capacity: tokens.next().and_then(leading_number),
            },
        }
    }
}

/// `HGTHB6.3A` -> (`HGTHB`, 6.3). The number must follow a letter.
fn split_glued_capacity(token: &str) -> Option<(&str, f64)> {
    let body = token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let number_start = body
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map(|(i, _)| i)?;

    let (family, number) = body.split_at(number_start);
    let number = number.trim_start_matches('.');
    if number.is_empty() || !family.ends_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    number.parse().ok().map(|n| (family, n))
}

fn leading_number(token: &str) -> Option<f64> {
    let end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map_or(token.len(), |(i, _)| i);
    token[..end].trim_end_matches('.').parse().ok()
}

/// A catalog item accepted by the fuzzy matcher
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'c> {
    pub item: &'c CatalogItem,
    /// 0-100
    pub similarity: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: FuzzyConfig,
}

impl FuzzyMatcher {
    pub fn new(config: FuzzyConfig) -> Self {
        Self { config }
    }

    /// Similarity of two designations, 0-100
    pub fn similarity(&self, target: &ModelTokens, candidate: &ModelTokens) -> f64 {
        let config = &self.config;
        let families_agree = !target.family.is_empty() && target.family == candidate.family;

        let mut score = 0.0;
        if families_agree {
            score += config.family_exact;
        } else if !target.family.is_empty()
            && !candidate.family.is_empty()
            && (target.family.contains(&candidate.family)
                || candidate.family.contains(&target.family))
        {
            score += config.family_partial;
        }

        if let (Some(a), Some(b)) = (target.capacity, candidate.capacity) {
            if (a - b).abs() < f64::EPSILON {
                score += config.capacity_exact;
            } else {
                let high = a.max(b);
                let ratio = if high > 0.0 { a.min(b) / high } else { 0.0 };
                score += config
                    .capacity_tiers
                    .iter()
                    .find(|tier| ratio > tier.min_ratio)
                    .map_or(config.capacity_floor, |tier| tier.points);
                if !families_agree {
                    score -= config.family_mismatch_penalty;
                }
            }
        }

        f64::max(score, 0.0)
    }

    /// Catalog items similar to `target`, best first.
    ///
    /// Items identical to the target after whitespace removal are left to the exact
    /// matcher. A target without a family code and a capacity matches nothing.
    pub fn find<'c>(&self, target: &str, catalog: &'c [CatalogItem]) -> Vec<FuzzyMatch<'c>> {
        let tokens = ModelTokens::parse(target);
        if tokens.family.is_empty() || tokens.capacity.is_none() {
            return Vec::new();
        }
        let key = compact_model(target);

        let mut matches: Vec<FuzzyMatch<'c>> = catalog
            .iter()
            .filter(|item| item.has_model() && compact_model(&item.model) != key)
            .filter_map(|item| {
                let similarity = self.similarity(&tokens, &ModelTokens::parse(&item.model));
                (similarity >= self.config.threshold).then_some(FuzzyMatch { item, similarity })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches
    }
}
