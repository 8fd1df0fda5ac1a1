use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::model::ModelCode;
use crate::core::types::CandidateKind;
use crate::matching::classifier::SelectionContext;
use crate::rules::repository::FIRST_ALTERNATE_OFFSET;
use crate::rules::{DefaultCandidate, MatchingRule, RuleSet};
use crate::utils::validation::compact_model;

/// A provisional target model, not yet bound to a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub model: String,
    /// 0-100
    pub score: f64,
    pub kind: CandidateKind,
    /// Which rule produced the candidate
    pub info: String,
}

impl Candidate {
    pub fn new(model: impl Into<String>, score: f64, kind: CandidateKind, info: String) -> Self {
        Self {
            model: model.into(),
            score,
            kind,
            info,
        }
    }
}

/// Turns a primary model into an ordered list of candidate target models
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    rules: &'a RuleSet,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Score-descending candidates for an applicable primary model.
    ///
    /// Emits nothing when the class does not apply, and exactly one default
    /// candidate when no series rule matches.
    pub fn generate(
        &self,
        code: &ModelCode,
        applicable: bool,
        context: &SelectionContext,
    ) -> Vec<Candidate> {
        if !applicable || code.is_empty() {
            return Vec::new();
        }

        let matched = self
            .rules
            .series_rules(code.series())
            .and_then(|table| table.first_match(code));

        let candidates = match matched {
            Some(rule) => {
                debug!(
                    "{} rule {} of series '{}' matched {code}",
                    self.rules.kind,
                    rule.selector,
                    code.series()
                );
                self.from_rule(rule, code, context)
            }
            None => {
                debug!(
                    "No {} rule for {code}; falling back to the default candidate",
                    self.rules.kind
                );
                vec![self.default_candidate(code)]
            }
        };

        dedup_and_sort(candidates)
    }

    fn from_rule(
        &self,
        rule: &MatchingRule,
        code: &ModelCode,
        context: &SelectionContext,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(rule.alternates.len() + 2);
        let source = format!("series {} rule {} for {code}", series_label(code), rule.selector);

        let covered = if context.has_cover {
            self.rules.covered_variant(&rule.target)
        } else {
            None
        };

        match covered {
            Some(covered) => {
                candidates.push(Candidate::new(
                    covered,
                    rule.base_score,
                    CandidateKind::Primary,
                    format!("covered variant of {} ({source})", rule.target),
                ));
                candidates.push(Candidate::new(
                    rule.target.clone(),
                    rule.base_score - FIRST_ALTERNATE_OFFSET,
                    CandidateKind::Alternate,
                    format!("uncovered {} ({source})", rule.target),
                ));
            }
            None => candidates.push(Candidate::new(
                rule.target.clone(),
                rule.base_score,
                CandidateKind::Primary,
                source.clone(),
            )),
        }

        for alternate in &rule.alternates {
            candidates.push(Candidate::new(
                alternate.model.clone(),
                rule.base_score - alternate.score_offset,
                CandidateKind::Alternate,
                format!("alternate for {} ({source})", rule.target),
            ));
        }

        candidates
    }

    fn default_candidate(&self, code: &ModelCode) -> Candidate {
        match &self.rules.default_candidate {
            DefaultCandidate::Fixed(model) => Candidate::new(
                model.clone(),
                self.rules.default_score,
                CandidateKind::Default,
                format!("no rule for series {}; generic fallback", series_label(code)),
            ),
            DefaultCandidate::RequestedModel => Candidate::new(
                code.normalized(),
                self.rules.default_score,
                CandidateKind::Requested,
                format!("no rule for series {}; looked up as written", series_label(code)),
            ),
        }
    }
}

fn series_label(code: &ModelCode) -> &str {
    if code.series().is_empty() {
        "(none)"
    } else {
        code.series()
    }
}

/// Collapse candidates naming the same model (keeping the higher score) and sort
/// descending. Ties keep generation order.
fn dedup_and_sort(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut unique: Vec<(String, Candidate)> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let key = compact_model(&candidate.model);
        match unique.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                if candidate.score > existing.score {
                    *existing = candidate;
                }
            }
            None => unique.push((key, candidate)),
        }
    }

    let mut sorted: Vec<Candidate> = unique.into_iter().map(|(_, c)| c).collect();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::NumberCoding;
    use crate::core::types::EquipmentKind;
    use crate::rules::{coupling, gearbox, standby_pump, SeriesRules};

    fn generate(rules: &RuleSet, model: &str, context: &SelectionContext) -> Vec<Candidate> {
        CandidateGenerator::new(rules).generate(&ModelCode::parse(model), true, context)
    }

    #[test]
    fn test_primary_and_alternates() {
        let rules = standby_pump::rule_set().unwrap();
        let candidates = generate(&rules, "GW28.30", &SelectionContext::default());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].model, "2CY-7.5/2.5D");
        assert!((candidates[0].score - 100.0).abs() < f64::EPSILON);
        assert_eq!(candidates[0].kind, CandidateKind::Primary);
        assert_eq!(candidates[1].model, "2CY-7.5/2.5");
        assert!((candidates[1].score - 95.0).abs() < f64::EPSILON);
        assert_eq!(candidates[1].kind, CandidateKind::Alternate);
    }

    #[test]
    fn test_not_applicable_emits_nothing() {
        let rules = standby_pump::rule_set().unwrap();
        let candidates = CandidateGenerator::new(&rules).generate(
            &ModelCode::parse("GW28.30"),
            false,
            &SelectionContext::default(),
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_default_candidate_when_no_rule_matches() {
        let rules = standby_pump::rule_set().unwrap();
        let candidates = generate(&rules, "ZZ9999", &SelectionContext::default());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].model, standby_pump::FALLBACK_PUMP);
        assert_eq!(candidates[0].kind, CandidateKind::Default);
        assert!((candidates[0].score - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gearbox_default_is_requested_model() {
        let rules = gearbox::rule_set().unwrap();
        let candidates = generate(&rules, " hcx450 ", &SelectionContext::default());
        assert_eq!(candidates[0].model, "HCX450");
        assert_eq!(candidates[0].kind, CandidateKind::Requested);
    }

    #[test]
    fn test_cover_swaps_primary() {
        let rules = coupling::rule_set().unwrap();
        let context = SelectionContext::default().with_cover(true);
        let candidates = generate(&rules, "HC1000", &context);

        assert_eq!(candidates[0].model, "HGTHJB5");
        assert_eq!(candidates[0].kind, CandidateKind::Primary);
        assert_eq!(candidates[1].model, "HGTHB5");
        assert_eq!(candidates[1].kind, CandidateKind::Alternate);
        assert!(candidates[1].score < candidates[0].score);
    }

    #[test]
    fn test_cover_without_covered_variant_is_unchanged() {
        let rules = coupling::rule_set().unwrap();
        let context = SelectionContext::default().with_cover(true);
        let candidates = generate(&rules, "HC1400", &context);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].model, "HGTHB8");
    }

    #[test]
    fn test_duplicates_keep_higher_score() {
        let rules = RuleSet::new(EquipmentKind::StandbyPump).with_series(SeriesRules::new(
            "AA",
            NumberCoding::Integer,
            vec![MatchingRule::exactly(1.0, "P-1")
                .with_base_score(80.0)
                .with_alternates(&["p 1", "P-2"])],
        ));
        let candidates = generate(&rules, "AA1", &SelectionContext::default());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].model, "P-1");
        assert!((candidates[0].score - 80.0).abs() < f64::EPSILON);
        assert_eq!(candidates[1].model, "P-2");
    }
}
