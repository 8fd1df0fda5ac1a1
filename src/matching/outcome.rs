use serde::Serialize;
use thiserror::Error;

use crate::core::item::CatalogItem;
use crate::core::types::{Confidence, EquipmentKind, MatchType, OutcomeStatus};
use crate::matching::candidates::Candidate;

/// A candidate bound to a catalog item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub item: CatalogItem,
    /// 0-100
    pub score: f64,
    pub match_type: MatchType,
    /// Human-readable note on how the binding was made
    pub info: String,
    /// The candidate model this item was found for
    pub candidate_model: String,
    pub confidence: Confidence,
}

impl MatchResult {
    pub fn new(
        item: &CatalogItem,
        score: f64,
        match_type: MatchType,
        info: String,
        candidate: &Candidate,
    ) -> Self {
        Self {
            item: item.clone(),
            score,
            match_type,
            info,
            candidate_model: candidate.model.clone(),
            confidence: Confidence::for_match(score, match_type),
        }
    }
}

/// One entry of an outcome's alternatives list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum Recommendation {
    /// Present in the catalog
    Catalog(MatchResult),
    /// Not present in the catalog; only a suggested model
    Candidate(Candidate),
}

impl Recommendation {
    pub fn model(&self) -> &str {
        match self {
            Self::Catalog(result) => &result.item.model,
            Self::Candidate(candidate) => &candidate.model,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Self::Catalog(result) => result.score,
            Self::Candidate(candidate) => candidate.score,
        }
    }

    pub fn as_match(&self) -> Option<&MatchResult> {
        match self {
            Self::Catalog(result) => Some(result),
            Self::Candidate(_) => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OverrideError {
    #[error("No alternative at index {index} ({available} available)")]
    OutOfRange { index: usize, available: usize },

    #[error("Alternative '{0}' is not in the catalog and cannot be chosen")]
    NotInCatalog(String),
}

/// Result of one selection call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOutcome {
    pub kind: EquipmentKind,
    /// Primary model exactly as supplied
    pub primary_model: String,
    pub status: OutcomeStatus,
    pub success: bool,
    pub requires_accessory: bool,
    pub chosen: Option<MatchResult>,
    /// Score-descending
    pub alternatives: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_model: Option<String>,
    pub message: String,
    pub manual_override: bool,
}

impl SelectionOutcome {
    fn base(kind: EquipmentKind, primary_model: &str, status: OutcomeStatus) -> Self {
        Self {
            kind,
            primary_model: primary_model.to_string(),
            status,
            success: false,
            requires_accessory: false,
            chosen: None,
            alternatives: Vec::new(),
            suggested_model: None,
            message: String::new(),
            manual_override: false,
        }
    }

    /// The primary model itself cannot be used
    pub fn invalid_model(kind: EquipmentKind, primary_model: &str, reason: &str) -> Self {
        Self {
            message: format!("Invalid primary model '{}': {reason}", primary_model.trim()),
            ..Self::base(kind, primary_model, OutcomeStatus::InvalidInput)
        }
    }

    /// The class applies, but the catalog has nothing to match against
    pub fn empty_catalog(
        kind: EquipmentKind,
        primary_model: &str,
        candidates: Vec<Candidate>,
    ) -> Self {
        let suggested_model = candidates.first().map(|c| c.model.clone());
        Self {
            requires_accessory: true,
            message: format!(
                "The catalog has no usable {kind} entries; load a catalog before selecting"
            ),
            suggested_model,
            alternatives: candidates.into_iter().map(Recommendation::Candidate).collect(),
            ..Self::base(kind, primary_model, OutcomeStatus::InvalidInput)
        }
    }

    pub fn not_applicable(kind: EquipmentKind, primary_model: &str) -> Self {
        Self {
            success: true,
            message: format!("{} does not need a {kind}", primary_model.trim()),
            ..Self::base(kind, primary_model, OutcomeStatus::NotApplicable)
        }
    }

    /// `ranked` must be non-empty and sorted descending
    pub fn resolved(
        kind: EquipmentKind,
        primary_model: &str,
        mut ranked: Vec<MatchResult>,
        max_alternatives: usize,
    ) -> Self {
        if ranked.is_empty() {
            return Self::unresolved(kind, primary_model, Vec::new());
        }

        let chosen = ranked.remove(0);
        ranked.truncate(max_alternatives);

        let mut message = format!(
            "Selected {kind} {} for {} ({} match, score {:.1})",
            chosen.item.model,
            primary_model.trim(),
            chosen.match_type,
            chosen.score
        );
        if chosen.confidence == Confidence::Low {
            message.push_str("; low confidence, please verify");
        }

        Self {
            success: true,
            requires_accessory: true,
            chosen: Some(chosen),
            alternatives: ranked.into_iter().map(Recommendation::Catalog).collect(),
            message,
            ..Self::base(kind, primary_model, OutcomeStatus::Resolved)
        }
    }

    /// No candidate is present in the catalog
    pub fn unresolved(kind: EquipmentKind, primary_model: &str, candidates: Vec<Candidate>) -> Self {
        let suggested_model = candidates.first().map(|c| c.model.clone());
        let message = match &suggested_model {
            Some(model) => format!(
                "No {kind} in the catalog matches {}; add {model} to the catalog or choose one manually",
                primary_model.trim()
            ),
            None => format!(
                "No {kind} candidates for {}; choose one manually",
                primary_model.trim()
            ),
        };

        Self {
            requires_accessory: true,
            suggested_model,
            alternatives: candidates.into_iter().map(Recommendation::Candidate).collect(),
            message,
            ..Self::base(kind, primary_model, OutcomeStatus::Unresolved)
        }
    }

    /// A copy of this outcome with the catalog-bound alternative at `index` chosen
    /// instead. The previous choice moves to the front of the alternatives.
    ///
    /// The result is no longer ranked: with `manual_override` set, alternatives
    /// may outscore `chosen`, and scores are kept as the matchers produced them.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::OutOfRange` for an index past the alternatives and
    /// `OverrideError::NotInCatalog` for an unbound candidate.
    pub fn promote(&self, index: usize) -> Result<Self, OverrideError> {
        let picked = self
            .alternatives
            .get(index)
            .ok_or(OverrideError::OutOfRange {
                index,
                available: self.alternatives.len(),
            })?;

        let promoted = picked
            .as_match()
            .ok_or_else(|| OverrideError::NotInCatalog(picked.model().to_string()))?
            .clone();

        let mut alternatives = Vec::with_capacity(self.alternatives.len());
        if let Some(previous) = &self.chosen {
            alternatives.push(Recommendation::Catalog(previous.clone()));
        }
        alternatives.extend(
            self.alternatives
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, r)| r.clone()),
        );

        Ok(Self {
            status: OutcomeStatus::Resolved,
            success: true,
            requires_accessory: true,
            message: format!(
                "Manually selected {} {} for {}",
                self.kind,
                promoted.item.model,
                self.primary_model.trim()
            ),
            chosen: Some(promoted),
            alternatives,
            suggested_model: None,
            manual_override: true,
            ..self.clone()
        })
    }
}
