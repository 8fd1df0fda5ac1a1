use std::borrow::Cow;

use tracing::{debug, warn};

use crate::core::item::CatalogItem;
use crate::core::model::ModelCode;
use crate::core::types::{CandidateKind, Confidence, EquipmentKind, MatchType};
use crate::matching::alternative::AlternativeFormatResolver;
use crate::matching::candidates::{Candidate, CandidateGenerator};
use crate::matching::classifier::{RequirementClassifier, SelectionContext};
use crate::matching::exact::find_exact;
use crate::matching::fuzzy::{FuzzyConfig, FuzzyMatcher};
use crate::matching::load::LoadCheck;
use crate::matching::outcome::{MatchResult, SelectionOutcome};
use crate::matching::ranking::rank;
use crate::rules::repository::PRIMARY_SCORE;
use crate::rules::RuleSet;
use crate::utils::validation::validate_model;

/// Default score of a hit found under an alternate catalog spelling
pub const DEFAULT_ALTERNATIVE_SCORE: f64 = 90.0;

/// Default number of runner-up recommendations kept next to the chosen item
pub const DEFAULT_MAX_ALTERNATIVES: usize = 4;

/// Configuration for the selection engine
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Fuzzy similarity constants and acceptance threshold
    pub fuzzy: FuzzyConfig,
    /// Score given to alternative-format hits
    pub alternative_score: f64,
    /// Maximum number of alternatives in a resolved outcome
    pub max_alternatives: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy: FuzzyConfig::default(),
            alternative_score: DEFAULT_ALTERNATIVE_SCORE,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

/// Selects catalog equipment for a primary model under one rule set
pub struct SelectionEngine<'a> {
    rules: &'a RuleSet,
    config: MatchingConfig,
    fuzzy: FuzzyMatcher,
}

impl<'a> SelectionEngine<'a> {
    /// Create a new selection engine with default configuration
    pub fn new(rules: &'a RuleSet) -> Self {
        Self::with_config(rules, MatchingConfig::default())
    }

    /// Create a new selection engine with custom configuration
    pub fn with_config(rules: &'a RuleSet, config: MatchingConfig) -> Self {
        let fuzzy = FuzzyMatcher::new(config.fuzzy.clone());
        Self {
            rules,
            config,
            fuzzy,
        }
    }

    /// Whether the equipment class applies to `primary_model`
    pub fn is_applicable(&self, primary_model: &str, context: &SelectionContext) -> bool {
        RequirementClassifier::new(self.rules).is_applicable(primary_model, context)
    }

    /// Candidate target models for `primary_model`, best first
    pub fn candidates(&self, primary_model: &str, context: &SelectionContext) -> Vec<Candidate> {
        let applicable = self.is_applicable(primary_model, context);
        CandidateGenerator::new(self.rules).generate(
            &ModelCode::parse(primary_model),
            applicable,
            context,
        )
    }

    /// Run one selection: classify, generate candidates, match each candidate
    /// against the catalog and rank the results.
    ///
    /// Never fails; bad input and missing matches are reported through the
    /// outcome's status.
    pub fn select(
        &self,
        primary_model: &str,
        catalog: &[CatalogItem],
        context: &SelectionContext,
    ) -> SelectionOutcome {
        let kind = self.rules.kind;

        if let Err(e) = validate_model(primary_model) {
            debug!("Rejected primary model {primary_model:?}: {e}");
            return SelectionOutcome::invalid_model(kind, primary_model, &e.to_string());
        }

        if !self.is_applicable(primary_model, context) {
            debug!("{kind} not applicable to {}", primary_model.trim());
            return SelectionOutcome::not_applicable(kind, primary_model);
        }

        let candidates = self.candidates(primary_model, context);
        debug!(
            "{} {kind} candidate(s) for {}: {}",
            candidates.len(),
            primary_model.trim(),
            candidates
                .iter()
                .map(|c| format!("{} ({:.0})", c.model, c.score))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let usable = self.usable_items(catalog);
        if usable.is_empty() {
            warn!("Catalog has no usable {kind} entries");
            return SelectionOutcome::empty_catalog(kind, primary_model, candidates);
        }

        let load = self.load_check(context);
        let capable = capable_items(&usable, &load);

        let results: Vec<MatchResult> = candidates
            .iter()
            .flat_map(|candidate| self.match_candidate(candidate, &capable))
            .collect();
        let ranked = rank(results);

        if ranked.is_empty() {
            warn!(
                "No catalog {kind} found for {}; suggesting {}",
                primary_model.trim(),
                candidates.first().map_or("nothing", |c| c.model.as_str())
            );
            let mut outcome = SelectionOutcome::unresolved(kind, primary_model, candidates);
            let rejected = usable.len() - capable.len();
            if rejected > 0 {
                outcome.message.push_str(&format!(
                    "; {rejected} catalog entries cannot carry the engine torque or speed"
                ));
            }
            return outcome;
        }

        SelectionOutcome::resolved(kind, primary_model, ranked, self.config.max_alternatives)
    }

    /// Bind one candidate to catalog items: exact first, then fuzzy, then
    /// alternative spellings. Later stages only run when earlier ones find nothing.
    pub fn match_candidate(&self, candidate: &Candidate, catalog: &[CatalogItem]) -> Vec<MatchResult> {
        if let Some(item) = find_exact(&candidate.model, catalog) {
            debug!("Exact match {} for candidate {}", item.model, candidate.model);
            // The requested model listed as written is as good as a table hit
            let score = if candidate.kind == CandidateKind::Requested {
                PRIMARY_SCORE
            } else {
                candidate.score
            };
            return vec![self.bind(
                item,
                score,
                MatchType::Exact,
                format!("catalog model {} for {}", item.model, candidate.info),
                candidate,
            )];
        }

        let fuzzy = self.fuzzy.find(&candidate.model, catalog);
        if !fuzzy.is_empty() {
            debug!(
                "{} fuzzy match(es) for candidate {}",
                fuzzy.len(),
                candidate.model
            );
            return fuzzy
                .into_iter()
                .map(|m| {
                    self.bind(
                        m.item,
                        candidate.score * m.similarity / 100.0,
                        MatchType::Fuzzy,
                        format!("{:.0}% similar to {}", m.similarity, candidate.model),
                        candidate,
                    )
                })
                .collect();
        }

        AlternativeFormatResolver::new(&self.rules.formats)
            .resolve(&candidate.model, catalog)
            .into_iter()
            .map(|m| {
                debug!(
                    "Alternative spelling {} of {} found in catalog",
                    m.spelling, candidate.model
                );
                self.bind(
                    m.item,
                    self.config.alternative_score,
                    MatchType::Alternative,
                    format!("catalog spelling {} of {}", m.spelling, candidate.model),
                    candidate,
                )
            })
            .collect()
    }

    fn bind(
        &self,
        item: &CatalogItem,
        score: f64,
        match_type: MatchType,
        info: String,
        candidate: &Candidate,
    ) -> MatchResult {
        let mut result = MatchResult::new(item, score, match_type, info, candidate);
        // Anything reached through the generic fallback needs a human look
        let fallback = match candidate.kind {
            CandidateKind::Default => true,
            CandidateKind::Requested => match_type != MatchType::Exact,
            CandidateKind::Primary | CandidateKind::Alternate => false,
        };
        if fallback {
            result.confidence = Confidence::Low;
        }
        result
    }

    /// Torque and speed limits apply to couplings only
    fn load_check(&self, context: &SelectionContext) -> LoadCheck {
        if self.rules.kind == EquipmentKind::Coupling {
            LoadCheck::for_context(context)
        } else {
            LoadCheck::default()
        }
    }

    /// Catalog entries of this rule set's class with a model designation
    fn usable_items<'c>(&self, catalog: &'c [CatalogItem]) -> Cow<'c, [CatalogItem]> {
        let kind = self.rules.kind;
        let usable = |item: &CatalogItem| item.has_model() && item.kind == kind;
        if catalog.iter().all(usable) {
            return Cow::Borrowed(catalog);
        }

        let blank = catalog.iter().filter(|item| !item.has_model()).count();
        if blank > 0 {
            warn!("Skipping {blank} catalog entries without a model designation");
        }
        let foreign = catalog
            .iter()
            .filter(|item| item.has_model() && item.kind != kind)
            .count();
        if foreign > 0 {
            warn!("Skipping {foreign} catalog entries that are not a {kind}");
        }
        Cow::Owned(catalog.iter().filter(|item| usable(*item)).cloned().collect())
    }
}

/// Items that pass the installation's torque and speed limits
fn capable_items<'c>(items: &'c [CatalogItem], load: &LoadCheck) -> Cow<'c, [CatalogItem]> {
    if load.is_empty() {
        return Cow::Borrowed(items);
    }

    Cow::Owned(
        items
            .iter()
            .filter(|item| match load.shortfall(item) {
                Some(shortfall) => {
                    debug!("Rejected {}: {shortfall}", item.model);
                    false
                }
                None => true,
            })
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::NumberCoding;
    use crate::core::types::{EquipmentKind, OutcomeStatus};
    use crate::matching::outcome::Recommendation;
    use crate::rules::{
        Applicability, ApplicabilityRule, DefaultCandidate, MatchingRule, SeriesRules,
        UnknownSeriesPolicy,
    };

    fn synthetic_rules() -> RuleSet {
        RuleSet::new(EquipmentKind::StandbyPump)
            .with_applicability(ApplicabilityRule::new(
                "AA",
                NumberCoding::Decimal,
                Applicability::Always,
            ))
            .with_unknown_series(UnknownSeriesPolicy::PowerAtLeast(600.0))
            .with_series(SeriesRules::new(
                "AA",
                NumberCoding::Decimal,
                vec![MatchingRule::range(28.30, 45.49, "T-7.5/2.5D")],
            ))
            .with_default(DefaultCandidate::Fixed("Q-1/1D".to_string()))
    }

    fn pump(model: &str) -> CatalogItem {
        CatalogItem::new(model, EquipmentKind::StandbyPump)
    }

    #[test]
    fn test_exact_hit_scores_candidate_score() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let outcome = engine.select("AA28.30", &[pump("t-7.5/2.5d")], &SelectionContext::default());

        assert_eq!(outcome.status, OutcomeStatus::Resolved);
        let chosen = outcome.chosen.unwrap();
        assert_eq!(chosen.match_type, MatchType::Exact);
        assert!((chosen.score - 100.0).abs() < f64::EPSILON);
        assert_eq!(chosen.confidence, Confidence::Exact);
    }

    #[test]
    fn test_fuzzy_hit_when_spelling_differs() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let outcome = engine.select("AA28.30", &[pump("T 7.5/2.5")], &SelectionContext::default());

        let chosen = outcome.chosen.unwrap();
        assert_eq!(chosen.match_type, MatchType::Fuzzy);
        assert!(chosen.score >= 90.0);
        assert_eq!(chosen.candidate_model, "T-7.5/2.5D");
    }

    #[test]
    fn test_unknown_series_falls_back_to_default() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let context = SelectionContext::default().with_power(650.0);
        let outcome = engine.select("ZZ9999", &[pump("R-40/9")], &context);

        assert!(!outcome.success);
        assert!(outcome.requires_accessory);
        assert_eq!(outcome.status, OutcomeStatus::Unresolved);
        assert!(outcome.chosen.is_none());
        assert_eq!(outcome.suggested_model.as_deref(), Some("Q-1/1D"));
        assert_eq!(outcome.alternatives.len(), 1);
        assert!(matches!(
            &outcome.alternatives[0],
            Recommendation::Candidate(c) if (c.score - 60.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn test_default_candidate_hit_is_low_confidence() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let context = SelectionContext::default().with_power(650.0);
        let outcome = engine.select("ZZ9999", &[pump("Q-1/1D")], &context);

        assert_eq!(outcome.status, OutcomeStatus::Resolved);
        assert_eq!(outcome.chosen.as_ref().unwrap().confidence, Confidence::Low);
        assert!(outcome.message.contains("low confidence"));
    }

    #[test]
    fn test_empty_model_is_invalid_input() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let outcome = engine.select("", &[pump("T-7.5/2.5D")], &SelectionContext::default());

        assert_eq!(outcome.status, OutcomeStatus::InvalidInput);
        assert!(!outcome.success);
        assert!(!outcome.requires_accessory);
        assert!(outcome.chosen.is_none());
    }

    #[test]
    fn test_not_applicable_short_circuits() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let outcome = engine.select("ZZ9999", &[pump("Q-1/1D")], &SelectionContext::default());

        assert_eq!(outcome.status, OutcomeStatus::NotApplicable);
        assert!(outcome.success);
        assert!(!outcome.requires_accessory);
        assert!(outcome.chosen.is_none());
        assert!(outcome.alternatives.is_empty());
    }

    #[test]
    fn test_catalog_without_usable_entries() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let catalog = vec![
            pump("  "),
            CatalogItem::new("T-7.5/2.5D", EquipmentKind::Coupling),
        ];
        let outcome = engine.select("AA28.30", &catalog, &SelectionContext::default());

        assert_eq!(outcome.status, OutcomeStatus::InvalidInput);
        assert!(outcome.requires_accessory);
        assert_eq!(outcome.suggested_model.as_deref(), Some("T-7.5/2.5D"));
    }

    #[test]
    fn test_fuzzy_threshold_from_config() {
        let rules = synthetic_rules();
        let config = MatchingConfig {
            fuzzy: FuzzyConfig {
                threshold: 95.0,
                ..FuzzyConfig::default()
            },
            ..MatchingConfig::default()
        };
        let engine = SelectionEngine::with_config(&rules, config);
        // 7.5 vs 8: similarity 90, below the raised threshold
        let outcome = engine.select("AA28.30", &[pump("T-8/2.5D")], &SelectionContext::default());
        assert_eq!(outcome.status, OutcomeStatus::Unresolved);
    }

    #[test]
    fn test_fuzzy_hit_never_exact_confidence() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let outcome = engine.select("AA28.30", &[pump("T7.5/2.5D")], &SelectionContext::default());

        let chosen = outcome.chosen.unwrap();
        assert_eq!(chosen.match_type, MatchType::Fuzzy);
        assert!((chosen.score - 100.0).abs() < f64::EPSILON);
        assert_eq!(chosen.confidence, Confidence::High);
    }

    #[test]
    fn test_requested_model_listed_as_written() {
        let rules = RuleSet::new(EquipmentKind::Gearbox)
            .with_unknown_series(UnknownSeriesPolicy::Always)
            .with_default(DefaultCandidate::RequestedModel);
        let engine = SelectionEngine::new(&rules);
        let catalog = vec![
            CatalogItem::new("HC138", EquipmentKind::Gearbox),
            CatalogItem::new("HC139", EquipmentKind::Gearbox),
        ];

        let exact = engine.select("hc138", &catalog, &SelectionContext::default());
        let chosen = exact.chosen.unwrap();
        assert_eq!(chosen.match_type, MatchType::Exact);
        assert!((chosen.score - 100.0).abs() < f64::EPSILON);
        assert_eq!(chosen.confidence, Confidence::Exact);
        assert!(!exact.message.contains("low confidence"));

        // A near miss on the requested model still needs checking
        let near = engine.select("HC137", &catalog, &SelectionContext::default());
        assert_eq!(near.chosen.unwrap().confidence, Confidence::Low);
    }

    #[test]
    fn test_undersized_coupling_rejected() {
        let rules = RuleSet::new(EquipmentKind::Coupling)
            .with_unknown_series(UnknownSeriesPolicy::Always)
            .with_series(SeriesRules::new(
                "HC",
                NumberCoding::Integer,
                vec![MatchingRule::exactly(1000.0, "HGTHB5")],
            ))
            .with_default(DefaultCandidate::Fixed("HGTHB5".to_string()));
        let engine = SelectionEngine::new(&rules);
        let catalog = vec![
            CatalogItem::new("HGTHB5", EquipmentKind::Coupling).with_torque(5.0),
            CatalogItem::new("HGTHB8", EquipmentKind::Coupling).with_torque(8.0),
        ];

        let unloaded = engine.select("HC1000", &catalog, &SelectionContext::default());
        assert_eq!(unloaded.chosen.unwrap().item.model, "HGTHB5");

        // 4000 N·m under the default service factor 1.8 needs 7.2 kN·m
        let context = SelectionContext::default().with_torque(4000.0);
        let loaded = engine.select("HC1000", &catalog, &context);
        let chosen = loaded.chosen.unwrap();
        assert_eq!(chosen.item.model, "HGTHB8");
        assert_eq!(chosen.match_type, MatchType::Fuzzy);
        assert!(loaded.alternatives.is_empty());

        let too_fast = SelectionContext::default().with_speed(3500.0);
        let catalog: Vec<CatalogItem> = catalog
            .into_iter()
            .map(|item| item.with_max_speed(3000.0))
            .collect();
        let outcome = engine.select("HC1000", &catalog, &too_fast);
        assert_eq!(outcome.status, OutcomeStatus::Unresolved);
        assert!(outcome.message.contains("cannot carry the engine torque or speed"));
    }

    #[test]
    fn test_load_limits_ignored_for_pumps() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let context = SelectionContext::default().with_torque(50_000.0).with_speed(3000.0);
        let outcome = engine.select("AA28.30", &[pump("T-7.5/2.5D")], &context);
        assert_eq!(outcome.status, OutcomeStatus::Resolved);
    }

    #[test]
    fn test_items_of_other_classes_skipped() {
        let rules = synthetic_rules();
        let engine = SelectionEngine::new(&rules);
        let catalog = vec![
            CatalogItem::new("T-7.5/2.5D", EquipmentKind::Coupling),
            pump("T-7.5/2.5"),
        ];
        let outcome = engine.select("AA28.30", &catalog, &SelectionContext::default());

        let chosen = outcome.chosen.unwrap();
        assert_eq!(chosen.item.kind, EquipmentKind::StandbyPump);
        assert_eq!(chosen.item.model, "T-7.5/2.5");
    }
}
