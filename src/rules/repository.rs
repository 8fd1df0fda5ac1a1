use thiserror::Error;

use crate::core::model::{ModelCode, NumberCoding};
use crate::core::types::EquipmentKind;
use crate::rules::formats::FormatRule;
use crate::utils::validation::normalize_model;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid range in series '{series}': low {low} is above high {high}")]
    InvalidRange { series: String, low: f64, high: f64 },

    #[error("Invalid bucket in series '{series}': width {width} must be positive")]
    InvalidBucket { series: String, width: f64 },

    #[error("Empty target model in series '{0}'")]
    EmptyTarget(String),

    #[error("Score {score} for '{model}' is outside 0-100")]
    ScoreOutOfRange { model: String, score: f64 },

    #[error("Series '{0}' is declared more than once")]
    DuplicateSeries(String),

    #[error("Invalid alternative-format pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Alternative-format pattern '{0}' has no templates")]
    NoTemplates(String),

    #[error("No rule set for {0}")]
    MissingRuleSet(EquipmentKind),
}

/// Which primary models a rule applies to
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSelector {
    /// Series number within `[low, high]`
    Range { low: f64, high: f64 },
    /// Series number within `[base, base + width)`, e.g. the 2700 bucket
    Bucket { base: f64, width: f64 },
    /// The full normalized primary model, e.g. `HC1200/1`
    Model(String),
}

impl RuleSelector {
    /// Check a parsed primary model against this selector
    pub fn matches(&self, code: &ModelCode, number: Option<f64>) -> bool {
        match self {
            Self::Range { low, high } => number.is_some_and(|n| n >= *low && n <= *high),
            Self::Bucket { base, width } => number.is_some_and(|n| n >= *base && n < base + width),
            Self::Model(model) => code.normalized() == model,
        }
    }

    fn validate(&self, series: &str) -> Result<(), RuleError> {
        match self {
            Self::Range { low, high } if low > high || low.is_nan() || high.is_nan() => {
                Err(RuleError::InvalidRange {
                    series: series.to_string(),
                    low: *low,
                    high: *high,
                })
            }
            Self::Bucket { width, .. } if width.is_nan() || *width <= 0.0 => {
                Err(RuleError::InvalidBucket {
                    series: series.to_string(),
                    width: *width,
                })
            }
            Self::Model(model) if model.is_empty() => Err(RuleError::EmptyTarget(series.to_string())),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for RuleSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range { low, high } if (low - high).abs() < f64::EPSILON => write!(f, "= {low}"),
            Self::Range { low, high } => write!(f, "{low} - {high}"),
            Self::Bucket { base, width } => write!(f, "{base} series (< {})", base + width),
            Self::Model(model) => write!(f, "model {model}"),
        }
    }
}

/// Alternate target offered next to a rule's primary target
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateTarget {
    pub model: String,
    /// Subtracted from the rule's base score
    pub score_offset: f64,
}

/// Score offset of the first alternate; each further alternate drops by `ALTERNATE_STEP`
pub const FIRST_ALTERNATE_OFFSET: f64 = 5.0;
pub const ALTERNATE_STEP: f64 = 3.0;

/// Base score of a rule's primary target unless overridden
pub const PRIMARY_SCORE: f64 = 100.0;

/// One row of a series table
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingRule {
    pub selector: RuleSelector,
    pub target: String,
    pub base_score: f64,
    pub alternates: Vec<AlternateTarget>,
}

impl MatchingRule {
    pub fn new(selector: RuleSelector, target: impl Into<String>) -> Self {
        Self {
            selector,
            target: target.into(),
            base_score: PRIMARY_SCORE,
            alternates: Vec::new(),
        }
    }

    pub fn range(low: f64, high: f64, target: impl Into<String>) -> Self {
        Self::new(RuleSelector::Range { low, high }, target)
    }

    /// A single series number, e.g. `DT900`
    pub fn exactly(number: f64, target: impl Into<String>) -> Self {
        Self::range(number, number, target)
    }

    pub fn bucket(base: f64, width: f64, target: impl Into<String>) -> Self {
        Self::new(RuleSelector::Bucket { base, width }, target)
    }

    pub fn model(model: &str, target: impl Into<String>) -> Self {
        Self::new(RuleSelector::Model(normalize_model(model)), target)
    }

    /// Append alternates in priority order, scored `base-5`, `base-8`, `base-11`, ...
    #[must_use]
    pub fn with_alternates(mut self, models: &[&str]) -> Self {
        for model in models {
            let index = self.alternates.len();
            #[allow(clippy::cast_precision_loss)]
            let score_offset = FIRST_ALTERNATE_OFFSET + ALTERNATE_STEP * index as f64;
            self.alternates.push(AlternateTarget {
                model: (*model).to_string(),
                score_offset,
            });
        }
        self
    }

    #[must_use]
    pub fn with_base_score(mut self, score: f64) -> Self {
        self.base_score = score;
        self
    }

    fn validate(&self, series: &str) -> Result<(), RuleError> {
        self.selector.validate(series)?;

        if self.target.trim().is_empty() {
            return Err(RuleError::EmptyTarget(series.to_string()));
        }
        check_score(&self.target, self.base_score)?;

        for alternate in &self.alternates {
            if alternate.model.trim().is_empty() {
                return Err(RuleError::EmptyTarget(series.to_string()));
            }
            check_score(&alternate.model, self.base_score - alternate.score_offset)?;
        }
        Ok(())
    }
}

fn check_score(model: &str, score: f64) -> Result<(), RuleError> {
    if (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(RuleError::ScoreOutOfRange {
            model: model.to_string(),
            score,
        })
    }
}

/// Ordered rule table for one series prefix. The first matching rule wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRules {
    pub series: String,
    pub coding: NumberCoding,
    pub rules: Vec<MatchingRule>,
}

impl SeriesRules {
    pub fn new(series: &str, coding: NumberCoding, rules: Vec<MatchingRule>) -> Self {
        Self {
            series: normalize_model(series),
            coding,
            rules,
        }
    }

    /// First rule matching the primary model, in table order
    pub fn first_match(&self, code: &ModelCode) -> Option<&MatchingRule> {
        let number = code.series_number(self.coding);
        self.rules
            .iter()
            .find(|rule| rule.selector.matches(code, number))
    }
}

/// Whether a known series needs the equipment class at all
#[derive(Debug, Clone, PartialEq)]
pub enum Applicability {
    /// Every model of the series
    Always,
    /// Only series numbers matched by one of the selectors
    Within(Vec<RuleSelector>),
    /// Series number at or above the threshold
    AtLeast(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicabilityRule {
    pub series: String,
    pub coding: NumberCoding,
    pub applicability: Applicability,
}

impl ApplicabilityRule {
    pub fn new(series: &str, coding: NumberCoding, applicability: Applicability) -> Self {
        Self {
            series: normalize_model(series),
            coding,
            applicability,
        }
    }

    pub fn applies(&self, code: &ModelCode) -> bool {
        let number = code.series_number(self.coding);
        match &self.applicability {
            Applicability::Always => true,
            Applicability::Within(selectors) => selectors.iter().any(|s| s.matches(code, number)),
            Applicability::AtLeast(threshold) => number.is_some_and(|n| n >= *threshold),
        }
    }
}

/// What the classifier decides for a series with no applicability rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnknownSeriesPolicy {
    Never,
    /// Applicable when the context's rated power (kW) reaches the threshold
    PowerAtLeast(f64),
    Always,
}

/// Fallback candidate emitted when no series rule matches
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultCandidate {
    /// A generic, widely stocked model
    Fixed(String),
    /// The normalized primary model itself
    RequestedModel,
}

/// Score of the fallback candidate
pub const DEFAULT_CANDIDATE_SCORE: f64 = 60.0;

/// Complete, immutable rule configuration for one equipment class
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub kind: EquipmentKind,
    pub applicability: Vec<ApplicabilityRule>,
    pub unknown_series: UnknownSeriesPolicy,
    /// Series tables in declaration order
    pub series: Vec<SeriesRules>,
    pub default_candidate: DefaultCandidate,
    pub default_score: f64,
    /// (uncovered, covered) model pairs used when the context asks for a cover
    pub covered_variants: Vec<(String, String)>,
    pub formats: Vec<FormatRule>,
}

impl RuleSet {
    /// An empty rule set: nothing applies, the requested model is the fallback
    pub fn new(kind: EquipmentKind) -> Self {
        Self {
            kind,
            applicability: Vec::new(),
            unknown_series: UnknownSeriesPolicy::Never,
            series: Vec::new(),
            default_candidate: DefaultCandidate::RequestedModel,
            default_score: DEFAULT_CANDIDATE_SCORE,
            covered_variants: Vec::new(),
            formats: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: SeriesRules) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_applicability(mut self, rule: ApplicabilityRule) -> Self {
        self.applicability.push(rule);
        self
    }

    #[must_use]
    pub fn with_unknown_series(mut self, policy: UnknownSeriesPolicy) -> Self {
        self.unknown_series = policy;
        self
    }

    #[must_use]
    pub fn with_default(mut self, candidate: DefaultCandidate) -> Self {
        self.default_candidate = candidate;
        self
    }

    #[must_use]
    pub fn with_covered_variant(mut self, uncovered: &str, covered: &str) -> Self {
        self.covered_variants
            .push((normalize_model(uncovered), normalize_model(covered)));
        self
    }

    #[must_use]
    pub fn with_format(mut self, rule: FormatRule) -> Self {
        self.formats.push(rule);
        self
    }

    /// Series table for an exact series prefix
    pub fn series_rules(&self, series: &str) -> Option<&SeriesRules> {
        self.series.iter().find(|s| s.series == series)
    }

    /// Applicability rule for an exact series prefix
    pub fn applicability_for(&self, series: &str) -> Option<&ApplicabilityRule> {
        self.applicability.iter().find(|a| a.series == series)
    }

    /// Covered variant of a coupling model, if one exists
    pub fn covered_variant(&self, model: &str) -> Option<&str> {
        let key = normalize_model(model);
        self.covered_variants
            .iter()
            .find(|(uncovered, _)| *uncovered == key)
            .map(|(_, covered)| covered.as_str())
    }

    /// Total number of series rules
    pub fn rule_count(&self) -> usize {
        self.series.iter().map(|s| s.rules.len()).sum()
    }

    /// Check every table for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first `RuleError` found: inverted ranges, empty buckets, empty
    /// targets, scores outside 0-100, or a series declared twice.
    pub fn validate(&self) -> Result<(), RuleError> {
        let mut seen: Vec<&str> = Vec::new();
        for table in &self.series {
            if seen.contains(&table.series.as_str()) {
                return Err(RuleError::DuplicateSeries(table.series.clone()));
            }
            seen.push(&table.series);

            for rule in &table.rules {
                rule.validate(&table.series)?;
            }
        }

        for rule in &self.applicability {
            if let Applicability::Within(selectors) = &rule.applicability {
                for selector in selectors {
                    selector.validate(&rule.series)?;
                }
            }
        }

        if let DefaultCandidate::Fixed(model) = &self.default_candidate {
            if model.trim().is_empty() {
                return Err(RuleError::EmptyTarget("<default>".to_string()));
            }
        }
        check_score("<default>", self.default_score)?;

        for (uncovered, covered) in &self.covered_variants {
            if uncovered.is_empty() || covered.is_empty() {
                return Err(RuleError::EmptyTarget("<covered variant>".to_string()));
            }
        }

        Ok(())
    }
}

/// The rule sets of every equipment class, built and validated once at startup
#[derive(Debug, Clone)]
pub struct RuleRepository {
    sets: Vec<RuleSet>,
}

impl RuleRepository {
    /// Build a repository from explicit rule sets, validating each.
    ///
    /// # Errors
    ///
    /// Returns a `RuleError` if any rule set is inconsistent.
    pub fn new(sets: Vec<RuleSet>) -> Result<Self, RuleError> {
        for set in &sets {
            set.validate()?;
        }
        Ok(Self { sets })
    }

    /// The built-in tables for standby pumps, flexible couplings and gearboxes.
    ///
    /// # Errors
    ///
    /// Returns a `RuleError` if a built-in table is corrupt.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::new(vec![
            super::gearbox::rule_set()?,
            super::coupling::rule_set()?,
            super::standby_pump::rule_set()?,
        ])
    }

    /// Rule set for an equipment class.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::MissingRuleSet` if the repository has none for `kind`.
    pub fn get(&self, kind: EquipmentKind) -> Result<&RuleSet, RuleError> {
        self.sets
            .iter()
            .find(|s| s.kind == kind)
            .ok_or(RuleError::MissingRuleSet(kind))
    }

    /// Rule sets in declaration order
    pub fn sets(&self) -> &[RuleSet] {
        &self.sets
    }
}
