use serde::{Deserialize, Serialize};

/// Equipment class handled by a rule set and stored in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    /// Marine reduction gearbox (the primary unit)
    Gearbox,
    /// Highly flexible coupling between engine and gearbox
    Coupling,
    /// Standby lubrication pump fitted to the gearbox
    #[value(name = "pump")]
    StandbyPump,
}

impl EquipmentKind {
    pub const ALL: [EquipmentKind; 3] = [Self::Gearbox, Self::Coupling, Self::StandbyPump];
}

impl std::fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gearbox => write!(f, "gearbox"),
            Self::Coupling => write!(f, "flexible coupling"),
            Self::StandbyPump => write!(f, "standby pump"),
        }
    }
}

/// How a candidate target model was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// The rule's primary target
    Primary,
    /// One of the rule's alternate targets
    Alternate,
    /// Generic fallback when no rule matched the series
    Default,
    /// The requested model itself, looked up as written when no rule matched
    Requested,
}

/// Which matcher bound a candidate to a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Whitespace- and case-insensitive full-string equality
    Exact,
    /// Family code and capacity similarity above the threshold
    Fuzzy,
    /// Exact hit on a regenerated alternate spelling
    Alternative,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Alternative => write!(f, "alternative"),
        }
    }
}

/// Confidence level for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Exact,
}

impl Confidence {
    /// Classify a 0-100 selection score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            Self::Exact
        } else if score >= 90.0 {
            Self::High
        } else if score >= 75.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Confidence of a catalog binding. Only an exact match can be `Exact`.
    #[must_use]
    pub fn for_match(score: f64, match_type: MatchType) -> Self {
        let confidence = Self::from_score(score);
        match match_type {
            MatchType::Exact => confidence,
            MatchType::Fuzzy | MatchType::Alternative => confidence.min(Self::High),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Terminal state of one selection call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The primary model or the catalog could not be used at all
    InvalidInput,
    /// The equipment class does not apply to this primary unit
    NotApplicable,
    /// A catalog item was chosen
    Resolved,
    /// Candidates exist but none is present in the catalog
    Unresolved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_from_score() {
        assert_eq!(Confidence::from_score(100.0), Confidence::Exact);
        assert_eq!(Confidence::from_score(95.0), Confidence::High);
        assert_eq!(Confidence::from_score(90.0), Confidence::High);
        assert_eq!(Confidence::from_score(80.0), Confidence::Medium);
        assert_eq!(Confidence::from_score(60.0), Confidence::Low);
        assert!(Confidence::Exact > Confidence::Low);
    }

    #[test]
    fn test_approximate_matches_never_exact() {
        assert_eq!(Confidence::for_match(100.0, MatchType::Exact), Confidence::Exact);
        assert_eq!(Confidence::for_match(100.0, MatchType::Fuzzy), Confidence::High);
        assert_eq!(Confidence::for_match(100.0, MatchType::Alternative), Confidence::High);
        assert_eq!(Confidence::for_match(70.0, MatchType::Fuzzy), Confidence::Low);
    }

    #[test]
    fn test_equipment_kind_serde_names() {
        let json = serde_json::to_string(&EquipmentKind::StandbyPump).unwrap();
        assert_eq!(json, "\"standby_pump\"");
    }
}
