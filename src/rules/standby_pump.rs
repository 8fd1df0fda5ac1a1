//! Standby pump tables.
//!
//! A standby lubrication pump is required for the large GW/GWC/GC gearboxes, for
//! selected HC and DT sizes, for HCM/HCQ from size 300 upward, and for any other
//! gearbox driven by an engine of 600 kW or more.

use crate::core::model::NumberCoding::{Decimal, Integer};
use crate::core::types::EquipmentKind;
use crate::rules::formats::FormatRule;
use crate::rules::repository::{
    Applicability, ApplicabilityRule, DefaultCandidate, MatchingRule, RuleError, RuleSelector,
    RuleSet, SeriesRules, UnknownSeriesPolicy,
};

/// Rated engine power from which an unlisted gearbox needs a standby pump
pub const POWER_THRESHOLD_KW: f64 = 600.0;

/// The most widely stocked pump, offered when no series rule matches
pub const FALLBACK_PUMP: &str = "2CY-7.5/2.5D";

/// Base score of the size-estimated GC pumps
const GC_ESTIMATE_SCORE: f64 = 90.0;

pub fn rule_set() -> Result<RuleSet, RuleError> {
    let set = RuleSet::new(EquipmentKind::StandbyPump)
        .with_applicability(ApplicabilityRule::new("GW", Decimal, Applicability::Always))
        .with_applicability(ApplicabilityRule::new("GWC", Decimal, Applicability::Always))
        .with_applicability(ApplicabilityRule::new("GC", Integer, Applicability::Always))
        .with_applicability(ApplicabilityRule::new(
            "HC",
            Integer,
            Applicability::Within(vec![
                RuleSelector::Range {
                    low: 1000.0,
                    high: 1200.0,
                },
                RuleSelector::Range {
                    low: 1400.0,
                    high: 2000.0,
                },
                RuleSelector::Bucket {
                    base: 2700.0,
                    width: 100.0,
                },
            ]),
        ))
        .with_applicability(ApplicabilityRule::new(
            "DT",
            Integer,
            Applicability::Within(vec![
                RuleSelector::Range {
                    low: 180.0,
                    high: 770.0,
                },
                RuleSelector::Range {
                    low: 900.0,
                    high: 1400.0,
                },
                RuleSelector::Range {
                    low: 1500.0,
                    high: 2400.0,
                },
            ]),
        ))
        .with_applicability(ApplicabilityRule::new(
            "HCM",
            Integer,
            Applicability::AtLeast(300.0),
        ))
        .with_applicability(ApplicabilityRule::new(
            "HCQ",
            Integer,
            Applicability::AtLeast(300.0),
        ))
        .with_unknown_series(UnknownSeriesPolicy::PowerAtLeast(POWER_THRESHOLD_KW))
        .with_series(SeriesRules::new(
            "GW",
            Decimal,
            vec![
                MatchingRule::range(28.30, 45.49, "2CY-7.5/2.5D").with_alternates(&["2CY-7.5/2.5"]),
                MatchingRule::range(49.54, 52.62, "2CY-14.2/2.5D")
                    .with_alternates(&["2CY-14.2/2.5"]),
                MatchingRule::range(60.66, 60.74, "2CY-19.2/2.5D")
                    .with_alternates(&["2CY-19.2/2.5"]),
                MatchingRule::range(63.71, 999.99, "2CY-24.8/2.5D")
                    .with_alternates(&["2CY-24.8/2.5"]),
            ],
        ))
        .with_series(SeriesRules::new(
            "GWC",
            Decimal,
            vec![
                MatchingRule::exactly(28.30, "2CY-14.2/2.5D"),
                MatchingRule::exactly(30.32, "2CY-19.2/2.5D"),
                MatchingRule::exactly(36.39, "2CY-19.2/2.5D"),
                MatchingRule::exactly(45.49, "2CY-24.8/2.5D"),
                MatchingRule::exactly(52.59, "2CY-34.5/2.5D"),
                MatchingRule::exactly(60.66, "2CY-34.5/2.5D"),
                MatchingRule::exactly(70.76, "2CY-48.2/2.5D"),
            ],
        ))
        .with_series(SeriesRules::new(
            "HC",
            Integer,
            vec![
                MatchingRule::range(1000.0, 1200.0, "2CY-5/2.5D").with_alternates(&["2CY-5/2.5"]),
                MatchingRule::range(1400.0, 2000.0, "2CY-7.5/2.5D")
                    .with_alternates(&["2CY-7.5/2.5"]),
                MatchingRule::bucket(2700.0, 100.0, "2CY-14.2/2.5D")
                    .with_alternates(&["2CY-14.2/2.5"]),
            ],
        ))
        .with_series(SeriesRules::new(
            "DT",
            Integer,
            vec![
                MatchingRule::range(180.0, 770.0, "2CYA-1.1/0.8D")
                    .with_alternates(&["2CYA-1.1/0.8"]),
                MatchingRule::range(900.0, 1400.0, "2CYA-1.7/0.8D")
                    .with_alternates(&["2CYA-1.7/0.8"]),
                MatchingRule::range(1500.0, 2400.0, "2CYA-2.2/1D").with_alternates(&["2CYA-2.2/1"]),
            ],
        ))
        .with_series(SeriesRules::new(
            "HCM",
            Integer,
            vec![
                MatchingRule::range(300.0, 600.0, "2CY-14.2/2.5D"),
                MatchingRule::range(601.0, 1250.0, "2CY-19.2/2.5D"),
                MatchingRule::range(1251.0, 1600.0, "2CY-24.8/2.5D"),
            ],
        ))
        // GC sizes are not tabulated; the pump is estimated from the size band
        .with_series(SeriesRules::new(
            "GC",
            Integer,
            vec![
                MatchingRule::range(0.0, 200.0, "2CY-1.1/2.5D").with_base_score(GC_ESTIMATE_SCORE),
                MatchingRule::range(201.0, 400.0, "2CY-3.3/2.5D")
                    .with_base_score(GC_ESTIMATE_SCORE),
                MatchingRule::range(401.0, f64::MAX, "2CY-7.5/2.5D")
                    .with_base_score(GC_ESTIMATE_SCORE),
            ],
        ))
        .with_default(DefaultCandidate::Fixed(FALLBACK_PUMP.to_string()))
        .with_format(FormatRule::new(
            r"^2CY-(\d+(?:\.\d+)?)/",
            &[
                "2CY-${1}/2.5",
                "2CY-${1}/2.5D",
                "2CY ${1}/2.5D",
                "2CY${1}/2.5D",
            ],
        )?)
        .with_format(FormatRule::new(
            r"^2CYA-(\d+(?:\.\d+)?)/",
            &[
                "2CYA-${1}/0.8",
                "2CYA-${1}/0.8D",
                "2CYA-${1}/1",
                "2CYA-${1}/1D",
                "2CYA ${1}/0.8D",
                "2CYA${1}/0.8D",
            ],
        )?);

    Ok(set)
}
