//! Flexible coupling tables.
//!
//! Every gearbox is driven through a highly flexible coupling, so the class always
//! applies. The tables pin a specific coupling to each gearbox size; covered
//! (`HGTHJB`) variants replace the plain model when a cover is requested.

use crate::core::model::NumberCoding::{Decimal, Integer};
use crate::core::types::EquipmentKind;
use crate::rules::formats::FormatRule;
use crate::rules::repository::{
    DefaultCandidate, MatchingRule, RuleError, RuleSet, SeriesRules, UnknownSeriesPolicy,
};

/// Mid-range coupling offered when the gearbox series is not tabulated
pub const FALLBACK_COUPLING: &str = "HGTHB5";

fn sizes(rows: &[(f64, &str)]) -> Vec<MatchingRule> {
    rows.iter()
        .map(|(size, target)| MatchingRule::exactly(*size, *target))
        .collect()
}

pub fn rule_set() -> Result<RuleSet, RuleError> {
    let set = RuleSet::new(EquipmentKind::Coupling)
        .with_unknown_series(UnknownSeriesPolicy::Always)
        .with_series(SeriesRules::new(
            "HC",
            Integer,
            vec![
                MatchingRule::exactly(300.0, "HGTHT4"),
                MatchingRule::exactly(400.0, "HGTHT4.5"),
                MatchingRule::exactly(600.0, "HGTHT6.3A"),
                MatchingRule::exactly(1000.0, "HGTHB5"),
                // The /1 variant runs a different coupling than the plain 1200
                MatchingRule::model("HC1200/1", "HGTHB6.3A").with_alternates(&["HGTHB6.3"]),
                MatchingRule::exactly(1200.0, "HGHQT1210IW"),
                MatchingRule::exactly(1400.0, "HGTHB8"),
                MatchingRule::exactly(1600.0, "HGTHB10"),
                MatchingRule::exactly(2000.0, "HGTHB12.5"),
                MatchingRule::bucket(2700.0, 100.0, "HGTHB16"),
            ],
        ))
        .with_series(SeriesRules::new(
            "HCD",
            Integer,
            vec![
                MatchingRule::exactly(300.0, "HGTHT4"),
                MatchingRule::exactly(400.0, "HGTHT4.5"),
                MatchingRule::exactly(600.0, "HGTHT6.3A"),
                MatchingRule::exactly(800.0, "HGTHT8.6"),
                MatchingRule::exactly(1000.0, "HGTHB5"),
                MatchingRule::exactly(1400.0, "HGTHB8"),
                MatchingRule::exactly(1600.0, "HGTHB10"),
                MatchingRule::exactly(2000.0, "HGTHB12.5"),
                MatchingRule::bucket(2700.0, 100.0, "HGTHB16"),
            ],
        ))
        .with_series(SeriesRules::new(
            "HCT",
            Integer,
            vec![
                MatchingRule::exactly(300.0, "HGTHT4"),
                MatchingRule::exactly(400.0, "HGTHT5"),
                MatchingRule::exactly(600.0, "HGTHT6.3A"),
                MatchingRule::exactly(800.0, "HGTHT8.6"),
                MatchingRule::model("HCT1200/1", "HGTHB6.3A").with_alternates(&["HGTHB6.3"]),
                MatchingRule::exactly(1200.0, "HGHQT1210IW"),
                MatchingRule::exactly(1400.0, "HGTHB8"),
                MatchingRule::exactly(1600.0, "HGTHB10"),
                MatchingRule::exactly(2000.0, "HGTHB12.5"),
                MatchingRule::bucket(2700.0, 100.0, "HGT3020"),
            ],
        ))
        .with_series(SeriesRules::new("", Integer, sizes(&[(300.0, "HGTHT4")])))
        .with_series(SeriesRules::new("D", Integer, sizes(&[(300.0, "HGTHT4")])))
        .with_series(SeriesRules::new("J", Integer, sizes(&[(300.0, "HGTHT4")])))
        .with_series(SeriesRules::new(
            "T",
            Integer,
            sizes(&[(300.0, "HGTHT4"), (2700.0, "HGT3020")]),
        ))
        .with_series(SeriesRules::new(
            "GWC",
            Decimal,
            sizes(&[
                (28.30, "HGT2520"),
                (30.32, "HGT3020"),
                (36.39, "HGT4020"),
                (45.49, "HGT6320"),
                (52.59, "HGT8020"),
                (60.66, "HGT10020"),
                (70.76, "HGT16020"),
            ]),
        ))
        .with_series(SeriesRules::new(
            "HCM",
            Integer,
            sizes(&[
                (70.0, "HGTHB3.2"),
                (160.0, "HGTHB3.2"),
                (250.0, "HGTHB5"),
                (435.0, "HGTHB6.3"),
                (600.0, "HGT1020"),
                (1250.0, "HGT1620"),
                (1600.0, "HGT2020"),
            ]),
        ))
        .with_series(SeriesRules::new(
            "DT",
            Integer,
            sizes(&[
                (180.0, "HGTHB3.2"),
                (240.0, "HGTHB5"),
                (580.0, "HGTHB6.3"),
                (770.0, "HGT1020"),
                (900.0, "HGT1220"),
                (1400.0, "HGT1620"),
                (1500.0, "HGT2020"),
            ]),
        ))
        .with_covered_variant("HGTHB5", "HGTHJB5")
        .with_covered_variant("HGTHB6.3A", "HGTHJB6.3A")
        .with_default(DefaultCandidate::Fixed(FALLBACK_COUPLING.to_string()))
        .with_format(FormatRule::new(
            r"^(HG[A-Z]*?)(\d+(?:\.\d+)?)([A-Z]*)$",
            &["${1}${2}", "${1}${2}A", "${1}-${2}${3}", "${1} ${2}${3}"],
        )?);

    Ok(set)
}
