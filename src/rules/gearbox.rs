//! Gearbox model resolution tables.
//!
//! Requested gearbox designations arrive from customer requirements and old drawings
//! in many spellings (`HC600` for the current `HC600A`, `T300` for the 300 family).
//! These tables map each requested size to the canonical catalog model, with the
//! interchangeable variants of the same size as alternates. Unknown series are
//! looked up as written.

use crate::core::model::NumberCoding::{Decimal, Integer};
use crate::core::types::EquipmentKind;
use crate::rules::formats::FormatRule;
use crate::rules::repository::{
    DefaultCandidate, MatchingRule, RuleError, RuleSet, SeriesRules, UnknownSeriesPolicy,
};

pub fn rule_set() -> Result<RuleSet, RuleError> {
    let set = RuleSet::new(EquipmentKind::Gearbox)
        .with_unknown_series(UnknownSeriesPolicy::Always)
        .with_series(SeriesRules::new(
            "HC",
            Integer,
            vec![
                MatchingRule::exactly(300.0, "HC300").with_alternates(&["HCD300", "HCT300"]),
                MatchingRule::exactly(400.0, "HC400").with_alternates(&["HCD400"]),
                MatchingRule::exactly(600.0, "HC600A").with_alternates(&["HCD600A"]),
                MatchingRule::exactly(1000.0, "HC1000").with_alternates(&["HCD1000"]),
                MatchingRule::model("HC1200/1", "HC1200/1").with_alternates(&["HC1200"]),
                MatchingRule::exactly(1200.0, "HC1200").with_alternates(&["HCT1200"]),
                MatchingRule::exactly(1400.0, "HC1400").with_alternates(&["HCD1400"]),
                MatchingRule::exactly(1600.0, "HC1600").with_alternates(&["HCD1600"]),
                MatchingRule::exactly(2000.0, "HC2000").with_alternates(&["HCD2000"]),
                MatchingRule::bucket(2700.0, 100.0, "HC2700").with_alternates(&["HCD2700"]),
            ],
        ))
        .with_series(SeriesRules::new(
            "HCT",
            Integer,
            vec![
                MatchingRule::exactly(400.0, "HCT400A").with_alternates(&["HCT400"]),
                MatchingRule::exactly(600.0, "HCT600A"),
                MatchingRule::exactly(800.0, "HCT800")
                    .with_alternates(&["HCT800/1", "HCT800/2", "HCT800/3"]),
                MatchingRule::model("HCT1200/1", "HCT1200/1").with_alternates(&["HCT1200"]),
                MatchingRule::exactly(1200.0, "HCT1200"),
                MatchingRule::exactly(1400.0, "HCT1400"),
                MatchingRule::exactly(1600.0, "HCT1600"),
                MatchingRule::exactly(2000.0, "HCT2000"),
            ],
        ))
        .with_series(SeriesRules::new(
            "",
            Integer,
            vec![MatchingRule::exactly(300.0, "HC300").with_alternates(&["D300A", "J300", "T300"])],
        ))
        .with_series(SeriesRules::new(
            "D",
            Integer,
            vec![MatchingRule::exactly(300.0, "D300A").with_alternates(&["HC300"])],
        ))
        .with_series(SeriesRules::new(
            "J",
            Integer,
            vec![MatchingRule::exactly(300.0, "J300").with_alternates(&["HC300"])],
        ))
        .with_series(SeriesRules::new(
            "T",
            Integer,
            vec![
                MatchingRule::exactly(300.0, "T300").with_alternates(&["HC300"]),
                MatchingRule::bucket(2700.0, 100.0, "T2700").with_alternates(&["HCT2700"]),
            ],
        ))
        .with_series(SeriesRules::new(
            "GWC",
            Decimal,
            ["28.30", "30.32", "36.39", "45.49", "52.59", "60.66", "70.76"]
                .iter()
                .filter_map(|size| {
                    size.parse::<f64>()
                        .ok()
                        .map(|n| MatchingRule::exactly(n, format!("GWC{size}")))
                })
                .collect(),
        ))
        .with_series(SeriesRules::new(
            "HCM",
            Integer,
            [70, 160, 250, 435, 600, 1250, 1600]
                .iter()
                .map(|size| MatchingRule::exactly(f64::from(*size), format!("HCM{size}")))
                .collect(),
        ))
        .with_series(SeriesRules::new(
            "DT",
            Integer,
            [180, 240, 580, 770, 900, 1400, 1500]
                .iter()
                .map(|size| MatchingRule::exactly(f64::from(*size), format!("DT{size}")))
                .collect(),
        ))
        .with_default(DefaultCandidate::RequestedModel)
        .with_format(FormatRule::new(
            r"^([A-Z]+)(\d+(?:\.\d+)?)([A-Z]?)(?:[/-](\d+))?$",
            &[
                "${1}${2}${3}",
                "${1}${2}",
                "${1}${2}A",
                "${1}${2}${3}/${4}",
                "${1}${2}${3}-${4}",
            ],
        )?);

    Ok(set)
}
