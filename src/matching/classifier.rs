use serde::{Deserialize, Serialize};

use crate::core::model::ModelCode;
use crate::matching::load::{engine_torque_nm, WorkCondition};
use crate::rules::{RuleSet, UnknownSeriesPolicy};
use crate::utils::validation::validate_model;

/// Facts about the installation that the primary model string does not carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Rated engine power in kW
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_power_kw: Option<f64>,

    /// The coupling must be fitted with a protective cover
    #[serde(default)]
    pub has_cover: bool,

    /// Rated engine speed in rpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_speed_rpm: Option<f64>,

    /// Engine torque in N·m; derived from power and speed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_torque_nm: Option<f64>,

    #[serde(default)]
    pub work_condition: WorkCondition,

    /// Operating temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

impl SelectionContext {
    #[must_use]
    pub fn with_power(mut self, kw: f64) -> Self {
        self.rated_power_kw = Some(kw);
        self
    }

    #[must_use]
    pub fn with_cover(mut self, has_cover: bool) -> Self {
        self.has_cover = has_cover;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, rpm: f64) -> Self {
        self.engine_speed_rpm = Some(rpm);
        self
    }

    #[must_use]
    pub fn with_torque(mut self, nm: f64) -> Self {
        self.engine_torque_nm = Some(nm);
        self
    }

    #[must_use]
    pub fn with_work_condition(mut self, condition: WorkCondition) -> Self {
        self.work_condition = condition;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature_c = Some(celsius);
        self
    }

    /// Engine torque in N·m, given or derived from power and speed
    pub fn engine_torque(&self) -> Option<f64> {
        self.engine_torque_nm.filter(|nm| *nm > 0.0).or_else(|| {
            self.rated_power_kw
                .zip(self.engine_speed_rpm)
                .and_then(|(kw, rpm)| engine_torque_nm(kw, rpm))
        })
    }
}

/// Decides whether an equipment class is needed for a primary unit
#[derive(Debug, Clone, Copy)]
pub struct RequirementClassifier<'a> {
    rules: &'a RuleSet,
}

impl<'a> RequirementClassifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Whether the class applies to `model`.
    ///
    /// Never fails: blank or malformed input is simply not applicable.
    pub fn is_applicable(&self, model: &str, context: &SelectionContext) -> bool {
        if validate_model(model).is_err() {
            return false;
        }

        let code = ModelCode::parse(model);
        if let Some(rule) = self.rules.applicability_for(code.series()) {
            return rule.applies(&code);
        }

        match self.rules.unknown_series {
            UnknownSeriesPolicy::Never => false,
            UnknownSeriesPolicy::Always => true,
            UnknownSeriesPolicy::PowerAtLeast(threshold) => context
                .rated_power_kw
                .is_some_and(|kw| kw >= threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{coupling, standby_pump};

    fn pump_needed(model: &str, power: Option<f64>) -> bool {
        let rules = standby_pump::rule_set().unwrap();
        let context = SelectionContext {
            rated_power_kw: power,
            ..SelectionContext::default()
        };
        RequirementClassifier::new(&rules).is_applicable(model, &context)
    }

    #[test]
    fn test_empty_model_is_not_applicable() {
        assert!(!pump_needed("", Some(10_000.0)));
        assert!(!pump_needed("   ", None));
        assert!(!pump_needed("--/", None));
    }

    #[test]
    fn test_always_series() {
        assert!(pump_needed("GW28.30", None));
        assert!(pump_needed("gwc45.49", None));
        assert!(pump_needed("GC350", None));
    }

    #[test]
    fn test_hc_spans() {
        assert!(pump_needed("HC1000", None));
        assert!(pump_needed("HC1200/1", None));
        assert!(!pump_needed("HC1300", None));
        assert!(pump_needed("HC2000", None));
        assert!(pump_needed("HC2700", None));
        assert!(!pump_needed("HC2800", None));
        assert!(!pump_needed("HC600A", Some(900.0)));
    }

    #[test]
    fn test_dt_spans_and_threshold_series() {
        assert!(pump_needed("DT180", None));
        assert!(!pump_needed("DT800", None));
        assert!(pump_needed("DT2400", None));
        assert!(!pump_needed("HCM250", None));
        assert!(pump_needed("HCM300", None));
        assert!(pump_needed("HCQ700", None));
    }

    #[test]
    fn test_unknown_series_uses_power() {
        assert!(!pump_needed("ZZ9999", None));
        assert!(!pump_needed("ZZ9999", Some(599.9)));
        assert!(pump_needed("ZZ9999", Some(600.0)));
        // HCT has no applicability rule of its own
        assert!(pump_needed("HCT800", Some(650.0)));
    }

    #[test]
    fn test_couplings_always_apply() {
        let rules = coupling::rule_set().unwrap();
        let classifier = RequirementClassifier::new(&rules);
        let context = SelectionContext::default();
        assert!(classifier.is_applicable("HC400", &context));
        assert!(classifier.is_applicable("XYZ1", &context));
        assert!(!classifier.is_applicable("", &context));
    }
}
