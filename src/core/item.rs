use serde::{Deserialize, Serialize};

use crate::core::types::EquipmentKind;

/// Price fields attached by the pricing side of the application.
///
/// The engine never reads or computes these; they travel with the item so the
/// chosen entry can be priced without a second catalog lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_price: Option<f64>,
}

/// A single purchasable equipment record from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Model designation as printed in the catalog (e.g. "2CY7.5/2.5D")
    pub model: String,

    /// Equipment class
    pub kind: EquipmentKind,

    /// Transfer capacity in kW/rpm (gearboxes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,

    /// Reduction ratio (gearboxes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,

    /// Rated torque in kN·m (couplings)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torque: Option<f64>,

    /// Maximum speed in rpm (couplings)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,

    /// Flow in m³/h (pumps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<f64>,

    /// Discharge pressure in MPa (pumps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,

    /// Motor power in kW (pumps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,

    /// Weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, flatten)]
    pub prices: PriceFields,
}

impl CatalogItem {
    pub fn new(model: impl Into<String>, kind: EquipmentKind) -> Self {
        Self {
            model: model.into(),
            kind,
            capacity: None,
            ratio: None,
            torque: None,
            max_speed: None,
            flow: None,
            pressure: None,
            power: None,
            weight: None,
            prices: PriceFields::default(),
        }
    }

    #[must_use]
    pub fn with_max_speed(mut self, rpm: f64) -> Self {
        self.max_speed = Some(rpm);
        self
    }

    #[must_use]
    pub fn with_flow(mut self, flow: f64, pressure: f64) -> Self {
        self.flow = Some(flow);
        self.pressure = Some(pressure);
        self
    }

    #[must_use]
    pub fn with_torque(mut self, torque: f64) -> Self {
        self.torque = Some(torque);
        self
    }

    #[must_use]
    pub fn with_base_price(mut self, price: f64) -> Self {
        self.prices.base_price = Some(price);
        self
    }

    /// True when the record carries a usable model designation
    pub fn has_model(&self) -> bool {
        !self.model.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_flattens_prices() {
        let item = CatalogItem::new("HGTHB5", EquipmentKind::Coupling)
            .with_torque(5.0)
            .with_base_price(13000.0);
        let json = serde_json::to_string(&item).unwrap();

        assert!(json.contains("\"base_price\":13000.0"));
        assert!(json.contains("\"kind\":\"coupling\""));
        assert!(!json.contains("flow"));

        let back: CatalogItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_has_model() {
        assert!(CatalogItem::new("DT180", EquipmentKind::Gearbox).has_model());
        assert!(!CatalogItem::new("   ", EquipmentKind::Gearbox).has_model());
    }
}
