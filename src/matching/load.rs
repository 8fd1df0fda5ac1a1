//! Torque and speed limits for flexible couplings.
//!
//! A coupling must carry the engine torque scaled by a service factor for the
//! driven load and a factor for the operating temperature:
//!
//! ```text
//! required kN·m = engine torque N·m × K(work condition) × St(temperature) / 1000
//! ```
//!
//! and its maximum speed must not be below the engine speed.

use serde::{Deserialize, Serialize};

use crate::core::item::CatalogItem;
use crate::matching::classifier::SelectionContext;

/// Service class of the driven load
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkCondition {
    /// Class I: very small torque variation
    Uniform,
    /// Class II: small torque variation
    Light,
    /// Class III: moderate torque variation
    #[default]
    Moderate,
    /// Class IV: large torque variation
    Heavy,
    /// Class V: very large torque variation
    Severe,
}

impl WorkCondition {
    /// Service factor K
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Uniform => 1.2,
            Self::Light => 1.5,
            Self::Moderate => 1.8,
            Self::Heavy => 2.2,
            Self::Severe => 2.5,
        }
    }
}

/// Temperature factor St for an operating temperature in °C
#[must_use]
pub fn temperature_factor(celsius: f64) -> f64 {
    if celsius <= 60.0 {
        1.0
    } else if celsius <= 80.0 {
        1.2
    } else if celsius <= 100.0 {
        1.4
    } else {
        1.6
    }
}

/// Engine torque in N·m from power in kW and speed in rpm
#[must_use]
pub fn engine_torque_nm(power_kw: f64, speed_rpm: f64) -> Option<f64> {
    (power_kw > 0.0 && speed_rpm > 0.0).then(|| 9550.0 * power_kw / speed_rpm)
}

/// Why a catalog coupling cannot be used for the installation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadShortfall {
    /// Rated torque (kN·m) below the requirement, or no rating at all
    Torque { rated: Option<f64>, required: f64 },
    /// Maximum speed (rpm) below the engine speed
    Speed { max_speed: f64, engine_speed: f64 },
}

impl std::fmt::Display for LoadShortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Torque {
                rated: Some(rated),
                required,
            } => write!(f, "rated {rated} kN·m < required {required:.2} kN·m"),
            Self::Torque {
                rated: None,
                required,
            } => write!(f, "no torque rating, {required:.2} kN·m required"),
            Self::Speed {
                max_speed,
                engine_speed,
            } => write!(f, "max speed {max_speed} rpm < engine speed {engine_speed} rpm"),
        }
    }
}

/// The limits one installation puts on its coupling
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadCheck {
    /// kN·m
    pub required_torque: Option<f64>,
    /// rpm
    pub engine_speed: Option<f64>,
}

impl LoadCheck {
    pub fn for_context(context: &SelectionContext) -> Self {
        let temperature = context.temperature_c.map_or(1.0, temperature_factor);
        let required_torque = context
            .engine_torque()
            .map(|nm| nm * context.work_condition.factor() * temperature / 1000.0);

        Self {
            required_torque,
            engine_speed: context.engine_speed_rpm.filter(|rpm| *rpm > 0.0),
        }
    }

    /// Nothing to check
    pub fn is_empty(&self) -> bool {
        self.required_torque.is_none() && self.engine_speed.is_none()
    }

    /// The first limit `item` fails, if any. A missing speed rating passes.
    pub fn shortfall(&self, item: &CatalogItem) -> Option<LoadShortfall> {
        if let Some(required) = self.required_torque {
            match item.torque {
                Some(rated) if rated >= required => {}
                rated => return Some(LoadShortfall::Torque { rated, required }),
            }
        }

        if let (Some(engine_speed), Some(max_speed)) = (self.engine_speed, item.max_speed) {
            if max_speed < engine_speed {
                return Some(LoadShortfall::Speed {
                    max_speed,
                    engine_speed,
                });
            }
        }

        None
    }
}
