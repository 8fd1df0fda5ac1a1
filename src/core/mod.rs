//! Core data types for equipment selection.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`CatalogItem`](item::CatalogItem): A purchasable equipment record with specs and prices
//! - [`ModelCode`](model::ModelCode): A model designation split into series prefix and number
//! - [`EquipmentKind`](types::EquipmentKind), [`MatchType`](types::MatchType),
//!   [`Confidence`](types::Confidence), [`OutcomeStatus`](types::OutcomeStatus):
//!   classification types
//!
//! ## Model Designations
//!
//! Gearbox designations start with an alphabetic series prefix followed by a size
//! number. Some series use decimal size codes, others integers:
//!
//! | Series | Example    | Series number |
//! |--------|------------|---------------|
//! | GW     | GW39.41    | 39.41         |
//! | HC     | HC1200/1   | 1200          |
//! | DT     | DT900      | 900           |
//!
//! Accessory designations (`2CY7.5/2.5D`, `HGTHB6.3A`) are matched as strings and are
//! never parsed by the classifier.

pub mod item;
pub mod model;
pub mod types;
