//! # marine-select
//!
//! A library for selecting marine gearbox accessories from an equipment catalog.
//!
//! Every marine gearbox ships with a highly flexible coupling, and the larger ones
//! with a standby lubrication pump. Which coupling or pump fits is fixed by
//! engineering tables keyed on the gearbox series and size, but the catalog that
//! prices the equipment spells models its own way (`2CY7.5/2.5D` for the table's
//! `2CY-7.5/2.5D`) and does not always stock the tabulated model.
//!
//! `marine-select` bridges the two: it applies the tables to a primary gearbox model
//! and finds the resulting candidates in the catalog, tolerating spelling
//! differences, then ranks the hits and explains the choice.
//!
//! ## Features
//!
//! - **Applicability rules**: Decides whether a standby pump is needed at all
//! - **Series tables**: First-match-wins rules with scored alternates
//! - **Exact matching**: Case- and whitespace-insensitive model lookup
//! - **Fuzzy matching**: Family code and capacity similarity
//! - **Alternate spellings**: Regenerates known catalog spellings of a model
//! - **Covered couplings**: Swaps in the covered variant on request
//! - **Manual override**: Promotes a ranked alternative to the chosen item
//!
//! ## Example
//!
//! ```rust
//! use marine_select::{EquipmentCatalog, EquipmentKind, RuleRepository};
//! use marine_select::matching::{SelectionContext, SelectionEngine};
//!
//! // Load the embedded sample catalog and the built-in rules
//! let catalog = EquipmentCatalog::load_embedded().unwrap();
//! let repository = RuleRepository::builtin().unwrap();
//!
//! let engine = SelectionEngine::new(repository.get(EquipmentKind::StandbyPump).unwrap());
//! let outcome = engine.select(
//!     "GW28.30",
//!     catalog.items_of(EquipmentKind::StandbyPump),
//!     &SelectionContext::default(),
//! );
//!
//! if let Some(chosen) = &outcome.chosen {
//!     println!("{}: {:.1}", chosen.item.model, chosen.score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Equipment catalog snapshots
//! - [`core`]: Core data types for catalog items and model designations
//! - [`rules`]: Static selection rules per equipment class
//! - [`matching`]: Selection engine and matchers
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod rules;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::EquipmentCatalog;
pub use core::item::CatalogItem;
pub use core::types::*;
pub use matching::engine::{MatchingConfig, SelectionEngine};
pub use matching::outcome::SelectionOutcome;
pub use rules::RuleRepository;
