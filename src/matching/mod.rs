//! Equipment selection engine.
//!
//! This module provides the selection pipeline:
//!
//! - [`SelectionEngine`]: Main entry point for selecting catalog equipment
//! - [`SelectionOutcome`]: The chosen item, ranked alternatives and a status
//! - [`FuzzyConfig`]: Tunable similarity constants
//!
//! ## Pipeline
//!
//! Each call runs the same stages:
//!
//! 1. **Classify**: decide from the primary model's series (and the rated power for
//!    unlisted series) whether the equipment class is needed at all
//! 2. **Generate candidates**: the first matching series rule yields a primary
//!    target and lower-scored alternates; no match yields one default candidate
//! 3. **Match**: per candidate, an exact lookup, then a fuzzy family/capacity
//!    search, then a lookup under alternate catalog spellings. Couplings that
//!    cannot carry the engine torque or speed are left out beforehand
//! 4. **Rank**: merge, deduplicate by catalog model and sort by score
//!
//! ## Scoring
//!
//! - **Exact**: the candidate's score
//! - **Fuzzy**: the candidate's score weighted by similarity
//! - **Alternative**: a fixed score (90 by default)
//!
//! ## Example
//!
//! ```rust
//! use marine_select::core::item::CatalogItem;
//! use marine_select::core::types::{EquipmentKind, MatchType};
//! use marine_select::matching::{SelectionContext, SelectionEngine};
//! use marine_select::rules::RuleRepository;
//!
//! let repository = RuleRepository::builtin().unwrap();
//! let rules = repository.get(EquipmentKind::StandbyPump).unwrap();
//! let catalog = vec![CatalogItem::new("2CY7.5/2.5D", EquipmentKind::StandbyPump)];
//!
//! let engine = SelectionEngine::new(rules);
//! let outcome = engine.select("GW28.30", &catalog, &SelectionContext::default());
//!
//! let chosen = outcome.chosen.unwrap();
//! assert_eq!(chosen.item.model, "2CY7.5/2.5D");
//! assert_eq!(chosen.match_type, MatchType::Fuzzy);
//! ```

pub mod alternative;
pub mod candidates;
pub mod classifier;
pub mod engine;
pub mod exact;
pub mod fuzzy;
pub mod load;
pub mod outcome;
pub mod ranking;

pub use candidates::Candidate;
pub use classifier::SelectionContext;
pub use engine::{MatchingConfig, SelectionEngine};
pub use fuzzy::FuzzyConfig;
pub use load::WorkCondition;
pub use outcome::{MatchResult, OverrideError, Recommendation, SelectionOutcome};
