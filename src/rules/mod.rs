//! Static selection rules.
//!
//! A [`RuleRepository`] holds one [`RuleSet`] per equipment class. Each rule set
//! carries:
//!
//! - **Applicability rules**: per-series conditions deciding whether the class is
//!   needed at all, plus a policy for series the tables do not list
//! - **Series tables**: ordered [`MatchingRule`]s; the first rule whose selector
//!   matches the primary model wins
//! - **Default candidate**: offered when no series rule matches
//! - **Alternative formats**: [`FormatRule`]s regenerating known catalog spellings
//!
//! Rule sets are plain values. The built-in tables are assembled by
//! [`RuleRepository::builtin`], and tests build synthetic sets with the same
//! constructors:
//!
//! ```rust
//! use marine_select::core::model::NumberCoding;
//! use marine_select::core::types::EquipmentKind;
//! use marine_select::rules::{MatchingRule, RuleSet, SeriesRules};
//!
//! let rules = RuleSet::new(EquipmentKind::StandbyPump).with_series(SeriesRules::new(
//!     "AA",
//!     NumberCoding::Decimal,
//!     vec![MatchingRule::range(28.30, 45.49, "T-7.5/2.5D").with_alternates(&["T-7.5/2.5"])],
//! ));
//! assert!(rules.validate().is_ok());
//! ```

pub mod coupling;
pub mod formats;
pub mod gearbox;
pub mod repository;
pub mod standby_pump;

pub use formats::FormatRule;
pub use repository::{
    Applicability, ApplicabilityRule, DefaultCandidate, MatchingRule, RuleError, RuleRepository,
    RuleSelector, RuleSet, SeriesRules, UnknownSeriesPolicy,
};
