//! Equipment catalog snapshots.
//!
//! The catalog holds the purchasable gearboxes, flexible couplings and standby
//! pumps the engine selects from. A sample catalog is compiled into the binary;
//! real inventories are loaded from JSON files of the same format.
//!
//! ## Example
//!
//! ```rust
//! use marine_select::catalog::store::EquipmentCatalog;
//! use marine_select::core::types::EquipmentKind;
//!
//! let catalog = EquipmentCatalog::load_embedded().unwrap();
//! for pump in catalog.items_of(EquipmentKind::StandbyPump) {
//!     println!("{}", pump.model);
//! }
//! ```
//!
//! ## Custom Catalogs
//!
//! Export the embedded catalog, edit it, and load it back:
//!
//! ```rust,no_run
//! use marine_select::catalog::store::EquipmentCatalog;
//! use std::path::Path;
//!
//! let json = EquipmentCatalog::load_embedded().unwrap().to_json().unwrap();
//! std::fs::write("my_catalog.json", json).unwrap();
//!
//! let custom = EquipmentCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```

pub mod store;
