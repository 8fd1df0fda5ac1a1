//! Command-line interface for marine-select.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **select**: Select a standby pump, flexible coupling or gearbox for a primary model
//! - **classify**: Check whether an equipment class is needed for a primary model
//! - **rules**: Print the built-in selection rules
//! - **catalog**: List or export the equipment catalog
//!
//! ## Usage
//!
//! ```text
//! # Standby pump for a GW gearbox
//! marine-select select pump GW28.30
//!
//! # Covered coupling, JSON output for scripting
//! marine-select select coupling HC1000 --cover --format json
//!
//! # Unlisted gearbox behind a 650 kW engine, against a custom catalog
//! marine-select select pump ZZ9999 --power 650 --catalog stock.json
//!
//! # Does an HC1300 need a standby pump?
//! marine-select classify pump HC1300
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::EquipmentCatalog;

pub mod catalog;
pub mod classify;
pub mod rules;
pub mod select;

#[derive(Parser)]
#[command(name = "marine-select")]
#[command(version)]
#[command(about = "Select standby pumps, flexible couplings and gearboxes from an equipment catalog")]
#[command(
    long_about = "marine-select picks accessory equipment for a marine gearbox.\n\nGiven a primary gearbox model it:\n- Decides whether a standby pump or coupling is needed\n- Derives candidate models from the built-in selection tables\n- Finds the candidates in the catalog, tolerating spelling differences\n- Ranks the hits and explains the choice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select catalog equipment for a primary gearbox model
    Select(select::SelectArgs),

    /// Check whether an equipment class applies to a primary gearbox model
    Classify(classify::ClassifyArgs),

    /// Show the built-in selection rules
    Rules(rules::RulesArgs),

    /// Inspect the equipment catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a catalog file, or the embedded sample catalog when no path is given
pub(crate) fn load_catalog(path: Option<&Path>, verbose: bool) -> anyhow::Result<EquipmentCatalog> {
    let catalog = if let Some(path) = path {
        EquipmentCatalog::load_from_file(path)?
    } else {
        EquipmentCatalog::load_embedded()?
    };

    if verbose {
        eprintln!("Loaded catalog with {} items", catalog.len());
    }

    Ok(catalog)
}

/// Optional number for text and TSV output
pub(crate) fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v}"))
}
