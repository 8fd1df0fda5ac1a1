use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{fmt_opt, load_catalog, OutputFormat};
use crate::core::item::CatalogItem;
use crate::core::types::EquipmentKind;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List the items in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list one equipment class
        #[arg(long, value_enum)]
        kind: Option<EquipmentKind>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, kind } => run_list(catalog, kind, format, verbose),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog, verbose),
    }
}

/// The headline rating of an item: capacity, torque or flow depending on class
fn rating(item: &CatalogItem) -> Option<f64> {
    match item.kind {
        EquipmentKind::Gearbox => item.capacity,
        EquipmentKind::Coupling => item.torque,
        EquipmentKind::StandbyPump => item.flow,
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    kind_filter: Option<EquipmentKind>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref(), verbose)?;

    let filtered: Vec<&CatalogItem> = match kind_filter {
        Some(kind) => catalog.items_of(kind).iter().collect(),
        None => catalog.items().collect(),
    };

    match format {
        OutputFormat::Text => {
            let model_width = filtered
                .iter()
                .map(|item| item.model.chars().count())
                .max()
                .unwrap_or(5)
                .max(5);
            let total_width = model_width + 18 + 10 + 10 + 12 + 4;

            println!("Equipment Catalog ({} items)\n", filtered.len());
            println!(
                "{:<model_w$} {:<18} {:>10} {:>10} {:>12}",
                "Model",
                "Kind",
                "Rating",
                "Weight",
                "Base price",
                model_w = model_width
            );
            println!("{}", "-".repeat(total_width));

            for item in &filtered {
                println!(
                    "{:<model_w$} {:<18} {:>10} {:>10} {:>12}",
                    item.model,
                    item.kind.to_string(),
                    fmt_opt(rating(item)),
                    fmt_opt(item.weight),
                    fmt_opt(item.prices.base_price),
                    model_w = model_width
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("model\tkind\trating\tweight\tbase_price");
            for item in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    item.model,
                    item.kind,
                    fmt_opt(rating(item)),
                    fmt_opt(item.weight),
                    fmt_opt(item.prices.base_price)
                );
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref(), verbose)?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!("Exported {} items to {}", catalog.len(), output.display());

    Ok(())
}
