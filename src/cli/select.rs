use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{fmt_opt, load_catalog, OutputFormat};
use crate::core::types::{EquipmentKind, OutcomeStatus};
use crate::matching::{
    FuzzyConfig, MatchResult, MatchingConfig, Recommendation, SelectionContext, SelectionEngine,
    SelectionOutcome, WorkCondition,
};
use crate::rules::RuleRepository;

#[derive(Args)]
pub struct SelectArgs {
    /// Equipment class to select
    #[arg(value_enum)]
    pub kind: EquipmentKind,

    /// Primary gearbox model (e.g. "GW28.30", "HC1200/1")
    pub model: String,

    /// Rated engine power in kW
    #[arg(long)]
    pub power: Option<f64>,

    /// Require a coupling with a protective cover
    #[arg(long)]
    pub cover: bool,

    /// Engine speed in rpm; couplings rated below it are left out
    #[arg(long)]
    pub speed: Option<f64>,

    /// Engine torque in N·m (derived from --power and --speed when omitted)
    #[arg(long)]
    pub torque: Option<f64>,

    /// Service class of the driven load, sets the coupling service factor
    #[arg(long, value_enum, default_value_t = WorkCondition::Moderate)]
    pub work_condition: WorkCondition,

    /// Coupling operating temperature in °C
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Minimum fuzzy similarity (0-100) for a spelling-tolerant match
    #[arg(long, default_value = "60")]
    pub threshold: f64,

    /// Maximum number of alternatives to show
    #[arg(short = 'n', long, default_value = "4")]
    pub max_alternatives: usize,

    /// Choose the catalog alternative at this position (1-based) instead
    #[arg(long)]
    pub pick: Option<usize>,
}

pub fn run(args: SelectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&args.threshold) {
        anyhow::bail!("--threshold must be between 0 and 100, got {}", args.threshold);
    }

    let catalog = load_catalog(args.catalog.as_deref(), verbose)?;
    let repository = RuleRepository::builtin()?;
    let rules = repository.get(args.kind)?;

    let config = MatchingConfig {
        fuzzy: FuzzyConfig {
            threshold: args.threshold,
            ..FuzzyConfig::default()
        },
        max_alternatives: args.max_alternatives,
        ..MatchingConfig::default()
    };
    let context = SelectionContext {
        rated_power_kw: args.power,
        has_cover: args.cover,
        engine_speed_rpm: args.speed,
        engine_torque_nm: args.torque,
        work_condition: args.work_condition,
        temperature_c: args.temperature,
    };

    let engine = SelectionEngine::with_config(rules, config);
    let mut outcome = engine.select(&args.model, catalog.items_of(args.kind), &context);

    if let Some(position) = args.pick {
        let index = position
            .checked_sub(1)
            .context("--pick positions start at 1")?;
        outcome = outcome.promote(index)?;
    }

    match format {
        OutputFormat::Text => print_text(&outcome, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Tsv => print_tsv(&outcome),
    }

    Ok(())
}

fn status_label(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::InvalidInput => "INVALID INPUT",
        OutcomeStatus::NotApplicable => "NOT REQUIRED",
        OutcomeStatus::Resolved => "RESOLVED",
        OutcomeStatus::Unresolved => "UNRESOLVED",
    }
}

fn print_text(outcome: &SelectionOutcome, verbose: bool) {
    println!(
        "\n{} for {}: {}",
        capitalize(&outcome.kind.to_string()),
        outcome.primary_model.trim(),
        status_label(outcome.status)
    );

    if let Some(chosen) = &outcome.chosen {
        println!("\n   Selected: {}", chosen.item.model);
        print_match_details(chosen, verbose);
        if outcome.manual_override {
            println!("   (chosen manually)");
        }
    }

    if let Some(model) = &outcome.suggested_model {
        println!("\n   Suggested model: {model}");
    }

    if !outcome.alternatives.is_empty() {
        println!("\n   Alternatives:");
        for (i, alternative) in outcome.alternatives.iter().enumerate() {
            match alternative {
                Recommendation::Catalog(result) => println!(
                    "   {:>2}. {:<16} {:>5.1}  {} match, {} confidence",
                    i + 1,
                    result.item.model,
                    result.score,
                    result.match_type,
                    result.confidence
                ),
                Recommendation::Candidate(candidate) => println!(
                    "   {:>2}. {:<16} {:>5.1}  not in catalog",
                    i + 1,
                    candidate.model,
                    candidate.score
                ),
            }
        }
    }

    println!("\n{}", outcome.message);
}

fn print_match_details(result: &MatchResult, verbose: bool) {
    println!(
        "   Match: {} (score {:.1}, {} confidence)",
        result.match_type, result.score, result.confidence
    );
    println!("   Candidate: {}", result.candidate_model);

    let item = &result.item;
    let specs: Vec<String> = [
        ("capacity", item.capacity),
        ("torque kN·m", item.torque),
        ("max speed rpm", item.max_speed),
        ("flow m³/h", item.flow),
        ("pressure MPa", item.pressure),
        ("power kW", item.power),
        ("weight kg", item.weight),
    ]
    .iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label} {v}")))
    .collect();
    if !specs.is_empty() {
        println!("   Specs: {}", specs.join(", "));
    }
    if let Some(price) = item.prices.base_price {
        println!("   Base price: {price:.2}");
    }
    if verbose {
        println!("   Why: {}", result.info);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn print_tsv(outcome: &SelectionOutcome) {
    println!("rank\tmodel\tbinding\tmatch_type\tscore\tconfidence\tbase_price");

    let rows = outcome
        .chosen
        .iter()
        .map(|chosen| Recommendation::Catalog(chosen.clone()))
        .chain(outcome.alternatives.iter().cloned());

    for (i, row) in rows.enumerate() {
        match row {
            Recommendation::Catalog(result) => println!(
                "{}\t{}\tcatalog\t{}\t{:.1}\t{}\t{}",
                i + 1,
                result.item.model,
                result.match_type,
                result.score,
                result.confidence,
                fmt_opt(result.item.prices.base_price)
            ),
            Recommendation::Candidate(candidate) => println!(
                "{}\t{}\tcandidate\t\t{:.1}\t\t",
                i + 1,
                candidate.model,
                candidate.score
            ),
        }
    }
}
