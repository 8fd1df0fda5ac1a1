use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::EquipmentKind;
use crate::matching::{SelectionContext, SelectionEngine};
use crate::rules::RuleRepository;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Equipment class to check
    #[arg(value_enum)]
    pub kind: EquipmentKind,

    /// Primary gearbox model
    pub model: String,

    /// Rated engine power in kW
    #[arg(long)]
    pub power: Option<f64>,

    /// Require a coupling with a protective cover
    #[arg(long)]
    pub cover: bool,
}

pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let repository = RuleRepository::builtin()?;
    let engine = SelectionEngine::new(repository.get(args.kind)?);
    let context = SelectionContext {
        rated_power_kw: args.power,
        has_cover: args.cover,
        ..SelectionContext::default()
    };

    let applicable = engine.is_applicable(&args.model, &context);
    let candidates = engine.candidates(&args.model, &context);

    match format {
        OutputFormat::Text => {
            let verdict = if applicable { "required" } else { "not required" };
            println!("{} {verdict} for {}", args.kind, args.model.trim());
            if verbose || applicable {
                for candidate in &candidates {
                    println!(
                        "   {:<16} {:>5.1}  {}",
                        candidate.model, candidate.score, candidate.info
                    );
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "kind": args.kind,
                "model": args.model.trim(),
                "applicable": applicable,
                "candidates": candidates,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("kind\tmodel\tapplicable\tcandidates");
            println!(
                "{}\t{}\t{applicable}\t{}",
                args.kind,
                args.model.trim(),
                candidates
                    .iter()
                    .map(|c| c.model.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            );
        }
    }

    Ok(())
}
