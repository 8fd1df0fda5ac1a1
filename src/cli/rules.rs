use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::EquipmentKind;
use crate::rules::{
    Applicability, DefaultCandidate, MatchingRule, RuleRepository, RuleSet, UnknownSeriesPolicy,
};

#[derive(Args)]
pub struct RulesArgs {
    /// Only show the rules of one equipment class
    #[arg(value_enum)]
    pub kind: Option<EquipmentKind>,
}

pub fn run(args: RulesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let repository = RuleRepository::builtin()?;
    let sets: Vec<&RuleSet> = repository
        .sets()
        .iter()
        .filter(|set| args.kind.map_or(true, |kind| set.kind == kind))
        .collect();

    match format {
        OutputFormat::Text => {
            for (i, set) in sets.iter().enumerate() {
                if i > 0 {
                    println!("\n{}", "─".repeat(60));
                }
                print_text_rule_set(set, verbose);
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = sets.iter().map(|set| rule_set_json(set)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("kind\tseries\tselector\ttarget\tscore\talternates");
            for set in &sets {
                for table in &set.series {
                    for rule in &table.rules {
                        println!(
                            "{}\t{}\t{}\t{}\t{}\t{}",
                            set.kind,
                            table.series,
                            rule.selector,
                            rule.target,
                            rule.base_score,
                            alternates_text(rule)
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn policy_text(policy: UnknownSeriesPolicy) -> String {
    match policy {
        UnknownSeriesPolicy::Never => "never".to_string(),
        UnknownSeriesPolicy::Always => "always".to_string(),
        UnknownSeriesPolicy::PowerAtLeast(kw) => format!("rated power >= {kw} kW"),
    }
}

fn applicability_text(applicability: &Applicability) -> String {
    match applicability {
        Applicability::Always => "always".to_string(),
        Applicability::Within(selectors) => selectors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | "),
        Applicability::AtLeast(threshold) => format!(">= {threshold}"),
    }
}

fn default_text(set: &RuleSet) -> String {
    match &set.default_candidate {
        DefaultCandidate::Fixed(model) => model.clone(),
        DefaultCandidate::RequestedModel => "the requested model".to_string(),
    }
}

fn alternates_text(rule: &MatchingRule) -> String {
    rule.alternates
        .iter()
        .map(|a| format!("{} ({})", a.model, rule.base_score - a.score_offset))
        .collect::<Vec<_>>()
        .join(", ")
}

fn series_label(series: &str) -> &str {
    if series.is_empty() {
        "(none)"
    } else {
        series
    }
}

fn print_text_rule_set(set: &RuleSet, verbose: bool) {
    println!(
        "\n{} rules ({} series rules)",
        set.kind.to_string().to_uppercase(),
        set.rule_count()
    );
    println!("   Unlisted series: {}", policy_text(set.unknown_series));
    println!(
        "   Fallback: {} (score {})",
        default_text(set),
        set.default_score
    );

    if !set.applicability.is_empty() {
        println!("\n   Required for:");
        for rule in &set.applicability {
            println!(
                "   {:<6} {}",
                series_label(&rule.series),
                applicability_text(&rule.applicability)
            );
        }
    }

    println!("\n   {:<6} {:<24} {:<16} Alternates", "Series", "Selector", "Target");
    for table in &set.series {
        for rule in &table.rules {
            println!(
                "   {:<6} {:<24} {:<16} {}",
                series_label(&table.series),
                rule.selector.to_string(),
                rule.target,
                alternates_text(rule)
            );
        }
    }

    if !set.covered_variants.is_empty() {
        println!("\n   Covered variants:");
        for (uncovered, covered) in &set.covered_variants {
            println!("   {uncovered} -> {covered}");
        }
    }

    if verbose && !set.formats.is_empty() {
        println!("\n   Catalog spellings:");
        for format in &set.formats {
            println!("   {} => {}", format.pattern(), format.templates().join(", "));
        }
    }
}

fn rule_set_json(set: &RuleSet) -> serde_json::Value {
    let series: Vec<serde_json::Value> = set
        .series
        .iter()
        .map(|table| {
            let rules: Vec<serde_json::Value> = table
                .rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "selector": rule.selector.to_string(),
                        "target": rule.target,
                        "score": rule.base_score,
                        "alternates": rule.alternates.iter().map(|a| serde_json::json!({
                            "model": a.model,
                            "score": rule.base_score - a.score_offset,
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect();
            serde_json::json!({
                "series": table.series,
                "coding": table.coding,
                "rules": rules,
            })
        })
        .collect();

    serde_json::json!({
        "kind": set.kind,
        "unknown_series": policy_text(set.unknown_series),
        "default_candidate": default_text(set),
        "default_score": set.default_score,
        "applicability": set.applicability.iter().map(|rule| serde_json::json!({
            "series": rule.series,
            "applies": applicability_text(&rule.applicability),
        })).collect::<Vec<_>>(),
        "series": series,
        "covered_variants": set.covered_variants,
        "formats": set.formats.iter().map(|f| serde_json::json!({
            "pattern": f.pattern(),
            "templates": f.templates(),
        })).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::standby_pump;

    #[test]
    fn test_rule_set_json_lists_every_rule() {
        let set = standby_pump::rule_set().unwrap();
        let json = rule_set_json(&set);

        let count: usize = json["series"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["rules"].as_array().unwrap().len())
            .sum();
        assert_eq!(count, set.rule_count());
        assert_eq!(json["kind"], "standby_pump");
        assert_eq!(json["unknown_series"], "rated power >= 600 kW");
    }
}
