use std::path::PathBuf;

use clap::Args;

use crate::cli::analyze::read_query;
use crate::cli::{load_matcher, OutputFormat};
use crate::core::types::{EMERGENCY_ADVISORY, QUICK_SCAN_ACTION};
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct ScanArgs {
    /// Main symptom, e.g. "headache"
    /// Use '-' to read it from stdin
    #[arg(required = true, num_args = 1..)]
    pub symptom: Vec<String>,

    /// Path to custom catalog file (JSON, TSV or CSV)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute scan subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the matcher cannot be
/// built, or the query fails validation.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let query = read_query(&args.symptom)?;
    validate_query(&query)?;

    let matcher = load_matcher(args.catalog.as_deref(), verbose)?;

    let Some(best) = matcher.best_match(&query) else {
        eprintln!("No symptom entered.");
        return Ok(());
    };

    match format {
        OutputFormat::Text => {
            println!("{EMERGENCY_ADVISORY}\n");
            println!("{}", best.condition.name);
            println!("   Doctor: {}", best.condition.specialist);
            println!("   Action: {QUICK_SCAN_ACTION}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "advisory": EMERGENCY_ADVISORY,
                "match": best.summary(1),
                "action": QUICK_SCAN_ACTION,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("name\tspecialist\taction");
            println!(
                "{}\t{}\t{QUICK_SCAN_ACTION}",
                best.condition.name, best.condition.specialist
            );
        }
    }

    Ok(())
}
