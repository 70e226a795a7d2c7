use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_matcher, OutputFormat};
use crate::core::types::EMERGENCY_ADVISORY;
use crate::matching::engine::{ScoredMatch, DEFAULT_TOP_K};
use crate::utils::validation::{clamp_top_k, validate_query};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Symptoms, e.g. "fever, cough, chest pain"
    /// Use '-' to read them from stdin
    #[arg(required = true, num_args = 1..)]
    pub symptoms: Vec<String>,

    /// Number of conditions to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Path to custom catalog file (JSON, TSV or CSV)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute analyze subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the matcher cannot be
/// built, or the query fails validation.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnalyzeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let query = read_query(&args.symptoms)?;
    validate_query(&query)?;

    let matcher = load_matcher(args.catalog.as_deref(), verbose)?;
    let top_k = clamp_top_k(args.top_k);
    let matches = matcher.rank(&query, top_k);

    if matches.is_empty() {
        eprintln!("No symptoms entered.");
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_results(&matches),
        OutputFormat::Json => print_json_results(&matches)?,
        OutputFormat::Tsv => print_tsv_results(&matches),
    }

    Ok(())
}

/// Join positional words into one query, or read stdin for `-`
pub(crate) fn read_query(words: &[String]) -> anyhow::Result<String> {
    use std::io::{self, Read};

    if let [only] = words {
        if only == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            return Ok(buffer);
        }
    }

    Ok(words.join(" "))
}

fn print_text_results(matches: &[ScoredMatch<'_>]) {
    println!("{EMERGENCY_ADVISORY}");

    for (i, result) in matches.iter().enumerate() {
        println!("\n{}", "─".repeat(60));
        println!(
            "\n#{} {} ({})",
            i + 1,
            result.condition.name,
            result.confidence().label()
        );
        println!("   Confidence: {}%", result.percent());
        println!("   Doctor to Visit: {}", result.condition.specialist);
        println!("   Precautions: {}", result.condition.precautions);
    }
}

fn print_json_results(matches: &[ScoredMatch<'_>]) -> anyhow::Result<()> {
    let results: Vec<_> = matches
        .iter()
        .enumerate()
        .map(|(i, m)| m.summary(i + 1))
        .collect();

    let output = serde_json::json!({
        "advisory": EMERGENCY_ADVISORY,
        "matches": results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(matches: &[ScoredMatch<'_>]) {
    println!("rank\tname\tpercent\tscore\tspecialist\tprecautions");
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{:.6}\t{}\t{}",
            i + 1,
            m.condition.name,
            m.percent(),
            m.score,
            m.condition.specialist,
            m.condition.precautions
        );
    }
}
