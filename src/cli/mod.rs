//! Command-line interface for symptom-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **analyze**: Rank the top conditions for free-text symptoms
//! - **scan**: Quick scan, the single best condition for a main symptom
//! - **catalog**: List, show, or export conditions from the catalog
//! - **serve**: Start the JSON web API
//!
//! ## Usage
//!
//! ```text
//! # Top 3 conditions with confidence, specialist and precautions
//! symptom-matcher analyze "fever, cough, chest pain"
//!
//! # Single best condition
//! symptom-matcher scan headache
//!
//! # JSON output for scripting
//! symptom-matcher analyze fever cough --format json
//!
//! # Start the web API with the login gate enabled
//! symptom-matcher serve --port 8080 --require-login
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::ConditionCatalog;
use crate::matching::engine::SymptomMatcher;

pub mod analyze;
pub mod catalog;
pub mod scan;

#[derive(Parser)]
#[command(name = "symptom-matcher")]
#[command(author = "MedAI Pro")]
#[command(version)]
#[command(about = "Rank plausible conditions for free-text symptoms")]
#[command(
    long_about = "symptom-matcher compares the symptoms you type against a small reference table of conditions using TF-IDF cosine similarity.\n\nFor each match it reports:\n- A confidence percentage\n- The specialist to visit\n- Precautions to take\n\nThis is an educational demo, not a medical device."
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
    /// Rank the most likely conditions for a set of symptoms
    Analyze(analyze::AnalyzeArgs),

    /// Show the single best condition for a main symptom
    Scan(scan::ScanArgs),

    /// Inspect the condition catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Require x-username and x-password headers on analysis routes
    #[arg(long)]
    pub require_login: bool,

    /// Path to custom catalog file (JSON, TSV or CSV)
    #[arg(long)]
    pub catalog: Option<std::path::PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the catalog and build the matcher shared by `analyze` and `scan`
pub(crate) fn load_matcher(catalog: Option<&Path>, verbose: bool) -> anyhow::Result<SymptomMatcher> {
    let catalog = ConditionCatalog::load(catalog)?;

    if verbose {
        eprintln!("Loaded catalog with {} conditions", catalog.len());
    }

    let matcher = SymptomMatcher::from_catalog(&catalog)?;

    if verbose {
        eprintln!(
            "Vocabulary: {} terms",
            matcher.model().vocabulary_len()
        );
    }

    Ok(matcher)
}
