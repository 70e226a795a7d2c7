use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::ConditionCatalog;
use crate::cli::OutputFormat;
use crate::core::types::ConditionId;
use crate::matching::engine::SymptomMatcher;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all conditions in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Filter by specialist (e.g., "Cardiologist")
        #[arg(long)]
        specialist: Option<String>,
    },

    /// Show details of a specific condition
    Show {
        /// Condition ID (e.g., "heart_attack")
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a JSON file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the learned vocabulary with IDF weights
    Vocabulary {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a condition is not
/// found, or the export cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            specialist,
        } => run_list(catalog, specialist.as_deref(), format, verbose),
        CatalogCommands::Show { id, catalog } => run_show(&id, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
        CatalogCommands::Vocabulary { catalog } => run_vocabulary(catalog, format),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    specialist_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} conditions", catalog.len());
    }

    let filtered: Vec<_> = catalog
        .conditions
        .iter()
        .filter(|c| {
            specialist_filter.map_or(true, |specialist| {
                c.specialist
                    .to_lowercase()
                    .contains(&specialist.to_lowercase())
            })
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let id_width = filtered
                .iter()
                .map(|c| c.id().0.len())
                .max()
                .unwrap_or(2)
                .max(2);
            let name_width = filtered
                .iter()
                .map(|c| c.name.chars().count().min(30))
                .max()
                .unwrap_or(4)
                .max(4);
            let specialist_width = filtered
                .iter()
                .map(|c| c.specialist.chars().count())
                .max()
                .unwrap_or(10)
                .max(10);

            let total_width = id_width + name_width + specialist_width + 2;

            println!("Condition Catalog ({} conditions)\n", filtered.len());
            println!(
                "{:<id_w$} {:<name_w$} {:<spec_w$}",
                "ID",
                "Name",
                "Specialist",
                id_w = id_width,
                name_w = name_width,
                spec_w = specialist_width
            );
            println!("{}", "-".repeat(total_width));

            for c in &filtered {
                println!(
                    "{:<id_w$} {:<name_w$} {:<spec_w$}",
                    c.id().0,
                    truncate(&c.name, name_width),
                    c.specialist,
                    id_w = id_width,
                    name_w = name_width,
                    spec_w = specialist_width
                );
                if verbose {
                    println!("  └─ Symptoms: {}", c.symptoms);
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = filtered
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id().0,
                        "name": c.name,
                        "symptoms": c.symptoms,
                        "specialist": c.specialist,
                        "precautions": c.precautions,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tsymptoms\tspecialist\tprecautions");
            for c in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    c.id(),
                    c.name,
                    c.symptoms,
                    c.specialist,
                    c.precautions
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;

    let condition = catalog
        .get(&ConditionId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Condition '{}' not found", id))?;

    match format {
        OutputFormat::Text => {
            println!("Condition: {}\n", condition.name);
            println!("ID:          {}", condition.id());
            println!("Symptoms:    {}", condition.symptoms);
            println!("Specialist:  {}", condition.specialist);
            println!("Precautions: {}", condition.precautions);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(condition)?);
        }
        OutputFormat::Tsv => {
            println!("field\tvalue");
            println!("id\t{}", condition.id());
            println!("name\t{}", condition.name);
            println!("symptoms\t{}", condition.symptoms);
            println!("specialist\t{}", condition.specialist);
            println!("precautions\t{}", condition.precautions);
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} conditions to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

fn run_vocabulary(catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = ConditionCatalog::load(catalog_path.as_deref())?;
    let matcher = SymptomMatcher::from_catalog(&catalog)?;
    let model = matcher.model();

    let rows: Vec<(&str, f64)> = model
        .vocabulary()
        .filter_map(|token| model.idf(token).map(|idf| (token, idf)))
        .collect();

    match format {
        OutputFormat::Text => {
            println!("Vocabulary ({} terms)\n", rows.len());
            for (token, idf) in &rows {
                println!("{token:<20} {idf:.4}");
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = rows
                .iter()
                .map(|(token, idf)| serde_json::json!({ "token": token, "idf": idf }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("token\tidf");
            for (token, idf) in &rows {
                println!("{token}\t{idf:.6}");
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Flu", 10), "Flu");
        assert_eq!(truncate("Hypertension", 8), "Hyper...");
    }
}
