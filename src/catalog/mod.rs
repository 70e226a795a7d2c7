//! Condition catalog storage.
//!
//! The catalog is the reference table the matcher is built from: each entry is
//! a condition name, its symptom keywords, the specialist to visit and the
//! precautions to take. An embedded catalog is compiled into the binary, but
//! custom catalogs can also be loaded from JSON, TSV or CSV files.
//!
//! ## Embedded Catalog
//!
//! Diabetes, Heart Attack, Flu, Asthma, Hypertension and Pneumonia, in that
//! order. Table order is significant: the matcher breaks score ties by it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_matcher::ConditionCatalog;
//! use std::path::Path;
//!
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//! for condition in &catalog.conditions {
//!     println!("{} -> {}", condition.name, condition.specialist);
//! }
//!
//! // Export, edit, and load again
//! let json = catalog.to_json().unwrap();
//! let custom = ConditionCatalog::load_from_file(Path::new("my_conditions.json")).unwrap();
//! ```

pub mod store;
pub mod tsv;
