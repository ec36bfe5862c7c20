//! Chair-Tables: tabular collaborators of the chair engine
//!
//! Fetches the submissions and review tables (local CSV files or HTTP
//! URLs), maps their rows onto the engine's input types, and writes the
//! finished chair report.

pub mod error;
pub mod schema;
pub mod source;
pub mod writer;

pub use error::{Result, TableError};
pub use schema::{registry_from_rows, reviews_from_rows, RegistryLayout, ReviewSchema};
pub use source::{fetch_text, parse_rows, read_table, TableSource};
pub use writer::{
    render_csv, render_json, write_report, ChairRecordArtifact, ChairReportArtifact, OutputFormat,
};

use chair_core::{RawReview, Registry};

/// Read the submissions table into a registry.
pub async fn load_registry(source: &TableSource, layout: &RegistryLayout) -> Result<Registry> {
    let rows = read_table(source).await?;
    registry_from_rows(&rows, layout)
}

/// Read the review table into raw review rows.
pub async fn load_reviews(source: &TableSource, schema: ReviewSchema) -> Result<Vec<RawReview>> {
    let rows = read_table(source).await?;
    reviews_from_rows(&rows, schema)
}
