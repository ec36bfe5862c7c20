//! Table retrieval from local files or HTTP(S) URLs.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, TableError};

/// Where an input table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Url(String),
    File(PathBuf),
}

impl TableSource {
    /// Interpret a location string. Anything starting with `http` is a URL.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Like [`TableSource::parse`], resolving relative file paths against `dir`.
    pub fn resolve(location: &str, dir: &Path) -> Self {
        match Self::parse(location) {
            Self::File(path) if path.is_relative() => Self::File(dir.join(path)),
            source => source,
        }
    }
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn fetch_url(url: &str) -> Result<String> {
    let http_error = |e: reqwest::Error| TableError::Http {
        url: url.to_string(),
        detail: e.to_string(),
    };
    let client = reqwest::Client::builder()
        .user_agent(concat!("chair-tables/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(http_error)?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(http_error)?
        .error_for_status()
        .map_err(http_error)?;
    response.text().await.map_err(http_error)
}

/// Fetch the raw text of a table.
pub async fn fetch_text(source: &TableSource) -> Result<String> {
    match source {
        TableSource::Url(url) => {
            info!("Fetching table from {}", url);
            fetch_url(url).await
        }
        TableSource::File(path) => {
            debug!("Reading table from {}", path.display());
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| TableError::Io {
                    path: path.display().to_string(),
                    source,
                })
        }
    }
}

/// Parse CSV text into data rows. The header row is always discarded and
/// rows may differ in length.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Fetch and parse a table in one step.
pub async fn read_table(source: &TableSource) -> Result<Vec<Vec<String>>> {
    let text = fetch_text(source).await?;
    let rows = parse_rows(&text)?;
    debug!(rows = rows.len(), %source, "parsed table");
    Ok(rows)
}
