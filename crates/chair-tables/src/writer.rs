//! Chair report rendering and writing.

use std::path::Path;
use std::str::FromStr;

use chair_core::{ChairReport, StatusStyle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(TableError::UnknownOption {
                kind: "output format",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

const CSV_HEADER: [&str; 4] = ["Submission ID", "Sort Score", "Status", "Reviews"];

/// Encode one CSV record without its terminator.
fn encode_record<'a>(
    fields: impl IntoIterator<Item = &'a str>,
    style: csv::QuoteStyle,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(style)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::Csv(e.into_error().into()))?;
    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Render the report as CSV with a `Submission ID,Sort Score,Status,Reviews`
/// header.
///
/// Ids and statuses are quoted only when they need it; the digest cell is
/// always quoted.
pub fn render_csv(report: &ChairReport, style: StatusStyle) -> Result<String> {
    let mut out = encode_record(CSV_HEADER, csv::QuoteStyle::Necessary)?;
    out.push('\n');
    for record in &report.records {
        let sort_score = record.sort_score.to_string();
        let leading = encode_record(
            [
                record.submission_id.as_str(),
                sort_score.as_str(),
                record.status_label(style),
            ],
            csv::QuoteStyle::Necessary,
        )?;
        let digest = encode_record([record.digest.as_str()], csv::QuoteStyle::Always)?;
        out.push_str(&leading);
        out.push(',');
        out.push_str(&digest);
        out.push('\n');
    }
    Ok(out)
}

/// Single record in the JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChairRecordArtifact {
    pub submission_id: String,
    pub sort_score: f64,
    pub status: String,
    pub reviews: String,
}

/// JSON rendition of a chair report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChairReportArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub records: Vec<ChairRecordArtifact>,
}

impl ChairReportArtifact {
    pub fn new(report: &ChairReport, style: StatusStyle, now: DateTime<Utc>) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            generated_at: now,
            records: report
                .records
                .iter()
                .map(|r| ChairRecordArtifact {
                    submission_id: r.submission_id.clone(),
                    sort_score: r.sort_score.value(),
                    status: r.status_label(style).to_string(),
                    reviews: r.digest.clone(),
                })
                .collect(),
        }
    }
}

/// Render the report as pretty JSON.
pub fn render_json(report: &ChairReport, style: StatusStyle) -> Result<String> {
    let artifact = ChairReportArtifact::new(report, style, Utc::now());
    Ok(serde_json::to_string_pretty(&artifact)?)
}

/// Render the whole report, then write it to `path` in one go.
pub fn write_report(
    path: &Path,
    report: &ChairReport,
    format: OutputFormat,
    style: StatusStyle,
) -> Result<()> {
    let content = match format {
        OutputFormat::Csv => render_csv(report, style)?,
        OutputFormat::Json => render_json(report, style)?,
    };
    std::fs::write(path, content).map_err(|source| TableError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = report.len(), %format, "wrote chair report");
    Ok(())
}
