//! Chair - peer-review consolidation CLI
//!
//! The `chair` command reads a submissions table and a review table (CSV
//! files or HTTP URLs), and writes one ranked recommendation per submission:
//!
//! ```text
//! Submission ID,Sort Score,Status,Reviews
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};

use chair_core::{
    assemble_report, ChairReport, Disposition, Registry, ReportConfig, ReviewGroups, StatusStyle,
    TrackAveraging,
};
use chair_tables::{
    load_registry, load_reviews, write_report, OutputFormat, RegistryLayout, ReviewSchema,
    TableSource,
};

/// How many entries the verbose input summaries show.
const SAMPLE_SIZE: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "chair")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Consolidate peer reviews into ranked chair recommendations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Directory for input/output tables given as relative paths
    #[arg(long, env = "CHAIR_DIR", default_value = "data")]
    dir: PathBuf,

    /// Submissions table (file name or http(s) URL)
    #[arg(long, env = "CHAIR_PAPERS", default_value = "papers.csv")]
    papers: String,

    /// Review table (file name or http(s) URL)
    #[arg(long, env = "CHAIR_REVIEWS", default_value = "reviews.csv")]
    reviews: String,

    /// Output chair table
    #[arg(long, env = "CHAIR_OUTPUT", default_value = "chair.csv")]
    chair: PathBuf,

    /// Review table layout: split (conference + journal scores) or unified
    #[arg(long, env = "CHAIR_SCHEMA", default_value_t = ReviewSchema::Split)]
    schema: ReviewSchema,

    /// Skip the submissions table and derive the registry from review ids
    #[arg(long)]
    no_papers: bool,

    /// Zero-based column of the exception note in the submissions table
    #[arg(long, default_value_t = 6)]
    exception_column: usize,

    /// Average only conference scores for dual-track submissions
    #[arg(long, env = "CHAIR_CONFERENCE_ONLY")]
    conference_only: bool,

    /// Render dispositions as single letters (R, T, C, J)
    #[arg(long)]
    short_status: bool,

    /// Output format
    #[arg(long, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        let averaging = if self.conference_only {
            TrackAveraging::ConferenceOnly
        } else {
            TrackAveraging::Both
        };
        let status_style = if self.short_status {
            StatusStyle::Letter
        } else {
            StatusStyle::Full
        };
        ReportConfig::default()
            .with_averaging(averaging)
            .with_status_style(status_style)
    }

    fn output_path(&self) -> PathBuf {
        if self.chair.is_relative() {
            self.dir.join(&self.chair)
        } else {
            self.chair.clone()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    chair_core::init_tracing(cli.json, level);

    let report = run(&cli).await?;
    println!(
        "{} submissions: {} journal, {} conference, {} tabled, {} rejected",
        report.len(),
        report.count(Disposition::Journal),
        report.count(Disposition::Conference),
        report.count(Disposition::Tabled),
        report.count(Disposition::Reject),
    );
    Ok(())
}

async fn run(cli: &Cli) -> Result<ChairReport> {
    let reviews_source = TableSource::resolve(&cli.reviews, &cli.dir);
    let raws = load_reviews(&reviews_source, cli.schema)
        .await
        .with_context(|| format!("Failed to read reviews from {reviews_source}"))?;

    let registry = if cli.no_papers {
        Registry::from_review_ids(raws.iter().map(|r| r.submission_id.as_str()))
    } else {
        let papers_source = TableSource::resolve(&cli.papers, &cli.dir);
        let layout = RegistryLayout::default().with_exception_column(Some(cli.exception_column));
        load_registry(&papers_source, &layout)
            .await
            .with_context(|| format!("Failed to read submissions from {papers_source}"))?
    };

    let groups = ReviewGroups::build(&registry, raws);

    if cli.verbose {
        report_inputs(&registry, &groups);
    }
    check_ids(&groups);

    let config = cli.report_config();
    let report = assemble_report(&registry, groups, &config).context("Failed to assemble report")?;

    let output = cli.output_path();
    write_report(&output, &report, cli.format, config.status_style)
        .with_context(|| format!("Failed to write chair report to {}", output.display()))?;
    info!("Wrote {} records to {}", report.len(), output.display());
    Ok(report)
}

/// Debug summaries of the loaded inputs.
fn report_inputs(registry: &Registry, groups: &ReviewGroups) {
    let ids: Vec<_> = registry
        .iter()
        .take(SAMPLE_SIZE)
        .map(|s| s.id.as_str())
        .collect();
    debug!(
        "registry has {} entries ({} dual-track), starting: {:?}",
        registry.len(),
        registry.dual_track_count(),
        ids
    );

    debug!("reviews cover {} submissions, starting:", groups.len());
    for submission in registry.iter().take(SAMPLE_SIZE) {
        if let Some(reviews) = groups.get(&submission.id) {
            debug!("  {}: {:?}", submission.id, reviews);
        }
    }
}

/// Warn about registry/review mismatches. Neither is fatal.
fn check_ids(groups: &ReviewGroups) {
    if !groups.unreviewed().is_empty() {
        warn!(
            "Papers with no reviews:\n{}",
            sorted_lines(groups.unreviewed())
        );
    }
    if !groups.unknown().is_empty() {
        warn!(
            "Reviews for unrecognized papers:\n{}",
            sorted_lines(groups.unknown())
        );
    }
}

fn sorted_lines(ids: &[String]) -> String {
    let mut ids = ids.to_vec();
    ids.sort();
    ids.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chair"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("data"));
        assert_eq!(cli.schema, ReviewSchema::Split);
        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(cli.output_path(), PathBuf::from("data/chair.csv"));
        assert_eq!(cli.report_config(), ReportConfig::default());
    }

    #[test]
    fn test_flags_map_to_report_config() {
        let cli = Cli::try_parse_from([
            "chair",
            "--conference-only",
            "--short-status",
            "--schema",
            "unified",
            "--format",
            "json",
            "--chair",
            "/tmp/out.json",
        ])
        .unwrap();
        let config = cli.report_config();
        assert_eq!(config.averaging, TrackAveraging::ConferenceOnly);
        assert_eq!(config.status_style, StatusStyle::Letter);
        assert_eq!(cli.schema, ReviewSchema::Unified);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output_path(), PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_rejects_unknown_schema() {
        assert!(Cli::try_parse_from(["chair", "--schema", "basic"]).is_err());
    }

    #[test]
    fn test_sorted_lines() {
        let ids = vec!["b".to_string(), "a".to_string()];
        assert_eq!(sorted_lines(&ids), "a\nb");
    }

    #[tokio::test]
    async fn test_run_writes_report_from_derived_registry() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("reviews.csv"),
            "Submission ID,Role,Score,Conf/Journal Rec,Expertise,Final Recommendation,Top 10%\n\
             7,Committee Member (lead),5,2,3,2,1\n\
             7,Committee Member,5,2,3,2,0\n\
             3,Committee Member (lead),-3,1,2,-1,0\n",
        )
        .unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "chair",
            "--dir",
            dir_arg,
            "--schema",
            "unified",
            "--no-papers",
        ])
        .unwrap();

        let report = run(&cli).await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.records[0].submission_id, "3");
        assert_eq!(report.get("7").unwrap().disposition, Disposition::Journal);

        let written = std::fs::read_to_string(dir.path().join("chair.csv")).unwrap();
        assert!(written.starts_with("Submission ID,Sort Score,Status,Reviews\n"));
        assert!(written.contains("\n7,5.0,Journal,\"[A!, A!] {j, j} bbs: Journal\"\n"));
    }

    #[tokio::test]
    async fn test_run_fails_without_partial_output_on_malformed_score() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("reviews.csv"),
            "Submission ID,Role,Conference Score,Journal Score,Expertise,Final Recommendation\n\
             1,Committee Member (lead),high,3,2,2\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("papers.csv"),
            "Submission ID,Thumbnail URL,Title,Area,Dual Track,Abstract\n1,,,,yes,\n",
        )
        .unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["chair", "--dir", dir_arg]).unwrap();

        let err = run(&cli).await.unwrap_err();
        assert!(format!("{err:#}").contains("malformed numeric field"));
        assert!(!dir.path().join("chair.csv").exists());
    }

    #[tokio::test]
    async fn test_run_skips_malformed_reviews_of_withdrawn_papers() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("reviews.csv"),
            "Submission ID,Role,Conference Score,Journal Score,Expertise,Final Recommendation\n\
             1,Committee Member (lead),3,3,2,2\n\
             2,Committee Member (lead),n/a,n/a,2,2\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("papers.csv"),
            "Submission ID,Thumbnail URL,Title,Area,Dual Track,Abstract,Exception\n\
             1,,,,yes,,\n\
             2,,,,yes,,Withdrawn\n",
        )
        .unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["chair", "--dir", dir_arg]).unwrap();

        let report = run(&cli).await.unwrap();
        assert_eq!(report.get("2").unwrap().disposition, Disposition::Reject);
        let written = std::fs::read_to_string(dir.path().join("chair.csv")).unwrap();
        assert!(written.contains("\n2,-7.0,Reject,\"Exception: Withdrawn\"\n"));
    }
}
