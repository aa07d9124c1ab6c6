use crate::config::StatusRegistry;
use crate::core::AggregationMode;
use crate::io::output::{create_writer, OutputFormat};
use crate::parser::parse_events;
use crate::report::ChartReport;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub file: PathBuf,
    pub mode: AggregationMode,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Instant bounding open intervals. `None` means the local wall clock;
    /// everything below the CLI boundary receives it as a plain value.
    pub now: Option<NaiveDateTime>,
}

pub fn analyze(config: AnalyzeConfig) -> Result<()> {
    let registry = StatusRegistry::load_or_default(config.config.as_deref())?;
    let now = config
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    let report = run_pipeline(&config.file, config.mode, now, &registry)?;
    if report.rows_dropped > 0 {
        log::warn!(
            "{} of {} rows dropped during parsing",
            report.rows_dropped,
            report.rows_seen
        );
    }

    let mut writer = create_writer(config.format, config.output.as_deref())?;
    writer.write_report(&report)
}

/// Read the CSV and run the full pipeline. Reading the file is the only fatal
/// step; malformed rows inside a readable file degrade to drop counts.
pub fn run_pipeline(
    file: &Path,
    mode: AggregationMode,
    now: NaiveDateTime,
    registry: &StatusRegistry,
) -> Result<ChartReport> {
    let raw = crate::io::read_file(file)
        .with_context(|| format!("failed to read input file: {}", file.display()))?;
    let outcome = parse_events(&raw)?;
    Ok(ChartReport::build(&outcome, mode, now, registry))
}
