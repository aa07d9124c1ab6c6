use crate::report::ChartReport;
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ChartReport) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ChartReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &ChartReport) -> Result<()> {
        writeln!(self.writer, "# Status Trend Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Mode: {}", report.mode)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ChartReport) -> Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Rows seen | {} |", report.rows_seen)?;
        writeln!(self.writer, "| Rows retained | {} |", report.rows_retained)?;
        writeln!(self.writer, "| Rows dropped | {} |", report.rows_dropped)?;
        writeln!(
            self.writer,
            "| Date range | {} |",
            format_range(report)
        )?;
        writeln!(
            self.writer,
            "| Statuses | {} |",
            report.series.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_series(&mut self, report: &ChartReport) -> Result<()> {
        if report.is_empty() {
            writeln!(self.writer, "No data.")?;
            return Ok(());
        }
        writeln!(self.writer, "## Series")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Status | Days | Total | First | Last | Peak |")?;
        writeln!(self.writer, "|--------|------|-------|-------|------|------|")?;
        for status in report
            .ranked_statuses
            .iter()
            .chain(report.unranked_statuses.iter())
        {
            let Some(points) = report.series.get(status) else {
                continue;
            };
            let total: u64 = points.iter().map(|p| u64::from(p.count)).sum();
            let peak = points.iter().map(|p| p.count).max().unwrap_or(0);
            let first = points.first().map(|p| p.date.to_string()).unwrap_or_default();
            let last = points.last().map(|p| p.date.to_string()).unwrap_or_default();
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                status,
                points.len(),
                total,
                first,
                last,
                peak
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ChartReport) -> Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_series(report)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &ChartReport) -> Result<()> {
        print_header(report);
        print_summary(report);
        print_series(report);
        Ok(())
    }
}

fn print_header(report: &ChartReport) {
    let title = format!("Status Trend Report ({})", report.mode);
    println!("{}", title.bold().blue());
    println!("{}", "=".repeat(title.len()).blue());
    println!();
}

fn print_summary(report: &ChartReport) {
    println!("{}", "Summary:".bold());
    println!(
        "  Rows: {} seen, {} retained, {} dropped",
        report.rows_seen, report.rows_retained, report.rows_dropped
    );
    println!("  Range: {}", format_range(report));
    if !report.unranked_statuses.is_empty() {
        println!(
            "  {} {}",
            "Unranked statuses:".yellow(),
            report.unranked_statuses.join(", ")
        );
    }
    println!();
}

fn print_series(report: &ChartReport) {
    if report.is_empty() {
        println!("{}", "No data.".dimmed());
        return;
    }
    println!("{}", "Per-status series:".bold());
    for status in report
        .ranked_statuses
        .iter()
        .chain(report.unranked_statuses.iter())
    {
        let Some(points) = report.series.get(status) else {
            continue;
        };
        let total: u64 = points.iter().map(|p| u64::from(p.count)).sum();
        let peak = points.iter().map(|p| p.count).max().unwrap_or(0);
        println!(
            "  {:<24} {:>4} days  total {:>5}  peak {:>4}",
            status.green(),
            points.len(),
            total,
            peak
        );
    }
}

fn format_range(report: &ChartReport) -> String {
    match (report.default_start, report.default_end) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        _ => "(empty)".to_string(),
    }
}

/// Build a writer for the requested format, to a file when `output` is given,
/// stdout otherwise. Terminal format always prints to stdout.
pub fn create_writer(format: OutputFormat, output: Option<&Path>) -> Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match (format, output) {
        (OutputFormat::Json, Some(path)) => Box::new(JsonWriter::new(open(path)?)),
        (OutputFormat::Json, None) => Box::new(JsonWriter::new(std::io::stdout())),
        (OutputFormat::Markdown, Some(path)) => Box::new(MarkdownWriter::new(open(path)?)),
        (OutputFormat::Markdown, None) => Box::new(MarkdownWriter::new(std::io::stdout())),
        (OutputFormat::Terminal, _) => Box::new(TerminalWriter::new()),
    };
    Ok(writer)
}

fn open(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusRegistry;
    use crate::core::{AggregationMode, EventRecord};
    use crate::parser::ParseOutcome;
    use chrono::NaiveDate;

    fn sample_report() -> ChartReport {
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let outcome = ParseOutcome {
            records: vec![
                EventRecord::new("K1", now - chrono::Duration::days(4), "OPEN"),
                EventRecord::new("K1", now - chrono::Duration::days(2), "DONE"),
            ],
            rows_seen: 2,
            rows_dropped: 0,
        };
        ChartReport::build(
            &outcome,
            AggregationMode::Cumulative,
            now,
            &StatusRegistry::default(),
        )
    }

    #[test]
    fn json_writer_emits_valid_json() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_report(&sample_report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["mode"], "cumulative");
        assert!(value["series"]["OPEN"].is_array());
    }

    #[test]
    fn markdown_writer_orders_series_by_rank() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf)
            .write_report(&sample_report())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let open_pos = text.find("| OPEN |").unwrap();
        let done_pos = text.find("| DONE |").unwrap();
        assert!(open_pos < done_pos);
        assert!(text.contains("| Rows retained | 2 |"));
    }

    #[test]
    fn markdown_writer_handles_empty_report() {
        let report = ChartReport::build(
            &ParseOutcome::default(),
            AggregationMode::Event,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            &StatusRegistry::default(),
        );
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf).write_report(&report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("No data."));
        assert!(text.contains("(empty)"));
    }
}
