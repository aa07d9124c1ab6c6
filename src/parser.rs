use crate::core::EventRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISSUE_KEY_HEADER: &str = "Issue Key";
const DATE_HEADER: &str = "Date";
const STATUS_HEADER: &str = "Status";

/// Datetime formats tried after RFC 3339, in order. The trailing entries cover
/// Jira's locale-style export timestamps.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%b/%y %I:%M %p",
    "%d/%b/%Y %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats; parsed values land at midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%b/%y", "%m/%d/%Y"];

/// Result of one parse pass: the retained records plus drop diagnostics.
///
/// Malformed rows are never an error; they are excluded and tallied so callers
/// can report how much of the input survived.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<EventRecord>,
    pub rows_seen: usize,
    pub rows_dropped: usize,
}

impl ParseOutcome {
    pub fn rows_retained(&self) -> usize {
        self.records.len()
    }
}

/// Parse one timestamp cell. Tries RFC 3339 first, then the known datetime and
/// date-only formats. Returns `None` when nothing matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parse CSV text into event records.
///
/// The header row is required; `Issue Key`, `Date`, and `Status` are matched
/// by exact name in any column order. Rows with an empty issue key or an
/// unparseable date are dropped, not errored. A missing required column makes
/// every row drop, yielding an empty outcome. Output order preserves input
/// order; the timeline builder re-sorts, so this order is not load-bearing.
pub fn parse_events(raw: &str) -> Result<ParseOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .context("failed to read CSV header row")?
        .clone();
    let key_idx = headers.iter().position(|h| h == ISSUE_KEY_HEADER);
    let date_idx = headers.iter().position(|h| h == DATE_HEADER);
    let status_idx = headers.iter().position(|h| h == STATUS_HEADER);
    if key_idx.is_none() || date_idx.is_none() || status_idx.is_none() {
        log::warn!(
            "missing required column(s) in header {:?}; all rows will be dropped",
            headers
        );
    }

    let mut outcome = ParseOutcome::default();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                outcome.rows_seen += 1;
                outcome.rows_dropped += 1;
                log::debug!("dropping unreadable CSV row: {e}");
                continue;
            }
        };
        outcome.rows_seen += 1;

        let issue_key = field(&row, key_idx).trim();
        if issue_key.is_empty() {
            outcome.rows_dropped += 1;
            log::debug!("dropping row {}: empty issue key", outcome.rows_seen);
            continue;
        }
        let date_raw = field(&row, date_idx);
        let Some(timestamp) = parse_timestamp(date_raw) else {
            outcome.rows_dropped += 1;
            log::debug!(
                "dropping row {} ({issue_key}): unparseable date {date_raw:?}",
                outcome.rows_seen
            );
            continue;
        };
        let status = field(&row, status_idx).trim().to_string();

        outcome
            .records
            .push(EventRecord::new(issue_key, timestamp, status));
    }

    Ok(outcome)
}

fn field<'a>(row: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| row.get(i)).unwrap_or("")
}
