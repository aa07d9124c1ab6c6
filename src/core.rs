use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One observed (issue, timestamp, status) fact from the input.
///
/// Immutable once parsed; every downstream structure is derived fresh from the
/// full record set on each pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub issue_key: String,
    pub timestamp: NaiveDateTime,
    pub status: String,
}

impl EventRecord {
    pub fn new(
        issue_key: impl Into<String>,
        timestamp: NaiveDateTime,
        status: impl Into<String>,
    ) -> Self {
        Self {
            issue_key: issue_key.into(),
            timestamp,
            status: status.into(),
        }
    }
}

/// How an interval's end was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalEnd {
    /// Superseded by the issue's next transition at this instant.
    Transition(NaiveDateTime),
    /// Still the issue's current status as of the injected observation instant.
    Current(NaiveDateTime),
}

impl IntervalEnd {
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            IntervalEnd::Transition(t) | IntervalEnd::Current(t) => *t,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, IntervalEnd::Current(_))
    }
}

/// A span during which one issue held one status, bounded by consecutive
/// transitions (or by "now" for the most recent one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub issue_key: String,
    pub status: String,
    pub start: NaiveDateTime,
    pub end: IntervalEnd,
}

/// One day's tally for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub count: u32,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// Aggregation strategy selected at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Per-day occupancy: how many distinct issues sat in each status each day.
    Cumulative,
    /// Transition counts: how many issues entered each status each day.
    Event,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Cumulative => write!(f, "cumulative"),
            AggregationMode::Event => write!(f, "event"),
        }
    }
}

/// Per-status time series keyed by status name.
///
/// Each series is ascending by date with one point per day; both invariants
/// hold by construction because the aggregator accumulates into date-keyed
/// `BTreeMap`s before flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub series: BTreeMap<String, Vec<SeriesPoint>>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn statuses(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn get(&self, status: &str) -> Option<&[SeriesPoint]> {
        self.series.get(status).map(Vec::as_slice)
    }

    /// Sum of every count across all statuses and days.
    pub fn total_count(&self) -> u64 {
        self.series
            .values()
            .flatten()
            .map(|p| u64::from(p.count))
            .sum()
    }
}
