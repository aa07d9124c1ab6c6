use crate::aggregate::aggregate;
use crate::config::StatusRegistry;
use crate::core::{AggregationMode, SeriesPoint};
use crate::parser::ParseOutcome;
use crate::summary::summarize;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// The full pipeline output handed to the rendering side: series, date range,
/// status ordering, and parse diagnostics. Writers serialize or tabulate this;
/// nothing in the core depends on how it gets drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartReport {
    pub mode: AggregationMode,
    pub generated_at: NaiveDateTime,
    pub rows_seen: usize,
    pub rows_retained: usize,
    pub rows_dropped: usize,
    pub default_start: Option<NaiveDate>,
    pub default_end: Option<NaiveDate>,
    /// Statuses present in the data and known to the registry, ascending by
    /// rank. This is the rank-axis ordering.
    pub ranked_statuses: Vec<String>,
    /// Statuses present in the data but absent from the registry. Valid for
    /// counting, segregated from any rank-ordered view.
    pub unranked_statuses: Vec<String>,
    pub series: BTreeMap<String, Vec<SeriesPoint>>,
}

impl ChartReport {
    /// Run aggregation and summary over a parse outcome and assemble the
    /// report. `now` bounds open intervals and is recorded as the generation
    /// instant; callers inject it rather than this reading a clock.
    pub fn build(
        outcome: &ParseOutcome,
        mode: AggregationMode,
        now: NaiveDateTime,
        registry: &StatusRegistry,
    ) -> Self {
        let result = aggregate(&outcome.records, mode, now);
        let summary = summarize(&result);

        let ranked = registry.display_order(summary.statuses_present.iter().map(String::as_str));
        let mut unranked: Vec<String> = summary
            .statuses_present
            .iter()
            .filter(|s| !registry.contains(s))
            .cloned()
            .collect();
        unranked.sort();

        Self {
            mode,
            generated_at: now,
            rows_seen: outcome.rows_seen,
            rows_retained: outcome.rows_retained(),
            rows_dropped: outcome.rows_dropped,
            default_start: summary.default_start,
            default_end: summary.default_end,
            ranked_statuses: ranked,
            unranked_statuses: unranked,
            series: result.series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
