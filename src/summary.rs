use crate::core::AggregationResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Advisory view-seeding facts derived from an aggregation result.
///
/// Recomputed on every aggregation run; a mode switch recomputes defaults and
/// deliberately discards any previously narrowed range or selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    /// Union of day keys across all series, ascending.
    pub all_dates: Vec<NaiveDate>,
    /// Earliest day key, `None` for an empty result.
    pub default_start: Option<NaiveDate>,
    /// Latest day key, `None` for an empty result.
    pub default_end: Option<NaiveDate>,
    /// Key set of the result. No guaranteed semantic order; consumers wanting
    /// a display order re-sort via `StatusRegistry::display_order`.
    pub statuses_present: Vec<String>,
}

pub fn summarize(result: &AggregationResult) -> SeriesSummary {
    let dates: BTreeSet<NaiveDate> = result
        .series
        .values()
        .flatten()
        .map(|point| point.date)
        .collect();
    let all_dates: Vec<NaiveDate> = dates.into_iter().collect();

    SeriesSummary {
        default_start: all_dates.first().copied(),
        default_end: all_dates.last().copied(),
        statuses_present: result.statuses().map(str::to_string).collect(),
        all_dates,
    }
}
