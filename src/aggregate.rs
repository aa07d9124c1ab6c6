use crate::core::{
    AggregationMode, AggregationResult, EventRecord, Interval, IntervalEnd, SeriesPoint,
};
use crate::timeline::build_intervals;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Aggregate event records into per-status daily series.
///
/// Pure function of its inputs: identical records, mode, and `now` always
/// yield an identical result. Empty input yields an empty result, never an
/// error. Unknown statuses aggregate like any other; rank only matters for
/// display ordering downstream.
pub fn aggregate(
    records: &[EventRecord],
    mode: AggregationMode,
    now: NaiveDateTime,
) -> AggregationResult {
    aggregate_intervals(&build_intervals(records, now), mode)
}

/// Aggregate pre-built intervals. Split out so callers that already hold the
/// timelines (or tests exercising interval edge cases) skip the rebuild.
pub fn aggregate_intervals(intervals: &[Interval], mode: AggregationMode) -> AggregationResult {
    let mut counts: BTreeMap<&str, BTreeMap<NaiveDate, u32>> = BTreeMap::new();
    for interval in intervals {
        let series = counts.entry(interval.status.as_str()).or_default();
        match mode {
            AggregationMode::Event => bump(series, interval.start.date()),
            AggregationMode::Cumulative => occupy_days(series, interval),
        }
    }

    // BTreeMap keying gives each series ascending dates with one point per day.
    let series = counts
        .into_iter()
        .filter(|(_, days)| !days.is_empty())
        .map(|(status, days)| {
            let points = days
                .into_iter()
                .map(|(date, count)| SeriesPoint::new(date, count))
                .collect();
            (status.to_string(), points)
        })
        .collect();
    AggregationResult { series }
}

/// Count every day the interval's issue occupied its status.
///
/// A closed interval covers `[start_day, end_day)`: the transition day belongs
/// to the status being entered, not the one being left, so each issue lands in
/// exactly one status bucket per day. An open interval covers `[start_day,
/// now_day]` inclusive. The walk is bounded by the interval's own span, never
/// the full calendar range. An empty range (same-day transition, or `now`
/// before the record) contributes nothing.
fn occupy_days(series: &mut BTreeMap<NaiveDate, u32>, interval: &Interval) {
    let last = interval.end.instant().date();
    let include_last = matches!(interval.end, IntervalEnd::Current(_));

    let mut day = interval.start.date();
    while day < last || (include_last && day == last) {
        bump(series, day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
}

fn bump(series: &mut BTreeMap<NaiveDate, u32>, day: NaiveDate) {
    *series.entry(day).or_insert(0) += 1;
}
