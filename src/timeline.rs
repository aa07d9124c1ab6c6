use crate::core::{EventRecord, Interval, IntervalEnd};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Derive status intervals from the full record set.
///
/// Records are partitioned by issue key and stable-sorted by timestamp within
/// each partition (ties keep input order). Each record opens an interval that
/// closes at the issue's next transition; the last record per issue stays open
/// and ends at `now`. `now` is always injected by the caller so outputs are
/// reproducible; nothing here reads a clock.
///
/// Partition iteration order is not significant downstream; the aggregator
/// consumes intervals without regard to issue identity.
pub fn build_intervals(records: &[EventRecord], now: NaiveDateTime) -> Vec<Interval> {
    let mut by_issue: HashMap<&str, Vec<&EventRecord>> = HashMap::new();
    for record in records {
        by_issue
            .entry(record.issue_key.as_str())
            .or_default()
            .push(record);
    }

    let mut intervals = Vec::with_capacity(records.len());
    for rows in by_issue.values_mut() {
        rows.sort_by_key(|r| r.timestamp);
        for (i, current) in rows.iter().enumerate() {
            let end = match rows.get(i + 1) {
                Some(next) => IntervalEnd::Transition(next.timestamp),
                None => IntervalEnd::Current(now),
            };
            intervals.push(Interval {
                issue_key: current.issue_key.clone(),
                status: current.status.clone(),
                start: current.timestamp,
                end,
            });
        }
    }
    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn consecutive_records_bound_each_other() {
        let now = ts(2024, 2, 1);
        let records = vec![
            EventRecord::new("K1", ts(2024, 1, 1), "OPEN"),
            EventRecord::new("K1", ts(2024, 1, 5), "DONE"),
        ];
        let intervals = build_intervals(&records, now);
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].status, "OPEN");
        assert_eq!(intervals[0].end, IntervalEnd::Transition(ts(2024, 1, 5)));
        assert_eq!(intervals[1].status, "DONE");
        assert_eq!(intervals[1].end, IntervalEnd::Current(now));
    }

    #[test]
    fn out_of_order_input_is_sorted_per_issue() {
        let now = ts(2024, 2, 1);
        let records = vec![
            EventRecord::new("K1", ts(2024, 1, 5), "DONE"),
            EventRecord::new("K1", ts(2024, 1, 1), "OPEN"),
        ];
        let intervals = build_intervals(&records, now);
        assert_eq!(intervals[0].status, "OPEN");
        assert_eq!(intervals[1].status, "DONE");
    }

    #[test]
    fn timestamp_ties_keep_input_order() {
        let now = ts(2024, 2, 1);
        let records = vec![
            EventRecord::new("K1", ts(2024, 1, 1), "OPEN"),
            EventRecord::new("K1", ts(2024, 1, 1), "TO-DO"),
        ];
        let intervals = build_intervals(&records, now);
        assert_eq!(intervals[0].status, "OPEN");
        assert_eq!(intervals[1].status, "TO-DO");
        assert_eq!(intervals[1].end, IntervalEnd::Current(now));
    }

    #[test]
    fn single_record_issue_produces_one_open_interval() {
        let now = ts(2024, 3, 1);
        let records = vec![EventRecord::new("K1", ts(2024, 1, 1), "OPEN")];
        let intervals = build_intervals(&records, now);
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].end.is_open());
        assert_eq!(intervals[0].end.instant(), now);
    }

    #[test]
    fn empty_input_produces_no_intervals() {
        assert!(build_intervals(&[], ts(2024, 1, 1)).is_empty());
    }

    #[test]
    fn issues_are_partitioned_independently() {
        let now = ts(2024, 2, 1);
        let records = vec![
            EventRecord::new("K1", ts(2024, 1, 1), "OPEN"),
            EventRecord::new("K2", ts(2024, 1, 2), "OPEN"),
            EventRecord::new("K1", ts(2024, 1, 3), "DONE"),
        ];
        let mut intervals = build_intervals(&records, now);
        intervals.sort_by(|a, b| (&a.issue_key, a.start).cmp(&(&b.issue_key, b.start)));
        assert_eq!(intervals.len(), 3);
        assert_eq!(intervals[0].end, IntervalEnd::Transition(ts(2024, 1, 3)));
        assert_eq!(intervals[2].issue_key, "K2");
        assert!(intervals[2].end.is_open());
    }
}
