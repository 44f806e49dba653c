//! Window statistics over a candidate set.
//!
//! Candidates are rolls that overlap the window (see [`crate::planner`]).
//! Everything here is a pure function of the candidates, the window and the
//! reporting zone.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::roll::Roll;
use crate::window::TimeWindow;
use crate::zone::ReportingZone;

/// Aggregates for one query window.
///
/// `None` means "no data", which is distinct from a zero value:
/// - averages, extrema and `total_weight` are `None` when there are no candidates,
/// - life spans are `None` when nothing was deleted inside the window,
/// - day fields are `None` when no day had anything on stock.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatisticsReport {
    pub added_count: u64,
    pub deleted_count: u64,
    pub average_length: Option<f64>,
    pub average_weight: Option<f64>,
    pub min_length: Option<Decimal>,
    pub max_length: Option<Decimal>,
    pub min_weight: Option<Decimal>,
    pub max_weight: Option<Decimal>,
    pub total_weight: Option<Decimal>,
    pub min_life_span_seconds: Option<i64>,
    pub max_life_span_seconds: Option<i64>,
    pub day_with_min_count: Option<NaiveDate>,
    pub day_with_max_count: Option<NaiveDate>,
    pub day_with_min_weight: Option<NaiveDate>,
    pub day_with_max_weight: Option<NaiveDate>,
}

/// Rolls on stock at some instant of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySnapshot {
    pub day: NaiveDate,
    pub count: u64,
    pub weight: Decimal,
}

/// Compute the full report for `window`.
///
/// `candidates` must already be overlap-filtered; rolls that do not overlap
/// the window would still be counted in averages and extrema.
pub fn compute_statistics(
    candidates: &[Roll],
    window: &TimeWindow,
    zone: ReportingZone,
) -> StatisticsReport {
    let mut report = StatisticsReport {
        added_count: candidates
            .iter()
            .filter(|r| window.contains(r.add_time()))
            .count() as u64,
        ..StatisticsReport::default()
    };

    let life_spans: Vec<i64> = candidates
        .iter()
        .filter(|r| r.delete_time().is_some_and(|d| window.contains(d)))
        .filter_map(Roll::life_span_seconds)
        .collect();
    report.deleted_count = life_spans.len() as u64;
    report.min_life_span_seconds = life_spans.iter().copied().min();
    report.max_life_span_seconds = life_spans.iter().copied().max();

    if !candidates.is_empty() {
        let lengths: Vec<Decimal> = candidates.iter().map(|r| r.length().value()).collect();
        let weights: Vec<Decimal> = candidates.iter().map(|r| r.weight().value()).collect();

        report.average_length = mean(&lengths);
        report.average_weight = mean(&weights);
        report.min_length = lengths.iter().copied().min();
        report.max_length = lengths.iter().copied().max();
        report.min_weight = weights.iter().copied().min();
        report.max_weight = weights.iter().copied().max();
        report.total_weight = Some(weights.iter().copied().sum());
    }

    let mut by_count = DayExtremes::new(0u64);
    let mut by_weight = DayExtremes::new(Decimal::ZERO);
    for snapshot in day_series(candidates, *window, zone) {
        by_count.observe(snapshot.day, snapshot.count);
        by_weight.observe(snapshot.day, snapshot.weight);
    }

    (report.day_with_min_count, report.day_with_max_count) = by_count.days();
    (report.day_with_min_weight, report.day_with_max_weight) = by_weight.days();

    report
}

/// One snapshot per calendar day from the day of `window.start()` through the
/// day of `window.end()` (both in `zone`), ascending.
///
/// Presence per day is recomputed from scratch: O(days × candidates).
/// Allocates one entry per day; bound the window before calling.
pub fn daily_snapshots(
    candidates: &[Roll],
    window: &TimeWindow,
    zone: ReportingZone,
) -> Vec<DailySnapshot> {
    day_series(candidates, *window, zone).collect()
}

fn day_series(
    candidates: &[Roll],
    window: TimeWindow,
    zone: ReportingZone,
) -> impl Iterator<Item = DailySnapshot> + '_ {
    let last = zone.local_date(window.end());

    zone.local_date(window.start())
        .iter_days()
        .take_while(move |day| *day <= last)
        .map(move |day| {
            let bounds = zone.day_window(day);
            let (count, weight) = candidates
                .iter()
                .filter(|r| r.overlaps(&bounds))
                .fold((0u64, Decimal::ZERO), |(n, w), r| (n + 1, w + r.weight().value()));
            DailySnapshot { day, count, weight }
        })
}

fn mean(values: &[Decimal]) -> Option<f64> {
    let sum: Decimal = values.iter().copied().sum();
    sum.checked_div(Decimal::from(values.len() as u64))
        .and_then(|avg| avg.to_f64())
}

/// Running smallest and largest value above `zero`, with the day it fell on.
///
/// Zero days never qualify. Days arrive in ascending order and comparisons are
/// strict, so ties go to the earliest day.
struct DayExtremes<T> {
    zero: T,
    min: Option<(NaiveDate, T)>,
    max: Option<(NaiveDate, T)>,
}

impl<T: PartialOrd + Copy> DayExtremes<T> {
    fn new(zero: T) -> Self {
        Self {
            zero,
            min: None,
            max: None,
        }
    }

    fn observe(&mut self, day: NaiveDate, value: T) {
        if value <= self.zero {
            return;
        }
        if self.min.is_none_or(|(_, m)| value < m) {
            self.min = Some((day, value));
        }
        if self.max.is_none_or(|(_, m)| value > m) {
            self.max = Some((day, value));
        }
    }

    fn days(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.min.map(|(d, _)| d), self.max.map(|(d, _)| d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::select_candidates;
    use crate::roll::test_support::*;
    use core::str::FromStr;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(at(start), at(end)).unwrap()
    }

    fn stats(all: &[Roll], w: &TimeWindow) -> StatisticsReport {
        compute_statistics(&select_candidates(all, w), w, ReportingZone::utc())
    }

    #[test]
    fn single_roll_added_inside_window() {
        let w = window("2026-01-01T00:00", "2026-02-08T00:00");
        let r = stats(&[roll(1, "12.5", "340.25", "2026-01-15T12:00", None)], &w);

        assert_eq!(r.added_count, 1);
        assert_eq!(r.deleted_count, 0);
        assert_eq!(r.average_length, Some(12.5));
        assert_eq!(r.total_weight, Some(dec("340.25")));
        assert_eq!(r.min_length, Some(dec("12.5")));
        assert_eq!(r.max_weight, Some(dec("340.25")));
        assert_eq!(r.min_life_span_seconds, None);
    }

    #[test]
    fn two_rolls_average_and_total() {
        let w = window("2026-01-01T00:00", "2026-02-08T00:00");
        let r = stats(
            &[
                roll(1, "10", "100", "2026-01-10T08:00", None),
                roll(2, "20", "200", "2026-01-20T08:00", None),
            ],
            &w,
        );

        assert_eq!(r.added_count, 2);
        assert_eq!(r.average_length, Some(15.0));
        assert_eq!(r.average_weight, Some(150.0));
        assert_eq!(r.total_weight, Some(dec("300")));
        assert_eq!(r.min_length, Some(dec("10")));
        assert_eq!(r.max_length, Some(dec("20")));
    }

    #[test]
    fn roll_added_before_window_counts_as_present_not_added() {
        let w = window("2026-01-01T00:00", "2026-02-08T00:00");
        let r = stats(&[roll(1, "7", "70", "2025-12-31T23:59", None)], &w);

        assert_eq!(r.added_count, 0);
        assert_eq!(r.average_length, Some(7.0));
        assert_eq!(r.total_weight, Some(dec("70")));
    }

    #[test]
    fn life_span_of_roll_deleted_inside_window() {
        let w = window("2026-01-01T00:00", "2026-01-31T00:00");
        let r = stats(
            &[roll(1, "10", "100", "2026-01-01T10:00", Some("2026-01-01T10:10"))],
            &w,
        );

        assert_eq!(r.deleted_count, 1);
        assert_eq!(r.min_life_span_seconds, Some(600));
        assert_eq!(r.max_life_span_seconds, Some(600));
    }

    #[test]
    fn life_spans_only_from_deletions_inside_window() {
        let w = window("2026-01-10T00:00", "2026-01-20T00:00");
        let r = stats(
            &[
                // deleted inside: 1 day
                roll(1, "1", "1", "2026-01-09T00:00", Some("2026-01-10T00:00")),
                // deleted inside: 2 hours
                roll(2, "1", "1", "2026-01-15T00:00", Some("2026-01-15T02:00")),
                // deleted after the window: present, but no life span
                roll(3, "1", "1", "2026-01-01T00:00", Some("2026-01-25T00:00")),
            ],
            &w,
        );

        assert_eq!(r.deleted_count, 2);
        assert_eq!(r.min_life_span_seconds, Some(7_200));
        assert_eq!(r.max_life_span_seconds, Some(86_400));
        assert_eq!(r.average_length, Some(1.0));
        assert_eq!(r.total_weight, Some(dec("3")));
    }

    #[test]
    fn empty_window_reports_absent_values_not_zero() {
        let w = window("2026-01-01T00:00", "2026-02-08T00:00");
        let r = stats(&[roll(1, "10", "100", "2026-03-01T00:00", None)], &w);

        assert_eq!(r.added_count, 0);
        assert_eq!(r.deleted_count, 0);
        assert_eq!(r.average_length, None);
        assert_eq!(r.average_weight, None);
        assert_eq!(r.min_length, None);
        assert_eq!(r.max_weight, None);
        assert_eq!(r.total_weight, None);
        assert_eq!(r.day_with_min_count, None);
        assert_eq!(r.day_with_max_weight, None);

        let json = serde_json::to_value(&r).unwrap();
        assert!(json["total_weight"].is_null());
        assert_eq!(json["added_count"], 0);
    }

    #[test]
    fn daily_extremes_skip_empty_days_and_prefer_earliest_tie() {
        let w = window("2026-01-01T00:00", "2026-01-05T12:00");
        let all = [
            // on stock 01-02 .. 01-03
            roll(1, "1", "10", "2026-01-02T09:00", Some("2026-01-03T09:00")),
            // on stock 01-03 only
            roll(2, "1", "30", "2026-01-03T10:00", Some("2026-01-03T11:00")),
            // on stock 01-04 onward
            roll(3, "1", "10", "2026-01-04T00:00", None),
        ];
        let candidates = select_candidates(&all, &w);

        let days = daily_snapshots(&candidates, &w, ReportingZone::utc());
        let counts: Vec<(NaiveDate, u64)> = days.iter().map(|s| (s.day, s.count)).collect();
        assert_eq!(
            counts,
            vec![
                (day("2026-01-01"), 0),
                (day("2026-01-02"), 1),
                (day("2026-01-03"), 2),
                (day("2026-01-04"), 1),
                (day("2026-01-05"), 1),
            ]
        );

        let r = compute_statistics(&candidates, &w, ReportingZone::utc());
        // 01-01 is empty and must not win the minimum
        assert_eq!(r.day_with_min_count, Some(day("2026-01-02")));
        assert_eq!(r.day_with_max_count, Some(day("2026-01-03")));
        assert_eq!(r.day_with_min_weight, Some(day("2026-01-02")));
        assert_eq!(r.day_with_max_weight, Some(day("2026-01-03")));
    }

    #[test]
    fn ties_for_either_extreme_go_to_the_earliest_day() {
        let w = window("2026-01-01T00:00", "2026-01-04T12:00");
        let all = [
            roll(1, "1", "10", "2026-01-01T08:00", Some("2026-01-01T09:00")),
            roll(2, "1", "20", "2026-01-02T08:00", Some("2026-01-02T09:00")),
            roll(3, "1", "30", "2026-01-02T10:00", Some("2026-01-02T11:00")),
            roll(4, "1", "25", "2026-01-03T08:00", Some("2026-01-03T09:00")),
            roll(5, "1", "25", "2026-01-03T10:00", Some("2026-01-03T11:00")),
            roll(6, "1", "10", "2026-01-04T08:00", Some("2026-01-04T09:00")),
        ];
        let candidates = select_candidates(&all, &w);

        let days = daily_snapshots(&candidates, &w, ReportingZone::utc());
        let series: Vec<(u64, Decimal)> = days.iter().map(|s| (s.count, s.weight)).collect();
        assert_eq!(
            series,
            vec![(1, dec("10")), (2, dec("50")), (2, dec("50")), (1, dec("10"))]
        );

        let r = compute_statistics(&candidates, &w, ReportingZone::utc());
        assert_eq!(r.day_with_max_count, Some(day("2026-01-02")));
        assert_eq!(r.day_with_max_weight, Some(day("2026-01-02")));
        assert_eq!(r.day_with_min_count, Some(day("2026-01-01")));
        assert_eq!(r.day_with_min_weight, Some(day("2026-01-01")));
    }

    #[test]
    fn day_boundaries_follow_reporting_zone() {
        // 22:30 UTC on Dec 31 is already Jan 1 in UTC+3
        let w = window("2025-12-31T00:00", "2026-01-01T20:00");
        let all = [roll(1, "1", "5", "2025-12-31T22:30", None)];
        let candidates = select_candidates(&all, &w);

        let utc = compute_statistics(&candidates, &w, ReportingZone::utc());
        assert_eq!(utc.day_with_min_count, Some(day("2025-12-31")));

        let moscow: ReportingZone = "+03:00".parse().unwrap();
        let local = daily_snapshots(&candidates, &w, moscow);
        assert_eq!(local.first().map(|s| (s.day, s.count)), Some((day("2025-12-31"), 0)));
        assert_eq!(local.last().map(|s| (s.day, s.count)), Some((day("2026-01-01"), 1)));

        let r = compute_statistics(&candidates, &w, moscow);
        assert_eq!(r.day_with_min_count, Some(day("2026-01-01")));
        assert_eq!(r.day_with_max_count, Some(day("2026-01-01")));
    }

    #[test]
    fn roll_deleted_at_midnight_counts_for_that_day() {
        let w = window("2026-01-01T00:00", "2026-01-02T23:00");
        let all = [roll(1, "1", "1", "2025-12-20T00:00", Some("2026-01-02T00:00"))];
        let days = daily_snapshots(&select_candidates(&all, &w), &w, ReportingZone::utc());
        assert_eq!(days.iter().map(|s| s.count).collect::<Vec<_>>(), vec![1, 1]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: counts partition the candidates and extremes never land on empty days.
        #[test]
        fn counts_partition_and_extremes_are_populated(
            spans in prop::collection::vec((0i64..60 * 86_400, proptest::option::of(0i64..20 * 86_400)), 0..40),
            window_start in 0i64..40 * 86_400,
            window_len in 0i64..20 * 86_400,
        ) {
            let base = at("2026-01-01T00:00");
            let all: Vec<Roll> = spans
                .iter()
                .enumerate()
                .map(|(i, (add, life))| {
                    let add_time = base + chrono::Duration::seconds(*add);
                    Roll::from_parts(
                        rollstock_core::RollId::new(i as u64 + 1),
                        measure("1.5"),
                        measure("2"),
                        add_time,
                        life.map(|l| add_time + chrono::Duration::seconds(l)),
                    )
                })
                .collect();

            let start = base + chrono::Duration::seconds(window_start);
            let w = TimeWindow::new(start, start + chrono::Duration::seconds(window_len)).unwrap();
            let candidates = select_candidates(&all, &w);
            let r = compute_statistics(&candidates, &w, ReportingZone::utc());

            let not_added = candidates.iter().filter(|c| !w.contains(c.add_time())).count() as u64;
            prop_assert_eq!(r.added_count + not_added, candidates.len() as u64);
            prop_assert!(r.deleted_count <= candidates.len() as u64);
            prop_assert_eq!(r.total_weight.is_some(), !candidates.is_empty());

            let days = daily_snapshots(&candidates, &w, ReportingZone::utc());
            for picked in [r.day_with_min_count, r.day_with_max_count, r.day_with_min_weight, r.day_with_max_weight]
                .into_iter()
                .flatten()
            {
                let snapshot = days.iter().find(|s| s.day == picked).unwrap();
                prop_assert!(snapshot.count > 0);
                prop_assert!(snapshot.weight > Decimal::ZERO);
            }
        }
    }
}
