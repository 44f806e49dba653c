use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use rollstock_core::RollId;
use rollstock_infra::{InMemoryRollStore, RollService, RollStore};
use rollstock_inventory::{
    Measure, ReportingZone, Roll, TimeWindow, compute_statistics, overlap_predicate,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// `n` rolls spread over ~120 days; every third one still on stock.
fn seeded_rolls(n: u64) -> Vec<Roll> {
    (1..=n)
        .map(|i| {
            let add = base() + Duration::minutes((i * 97 % (120 * 24 * 60)) as i64);
            let delete = (i % 3 != 0).then(|| add + Duration::hours((i % 240) as i64));
            Roll::from_parts(
                RollId::new(i),
                Measure::new("length", Decimal::new((i % 5000 + 1) as i64, 1)).unwrap(),
                Measure::new("weight", Decimal::new((i % 90000 + 1) as i64, 2)).unwrap(),
                add,
                delete,
            )
        })
        .collect()
}

fn bench_statistics_by_window_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics_by_window_days");
    let rolls = seeded_rolls(10_000);

    for days in [1i64, 7, 30, 90] {
        let window = TimeWindow::new(base(), base() + Duration::days(days)).unwrap();
        let candidates: Vec<Roll> = rolls.iter().filter(|r| r.overlaps(&window)).cloned().collect();

        group.throughput(Throughput::Elements(candidates.len() as u64 * days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &candidates, |b, candidates| {
            b.iter(|| compute_statistics(black_box(candidates), &window, ReportingZone::utc()));
        });
    }

    group.finish();
}

fn bench_service_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("service_statistics");
    group.sample_size(50);

    for n in [1_000u64, 10_000, 50_000] {
        let service = RollService::new(
            InMemoryRollStore::from_rolls(seeded_rolls(n)),
            ReportingZone::utc(),
        );
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &service, |b, service| {
            b.iter(|| {
                service
                    .statistics(black_box(base()), base() + Duration::days(30))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_overlap_selection(c: &mut Criterion) {
    let store = InMemoryRollStore::from_rolls(seeded_rolls(50_000));
    let window = TimeWindow::new(base() + Duration::days(10), base() + Duration::days(40)).unwrap();
    let predicate = overlap_predicate(window);

    c.bench_function("find_all_overlapping_50k", |b| {
        b.iter(|| store.find_all(black_box(&predicate)).unwrap().len());
    });
}

criterion_group!(
    benches,
    bench_statistics_by_window_length,
    bench_service_statistics,
    bench_overlap_selection
);
criterion_main!(benches);
