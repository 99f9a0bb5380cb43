//! Layout performance benchmarks.
//!
//! Measures `compute_layout` on dense day columns, where overlap clusters force many tree
//! building passes.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use timegrid::layout::{compute_layout, FnAccessors};
use timegrid::slots::{DaySlotMetrics, LinearSlotMetrics};
use timegrid::{CalendarEvent, CalendarEventAccessors};

/// Deterministic pseudo-random spans over one day, in minutes.
fn generate_spans(count: usize) -> Vec<(i64, i64)> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let start = (state % 1_380) as i64;
            let length = 15 + (state >> 32) as i64 % 120;
            (start * 60_000, (start + length) * 60_000)
        })
        .collect()
}

fn generate_day(count: usize) -> Vec<CalendarEvent> {
    let day = NaiveDate::from_ymd_opt(2025, 3, 4)
        .unwrap()
        .and_time(NaiveTime::MIN);
    generate_spans(count)
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| {
            CalendarEvent::new(
                format!("Event {}", i),
                day + Duration::milliseconds(start),
                day + Duration::milliseconds(end),
            )
        })
        .collect()
}

/// Benchmark the core over raw millisecond spans with varying density.
fn benchmark_linear_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_linear");
    let metrics = LinearSlotMetrics::new(0, 1_440 * 60_000).expect("positive span");
    let accessors = FnAccessors::new(|e: &(i64, i64)| e.0, |e: &(i64, i64)| e.1);

    for count in [10, 100, 500] {
        let spans = generate_spans(count);
        group.bench_with_input(BenchmarkId::new("events", count), &spans, |b, spans| {
            b.iter(|| compute_layout(black_box(spans), 30 * 60_000, &metrics, &accessors))
        });
    }

    group.finish();
}

/// Benchmark a full calendar day through `DaySlotMetrics`.
fn benchmark_calendar_day(c: &mut Criterion) {
    let events = generate_day(200);
    let metrics = DaySlotMetrics::new(
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        NaiveTime::MIN,
        NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        30,
        2,
    )
    .expect("valid grid");
    let threshold = metrics.default_minimum_start_difference();

    c.bench_function("layout_calendar_day_200", |b| {
        b.iter(|| {
            compute_layout(
                black_box(&events),
                threshold,
                &metrics,
                &CalendarEventAccessors,
            )
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(5));
    targets = benchmark_linear_columns, benchmark_calendar_day
}
criterion_main!(benches);
