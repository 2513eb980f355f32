//! Performance benchmarks for the Leave Entitlement Engine.
//!
//! Covers a single annual leave request, parental usage over growing
//! numbers of periods, vacation planning over growing lengths, and a batch
//! of 1000 annual leave requests.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use leave_engine::calculation::add_months;
use leave_engine::config::ConfigLoader;
use leave_engine::engine::LeaveEngine;
use leave_engine::models::{EmploymentProfile, EmploymentType, RawPeriod, RawUsageEntry};

/// Creates an engine with loaded configuration.
fn create_test_engine() -> LeaveEngine {
    let config =
        ConfigLoader::load("./config/kr_labor_standards").expect("Failed to load config");
    LeaveEngine::from_config(config)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Creates a profile with the given months of service.
fn create_profile(months: u32, part_time: bool) -> EmploymentProfile {
    let hire = date(2010, 3, 1);
    let (employment_type, hours) = if part_time {
        (EmploymentType::PartTime, Some(Decimal::from(24)))
    } else {
        (EmploymentType::FullTime, None)
    };
    let reference = add_months(hire, months).expect("date in range");
    EmploymentProfile::new(hire, reference, employment_type, hours).expect("valid profile")
}

/// Creates `count` half-day usage entries on consecutive days.
fn create_entries(count: usize) -> Vec<RawUsageEntry> {
    date(2024, 1, 2)
        .iter_days()
        .take(count)
        .map(|day| RawUsageEntry::new(day, Decimal::new(5, 1), "bench"))
        .collect()
}

/// Creates `count` non-overlapping month-long periods in reverse order.
fn create_periods(count: usize) -> Vec<RawPeriod> {
    let base = date(2020, 1, 10);
    let mut periods: Vec<RawPeriod> = (0..count as u32)
        .map(|i| {
            let start = add_months(base, i * 2).expect("date in range");
            RawPeriod::new(start, add_months(start, 1).expect("date in range"))
        })
        .collect();
    periods.reverse();
    periods
}

/// Benchmark: one accrual plus ledger request.
fn bench_annual_leave(c: &mut Criterion) {
    let engine = create_test_engine();
    let profile = create_profile(62, false);
    let entries = create_entries(10);

    c.bench_function("annual_leave_10_entries", |b| {
        b.iter(|| black_box(engine.annual_leave(black_box(&profile), black_box(&entries))))
    });
}

/// Benchmark: parental usage as the number of periods grows.
fn bench_parental_usage(c: &mut Criterion) {
    let engine = create_test_engine();
    let mut group = c.benchmark_group("parental_usage");

    for count in [1usize, 3, 6, 12].iter() {
        let periods = create_periods(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("periods", count), count, |b, _| {
            b.iter(|| black_box(engine.parental_usage(black_box(&periods))))
        });
    }

    group.finish();
}

/// Benchmark: vacation planning as the requested length grows.
fn bench_vacation_plan(c: &mut Criterion) {
    let engine = create_test_engine();
    let start = Some(date(2024, 3, 1));
    let mut group = c.benchmark_group("vacation_plan");

    for days in [1i64, 5, 15, 25].iter() {
        let requested = Decimal::from(*days);
        group.bench_with_input(BenchmarkId::new("days", days), days, |b, _| {
            b.iter(|| {
                black_box(engine.plan_vacation(Decimal::from(25), start, black_box(requested)))
            })
        });
    }

    group.finish();
}

/// Benchmark: batch of 1000 annual leave requests.
fn bench_batch_1000(c: &mut Criterion) {
    let engine = create_test_engine();
    let entries = create_entries(4);
    let profiles: Vec<EmploymentProfile> = (0..1000u32)
        .map(|i| create_profile(12 + i % 300, i % 3 == 0))
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("annual_leave_1000", |b| {
        b.iter(|| {
            let results: Vec<_> = profiles
                .iter()
                .map(|profile| engine.annual_leave(profile, &entries))
                .collect();
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_annual_leave,
    bench_parental_usage,
    bench_vacation_plan,
    bench_batch_1000,
);
criterion_main!(benches);
