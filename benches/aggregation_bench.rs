use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use riskboard::aggregation::{top_risks, RiskMatrix, TimestampedScore, TrendAggregator};
use riskboard::config::RiskboardConfig;
use riskboard::dashboard::{Dashboard, DashboardSnapshot};
use riskboard::{Rating, Risk, RiskStatus};
use std::hint::black_box;

fn create_risks(count: usize) -> Vec<Risk> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let status = if i % 7 == 0 {
                RiskStatus::Mitigated
            } else {
                RiskStatus::Active
            };
            Risk::new(
                format!("R-{i}"),
                Rating::new((i % 5 + 1) as i64).unwrap(),
                Rating::new((i / 5 % 5 + 1) as i64).unwrap(),
                start + Duration::minutes(i as i64),
            )
            .with_status(status)
        })
        .collect()
}

fn create_history(days: i64) -> Vec<TimestampedScore> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..days * 4)
        .map(|i| TimestampedScore {
            timestamp: start + Duration::hours(i * 6),
            score: (i % 25) as f64,
        })
        .collect()
}

fn benchmark_matrix(c: &mut Criterion) {
    let risks = create_risks(10_000);
    c.bench_function("matrix_aggregate_10k", |b| {
        b.iter(|| RiskMatrix::aggregate(black_box(&risks)))
    });
}

fn benchmark_ranking(c: &mut Criterion) {
    let risks = create_risks(10_000);
    c.bench_function("top_risks_10k", |b| {
        b.iter(|| top_risks(black_box(&risks), 10))
    });
}

fn benchmark_trend(c: &mut Criterion) {
    let history = create_history(365);
    let aggregator = TrendAggregator::default();
    c.bench_function("trend_daily_year", |b| {
        b.iter(|| aggregator.trend(black_box(&history)))
    });
}

fn benchmark_dashboard(c: &mut Criterion) {
    let dashboard = Dashboard::new(&RiskboardConfig::default()).unwrap();
    let snapshot = DashboardSnapshot {
        risks: create_risks(10_000),
        history: create_history(365),
        ..DashboardSnapshot::default()
    };
    c.bench_function("dashboard_build_10k", |b| {
        b.iter(|| dashboard.build(black_box(&snapshot)))
    });
}

criterion_group!(
    benches,
    benchmark_matrix,
    benchmark_ranking,
    benchmark_trend,
    benchmark_dashboard
);
criterion_main!(benches);
