use carbon_tracker::models::{aggregate, ActivityRecord, ActivityRequest};
use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A year of daily activity: one commute, one electricity reading and one meal per day.
fn year_of_records() -> Vec<ActivityRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let mut records = Vec::new();

    for day in 0..365u64 {
        let date = (start + Days::new(day)).format("%Y-%m-%d").to_string();
        let requests = [
            ActivityRequest::Commute {
                vehicle_type: "car".to_string(),
                distance: 10.0 + (day % 7) as f64,
                distance_unit: "km".to_string(),
            },
            ActivityRequest::Electricity {
                energy: 8.0,
                energy_unit: "kWh".to_string(),
            },
            ActivityRequest::Food {
                food_type: "chicken".to_string(),
                weight: 0.3,
                weight_unit: "kg".to_string(),
            },
        ];

        for (i, request) in requests.into_iter().enumerate() {
            records.push(ActivityRecord {
                id: format!("{}-{}", day, i),
                date: date.clone(),
                co2e: request.quantity(),
                co2e_unit: "kg".to_string(),
                request,
            });
        }
    }

    records
}

fn benchmark_aggregate(c: &mut Criterion) {
    let records = year_of_records();

    let mut group = c.benchmark_group("aggregate");

    group.bench_function("year_of_records", |b| {
        b.iter(|| aggregate(black_box(&records)))
    });

    group.bench_function("year_of_records_sorted_series", |b| {
        b.iter(|| {
            let result = aggregate(black_box(&records));
            (result.daily_series(), result.weekly_series())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_aggregate);
criterion_main!(benches);
