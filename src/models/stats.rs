//! Emission aggregates for dashboard charts.
//!
//! Aggregates are derived from a user's records whenever they are needed
//! and never stored. The maps are unordered: a consumer that wants a
//! chronological chart must sort the keys itself (`daily_series` and
//! `weekly_series` do exactly that).

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{ActivityCategory, ActivityRecord};

/// Per-day, per-week and per-category CO2e totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    /// Total per calendar day
    pub daily: HashMap<NaiveDate, f64>,
    /// Total per week, keyed by the Sunday that starts the week
    pub weekly: HashMap<NaiveDate, f64>,
    /// Total per activity category
    pub by_category: HashMap<ActivityCategory, f64>,
}

impl AggregationResult {
    /// Sum across all categories.
    pub fn total(&self) -> f64 {
        // Fixed order so the float sum is reproducible
        ActivityCategory::ALL
            .iter()
            .filter_map(|c| self.by_category.get(c))
            .sum()
    }

    /// Daily totals in chronological order.
    pub fn daily_series(&self) -> Vec<(NaiveDate, f64)> {
        sorted_series(&self.daily)
    }

    /// Weekly totals in chronological order.
    pub fn weekly_series(&self) -> Vec<(NaiveDate, f64)> {
        sorted_series(&self.weekly)
    }
}

fn sorted_series(map: &HashMap<NaiveDate, f64>) -> Vec<(NaiveDate, f64)> {
    let mut series: Vec<(NaiveDate, f64)> = map.iter().map(|(d, v)| (*d, *v)).collect();
    series.sort_by_key(|(date, _)| *date);
    series
}

/// Fold records into daily, weekly and by-category totals.
///
/// Records with a zero (or otherwise non-positive) co2e never create a
/// bucket. A record whose date does not parse is left out of the daily and
/// weekly totals but still counts toward its category.
pub fn aggregate(records: &[ActivityRecord]) -> AggregationResult {
    let mut result = AggregationResult::default();

    for record in records {
        let co2e = record.co2e;
        if !co2e.is_finite() || co2e <= 0.0 {
            continue;
        }

        *result.by_category.entry(record.category()).or_insert(0.0) += co2e;

        let Some(date) = parse_record_date(&record.date) else {
            tracing::debug!(
                record_id = %record.id,
                date = %record.date,
                "Skipping record with unparsable date"
            );
            continue;
        };

        *result.daily.entry(date).or_insert(0.0) += co2e;
        if let Some(start) = week_start(date) {
            *result.weekly.entry(start).or_insert(0.0) += co2e;
        }
    }

    result
}

const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a record date written exactly as "YYYY-MM-DD".
///
/// Anything else (padding, one-digit months or days, surrounding
/// whitespace) is rejected so that distinct stored strings never share a
/// daily bucket.
pub fn parse_record_date(date: &str) -> Option<NaiveDate> {
    if date.len() != 10 {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(date, RECORD_DATE_FORMAT).ok()?;
    (parsed.format(RECORD_DATE_FORMAT).to_string() == date).then_some(parsed)
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
}

/// How a running total compares to rough personal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum FootprintLevel {
    None,
    Low,
    Moderate,
    High,
}

impl FootprintLevel {
    /// Classify a total in kg CO2e.
    pub fn from_total(total: f64) -> Self {
        if total <= 0.0 {
            FootprintLevel::None
        } else if total < 10.0 {
            FootprintLevel::Low
        } else if total < 50.0 {
            FootprintLevel::Moderate
        } else {
            FootprintLevel::High
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FootprintLevel::None => {
                "No activities recorded yet. Add activities to see your carbon footprint."
            }
            FootprintLevel::Low => "Great job! You're keeping your footprint low.",
            FootprintLevel::Moderate => "Consider reducing your daily emissions.",
            FootprintLevel::High => "Your footprint is high. Focus on reducing emissions.",
        }
    }
}
