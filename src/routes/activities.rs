// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user activity routes.
//!
//! The user id is always taken from the path; nothing here reads ambient
//! "current user" state.

use crate::error::{AppError, Result};
use crate::models::stats::parse_record_date;
use crate::models::{
    aggregate, ActivityCategory, ActivityRecord, FootprintLevel, DEFAULT_CO2E_UNIT,
};
use crate::services::normalizer::{normalize_tagged, RawActivityInput};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_USER_ID_LEN: usize = 64;
const MAX_ENTRIES_PER_REQUEST: usize = 20;

/// Activity routes, scoped by user id.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/{user_id}/activities",
            get(list_activities)
                .post(record_activities)
                .delete(reset_activities),
        )
        .route("/api/users/{user_id}/summary", get(get_summary))
}

fn validate_user_id(user_id: &str) -> Result<()> {
    let valid_chars = user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if user_id.is_empty() || user_id.len() > MAX_USER_ID_LEN || !valid_chars {
        return Err(AppError::BadRequest(format!(
            "Invalid user id: must be 1-{} characters of [A-Za-z0-9_-]",
            MAX_USER_ID_LEN
        )));
    }
    Ok(())
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityRecord>,
    pub total: usize,
}

/// List a user's recorded activities.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ActivitiesResponse>> {
    validate_user_id(&user_id)?;

    let activities = state.store.list(&user_id);
    Ok(Json(ActivitiesResponse {
        total: activities.len(),
        activities,
    }))
}

// ─── Recording ───────────────────────────────────────────────

#[derive(Deserialize)]
struct RecordActivitiesRequest {
    /// Date to record against ("YYYY-MM-DD"); defaults to today (UTC)
    date: Option<String>,
    entries: Vec<ActivityEntry>,
}

#[derive(Deserialize)]
struct ActivityEntry {
    category: String,
    #[serde(flatten)]
    fields: RawActivityInput,
}

#[derive(Serialize)]
pub struct RecordActivitiesResponse {
    pub success: bool,
    pub records: Vec<ActivityRecord>,
    pub total_records: usize,
}

/// Estimate and record one or more activities for a user.
///
/// Every entry is validated before anything is estimated, so a single bad
/// entry rejects the whole batch and nothing is stored.
async fn record_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<RecordActivitiesRequest>,
) -> Result<Json<RecordActivitiesResponse>> {
    validate_user_id(&user_id)?;

    if body.entries.is_empty() {
        return Err(AppError::BadRequest("No activities to record".to_string()));
    }
    if body.entries.len() > MAX_ENTRIES_PER_REQUEST {
        return Err(AppError::BadRequest(format!(
            "At most {} activities per request",
            MAX_ENTRIES_PER_REQUEST
        )));
    }

    let date = match body.date.as_deref() {
        Some(raw) => parse_record_date(raw).ok_or_else(|| {
            AppError::BadRequest("Invalid 'date' parameter: must be YYYY-MM-DD".to_string())
        })?,
        None => chrono::Utc::now().date_naive(),
    };

    let requests = body
        .entries
        .iter()
        .map(|entry| normalize_tagged(&entry.category, &entry.fields))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(requests.len());
    for request in requests {
        let estimate = state.estimator.estimate(&request).await;
        records.push(ActivityRecord::new(date, request, &estimate)?);
    }

    let total_records = state.store.append(&user_id, records.clone());

    tracing::info!(
        user_id = %user_id,
        recorded = records.len(),
        total_records,
        %date,
        "Recorded activities"
    );

    Ok(Json(RecordActivitiesResponse {
        success: true,
        records,
        total_records,
    }))
}

// ─── Reset ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub removed: usize,
}

/// Delete all of a user's activities.
async fn reset_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ResetResponse>> {
    validate_user_id(&user_id)?;

    let removed = state.store.reset(&user_id);
    tracing::info!(user_id = %user_id, removed, "Reset user activities");

    Ok(Json(ResetResponse {
        success: true,
        removed,
    }))
}

// ─── Summary ─────────────────────────────────────────────────

/// One point in a chronological chart series.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeriesPoint {
    /// Day, or the Sunday starting the week ("YYYY-MM-DD")
    pub date: String,
    pub co2e: f64,
}

/// Dashboard summary response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SummaryResponse {
    pub total_co2e: f64,
    pub co2e_unit: String,
    pub level: FootprintLevel,
    pub message: String,
    pub record_count: usize,
    /// Sorted oldest first
    pub daily: Vec<SeriesPoint>,
    /// Sorted oldest first, keyed by week start (Sunday)
    pub weekly: Vec<SeriesPoint>,
    pub by_category: HashMap<ActivityCategory, f64>,
}

fn to_points(series: Vec<(NaiveDate, f64)>) -> Vec<SeriesPoint> {
    series
        .into_iter()
        .map(|(date, co2e)| SeriesPoint {
            date: date.format("%Y-%m-%d").to_string(),
            co2e,
        })
        .collect()
}

/// Aggregate a user's activities for the dashboard charts.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<SummaryResponse>> {
    validate_user_id(&user_id)?;

    let records = state.store.list(&user_id);
    let result = aggregate(&records);
    let total_co2e = result.total();
    let level = FootprintLevel::from_total(total_co2e);

    tracing::debug!(
        user_id = %user_id,
        records = records.len(),
        total_co2e,
        "Computed summary"
    );

    Ok(Json(SummaryResponse {
        total_co2e,
        co2e_unit: DEFAULT_CO2E_UNIT.to_string(),
        level,
        message: level.message().to_string(),
        record_count: records.len(),
        daily: to_points(result.daily_series()),
        weekly: to_points(result.weekly_series()),
        by_category: result.by_category,
    }))
}
