// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stateless estimate and offset routes.

use crate::error::{AppError, Result};
use crate::models::{
    ActivityCategory, ActivityRequest, EmissionEstimate, EstimateSource, OffsetProject,
    OffsetSource,
};
use crate::services::normalizer::{normalize, RawActivityInput};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Estimate routes (public).
///
/// `/api/calculate/*` is kept for older clients.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/estimate/{category}", post(estimate_activity))
        .route("/api/calculate/{category}", post(estimate_activity))
        .route("/api/offsets", get(get_offsets))
}

// ─── Estimates ───────────────────────────────────────────────

/// Category-specific fields echoed back with an estimate.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "activity", rename_all = "lowercase")]
pub enum EstimatedActivity {
    Commute {
        #[serde(rename = "vehicleType")]
        vehicle_type: String,
        distance: f64,
    },
    Electricity {
        energy: f64,
    },
    Food {
        #[serde(rename = "foodType")]
        food_type: String,
        quantity: f64,
    },
}

impl From<&ActivityRequest> for EstimatedActivity {
    fn from(request: &ActivityRequest) -> Self {
        match request {
            ActivityRequest::Commute {
                vehicle_type,
                distance,
                ..
            } => EstimatedActivity::Commute {
                vehicle_type: vehicle_type.clone(),
                distance: *distance,
            },
            ActivityRequest::Electricity { energy, .. } => {
                EstimatedActivity::Electricity { energy: *energy }
            }
            ActivityRequest::Food {
                food_type, weight, ..
            } => EstimatedActivity::Food {
                food_type: food_type.clone(),
                quantity: *weight,
            },
        }
    }
}

/// Estimate response.
#[derive(Serialize, Debug)]
pub struct EstimateResponse {
    pub success: bool,
    pub co2e: f64,
    pub co2e_unit: String,
    pub source: EstimateSource,
    #[serde(flatten)]
    pub activity: EstimatedActivity,
}

impl EstimateResponse {
    fn new(request: &ActivityRequest, estimate: EmissionEstimate) -> Self {
        Self {
            success: true,
            co2e: estimate.co2e,
            co2e_unit: estimate.co2e_unit,
            source: estimate.source,
            activity: EstimatedActivity::from(request),
        }
    }
}

/// Estimate emissions for one activity without recording it.
async fn estimate_activity(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Json(raw): Json<RawActivityInput>,
) -> Result<Json<EstimateResponse>> {
    let category: ActivityCategory = category
        .parse()
        .map_err(|e: crate::models::UnknownCategory| AppError::UnknownCategory(e.0))?;

    let request = normalize(category, &raw)?;
    let estimate = state.estimator.estimate(&request).await;

    tracing::debug!(
        category = %category,
        co2e = estimate.co2e,
        source = ?estimate.source,
        "Estimated activity"
    );

    Ok(Json(EstimateResponse::new(&request, estimate)))
}

// ─── Offsets ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OffsetsResponse {
    pub success: bool,
    pub projects: Vec<OffsetProject>,
    pub source: OffsetSource,
}

/// Suggested offset projects (static list if the registry is down).
async fn get_offsets(State(state): State<Arc<AppState>>) -> Json<OffsetsResponse> {
    let list = state.offsets.list_projects().await;
    Json(OffsetsResponse {
        success: true,
        projects: list.projects,
        source: list.source,
    })
}
