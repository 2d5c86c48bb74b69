// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validation of raw activity input.
//!
//! Turns loosely-typed form fields into an [`ActivityRequest`]. Quantities
//! may arrive as JSON numbers or as strings (HTML number inputs post
//! strings); anything that is not a finite number greater than zero is
//! rejected here so the estimator never sees it.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{ActivityCategory, ActivityRequest, UnknownCategory};

pub const DEFAULT_VEHICLE_TYPE: &str = "car";
pub const DEFAULT_FOOD_TYPE: &str = "vegetables";
pub const DEFAULT_DISTANCE_UNIT: &str = "km";
pub const DEFAULT_ENERGY_UNIT: &str = "kWh";
pub const DEFAULT_WEIGHT_UNIT: &str = "kg";

/// Raw fields for a single activity as submitted by a client.
///
/// Which fields matter depends on the category; the rest are ignored.
/// Labels are kept as raw JSON so a non-string label falls back to its
/// default instead of failing the whole request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityInput {
    pub vehicle_type: Option<Value>,
    pub distance: Option<Value>,
    pub energy: Option<Value>,
    pub food_type: Option<Value>,
    pub quantity: Option<Value>,
    pub unit: Option<Value>,
}

/// Why raw input could not become a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid quantity for '{field}': must be a number greater than 0")]
    InvalidQuantity { field: &'static str },

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Validate raw input for a category.
pub fn normalize(
    category: ActivityCategory,
    raw: &RawActivityInput,
) -> Result<ActivityRequest, NormalizeError> {
    let request = match category {
        ActivityCategory::Commute => ActivityRequest::Commute {
            distance: parse_quantity("distance", raw.distance.as_ref())?,
            vehicle_type: label_or(raw.vehicle_type.as_ref(), DEFAULT_VEHICLE_TYPE),
            distance_unit: label_or(raw.unit.as_ref(), DEFAULT_DISTANCE_UNIT),
        },
        ActivityCategory::Electricity => ActivityRequest::Electricity {
            energy: parse_quantity("energy", raw.energy.as_ref())?,
            energy_unit: label_or(raw.unit.as_ref(), DEFAULT_ENERGY_UNIT),
        },
        ActivityCategory::Food => ActivityRequest::Food {
            weight: parse_quantity("quantity", raw.quantity.as_ref())?,
            food_type: label_or(raw.food_type.as_ref(), DEFAULT_FOOD_TYPE),
            weight_unit: label_or(raw.unit.as_ref(), DEFAULT_WEIGHT_UNIT),
        },
    };
    Ok(request)
}

/// Validate raw input for a category given by its string tag.
pub fn normalize_tagged(
    category: &str,
    raw: &RawActivityInput,
) -> Result<ActivityRequest, NormalizeError> {
    let category: ActivityCategory = category.parse()?;
    normalize(category, raw)
}

/// Parse a quantity that must be finite and strictly positive.
fn parse_quantity(field: &'static str, value: Option<&Value>) -> Result<f64, NormalizeError> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(q) if q.is_finite() && q > 0.0 => Ok(q),
        _ => Err(NormalizeError::InvalidQuantity { field }),
    }
}

/// A trimmed, non-empty string label, or `default` for anything else.
fn label_or(label: Option<&Value>, default: &str) -> String {
    match label.and_then(Value::as_str).map(str::trim) {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => default.to_string(),
    }
}
