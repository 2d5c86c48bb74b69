// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission estimate model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Unit used for every locally computed estimate.
pub const DEFAULT_CO2E_UNIT: &str = "kg";

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Remote,
    Fallback,
}

/// A CO2-equivalent estimate for one activity.
///
/// `co2e` is always finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionEstimate {
    pub co2e: f64,
    pub co2e_unit: String,
    pub source: EstimateSource,
}

impl EmissionEstimate {
    /// A locally computed estimate in kilograms.
    pub fn fallback(co2e: f64) -> Self {
        Self {
            co2e,
            co2e_unit: DEFAULT_CO2E_UNIT.to_string(),
            source: EstimateSource::Fallback,
        }
    }
}
