// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission estimation service.
//!
//! Tries Climatiq first and falls back to the local factor table on any
//! failure, so a validated request always gets a usable estimate. The
//! fallback happens at most once per request and is never retried.

use crate::config::Config;
use crate::models::{ActivityRequest, EmissionEstimate};
use crate::services::climatiq::{ClimatiqClient, EstimateParameters, RemoteError};
use crate::services::factors::FactorKey;

/// Estimates emissions for validated activity requests.
#[derive(Clone)]
pub struct Estimator {
    remote: Option<ClimatiqClient>,
}

impl Estimator {
    pub fn new(remote: Option<ClimatiqClient>) -> Self {
        Self { remote }
    }

    /// An estimator that only uses local factors.
    pub fn offline() -> Self {
        Self { remote: None }
    }

    /// Build from configuration; remote calls are skipped when disabled.
    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        if !config.remote_enabled {
            return Ok(Self::offline());
        }

        let client = ClimatiqClient::new(
            config.climatiq_api_key.clone(),
            config.climatiq_base_url.clone(),
            config.upstream_timeout,
        )?;
        Ok(Self::new(Some(client)))
    }

    /// Estimate emissions for a request. Never fails.
    pub async fn estimate(&self, request: &ActivityRequest) -> EmissionEstimate {
        let key = FactorKey::for_request(request);

        match self.estimate_remote(key, request).await {
            Ok(estimate) => {
                tracing::debug!(
                    category = %request.category(),
                    co2e = estimate.co2e,
                    "Remote estimate"
                );
                estimate
            }
            Err(e) if e.is_unconfigured() => {
                tracing::debug!(
                    category = %request.category(),
                    reason = %e,
                    "Remote estimate skipped, using fallback factors"
                );
                fallback_estimate(request)
            }
            Err(e) => {
                tracing::warn!(
                    category = %request.category(),
                    factor = ?key,
                    error = %e,
                    "Remote estimate failed, using fallback factors"
                );
                fallback_estimate(request)
            }
        }
    }

    async fn estimate_remote(
        &self,
        key: FactorKey,
        request: &ActivityRequest,
    ) -> Result<EmissionEstimate, RemoteError> {
        let client = self.remote.as_ref().ok_or(RemoteError::Disabled)?;
        let parameters = EstimateParameters::from(request);
        client.estimate(key.climatiq_activity_id(), parameters).await
    }
}

/// Deterministic local estimate: quantity times the factor for the request.
pub fn fallback_estimate(request: &ActivityRequest) -> EmissionEstimate {
    let factor = FactorKey::for_request(request).factor();
    // Saturate so absurd quantities still yield a finite value
    let co2e = (request.quantity() * factor).min(f64::MAX);
    EmissionEstimate::fallback(co2e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EstimateSource;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_fallback_commute_car() {
        let request = ActivityRequest::Commute {
            vehicle_type: "car".to_string(),
            distance: 100.0,
            distance_unit: "km".to_string(),
        };
        let estimate = fallback_estimate(&request);
        assert_close(estimate.co2e, 21.0);
        assert_eq!(estimate.co2e_unit, "kg");
        assert_eq!(estimate.source, EstimateSource::Fallback);
    }

    #[test]
    fn test_fallback_electricity() {
        let request = ActivityRequest::Electricity {
            energy: 10.0,
            energy_unit: "kWh".to_string(),
        };
        assert_close(fallback_estimate(&request).co2e, 5.0);
    }

    #[test]
    fn test_fallback_food() {
        let beef = ActivityRequest::Food {
            food_type: "beef".to_string(),
            weight: 2.0,
            weight_unit: "kg".to_string(),
        };
        assert_close(fallback_estimate(&beef).co2e, 54.0);

        let tofu = ActivityRequest::Food {
            food_type: "tofu".to_string(),
            weight: 3.0,
            weight_unit: "kg".to_string(),
        };
        assert_close(fallback_estimate(&tofu).co2e, 6.0);
    }

    #[test]
    fn test_fallback_is_deterministic_and_finite() {
        let request = ActivityRequest::Food {
            food_type: "beef".to_string(),
            weight: f64::MAX,
            weight_unit: "kg".to_string(),
        };
        let a = fallback_estimate(&request);
        let b = fallback_estimate(&request);
        assert_eq!(a.co2e.to_bits(), b.co2e.to_bits());
        assert!(a.co2e.is_finite());
    }

    #[tokio::test]
    async fn test_offline_estimator_uses_fallback() {
        let estimator = Estimator::offline();
        let request = ActivityRequest::Electricity {
            energy: 4.0,
            energy_unit: "kWh".to_string(),
        };
        let estimate = estimator.estimate(&request).await;
        assert_eq!(estimate.source, EstimateSource::Fallback);
        assert_close(estimate.co2e, 2.0);
    }

    #[tokio::test]
    async fn test_missing_key_falls_back() {
        let client = ClimatiqClient::new(
            None,
            "http://127.0.0.1:9",
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let estimator = Estimator::new(Some(client));
        let request = ActivityRequest::Electricity {
            energy: 10.0,
            energy_unit: "kWh".to_string(),
        };
        let estimate = estimator.estimate(&request).await;
        assert_eq!(estimate.source, EstimateSource::Fallback);
        assert_close(estimate.co2e, 5.0);
    }

    #[tokio::test]
    async fn test_unreachable_provider_falls_back() {
        let client = ClimatiqClient::new(
            Some("key".to_string()),
            "http://127.0.0.1:9",
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let estimator = Estimator::new(Some(client));
        let request = ActivityRequest::Commute {
            vehicle_type: "bus".to_string(),
            distance: 10.0,
            distance_unit: "km".to_string(),
        };
        let estimate = estimator.estimate(&request).await;
        assert_eq!(estimate.source, EstimateSource::Fallback);
        assert_close(estimate.co2e, 0.89);
    }
}
