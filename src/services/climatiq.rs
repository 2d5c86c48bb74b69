// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Climatiq API client for remote emission estimates.
//!
//! Only the `/estimate` endpoint is used. Every request is bounded by the
//! client timeout; callers treat any error as a cue to estimate locally.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{ActivityRequest, EmissionEstimate, EstimateSource, DEFAULT_CO2E_UNIT};

/// Climatiq API client.
#[derive(Clone)]
pub struct ClimatiqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ClimatiqClient {
    /// Create a client. A missing key is not an error here; estimates will
    /// fail with [`RemoteError::MissingCredentials`] instead.
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Estimate emissions for an activity against a Climatiq emission factor.
    pub async fn estimate(
        &self,
        activity_id: &str,
        parameters: EstimateParameters,
    ) -> Result<EmissionEstimate, RemoteError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RemoteError::MissingCredentials)?;

        let url = format!("{}/estimate", self.base_url);
        let body = EstimateRequestBody {
            emission_factor: EmissionFactorRef { id: activity_id },
            parameters,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(RemoteError::from_reqwest)?;
        let parsed: EstimateResponseBody = serde_json::from_slice(&bytes)
            .map_err(|e| RemoteError::Malformed(format!("JSON parse error: {}", e)))?;

        parsed.into_estimate()
    }
}

/// Request parameters, shaped the way Climatiq expects per unit type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EstimateParameters {
    Distance {
        distance: f64,
        distance_unit: String,
    },
    Energy {
        energy: f64,
        energy_unit: String,
    },
    Weight {
        weight: f64,
        weight_unit: String,
    },
}

impl From<&ActivityRequest> for EstimateParameters {
    fn from(request: &ActivityRequest) -> Self {
        match request {
            ActivityRequest::Commute {
                distance,
                distance_unit,
                ..
            } => EstimateParameters::Distance {
                distance: *distance,
                distance_unit: distance_unit.clone(),
            },
            ActivityRequest::Electricity {
                energy,
                energy_unit,
            } => EstimateParameters::Energy {
                energy: *energy,
                energy_unit: energy_unit.clone(),
            },
            ActivityRequest::Food {
                weight,
                weight_unit,
                ..
            } => EstimateParameters::Weight {
                weight: *weight,
                weight_unit: weight_unit.clone(),
            },
        }
    }
}

#[derive(Serialize)]
struct EstimateRequestBody<'a> {
    emission_factor: EmissionFactorRef<'a>,
    parameters: EstimateParameters,
}

#[derive(Serialize)]
struct EmissionFactorRef<'a> {
    id: &'a str,
}

/// The subset of the Climatiq estimate response we use.
#[derive(Debug, Deserialize)]
struct EstimateResponseBody {
    co2e: Option<f64>,
    co2e_unit: Option<String>,
}

impl EstimateResponseBody {
    fn into_estimate(self) -> Result<EmissionEstimate, RemoteError> {
        let co2e = match self.co2e {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            Some(v) => {
                return Err(RemoteError::Malformed(format!(
                    "co2e out of range: {}",
                    v
                )))
            }
            None => return Err(RemoteError::Malformed("missing co2e".to_string())),
        };

        let co2e_unit = self
            .co2e_unit
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CO2E_UNIT.to_string());

        Ok(EmissionEstimate {
            co2e,
            co2e_unit,
            source: EstimateSource::Remote,
        })
    }
}

/// Reasons a remote estimate could not be used.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Remote estimates are disabled")]
    Disabled,

    #[error("Climatiq API key is not configured")]
    MissingCredentials,

    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// True when no request was attempted because the provider is turned
    /// off or has no key. These are expected in offline deployments.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, RemoteError::Disabled | RemoteError::MissingCredentials)
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_shape() {
        let request = ActivityRequest::Food {
            food_type: "beef".to_string(),
            weight: 2.0,
            weight_unit: "kg".to_string(),
        };
        let json = serde_json::to_value(EstimateParameters::from(&request)).unwrap();
        assert_eq!(json, serde_json::json!({ "weight": 2.0, "weight_unit": "kg" }));
    }

    #[test]
    fn test_response_defaults_unit() {
        let body: EstimateResponseBody = serde_json::from_str(r#"{"co2e": 1.5}"#).unwrap();
        let estimate = body.into_estimate().unwrap();
        assert_eq!(estimate.co2e_unit, "kg");
        assert_eq!(estimate.source, EstimateSource::Remote);
    }

    #[test]
    fn test_response_rejects_negative_or_missing_co2e() {
        let body: EstimateResponseBody = serde_json::from_str(r#"{"co2e": -1.0}"#).unwrap();
        assert!(matches!(body.into_estimate(), Err(RemoteError::Malformed(_))));

        let body: EstimateResponseBody = serde_json::from_str(r#"{"co2e_unit": "kg"}"#).unwrap();
        assert!(matches!(body.into_estimate(), Err(RemoteError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client =
            ClimatiqClient::new(None, "http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let params = EstimateParameters::Energy {
            energy: 1.0,
            energy_unit: "kWh".to_string(),
        };
        let err = client.estimate("electricity", params).await.unwrap_err();
        assert!(matches!(err, RemoteError::MissingCredentials));
        assert!(err.is_unconfigured());
    }

    #[test]
    fn test_only_setup_errors_are_unconfigured() {
        assert!(RemoteError::Disabled.is_unconfigured());
        assert!(!RemoteError::Timeout.is_unconfigured());
        assert!(!RemoteError::Malformed("x".to_string()).is_unconfigured());
        assert!(!RemoteError::Status {
            status: 500,
            body: String::new(),
        }
        .is_unconfigured());
    }
}
