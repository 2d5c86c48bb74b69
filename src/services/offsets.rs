// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Offset project suggestions from the Gold Standard registry.

use std::time::Duration;

use crate::config::Config;
use crate::models::{OffsetProject, OffsetSource, ProjectId};

const PROJECT_LIMIT: u32 = 10;

/// Service listing offset projects, with a static list when the registry
/// cannot be reached.
#[derive(Clone)]
pub struct OffsetService {
    http: reqwest::Client,
    /// None when remote calls are disabled
    base_url: Option<String>,
}

/// A project list and where it came from.
#[derive(Debug, Clone)]
pub struct OffsetList {
    pub projects: Vec<OffsetProject>,
    pub source: OffsetSource,
}

impl OffsetService {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, OffsetsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OffsetsError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, OffsetsError> {
        let base_url = config
            .remote_enabled
            .then(|| config.gold_standard_base_url.clone());
        Self::new(base_url, config.upstream_timeout)
    }

    /// List active projects. Never fails.
    pub async fn list_projects(&self) -> OffsetList {
        match self.fetch_registry().await {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "Fetched offset projects");
                OffsetList {
                    projects,
                    source: OffsetSource::Registry,
                }
            }
            Err(OffsetsError::Disabled) => fallback_list(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Gold Standard registry unavailable, using static projects"
                );
                fallback_list()
            }
        }
    }

    async fn fetch_registry(&self) -> Result<Vec<OffsetProject>, OffsetsError> {
        let base_url = self.base_url.as_deref().ok_or(OffsetsError::Disabled)?;
        let url = format!("{}/projects", base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("limit", PROJECT_LIMIT.to_string()),
                ("status", "active".to_string()),
            ])
            .send()
            .await
            .map_err(|e| OffsetsError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OffsetsError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| OffsetsError::Malformed(e.to_string()))
    }
}

fn fallback_list() -> OffsetList {
    OffsetList {
        projects: fallback_projects(),
        source: OffsetSource::Fallback,
    }
}

/// Static suggestions used when the registry is unreachable.
pub fn fallback_projects() -> Vec<OffsetProject> {
    vec![
        OffsetProject {
            id: ProjectId::Number(1),
            name: "Renewable Energy Project".to_string(),
            description: "Support clean energy initiatives".to_string(),
            location: "Global".to_string(),
        },
        OffsetProject {
            id: ProjectId::Number(2),
            name: "Reforestation Program".to_string(),
            description: "Plant trees to offset carbon".to_string(),
            location: "Global".to_string(),
        },
    ]
}

/// Errors from the registry lookup. Never surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum OffsetsError {
    #[error("Registry lookups are disabled")]
    Disabled,

    #[error("Registry request failed: {0}")]
    Request(String),

    #[error("Registry returned HTTP {0}")]
    Status(u16),

    #[error("Malformed registry response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_registry_uses_static_projects() {
        let service = OffsetService::new(None, Duration::from_secs(1)).unwrap();
        let list = service.list_projects().await;
        assert_eq!(list.source, OffsetSource::Fallback);
        assert_eq!(list.projects, fallback_projects());
    }

    #[tokio::test]
    async fn test_unreachable_registry_uses_static_projects() {
        let service = OffsetService::new(
            Some("http://127.0.0.1:9".to_string()),
            Duration::from_secs(2),
        )
        .unwrap();
        let list = service.list_projects().await;
        assert_eq!(list.source, OffsetSource::Fallback);
        assert_eq!(list.projects.len(), 2);
    }
}
