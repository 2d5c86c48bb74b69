// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Carbon-Tracker: estimate and summarize personal carbon emissions
//!
//! This crate provides the backend API that estimates CO2e for commute,
//! electricity and food activities and aggregates recorded activities into
//! daily, weekly and per-category totals.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::MemoryStore;
use services::{Estimator, OffsetService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub estimator: Estimator,
    pub offsets: OffsetService,
    pub store: MemoryStore,
}

impl AppState {
    /// Wire up services from configuration with an empty store.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let estimator = Estimator::from_config(&config)?;
        let offsets = OffsetService::from_config(&config)?;
        Ok(Self {
            config,
            estimator,
            offsets,
            store: MemoryStore::new(),
        })
    }
}
