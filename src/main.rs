// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon-Tracker API Server
//!
//! Estimates CO2e for commute, electricity and food activities and serves
//! per-user emission summaries.

use carbon_tracker::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Carbon-Tracker API");
    tracing::info!(
        api_key_loaded = config.climatiq_api_key.is_some(),
        remote_enabled = config.remote_enabled,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Climatiq configuration"
    );
    if config.remote_enabled && config.climatiq_api_key.is_none() {
        tracing::warn!("CLIMATIQ_API_KEY missing; all estimates will use fallback factors");
    }

    // Build shared state
    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::from_config(config)?);

    // Build router
    let app = carbon_tracker::routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbon_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
