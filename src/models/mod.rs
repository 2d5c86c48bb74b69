// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod estimate;
pub mod offset;
pub mod stats;

pub use activity::{
    ActivityCategory, ActivityRecord, ActivityRequest, FoodType, UnknownCategory, VehicleType,
};
pub use estimate::{EmissionEstimate, EstimateSource, DEFAULT_CO2E_UNIT};
pub use offset::{OffsetProject, OffsetSource, ProjectId};
pub use stats::{aggregate, AggregationResult, FootprintLevel};
