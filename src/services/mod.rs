// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod climatiq;
pub mod estimator;
pub mod factors;
pub mod normalizer;
pub mod offsets;

pub use climatiq::{ClimatiqClient, RemoteError};
pub use estimator::{fallback_estimate, Estimator};
pub use factors::FactorKey;
pub use normalizer::{normalize, normalize_tagged, NormalizeError, RawActivityInput};
pub use offsets::{OffsetList, OffsetService, OffsetsError};
