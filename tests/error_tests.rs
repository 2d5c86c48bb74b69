// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use carbon_tracker::error::AppError;
use carbon_tracker::models::UnknownCategory;
use carbon_tracker::services::normalizer::NormalizeError;

#[test]
fn test_normalize_errors_map_to_app_errors() {
    let err: AppError = NormalizeError::InvalidQuantity { field: "energy" }.into();
    assert!(matches!(err, AppError::InvalidQuantity(ref msg) if msg.contains("energy")));

    let err: AppError =
        NormalizeError::UnknownCategory(UnknownCategory("water".to_string())).into();
    assert!(matches!(err, AppError::UnknownCategory(ref tag) if tag == "water"));
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::InvalidQuantity("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::UnknownCategory("x".to_string()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}
