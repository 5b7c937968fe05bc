// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Geometry fetch failed: {0}")]
    GeometryFetchFailed(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("No usable catalog entry to match against")]
    NoCatalogMatch,

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Catalog building volume is zero, cannot derive a scale index")]
    DivisionByZero,

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::GeometryFetchFailed(_) => (StatusCode::BAD_GATEWAY, "GEOMETRY_FETCH_FAILED"),
            ApiError::InvalidGeometry(_) => (StatusCode::BAD_GATEWAY, "INVALID_GEOMETRY"),
            ApiError::NoCatalogMatch => (StatusCode::SERVICE_UNAVAILABLE, "NO_CATALOG_MATCH"),
            ApiError::Catalog(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_ERROR"),
            ApiError::DivisionByZero => (StatusCode::INTERNAL_SERVER_ERROR, "DIVISION_BY_ZERO"),
            ApiError::Pdf(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PDF_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<reno_lite_matching::Error> for ApiError {
    fn from(err: reno_lite_matching::Error) -> Self {
        use reno_lite_matching::Error;
        match err {
            Error::Geometry(e) => ApiError::InvalidGeometry(e.to_string()),
            Error::NoCatalogMatch => ApiError::NoCatalogMatch,
            Error::DivisionByZero => ApiError::DivisionByZero,
            e @ Error::CatalogLoad { .. } => ApiError::Catalog(e.to_string()),
        }
    }
}

impl From<crate::services::fetch::FetchError> for ApiError {
    fn from(err: crate::services::fetch::FetchError) -> Self {
        ApiError::GeometryFetchFailed(err.to_string())
    }
}

impl From<crate::services::catalog::CatalogError> for ApiError {
    fn from(err: crate::services::catalog::CatalogError) -> Self {
        ApiError::Catalog(err.to_string())
    }
}

impl From<crate::services::pdf::PdfError> for ApiError {
    fn from(err: crate::services::pdf::PdfError) -> Self {
        ApiError::Pdf(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
