use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jobs::service::{Listing, ServiceError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Callers always get a 500 with a generic message; the cause is only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error fetching jobs data")]
    JobsFetch {
        listing: Listing,
        #[source]
        source: ServiceError,
    },

    #[error("Error fetching job data")]
    JobFetch {
        id: String,
        #[source]
        source: ServiceError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::JobsFetch { listing, source } => {
                tracing::error!("Error fetching {} jobs: {source}", listing.as_str());
            }
            AppError::JobFetch { id, source } => {
                tracing::error!("Error fetching job {id}: {source}");
            }
        }

        let body = Json(json!({ "message": self.to_string() }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
