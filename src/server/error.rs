use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::error::FaersError;

/// Failure modes of the data routes.
#[derive(thiserror::Error, Debug)]
pub enum RouteError {
    /// Missing or malformed request parameter.
    #[error("{0}")]
    Validation(String),

    /// Upstream call failed; the message goes back to the caller.
    #[error("{0}")]
    Upstream(String),

    /// Failure with no route-level handling, answered with a bare 500.
    #[error("Unhandled error: {0}")]
    Unhandled(#[from] FaersError),
}

impl RouteError {
    pub(crate) fn validation(err: FaersError) -> Self {
        match err {
            FaersError::InvalidArgument(message) => Self::Validation(message),
            other => Self::Unhandled(other),
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Upstream(message) => {
                error!(error = %message, "upstream request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
            Self::Unhandled(err) => {
                error!(error = %err, "unhandled route error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
