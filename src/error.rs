use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const NO_DATA_MESSAGE: &str = "no data found for this combination filter, try modifying the filter";

/// Failures of the `/viewDiet` pipeline.
#[derive(Debug, Error)]
pub enum DietError {
    /// The planner call itself did not come back with 200; carries the
    /// gateway's error text.
    #[error("meal planner call failed: {0}")]
    Upstream(String),

    #[error("meal planner returned status {0}")]
    PlannerStatus(String),

    /// An upstream payload did not have the expected shape.
    #[error("unexpected upstream payload: {0}")]
    Shape(String),

    #[error("day 1 of the plan is incomplete")]
    IncompleteFirstDay,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Diet(#[from] DietError),

    #[error("no exercises match the filter")]
    NoExercises,

    /// Malformed request body on an endpoint that reports it as "no data".
    #[error("malformed request: {0}")]
    NoData(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Diet(DietError::Upstream(msg)) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "data": {}, "error": msg})),
            )
                .into_response(),
            ApiError::Diet(e) => {
                error!(error = %e, "diet plan unavailable");
                no_data_response()
            }
            ApiError::NoData(e) => {
                error!(error = %e, "rejected request");
                no_data_response()
            }
            ApiError::NoExercises => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "No data found for this combination filter, try modifying the filter",
                    "success": false,
                    "error": "no data found for this combination filter",
                })),
            )
                .into_response(),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": msg})),
            )
                .into_response(),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "message": msg})),
            )
                .into_response(),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"success": false, "message": "internal error"})),
                )
                    .into_response()
            }
        }
    }
}

fn no_data_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "data": {}, "error": NO_DATA_MESSAGE})),
    )
        .into_response()
}
