use std::time::Instant;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{dto::DietResponse, services};
use crate::{error::ApiError, state::AppState};

pub fn diet_routes() -> Router<AppState> {
    Router::new().route("/viewDiet", post(view_diet))
}

/// POST /viewDiet; the body goes to the meal planner untouched. Any
/// well-formed JSON is accepted, whatever the `Content-Type`.
#[instrument(skip(state, body))]
pub async fn view_diet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DietResponse>, ApiError> {
    let request: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::NoData(e.to_string()))?;
    let started = Instant::now();
    let plan = services::build_weekly_plan(&state, &request).await?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "diet plan built");
    Ok(Json(DietResponse {
        success: true,
        data: plan,
        error: String::new(),
    }))
}
