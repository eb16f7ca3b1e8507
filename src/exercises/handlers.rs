use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::dto::{ExerciseFilter, ExerciseResponse};
use super::services;
use crate::{error::ApiError, state::AppState};

pub fn exercise_routes() -> Router<AppState> {
    Router::new().route("/getExercises", post(get_exercises))
}

/// POST /getExercises. Catalog failures report the same "no data" body as a
/// malformed filter.
#[instrument(skip(state, body))]
pub async fn get_exercises(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let filter: ExerciseFilter =
        serde_json::from_slice(&body).map_err(|e| ApiError::NoData(e.to_string()))?;
    let plan = services::weekly_plan(state.exercises.as_ref(), &filter)
        .await
        .map_err(|e| match e {
            ApiError::Internal(e) => ApiError::NoData(format!("{:#}", e)),
            other => other,
        })?;
    info!(difficulty = %filter.difficulty, muscles = filter.muscles.len(), "exercise plan built");
    Ok(Json(ExerciseResponse {
        exercise_data: plan,
        success: true,
    }))
}
