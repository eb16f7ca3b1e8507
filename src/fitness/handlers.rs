use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::services::{bmi, daily_calories, ActivityLevel, Numeric};
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct BodyMetrics {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<Numeric>,
    pub height: Numeric,
    pub weight: Numeric,
    #[serde(default)]
    pub activity_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CalorieResponse {
    pub calorie_intake: f64,
    pub success: bool,
}

pub fn fitness_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate_bmi", post(calculate_bmi))
        .route("/calculate_calories", post(calculate_calories))
}

fn int_field(v: &Numeric, name: &str) -> Result<i64, ApiError> {
    v.as_int()
        .ok_or_else(|| ApiError::BadRequest(format!("{} must be an integer", name)))
}

#[instrument(skip(body))]
pub async fn calculate_bmi(Json(body): Json<BodyMetrics>) -> Result<Json<BmiResponse>, ApiError> {
    let height = int_field(&body.height, "height")?;
    let weight = int_field(&body.weight, "weight")?;
    let bmi = bmi(weight, height)
        .ok_or_else(|| ApiError::BadRequest("height must be positive".into()))?;
    Ok(Json(BmiResponse { bmi, success: true }))
}

#[instrument(skip(body))]
pub async fn calculate_calories(
    Json(body): Json<BodyMetrics>,
) -> Result<Json<CalorieResponse>, ApiError> {
    let height = int_field(&body.height, "height")?;
    let weight = int_field(&body.weight, "weight")?;
    let age = body
        .age
        .as_ref()
        .and_then(Numeric::as_float)
        .ok_or_else(|| ApiError::BadRequest("age must be a number".into()))?;
    let gender = body.gender.as_deref().unwrap_or_default();
    let activity = ActivityLevel::parse(body.activity_level.as_deref().unwrap_or_default());
    let calorie_intake = daily_calories(weight, height, age, gender, activity);
    debug!(calorie_intake, ?activity, "calorie estimate");
    Ok(Json(CalorieResponse {
        calorie_intake,
        success: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{call, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn bmi_endpoint() {
        let app = fitness_routes().with_state(test_state());
        let (status, body) = call(
            &app,
            "POST",
            "/calculate_bmi",
            Some(json!({"gender": "male", "age": 30, "height": "175", "weight": 70})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let bmi = body["bmi"].as_f64().unwrap();
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[tokio::test]
    async fn calories_endpoint() {
        let app = fitness_routes().with_state(test_state());
        let (status, body) = call(
            &app,
            "POST",
            "/calculate_calories",
            Some(json!({
                "gender": "female", "age": "28", "height": 165, "weight": 60,
                "activity_level": "sedentary"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let expected = daily_calories(60, 165, 28.0, "female", ActivityLevel::Sedentary);
        assert!((body["calorie_intake"].as_f64().unwrap() - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn zero_height_is_bad_request() {
        let app = fitness_routes().with_state(test_state());
        let (status, _) = call(
            &app,
            "POST",
            "/calculate_bmi",
            Some(json!({"height": 0, "weight": 70})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
