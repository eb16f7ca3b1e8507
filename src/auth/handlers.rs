use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{FirstNameRequest, FirstNameResponse, LoginRequest, MessageResponse, SignupRequest},
        services,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signupCheck", post(signup_check))
        .route("/loginCheck", post(login_check))
        .route("/getFirstname", post(get_first_name))
}

#[instrument(skip(state, payload))]
pub async fn signup_check(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::signup(state.users.as_ref(), payload).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "User signup is successful",
    }))
}

#[instrument(skip(state, payload))]
pub async fn login_check(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::login(state.users.as_ref(), payload).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "login successful",
    }))
}

#[instrument(skip(state, payload))]
pub async fn get_first_name(
    State(state): State<AppState>,
    Json(payload): Json<FirstNameRequest>,
) -> Result<(StatusCode, Json<FirstNameResponse>), ApiError> {
    let Some(email) = payload.email.filter(|e| !e.is_empty()) else {
        return Ok(not_found("Email not provided in the request"));
    };
    let email = services::normalize_email(&email);
    match state.users.find_by_email(&email).await? {
        Some(user) => Ok((
            StatusCode::OK,
            Json(FirstNameResponse {
                first_name: user.first_name,
                success: true,
            }),
        )),
        None => {
            warn!(%email, "first name lookup for unknown user");
            Ok(not_found("User not found"))
        }
    }
}

fn not_found(message: &str) -> (StatusCode, Json<FirstNameResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(FirstNameResponse {
            first_name: message.to_string(),
            success: false,
        }),
    )
}
