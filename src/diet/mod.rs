pub mod dto;
pub mod grid;
pub mod handlers;
pub mod planner;
pub mod recipes;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::diet_routes()
}
