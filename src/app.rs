use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/log/:metric/:direction", post(handlers::step_form))
        .route("/api/today", get(handlers::get_today).post(handlers::log_today))
        .route("/api/today/:metric/:direction", post(handlers::step_today))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/week", get(handlers::get_week))
        .route("/api/goals", get(handlers::get_goals).put(handlers::put_goals))
        .route("/api/theme", get(handlers::get_theme).put(handlers::put_theme))
        .route("/api/theme/cycle", post(handlers::cycle_theme))
        .with_state(state)
}
