use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/latest", get(handlers::get_latest))
        .route(
            "/api/charts/percent-change",
            get(handlers::get_percent_change_chart),
        )
        .route(
            "/api/charts/views-average",
            get(handlers::get_views_average_chart),
        )
        .with_state(state)
}
