use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Profile
        .route(
            "/profile",
            get(handlers::get_profile).put(handlers::save_profile),
        )
        .route("/reset", post(handlers::reset))
        // Drill control
        .route("/drills/start", post(handlers::start_drill))
        .route("/drills/generate", post(handlers::generate_drill))
        .route("/drills/recording/start", post(handlers::begin_recording))
        .route("/drills/submit", post(handlers::submit_recording))
        .route("/drills/retry", post(handlers::retry_drill))
        .route("/drills/next", post(handlers::next_drill))
        .route("/drills/status", get(handlers::drill_status))
        // History and derived views
        .route("/sessions", get(handlers::list_sessions))
        .route(
            "/sessions/:session_id/export",
            get(handlers::export_session),
        )
        .route(
            "/sessions/:session_id/comparison",
            get(handlers::compare_session),
        )
        .route("/stats", get(handlers::get_stats))
        .route("/coaching", get(handlers::get_coaching))
        // Prompts
        .route("/prompts/daily", get(handlers::daily_prompt))
        .route("/prompts/types", get(handlers::question_types))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
