//! Playback session routes.
//!
//! Expose the process-wide background audio session so any client surface
//! can drive it through the same transitions.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::AppContext;

/// Create playback routes.
pub fn playback_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(get_status))
        .route("/play", post(play))
        .route("/pause", post(pause))
        .route("/mute", post(toggle_mute))
}

async fn get_status(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.playback.status())
}

async fn play(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.playback.play())
}

async fn pause(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.playback.pause())
}

async fn toggle_mute(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.playback.toggle_mute())
}
