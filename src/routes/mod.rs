//! Router assembly: the video API, service descriptor, health probe and the
//! static frontend fallback.

pub mod videos;

use std::path::Path;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::errors::handle_panic;
use crate::store::VideoStore;
use videos::{
    all_categories, all_videos, create_video, delete_video, like_video, search_videos,
    update_video, video_by_id, videos_by_category,
};

/// Routes under `/api/videos`. Literal segments must match ahead of `:id`;
/// axum resolves them by specificity, and registration keeps the same order.
pub fn videos_router() -> Router<VideoStore> {
    Router::new()
        .route("/categories/all", get(all_categories))
        .route("/search", get(search_videos))
        .route("/category/:category", get(videos_by_category))
        .route("/:id/like", post(like_video))
        .route("/", get(all_videos).post(create_video))
        .route(
            "/:id",
            get(video_by_id).put(update_video).delete(delete_video),
        )
}

async fn api_descriptor() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Welcome to the VideoHub API",
        "version": "1.0.0",
        "endpoints": {
            "videos": "/api/videos",
            "search": "/api/videos/search?q=query",
            "categories": "/api/videos/categories/all",
            "byCategory": "/api/videos/category/:category",
            "byId": "/api/videos/:id",
            "like": "/api/videos/:id/like"
        }
    }))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Builds the application router around an explicit store handle. Non-API
/// paths serve the frontend directory, with `index.html` as the catch-all
/// fallback.
pub fn build_router(store: VideoStore, frontend_dir: &str) -> Router {
    let frontend = ServeDir::new(frontend_dir)
        .not_found_service(ServeFile::new(Path::new(frontend_dir).join("index.html")));

    Router::new()
        .route("/api", get(api_descriptor))
        .nest("/api/videos", videos_router())
        .route("/health", get(health_check))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
