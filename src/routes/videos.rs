//! HTTP handlers for the `/api/videos` surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{
    validate_create, validate_update, CreateVideoRequest, UpdateVideoRequest, Video,
};
use crate::response::ApiResponse;
use crate::store::VideoStore;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[tracing::instrument(name = "List all videos", skip(store))]
pub async fn all_videos(
    State(store): State<VideoStore>,
) -> Result<Json<ApiResponse<Vec<Video>>>, AppError> {
    let videos = store
        .list_all()
        .await
        .map_err(AppError::database("Error fetching videos"))?;

    let count = videos.len();
    Ok(Json(ApiResponse::success(videos).with_count(count)))
}

/// Fetches one video and persists the view bump before responding.
#[tracing::instrument(name = "Get video", skip(store))]
pub async fn video_by_id(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Video>>, AppError> {
    let video = store
        .increment_views(&id)
        .await
        .map_err(AppError::database("Error fetching video"))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(ApiResponse::success(video)))
}

#[tracing::instrument(name = "List videos by category", skip(store))]
pub async fn videos_by_category(
    State(store): State<VideoStore>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<Video>>>, AppError> {
    let videos = store
        .list_by_category(&category)
        .await
        .map_err(AppError::database("Error fetching videos by category"))?;

    let count = videos.len();
    Ok(Json(
        ApiResponse::success(videos)
            .with_count(count)
            .with_category(category),
    ))
}

#[tracing::instrument(name = "Search videos", skip(store))]
pub async fn search_videos(
    State(store): State<VideoStore>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<Video>>>, AppError> {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::Validation(
            "Please provide a search query".to_string(),
        ));
    }

    let videos = store
        .search(&query)
        .await
        .map_err(AppError::database("Error searching videos"))?;

    let count = videos.len();
    Ok(Json(
        ApiResponse::success(videos)
            .with_count(count)
            .with_search_query(query),
    ))
}

#[tracing::instrument(name = "Create video", skip(store, payload))]
pub async fn create_video(
    State(store): State<VideoStore>,
    Json(payload): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Video>>), AppError> {
    let new_video = validate_create(&payload).map_err(|errors| AppError::ValidationErrors {
        context: "Error creating video".to_string(),
        errors,
    })?;

    let video = store
        .insert(new_video)
        .await
        .map_err(AppError::database("Error creating video"))?;

    tracing::info!(id = %video.id, title = %video.title, "video created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(video).with_message("Video created successfully")),
    ))
}

/// Overlays the provided fields onto the stored record, re-validates the
/// merged result and persists it. Counters, id and `created_at` stay as
/// they are.
#[tracing::instrument(name = "Update video", skip(store, payload))]
pub async fn update_video(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVideoRequest>,
) -> Result<Json<ApiResponse<Video>>, AppError> {
    let current = store
        .get(&id)
        .await
        .map_err(AppError::database("Error updating video"))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let merged = validate_update(&current, &payload).map_err(|errors| AppError::ValidationErrors {
        context: "Error updating video".to_string(),
        errors,
    })?;

    let video = store
        .update(&id, merged)
        .await
        .map_err(AppError::database("Error updating video"))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(
        ApiResponse::success(video).with_message("Video updated successfully"),
    ))
}

#[tracing::instrument(name = "Delete video", skip(store))]
pub async fn delete_video(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let removed = store
        .delete(&id)
        .await
        .map_err(AppError::database("Error deleting video"))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    tracing::info!(id = %removed.id, title = %removed.title, "video deleted");

    Ok(Json(
        ApiResponse::success(json!({})).with_message("Video deleted successfully"),
    ))
}

#[tracing::instrument(name = "List categories", skip(store))]
pub async fn all_categories(
    State(store): State<VideoStore>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let categories = store
        .distinct_categories()
        .await
        .map_err(AppError::database("Error fetching categories"))?;

    let count = categories.len();
    Ok(Json(ApiResponse::success(categories).with_count(count)))
}

#[tracing::instrument(name = "Like video", skip(store))]
pub async fn like_video(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Video>>, AppError> {
    let video = store
        .increment_likes(&id)
        .await
        .map_err(AppError::database("Error liking video"))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(ApiResponse::success(video).with_message("Video liked")))
}
