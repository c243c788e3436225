//! Video catalog model and the validation rules applied to incoming payloads.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Closed set of catalog categories. A video is never stored with a value
/// outside this list.
pub const CATEGORIES: [&str; 10] = [
    "Python",
    "JavaScript",
    "React",
    "Web Development",
    "C Programming",
    "Data Science",
    "Machine Learning",
    "Node.js",
    "Database",
    "Other",
];

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

static YOUTUBE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/.+")
        .expect("YouTube URL pattern is valid")
});

/// Per-field validation failures, every message collected in one pass.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// One catalog entry, as stored and as serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub instructor: String,
    pub thumbnail: String,
    pub views: i64,
    pub likes: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Creation payload. Every field is optional at the serde level so that
/// missing required fields come back as field errors, not as a body-parse
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub instructor: Option<String>,
    pub thumbnail: Option<String>,
}

/// Partial update payload; absent fields keep their current value. Counters,
/// id and timestamps are not patchable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub instructor: Option<String>,
    pub thumbnail: Option<String>,
}

/// Validated, normalized field set ready to be written to the store.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub instructor: String,
    pub thumbnail: String,
}

fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Flattens a field-error map into one readable line, e.g.
/// `title: Please provide a video title, url: Please provide a video URL`.
pub fn describe_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| format!("{field}: {message}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates a creation payload against the full rule set, collecting every
/// field error. On success returns the normalized (trimmed, defaulted) data.
pub fn validate_create(request: &CreateVideoRequest) -> Result<NewVideo, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = request.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        push_error(&mut errors, "title", "Please provide a video title");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        push_error(
            &mut errors,
            "title",
            format!("Title cannot be more than {TITLE_MAX_CHARS} characters"),
        );
    }

    let url = request.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        push_error(&mut errors, "url", "Please provide a video URL");
    } else if !YOUTUBE_URL_RE.is_match(url) {
        push_error(&mut errors, "url", "Please provide a valid YouTube URL");
    }

    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if description.is_empty() {
        push_error(&mut errors, "description", "Please provide a description");
    } else if description.chars().count() > DESCRIPTION_MAX_CHARS {
        push_error(
            &mut errors,
            "description",
            format!("Description cannot be more than {DESCRIPTION_MAX_CHARS} characters"),
        );
    }

    // Category is matched exactly against the closed set, no trimming.
    let category = request.category.as_deref().unwrap_or_default();
    if category.is_empty() {
        push_error(&mut errors, "category", "Please specify a category");
    } else if !CATEGORIES.contains(&category) {
        push_error(
            &mut errors,
            "category",
            format!("'{category}' is not a valid category"),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewVideo {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        duration: request.duration.clone().unwrap_or_else(|| "N/A".to_string()),
        instructor: request
            .instructor
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        thumbnail: request.thumbnail.clone().unwrap_or_default(),
    })
}

/// Overlays a partial update onto the current record and re-validates the
/// merged result, so a PUT can never leave a record violating the creation
/// rules.
pub fn validate_update(
    current: &Video,
    patch: &UpdateVideoRequest,
) -> Result<NewVideo, FieldErrors> {
    let merged = CreateVideoRequest {
        title: Some(patch.title.clone().unwrap_or_else(|| current.title.clone())),
        url: Some(patch.url.clone().unwrap_or_else(|| current.url.clone())),
        description: Some(
            patch
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
        ),
        category: Some(
            patch
                .category
                .clone()
                .unwrap_or_else(|| current.category.clone()),
        ),
        duration: Some(
            patch
                .duration
                .clone()
                .unwrap_or_else(|| current.duration.clone()),
        ),
        instructor: Some(
            patch
                .instructor
                .clone()
                .unwrap_or_else(|| current.instructor.clone()),
        ),
        thumbnail: Some(
            patch
                .thumbnail
                .clone()
                .unwrap_or_else(|| current.thumbnail.clone()),
        ),
    };
    validate_create(&merged)
}
