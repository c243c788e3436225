//! SQLite-backed store for the video catalog.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{NewVideo, Video};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS videos (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    url         TEXT NOT NULL,
    description TEXT NOT NULL,
    category    TEXT NOT NULL,
    duration    TEXT NOT NULL DEFAULT 'N/A',
    instructor  TEXT NOT NULL DEFAULT 'N/A',
    thumbnail   TEXT NOT NULL DEFAULT '',
    views       INTEGER NOT NULL DEFAULT 0,
    likes       INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
)
"#;

const CATEGORY_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_videos_category ON videos (category)";

/// Handle to the videos table. Cheap to clone; constructed once at startup
/// and passed down through router state rather than held globally.
#[derive(Debug, Clone)]
pub struct VideoStore {
    pool: SqlitePool,
}

impl VideoStore {
    /// Opens the database at `database_url`, creating the file and the schema
    /// when missing.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// In-memory store for tests and ephemeral runs. Pinned to a single
    /// connection that never expires, since every new `:memory:` connection
    /// would otherwise be its own empty database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        sqlx::query(CATEGORY_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// All videos, newest first.
    pub async fn list_all(&self) -> Result<Vec<Video>, sqlx::Error> {
        sqlx::query_as::<_, Video>(r#"SELECT * FROM videos ORDER BY created_at DESC"#)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Video>, sqlx::Error> {
        sqlx::query_as::<_, Video>(r#"SELECT * FROM videos WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Videos whose category matches exactly, newest first.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Video>, sqlx::Error> {
        sqlx::query_as::<_, Video>(
            r#"SELECT * FROM videos WHERE category = $1 ORDER BY created_at DESC"#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    /// Case-insensitive substring search over title, description and
    /// category. The query is escaped so `%` and `_` match literally.
    pub async fn search(&self, query: &str) -> Result<Vec<Video>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(query));
        sqlx::query_as::<_, Video>(
            r#"
            SELECT * FROM videos
            WHERE title LIKE $1 ESCAPE '\'
               OR description LIKE $1 ESCAPE '\'
               OR category LIKE $1 ESCAPE '\'
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
    }

    /// Inserts a validated video under a fresh id with zeroed counters and
    /// current timestamps, returning the stored row.
    pub async fn insert(&self, video: NewVideo) -> Result<Video, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().naive_utc();

        sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos
                (id, title, url, description, category, duration, instructor, thumbnail,
                 views, likes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 0, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(video.title)
        .bind(video.url)
        .bind(video.description)
        .bind(video.category)
        .bind(video.duration)
        .bind(video.instructor)
        .bind(video.thumbnail)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    /// Replaces the mutable fields of `id` and bumps `updated_at`. Counters,
    /// id and `created_at` are untouched. `None` when no such record exists.
    pub async fn update(&self, id: &str, video: NewVideo) -> Result<Option<Video>, sqlx::Error> {
        let now = Utc::now().naive_utc();

        sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET title = $2, url = $3, description = $4, category = $5,
                duration = $6, instructor = $7, thumbnail = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(video.title)
        .bind(video.url)
        .bind(video.description)
        .bind(video.category)
        .bind(video.duration)
        .bind(video.instructor)
        .bind(video.thumbnail)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes `id`, returning the removed record, or `None` when absent.
    pub async fn delete(&self, id: &str) -> Result<Option<Video>, sqlx::Error> {
        sqlx::query_as::<_, Video>(r#"DELETE FROM videos WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Distinct category values currently present, sorted ascending.
    pub async fn distinct_categories(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(r#"SELECT DISTINCT category FROM videos ORDER BY category"#)
            .fetch_all(&self.pool)
            .await
    }

    /// Bumps the view counter in a single statement, so concurrent fetches
    /// never lose a count.
    pub async fn increment_views(&self, id: &str) -> Result<Option<Video>, sqlx::Error> {
        let now = Utc::now().naive_utc();

        sqlx::query_as::<_, Video>(
            r#"UPDATE videos SET views = views + 1, updated_at = $2 WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
    }

    /// Bumps the like counter in a single statement.
    pub async fn increment_likes(&self, id: &str) -> Result<Option<Video>, sqlx::Error> {
        let now = Utc::now().naive_utc();

        sqlx::query_as::<_, Video>(
            r#"UPDATE videos SET likes = likes + 1, updated_at = $2 WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
    }

    /// Transactional multi-insert for the seeding utility; either every video
    /// lands or none do. Returns the number inserted.
    pub async fn bulk_insert(&self, videos: &[NewVideo]) -> Result<usize, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for video in videos {
            let id = Uuid::new_v4().to_string();
            let now = Utc::now().naive_utc();

            sqlx::query(
                r#"
                INSERT INTO videos
                    (id, title, url, description, category, duration, instructor, thumbnail,
                     views, likes, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 0, $9, $10)
                "#,
            )
            .bind(id)
            .bind(&video.title)
            .bind(&video.url)
            .bind(&video.description)
            .bind(&video.category)
            .bind(&video.duration)
            .bind(&video.instructor)
            .bind(&video.thumbnail)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(videos.len())
    }

    /// Removes every video, returning how many were deleted.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM videos"#)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
