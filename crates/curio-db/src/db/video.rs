use async_trait::async_trait;
use curio_core::{
    models::{DeletedVideo, NewVideo, PageRequest, Video, VideoPage},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const VIDEO_COLUMNS: &str = "id, subtopic_id, user_id, original_name, filename, mime_type, size_bytes, storage_path, created_at";

/// Persistence for video asset records
///
/// Every mutation is a single statement. Owner-scoped operations return `None`
/// both when the row is missing and when it belongs to someone else.
#[async_trait]
pub trait VideoRecorder: Send + Sync {
    /// Insert a row for bytes that are already durably stored
    async fn record(&self, video: NewVideo) -> Result<Video, AppError>;

    /// Page through videos, newest first, optionally restricted to one subtopic
    async fn list(&self, subtopic_id: Option<&str>, page: PageRequest)
        -> Result<VideoPage, AppError>;

    /// Every video of a subtopic, newest first
    async fn list_for_subtopic(&self, subtopic_id: &str) -> Result<Vec<Video>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    async fn reassign_subtopic(
        &self,
        id: Uuid,
        owner_id: Uuid,
        subtopic_id: &str,
    ) -> Result<Option<Video>, AppError>;

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid)
        -> Result<Option<DeletedVideo>, AppError>;
}

#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Foreign-key violations on `videos` become client errors
fn map_reference_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            let message = match db_err.constraint() {
                Some(constraint) if constraint.contains("user_id") => "User not found",
                _ => "Subtopic not found",
            };
            return AppError::InvalidReference(message.to_string());
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl VideoRecorder for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", subtopic_id = %video.subtopic_id))]
    async fn record(&self, video: NewVideo) -> Result<Video, AppError> {
        let query = format!(
            r#"
            INSERT INTO videos (subtopic_id, user_id, original_name, filename, mime_type, size_bytes, storage_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        sqlx::query_as::<Postgres, Video>(&query)
            .bind(&video.subtopic_id)
            .bind(video.user_id)
            .bind(&video.original_name)
            .bind(&video.filename)
            .bind(&video.mime_type)
            .bind(video.size_bytes)
            .bind(&video.storage_path)
            .fetch_one(&self.pool)
            .await
            .map_err(map_reference_error)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list(
        &self,
        subtopic_id: Option<&str>,
        page: PageRequest,
    ) -> Result<VideoPage, AppError> {
        let query = format!(
            r#"
            SELECT {}
            FROM videos
            WHERE ($1::text IS NULL OR subtopic_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            VIDEO_COLUMNS
        );

        let videos = sqlx::query_as::<Postgres, Video>(&query)
            .bind(subtopic_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM videos WHERE ($1::text IS NULL OR subtopic_id = $1)",
        )
        .bind(subtopic_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(VideoPage { videos, total })
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_for_subtopic(&self, subtopic_id: &str) -> Result<Vec<Video>, AppError> {
        let query = format!(
            "SELECT {} FROM videos WHERE subtopic_id = $1 ORDER BY created_at DESC, id DESC",
            VIDEO_COLUMNS
        );

        let videos = sqlx::query_as::<Postgres, Video>(&query)
            .bind(subtopic_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);

        let video = sqlx::query_as::<Postgres, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn reassign_subtopic(
        &self,
        id: Uuid,
        owner_id: Uuid,
        subtopic_id: &str,
    ) -> Result<Option<Video>, AppError> {
        let query = format!(
            r#"
            UPDATE videos
            SET subtopic_id = $3
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        sqlx::query_as::<Postgres, Video>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(subtopic_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_reference_error)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete", db.record_id = %id))]
    async fn delete_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<DeletedVideo>, AppError> {
        let deleted = sqlx::query_as::<Postgres, DeletedVideo>(
            r#"
            DELETE FROM videos
            WHERE id = $1 AND user_id = $2
            RETURNING id, filename, storage_path
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
