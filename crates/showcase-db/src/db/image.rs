use async_trait::async_trait;
use showcase_core::models::{ImageRecord, NewImageRecord};
use showcase_core::AppError;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const IMAGE_COLUMNS: &str = "id, image_url, storage_id, image_type, created_at";

/// Record repository for uploaded images
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert all records in one statement; either every row is stored or none.
    /// Returned records are in the same order as `records`.
    async fn insert_many(&self, records: &[NewImageRecord]) -> Result<Vec<ImageRecord>, AppError>;

    /// Every record, oldest first.
    async fn find_all(&self) -> Result<Vec<ImageRecord>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Postgres-backed image repository
#[derive(Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    #[tracing::instrument(skip(self, records), fields(db.table = "images", db.operation = "insert", count = records.len()))]
    async fn insert_many(&self, records: &[NewImageRecord]) -> Result<Vec<ImageRecord>, AppError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        // The CTE lets the RETURNING rows come back in VALUES order via seq
        let mut builder = QueryBuilder::<Postgres>::new(
            "WITH inserted AS (INSERT INTO images (image_url, storage_id, image_type) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(&record.image_url)
                .push_bind(&record.storage_id)
                .push_bind(record.image_type);
        });
        builder.push(format!(
            " RETURNING seq, {}) SELECT {} FROM inserted ORDER BY seq ASC",
            IMAGE_COLUMNS, IMAGE_COLUMNS
        ));

        let inserted = builder
            .build_query_as::<ImageRecord>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(inserted = inserted.len(), "Image records inserted");

        Ok(inserted)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    async fn find_all(&self) -> Result<Vec<ImageRecord>, AppError> {
        let records = sqlx::query_as::<Postgres, ImageRecord>(&format!(
            "SELECT {} FROM images ORDER BY seq ASC",
            IMAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, ImageRecord>(&format!(
            "SELECT {} FROM images WHERE id = $1",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "delete", db.record_id = %id))]
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
