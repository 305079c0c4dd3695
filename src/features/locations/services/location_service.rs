use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{
    CreateLocationDto, LocationResponseDto, UpdateLocationDto,
};
use crate::features::locations::models::Location;
use crate::shared::types::{Page, PageQuery};

/// Service for location operations
pub struct LocationService {
    pool: PgPool,
    page_size: i64,
}

impl LocationService {
    pub fn new(pool: PgPool, page_size: i64) -> Self {
        Self { pool, page_size }
    }

    pub async fn list(&self, page: &PageQuery) -> Result<Page<LocationResponseDto>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count locations: {:?}", e);
                AppError::Database(e)
            })?;

        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, lat, lng, created_at, updated_at
            FROM locations
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(self.page_size)
        .bind(page.offset(self.page_size))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list locations: {:?}", e);
            AppError::Database(e)
        })?;

        let items = locations.into_iter().map(|l| l.into()).collect();
        Ok(Page::new(total, items, self.page_size))
    }

    pub async fn get(&self, id: i64) -> Result<LocationResponseDto> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, lat, lng, created_at, updated_at FROM locations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get location {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        location
            .map(|l| l.into())
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    pub async fn create(&self, dto: CreateLocationDto) -> Result<LocationResponseDto> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, lat, lng)
            VALUES ($1, $2, $3)
            RETURNING id, name, lat, lng, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.lat)
        .bind(dto.lng)
        .fetch_one(&self.pool)
        .await
        .map_err(map_name_conflict)?;

        tracing::info!("Created location {} ({})", location.id, location.name);
        Ok(location.into())
    }

    /// Merge the partial body over the stored row and persist.
    pub async fn update(&self, id: i64, dto: UpdateLocationDto) -> Result<LocationResponseDto> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = COALESCE($2, name),
                lat = COALESCE($3, lat),
                lng = COALESCE($4, lng),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, lat, lng, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref())
        .bind(dto.lat)
        .bind(dto.lng)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_name_conflict)?
        .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))?;

        Ok(location.into())
    }

    /// Delete the location; user associations go with it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM locations WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete location {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        if deleted.is_none() {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }

        tracing::info!("Deleted location {}", id);
        Ok(())
    }
}

/// Location names are unique; surface a duplicate as a field-level 422.
fn map_name_conflict(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::field_error("name", "Location with this name already exists")
        }
        _ => {
            tracing::error!("Location write failed: {:?}", e);
            AppError::Database(e)
        }
    }
}
