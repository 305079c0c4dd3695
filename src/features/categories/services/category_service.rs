use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::shared::types::{Page, PageQuery};

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
    page_size: i64,
}

impl CategoryService {
    pub fn new(pool: PgPool, page_size: i64) -> Self {
        Self { pool, page_size }
    }

    /// List categories ordered by name, optionally narrowed to an exact name.
    pub async fn list(
        &self,
        name: Option<&str>,
        page: &PageQuery,
    ) -> Result<Page<CategoryResponseDto>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM categories WHERE ($1::text IS NULL OR name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count categories: {:?}", e);
            AppError::Database(e)
        })?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE ($1::text IS NULL OR name = $1)
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(name)
        .bind(self.page_size)
        .bind(page.offset(self.page_size))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        let items = categories.into_iter().map(|c| c.into()).collect();
        Ok(Page::new(total, items, self.page_size))
    }

    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Created category {} ({})", category.id, category.name);
        Ok(category.into())
    }

    /// Merge the partial body over the stored row and persist.
    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name), updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        Ok(category.into())
    }

    /// Delete the category; dependent ads go with it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted: Option<i64> = sqlx::query_scalar("DELETE FROM categories WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if deleted.is_none() {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Deleted category {}", id);
        Ok(())
    }
}
