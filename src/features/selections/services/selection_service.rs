use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::AdDetailDto;
use crate::features::ads::models::AdWithAuthor;
use crate::features::selections::dtos::{
    CreateSelectionDto, SelectionDetailDto, SelectionListItemDto, SelectionResponseDto,
    UpdateSelectionDto,
};
use crate::features::selections::models::Selection;
use crate::modules::storage::ImageStore;
use crate::shared::types::{Page, PageQuery};

/// Service for selection operations
pub struct SelectionService {
    pool: PgPool,
    page_size: i64,
    images: Arc<ImageStore>,
}

impl SelectionService {
    pub fn new(pool: PgPool, page_size: i64, images: Arc<ImageStore>) -> Self {
        Self {
            pool,
            page_size,
            images,
        }
    }

    pub async fn list(&self, page: &PageQuery) -> Result<Page<SelectionListItemDto>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM selections")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count selections: {:?}", e);
                AppError::Database(e)
            })?;

        let selections = sqlx::query_as::<_, Selection>(
            r#"
            SELECT id, name, owner_id, created_at, updated_at
            FROM selections
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(self.page_size)
        .bind(page.offset(self.page_size))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list selections: {:?}", e);
            AppError::Database(e)
        })?;

        let items = selections.into_iter().map(|s| s.into()).collect();
        Ok(Page::new(total, items, self.page_size))
    }

    /// Selection row alone; feeds the ownership check.
    pub async fn get(&self, id: i64) -> Result<Selection> {
        let selection = sqlx::query_as::<_, Selection>(
            "SELECT id, name, owner_id, created_at, updated_at FROM selections WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get selection {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        selection.ok_or_else(|| AppError::NotFound(format!("Selection {} not found", id)))
    }

    /// Retrieval shape with every item expanded to a full ad representation.
    pub async fn get_detail(&self, id: i64) -> Result<SelectionDetailDto> {
        let selection = self.get(id).await?;

        let rows = sqlx::query_as::<_, AdWithAuthor>(
            r#"
            SELECT a.id, a.name, a.author_id, u.username AS author, a.price,
                   a.description, a.is_published, a.image, a.category_id
            FROM selection_items si
            JOIN ads a ON a.id = si.ad_id
            JOIN users u ON u.id = a.author_id
            WHERE si.selection_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load items of selection {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let items = rows
            .into_iter()
            .map(|row| {
                let image_url = row.image.as_deref().map(|key| self.images.url(key));
                AdDetailDto::from_row(row, image_url)
            })
            .collect();

        Ok(SelectionDetailDto {
            id: selection.id,
            name: selection.name,
            owner: selection.owner_id,
            items,
        })
    }

    /// Create a selection owned by the requester.
    pub async fn create(
        &self,
        owner_id: i64,
        dto: CreateSelectionDto,
    ) -> Result<SelectionResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let selection = sqlx::query_as::<_, Selection>(
            r#"
            INSERT INTO selections (name, owner_id)
            VALUES ($1, $2)
            RETURNING id, name, owner_id, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create selection: {:?}", e);
            AppError::Database(e)
        })?;

        replace_items(&mut tx, selection.id, &dto.items).await?;
        let items = stored_items(&mut tx, selection.id).await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Created selection {} for user {}", selection.id, owner_id);
        Ok(SelectionResponseDto {
            id: selection.id,
            name: selection.name,
            owner: selection.owner_id,
            items,
        })
    }

    /// Merge the partial body; a present item list replaces the stored set.
    pub async fn update(&self, id: i64, dto: UpdateSelectionDto) -> Result<SelectionResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let selection = sqlx::query_as::<_, Selection>(
            r#"
            UPDATE selections
            SET name = COALESCE($2, name), updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update selection {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Selection {} not found", id)))?;

        if let Some(items) = &dto.items {
            sqlx::query("DELETE FROM selection_items WHERE selection_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            replace_items(&mut tx, id, items).await?;
        }

        let items = stored_items(&mut tx, id).await?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(SelectionResponseDto {
            id: selection.id,
            name: selection.name,
            owner: selection.owner_id,
            items,
        })
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM selections WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete selection {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        if deleted.is_none() {
            return Err(AppError::NotFound(format!("Selection {} not found", id)));
        }

        tracing::info!("Deleted selection {}", id);
        Ok(())
    }
}

async fn replace_items(
    tx: &mut Transaction<'_, Postgres>,
    selection_id: i64,
    items: &[i64],
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO selection_items (selection_id, ad_id)
        SELECT $1, unnest($2::bigint[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(selection_id)
    .bind(items)
    .execute(&mut **tx)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::field_error("items", "Referenced ad does not exist")
        }
        _ => {
            tracing::error!("Failed to write selection items: {:?}", e);
            AppError::Database(e)
        }
    })?;

    Ok(())
}

async fn stored_items(tx: &mut Transaction<'_, Postgres>, selection_id: i64) -> Result<Vec<i64>> {
    sqlx::query_scalar("SELECT ad_id FROM selection_items WHERE selection_id = $1 ORDER BY ad_id")
        .bind(selection_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read selection items: {:?}", e);
            AppError::Database(e)
        })
}
