use std::sync::Arc;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::{
    AdDetailDto, AdListItemDto, AdListQuery, AdRepresentationDto, CreateAdDto, UpdateAdDto,
};
use crate::features::ads::models::{Ad, AdSummary, AdWithAuthor};
use crate::modules::storage::ImageStore;
use crate::shared::types::{Page, PageQuery};

const DETAIL_COLUMNS: &str = r#"
    a.id, a.name, a.author_id, u.username AS author, a.price,
    a.description, a.is_published, a.image, a.category_id
"#;

/// Service for ad operations
pub struct AdService {
    pool: PgPool,
    page_size: i64,
    images: Arc<ImageStore>,
}

impl AdService {
    pub fn new(pool: PgPool, page_size: i64, images: Arc<ImageStore>) -> Self {
        Self {
            pool,
            page_size,
            images,
        }
    }

    /// List ads matching the search parameters, ordered by id.
    pub async fn list(&self, filter: &AdListQuery, page: &PageQuery) -> Result<Page<AdListItemDto>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ads a WHERE TRUE");
        apply_filters(&mut count, filter);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count ads: {:?}", e);
                AppError::Database(e)
            })?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT a.id, a.name, u.username AS author, a.price \
             FROM ads a JOIN users u ON u.id = a.author_id WHERE TRUE",
        );
        apply_filters(&mut select, filter);
        select.push(" ORDER BY a.id LIMIT ");
        select.push_bind(self.page_size);
        select.push(" OFFSET ");
        select.push_bind(page.offset(self.page_size));

        let ads: Vec<AdSummary> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list ads: {:?}", e);
                AppError::Database(e)
            })?;

        let items = ads.into_iter().map(|a| a.into()).collect();
        Ok(Page::new(total, items, self.page_size))
    }

    /// Ad row with its author's username; also feeds the permission gate.
    pub async fn get_with_author(&self, id: i64) -> Result<AdWithAuthor> {
        let sql = format!(
            "SELECT {} FROM ads a JOIN users u ON u.id = a.author_id WHERE a.id = $1",
            DETAIL_COLUMNS
        );
        let ad = sqlx::query_as::<_, AdWithAuthor>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get ad {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        ad.ok_or_else(|| AppError::NotFound(format!("Ad {} not found", id)))
    }

    pub fn to_detail(&self, row: AdWithAuthor) -> AdDetailDto {
        let image_url = row.image.as_deref().map(|key| self.images.url(key));
        AdDetailDto::from_row(row, image_url)
    }

    pub async fn create(&self, dto: CreateAdDto) -> Result<AdRepresentationDto> {
        let ad = sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO ads (name, author_id, price, description, category_id, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, author_id, price, description, is_published, image,
                      category_id, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.author_id)
        .bind(dto.price)
        .bind(&dto.description)
        .bind(dto.category_id)
        .bind(dto.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(map_reference_error)?;

        tracing::info!("Created ad {} by user {}", ad.id, ad.author_id);
        Ok(self.to_representation(ad))
    }

    /// Merge the partial body over the stored row and persist.
    pub async fn update(&self, id: i64, dto: UpdateAdDto) -> Result<AdDetailDto> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE ads
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                category_id = COALESCE($5, category_id),
                is_published = COALESCE($6, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref())
        .bind(dto.price)
        .bind(dto.description.as_deref())
        .bind(dto.category_id)
        .bind(dto.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_reference_error)?;

        if updated.is_none() {
            return Err(AppError::NotFound(format!("Ad {} not found", id)));
        }

        let row = self.get_with_author(id).await?;
        Ok(self.to_detail(row))
    }

    /// Delete the ad and its stored image, if any.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM ads WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete ad {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        match image {
            None => Err(AppError::NotFound(format!("Ad {} not found", id))),
            Some(image) => {
                if let Some(key) = image {
                    self.images.delete(&key).await?;
                }
                tracing::info!("Deleted ad {}", id);
                Ok(())
            }
        }
    }

    /// Store the uploaded bytes and swap the ad's image reference.
    pub async fn set_image(
        &self,
        id: i64,
        file_name: &str,
        data: &[u8],
    ) -> Result<AdRepresentationDto> {
        // 404 before touching the filesystem
        let current = self.get_with_author(id).await?;

        let key = self.images.save(file_name, data).await?;

        let ad = sqlx::query_as::<_, Ad>(
            r#"
            UPDATE ads SET image = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, author_id, price, description, is_published, image,
                      category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to attach image to ad {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        if let Some(old_key) = current.image {
            self.images.delete(&old_key).await?;
        }

        Ok(self.to_representation(ad))
    }

    /// Current create-shape representation, for the no-file upload case.
    pub async fn get_representation(&self, id: i64) -> Result<AdRepresentationDto> {
        let row = self.get_with_author(id).await?;
        let image = row.image.as_deref().map(|key| self.images.url(key));
        Ok(AdRepresentationDto {
            id: row.id,
            name: row.name,
            author_id: row.author_id,
            price: row.price,
            description: row.description,
            category_id: row.category_id,
            is_published: row.is_published,
            image,
        })
    }

    fn to_representation(&self, ad: Ad) -> AdRepresentationDto {
        let image = ad.image.as_deref().map(|key| self.images.url(key));
        AdRepresentationDto {
            id: ad.id,
            name: ad.name,
            author_id: ad.author_id,
            price: ad.price,
            description: ad.description,
            category_id: ad.category_id,
            is_published: ad.is_published,
            image,
        }
    }
}

/// Append one `AND` clause per present search parameter. The price bounds
/// are intentionally paired: a lone bound has no effect.
fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &AdListQuery) {
    if let Some(cat) = filter.cat {
        builder.push(" AND a.category_id = ").push_bind(cat);
    }
    if let Some(text) = &filter.text {
        builder.push(" AND a.name ILIKE ").push_bind(like_contains(text));
    }
    if let Some(location) = &filter.location {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM user_locations ul \
                 JOIN locations l ON l.id = ul.location_id \
                 WHERE ul.user_id = a.author_id AND l.name ILIKE ",
            )
            .push_bind(like_contains(location));
        builder.push(")");
    }
    if let (Some(from), Some(to)) = (filter.price_from, filter.price_to) {
        builder.push(" AND a.price >= ").push_bind(from);
        builder.push(" AND a.price <= ").push_bind(to);
    }
}

/// `%term%` with LIKE metacharacters escaped.
fn like_contains(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Foreign key failures on ad writes map to the referencing field.
fn map_reference_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() {
            let constraint = db.constraint().unwrap_or_default();
            if constraint.contains("author") {
                return AppError::field_error("author_id", "Referenced user does not exist");
            }
            if constraint.contains("category") {
                return AppError::field_error("category_id", "Referenced category does not exist");
            }
        }
    }
    tracing::error!("Ad write failed: {:?}", e);
    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(filter: &AdListQuery) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ads a WHERE TRUE");
        apply_filters(&mut builder, filter);
        builder.into_sql()
    }

    #[test]
    fn no_params_means_no_clauses() {
        let sql = sql_for(&AdListQuery::default());
        assert_eq!(sql, "SELECT COUNT(*) FROM ads a WHERE TRUE");
    }

    #[test]
    fn each_param_narrows() {
        let sql = sql_for(&AdListQuery {
            cat: Some(3),
            text: Some("lada".into()),
            location: Some("mos".into()),
            price_from: Some(10),
            price_to: Some(99),
        });
        assert!(sql.contains("a.category_id = $1"));
        assert!(sql.contains("a.name ILIKE $2"));
        assert!(sql.contains("l.name ILIKE $3"));
        assert!(sql.contains("a.price >= $4"));
        assert!(sql.contains("a.price <= $5"));
    }

    #[test]
    fn lone_price_bound_is_ignored() {
        let lower_only = sql_for(&AdListQuery {
            price_from: Some(10),
            ..Default::default()
        });
        assert!(!lower_only.contains("price"));

        let upper_only = sql_for(&AdListQuery {
            price_to: Some(99),
            ..Default::default()
        });
        assert!(!upper_only.contains("price"));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_contains("50%"), "%50\\%%");
        assert_eq!(like_contains("a_b"), "%a\\_b%");
        assert_eq!(like_contains("c\\d"), "%c\\\\d%");
        assert_eq!(like_contains("plain"), "%plain%");
    }
}
