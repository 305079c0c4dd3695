use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for an ad
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Ad {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub price: i64,
    pub description: String,
    pub is_published: bool,
    /// Stored image reference (`images/<uuid>.<ext>`), if uploaded.
    pub image: Option<String>,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ad row joined with its author's username, for detail responses
/// and permission checks.
#[derive(Debug, Clone, FromRow)]
pub struct AdWithAuthor {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub author: String,
    pub price: i64,
    pub description: String,
    pub is_published: bool,
    pub image: Option<String>,
    pub category_id: i64,
}

/// Summary row for the ad listing.
#[derive(Debug, Clone, FromRow)]
pub struct AdSummary {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub price: i64,
}
