use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a curated selection of ads
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Selection {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
