use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a location users can associate with
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
