use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: String,
}

/// Partial update body; an absent name keeps the stored one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: Option<String>,
}

/// Query params for listing categories
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// Exact category name to match
    #[serde(default, deserialize_with = "crate::core::extractor::empty_string_as_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_and_overlong_names() {
        assert!(CreateCategoryDto {
            name: String::new()
        }
        .validate()
        .is_err());

        assert!(CreateCategoryDto {
            name: "x".repeat(251)
        }
        .validate()
        .is_err());

        assert!(CreateCategoryDto {
            name: "Cars".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn update_allows_absent_name() {
        assert!(UpdateCategoryDto { name: None }.validate().is_ok());
        assert!(UpdateCategoryDto {
            name: Some("x".repeat(251))
        }
        .validate()
        .is_err());
    }
}
