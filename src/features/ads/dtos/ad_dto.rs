use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::ads::models::{AdSummary, AdWithAuthor};

/// Maximum accepted upload size for ad images (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// MIME types accepted by the image upload endpoint
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Listing item: id, name, author username, price.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdListItemDto {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub price: i64,
}

impl From<AdSummary> for AdListItemDto {
    fn from(a: AdSummary) -> Self {
        Self {
            id: a.id,
            name: a.name,
            author: a.author,
            price: a.price,
        }
    }
}

/// Detail shape: the author appears as a username, the category as an id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdDetailDto {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub price: i64,
    pub description: String,
    pub is_published: bool,
    pub image: Option<String>,
    pub category: i64,
}

impl AdDetailDto {
    pub fn from_row(row: AdWithAuthor, image_url: Option<String>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            author: row.author,
            price: row.price,
            description: row.description,
            is_published: row.is_published,
            image: image_url,
            category: row.category_id,
        }
    }
}

/// Shape echoed by create and image upload: raw foreign key ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdRepresentationDto {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub price: i64,
    pub description: String,
    pub category_id: i64,
    pub is_published: bool,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAdDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: String,
    pub author_id: i64,
    pub price: i64,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: String,
    pub category_id: i64,
    #[serde(default)]
    pub is_published: bool,
}

/// Partial update body; the author is never client-writable.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAdDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: Option<String>,
    pub price: Option<i64>,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub is_published: Option<bool>,
}

/// Image upload form for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAdImageDto {
    /// The image file to attach
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

/// Search parameters for the ad listing. Every present parameter narrows
/// the result set; the price bounds only apply together.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdListQuery {
    /// Category id
    #[serde(default, deserialize_with = "crate::core::extractor::empty_string_as_none")]
    pub cat: Option<i64>,
    /// Case-insensitive substring of the ad name
    #[serde(default, deserialize_with = "crate::core::extractor::empty_string_as_none")]
    pub text: Option<String>,
    /// Case-insensitive substring of any location name tied to the author
    #[serde(default, deserialize_with = "crate::core::extractor::empty_string_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "crate::core::extractor::empty_string_as_none")]
    pub price_from: Option<i64>,
    #[serde(default, deserialize_with = "crate::core::extractor::empty_string_as_none")]
    pub price_to: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_bounds_name_and_description() {
        let base = CreateAdDto {
            name: "Lada".to_string(),
            author_id: 1,
            price: 10_000,
            description: "runs fine".to_string(),
            category_id: 1,
            is_published: false,
        };
        assert!(base.validate().is_ok());

        let overlong = CreateAdDto {
            description: "x".repeat(2001),
            ..base.clone()
        };
        let errors = overlong.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));

        let nameless = CreateAdDto {
            name: String::new(),
            ..base
        };
        assert!(nameless.validate().is_err());
    }

    #[test]
    fn is_published_defaults_to_false() {
        let dto: CreateAdDto = serde_json::from_str(
            r#"{"name": "Lada", "author_id": 1, "price": 5, "description": "", "category_id": 2}"#,
        )
        .unwrap();
        assert!(!dto.is_published);
    }

    #[test]
    fn empty_query_params_read_as_absent() {
        let query: AdListQuery =
            serde_urlencoded::from_str("cat=&text=&location=&price_from=&price_to=").unwrap();
        assert_eq!(query.cat, None);
        assert_eq!(query.text, None);
        assert_eq!(query.price_from, None);
    }

    #[test]
    fn numeric_params_parse() {
        let query: AdListQuery =
            serde_urlencoded::from_str("cat=3&price_from=10&price_to=99").unwrap();
        assert_eq!(query.cat, Some(3));
        assert_eq!(query.price_from, Some(10));
        assert_eq!(query.price_to, Some(99));
    }

    #[test]
    fn malformed_numeric_param_is_an_error() {
        assert!(serde_urlencoded::from_str::<AdListQuery>("price_from=cheap").is_err());
    }
}
