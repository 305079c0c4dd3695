use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::ads::dtos::AdDetailDto;
use crate::features::selections::models::Selection;

/// Listing shape: id and name only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionListItemDto {
    pub id: i64,
    pub name: String,
}

impl From<Selection> for SelectionListItemDto {
    fn from(s: Selection) -> Self {
        Self {
            id: s.id,
            name: s.name,
        }
    }
}

/// Create/update echo: the item set as raw ad ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionResponseDto {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    pub items: Vec<i64>,
}

/// Retrieval shape: every item expanded to its full ad representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionDetailDto {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    pub items: Vec<AdDetailDto>,
}

/// Create body. Deliberately has no owner field: ownership always comes
/// from the authenticated requester.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSelectionDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: String,
    /// Ad ids to include
    #[serde(default)]
    pub items: Vec<i64>,
}

/// Partial update body; absent fields keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSelectionDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: Option<String>,
    pub items: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_in_request_body_is_dropped() {
        // A client trying to smuggle an owner id gets it silently ignored;
        // there is simply no field to land on.
        let dto: CreateSelectionDto =
            serde_json::from_str(r#"{"name": "Wheels", "owner": 999, "items": [1, 2]}"#).unwrap();
        assert_eq!(dto.name, "Wheels");
        assert_eq!(dto.items, vec![1, 2]);
    }

    #[test]
    fn items_default_to_empty() {
        let dto: CreateSelectionDto = serde_json::from_str(r#"{"name": "Wheels"}"#).unwrap();
        assert!(dto.items.is_empty());
    }

    #[test]
    fn name_length_is_bounded() {
        let dto = CreateSelectionDto {
            name: "x".repeat(251),
            items: vec![],
        };
        assert!(dto.validate().is_err());
    }
}
