use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::models::Location;

/// Response DTO for a location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub id: i64,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            lat: l.lat,
            lng: l.lng,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLocationDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Partial update body; absent fields keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationDto {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_optional() {
        let dto: CreateLocationDto =
            serde_json::from_str(r#"{"name": "Moscow"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.lat, None);
        assert_eq!(dto.lng, None);
    }

    #[test]
    fn name_length_is_bounded() {
        let dto = CreateLocationDto {
            name: "x".repeat(251),
            lat: None,
            lng: None,
        };
        assert!(dto.validate().is_err());
    }
}
