use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::locations::dtos::{
    CreateLocationDto, LocationResponseDto, UpdateLocationDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::{Page, PageQuery};

/// List locations
#[utoipa::path(
    get,
    path = "/location/",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated locations", body = Page<LocationResponseDto>),
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(service): State<Arc<LocationService>>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<Json<Page<LocationResponseDto>>> {
    let page = service.list(&page).await?;
    Ok(Json(page))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/location/",
    request_body = CreateLocationDto,
    responses(
        (status = 201, description = "Location created", body = LocationResponseDto),
        (status = 422, description = "Validation failure")
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<CreateLocationDto>,
) -> Result<(StatusCode, Json<LocationResponseDto>)> {
    dto.validate()?;

    let location = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Get a location by id
#[utoipa::path(
    get,
    path = "/location/{id}/",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location found", body = LocationResponseDto),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<LocationResponseDto>> {
    let location = service.get(id).await?;
    Ok(Json(location))
}

/// Update a location
///
/// PUT and PATCH share merge semantics: absent fields keep stored values.
#[utoipa::path(
    put,
    path = "/location/{id}/",
    params(("id" = i64, Path, description = "Location id")),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = LocationResponseDto),
        (status = 404, description = "Location not found"),
        (status = 422, description = "Validation failure")
    ),
    tag = "locations"
)]
pub async fn update_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<Json<LocationResponseDto>> {
    dto.validate()?;

    let location = service.update(id, dto).await?;
    Ok(Json(location))
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/location/{id}/",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
