use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::ads::dtos::{
    AdDetailDto, AdListItemDto, AdListQuery, AdRepresentationDto, CreateAdDto, UpdateAdDto,
    UploadAdImageDto, ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE,
};
use crate::features::ads::services::AdService;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::ensure_can_mutate_ad;
use crate::shared::types::{Page, PageQuery};

/// List ads
///
/// Search parameters combine with AND; the price bounds only apply when
/// both are present.
#[utoipa::path(
    get,
    path = "/ad/",
    params(AdListQuery, PageQuery),
    responses(
        (status = 200, description = "Paginated ads", body = Page<AdListItemDto>),
        (status = 400, description = "Malformed query parameters")
    ),
    tag = "ads"
)]
pub async fn list_ads(
    State(service): State<Arc<AdService>>,
    AppQuery(filter): AppQuery<AdListQuery>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<Json<Page<AdListItemDto>>> {
    let page = service.list(&filter, &page).await?;
    Ok(Json(page))
}

/// Create an ad
#[utoipa::path(
    post,
    path = "/ad/create/",
    request_body = CreateAdDto,
    responses(
        (status = 201, description = "Ad created", body = AdRepresentationDto),
        (status = 422, description = "Validation failure")
    ),
    tag = "ads"
)]
pub async fn create_ad(
    State(service): State<Arc<AdService>>,
    AppJson(dto): AppJson<CreateAdDto>,
) -> Result<(StatusCode, Json<AdRepresentationDto>)> {
    dto.validate()?;

    let ad = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

/// Get an ad
///
/// Requires authentication.
#[utoipa::path(
    get,
    path = "/ad/{id}/",
    params(("id" = i64, Path, description = "Ad id")),
    responses(
        (status = 200, description = "Ad found", body = AdDetailDto),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ads"
)]
pub async fn get_ad(
    _user: AuthenticatedUser,
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
) -> Result<Json<AdDetailDto>> {
    let row = service.get_with_author(id).await?;
    Ok(Json(service.to_detail(row)))
}

/// Update an ad
///
/// Author or moderator/admin only; the author field itself is immutable.
#[utoipa::path(
    put,
    path = "/ad/{id}/",
    params(("id" = i64, Path, description = "Ad id")),
    request_body = UpdateAdDto,
    responses(
        (status = 200, description = "Ad updated", body = AdDetailDto),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the author or a moderator"),
        (status = 404, description = "Ad not found"),
        (status = 422, description = "Validation failure")
    ),
    security(("bearer_auth" = [])),
    tag = "ads"
)]
pub async fn update_ad(
    user: AuthenticatedUser,
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateAdDto>,
) -> Result<Json<AdDetailDto>> {
    dto.validate()?;

    let current = service.get_with_author(id).await?;
    ensure_can_mutate_ad(&user, current.author_id)?;

    let updated = service.update(id, dto).await?;
    Ok(Json(updated))
}

/// Delete an ad
///
/// Author or moderator/admin only.
#[utoipa::path(
    delete,
    path = "/ad/{id}/",
    params(("id" = i64, Path, description = "Ad id")),
    responses(
        (status = 204, description = "Ad deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the author or a moderator"),
        (status = 404, description = "Ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ads"
)]
pub async fn delete_ad(
    user: AuthenticatedUser,
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let current = service.get_with_author(id).await?;
    ensure_can_mutate_ad(&user, current.author_id)?;

    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace an ad image
///
/// Multipart form with an `image` file field. A request without the field
/// leaves the stored image untouched and echoes the current representation.
#[utoipa::path(
    post,
    path = "/ad/{id}/upload_image/",
    params(("id" = i64, Path, description = "Ad id")),
    request_body(
        content = UploadAdImageDto,
        content_type = "multipart/form-data",
        description = "Multipart form carrying the image file",
    ),
    responses(
        (status = 202, description = "Image stored", body = AdRepresentationDto),
        (status = 404, description = "Ad not found"),
        (status = 422, description = "Rejected file")
    ),
    tag = "ads"
)]
pub async fn upload_ad_image(
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AdRepresentationDto>)> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "image" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            if !ALLOWED_IMAGE_MIME_TYPES.contains(&content_type.as_str()) {
                return Err(AppError::field_error(
                    "image",
                    "Upload a valid image (jpeg, png, gif or webp)",
                ));
            }

            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "image".to_string());

            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            if data.len() > MAX_IMAGE_SIZE {
                return Err(AppError::field_error("image", "Image exceeds 5MB"));
            }

            file = Some((file_name, data.to_vec()));
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    let ad = match file {
        Some((file_name, data)) => service.set_image(id, &file_name, &data).await?,
        // No file sent: keep the stored image and echo the current state
        None => service.get_representation(id).await?,
    };

    Ok((StatusCode::ACCEPTED, Json(ad)))
}
