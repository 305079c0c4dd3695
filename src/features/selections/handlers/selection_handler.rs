use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::ensure_selection_owner;
use crate::features::selections::dtos::{
    CreateSelectionDto, SelectionDetailDto, SelectionListItemDto, SelectionResponseDto,
    UpdateSelectionDto,
};
use crate::features::selections::services::SelectionService;
use crate::shared::types::{Page, PageQuery};

/// List selections
#[utoipa::path(
    get,
    path = "/selection/",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated selections", body = Page<SelectionListItemDto>),
    ),
    tag = "selections"
)]
pub async fn list_selections(
    State(service): State<Arc<SelectionService>>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<Json<Page<SelectionListItemDto>>> {
    let page = service.list(&page).await?;
    Ok(Json(page))
}

/// Create a selection
///
/// The requester becomes the owner; any owner value in the body is ignored.
#[utoipa::path(
    post,
    path = "/selection/",
    request_body = CreateSelectionDto,
    responses(
        (status = 201, description = "Selection created", body = SelectionResponseDto),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failure")
    ),
    security(("bearer_auth" = [])),
    tag = "selections"
)]
pub async fn create_selection(
    user: AuthenticatedUser,
    State(service): State<Arc<SelectionService>>,
    AppJson(dto): AppJson<CreateSelectionDto>,
) -> Result<(StatusCode, Json<SelectionResponseDto>)> {
    dto.validate()?;

    let selection = service.create(user.id, dto).await?;
    Ok((StatusCode::CREATED, Json(selection)))
}

/// Get a selection with its items expanded
#[utoipa::path(
    get,
    path = "/selection/{id}/",
    params(("id" = i64, Path, description = "Selection id")),
    responses(
        (status = 200, description = "Selection found", body = SelectionDetailDto),
        (status = 404, description = "Selection not found")
    ),
    tag = "selections"
)]
pub async fn get_selection(
    State(service): State<Arc<SelectionService>>,
    Path(id): Path<i64>,
) -> Result<Json<SelectionDetailDto>> {
    let selection = service.get_detail(id).await?;
    Ok(Json(selection))
}

/// Update a selection
///
/// Owner only; a present item list replaces the stored set.
#[utoipa::path(
    put,
    path = "/selection/{id}/",
    params(("id" = i64, Path, description = "Selection id")),
    request_body = UpdateSelectionDto,
    responses(
        (status = 200, description = "Selection updated", body = SelectionResponseDto),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Selection not found"),
        (status = 422, description = "Validation failure")
    ),
    security(("bearer_auth" = [])),
    tag = "selections"
)]
pub async fn update_selection(
    user: AuthenticatedUser,
    State(service): State<Arc<SelectionService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateSelectionDto>,
) -> Result<Json<SelectionResponseDto>> {
    dto.validate()?;

    let current = service.get(id).await?;
    ensure_selection_owner(&user, current.owner_id)?;

    let selection = service.update(id, dto).await?;
    Ok(Json(selection))
}

/// Delete a selection
///
/// Owner only.
#[utoipa::path(
    delete,
    path = "/selection/{id}/",
    params(("id" = i64, Path, description = "Selection id")),
    responses(
        (status = 204, description = "Selection deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Selection not found")
    ),
    security(("bearer_auth" = [])),
    tag = "selections"
)]
pub async fn delete_selection(
    user: AuthenticatedUser,
    State(service): State<Arc<SelectionService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let current = service.get(id).await?;
    ensure_selection_owner(&user, current.owner_id)?;

    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
