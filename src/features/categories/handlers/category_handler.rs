use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, ListCategoriesQuery, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{Page, PageQuery, StatusResponse};

/// List categories
///
/// Ordered by name; `name` narrows to an exact match.
#[utoipa::path(
    get,
    path = "/cat/",
    params(ListCategoriesQuery, PageQuery),
    responses(
        (status = 200, description = "Paginated categories", body = Page<CategoryResponseDto>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<Json<Page<CategoryResponseDto>>> {
    let page = service.list(query.name.as_deref(), &page).await?;
    Ok(Json(page))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/cat/create/",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponseDto),
        (status = 422, description = "Validation failure")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<CategoryResponseDto>)> {
    dto.validate()?;

    let category = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/cat/{id}/",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponseDto),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponseDto>> {
    let category = service.get(id).await?;
    Ok(Json(category))
}

/// Update a category
///
/// Accepts a partial body; an absent name keeps the stored one.
#[utoipa::path(
    post,
    path = "/cat/{id}/update/",
    params(("id" = i64, Path, description = "Category id")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 202, description = "Category updated", body = CategoryResponseDto),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation failure")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<(StatusCode, Json<CategoryResponseDto>)> {
    dto.validate()?;

    let category = service.update(id, dto).await?;
    Ok((StatusCode::ACCEPTED, Json(category)))
}

/// Delete a category and its ads
#[utoipa::path(
    delete,
    path = "/cat/{id}/delete/",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = StatusResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>> {
    service.delete(id).await?;
    Ok(Json(StatusResponse::ok()))
}
