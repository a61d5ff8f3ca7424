//! Category handlers

use axum::{
    extract::{Path, State},
    Json,
};
use stockroom_service::{
    CategoryResponse, CategoryService, CreateCategoryRequest, UpdateCategoryRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List all categories
///
/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Create a new category
///
/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let response = service.create(auth.actor(), request).await?;
    Ok(Created(Json(response)))
}

/// Rename a category
///
/// PATCH /categories/{category_id}
pub async fn rename_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let service = CategoryService::new(state.service_context());
    let response = service.rename(auth.actor(), &category_id, request).await?;
    Ok(Json(response))
}

/// Delete a category (refused while items reference it)
///
/// DELETE /categories/{category_id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = CategoryService::new(state.service_context());
    service.delete(auth.actor(), &category_id).await?;
    Ok(NoContent)
}
