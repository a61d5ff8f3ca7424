//! Catalog item handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use stockroom_core::traits::ItemQuery;
use stockroom_service::{CatalogService, CreateItemRequest, ItemResponse, UpdateItemRequest};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Extra listing filters
#[derive(Debug, Default, Deserialize)]
pub struct ItemListParams {
    /// Filter by category (snowflake as string)
    pub category_id: Option<String>,
    /// Include retired items (catalog managers only)
    #[serde(default)]
    pub include_retired: bool,
}

/// List catalog items
///
/// GET /items
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
    Query(params): Query<ItemListParams>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let category_id = params
        .category_id
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::invalid_query("Invalid category_id format"))
        })
        .transpose()?;

    let query = ItemQuery {
        before: pagination.before,
        after: pagination.after,
        limit: pagination.limit,
        include_retired: params.include_retired,
        category_id,
    };

    let service = CatalogService::new(state.service_context());
    let items = service.list_items(auth.actor(), query).await?;
    Ok(Json(items))
}

/// Create a new item
///
/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> ApiResult<Created<Json<ItemResponse>>> {
    let service = CatalogService::new(state.service_context());
    let response = service.create_item(auth.actor(), request).await?;
    Ok(Created(Json(response)))
}

/// Get item by ID
///
/// GET /items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(item_id): Path<String>,
) -> ApiResult<Json<ItemResponse>> {
    let service = CatalogService::new(state.service_context());
    let response = service.get_item(&item_id).await?;
    Ok(Json(response))
}

/// Update item metadata and stock
///
/// PATCH /items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let service = CatalogService::new(state.service_context());
    let response = service.update_item(auth.actor(), &item_id, request).await?;
    Ok(Json(response))
}

/// Retirement query parameters
#[derive(Debug, Default, Deserialize)]
pub struct RetireParams {
    /// Retire even while stock remains
    #[serde(default)]
    pub force: bool,
}

/// Retire an item (soft delete)
///
/// DELETE /items/{item_id}?force=true
pub async fn retire_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<String>,
    Query(params): Query<RetireParams>,
) -> ApiResult<Json<ItemResponse>> {
    let service = CatalogService::new(state.service_context());
    let response = service
        .retire_item(auth.actor(), &item_id, params.force)
        .await?;
    Ok(Json(response))
}

/// Physically delete an item
///
/// DELETE /items/{item_id}/purge
pub async fn purge_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = CatalogService::new(state.service_context());
    service.purge_item(auth.actor(), &item_id).await?;
    Ok(NoContent)
}

/// Rebuild the search index over the whole catalog
///
/// POST /admin/reindex
pub async fn reindex(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let service = CatalogService::new(state.service_context());
    let written = service.reindex(auth.actor()).await?;
    Ok(Json(serde_json::json!({ "indexed": written })))
}
