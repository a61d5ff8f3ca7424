//! Personal inventory handlers

use axum::{
    extract::{Path, State},
    Json,
};
use stockroom_service::{InventoryService, LedgerEntryResponse, ReturnItemRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List everything the current user has checked out
///
/// GET /inventory
pub async fn list_inventory(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<LedgerEntryResponse>>> {
    let service = InventoryService::new(state.service_context());
    let inventory = service.list_inventory(auth.actor()).await?;
    Ok(Json(inventory))
}

/// Return borrowed quantity to the catalog
///
/// POST /inventory/{item_id}/return
pub async fn return_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<String>,
    ValidatedJson(request): ValidatedJson<ReturnItemRequest>,
) -> ApiResult<Json<Vec<LedgerEntryResponse>>> {
    let service = InventoryService::new(state.service_context());
    let inventory = service.return_item(auth.actor(), &item_id, request).await?;
    Ok(Json(inventory))
}
