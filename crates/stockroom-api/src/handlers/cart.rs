//! Cart handlers

use axum::{
    extract::{Path, State},
    Json,
};
use stockroom_service::{
    AddCartLineRequest, CartResponse, CartService, CheckoutService, CommitReportResponse,
    UpdateCartLineRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Get the current user's cart (created lazily)
///
/// GET /cart
pub async fn get_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    let cart = service.get_cart(auth.actor()).await?;
    Ok(Json(cart))
}

/// Add an item to the cart
///
/// POST /cart/lines
pub async fn add_line(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddCartLineRequest>,
) -> ApiResult<Created<Json<CartResponse>>> {
    let service = CartService::new(state.service_context());
    let cart = service.add_line(auth.actor(), request).await?;
    Ok(Created(Json(cart)))
}

/// Overwrite a cart line's quantity (0 removes the line)
///
/// PATCH /cart/lines/{item_id}
pub async fn update_line(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCartLineRequest>,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    let cart = service
        .update_line(auth.actor(), &item_id, request.quantity)
        .await?;
    Ok(Json(cart))
}

/// Remove an item from the cart
///
/// DELETE /cart/lines/{item_id}
pub async fn remove_line(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<String>,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    let cart = service.remove_line(auth.actor(), &item_id).await?;
    Ok(Json(cart))
}

/// Clear the cart
///
/// DELETE /cart
pub async fn clear_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    let cart = service.clear(auth.actor()).await?;
    Ok(Json(cart))
}

/// Commit the cart, transferring stock into the user's inventory
///
/// POST /cart/commit
pub async fn commit_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CommitReportResponse>> {
    let service = CheckoutService::new(state.service_context());
    let report = service.commit_cart(auth.actor()).await?;
    Ok(Json(report))
}
