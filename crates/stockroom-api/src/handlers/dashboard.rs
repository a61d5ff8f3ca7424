//! Dashboard handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use stockroom_service::{ActivityResponse, DashboardService, DashboardStatsResponse};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Aggregate catalog numbers
///
/// GET /dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<DashboardStatsResponse>> {
    let service = DashboardService::new(state.service_context());
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// Activity feed query parameters
#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    #[serde(default = "default_activity_limit")]
    pub limit: i64,
}

fn default_activity_limit() -> i64 {
    10
}

/// Latest catalog movements
///
/// GET /dashboard/activity
pub async fn recent_activity(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ActivityParams>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let service = DashboardService::new(state.service_context());
    let activity = service.recent_activity(params.limit).await?;
    Ok(Json(activity))
}
