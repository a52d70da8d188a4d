use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use storefront_core::{
    dashboard::{CategoryProductCount, DashboardStats},
    products::ProductSummary,
};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<i32>,
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(admin): CurrentUser,
) -> ApiResult<Json<DashboardStats>> {
    debug!("Dashboard stats requested by {}", admin.id);
    let stats = state.dashboard_service.get_stats()?;
    Ok(Json(stats))
}

async fn get_products_per_category(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategoryProductCount>>> {
    let counts = state.dashboard_service.get_products_per_category()?;
    Ok(Json(counts))
}

async fn get_recent_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<Vec<ProductSummary>>> {
    let products = state.dashboard_service.get_recent_products(params.limit)?;
    Ok(Json(products))
}

async fn get_low_stock(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LowStockParams>,
) -> ApiResult<Json<Vec<ProductSummary>>> {
    let products = state.dashboard_service.get_low_stock(params.threshold)?;
    Ok(Json(products))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/stats", get(get_stats))
        .route("/dashboard/categories", get(get_products_per_category))
        .route("/dashboard/recent", get(get_recent_products))
        .route("/dashboard/low-stock", get(get_low_stock))
}
