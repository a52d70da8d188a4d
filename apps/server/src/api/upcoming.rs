use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use storefront_core::upcoming::{NewUpcomingProduct, UpcomingProduct};
use tracing::debug;

async fn get_upcoming_products(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UpcomingProduct>>> {
    let today = Utc::now().date_naive();
    debug!("Fetching products releasing from {}...", today);
    let items = state.upcoming_service.get_upcoming_products(today)?;
    Ok(Json(items))
}

async fn get_all_upcoming_products(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UpcomingProduct>>> {
    let items = state.upcoming_service.get_all_upcoming_products()?;
    Ok(Json(items))
}

async fn get_upcoming_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UpcomingProduct>> {
    let item = state
        .upcoming_service
        .get_upcoming_product(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Upcoming product '{}' not found", id)))?;
    Ok(Json(item))
}

async fn create_upcoming_product(
    State(state): State<Arc<AppState>>,
    Json(item): Json<NewUpcomingProduct>,
) -> ApiResult<(StatusCode, Json<UpcomingProduct>)> {
    debug!("Creating upcoming product {}...", item.name);
    let created = state.upcoming_service.create_upcoming_product(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_upcoming_product(
    State(state): State<Arc<AppState>>,
    Json(item): Json<UpcomingProduct>,
) -> ApiResult<Json<UpcomingProduct>> {
    debug!("Updating upcoming product {}...", item.id);
    let updated = state.upcoming_service.update_upcoming_product(item).await?;
    Ok(Json(updated))
}

async fn delete_upcoming_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    debug!("Deleting upcoming product {}...", id);
    let _ = state.upcoming_service.delete_upcoming_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/upcoming", get(get_upcoming_products))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/upcoming",
            get(get_all_upcoming_products)
                .post(create_upcoming_product)
                .put(update_upcoming_product),
        )
        .route(
            "/upcoming/{id}",
            get(get_upcoming_product).delete(delete_upcoming_product),
        )
}
