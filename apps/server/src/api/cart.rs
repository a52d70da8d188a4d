use std::sync::Arc;

use crate::{
    api::shared::{request_currency, request_language, LanguageParams},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use storefront_core::cart::{Cart, CartAction, CartSummary};
use tracing::debug;

/// The client-held cart and the action to reduce it with
#[derive(Debug, Deserialize)]
pub struct ApplyCartRequest {
    #[serde(default)]
    pub cart: Cart,
    pub action: CartAction,
}

async fn apply_cart_action(Json(request): Json<ApplyCartRequest>) -> ApiResult<Json<Cart>> {
    let ApplyCartRequest { mut cart, action } = request;
    debug!("Applying cart action {:?}...", action);
    cart.apply(action)?;
    Ok(Json(cart))
}

async fn summarize_cart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<LanguageParams>,
    Json(cart): Json<Cart>,
) -> ApiResult<Json<CartSummary>> {
    let language = request_language(params.lang, &headers);
    let currency = request_currency(&state, &headers)?;
    debug!(
        "Pricing cart of {} lines in {}...",
        cart.items.len(),
        currency.code
    );
    let summary = state
        .cart_service
        .price_cart(&cart, Some(&currency), language.as_deref())?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cart/apply", post(apply_cart_action))
        .route("/cart/summary", post(summarize_cart))
}
