use std::sync::Arc;

use crate::{
    api::shared::{currency_cookie, request_currency},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderName, HeaderValue},
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use storefront_core::{currencies::Currency, Error as CoreError};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct SelectCurrencyRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateRequest {
    pub exchange_rate: Decimal,
}

async fn get_currencies(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Currency>>> {
    let currencies = state.currency_service.get_currencies()?;
    Ok(Json(currencies))
}

async fn get_selected_currency(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Currency>> {
    let currency = request_currency(&state, &headers)?;
    Ok(Json(currency))
}

async fn select_currency(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectCurrencyRequest>,
) -> ApiResult<([(HeaderName, HeaderValue); 1], Json<Currency>)> {
    debug!("Selecting currency {}...", request.code);
    let currency = state
        .currency_service
        .get_currency(&request.code)?
        .ok_or_else(|| CoreError::UnsupportedCurrency(request.code.trim().to_uppercase()))?;
    let cookie = currency_cookie(&currency)?;
    Ok(([(SET_COOKIE, cookie)], Json(currency)))
}

async fn update_exchange_rate(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExchangeRateRequest>,
) -> ApiResult<Json<Currency>> {
    let updated = state
        .currency_service
        .update_exchange_rate(&code, request.exchange_rate)
        .await?;
    info!(
        "Exchange rate of {} set to {}",
        updated.code, updated.exchange_rate
    );
    Ok(Json(updated))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currencies", get(get_currencies))
        .route(
            "/currency",
            get(get_selected_currency).put(select_currency),
        )
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/currencies/{code}/rate", put(update_exchange_rate))
}
