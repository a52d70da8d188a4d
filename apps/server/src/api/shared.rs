//! Request context shared by the storefront handlers: the selected currency
//! (carried in the `currency` cookie) and the requested language.

use axum::http::{
    header::{ACCEPT_LANGUAGE, COOKIE},
    HeaderMap, HeaderValue,
};
use serde::Deserialize;
use storefront_core::currencies::Currency;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

pub const CURRENCY_COOKIE: &str = "currency";

/// 30 days.
pub const CURRENCY_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 30;

/// Currency stored in the `currency` cookie. Missing or malformed cookies yield `None`.
pub fn cookie_currency(headers: &HeaderMap) -> Option<Currency> {
    let raw = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CURRENCY_COOKIE)
        .map(|(_, value)| value)?;

    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Ignoring currency cookie with bad encoding: {}", e);
            return None;
        }
    };
    match serde_json::from_str::<Currency>(&decoded) {
        Ok(currency) => Some(currency),
        Err(e) => {
            debug!("Ignoring malformed currency cookie: {}", e);
            None
        }
    }
}

/// The currency prices are shown in for this request.
///
/// Only the code is taken from the cookie; the rate is re-read from the
/// currencies table, and an unknown code falls back to the default currency.
pub fn request_currency(state: &AppState, headers: &HeaderMap) -> ApiResult<Currency> {
    let selected = cookie_currency(headers);
    let currency = state
        .currency_service
        .resolve_currency(selected.as_ref().map(|c| c.code.as_str()))?;
    Ok(currency)
}

/// `Set-Cookie` value persisting `currency` as url-encoded JSON.
pub fn currency_cookie(currency: &Currency) -> ApiResult<HeaderValue> {
    let json = serde_json::to_string(currency)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize currency: {e}")))?;
    let cookie = format!(
        "{}={}; Max-Age={}; Path=/; SameSite=Lax",
        CURRENCY_COOKIE,
        urlencoding::encode(&json),
        CURRENCY_COOKIE_MAX_AGE
    );
    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid cookie value: {e}")))
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageParams {
    pub lang: Option<String>,
}

/// Explicit `lang` parameter, else the primary tag of the first `Accept-Language` entry.
pub fn request_language(lang: Option<String>, headers: &HeaderMap) -> Option<String> {
    if let Some(lang) = lang.filter(|l| !l.trim().is_empty()) {
        return Some(lang.trim().to_lowercase());
    }
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .and_then(|tag| tag.trim().split('-').next())
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty() && tag != "*")
}
