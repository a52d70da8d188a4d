use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use storefront_core::languages::Language;

async fn get_languages(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Language>>> {
    let languages = state.language_service.get_languages()?;
    Ok(Json(languages))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/languages", get(get_languages))
}
