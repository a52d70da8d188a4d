use std::sync::Arc;

use crate::{
    api::shared::{request_currency, request_language, LanguageParams},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use storefront_core::products::{
    NewProduct, Product, ProductDetail, ProductPage, ProductQuery, ProductSort,
    ProductTranslation, ProductUpdate,
};
use tracing::debug;

/// Query string of the product listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub category_id: Option<String>,
    pub include_subcategories: Option<bool>,
    pub q: Option<String>,
    pub lang: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<ProductSort>,
}

impl ProductListParams {
    fn into_query(self, language: Option<String>, include_inactive: bool) -> ProductQuery {
        ProductQuery {
            category_id: self.category_id.filter(|id| !id.trim().is_empty()),
            include_subcategories: self.include_subcategories.unwrap_or(true),
            search: self.q,
            language,
            page: self.page,
            per_page: self.per_page,
            sort: self.sort.unwrap_or_default(),
            include_inactive,
        }
    }
}

/// Request body for the translation upsert; the product id comes from the path
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
}

async fn search_products(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(mut params): Query<ProductListParams>,
) -> ApiResult<Json<ProductPage>> {
    let language = request_language(params.lang.take(), &headers);
    let currency = request_currency(&state, &headers)?;
    debug!(
        "Searching products (category {:?}, {})...",
        params.category_id, currency.code
    );
    let page = state
        .product_service
        .search_products(params.into_query(language, false), Some(&currency))?;
    Ok(Json(page))
}

async fn get_product(
    Path(id_or_slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<LanguageParams>,
) -> ApiResult<Json<ProductDetail>> {
    debug!("Fetching product {}...", id_or_slug);
    let language = request_language(params.lang, &headers);
    let currency = request_currency(&state, &headers)?;
    let detail =
        state
            .product_service
            .get_product(&id_or_slug, language.as_deref(), Some(&currency))?;
    // Deactivated products are only visible to admins.
    if !detail.summary.is_active {
        return Err(ApiError::NotFound(format!(
            "Product '{}' not found",
            id_or_slug
        )));
    }
    Ok(Json(detail))
}

// ============================================================================
// Admin
// ============================================================================

/// Admin listing, inactive products included, prices in the base currency.
async fn search_all_products(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<ProductListParams>,
) -> ApiResult<Json<ProductPage>> {
    let language = params.lang.take();
    let page = state
        .product_service
        .search_products(params.into_query(language, true), None)?;
    Ok(Json(page))
}

async fn get_any_product(
    Path(id_or_slug): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanguageParams>,
) -> ApiResult<Json<ProductDetail>> {
    let detail = state
        .product_service
        .get_product(&id_or_slug, params.lang.as_deref(), None)?;
    Ok(Json(detail))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(product): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    debug!("Creating product in category {}...", product.category_id);
    let created = state.product_service.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Json(product): Json<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    debug!("Updating product {}...", product.id);
    let updated = state.product_service.update_product(product).await?;
    Ok(Json(updated))
}

async fn delete_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    debug!("Deleting product {}...", id);
    let _ = state.product_service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upsert_translation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslationRequest>,
) -> ApiResult<Json<ProductTranslation>> {
    debug!(
        "Saving {} translation of product {}...",
        request.language_code, id
    );
    let saved = state
        .product_service
        .upsert_translation(ProductTranslation {
            product_id: id,
            language_code: request.language_code,
            name: request.name,
            description: request.description,
        })
        .await?;
    Ok(Json(saved))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(search_products))
        .route("/products/{idOrSlug}", get(get_product))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/products",
            get(search_all_products)
                .post(create_product)
                .put(update_product),
        )
        .route(
            "/products/{id}",
            get(get_any_product).delete(delete_product),
        )
        .route("/products/{id}/translations", put(upsert_translation))
}
