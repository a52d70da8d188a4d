use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use storefront_core::catalog::{
    Category, CategoryNode, CategorySpecGroup, NewCategory, NewSpecGroup, SpecGroup,
};
use tracing::debug;

/// Request body for the move endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCategoryRequest {
    pub parent_id: Option<String>,
}

/// Request body for attaching a group to a category
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachSpecGroupRequest {
    pub spec_group_id: String,
    #[serde(default)]
    pub sort_order: i32,
}

// ============================================================================
// Storefront
// ============================================================================

async fn get_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    debug!("Fetching all categories...");
    let categories = state.category_service.get_categories()?;
    Ok(Json(categories))
}

async fn get_category_tree(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategoryNode>>> {
    debug!("Fetching category tree...");
    let tree = state.category_service.get_category_tree()?;
    Ok(Json(tree))
}

async fn get_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    debug!("Fetching category {}...", id);
    let category = state
        .category_service
        .get_category(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Category '{}' not found", id)))?;
    Ok(Json(category))
}

async fn get_category_children(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Category>>> {
    debug!("Fetching children of category {}...", id);
    let children = state.category_service.get_category_children(&id)?;
    Ok(Json(children))
}

/// Specification groups that apply to a category, inherited ones first.
async fn get_category_specs(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SpecGroup>>> {
    debug!("Resolving specifications of category {}...", id);
    let groups = state.category_service.get_category_specs(&id)?;
    Ok(Json(groups))
}

// ============================================================================
// Admin
// ============================================================================

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(category): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    debug!("Creating category {}...", category.name);
    let created = state.category_service.create_category(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    State(state): State<Arc<AppState>>,
    Json(category): Json<Category>,
) -> ApiResult<Json<Category>> {
    debug!("Updating category {}...", category.id);
    let updated = state.category_service.update_category(category).await?;
    Ok(Json(updated))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    debug!("Deleting category {}...", id);
    let _ = state.category_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn move_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<MoveCategoryRequest>,
) -> ApiResult<Json<Category>> {
    debug!("Moving category {} under {:?}...", id, request.parent_id);
    let moved = state
        .category_service
        .move_category(&id, request.parent_id)
        .await?;
    Ok(Json(moved))
}

async fn get_own_spec_groups(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SpecGroup>>> {
    let groups = state.category_service.get_category_spec_groups(&id)?;
    Ok(Json(groups))
}

async fn attach_spec_group(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AttachSpecGroupRequest>,
) -> ApiResult<Json<CategorySpecGroup>> {
    debug!(
        "Attaching spec group {} to category {}...",
        request.spec_group_id, id
    );
    let link = state
        .category_service
        .attach_spec_group(CategorySpecGroup {
            category_id: id,
            spec_group_id: request.spec_group_id,
            sort_order: request.sort_order,
        })
        .await?;
    Ok(Json(link))
}

async fn detach_spec_group(
    Path((id, group_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    debug!("Detaching spec group {} from category {}...", group_id, id);
    let _ = state
        .category_service
        .detach_spec_group(&id, &group_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_spec_groups(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SpecGroup>>> {
    let groups = state.category_service.get_spec_groups()?;
    Ok(Json(groups))
}

async fn get_spec_group(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SpecGroup>> {
    let group = state
        .category_service
        .get_spec_group(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Specification group '{}' not found", id)))?;
    Ok(Json(group))
}

async fn create_spec_group(
    State(state): State<Arc<AppState>>,
    Json(group): Json<NewSpecGroup>,
) -> ApiResult<(StatusCode, Json<SpecGroup>)> {
    debug!("Creating spec group {}...", group.title);
    let created = state.category_service.create_spec_group(group).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_spec_group(
    State(state): State<Arc<AppState>>,
    Json(group): Json<SpecGroup>,
) -> ApiResult<Json<SpecGroup>> {
    debug!("Updating spec group {}...", group.id);
    let updated = state.category_service.update_spec_group(group).await?;
    Ok(Json(updated))
}

async fn delete_spec_group(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    debug!("Deleting spec group {}...", id);
    let _ = state.category_service.delete_spec_group(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/tree", get(get_category_tree))
        .route("/categories/{id}", get(get_category))
        .route("/categories/{id}/children", get(get_category_children))
        .route("/categories/{id}/specs", get(get_category_specs))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/categories",
            post(create_category).put(update_category),
        )
        .route("/categories/{id}", delete(delete_category))
        .route("/categories/{id}/move", post(move_category))
        .route(
            "/categories/{id}/spec-groups",
            get(get_own_spec_groups).post(attach_spec_group),
        )
        .route(
            "/categories/{id}/spec-groups/{groupId}",
            delete(detach_spec_group),
        )
        .route(
            "/spec-groups",
            get(get_spec_groups)
                .post(create_spec_group)
                .put(update_spec_group),
        )
        .route(
            "/spec-groups/{id}",
            get(get_spec_group).delete(delete_spec_group),
        )
}
