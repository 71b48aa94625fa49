//! Clothing inventory endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use closet_common::api::{ApiResponse, CategorizedItemRecord, ItemRecord};
use closet_common::closet;
use closet_common::db::{ItemId, NewItem};
use closet_common::{ByCategory, Category};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ApiError, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub is_clean: bool,
}

#[derive(Debug, Serialize)]
pub struct CleanAllResponse {
    pub updated: u64,
}

/// GET /api/clothing
pub async fn list_clothing(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<ByCategory<ItemRecord>>>, ApiError> {
    let items = closet::closet(&state.store, auth.user.id).await?;
    Ok(Json(ApiResponse::ok(items.map(ItemRecord::from))))
}

/// POST /api/clothing
pub async fn add_clothing(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CategorizedItemRecord>>), ApiError> {
    let Json(req) = payload?;
    let category: Category = req.category_name.trim().parse()?;

    let item = closet::add_item(
        &state.store,
        auth.user.id,
        NewItem {
            category,
            description: req.description.unwrap_or_default(),
            icon: req.icon,
            color: req.color,
        },
    )
    .await?;

    debug!("User {} added {} item {}", auth.user.id, item.category, item.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            item.into(),
            "Clothing item added successfully",
        )),
    ))
}

/// DELETE /api/clothing/:id
pub async fn delete_clothing(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = path?;
    closet::remove_item(&state.store, auth.user.id, id).await?;
    Ok(Json(ApiResponse::message("Clothing item deleted successfully")))
}

/// PATCH /api/clothing/:id/status
pub async fn update_clothing_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<ItemId>, PathRejection>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CategorizedItemRecord>>, ApiError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let item = closet::set_status(&state.store, auth.user.id, id, req.is_clean).await?;

    let message = if item.clean {
        "Clothing item marked as clean"
    } else {
        "Clothing item marked as dirty"
    };
    Ok(Json(ApiResponse::with_message(item.into(), message)))
}

/// PATCH /api/clothing/clean-all
pub async fn clean_all_clothing(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<CleanAllResponse>>, ApiError> {
    let updated = closet::clean_all(&state.store, auth.user.id).await?;
    Ok(Json(ApiResponse::with_message(
        CleanAllResponse { updated },
        "All clothing items marked as clean",
    )))
}
