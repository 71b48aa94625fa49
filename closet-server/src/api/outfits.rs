//! Outfit endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use closet_common::api::{ApiResponse, ItemRef, OutfitView};
use closet_common::closet;
use closet_common::db::OutfitId;
use closet_common::{ByCategory, Error};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::{ApiError, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOutfitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: ByCategory<ItemRef>,
}

/// GET /api/outfits
pub async fn list_outfits(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<OutfitView>>>, ApiError> {
    let outfits = closet::list_outfits(&state.store, auth.user.id).await?;
    Ok(Json(ApiResponse::ok(
        outfits.into_iter().map(OutfitView::from).collect(),
    )))
}

/// POST /api/outfits
///
/// Ids that are not the caller's items are dropped; see
/// [`closet::assemble_outfit`].
pub async fn create_outfit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateOutfitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<OutfitView>>), ApiError> {
    let Json(req) = payload?;
    let submitted = req.items.map(ItemRef::id);

    let assembled =
        closet::assemble_outfit(&state.store, auth.user.id, req.name.as_deref(), &submitted)
            .await?;

    if !assembled.dropped.is_empty() {
        warn!(
            "Outfit {} for user {}: dropped unknown item ids {:?}",
            assembled.outfit.id, auth.user.id, assembled.dropped
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            assembled.outfit.into(),
            "Outfit created successfully",
        )),
    ))
}

/// GET /api/outfits/random
///
/// A uniformly chosen outfit whose items are all clean.
pub async fn random_outfit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<OutfitView>>, ApiError> {
    match closet::random_wearable_outfit(&state.store, auth.user.id).await {
        Ok(outfit) => Ok(Json(ApiResponse::ok(outfit.into()))),
        Err(Error::NotFound(_)) => {
            let message = if state.store.count_outfits(auth.user.id).await? == 0 {
                "No outfits found"
            } else {
                "No clean outfits available"
            };
            Err(ApiError::NotFound(message.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/outfits/:id
pub async fn delete_outfit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<OutfitId>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = path?;
    closet::remove_outfit(&state.store, auth.user.id, id).await?;
    info!("User {} deleted outfit {}", auth.user.id, id);
    Ok(Json(ApiResponse::message("Outfit deleted successfully")))
}
