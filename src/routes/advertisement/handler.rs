use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{Advertisement, AdvertisementChanges, NewAdvertisement},
    response::{ApiResponse, success_to_api_response},
    utils::error_codes,
};

use super::model::{CREATE_RULES, UPDATE_RULES};

#[axum::debug_handler]
pub async fn create_advertisement(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<Advertisement>, AppError> {
    body.validate(CREATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let new = NewAdvertisement {
        title: body.string("title").unwrap_or_default(),
        description: body.string("description").unwrap_or_default(),
        description2: body.string("description2"),
        description3: body.string("description3"),
        kind: body.string("type"),
        back_drop_image: body.string("backDropImage"),
        expired_date: body.date("expiredDate"),
        is_public: body.flag("isPublic").unwrap_or(false),
        community_id: body.string("communityId").unwrap_or_default(),
    };

    let advertisement = state
        .store
        .create_advertisement(new)
        .await
        .map_err(not_found("Community not found"))?;
    info!(advertisement_id = %advertisement.id, "Advertisement created");

    Ok(success_to_api_response(
        advertisement,
        "Advertisement created successfully",
        "ADVERTISEMENT_CREATED",
    ))
}

#[axum::debug_handler]
pub async fn list_advertisements(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Advertisement>>, AppError> {
    let advertisements = state.store.list_advertisements().await?;
    Ok(success_to_api_response(advertisements, "success", ""))
}

#[axum::debug_handler]
pub async fn get_advertisement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Advertisement>, AppError> {
    let advertisement = state
        .store
        .find_advertisement(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Advertisement not found".to_string()))?;
    Ok(success_to_api_response(advertisement, "success", ""))
}

#[axum::debug_handler]
pub async fn update_advertisement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ApiResponse<Advertisement>, AppError> {
    body.validate(UPDATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let changes = AdvertisementChanges {
        title: body.string("title"),
        description: body.string("description"),
        description2: body.string("description2"),
        description3: body.string("description3"),
        kind: body.string("type"),
        back_drop_image: body.string("backDropImage"),
        expired_date: body.date("expiredDate"),
        is_public: body.flag("isPublic"),
        community_id: body.string("communityId"),
    };

    let advertisement = state
        .store
        .update_advertisement(&id, changes)
        .await
        .map_err(not_found("Advertisement not found"))?;
    info!(advertisement_id = %advertisement.id, "Advertisement updated");

    Ok(success_to_api_response(
        advertisement,
        "Advertisement updated successfully",
        "ADVERTISEMENT_UPDATED",
    ))
}

#[axum::debug_handler]
pub async fn delete_advertisement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_advertisement(&id)
        .await
        .map_err(not_found("Advertisement not found"))?;
    info!(advertisement_id = %id, "Advertisement deleted");
    Ok(StatusCode::NO_CONTENT)
}
