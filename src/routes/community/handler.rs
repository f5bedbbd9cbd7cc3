use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{Card, Community, CommunityChanges, NewCommunity},
    response::{ApiResponse, success_to_api_response},
    utils::error_codes,
};

use super::model::{CREATE_RULES, UPDATE_RULES};

#[axum::debug_handler]
pub async fn create_community(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<Community>, AppError> {
    body.validate(CREATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let new: NewCommunity = body.into_typed()?;
    let community = state.store.create_community(new).await?;
    info!(community_id = %community.id, "Community created");

    Ok(success_to_api_response(
        community,
        "Community created successfully",
        "COMMUNITY_CREATED",
    ))
}

#[axum::debug_handler]
pub async fn list_communities(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Community>>, AppError> {
    let communities = state.store.list_communities().await?;
    Ok(success_to_api_response(communities, "success", ""))
}

#[axum::debug_handler]
pub async fn get_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Community>, AppError> {
    let community = state
        .store
        .find_community(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Community not found".to_string()))?;
    Ok(success_to_api_response(community, "success", ""))
}

#[axum::debug_handler]
pub async fn update_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ApiResponse<Community>, AppError> {
    body.validate(UPDATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let changes: CommunityChanges = body.into_typed()?;
    let community = state
        .store
        .update_community(&id, changes)
        .await
        .map_err(not_found("Community not found"))?;
    info!(community_id = %community.id, "Community updated");

    Ok(success_to_api_response(
        community,
        "Community updated successfully",
        "COMMUNITY_UPDATED",
    ))
}

/// 删除社区会级联删除其下的卡片、广告、通讯录与通知
#[axum::debug_handler]
pub async fn delete_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_community(&id)
        .await
        .map_err(not_found("Community not found"))?;
    info!(community_id = %id, "Community deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 与顶层列表不同，社区下没有卡片时返回 404
#[axum::debug_handler]
pub async fn list_community_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<Card>>, AppError> {
    let cards = state.store.list_cards_for_community(&id).await?;
    if cards.is_empty() {
        return Err(AppError::NotFound(
            "No cards found for this community.".to_string(),
        ));
    }
    Ok(success_to_api_response(cards, "success", ""))
}
