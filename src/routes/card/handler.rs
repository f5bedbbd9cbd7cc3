use std::path::Path as FsPath;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{Card, CardChanges, CardWithCommunity},
    response::{ApiResponse, success_to_api_response},
    utils::{Claims, error_codes},
};

use super::model::UPDATE_RULES;

/// 当前用户的卡片，附带社区信息，按创建时间倒序
#[axum::debug_handler]
pub async fn list_cards(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Vec<CardWithCommunity>>, AppError> {
    let cards = state.store.list_cards_for_user(&claims.user_id).await?;
    Ok(success_to_api_response(cards, "success", ""))
}

#[axum::debug_handler]
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Card>, AppError> {
    let card = state
        .store
        .find_card(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;
    Ok(success_to_api_response(card, "success", ""))
}

#[axum::debug_handler]
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ApiResponse<Card>, AppError> {
    body.validate(UPDATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    // 照片路径只由上传流程写入，这里不允许修改
    let changes = CardChanges {
        card_number: body.string("cardNumber"),
        full_name: body.string("fullName"),
        date_of_birth: body.date("dateOfBirth"),
        nationality: body.string("nationality"),
        gender: body.string("gender"),
        date_of_issue: body.date("dateOfIssue"),
        date_of_expiry: body.date("dateOfExpiry"),
        un_card_number: body.string("unCardNumber"),
        student_number: body.string("studentNumber"),
        status: body.string("status"),
        active: body.flag("active"),
        community_id: body.string("communityId"),
    };

    let card = state
        .store
        .update_card(&id, changes)
        .await
        .map_err(not_found("Card not found"))?;
    info!(card_id = %card.id, "Card updated");

    Ok(success_to_api_response(card, "Card updated successfully", "CARD_UPDATED"))
}

#[axum::debug_handler]
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let card = state
        .store
        .find_card(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;

    state
        .store
        .delete_card(&id)
        .await
        .map_err(not_found("Card not found"))?;

    let photos = [&card.passport_photo, &card.front_photo, &card.back_photo];
    state
        .storage
        .remove_files(photos.into_iter().flatten().map(FsPath::new))
        .await;
    info!(card_id = %id, "Card deleted");

    Ok(StatusCode::NO_CONTENT)
}
