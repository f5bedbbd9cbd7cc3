use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{Directory, DirectoryChanges, NewDirectory},
    response::{ApiResponse, success_to_api_response},
    utils::error_codes,
};

use super::model::{CREATE_RULES, UPDATE_RULES};

#[axum::debug_handler]
pub async fn create_directory(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<Directory>, AppError> {
    body.validate(CREATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let entry = state
        .store
        .create_directory(NewDirectory {
            title: body.string("title").unwrap_or_default(),
            description: body.string("description").unwrap_or_default(),
            description2: body.string("description2"),
            description3: body.string("description3"),
            phone_number: body.string("phoneNumber"),
            email: body.string("email"),
            kind: body.string("type"),
            back_drop_image: body.string("backDropImage"),
            expired_date: body.date("expiredDate"),
            is_public: body.flag("isPublic").unwrap_or(false),
            // 空字符串视为未关联社区
            community_id: body.string("communityId").filter(|id| !id.is_empty()),
        })
        .await
        .map_err(not_found("Community not found"))?;
    info!(directory_id = %entry.id, "Directory entry created");

    Ok(success_to_api_response(
        entry,
        "Directory created successfully",
        "DIRECTORY_CREATED",
    ))
}

#[axum::debug_handler]
pub async fn list_directories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Directory>>, AppError> {
    let entries = state.store.list_directories().await?;
    Ok(success_to_api_response(entries, "success", ""))
}

#[axum::debug_handler]
pub async fn get_directory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Directory>, AppError> {
    let entry = state
        .store
        .find_directory(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Directory not found".to_string()))?;
    Ok(success_to_api_response(entry, "success", ""))
}

#[axum::debug_handler]
pub async fn update_directory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ApiResponse<Directory>, AppError> {
    body.validate(UPDATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let changes = DirectoryChanges {
        title: body.string("title"),
        description: body.string("description"),
        description2: body.string("description2"),
        description3: body.string("description3"),
        phone_number: body.string("phoneNumber"),
        email: body.string("email"),
        kind: body.string("type"),
        back_drop_image: body.string("backDropImage"),
        expired_date: body.date("expiredDate"),
        is_public: body.flag("isPublic"),
        community_id: body.string("communityId").filter(|id| !id.is_empty()),
    };

    let entry = state
        .store
        .update_directory(&id, changes)
        .await
        .map_err(not_found("Directory not found"))?;
    info!(directory_id = %entry.id, "Directory entry updated");

    Ok(success_to_api_response(
        entry,
        "Directory updated successfully",
        "DIRECTORY_UPDATED",
    ))
}

#[axum::debug_handler]
pub async fn delete_directory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_directory(&id)
        .await
        .map_err(not_found("Directory not found"))?;
    info!(directory_id = %id, "Directory entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
