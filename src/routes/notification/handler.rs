use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{NewNotification, Notification, NotificationChanges},
    response::{ApiResponse, success_to_api_response},
    utils::error_codes,
};

use super::model::{CREATE_RULES, NotificationQuery, UPDATE_RULES};

#[axum::debug_handler]
pub async fn create_notification(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<Notification>, AppError> {
    body.validate(CREATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let new = NewNotification::with_defaults(
        body.string("title").unwrap_or_default(),
        body.string("description").unwrap_or_default(),
        body.string("communityId").unwrap_or_default(),
        body.date("expiredDate"),
        body.flag("active"),
        body.flag("isPublic"),
        Utc::now(),
    );

    let notification = state
        .store
        .create_notification(new)
        .await
        .map_err(not_found("Community not found"))?;
    info!(notification_id = %notification.id, "Notification created");

    Ok(success_to_api_response(
        notification,
        "Notification created successfully",
        "NOTIFICATION_CREATED",
    ))
}

/// 公开通知加上 `communityId` 所指社区的通知；不带参数时返回全部。结果为空时返回空列表
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<ApiResponse<Vec<Notification>>, AppError> {
    let community_id = query.community_id.as_deref().filter(|id| !id.is_empty());
    let notifications = state.store.list_notifications(community_id).await?;
    Ok(success_to_api_response(notifications, "success", ""))
}

#[axum::debug_handler]
pub async fn list_community_notifications(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<Notification>>, AppError> {
    let notifications = state.store.list_notifications_for_community(&id).await?;
    if notifications.is_empty() {
        return Err(AppError::NotFound(
            "No notifications found for this community.".to_string(),
        ));
    }
    Ok(success_to_api_response(notifications, "success", ""))
}

#[axum::debug_handler]
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Notification>, AppError> {
    let notification = state
        .store
        .find_notification(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;
    Ok(success_to_api_response(notification, "success", ""))
}

#[axum::debug_handler]
pub async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ApiResponse<Notification>, AppError> {
    body.validate(UPDATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let changes = NotificationChanges {
        title: body.string("title"),
        description: body.string("description"),
        community_id: body.string("communityId"),
        expired_date: body.date("expiredDate"),
        active: body.flag("active"),
        is_public: body.flag("isPublic"),
    };

    let notification = state
        .store
        .update_notification(&id, changes)
        .await
        .map_err(not_found("Notification not found"))?;
    info!(notification_id = %notification.id, "Notification updated");

    Ok(success_to_api_response(
        notification,
        "Notification updated successfully",
        "NOTIFICATION_UPDATED",
    ))
}

#[axum::debug_handler]
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_notification(&id)
        .await
        .map_err(not_found("Notification not found"))?;
    info!(notification_id = %id, "Notification deleted");
    Ok(StatusCode::NO_CONTENT)
}
