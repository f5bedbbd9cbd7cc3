use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::utils::error_codes;

/// 统一响应信封：`{data, statusCode, title, message, identifier}`
///
/// 逻辑状态码只出现在响应体里，HTTP 状态始终是 200。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub status_code: i32,
    pub title: String,
    pub message: String,
    pub identifier: String,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn send_response<T>(
    data: Option<T>,
    status_code: i32,
    title: impl Into<String>,
    message: impl Into<String>,
    identifier: impl Into<String>,
) -> ApiResponse<T> {
    ApiResponse {
        data,
        status_code,
        title: title.into(),
        message: message.into(),
        identifier: identifier.into(),
    }
}

pub fn success_to_api_response<T>(
    data: T,
    message: impl Into<String>,
    identifier: impl Into<String>,
) -> ApiResponse<T> {
    send_response(Some(data), error_codes::SUCCESS, "Success", message, identifier)
}

pub fn error_to_api_response(
    status_code: i32,
    message: impl Into<String>,
    identifier: impl Into<String>,
) -> ApiResponse<()> {
    send_response(None, status_code, "Error", message, identifier)
}
