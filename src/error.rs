use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::database::StoreError;
use crate::response::error_to_api_response;
use crate::utils::error_codes;
use crate::validation::ValidationErrors;

/// 处理函数的错误边界，所有错误都渲染成统一信封
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}: {errors}")]
    Validation {
        code: i32,
        message: &'static str,
        errors: ValidationErrors,
    },

    /// 业务上的拒绝，状态码、消息与标识都由调用方指定
    #[error("{message} ({identifier})")]
    Rejected {
        code: i32,
        message: String,
        identifier: String,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn rejected(code: i32, message: impl Into<String>, identifier: impl Into<String>) -> Self {
        AppError::Rejected {
            code,
            message: message.into(),
            identifier: identifier.into(),
        }
    }

    /// 用于 `map_err`：把校验失败包装成指定状态码与消息
    pub fn validation(code: i32, message: &'static str) -> impl FnOnce(ValidationErrors) -> Self {
        move |errors| AppError::Validation {
            code,
            message,
            errors,
        }
    }
}

/// 用于 `map_err`：记录不存在或外键失效时返回带实体名的 not found
pub fn not_found(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |err| {
        if err.is_not_found() {
            AppError::NotFound(message.to_string())
        } else {
            AppError::Store(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation {
                code,
                message,
                errors,
            } => error_to_api_response(code, message, errors.to_string()),
            AppError::Rejected {
                code,
                message,
                identifier,
            } => error_to_api_response(code, message, identifier),
            AppError::BadRequest(detail) => {
                error_to_api_response(error_codes::BAD_REQUEST, "Bad request", detail)
            }
            AppError::Unauthorized(detail) => {
                error_to_api_response(error_codes::UNAUTHORIZED, "Unauthorized", detail)
            }
            AppError::Forbidden(detail) => {
                error_to_api_response(error_codes::FORBIDDEN, "Forbidden", detail)
            }
            AppError::NotFound(message) => {
                error_to_api_response(error_codes::NOT_FOUND, message, "NOT_FOUND")
            }
            AppError::Store(err) if err.is_not_found() => {
                error_to_api_response(error_codes::NOT_FOUND, "Record not found", "NOT_FOUND")
            }
            AppError::Store(StoreError::UniqueViolation(constraint)) => {
                error_to_api_response(error_codes::BAD_REQUEST, "Record already exists", constraint)
            }
            AppError::Store(err) => {
                tracing::error!("Store error: {:?}", err);
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Something went wrong",
                    err.to_string(),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                error_to_api_response(error_codes::INTERNAL_ERROR, "Something went wrong", detail)
            }
        }
        .into_response()
    }
}
