use axum::extract::State;
use tracing::{debug, info};

use crate::{
    AppState,
    config::Config,
    database::StoreError,
    error::AppError,
    extract::JsonBody,
    models::{NewUser, User},
    response::{ApiResponse, success_to_api_response},
    utils::{error_codes, generate_token, hash_password, verify_password},
};

use super::model::{AuthResponse, LOGIN_RULES, REGISTER_RULES};

/// 签发 token 并附到去掉密码的用户信息上
pub(crate) fn issue_token(user: User, config: &Config) -> Result<AuthResponse, AppError> {
    let token = generate_token(&user.id, config)
        .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))?;
    Ok(AuthResponse { user, token })
}

pub(crate) fn hash(password: &str, config: &Config) -> Result<String, AppError> {
    hash_password(password, config.bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

fn user_exists() -> AppError {
    AppError::rejected(
        error_codes::UNAUTHORIZED,
        "User already exists",
        "User already exists",
    )
}

// 并发注册时由唯一约束兜底，结果与预先检查一致
fn registration_error(err: StoreError) -> AppError {
    match err {
        StoreError::UniqueViolation(_) => user_exists(),
        other => AppError::Store(other),
    }
}

// 手机号不存在与密码错误返回完全相同的错误
fn invalid_credentials() -> AppError {
    AppError::rejected(
        error_codes::UNAUTHORIZED,
        "Invalid credentials",
        "INVALID_CREDENTIALS",
    )
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    body.validate(REGISTER_RULES).map_err(AppError::validation(
        error_codes::UNAUTHORIZED,
        "Please fill the required fields",
    ))?;

    let phone_number = body.string("phoneNumber").unwrap_or_default();
    let email = body.string("email").unwrap_or_default();

    if state.store.find_user_by_phone(&phone_number).await?.is_some()
        || state.store.find_user_by_email(&email).await?.is_some()
    {
        debug!(phone_number = %phone_number, "Registration rejected, user exists");
        return Err(user_exists());
    }

    let password_hash = hash(&body.string("password").unwrap_or_default(), &state.config)?;
    let user = state
        .store
        .create_user(NewUser {
            name: body.string("name").unwrap_or_default(),
            email,
            phone_number,
            password_hash,
            gender: body.string("gender"),
            age: body.integer("age"),
        })
        .await
        .map_err(registration_error)?;
    info!(user_id = %user.id, "User registered");

    Ok(success_to_api_response(
        issue_token(user, &state.config)?,
        "User registered successfully",
        "USER_REGISTERED",
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    body.validate(LOGIN_RULES).map_err(AppError::validation(
        error_codes::UNAUTHORIZED,
        "Please fill the required fields",
    ))?;

    let phone_number = body.string("phoneNumber").unwrap_or_default();
    let password = body.string("password").unwrap_or_default();

    let Some(user) = state.store.find_user_by_phone(&phone_number).await? else {
        return Err(invalid_credentials());
    };

    let valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("failed to verify password: {}", e)))?;
    if !valid {
        return Err(invalid_credentials());
    }

    debug!(user_id = %user.id, "User logged in");
    Ok(success_to_api_response(
        issue_token(user, &state.config)?,
        "Login successful",
        "USER_LOGGED_IN",
    ))
}
