use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    AppState,
    database::StoreError,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{NewUser, User, UserChanges},
    response::{ApiResponse, success_to_api_response},
    routes::auth::{AuthResponse, hash, issue_token},
    utils::{Claims, error_codes},
};

use super::model::{CREATE_RULES, UPDATE_RULES};

async fn find_or_not_found(state: &AppState, id: &str) -> Result<User, AppError> {
    state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn user_exists() -> AppError {
    AppError::rejected(error_codes::BAD_REQUEST, "User already exists", "USER_EXISTS")
}

// 只有账号本人可以修改或删除
fn ensure_owner(claims: &Claims, user: &User) -> Result<(), AppError> {
    if claims.user_id == user.id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You can only modify your own account".to_string(),
        ))
    }
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    body.validate(CREATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let email = body.string("email").unwrap_or_default();
    let phone_number = body.string("phoneNumber").unwrap_or_default();

    if state.store.find_user_by_email(&email).await?.is_some()
        || state.store.find_user_by_phone(&phone_number).await?.is_some()
    {
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
        .map_err(|err| match err {
            StoreError::UniqueViolation(_) => user_exists(),
            other => AppError::Store(other),
        })?;
    info!(user_id = %user.id, "User created");

    Ok(success_to_api_response(
        issue_token(user, &state.config)?,
        "User created successfully",
        "USER_CREATED",
    ))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<User>, AppError> {
    let user = find_or_not_found(&state, &id).await?;
    Ok(success_to_api_response(user, "success", ""))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ApiResponse<User>, AppError> {
    body.validate(UPDATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    let existing = find_or_not_found(&state, &id).await?;
    ensure_owner(&claims, &existing)?;

    let password_hash = match body.string("password") {
        Some(password) => Some(hash(&password, &state.config)?),
        None => None,
    };
    let changes = UserChanges {
        name: body.string("name"),
        email: body.string("email"),
        phone_number: body.string("phoneNumber"),
        password_hash,
        gender: body.string("gender"),
        age: body.integer("age"),
    };

    let user = state
        .store
        .update_user(&id, changes)
        .await
        .map_err(not_found("User not found"))?;
    info!(user_id = %user.id, "User updated");

    Ok(success_to_api_response(user, "User updated successfully", "USER_UPDATED"))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let existing = find_or_not_found(&state, &id).await?;
    ensure_owner(&claims, &existing)?;

    state
        .store
        .delete_user(&id)
        .await
        .map_err(not_found("User not found"))?;
    info!(user_id = %id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
