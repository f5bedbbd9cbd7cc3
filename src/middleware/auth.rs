use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use tracing::debug;

use crate::{AppState, error::AppError, utils::verify_token};

/// 校验 `Authorization: Bearer <token>`，通过后把 [`Claims`](crate::utils::Claims) 放进请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(rejection) => {
            debug!("Missing or malformed authorization header: {}", rejection);
            return AppError::Unauthorized("No token, authorization denied".to_string())
                .into_response();
        }
    };

    match verify_token(token.token(), &state.config) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            debug!("Token verification failed: {}", e);
            AppError::Unauthorized("Token is not valid".to_string()).into_response()
        }
    }
}
