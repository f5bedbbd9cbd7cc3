use std::any::Any;

use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{error, warn};

use crate::{response::error_to_api_response, utils::error_codes};

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// 传输层状态始终为 200，所以从信封里的 statusCode 判断是否出错
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    if let Ok(envelope) = serde_json::from_slice::<Value>(&bytes) {
        let code = envelope["statusCode"].as_i64().unwrap_or_default();
        let message = envelope["message"].as_str().unwrap_or_default();
        let identifier = envelope["identifier"].as_str().unwrap_or_default();
        if code >= 500 {
            error!(%method, %uri, code, identifier, "{}", message);
        } else if code >= 400 {
            warn!(%method, %uri, code, identifier, "{}", message);
        }
    }

    // 重置body以便重新构建响应
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

/// `CatchPanicLayer` 的兜底处理，把 panic 转成 500 信封
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);

    error_to_api_response(error_codes::INTERNAL_ERROR, "Something went wrong", detail)
        .into_response()
}
