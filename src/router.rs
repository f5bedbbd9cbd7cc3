use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    AppState,
    middleware::{auth_middleware, handle_panic, log_errors},
    response::error_to_api_response,
    routes,
    utils::error_codes,
};

async fn welcome() -> &'static str {
    "Welcome to the community membership API"
}

async fn route_not_found() -> impl IntoResponse {
    error_to_api_response(error_codes::NOT_FOUND, "Route not found", "NOT_FOUND")
}

// 公开路由
fn public_routes() -> Router<AppState> {
    Router::new()
        // 认证
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/user", post(routes::user::create_user))
        // 社区
        .route("/communities", get(routes::community::list_communities))
        .route(
            "/communities/{id}/cards",
            get(routes::community::list_community_cards),
        )
        .route(
            "/communities/{id}/notifications",
            get(routes::notification::list_community_notifications),
        )
        // 通知
        .route(
            "/notifications",
            get(routes::notification::list_notifications)
                .post(routes::notification::create_notification),
        )
        .route(
            "/notifications/{id}",
            get(routes::notification::get_notification)
                .put(routes::notification::update_notification)
                .delete(routes::notification::delete_notification),
        )
}

// 需要认证的路由
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // 用户
        .route(
            "/user/{id}",
            get(routes::user::get_user)
                .put(routes::user::update_user)
                .delete(routes::user::delete_user),
        )
        // 社区
        .route("/communities", post(routes::community::create_community))
        .route(
            "/communities/{id}",
            get(routes::community::get_community)
                .put(routes::community::update_community)
                .delete(routes::community::delete_community),
        )
        // 卡片
        .route(
            "/cards",
            get(routes::card::list_cards).post(routes::card::create_card).layer(
                DefaultBodyLimit::max(state.config.max_upload_bytes),
            ),
        )
        .route(
            "/cards/{id}",
            get(routes::card::get_card)
                .put(routes::card::update_card)
                .delete(routes::card::delete_card),
        )
        // 广告
        .route(
            "/advertisement",
            get(routes::advertisement::list_advertisements)
                .post(routes::advertisement::create_advertisement),
        )
        .route(
            "/advertisement/{id}",
            get(routes::advertisement::get_advertisement)
                .put(routes::advertisement::update_advertisement)
                .delete(routes::advertisement::delete_advertisement),
        )
        // 通讯录
        .route(
            "/directory",
            get(routes::directory::list_directories).post(routes::directory::create_directory),
        )
        .route(
            "/directory/{id}",
            get(routes::directory::get_directory)
                .put(routes::directory::update_directory)
                .delete(routes::directory::delete_directory),
        )
        // 应用认证中间件，只作用于已匹配的路由
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

/// 组装完整路由。`main` 与集成测试共用
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state));

    let base = state.config.api_base_uri.trim_end_matches('/');
    let router = if base.is_empty() {
        Router::new().route("/", get(welcome)).merge(api)
    } else {
        Router::new().route("/", get(welcome)).nest(base, api)
    };

    let router = router
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
