use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use community_backend::{
    AppState,
    config::Config,
    database::{MemoryStore, PgStore, Store},
    router::create_router,
    storage::PhotoStorage,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置存储层
    let store: Arc<dyn Store> = if config.uses_memory_store() {
        tracing::warn!("DATABASE_URL=memory, records will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("SET application_name = 'community_backend';")
                        .await?;
                    Ok(())
                })
            })
            .connect(&config.database_url)
            .await
            .expect("Failed to connect to Postgres");

        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run database migrations");

        Arc::new(PgStore::new(pool))
    };

    // 照片目录
    let storage = PhotoStorage::new(config.storage_dir.clone())
        .await
        .expect("Failed to create storage directory");

    // 设置应用状态
    let state = AppState {
        store,
        config: config.clone(),
        storage,
    };

    let app = create_router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
