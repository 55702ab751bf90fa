use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use dungeonhub::core::auth::{
    AccountApiState, AuthGateState, AuthService, JwtConfig, JwtService, account_api_router,
};
use dungeonhub::core::characters::{CharacterApiState, character_api_router};
use dungeonhub::core::config::Config;
use dungeonhub::core::db::pool::{DbConfig, create_pool_with_migrations};
use dungeonhub::core::db::repositories::{
    AccountRepository, CharacterRepository, ItemRepository,
};
use dungeonhub::core::items::{ItemApiState, item_api_router};

/// Default bind address when BIND_ADDR is not set
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load application config from environment variables
    let config = Config::from_env();

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: database={}, jwt_secret={}",
        config.has_database(),
        config.has_jwt_secret()
    );

    // One process-wide connection pool, created before the server starts
    let db_config = DbConfig {
        database_url: config.database_url_or_panic().to_string(),
        ..Default::default()
    };
    let pool = create_pool_with_migrations(&db_config)
        .await
        .expect("failed to initialize database pool");

    let jwt_service = JwtService::new(JwtConfig::new(config.jwt_secret_or_panic()));

    let account_repo = AccountRepository::new(pool.clone());
    let character_repo = CharacterRepository::new(pool.clone());
    let item_repo = ItemRepository::new(pool);

    let auth_service = AuthService::new(account_repo.clone(), jwt_service.clone());
    let gate = AuthGateState {
        account_repo,
        jwt_service,
    };

    // Build the application router
    let app = Router::new()
        .merge(account_api_router(AccountApiState { auth_service }))
        .merge(character_api_router(
            CharacterApiState { character_repo },
            gate,
        ))
        .merge(item_api_router(ItemApiState { item_repo }))
        // Game clients are served from other origins
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new());

    let addr = config
        .bind_addr
        .clone()
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind server address");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
