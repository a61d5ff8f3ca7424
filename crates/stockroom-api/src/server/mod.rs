//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use stockroom_alerts::{
    DashboardSink, EmailSink, NoopIndexer, OpenSearchIndexer, Publisher, RedisPool,
    RedisPoolConfig, WebhookSink,
};
use stockroom_common::{AppConfig, AppError, JwtService};
use stockroom_core::traits::SearchIndexer;
use stockroom_core::SnowflakeGenerator;
use stockroom_db::{
    create_pool, PgCartRepository, PgCategoryRepository, PgItemRepository, PgLedgerRepository,
    PgUserRepository,
};
use stockroom_service::{LowStockNotifier, ServiceContextBuilder};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    // Health endpoints stay outside the rate limiter
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = stockroom_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool (live-dashboard pub/sub)
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool =
        RedisPool::new(redis_config).map_err(|e| AppError::ExternalService(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.node_id));

    // Create repositories
    let item_repo = Arc::new(PgItemRepository::new(pool.clone()));
    let category_repo = Arc::new(PgCategoryRepository::new(pool.clone()));
    let cart_repo = Arc::new(PgCartRepository::new(pool.clone()));
    let ledger_repo = Arc::new(PgLedgerRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));

    // Wire the low-stock notifier with the configured sinks
    let sink_timeout = Duration::from_secs(config.alerts.dispatch_timeout_secs);
    let mut notifier = LowStockNotifier::new(&config.alerts);

    let email_sink = EmailSink::new(
        config.alerts.sendgrid_api_key.clone(),
        config.alerts.from_email.clone(),
        config.alerts.alert_emails.clone(),
        sink_timeout,
    );
    if email_sink.is_configured() {
        info!(recipients = config.alerts.alert_emails.len(), "Email alert sink enabled");
        notifier = notifier.with_sink(Arc::new(email_sink));
    }

    let webhook_sink = WebhookSink::new(config.alerts.webhook_url.clone(), sink_timeout);
    if webhook_sink.is_configured() {
        info!(url = %config.alerts.webhook_url, "Webhook alert sink enabled");
        notifier = notifier.with_sink(Arc::new(webhook_sink));
    }

    let publisher = Publisher::new((*shared_redis).clone());
    notifier = notifier.with_sink(Arc::new(DashboardSink::new(publisher)));

    // Search-index collaborator
    let indexer: Arc<dyn SearchIndexer> = if config.search.is_enabled() {
        info!(index = %config.search.index, "OpenSearch indexing enabled");
        Arc::new(OpenSearchIndexer::new(&config.search, sink_timeout))
    } else {
        Arc::new(NoopIndexer)
    };

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .item_repo(item_repo)
        .category_repo(category_repo)
        .cart_repo(cart_repo)
        .ledger_repo(ledger_repo)
        .user_repo(user_repo)
        .notifier(Arc::new(notifier))
        .indexer(indexer)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, shared_redis))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
