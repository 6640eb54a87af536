use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use favorite_service::cache::{RedisVoteCache, VoteCache};
use favorite_service::config::Config;
use favorite_service::handlers::{self, AppState};
use favorite_service::repository::{FavoriteRepository, UserRepository, VoteRepository};
use favorite_service::services::{
    FavoriteCountEstimator, FavoriteReader, FavoriteService, PgTokenAuthorizer, VoteAggregator,
};
use favorite_service::workers::redis_health;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.app.json_logs);
    info!(
        env = %config.app.env,
        http_port = config.app.http_port,
        "Starting favorite-service"
    );

    // Initialize database pool with prepared statement caching disabled for PgBouncer compatibility
    let connect_options = PgConnectOptions::from_str(&config.database.url)
        .context("Failed to parse DATABASE_URL")?
        .statement_cache_capacity(0);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(config.database.timeout())
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    // Initialize Redis connection
    let redis_client =
        redis::Client::open(config.redis.url.as_str()).context("Failed to create Redis client")?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client)
        .await
        .context("Failed to connect to Redis")?;
    info!(prefix = %config.redis.key_prefix, "Redis connection established");

    let db_timeout = config.database.timeout();
    let favorite_repo = Arc::new(FavoriteRepository::new(pg_pool.clone(), db_timeout));
    let vote_repo = Arc::new(VoteRepository::new(pg_pool.clone(), db_timeout));
    let user_repo = UserRepository::new(pg_pool.clone(), db_timeout);

    let vote_cache: Arc<dyn VoteCache> = Arc::new(RedisVoteCache::new(
        redis_conn,
        config.redis.key_prefix.clone(),
        config.redis.timeout(),
    ));

    let favorites = FavoriteService::new(
        FavoriteReader::new(favorite_repo.clone()),
        VoteAggregator::new(vote_cache.clone(), vote_repo),
        FavoriteCountEstimator::new(favorite_repo),
    );

    let state = AppState::new(
        favorites,
        Arc::new(PgTokenAuthorizer::new(user_repo.clone())),
        Arc::new(user_repo),
    );

    // Keep the Redis connection warm
    let health_config = redis_health::RedisHealthConfig {
        check_interval: Duration::from_secs(config.redis.health_interval_secs),
        ..Default::default()
    };
    tokio::spawn(redis_health::start_redis_health_check(
        vote_cache,
        health_config,
    ));

    let http_addr = format!("{}:{}", config.app.host, config.app.http_port);
    let admin_routes_enabled = config.app.admin_routes_enabled;
    info!(addr = %http_addr, admin_routes_enabled, "Starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure(cfg, admin_routes_enabled))
    })
    .bind(&http_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("favorite-service shutting down");
    Ok(())
}
