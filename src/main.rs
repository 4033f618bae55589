//! Employee Wallet Service - Main Application Entry Point
//!
//! This is a REST API server maintaining per-staff wallet balances and
//! moving value between them atomically. Transfers execute as a single
//! database unit of work with both wallet rows locked, so there is no
//! double-spend, no lost update, and no orphaned ledger entry.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries, row locking)
//! - **Authentication**: opaque bearer tokens, SHA-256 digests at rest
//! - **Money**: rust_decimal bound to NUMERIC(12,2), never floats
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG
    // environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState { pool, config };

    // Create authenticated routes (API endpoints)
    let authenticated_routes = Router::new()
        .route("/api/logout", post(handlers::auth::logout))
        // Wallet routes
        .route("/api/wallet/balance", get(handlers::wallet::get_balance))
        .route(
            "/api/wallet/transactions",
            get(handlers::wallet::list_transactions),
        )
        .route(
            "/api/wallet/transactions/{id}",
            get(handlers::wallet::get_transaction),
        )
        .route(
            "/api/wallet/transfer",
            post(handlers::wallet::create_transfer),
        )
        .route("/api/wallet/search", get(handlers::wallet::search))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Combine authenticated routes with public routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/api/login", post(handlers::auth::login))
        // Merge authenticated routes
        .merge(authenticated_routes)
        // Browser clients call this API cross-origin
        .layer(CorsLayer::permissive())
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share pool and config with all handlers via State extraction
        .with_state(state.clone());

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
