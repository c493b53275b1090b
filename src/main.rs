use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use auth::rate_limit::RateLimitState;
use config::Config;
use db::{PgStore, Store};
use services::generation::{spawn_generation_worker, MessageGenerator};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
    pub generator: Arc<MessageGenerator>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Arc<Config>) -> Self {
        let generator = Arc::new(MessageGenerator::new(store.clone(), config.clone()));
        Self {
            store,
            config,
            rate_limiter: RateLimitState::new(),
            generator,
        }
    }
}

/// All routes with auth applied. CORS and request tracing are added in `main`.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    // Every manual trigger is a paid model call
    let generate_routes = Router::new()
        .route(
            "/api/messages/generate",
            post(handlers::messages::generate_messages),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_generation,
        ));

    let protected_routes = Router::new()
        // Day records
        .route(
            "/api/records",
            get(handlers::records::list_records).post(handlers::records::upsert_record),
        )
        .route("/api/records/today", get(handlers::records::get_today_record))
        .route(
            "/api/records/month/:year/:month",
            get(handlers::records::get_month),
        )
        // Goals
        .route(
            "/api/goals",
            get(handlers::goals::get_goals).put(handlers::goals::update_goals),
        )
        // Home screen
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        // Messages
        .route(
            "/api/messages/latest",
            get(handlers::messages::get_latest_messages),
        )
        // Screen transitions
        .route("/api/view", post(handlers::view::transition))
        .merge(generate_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = vec![config.frontend_url.parse::<axum::http::HeaderValue>()?];
    // Extra dev origins, comma separated
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        for o in extra.split(',') {
            if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                origins.push(hv);
            }
        }
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kyukanbi_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let db = db::create_pool(&config.database_url).await?;

    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database migrations applied");

    let store: Arc<dyn Store> = Arc::new(PgStore::new(db));
    let state = AppState::new(store, config.clone());

    spawn_generation_worker(state.generator.clone(), config.clone());

    let app = build_router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!(utc_offset_minutes = config.utc_offset_minutes, "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
