use std::sync::{Arc, Mutex};

use axum::routing::{get, patch, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use inkstudio::config::AppConfig;
use inkstudio::db;
use inkstudio::handlers;
use inkstudio::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/availability",
            get(handlers::availability::get_availability)
                .post(handlers::availability::set_availability),
        )
        .route(
            "/api/availability/:date",
            put(handlers::availability::replace_day),
        )
        .route(
            "/api/booking-requests",
            get(handlers::bookings::get_booking_requests)
                .post(handlers::bookings::create_booking_request),
        )
        .route(
            "/api/booking-requests/:id/status",
            patch(handlers::bookings::update_booking_status),
        )
        .route(
            "/api/inquiries",
            get(handlers::inquiries::get_inquiries).post(handlers::inquiries::create_inquiry),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
