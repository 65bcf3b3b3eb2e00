#![allow(dead_code)]

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::Method,
    routing::{get, post, put},
    BoxError, Router,
};
use sqlx::postgres::PgPoolOptions;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{env::Envy, errors::DefaultApiError},
    restaurants::store::RestaurantStore,
};

mod app;
mod auth;
mod restaurants;
mod validation;

// uploads are only buffered up to MAX_FILE_SIZE, larger bodies get a 413
const MAX_BODY_SIZE: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RestaurantStore>,
    pub envy: Arc<Envy>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // properties
    let port = envy.port.to_owned().unwrap_or(3000);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::POST, Method::GET, Method::PUT]);

    let pool = PgPoolOptions::new()
        .max_connections(50)
        .idle_timeout(Some(Duration::from_secs(60)))
        .connect(&envy.database_url)
        .await
        .expect("failed to connect to database");

    tracing::info!("connected to db");

    let state = AppState {
        store: Arc::new(pool),
        envy: Arc::new(envy),
    };

    // app
    let app = router(state)
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!(%err, "request failed in middleware");
                    DefaultApiError::InternalServerError.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(5, Duration::from_secs(1))),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "listening");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server error");
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(app::controller::get_root))
        // restaurants
        .route("/restaurants", post(restaurants::controller::create_restaurant))
        .route(
            "/restaurants/:restaurant_id",
            put(restaurants::controller::update_restaurant),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
}
