pub mod auth;
pub mod config;
pub mod db;
pub mod err;
pub mod models;
pub mod token;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::config::Config;
pub use crate::err::Error;

pub type Payload<T> = Result<Json<T>, Error>;

pub fn proceeds<V>(value: V) -> Payload<V>
where
    V: Serialize,
{
    Ok(Json(value))
}

pub fn app(pool: SqlitePool, cfg: Config) -> Router {
    // Explicit origin list rather than a wildcard, since the browser
    // frontend sends credentials.
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .fallback(err::handler404)
        .layer(cors)
        .layer(Extension(pool))
        .layer(Extension(cfg))
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub docs: &'static str,
    pub login: &'static str,
    pub register: &'static str,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Timetable backend is running",
        docs: "/api/health",
        login: "/api/auth/login",
        register: "/api/auth/register",
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        message: "Timetable backend is live",
    })
}
