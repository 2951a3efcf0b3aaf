//! End-to-end handler tests over an in-memory database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use timetable_server::auth::{self, LoginRequest, RegisterRequest};
use timetable_server::config::Config;
use timetable_server::models::Role;
use timetable_server::token::verify_token;
use timetable_server::{app, db, health, Error};

async fn test_setup() -> (SqlitePool, Config) {
    let pool = db::memory_pool().await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    let cfg = Config {
        jwt_secret: "integration-test-secret".to_string(),
        ..Config::default()
    };
    (pool, cfg)
}

fn register_body(name: &str, email: &str, password: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        role: Some(role.to_string()),
    }
}

fn login_body(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
    }
}

async fn register(
    pool: &SqlitePool,
    cfg: &Config,
    body: RegisterRequest,
) -> Result<StatusCode, Error> {
    auth::register(Extension(pool.clone()), Extension(cfg.clone()), Json(body))
        .await
        .map(|(status, _)| status)
}

#[tokio::test]
async fn register_then_login_round_trips() {
    let (pool, cfg) = test_setup().await;

    let body = register_body("Dr. Alpha", "alpha@srmist.edu.in", "staff123", "staff");
    let status = register(&pool, &cfg, body).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(logged_in) = auth::login(
        Extension(pool.clone()),
        Extension(cfg.clone()),
        Json(login_body("alpha@srmist.edu.in", "staff123")),
    )
    .await
    .unwrap();

    assert_eq!(logged_in.user.email, "alpha@srmist.edu.in");
    assert_eq!(logged_in.user.role, Role::Staff);

    let claims = verify_token(&logged_in.token, &cfg.jwt_secret).unwrap();
    assert_eq!(claims.sub, logged_in.user.id.to_string());
}

#[tokio::test]
async fn register_rejects_foreign_email_domain() {
    let (pool, cfg) = test_setup().await;

    let body = register_body("Someone", "someone@gmail.com", "pw12345", "staff");
    let err = register(&pool, &cfg, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPayload { .. }));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[tokio::test]
async fn register_rejects_missing_fields_and_unknown_role() {
    let (pool, cfg) = test_setup().await;

    let mut body = register_body("Someone", "someone@srmist.edu.in", "pw12345", "staff");
    body.password = None;
    let err = register(&pool, &cfg, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPayload { .. }));

    let body = register_body("Someone", "someone@srmist.edu.in", "pw12345", "student");
    let err = register(&pool, &cfg, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPayload { .. }));
}

#[tokio::test]
async fn duplicate_email_registers_once_then_conflicts() {
    let (pool, cfg) = test_setup().await;

    let body = register_body("Main Admin", "admin@srmist.edu.in", "admin123", "main_admin");
    assert_eq!(
        register(&pool, &cfg, body.clone()).await.unwrap(),
        StatusCode::CREATED
    );

    let err = register(&pool, &cfg, body).await.unwrap_err();
    assert!(matches!(err, Error::UserAlreadyExists { .. }));
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user() {
    let (pool, cfg) = test_setup().await;

    let body = register_body("Dr. Beta", "beta@srmist.edu.in", "staff123", "staff");
    register(&pool, &cfg, body).await.unwrap();

    let err = auth::login(
        Extension(pool.clone()),
        Extension(cfg.clone()),
        Json(login_body("beta@srmist.edu.in", "wrong")),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::AuthenticationFailure { .. }));
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

    let err = auth::login(
        Extension(pool.clone()),
        Extension(cfg.clone()),
        Json(login_body("nobody@srmist.edu.in", "staff123")),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::AuthenticationFailure { .. }));
}

#[tokio::test]
async fn login_rejects_empty_credentials() {
    let (pool, cfg) = test_setup().await;

    let err = auth::login(
        Extension(pool.clone()),
        Extension(cfg.clone()),
        Json(LoginRequest {
            email: Some("admin@srmist.edu.in".to_string()),
            password: None,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::InvalidPayload { .. }));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_a_fixed_payload() {
    let Json(body) = health().await;
    assert_eq!(body.status, "healthy");
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/api/auth/login")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn preflight_allows_configured_origins_only() {
    let (pool, cfg) = test_setup().await;
    let router = app(pool, cfg);

    let res = router
        .clone()
        .oneshot(preflight("http://localhost:5173"))
        .await
        .unwrap();
    let allow_origin = res
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_origin, Some("http://localhost:5173"));
    let allow_credentials = res
        .headers()
        .get("access-control-allow-credentials")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_credentials, Some("true"));

    let res = router
        .oneshot(preflight("http://elsewhere.example"))
        .await
        .unwrap();
    assert!(res.headers().get("access-control-allow-origin").is_none());
}
