use axum::http::StatusCode;
use axum::{Extension, Json};
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::models::{Role, User};
use crate::token::issue_token;
use crate::{proceeds, Error, Payload};

pub fn hash_password(password: &str) -> Result<String, pbkdf2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Pbkdf2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(cfg): Extension<Config>,
    Json(login): Json<LoginRequest>,
) -> Payload<LoginResponse> {
    let email = match login.email.as_deref() {
        Some(email) if !email.is_empty() => email,
        _ => {
            return Err(Error::invalid("Email and password are required"));
        }
    };
    let password = match login.password.as_deref() {
        Some(password) if !password.is_empty() => password,
        _ => {
            return Err(Error::invalid("Email and password are required"));
        }
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? LIMIT 1")
        .bind(email)
        .fetch_optional(&pool)
        .await
        .map_err(Error::from)?;

    // The same error either way, so a probe cannot tell a bad password
    // from an unknown account.
    let user = match user {
        Some(user) if verify_password(password, &user.password_hash) => user,
        _ => {
            return Err(Error::AuthenticationFailure {
                message: "Invalid email or password".to_string(),
            });
        }
    };

    let token = issue_token(user.id, &cfg.jwt_secret, cfg.token_ttl_hours)?;

    proceeds(LoginResponse {
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
        token,
    })
}

pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(cfg): Extension<Config>,
    Json(register): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Registered>), Error> {
    let (name, email, password, role) = match (
        register.name.as_deref(),
        register.email.as_deref(),
        register.password.as_deref(),
        register.role.as_deref(),
    ) {
        (Some(name), Some(email), Some(password), Some(role))
            if !name.is_empty() && !email.is_empty() && !password.is_empty() && !role.is_empty() =>
        {
            (name, email, password, role)
        }
        _ => {
            return Err(Error::invalid("All fields are required"));
        }
    };

    if !email.ends_with(&cfg.email_domain) {
        return Err(Error::invalid(format!(
            "Only {} emails are allowed",
            cfg.email_domain
        )));
    }

    let role = Role::parse(role)
        .ok_or_else(|| Error::invalid("Role must be one of main_admin, dept_admin or staff"))?;

    let password_hash = hash_password(password).map_err(Error::from)?;

    sqlx::query("INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .execute(&pool)
        .await
        .map_err(Error::from)?;

    log::info!("registered {} account for {}", role.as_str(), email);

    Ok((
        StatusCode::CREATED,
        Json(Registered {
            message: "User registered successfully".to_string(),
        }),
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserSummary,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registered {
    pub message: String,
}
