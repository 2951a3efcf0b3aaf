//! Environment-driven configuration with workable local defaults.

use std::net::SocketAddr;

const DEFAULT_DATABASE_PATH: &str = "timetable.db";
const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_EMAIL_DOMAIN: &str = "@srmist.edu.in";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

// Development frontend origins allowed to call the API from a browser.
const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:8080"];

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub email_domain: String,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database_path: DEFAULT_DATABASE_PATH.to_owned(),
            jwt_secret: DEFAULT_JWT_SECRET.to_owned(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            email_domain: DEFAULT_EMAIL_DOMAIN.to_owned(),
            cors_origins: DEFAULT_CORS_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = Self::default();

        if let Ok(host) = std::env::var("HOST") {
            cfg.addr.set_ip(
                host.parse()
                    .map_err(|e| anyhow::anyhow!("invalid HOST {:?}: {}", host, e))?,
            );
        }
        if let Ok(port) = std::env::var("PORT") {
            cfg.addr.set_port(
                port.parse()
                    .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", port, e))?,
            );
        }
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            cfg.database_path = path;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET_KEY") {
            cfg.jwt_secret = secret;
        } else {
            log::warn!("JWT_SECRET_KEY not set, using the default development secret");
        }
        if let Ok(hours) = std::env::var("TOKEN_TTL_HOURS") {
            cfg.token_ttl_hours = hours
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid TOKEN_TTL_HOURS {:?}: {}", hours, e))?;
        }
        if let Ok(domain) = std::env::var("EMAIL_DOMAIN") {
            cfg.email_domain = domain;
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            cfg.cors_origins = parse_origin_list(&origins);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_development() {
        let cfg = Config::default();
        assert_eq!(cfg.addr.port(), 5000);
        assert_eq!(cfg.database_path, "timetable.db");
        assert_eq!(cfg.token_ttl_hours, 24);
        assert_eq!(cfg.email_domain, "@srmist.edu.in");
        assert_eq!(
            cfg.cors_origins,
            vec!["http://localhost:5173", "http://localhost:8080"]
        );
    }

    #[test]
    fn origin_list_splits_on_commas_and_trims() {
        assert_eq!(
            parse_origin_list("http://a.example, http://b.example ,"),
            vec!["http://a.example", "http://b.example"]
        );
        assert!(parse_origin_list("").is_empty());
    }
}
