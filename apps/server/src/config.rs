use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 signing key. Auth and admin routes are disabled without it.
    pub jwt_secret: Option<Vec<u8>>,
    pub token_ttl: Duration,
    pub admin_email: Option<String>,
    pub admin_password_hash: Option<String>,
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid SF_LISTEN_ADDR")?;
        let db_path =
            std::env::var("SF_DB_PATH").unwrap_or_else(|_| "./db/storefront.db".into());
        let cors_allow = std::env::var("SF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("SF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let ttl_minutes: u64 = std::env::var("SF_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .unwrap_or(60);
        let jwt_secret = non_empty_var("SF_JWT_SECRET")
            .map(|raw| decode_secret_key(&raw))
            .transpose()
            .context("Invalid SF_JWT_SECRET")?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
            admin_email: non_empty_var("SF_ADMIN_EMAIL"),
            admin_password_hash: non_empty_var("SF_ADMIN_PASSWORD_HASH"),
        })
    }
}
