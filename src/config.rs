// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// HMAC key for signing session cookies.
    pub secret_key: String,
    pub bind_addr: String,
    /// Lifetime of a plain login session.
    pub session_ttl_secs: u64,
    /// Lifetime of a "remember me" login session.
    pub remember_ttl_secs: u64,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let secret_key = env::var("SECRET_KEY").expect("SECRET_KEY must be set");

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 60 * 60);

        let remember_ttl_secs = env::var("REMEMBER_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30 * 24 * 60 * 60);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            secret_key,
            bind_addr,
            session_ttl_secs,
            remember_ttl_secs,
            rust_log,
            log_dir,
        }
    }
}
