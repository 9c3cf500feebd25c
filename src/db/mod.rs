// src/db/mod.rs

//! Repository interfaces, one per entity, and the SQLite-backed store that implements them.
//!
//! Handlers receive the repositories through `AppState`; nothing here holds
//! process-wide mutable state.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    error::AppError,
    models::{
        attempt::{NewAttempt, ResultRow, TestResult, UserStats},
        text::{NewText, Text},
        user::User,
    },
};

mod sqlite;

pub use sqlite::SqliteStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `DuplicateIdentity` if the username or email is taken.
    async fn create(&self, username: &str, email: &str, password_hash: &str)
    -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Sets `is_admin` for the named user. Returns `None` if no such user exists.
    async fn grant_admin(&self, username: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TextRepository: Send + Sync {
    /// All texts in insertion order.
    async fn list(&self) -> Result<Vec<Text>, AppError>;

    async fn create(&self, text: NewText) -> Result<Text, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Text>, AppError>;
}

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Creates a test session and its result in one transaction.
    /// Either both rows are committed or neither is.
    async fn record_attempt(&self, attempt: NewAttempt) -> Result<TestResult, AppError>;

    /// Results of the user's sessions, in insertion order.
    async fn list_results(&self, user_id: i64) -> Result<Vec<ResultRow>, AppError>;

    async fn compute_stats(&self, user_id: i64) -> Result<UserStats, AppError>;
}

/// Opens a SQLite pool with foreign keys enforced, creating the file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Applies the embedded migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
