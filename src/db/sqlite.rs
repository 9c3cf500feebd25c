// src/db/sqlite.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{AttemptRepository, TextRepository, UserRepository};
use crate::{
    error::AppError,
    models::{
        attempt::{NewAttempt, ResultRow, TestResult, UserStats},
        text::{NewText, Text},
        user::User,
    },
};

/// SQLite implementation of every repository. Cloning shares the pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO user (username, email, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, username, email, password_hash, is_admin
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                let field = if e.to_string().contains("user.email") {
                    "Email"
                } else {
                    "Username"
                };
                AppError::DuplicateIdentity(format!("{} is already taken", field))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, is_admin FROM user WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, is_admin FROM user WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn grant_admin(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE user SET is_admin = TRUE
            WHERE username = ?
            RETURNING id, username, email, password_hash, is_admin
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl TextRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Text>, AppError> {
        let texts = sqlx::query_as::<_, Text>(
            "SELECT id, title, content, language, difficulty FROM text ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(texts)
    }

    async fn create(&self, text: NewText) -> Result<Text, AppError> {
        let text = sqlx::query_as::<_, Text>(
            r#"
            INSERT INTO text (title, content, language, difficulty)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, content, language, difficulty
            "#,
        )
        .bind(text.title)
        .bind(text.content)
        .bind(text.language)
        .bind(text.difficulty)
        .fetch_one(&self.pool)
        .await?;

        Ok(text)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Text>, AppError> {
        let text = sqlx::query_as::<_, Text>(
            "SELECT id, title, content, language, difficulty FROM text WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(text)
    }
}

#[async_trait]
impl AttemptRepository for SqliteStore {
    async fn record_attempt(&self, attempt: NewAttempt) -> Result<TestResult, AppError> {
        // Dropping `tx` without commit rolls back the session insert.
        let mut tx = self.pool.begin().await?;

        let (session_id,): (i64,) = sqlx::query_as(
            "INSERT INTO test_session (user_id, text_id) VALUES (?, ?) RETURNING id",
        )
        .bind(attempt.user_id)
        .bind(attempt.text_id)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query_as::<_, TestResult>(
            r#"
            INSERT INTO result (session_id, wpm, accuracy, errors_count)
            VALUES (?, ?, ?, ?)
            RETURNING id, session_id, wpm, accuracy, errors_count, created_at
            "#,
        )
        .bind(session_id)
        .bind(attempt.wpm)
        .bind(attempt.accuracy)
        .bind(attempt.errors)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result)
    }

    async fn list_results(&self, user_id: i64) -> Result<Vec<ResultRow>, AppError> {
        let rows = sqlx::query_as::<_, ResultRow>(
            r#"
            SELECT
                r.id, s.text_id, t.title AS text_title,
                r.wpm, r.accuracy, r.errors_count, r.created_at
            FROM result r
            JOIN test_session s ON r.session_id = s.id
            JOIN text t ON s.text_id = t.id
            WHERE s.user_id = ?
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn compute_stats(&self, user_id: i64) -> Result<UserStats, AppError> {
        // AVG/MAX yield NULL over zero rows, COUNT yields 0.
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                AVG(r.wpm) AS avg_wpm,
                MAX(r.wpm) AS best_wpm,
                COUNT(r.id) AS total_tests
            FROM result r
            JOIN test_session s ON r.session_id = s.id
            WHERE s.user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
