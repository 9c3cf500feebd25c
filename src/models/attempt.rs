// src/models/attempt.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'test_session' table: one user attempting one text.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestSession {
    pub id: i64,
    pub user_id: i64,
    pub text_id: i64,
    pub started_at: NaiveDateTime,
}

/// Represents the 'result' table: the scored outcome of a session.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,
    pub session_id: i64,
    pub wpm: i64,
    pub accuracy: f64,
    pub errors_count: i64,
    pub created_at: NaiveDateTime,
}

/// Values for recording a finished attempt.
#[derive(Debug, Clone, Copy)]
pub struct NewAttempt {
    pub user_id: i64,
    pub text_id: i64,
    pub wpm: i64,
    pub accuracy: f64,
    pub errors: i64,
}

/// A result joined with its session, as listed on the profile page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultRow {
    pub id: i64,
    pub text_id: i64,
    pub text_title: String,
    pub wpm: i64,
    pub accuracy: f64,
    pub errors_count: i64,
    pub created_at: NaiveDateTime,
}

/// Aggregated statistics over all results of one user.
/// `avg_wpm` and `best_wpm` are `None` when the user has no results.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct UserStats {
    pub avg_wpm: Option<f64>,
    pub best_wpm: Option<i64>,
    pub total_tests: i64,
}

/// Body of `POST /save_result`.
/// Accuracy is only checked for non-negativity.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveResultRequest {
    pub text_id: i64,
    #[validate(range(min = 0, message = "wpm must not be negative"))]
    pub wpm: i64,
    #[validate(range(min = 0.0, message = "accuracy must not be negative"))]
    pub accuracy: f64,
    #[validate(range(min = 0, message = "errors must not be negative"))]
    pub errors: i64,
}

impl SaveResultRequest {
    pub fn into_attempt(self, user_id: i64) -> NewAttempt {
        NewAttempt {
            user_id,
            text_id: self.text_id,
            wpm: self.wpm,
            accuracy: self.accuracy,
            errors: self.errors,
        }
    }
}
