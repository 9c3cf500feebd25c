// src/services/stats.rs

use serde::Serialize;

use crate::{
    db::{AttemptRepository, TextRepository},
    error::AppError,
    models::attempt::{NewAttempt, ResultRow, TestResult, UserStats},
};

pub const CSV_HEADER: &str = "Дата,WPM,Точность %,Ошибки";
pub const CSV_FILENAME: &str = "my_results.csv";

/// Everything shown on the profile page.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub results: Vec<ResultRow>,
    pub stats: UserStats,
}

/// Records a finished attempt against an existing text.
pub async fn record_attempt(
    texts: &dyn TextRepository,
    attempts: &dyn AttemptRepository,
    attempt: NewAttempt,
) -> Result<TestResult, AppError> {
    if texts.find_by_id(attempt.text_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Text {} not found", attempt.text_id)));
    }

    let result = attempts.record_attempt(attempt).await?;
    tracing::info!(
        user_id = attempt.user_id,
        text_id = attempt.text_id,
        session_id = result.session_id,
        wpm = result.wpm,
        "Attempt recorded"
    );
    Ok(result)
}

pub async fn profile(attempts: &dyn AttemptRepository, user_id: i64) -> Result<Profile, AppError> {
    let results = attempts.list_results(user_id).await?;
    let stats = attempts.compute_stats(user_id).await?;
    Ok(Profile { results, stats })
}

/// Renders results as CSV: the header row, then one row per result.
pub fn render_csv(rows: &[ResultRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{}\r\n",
            row.created_at.format("%Y-%m-%d %H:%M"),
            row.wpm,
            format_accuracy(row.accuracy),
            row.errors_count
        ));
    }
    out
}

/// Whole numbers keep one decimal place, so 97.0 stays "97.0".
fn format_accuracy(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
