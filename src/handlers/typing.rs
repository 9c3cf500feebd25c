// src/handlers/typing.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    db::{AttemptRepository, TextRepository},
    error::AppError,
    extract::{AppJson, AppPath},
    models::{attempt::SaveResultRequest, user::User},
    services::{content, stats},
};

/// Returns the text to type for a test.
/// A non-numeric id names no text and is a 404 like a missing one.
pub async fn typing_test(
    State(texts): State<Arc<dyn TextRepository>>,
    AppPath(text_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let text = content::get_text(texts.as_ref(), text_id).await?;

    Ok(Json(json!({
        "title": "Тест печати",
        "text": text,
    })))
}

/// Stores the outcome of a finished test.
///
/// The session and its result are written in a single transaction.
pub async fn save_result(
    State(texts): State<Arc<dyn TextRepository>>,
    State(attempts): State<Arc<dyn AttemptRepository>>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<SaveResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    stats::record_attempt(texts.as_ref(), attempts.as_ref(), req.into_attempt(user.id)).await?;

    Ok(Json(json!({ "status": "success" })))
}
