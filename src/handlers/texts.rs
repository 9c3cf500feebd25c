// src/handlers/texts.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Multipart, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use validator::Validate;

use crate::{
    db::TextRepository,
    error::AppError,
    extract::AppForm,
    models::{
        text::{DEFAULT_DIFFICULTY, DEFAULT_LANGUAGE, NewText, TextForm},
        user::User,
    },
    services::content,
};

/// Lists all practice texts.
pub async fn list_texts(
    State(texts): State<Arc<dyn TextRepository>>,
) -> Result<impl IntoResponse, AppError> {
    let texts = content::list_texts(texts.as_ref()).await?;
    Ok(Json(texts))
}

/// Describes the text creation form.
pub async fn new_text_form() -> impl IntoResponse {
    Json(json!({
        "title": "Новый текст",
        "fields": ["title", "content", "language", "difficulty"],
        "defaults": { "language": DEFAULT_LANGUAGE, "difficulty": DEFAULT_DIFFICULTY },
    }))
}

/// Creates a text from form fields.
/// Admin only.
pub async fn create_text(
    State(texts): State<Arc<dyn TextRepository>>,
    Extension(user): Extension<User>,
    AppForm(form): AppForm<TextForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;

    content::create_text(texts.as_ref(), &user, NewText::from(form)).await?;

    Ok(Redirect::to("/texts"))
}

/// Describes the upload form.
pub async fn upload_form() -> impl IntoResponse {
    Json(json!({
        "title": "Загрузка текста",
        "fields": ["file"],
        "accept": [".txt"],
    }))
}

/// Creates a text from an uploaded `.txt` file sent in the `file` field.
/// Admin only.
pub async fn upload_text(
    State(texts): State<Arc<dyn TextRepository>>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        upload = Some((filename, bytes));
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let text = content::text_from_upload(&filename, &bytes)?;

    content::create_text(texts.as_ref(), &user, text).await?;

    Ok(Redirect::to("/texts"))
}
