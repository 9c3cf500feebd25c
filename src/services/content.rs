// src/services/content.rs

use crate::{
    db::TextRepository,
    error::AppError,
    models::{
        text::{NewText, Text},
        user::User,
    },
};

pub async fn list_texts(texts: &dyn TextRepository) -> Result<Vec<Text>, AppError> {
    texts.list().await
}

pub async fn get_text(texts: &dyn TextRepository, id: i64) -> Result<Text, AppError> {
    texts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Text {} not found", id)))
}

/// Stores a new text on behalf of `caller`, who must be an admin.
pub async fn create_text(
    texts: &dyn TextRepository,
    caller: &User,
    text: NewText,
) -> Result<Text, AppError> {
    if !caller.is_admin {
        return Err(AppError::Forbidden);
    }

    let text = texts.create(text).await?;
    tracing::info!(text_id = text.id, admin_id = caller.id, title = %text.title, "Text added");
    Ok(text)
}

/// Checks an uploaded file and turns it into a text.
/// Only `.txt` files holding valid UTF-8 are accepted. An empty file is a valid, empty text.
pub fn text_from_upload(filename: &str, bytes: &[u8]) -> Result<NewText, AppError> {
    let is_txt = filename
        .rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    if !is_txt {
        return Err(AppError::Validation("Only .txt files are allowed".to_string()));
    }

    let content = std::str::from_utf8(bytes)
        .map_err(|_| AppError::Validation("File must be UTF-8 encoded text".to_string()))?;

    Ok(NewText::from_upload(filename, content.to_string()))
}
