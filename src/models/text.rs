// src/models/text.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_DIFFICULTY: &str = "easy";

/// Represents the 'text' table: a practice passage.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Text {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Language code, e.g. 'en' or 'ru'.
    pub language: String,
    /// Free-form difficulty label, e.g. 'easy'.
    pub difficulty: String,
}

/// Values for inserting a new text.
#[derive(Debug, Clone)]
pub struct NewText {
    pub title: String,
    pub content: String,
    pub language: String,
    pub difficulty: String,
}

impl NewText {
    /// A text built from an uploaded file: the filename becomes the title.
    pub fn from_upload(filename: &str, content: String) -> Self {
        Self {
            title: filename.to_string(),
            content,
            language: DEFAULT_LANGUAGE.to_string(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
        }
    }
}

/// Form for creating a text manually. Blank language/difficulty fall back to defaults.
#[derive(Debug, Deserialize, Validate)]
pub struct TextForm {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)."))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required."))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub language: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub difficulty: Option<String>,
}

impl From<TextForm> for NewText {
    fn from(form: TextForm) -> Self {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            title: form.title,
            content: form.content,
            language: or_default(form.language, DEFAULT_LANGUAGE),
            difficulty: or_default(form.difficulty, DEFAULT_DIFFICULTY),
        }
    }
}
