// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'user' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email, used as the login identifier.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    /// Grants content-management actions.
    pub is_admin: bool,
}

/// Registration form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Username length must be between 2 and 50 characters."
    ))]
    pub username: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords must match."))]
    pub confirm_password: String,
}

impl RegisterForm {
    /// Copy with surrounding whitespace stripped from username and email.
    /// Validation runs on this copy so length rules see what gets stored.
    pub fn trimmed(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

/// Login form. `remember` is an HTML checkbox and is absent when unchecked.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    #[serde(default)]
    pub remember: Option<String>,
}

impl LoginForm {
    pub fn remember_me(&self) -> bool {
        match self.remember.as_deref() {
            None => false,
            Some(v) => !matches!(v.trim(), "" | "0" | "false" | "off"),
        }
    }
}
