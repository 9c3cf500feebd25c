// src/services/credentials.rs

use validator::Validate;

use crate::{
    db::UserRepository,
    error::AppError,
    models::user::{LoginForm, RegisterForm, User},
    utils::password::{hash_password, verify_password},
};

/// Validates the form, hashes the password and stores the new user.
pub async fn register(users: &dyn UserRepository, form: &RegisterForm) -> Result<User, AppError> {
    let form = form.trimmed();
    form.validate()?;

    let password_hash = hash_password(&form.password)?;
    let user = users
        .create(&form.username, &form.email, &password_hash)
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Looks the user up by email and checks the password.
///
/// Unknown email and wrong password both fail with `InvalidCredentials`.
pub async fn authenticate(users: &dyn UserRepository, form: &LoginForm) -> Result<User, AppError> {
    form.validate()?;

    let user = users.find_by_email(form.email.trim()).await?;

    match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => Ok(user),
        _ => {
            tracing::info!("Failed login attempt");
            Err(AppError::InvalidCredentials)
        }
    }
}
