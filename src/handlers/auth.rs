// src/handlers/auth.rs

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::{
    error::AppError,
    extract::AppForm,
    models::user::{LoginForm, RegisterForm},
    services::credentials,
    state::AppState,
    utils::session::{clear_session_cookie, current_user, issue_token, session_cookie},
};

/// Describes the registration form.
/// Logged-in users are sent back to the landing page.
pub async fn register_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if current_user(&state, &headers).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Json(json!({
        "title": "Регистрация",
        "fields": ["username", "email", "password", "confirm_password"],
    }))
    .into_response())
}

/// Registers a new user and redirects to the login page.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppForm(form): AppForm<RegisterForm>,
) -> Result<Response, AppError> {
    if current_user(&state, &headers).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    credentials::register(state.users.as_ref(), &form).await?;

    Ok(Redirect::to("/login").into_response())
}

/// Describes the login form.
pub async fn login_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if current_user(&state, &headers).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Json(json!({
        "title": "Вход",
        "fields": ["email", "password", "remember"],
    }))
    .into_response())
}

/// Authenticates by email and password, then sets the session cookie.
///
/// With `remember` checked the session outlives the browser session.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Response, AppError> {
    if current_user(&state, &headers).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let user = credentials::authenticate(state.users.as_ref(), &form).await?;

    let config = &state.config;
    let (ttl, max_age) = if form.remember_me() {
        (config.remember_ttl_secs, Some(config.remember_ttl_secs))
    } else {
        (config.session_ttl_secs, None)
    };
    let token = issue_token(user.id, &config.secret_key, ttl)?;

    tracing::info!(user_id = user.id, remember = max_age.is_some(), "User logged in");

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, max_age))],
        Redirect::to("/"),
    )
        .into_response())
}

/// Clears the session cookie.
pub async fn logout() -> impl IntoResponse {
    ([(header::SET_COOKIE, clear_session_cookie())], Redirect::to("/"))
}
