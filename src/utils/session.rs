// src/utils/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{Extension, State},
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::user::User, state::AppState};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Claims of a login session token.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionClaims {
    /// Subject - the user id (as string).
    pub sub: String,
    /// Issued-at as Unix timestamp.
    pub iat: usize,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

fn now_secs() -> Result<usize, AppError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Signs a session token for the user, valid for `ttl_secs`.
pub fn issue_token(user_id: i64, secret: &str, ttl_secs: u64) -> Result<String, AppError> {
    let now = now_secs()?;

    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_secs as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies a session token and returns the user id it refers to.
/// Expired, tampered and malformed tokens all yield `None`.
pub fn verify_token(token: &str, secret: &str) -> Option<i64> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .and_then(|data| data.claims.sub.parse().ok())
}

/// `Set-Cookie` value for a fresh session.
/// Without `max_age` the cookie ends with the browser session.
pub fn session_cookie(token: &str, max_age: Option<u64>) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token);
    if let Some(secs) = max_age {
        cookie.push_str(&format!("; Max-Age={}", secs));
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extracts the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

/// Resolves the logged-in user, if any.
/// The user row is reloaded so privilege changes apply immediately.
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, AppError> {
    let Some(user_id) =
        session_token(headers).and_then(|token| verify_token(token, &state.config.secret_key))
    else {
        return Ok(None);
    };

    state.users.find_by_id(user_id).await
}

/// Axum Middleware: Authentication.
///
/// Resolves the session cookie to a `User` and injects it into the request
/// extensions. Callers without a valid session are redirected to `/login`.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = req.headers().clone();
    let user = current_user(&state, &headers)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Axum Middleware: Admin Authorization.
///
/// Must be layered inside `require_session`. Rejects non-admins with 403
/// before the request body is read.
pub async fn require_admin(
    Extension(user): Extension<User>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !user.is_admin {
        tracing::warn!(user_id = user.id, "Non-admin attempted an admin action");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
