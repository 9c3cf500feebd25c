// src/extract.rs

//! Wrappers around axum's extractors whose rejections become `AppError`,
//! so malformed bodies get the same JSON error shape as everything else.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json` body; a missing or mistyped field is a `Validation` error (400).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Url-encoded form body; a missing field is a `Validation` error (400).
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

/// Path parameters; a segment that does not parse names nothing, so it is `NotFound` (404).
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
