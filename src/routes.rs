// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, pages, profile, texts, typing},
    state::AppState,
    utils::session::{require_admin, require_session},
};

/// Assembles the main application router.
///
/// * Public routes: landing page, registration, login.
/// * Session routes: texts, typing test, results, profile, export, logout.
/// * Admin routes: text creation and upload.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let public_routes = Router::new()
        .route("/", get(pages::index))
        .route("/home", get(pages::index))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login));

    let session_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/texts", get(texts::list_texts))
        .route("/test/{text_id}", get(typing::typing_test))
        .route("/save_result", post(typing::save_result))
        .route("/profile", get(profile::profile))
        .route("/export_results", get(profile::export_results))
        .layer(middleware::from_fn_with_state(state.clone(), require_session));

    let admin_routes = Router::new()
        .route("/text/new", get(texts::new_text_form).post(texts::create_text))
        .route("/text/upload", get(texts::upload_form).post(texts::upload_text))
        // Auth first, then Admin check
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
