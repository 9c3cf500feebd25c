use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{
    db::AttemptRepository,
    error::AppError,
    models::user::User,
    services::stats::{self, CSV_FILENAME},
};

/// Current user's result history and aggregate statistics.
pub async fn profile(
    State(attempts): State<Arc<dyn AttemptRepository>>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let profile = stats::profile(attempts.as_ref(), user.id).await?;
    Ok(Json(profile))
}

/// Current user's results as a CSV attachment.
pub async fn export_results(
    State(attempts): State<Arc<dyn AttemptRepository>>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let rows = attempts.list_results(user.id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", CSV_FILENAME),
            ),
        ],
        stats::render_csv(&rows),
    ))
}
