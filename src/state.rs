use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    db::{AttemptRepository, SqliteStore, TextRepository, UserRepository},
};

/// Handlers that only touch texts or attempts extract the repository alone
/// through `FromRef`; the auth handlers take the whole state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
    pub texts: Arc<dyn TextRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl AppState {
    /// Wires every repository to the same SQLite pool.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let store = SqliteStore::new(pool);
        Self {
            config,
            users: Arc::new(store.clone()),
            texts: Arc::new(store.clone()),
            attempts: Arc::new(store),
        }
    }
}

impl FromRef<AppState> for Arc<dyn TextRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.texts.clone()
    }
}

impl FromRef<AppState> for Arc<dyn AttemptRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.attempts.clone()
    }
}
