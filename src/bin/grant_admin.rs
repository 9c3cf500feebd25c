// src/bin/grant_admin.rs
//
// Usage: grant_admin <username>
// Grants admin privilege to an existing user directly against the database.

use std::process::ExitCode;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;
use typeforge::db::{self, SqliteStore, UserRepository};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let Some(username) = std::env::args().nth(1) else {
        eprintln!("Usage: grant_admin <username>");
        return ExitCode::from(2);
    };

    match run(&username).await {
        Ok(true) => {
            println!("User {} is now an admin.", username);
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("User {} not found.", username);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Failed to grant admin: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(username: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let database_url = std::env::var("DATABASE_URL")?;

    let pool = db::connect(&database_url, 1).await?;
    db::migrate(&pool).await?;

    let store = SqliteStore::new(pool);
    let user = store.grant_admin(username).await?;
    if let Some(user) = &user {
        tracing::info!(user_id = user.id, "Admin privilege granted");
    }

    Ok(user.is_some())
}
