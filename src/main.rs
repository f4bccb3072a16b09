mod app;
mod auth;
mod cars;
mod config;
mod customers;
mod db;
mod error;
#[cfg(test)]
mod memory;
mod state;
#[cfg(test)]
mod test_support;
mod users;

use crate::{config::AppConfig, state::AppState, users::services::ensure_bootstrap_admin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "dealership=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let state = AppState::init(config).await?;

    ensure_bootstrap_admin(state.users.as_ref(), state.config.bootstrap_admin.as_ref()).await?;

    let app = app::build_app(state.clone());
    app::serve(app, &state.config).await
}
