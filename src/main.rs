mod app;
mod config;
mod csrf;
mod db;
mod entities;
mod error;
mod flash;
mod models;
mod routes;
mod seed;
mod store;
mod templates;
mod validation;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,top_movies=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.addr;

    let ctx = app::initialize(config).await?;
    tracing::info!(movies = ctx.store.count().await?, "movie store ready");

    let app = app::router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
