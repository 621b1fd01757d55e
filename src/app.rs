use std::sync::Arc;

use anyhow::Context;
use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{config::Config, db, routes, store::MovieStore};

/// Minimum secret length accepted for deriving the cookie signing key.
pub const MIN_SECRET_LEN: usize = 32;

/// Everything a request handler needs, built once at startup. Cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: MovieStore,
    cookie_key: Key,
}

impl FromRef<AppContext> for Key {
    fn from_ref(ctx: &AppContext) -> Self {
        ctx.cookie_key.clone()
    }
}

/// Connects to the database, applies migrations and seeds an empty table.
pub async fn initialize(config: Config) -> anyhow::Result<AppContext> {
    if config.secret_key.len() < MIN_SECRET_LEN {
        anyhow::bail!("SECRET_KEY must be at least {MIN_SECRET_LEN} bytes long");
    }
    let cookie_key = Key::derive_from(config.secret_key.as_bytes());

    let db = db::connect_and_migrate(&config.database_url)
        .await
        .context("connecting to database")?;
    let store = MovieStore::new(db);
    store.seed_if_empty().await.context("seeding movies")?;

    Ok(AppContext { config: Arc::new(config), store, cookie_key })
}

pub fn router(ctx: AppContext) -> Router {
    let static_files = ServeDir::new(&ctx.config.static_dir);

    Router::new()
        .route("/", get(routes::home))
        .route("/edit/{id}", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete/{id}", get(routes::delete).post(routes::delete))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .nest_service("/static", static_files)
        .fallback(routes::not_found)
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[tokio::test]
    async fn short_secret_key_is_rejected() {
        let config = Config { secret_key: "too-short".to_string(), ..test_config() };
        let err = initialize(config).await.err().expect("short key accepted");
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[tokio::test]
    async fn initialize_seeds_store() {
        let ctx = initialize(test_config()).await.expect("init");
        assert_eq!(ctx.store.count().await.expect("count"), 5);
    }
}
