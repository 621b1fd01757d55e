use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub secret_key: String,
    pub database_url: String,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let secret_key = std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?;

        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URI"))
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let static_dir =
            std::env::var("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|_| "static".into());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            secret_key,
            database_url,
            static_dir,
        })
    }
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().expect("addr"),
        secret_key: "test-secret-key-that-is-long-enough-to-sign".to_string(),
        database_url: "sqlite::memory:".to_string(),
        static_dir: "static".into(),
    }
}
