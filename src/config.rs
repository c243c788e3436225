//! Process configuration, read once from the environment at startup.

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:videohub.db";
pub const DEFAULT_FRONTEND_DIR: &str = "frontend";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub frontend_dir: String,
}

impl Config {
    /// Reads `PORT`, `DATABASE_URL` and `FRONTEND_DIR`, falling back to the
    /// defaults above. Call after `dotenv` has loaded any `.env` file.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let frontend_dir =
            std::env::var("FRONTEND_DIR").unwrap_or_else(|_| DEFAULT_FRONTEND_DIR.to_string());

        Ok(Self {
            port,
            database_url,
            frontend_dir,
        })
    }
}
