use std::time::Duration;

use anyhow::{Context, Result, bail};

use chatapp_db::StoreConfig;

const USAGE: &str = "usage: chatapp [--setup]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Serve `GET /accounts`.
    Serve,
    /// Create the collections, load sample data, exit.
    Setup,
}

impl Mode {
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut mode = Mode::Serve;
        for arg in args {
            match arg.as_str() {
                "--setup" => mode = Mode::Setup,
                other => bail!("unexpected argument `{}`\n{}", other, USAGE),
            }
        }
        Ok(mode)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let port: u16 = var("CHATAPP_PORT", "5000")
            .parse()
            .context("CHATAPP_PORT must be a port number")?;
        let db_port: u16 = var("CHATAPP_DB_PORT", "27017")
            .parse()
            .context("CHATAPP_DB_PORT must be a port number")?;
        let timeout_ms: u64 = var("CHATAPP_DB_TIMEOUT_MS", "2000")
            .parse()
            .context("CHATAPP_DB_TIMEOUT_MS must be a number of milliseconds")?;

        Ok(Self {
            host: var("CHATAPP_HOST", "0.0.0.0"),
            port,
            store: StoreConfig {
                host: var("CHATAPP_DB_HOST", "localhost"),
                port: db_port,
                server_selection_timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}
