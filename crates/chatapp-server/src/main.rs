mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use chatapp_api::AppStateInner;
use chatapp_db::{Database, StoreError};

use crate::config::{Config, Mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chatapp=debug,chatapp_api=debug,chatapp_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    let mode = Mode::from_args(std::env::args().skip(1))?;
    let config = Config::from_env()?;
    let db = Database::open(&config.store)?;

    match mode {
        Mode::Setup => setup(&db).await,
        Mode::Serve => serve(&config, db).await,
    }
}

async fn setup(db: &Database) -> anyhow::Result<()> {
    info!("{}", setup_outcome(db.setup().await)?);
    Ok(())
}

/// An already-initialized database is a successful setup run.
fn setup_outcome(result: chatapp_db::Result<()>) -> anyhow::Result<&'static str> {
    match result {
        Ok(()) => Ok("Database setup completed. Now run the app without --setup."),
        Err(StoreError::AlreadyInitialized) => {
            Ok("App database already exists. Run the app without --setup.")
        }
        Err(e) => Err(e.into()),
    }
}

async fn serve(config: &Config, db: Database) -> anyhow::Result<()> {
    let state = Arc::new(AppStateInner {
        store: Box::new(db),
    });

    let app = chatapp_api::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("chatapp listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_setup_reports_completion() {
        let message = setup_outcome(Ok(())).unwrap();
        assert!(message.starts_with("Database setup completed"));
    }

    #[test]
    fn existing_database_is_not_a_failure() {
        let message = setup_outcome(Err(StoreError::AlreadyInitialized)).unwrap();
        assert_eq!(message, "App database already exists. Run the app without --setup.");
    }

    #[test]
    fn other_setup_errors_propagate() {
        let err = setup_outcome(Err(StoreError::Fixture {
            collection: "accounts",
            message: "expected an array".to_string(),
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid `accounts` fixture"));
    }
}
