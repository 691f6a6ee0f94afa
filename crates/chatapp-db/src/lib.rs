pub mod encode;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::Client;
use mongodb::options::{ClientOptions, ServerAddress};
use tracing::{debug, info};

pub use error::{Result, StoreError};
pub use store::{Collection, DocumentStore, StoreConnection};

/// Every collection lives in this one database.
pub const DATABASE_NAME: &str = "chatapp";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on how long acquiring a connection may block.
    pub server_selection_timeout: Duration,
}

/// MongoDB-backed document store.
///
/// The driver's `Client` is a cheap handle over its own pool; "connecting"
/// checks the server is reachable and hands out a database handle.
pub struct Database {
    client: Client,
    name: String,
}

impl Database {
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: config.host.clone(),
                port: Some(config.port),
            }])
            .server_selection_timeout(config.server_selection_timeout)
            .connect_timeout(config.server_selection_timeout)
            .app_name(DATABASE_NAME.to_string())
            .build();

        let client = Client::with_options(options).map_err(StoreError::Connect)?;

        info!("Document store configured at {}:{}", config.host, config.port);
        Ok(Self {
            client,
            name: DATABASE_NAME.to_string(),
        })
    }

    async fn ping(&self) -> Result<mongodb::Database> {
        let db = self.client.database(&self.name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::Connect)?;
        Ok(db)
    }
}

#[async_trait]
impl DocumentStore for Database {
    async fn connect(&self) -> Result<Arc<dyn StoreConnection>> {
        let db = self.ping().await?;
        Ok(Arc::new(MongoConnection { db }))
    }
}

struct MongoConnection {
    db: mongodb::Database,
}

#[async_trait]
impl StoreConnection for MongoConnection {
    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let name = collection.name();
        let query_failed = |source| StoreError::Query {
            collection: name,
            source,
        };

        // `id` is the application key; the driver-assigned `_id` never leaves the store.
        let cursor = self
            .db
            .collection::<Document>(name)
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await
            .map_err(query_failed)?;

        cursor.try_collect().await.map_err(query_failed)
    }

    async fn close(&self) {
        debug!("Released connection to {}", self.db.name());
    }
}
