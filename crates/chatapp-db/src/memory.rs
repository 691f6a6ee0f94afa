//! In-process [`DocumentStore`] holding plain documents, for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;

use crate::migrations::seed_documents;
use crate::{Collection, DocumentStore, Result, StoreConnection};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<Collection, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded with the same records `--setup` writes.
    pub fn seeded() -> Result<Self> {
        let mut store = Self::new();
        for collection in Collection::ALL {
            store
                .collections
                .insert(collection, seed_documents(collection)?);
        }
        Ok(store)
    }

    pub fn insert(&mut self, collection: Collection, document: Document) {
        self.collections.entry(collection).or_default().push(document);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self) -> Result<Arc<dyn StoreConnection>> {
        Ok(Arc::new(MemoryConnection {
            collections: self.collections.clone(),
        }))
    }
}

struct MemoryConnection {
    collections: HashMap<Collection, Vec<Document>>,
}

#[async_trait]
impl StoreConnection for MemoryConnection {
    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn close(&self) {}
}
