use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    Conversations,
    Messages,
    MessageReaders,
}

impl Collection {
    /// Creation order used by setup.
    pub const ALL: [Collection; 4] = [
        Collection::Accounts,
        Collection::Conversations,
        Collection::Messages,
        Collection::MessageReaders,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Conversations => "conversations",
            Collection::Messages => "messages",
            Collection::MessageReaders => "message_readers",
        }
    }
}

/// Something that can hand out a connection scoped to one request.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn StoreConnection>>;
}

#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Every document of `collection`, in natural order.
    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Document>>;

    async fn close(&self);
}
