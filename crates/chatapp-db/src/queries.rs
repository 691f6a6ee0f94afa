use bson::Document;

use crate::models::{AccountRow, ConversationRow, MessageRow, ReaderRow};
use crate::{Collection, Result, StoreConnection};

/// Full contents of the four collections, read over one connection.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub accounts: Vec<AccountRow>,
    pub conversations: Vec<ConversationRow>,
    pub messages: Vec<MessageRow>,
    pub readers: Vec<ReaderRow>,
}

impl Snapshot {
    pub async fn load(conn: &dyn StoreConnection) -> Result<Self> {
        Ok(Self {
            accounts: fetch_rows(conn, Collection::Accounts, AccountRow).await?,
            conversations: fetch_rows(conn, Collection::Conversations, ConversationRow).await?,
            messages: fetch_rows(conn, Collection::Messages, MessageRow).await?,
            readers: fetch_rows(conn, Collection::MessageReaders, ReaderRow).await?,
        })
    }
}

async fn fetch_rows<T>(
    conn: &dyn StoreConnection,
    collection: Collection,
    wrap: fn(Document) -> T,
) -> Result<Vec<T>> {
    Ok(conn.fetch_all(collection).await?.into_iter().map(wrap).collect())
}
