use bson::{Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::info;

use crate::{Collection, Database, Result, StoreError};

/// Server error code for "collection already exists".
const NAMESPACE_EXISTS: i32 = 48;

// The message_readers fixture is a copy of the conversations fixture.
// Kept as shipped; no reader document carries a `message` field.
const ACCOUNTS: &str = include_str!("../fixtures/accounts.json");
const CONVERSATIONS: &str = include_str!("../fixtures/conversations.json");
const MESSAGES: &str = include_str!("../fixtures/messages.json");
const MESSAGE_READERS: &str = include_str!("../fixtures/message_readers.json");

impl Database {
    /// One-shot bootstrap: create the four collections and load the sample
    /// records. Fails with [`StoreError::AlreadyInitialized`] as soon as a
    /// collection turns out to exist; missing collections are not filled in
    /// individually.
    pub async fn setup(&self) -> Result<()> {
        let db = self.ping().await?;

        for collection in Collection::ALL {
            let name = collection.name();
            db.create_collection(name).await.map_err(|source| {
                if is_namespace_exists(&source) {
                    StoreError::AlreadyInitialized
                } else {
                    StoreError::Query {
                        collection: name,
                        source,
                    }
                }
            })?;

            let documents = seed_documents(collection)?;
            let count = documents.len();
            db.collection::<Document>(name)
                .insert_many(documents)
                .await
                .map_err(|source| StoreError::Query {
                    collection: name,
                    source,
                })?;

            info!("Seeded {} with {} documents", name, count);
        }

        Ok(())
    }
}

fn is_namespace_exists(error: &MongoError) -> bool {
    matches!(*error.kind, ErrorKind::Command(ref command) if command.code == NAMESPACE_EXISTS)
}

/// Sample records for `collection`, parsed from the bundled extended-JSON fixtures.
pub fn seed_documents(collection: Collection) -> Result<Vec<Document>> {
    let raw = match collection {
        Collection::Accounts => ACCOUNTS,
        Collection::Conversations => CONVERSATIONS,
        Collection::Messages => MESSAGES,
        Collection::MessageReaders => MESSAGE_READERS,
    };
    let invalid = |message: String| StoreError::Fixture {
        collection: collection.name(),
        message,
    };

    let values: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;

    values
        .into_iter()
        .map(|value| match Bson::try_from(value) {
            Ok(Bson::Document(document)) => Ok(document),
            Ok(other) => Err(invalid(format!("expected a document, found {}", other))),
            Err(e) => Err(invalid(e.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_expected_sizes() {
        let sizes: Vec<usize> = Collection::ALL
            .iter()
            .map(|c| seed_documents(*c).unwrap().len())
            .collect();
        assert_eq!(sizes, vec![6, 5, 2, 5]);
    }

    #[test]
    fn fixture_dates_are_bson_datetimes() {
        let accounts = seed_documents(Collection::Accounts).unwrap();
        let pegora = accounts
            .iter()
            .find(|a| a.get_str("name").ok() == Some("Pegora"))
            .unwrap();
        let created = pegora.get_datetime("created_on").unwrap();
        assert_eq!(created.timestamp_millis(), 1_392_514_959_828);
    }

    #[test]
    fn reader_fixture_mirrors_conversations() {
        let conversations = seed_documents(Collection::Conversations).unwrap();
        let readers = seed_documents(Collection::MessageReaders).unwrap();
        assert_eq!(conversations, readers);
        assert!(readers.iter().all(|r| !r.contains_key("message")));
    }

    #[test]
    fn conversation_type_is_optional() {
        let conversations = seed_documents(Collection::Conversations).unwrap();
        let tagged = conversations
            .iter()
            .filter(|c| c.contains_key("type"))
            .count();
        assert_eq!(tagged, 3);
    }
}
