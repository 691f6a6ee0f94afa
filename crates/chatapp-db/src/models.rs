//! Stored documents. Collections are schemaless, so every row keeps the
//! whole document and only the join keys are interpreted.

use bson::{Bson, Document};

#[derive(Debug, Clone)]
pub struct AccountRow(pub Document);

impl AccountRow {
    pub fn id(&self) -> Option<&str> {
        self.0.get_str("id").ok()
    }
}

#[derive(Debug, Clone)]
pub struct ConversationRow(pub Document);

impl ConversationRow {
    pub fn id(&self) -> Option<&str> {
        self.0.get_str("id").ok()
    }

    /// Stored `to` entries, in order. Empty when the field is missing or not an array.
    pub fn recipients(&self) -> &[Bson] {
        self.0.get_array("to").map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct MessageRow(pub Document);

impl MessageRow {
    pub fn id(&self) -> Option<&str> {
        self.0.get_str("id").ok()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.0.get_str("conversation").ok()
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.0.get_str("from").ok()
    }
}

/// Read receipt; only the `message` reference is interpreted.
#[derive(Debug, Clone)]
pub struct ReaderRow(pub Document);

impl ReaderRow {
    pub fn message_id(&self) -> Option<&str> {
        self.0.get_str("message").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn join_keys_read_only_string_fields() {
        let message = MessageRow(doc! { "id": "m1", "conversation": 3, "text": "hi" });
        assert_eq!(message.id(), Some("m1"));
        assert_eq!(message.conversation_id(), None);
        assert_eq!(message.sender_id(), None);
    }

    #[test]
    fn recipients_tolerate_missing_or_scalar_to() {
        let missing = ConversationRow(doc! { "id": "c1" });
        assert!(missing.recipients().is_empty());

        let scalar = ConversationRow(doc! { "id": "c2", "to": "alice" });
        assert!(scalar.recipients().is_empty());

        let listed = ConversationRow(doc! { "id": "c3", "to": ["alice", 7] });
        assert_eq!(listed.recipients().len(), 2);
    }
}
