//! Denormalized accounts view: every account with the conversations
//! addressed to it, their resolved recipients, messages, senders and readers.
//!
//! Stored documents are merged, not reshaped: each keeps all of its fields,
//! `to` and `from` are replaced by the resolved accounts, and
//! `conversations`, `messages` and `readers` are added. Built from one
//! [`Snapshot`] with id-keyed lookups instead of a sub-query per element.
//! References that resolve to nothing become `null`.

use std::collections::{HashMap, HashSet};

use bson::{Bson, Document};

use chatapp_db::queries::Snapshot;

pub fn accounts_with_conversations(snapshot: &Snapshot) -> Vec<Document> {
    let accounts_by_id: HashMap<&str, &Document> = snapshot
        .accounts
        .iter()
        .filter_map(|row| row.id().map(|id| (id, &row.0)))
        .collect();
    let resolve = |id: Option<&str>| -> Bson {
        id.and_then(|id| accounts_by_id.get(id))
            .map(|account| Bson::Document((*account).clone()))
            .unwrap_or(Bson::Null)
    };

    let mut readers_by_message: HashMap<&str, Vec<Bson>> = HashMap::new();
    for reader in &snapshot.readers {
        if let Some(message_id) = reader.message_id() {
            readers_by_message
                .entry(message_id)
                .or_default()
                .push(Bson::Document(reader.0.clone()));
        }
    }

    let mut messages_by_conversation: HashMap<&str, Vec<Bson>> = HashMap::new();
    for row in &snapshot.messages {
        let Some(conversation_id) = row.conversation_id() else {
            continue;
        };
        let readers = row
            .id()
            .and_then(|id| readers_by_message.get(id))
            .cloned()
            .unwrap_or_default();

        let mut message = row.0.clone();
        message.insert("from", resolve(row.sender_id()));
        message.insert("readers", readers);

        messages_by_conversation
            .entry(conversation_id)
            .or_default()
            .push(Bson::Document(message));
    }

    let conversations: Vec<Bson> = snapshot
        .conversations
        .iter()
        .map(|row| {
            let messages = row
                .id()
                .and_then(|id| messages_by_conversation.get(id))
                .cloned()
                .unwrap_or_default();

            let mut conversation = row.0.clone();
            if conversation.get_array("to").is_ok() {
                let to: Vec<Bson> = row.recipients().iter().map(|id| resolve(id.as_str())).collect();
                conversation.insert("to", to);
            }
            conversation.insert("messages", messages);
            Bson::Document(conversation)
        })
        .collect();

    // Recipient id -> positions in `conversations`. A conversation listing the
    // same recipient twice is still attached once.
    let mut conversations_by_recipient: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, row) in snapshot.conversations.iter().enumerate() {
        let mut seen = HashSet::new();
        for recipient in row.recipients().iter().filter_map(Bson::as_str) {
            if seen.insert(recipient) {
                conversations_by_recipient
                    .entry(recipient)
                    .or_default()
                    .push(index);
            }
        }
    }

    snapshot
        .accounts
        .iter()
        .map(|row| {
            let attached: Vec<Bson> = row
                .id()
                .and_then(|id| conversations_by_recipient.get(id))
                .map(|indexes| indexes.iter().map(|&i| conversations[i].clone()).collect())
                .unwrap_or_default();

            let mut account = row.0.clone();
            account.insert("conversations", attached);
            account
        })
        .collect()
}
