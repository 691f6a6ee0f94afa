use axum::{
    Extension,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};
use tracing::{debug, error};

use chatapp_db::encode::document_to_json;
use chatapp_db::queries::Snapshot;

use crate::aggregate::accounts_with_conversations;
use crate::middleware::Connection;

/// `GET /accounts`: every account joined with its conversations, pretty-printed.
pub async fn list_accounts(
    Extension(conn): Extension<Connection>,
) -> Result<impl IntoResponse, StatusCode> {
    let snapshot = Snapshot::load(conn.as_ref()).await.map_err(|e| {
        error!("Failed to load collections: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let accounts: Vec<Value> = accounts_with_conversations(&snapshot)
        .iter()
        .map(document_to_json)
        .collect();
    debug!("Serving {} accounts", accounts.len());

    let body = to_pretty_json(&accounts).map_err(|e| {
        error!("Failed to serialize accounts: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(body)
}
