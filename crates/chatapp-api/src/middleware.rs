use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use chatapp_db::StoreConnection;

use crate::AppState;

pub const NO_CONNECTION: &str = "No database connection could be established.";

/// Request-scoped handle, extracted by handlers with `Extension<Connection>`.
pub type Connection = Arc<dyn StoreConnection>;

/// Acquire a store connection before the handler runs and release it after.
/// An unreachable store short-circuits with 503.
pub async fn attach_connection(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let conn: Connection = match state.store.connect().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("{} {}: {}", req.method(), req.uri().path(), e);
            return (StatusCode::SERVICE_UNAVAILABLE, NO_CONNECTION).into_response();
        }
    };

    req.extensions_mut().insert(conn.clone());
    let response = next.run(req).await;
    conn.close().await;

    response
}
