pub mod accounts;
pub mod aggregate;
pub mod middleware;

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};

use chatapp_db::DocumentStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Box<dyn DocumentStore>,
}

/// All HTTP routes. Each matched request runs with its own store connection.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/accounts", get(accounts::list_accounts))
        .route_layer(from_fn_with_state(state.clone(), middleware::attach_connection))
        .with_state(state)
}
