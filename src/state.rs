//! Shared state handed to every handler.

use crate::{auth::TokenGateway, services::sqlite_store::SqliteStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub gateway: TokenGateway,
}

impl AppState {
    pub fn new(store: SqliteStore, gateway: TokenGateway) -> Self {
        Self { store, gateway }
    }
}

impl FromRef<AppState> for TokenGateway {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl FromRef<AppState> for SqliteStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
