//! Defines routes for clinic operations.
//!
//! ## Structure
//! - **Collection endpoints**
//!   - `GET    /veterinaries` — list clinics (at most 100)
//!   - `POST   /veterinaries` — create clinic (token required)
//!
//! - **Item endpoints**
//!   - `GET    /veterinaries/{id}` — fetch one clinic
//!   - `PUT    /veterinaries/{id}` — update name/address (owner only)
//!   - `DELETE /veterinaries/{id}` — delete (owner only)

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        veterinary_handlers::{
            create_veterinary, delete_veterinary, get_veterinary, list_veterinaries,
            update_veterinary,
        },
    },
    state::AppState,
};
use axum::{Router, routing::get};

/// Build and return the router for every endpoint.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route(
            "/veterinaries",
            get(list_veterinaries).post(create_veterinary),
        )
        .route(
            "/veterinaries/{id}",
            get(get_veterinary)
                .put(update_veterinary)
                .delete(delete_veterinary),
        )
}
