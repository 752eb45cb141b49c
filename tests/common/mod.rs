//! Shared fixtures: an in-memory SQLite database with the schema applied.

#![allow(dead_code)]

use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use vet_registry::{
    models::{account::AccountId, veterinary::Veterinary},
    services::sqlite_store::SqliteStore,
};

/// A single connection keeps the in-memory database alive and shared.
pub async fn setup() -> SqlitePool {
    let db = vet_registry::connect("sqlite::memory:", 1).await.unwrap();
    vet_registry::run_migrations(&db).await.unwrap();
    db
}

pub async fn store() -> SqliteStore {
    SqliteStore::new(Arc::new(setup().await))
}

pub async fn seed_account(db: &SqlitePool, id: AccountId, nickname: &str) {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO users (id, nickname, email, password, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(nickname)
    .bind(format!("{nickname}@example.com"))
    .bind("hashed")
    .bind(now)
    .bind(now)
    .execute(db)
    .await
    .unwrap();
}

pub fn clinic(name: &str, address: &str, owner_id: AccountId) -> Veterinary {
    Veterinary {
        name: name.into(),
        address: address.into(),
        owner_id,
        ..Default::default()
    }
    .normalize()
}
