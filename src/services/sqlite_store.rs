//! src/services/sqlite_store.rs
//!
//! SqliteStore — clinic persistence backed by SQLite. Every clinic handed back
//! to a caller is enriched with a fresh read of its owner from `users`.

use super::store::{
    AccountReader, StoreError, StoreResult, VeterinaryStore, classify,
};
use crate::models::{
    account::{Account, AccountId},
    to_micros,
    veterinary::{Veterinary, VeterinaryId},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

const VETERINARY_COLUMNS: &str =
    "id, name, address, phone, owner_id, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteStore {
    /// Shared SQLite connection pool, safe for concurrent requests.
    pub db: Arc<SqlitePool>,
}

impl SqliteStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Attach the current owner snapshot.
    async fn enrich(&self, mut veterinary: Veterinary) -> StoreResult<Veterinary> {
        veterinary.owner = Some(self.find_account_by_id(veterinary.owner_id).await?);
        Ok(veterinary)
    }
}

/// SQLite stores `INTEGER` as `i64`, so no row can carry an id above `i64::MAX`.
fn to_sql_id(id: VeterinaryId) -> StoreResult<i64> {
    i64::try_from(id).map_err(|_| StoreError::NotFound(id))
}

impl AccountReader for SqliteStore {
    async fn find_account_by_id(&self, id: AccountId) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            "SELECT id, nickname, email, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => StoreError::AccountNotFound(id),
            other => StoreError::Database(other),
        })
    }
}

impl VeterinaryStore for SqliteStore {
    async fn create(&self, veterinary: Veterinary) -> StoreResult<Veterinary> {
        let created = sqlx::query_as::<_, Veterinary>(&format!(
            "INSERT INTO veterinaries (name, address, phone, owner_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {VETERINARY_COLUMNS}"
        ))
        .bind(&veterinary.name)
        .bind(&veterinary.address)
        .bind(&veterinary.phone)
        .bind(veterinary.owner_id)
        .bind(to_micros(veterinary.created_at))
        .bind(to_micros(veterinary.updated_at))
        .fetch_one(&*self.db)
        .await
        .map_err(|err| classify(err, &veterinary))?;

        debug!(id = created.id, owner_id = created.owner_id, "inserted veterinary");
        self.enrich(created).await
    }

    async fn find_all(&self, limit: u32) -> StoreResult<Vec<Veterinary>> {
        let rows = sqlx::query_as::<_, Veterinary>(&format!(
            "SELECT {VETERINARY_COLUMNS} FROM veterinaries ORDER BY id ASC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&*self.db)
        .await?;

        let mut enriched = Vec::with_capacity(rows.len());
        for row in rows {
            enriched.push(self.enrich(row).await?);
        }
        Ok(enriched)
    }

    async fn find_by_id(&self, id: VeterinaryId) -> StoreResult<Veterinary> {
        let found = sqlx::query_as::<_, Veterinary>(&format!(
            "SELECT {VETERINARY_COLUMNS} FROM veterinaries WHERE id = ?"
        ))
        .bind(to_sql_id(id)?)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        self.enrich(found).await
    }

    async fn update(&self, veterinary: Veterinary) -> StoreResult<Veterinary> {
        let updated = sqlx::query_as::<_, Veterinary>(&format!(
            "UPDATE veterinaries
             SET name = ?, address = ?, updated_at = MAX(?, updated_at + 1)
             WHERE id = ?
             RETURNING {VETERINARY_COLUMNS}"
        ))
        .bind(&veterinary.name)
        .bind(&veterinary.address)
        .bind(to_micros(veterinary.updated_at))
        .bind(to_sql_id(veterinary.id)?)
        .fetch_optional(&*self.db)
        .await
        .map_err(|err| classify(err, &veterinary))?
        .ok_or(StoreError::NotFound(veterinary.id))?;

        debug!(id = updated.id, "updated veterinary");
        self.enrich(updated).await
    }

    async fn delete(&self, id: VeterinaryId, owner_id: AccountId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM veterinaries WHERE id = ? AND owner_id = ?")
            .bind(to_sql_id(id)?)
            .bind(owner_id)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, owner_id, "deleted veterinary");
        Ok(result.rows_affected())
    }
}
