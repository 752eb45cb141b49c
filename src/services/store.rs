//! Persistence seams for clinics and their owning accounts.
//!
//! Operations in `veterinary_service` take the store as an explicit argument;
//! `SqliteStore` is the production implementation.

use crate::models::{
    account::{Account, AccountId},
    veterinary::{Veterinary, VeterinaryId},
};
use thiserror::Error;

/// Upper bound on the number of clinics returned by a listing.
pub const FIND_ALL_LIMIT: u32 = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("veterinary {0} not found")]
    NotFound(VeterinaryId),
    #[error("account {0} not found")]
    AccountNotFound(AccountId),
    #[error("{0} already taken")]
    DuplicateKey(String),
    #[error("owner account {0} does not exist")]
    MissingOwner(AccountId),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over clinics. Every returned clinic carries a fresh owner snapshot.
pub trait VeterinaryStore: Send + Sync {
    /// Insert a normalized, validated clinic and return it with its new id.
    fn create(&self, veterinary: Veterinary)
    -> impl Future<Output = StoreResult<Veterinary>> + Send;

    /// Up to `limit` clinics in insertion order. Fails if any owner lookup fails.
    fn find_all(&self, limit: u32) -> impl Future<Output = StoreResult<Vec<Veterinary>>> + Send;

    fn find_by_id(&self, id: VeterinaryId)
    -> impl Future<Output = StoreResult<Veterinary>> + Send;

    /// Overwrite `name`, `address` and `updated_at` of the clinic with
    /// `veterinary.id`. `owner_id` and `created_at` are left as stored.
    ///
    /// The stored `updated_at` only moves forward: a stamp that is not newer
    /// than the current one is replaced by the current one plus a microsecond.
    fn update(&self, veterinary: Veterinary)
    -> impl Future<Output = StoreResult<Veterinary>> + Send;

    /// Delete the clinic only if both `id` and `owner_id` match, in one statement.
    fn delete(
        &self,
        id: VeterinaryId,
        owner_id: AccountId,
    ) -> impl Future<Output = StoreResult<u64>> + Send;
}

/// Lookup of the owner's public record, used for enrichment.
pub trait AccountReader: Send + Sync {
    fn find_account_by_id(&self, id: AccountId)
    -> impl Future<Output = StoreResult<Account>> + Send;
}

/// Classify a failed write by the text of the database error.
pub fn classify(err: sqlx::Error, veterinary: &Veterinary) -> StoreError {
    let classified = match &err {
        sqlx::Error::Database(db_err) => classify_message(db_err.message(), veterinary.owner_id),
        _ => None,
    };
    classified.unwrap_or(StoreError::Database(err))
}

/// Recognize constraint-violation markers in a native error message.
///
/// SQLite reports e.g. `UNIQUE constraint failed: veterinaries.name` or
/// `FOREIGN KEY constraint failed`.
fn classify_message(message: &str, owner_id: AccountId) -> Option<StoreError> {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("unique") {
        let column = lowered
            .rsplit(['.', ' ', ':'])
            .next()
            .filter(|column| !column.is_empty())
            .unwrap_or("value");
        return Some(StoreError::DuplicateKey(column.to_string()));
    }
    if lowered.contains("foreign key") {
        return Some(StoreError::MissingOwner(owner_id));
    }
    None
}
