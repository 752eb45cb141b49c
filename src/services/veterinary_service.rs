//! Clinic operations: normalize → validate → authorize → persist.
//!
//! The store is passed to every operation so the same flow runs against
//! SQLite in production and an in-memory store in tests.

use super::{
    error::ServiceResult,
    ownership::authorize,
    store::{AccountReader, FIND_ALL_LIMIT, VeterinaryStore},
};
use crate::models::{
    account::AccountId,
    veterinary::{Veterinary, VeterinaryId},
};
use tracing::{debug, info};

/// Create a clinic owned by the caller.
pub async fn create_veterinary<S>(
    store: &S,
    caller_id: AccountId,
    raw: Veterinary,
) -> ServiceResult<Veterinary>
where
    S: VeterinaryStore + AccountReader,
{
    let veterinary = raw.normalize();
    veterinary.validate()?;
    authorize(caller_id, veterinary.owner_id)?;

    let created = store.create(veterinary).await?;
    info!(id = created.id, owner_id = created.owner_id, "veterinary created");
    Ok(created)
}

pub async fn list_veterinaries<S>(store: &S) -> ServiceResult<Vec<Veterinary>>
where
    S: VeterinaryStore + AccountReader,
{
    let all = store.find_all(FIND_ALL_LIMIT).await?;
    debug!(count = all.len(), "listed veterinaries");
    Ok(all)
}

pub async fn get_veterinary<S>(store: &S, id: VeterinaryId) -> ServiceResult<Veterinary>
where
    S: VeterinaryStore + AccountReader,
{
    Ok(store.find_by_id(id).await?)
}

/// Update `name` and `address` of a clinic the caller owns.
///
/// The payload must also name the caller as owner, so ownership can never be
/// handed to another account through an update.
pub async fn update_veterinary<S>(
    store: &S,
    caller_id: AccountId,
    id: VeterinaryId,
    raw: Veterinary,
) -> ServiceResult<Veterinary>
where
    S: VeterinaryStore + AccountReader,
{
    let existing = store.find_by_id(id).await?;
    authorize(caller_id, existing.owner_id)?;
    authorize(caller_id, raw.owner_id)?;

    let mut veterinary = raw.normalize();
    veterinary.validate()?;
    veterinary.id = existing.id;
    veterinary.owner_id = existing.owner_id;
    veterinary.created_at = existing.created_at;

    let updated = store.update(veterinary).await?;
    info!(id = updated.id, "veterinary updated");
    Ok(updated)
}

/// Delete a clinic the caller owns. Returns the number of rows removed.
pub async fn delete_veterinary<S>(
    store: &S,
    caller_id: AccountId,
    id: VeterinaryId,
) -> ServiceResult<u64>
where
    S: VeterinaryStore + AccountReader,
{
    let existing = store.find_by_id(id).await?;
    authorize(caller_id, existing.owner_id)?;

    // The id + owner predicate decides; the read above only picks the error.
    let removed = store.delete(id, caller_id).await?;
    info!(id, owner_id = caller_id, "veterinary deleted");
    Ok(removed)
}
