//! In-memory store used by the operation tests.
//!
//! Mirrors the SQLite semantics that matter to the operations: unique names,
//! owner foreign key, partial-column update and the combined delete predicate.

use super::store::{AccountReader, StoreError, StoreResult, VeterinaryStore};
use crate::models::{
    account::{Account, AccountId},
    veterinary::{Veterinary, VeterinaryId},
};
use chrono::TimeDelta;
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

#[derive(Default)]
struct Tables {
    next_id: VeterinaryId,
    veterinaries: BTreeMap<VeterinaryId, Veterinary>,
    accounts: BTreeMap<AccountId, Account>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with_accounts(ids: &[AccountId]) -> Self {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            for &id in ids {
                tables.accounts.insert(
                    id,
                    Account {
                        id,
                        nickname: format!("user{id}"),
                        email: format!("user{id}@example.com"),
                        ..Default::default()
                    },
                );
            }
        }
        store
    }

    /// Number of mutating calls that reached the store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw row, without enrichment.
    pub fn row(&self, id: VeterinaryId) -> Option<Veterinary> {
        self.tables.lock().unwrap().veterinaries.get(&id).cloned()
    }

    pub fn rename_account(&self, id: AccountId, nickname: &str) {
        if let Some(account) = self.tables.lock().unwrap().accounts.get_mut(&id) {
            account.nickname = nickname.to_string();
        }
    }

    fn enrich(tables: &Tables, mut veterinary: Veterinary) -> StoreResult<Veterinary> {
        let owner = tables
            .accounts
            .get(&veterinary.owner_id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(veterinary.owner_id))?;
        veterinary.owner = Some(owner);
        Ok(veterinary)
    }

    fn name_taken(tables: &Tables, name: &str, except: VeterinaryId) -> bool {
        tables
            .veterinaries
            .values()
            .any(|existing| existing.name == name && existing.id != except)
    }
}

impl AccountReader for MemoryStore {
    async fn find_account_by_id(&self, id: AccountId) -> StoreResult<Account> {
        let tables = self.tables.lock().unwrap();
        tables
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(id))
    }
}

impl VeterinaryStore for MemoryStore {
    async fn create(&self, mut veterinary: Veterinary) -> StoreResult<Veterinary> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        if Self::name_taken(&tables, &veterinary.name, 0) {
            return Err(StoreError::DuplicateKey("name".into()));
        }
        if !tables.accounts.contains_key(&veterinary.owner_id) {
            return Err(StoreError::MissingOwner(veterinary.owner_id));
        }
        tables.next_id += 1;
        veterinary.id = tables.next_id;
        veterinary.owner = None;
        tables.veterinaries.insert(veterinary.id, veterinary.clone());
        Self::enrich(&tables, veterinary)
    }

    async fn find_all(&self, limit: u32) -> StoreResult<Vec<Veterinary>> {
        let tables = self.tables.lock().unwrap();
        tables
            .veterinaries
            .values()
            .take(limit as usize)
            .cloned()
            .map(|row| Self::enrich(&tables, row))
            .collect()
    }

    async fn find_by_id(&self, id: VeterinaryId) -> StoreResult<Veterinary> {
        let tables = self.tables.lock().unwrap();
        let row = tables
            .veterinaries
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        Self::enrich(&tables, row)
    }

    async fn update(&self, veterinary: Veterinary) -> StoreResult<Veterinary> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        if Self::name_taken(&tables, &veterinary.name, veterinary.id) {
            return Err(StoreError::DuplicateKey("name".into()));
        }
        let row = tables
            .veterinaries
            .get_mut(&veterinary.id)
            .ok_or(StoreError::NotFound(veterinary.id))?;
        row.name = veterinary.name;
        row.address = veterinary.address;
        row.updated_at = veterinary
            .updated_at
            .max(row.updated_at + TimeDelta::microseconds(1));
        let row = row.clone();
        Self::enrich(&tables, row)
    }

    async fn delete(&self, id: VeterinaryId, owner_id: AccountId) -> StoreResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        match tables.veterinaries.get(&id) {
            Some(row) if row.owner_id == owner_id => {
                tables.veterinaries.remove(&id);
                Ok(1)
            }
            _ => Err(StoreError::NotFound(id)),
        }
    }
}
