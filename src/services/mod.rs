pub mod error;
#[cfg(test)]
pub(crate) mod memory_store;
pub mod ownership;
pub mod sqlite_store;
pub mod store;
pub mod veterinary_service;
