//! Error taxonomy of the clinic operations.

use super::{ownership::Unauthorized, store::StoreError};
use crate::models::veterinary::ValidationError;
use thiserror::Error;

/// Coarse outcome class, mapped to a status code by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadInput,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DuplicateKey(String),
    #[error(transparent)]
    Store(StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Validation(_) => ErrorCategory::BadInput,
            ServiceError::Unauthorized => ErrorCategory::Unauthorized,
            ServiceError::NotFound(_) => ErrorCategory::NotFound,
            ServiceError::DuplicateKey(_) => ErrorCategory::Conflict,
            ServiceError::Store(_) => ErrorCategory::Internal,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<Unauthorized> for ServiceError {
    fn from(_: Unauthorized) -> Self {
        ServiceError::Unauthorized
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) | StoreError::AccountNotFound(_) => {
                ServiceError::NotFound(err.to_string())
            }
            StoreError::DuplicateKey(_) => ServiceError::DuplicateKey(err.to_string()),
            StoreError::MissingOwner(_) => ServiceError::Validation(err.to_string()),
            other => ServiceError::Store(other),
        }
    }
}
