//! Ownership check shared by every mutating operation.

use crate::models::account::AccountId;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unauthorized")]
pub struct Unauthorized;

/// Allow the operation only when the caller is the owner. No roles, no delegation.
pub fn authorize(caller_id: AccountId, owner_id: AccountId) -> Result<(), Unauthorized> {
    if caller_id == owner_id {
        Ok(())
    } else {
        warn!(caller_id, owner_id, "caller does not own the clinic");
        Err(Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        assert_eq!(authorize(7, 7), Ok(()));
    }

    #[test]
    fn anyone_else_is_rejected() {
        assert_eq!(authorize(7, 9), Err(Unauthorized));
        assert_eq!(authorize(0, 7), Err(Unauthorized));
    }
}
