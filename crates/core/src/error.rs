//! Ledger error model.

use thiserror::Error;

use crate::id::AccountId;
use crate::money::Money;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a local, recoverable condition. None of them imply that a
/// mutation was partially applied: an operation that returns `Err` has left
/// every account it touched unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A non-positive amount was supplied to a mutating operation.
    #[error("invalid amount: {0} (must be positive)")]
    InvalidAmount(Money),

    /// The debit would drive the balance below zero.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// Transfer source and destination are the same account.
    #[error("cannot transfer to the same account ({0})")]
    SelfTransfer(AccountId),

    /// Strict insert hit an identifier that is already registered.
    #[error("account already exists: {0}")]
    AlreadyExists(AccountId),

    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// The resulting balance is not representable.
    #[error("amount overflow")]
    Overflow,

    /// A value failed validation (e.g. blank identifier).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A thread panicked while holding an account lock.
    #[error("account lock poisoned: {0}")]
    LockPoisoned(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_funds(requested: Money, available: Money) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    pub fn lock_poisoned(what: impl Into<String>) -> Self {
        Self::LockPoisoned(what.into())
    }
}
