//! Account ledger: balances, transaction records and atomic transfers.
//!
//! Pure in-memory domain logic: no IO, no persistence, no interactive prompts.

pub mod account;
pub mod bank;
pub mod shared;
pub mod transaction;

pub use account::Account;
pub use bank::Ledger;
pub use shared::SharedAccount;
pub use transaction::{TransactionKind, TransactionRecord};
