//! `teller-core` — ledger building blocks.
//!
//! Value objects, identifiers and the error model shared by the ledger and its
//! callers. No IO, no locking.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{LedgerError, LedgerResult};
pub use id::{AccountId, Pin};
pub use money::{Money, ParseMoneyError};
pub use value_object::ValueObject;
