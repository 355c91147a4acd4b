//! `teller-atm` — the text-menu front end over the account ledger.

pub mod bootstrap;
pub mod config;
pub mod session;

pub use config::{AtmConfig, ConfigError};
pub use session::{Session, SessionError, SessionResult};
