use std::collections::HashMap;

use tracing::{debug, info, warn};

use teller_core::{AccountId, LedgerError, LedgerResult, Money};

use crate::account::Account;
use crate::shared::SharedAccount;

/// Keyed collection of accounts with authentication lookup.
///
/// The map itself is populated by the caller at startup (`&mut self`); after
/// that the ledger is read-only and can be shared (`Arc<Ledger>`), with every
/// account guarding its own state.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<AccountId, SharedAccount>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account, replacing any existing account with the same id.
    ///
    /// The replaced handle, if any, is returned. Callers that want duplicate
    /// ids to be an error should use [`Ledger::open_account`].
    pub fn add_account(&mut self, account: Account) -> Option<SharedAccount> {
        let handle = SharedAccount::new(account);
        let id = handle.id().clone();
        let replaced = self.accounts.insert(id.clone(), handle);
        if replaced.is_some() {
            warn!(account = %id, "account replaced by add_account");
        } else {
            info!(account = %id, "account added");
        }
        replaced
    }

    /// Insert an account, failing with `AlreadyExists` if the id is taken.
    pub fn open_account(&mut self, account: Account) -> LedgerResult<SharedAccount> {
        if self.accounts.contains_key(account.id()) {
            return Err(LedgerError::AlreadyExists(account.id().clone()));
        }
        let handle = SharedAccount::new(account);
        self.accounts.insert(handle.id().clone(), handle.clone());
        info!(account = %handle.id(), "account opened");
        Ok(handle)
    }

    pub fn get_account(&self, id: &str) -> Option<SharedAccount> {
        self.accounts.get(id).cloned()
    }

    /// `false` for an unknown id or a wrong PIN; the two are not distinguished.
    pub fn authenticate(&self, id: &str, pin: &str) -> bool {
        let Some(account) = self.accounts.get(id) else {
            debug!(account = id, "authentication failed: unknown account");
            return false;
        };
        match account.validate_pin(pin) {
            Ok(true) => true,
            Ok(false) => {
                debug!(account = id, "authentication failed: pin mismatch");
                false
            }
            Err(e) => {
                warn!(account = id, error = %e, "authentication failed");
                false
            }
        }
    }

    /// Resolve both ids and transfer between them.
    pub fn transfer(&self, from: &str, to: &str, amount: Money) -> LedgerResult<()> {
        let sender = self.require(from)?;
        let recipient = self.require(to)?;
        sender.transfer(&recipient, amount)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.accounts.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn require(&self, id: &str) -> LedgerResult<SharedAccount> {
        self.get_account(id)
            .ok_or_else(|| match AccountId::new(id) {
                Ok(id) => LedgerError::AccountNotFound(id),
                Err(e) => e,
            })
    }
}
