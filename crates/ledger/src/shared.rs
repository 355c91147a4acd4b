//! Lockable account handle.
//!
//! Each account is its own unit of mutual exclusion. Operations that read and
//! then write the balance hold the account lock for their whole duration, so
//! concurrent callers cannot both pass the funds check. Transfers lock both
//! sides in ascending `AccountId` order.

use std::sync::{Arc, Mutex, MutexGuard};

use teller_core::{AccountId, LedgerError, LedgerResult, Money};

use crate::account::Account;
use crate::transaction::TransactionRecord;

/// Cheaply cloneable, thread-safe handle to one account.
///
/// Clones refer to the same account.
#[derive(Debug, Clone)]
pub struct SharedAccount {
    id: AccountId,
    name: Arc<str>,
    inner: Arc<Mutex<Account>>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            id: account.id().clone(),
            name: Arc::from(account.name()),
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exclusive access to the underlying account. Crate-private so that
    /// every multi-account path goes through [`SharedAccount::transfer`].
    pub(crate) fn lock(&self) -> LedgerResult<MutexGuard<'_, Account>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::lock_poisoned(self.id.to_string()))
    }

    /// Run `f` against a read-only view of the account while holding its lock.
    pub fn with_account<T>(&self, f: impl FnOnce(&Account) -> T) -> LedgerResult<T> {
        Ok(f(&*self.lock()?))
    }

    pub fn balance(&self) -> LedgerResult<Money> {
        self.with_account(Account::balance)
    }

    pub fn validate_pin(&self, candidate: &str) -> LedgerResult<bool> {
        self.with_account(|account| account.validate_pin(candidate))
    }

    pub fn deposit(&self, amount: Money) -> LedgerResult<()> {
        self.lock()?.deposit(amount)
    }

    pub fn withdraw(&self, amount: Money) -> LedgerResult<()> {
        self.lock()?.withdraw(amount)
    }

    /// Atomic debit of `self` and credit of `recipient`.
    ///
    /// Rejected with `SelfTransfer` before any lock is taken when both handles
    /// carry the same id.
    pub fn transfer(&self, recipient: &SharedAccount, amount: Money) -> LedgerResult<()> {
        if self.id == recipient.id {
            return Err(LedgerError::SelfTransfer(self.id.clone()));
        }

        let (mut from, mut to) = if self.id < recipient.id {
            let from = self.lock()?;
            let to = recipient.lock()?;
            (from, to)
        } else {
            let to = recipient.lock()?;
            let from = self.lock()?;
            (from, to)
        };

        from.transfer(&mut *to, amount)
    }

    /// Snapshot of the history in insertion order.
    pub fn history(&self) -> LedgerResult<Vec<TransactionRecord>> {
        self.with_account(|account| account.history().to_vec())
    }

    /// True if both handles point at the same account object.
    pub fn ptr_eq(&self, other: &SharedAccount) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
