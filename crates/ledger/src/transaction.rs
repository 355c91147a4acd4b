use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teller_core::{AccountId, Money};

/// What kind of balance change a record describes.
///
/// Money received through a transfer is recorded on the recipient as a plain
/// `Deposit`; there is no separate incoming-transfer kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
    TransferOut { to: AccountId },
}

impl TransactionKind {
    /// Stable name (e.g. "ledger.account.withdrawal"), used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            TransactionKind::InitialDeposit => "ledger.account.initial_deposit",
            TransactionKind::Deposit => "ledger.account.deposit",
            TransactionKind::Withdrawal => "ledger.account.withdrawal",
            TransactionKind::TransferOut { .. } => "ledger.account.transfer_out",
        }
    }

    /// Credits carry a positive amount, debits a negative one.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionKind::InitialDeposit | TransactionKind::Deposit
        )
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionKind::InitialDeposit => f.write_str("Initial Deposit"),
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
            TransactionKind::TransferOut { to } => write!(f, "Transfer to {to}"),
        }
    }
}

/// Immutable log entry for one balance-affecting event.
///
/// `amount` is the signed delta that was applied to the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    id: Uuid,
    kind: TransactionKind,
    amount: Money,
    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Build a record for `kind` from a positive magnitude, applying the sign
    /// the kind dictates.
    pub(crate) fn new(kind: TransactionKind, magnitude: Money) -> Self {
        Self::at(kind, magnitude, Utc::now())
    }

    pub(crate) fn at(kind: TransactionKind, magnitude: Money, timestamp: DateTime<Utc>) -> Self {
        debug_assert!(!magnitude.is_negative());
        // Negating a non-negative i64 cannot overflow.
        let amount = if kind.is_credit() {
            magnitude
        } else {
            magnitude.checked_neg().unwrap_or(Money::ZERO)
        };
        Self {
            id: Uuid::now_v7(),
            kind,
            amount,
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl core::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.amount.is_negative() { '-' } else { '+' };
        write!(
            f,
            "{} | {} | {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            sign,
            self.amount.display_abs()
        )
    }
}
