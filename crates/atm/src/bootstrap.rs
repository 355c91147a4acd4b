//! Demo data for the teller binary.

use teller_core::{AccountId, LedgerResult, Money, Pin};
use teller_ledger::{Account, Ledger};

/// `(id, pin, name, opening balance in cents)`
pub const DEMO_ACCOUNTS: [(&str, &str, &str, i64); 2] = [
    ("123456", "1234", "John Doe", 500_000),
    ("654321", "4321", "Jane Smith", 300_000),
];

/// A ledger holding the demo accounts.
pub fn demo_ledger() -> LedgerResult<Ledger> {
    let mut ledger = Ledger::new();
    for (id, pin, name, cents) in DEMO_ACCOUNTS {
        ledger.open_account(Account::new(
            AccountId::new(id)?,
            Pin::new(pin),
            name,
            Money::from_cents(cents),
        )?)?;
    }
    Ok(ledger)
}
