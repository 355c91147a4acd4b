use tracing::{debug, warn};

use teller_core::{AccountId, Entity, LedgerError, LedgerResult, Money, Pin};

use crate::transaction::{TransactionKind, TransactionRecord};

/// A holder of a balance and its mutation history.
///
/// # Invariants
/// - `balance >= 0` after every operation; a debit that would go below zero is rejected.
/// - `history` is append-only and has exactly one record per successful mutation,
///   starting with the initial deposit.
/// - A failed operation leaves both balance and history untouched.
///
/// `Account` itself is single-owner (`&mut self`). Shared, lockable access goes
/// through [`crate::SharedAccount`].
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    pin: Pin,
    name: String,
    balance: Money,
    history: Vec<TransactionRecord>,
}

impl Account {
    /// Open an account with an initial balance, recorded as an initial deposit.
    ///
    /// A zero initial balance is allowed; a negative one is `InvalidAmount`.
    pub fn new(
        id: AccountId,
        pin: Pin,
        name: impl Into<String>,
        initial_balance: Money,
    ) -> LedgerResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("account name cannot be empty"));
        }
        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidAmount(initial_balance));
        }

        Ok(Self {
            id,
            pin,
            name,
            balance: initial_balance,
            history: vec![TransactionRecord::new(
                TransactionKind::InitialDeposit,
                initial_balance,
            )],
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn validate_pin(&self, candidate: &str) -> bool {
        self.pin.matches(candidate)
    }

    /// Full log in insertion order.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub fn deposit(&mut self, amount: Money) -> LedgerResult<()> {
        self.try_deposit(amount)
            .inspect_err(|e| log_rejected(&self.id, "deposit", amount, e))
    }

    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<()> {
        self.try_withdraw(amount)
            .inspect_err(|e| log_rejected(&self.id, "withdraw", amount, e))
    }

    /// Move `amount` to `recipient`.
    ///
    /// The recipient is credited through the deposit path (a `Deposit` record).
    /// Both resulting balances are validated before either account changes.
    pub fn transfer(&mut self, recipient: &mut Account, amount: Money) -> LedgerResult<()> {
        self.try_transfer(recipient, amount)
            .inspect_err(|e| log_rejected(&self.id, "transfer", amount, e))
    }

    fn try_deposit(&mut self, amount: Money) -> LedgerResult<()> {
        ensure_positive(amount)?;
        let credited = self.credited_balance(amount)?;
        self.apply(credited, TransactionKind::Deposit, amount);
        Ok(())
    }

    fn try_withdraw(&mut self, amount: Money) -> LedgerResult<()> {
        ensure_positive(amount)?;
        let debited = self.debited_balance(amount)?;
        self.apply(debited, TransactionKind::Withdrawal, amount);
        Ok(())
    }

    fn try_transfer(&mut self, recipient: &mut Account, amount: Money) -> LedgerResult<()> {
        if self.id == recipient.id {
            return Err(LedgerError::SelfTransfer(self.id.clone()));
        }
        ensure_positive(amount)?;

        let debited = self.debited_balance(amount)?;
        let credited = recipient.credited_balance(amount)?;

        self.apply(
            debited,
            TransactionKind::TransferOut {
                to: recipient.id.clone(),
            },
            amount,
        );
        recipient.apply(credited, TransactionKind::Deposit, amount);
        Ok(())
    }

    fn credited_balance(&self, amount: Money) -> LedgerResult<Money> {
        self.balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)
    }

    fn debited_balance(&self, amount: Money) -> LedgerResult<Money> {
        if amount > self.balance {
            return Err(LedgerError::insufficient_funds(amount, self.balance));
        }
        self.balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)
    }

    fn apply(&mut self, new_balance: Money, kind: TransactionKind, amount: Money) {
        debug!(
            account = %self.id,
            kind = kind.code(),
            %amount,
            balance = %new_balance,
            "applied ledger mutation"
        );
        self.balance = new_balance;
        self.history.push(TransactionRecord::new(kind, amount));
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn log_rejected(account: &AccountId, operation: &'static str, amount: Money, error: &LedgerError) {
    warn!(%account, operation, %amount, %error, "ledger operation rejected");
}

fn ensure_positive(amount: Money) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn account(id: &str, pin: &str, name: &str, balance: &str) -> Account {
        Account::new(AccountId::new(id).unwrap(), Pin::new(pin), name, money(balance)).unwrap()
    }

    fn john() -> Account {
        account("123456", "1234", "John Doe", "5000.00")
    }

    fn jane() -> Account {
        account("654321", "4321", "Jane Smith", "3000.00")
    }

    #[test]
    fn new_account_records_initial_deposit() {
        let a = john();
        assert_eq!(a.balance(), money("5000"));
        assert_eq!(a.history().len(), 1);
        assert_eq!(a.history()[0].kind(), &TransactionKind::InitialDeposit);
        assert_eq!(a.history()[0].amount(), money("5000"));
        assert_eq!(a.name(), "John Doe");
    }

    #[test]
    fn zero_initial_balance_is_recorded() {
        let a = account("1", "0000", "Empty", "0");
        assert_eq!(a.balance(), Money::ZERO);
        assert_eq!(a.history().len(), 1);
    }

    #[test]
    fn negative_initial_balance_is_rejected() {
        let err = Account::new(AccountId::new("1").unwrap(), Pin::new("0"), "X", money("-1"))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount(money("-1")));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Account::new(AccountId::new("1").unwrap(), Pin::new("0"), "  ", Money::ZERO)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn validate_pin_is_exact() {
        let a = john();
        assert!(a.validate_pin("1234"));
        assert!(!a.validate_pin("9999"));
        assert!(!a.validate_pin("12345"));
    }

    #[test]
    fn withdraw_reduces_balance_and_appends_record() {
        let mut a = john();
        a.withdraw(money("1200")).unwrap();
        assert_eq!(a.balance(), money("3800"));
        assert_eq!(a.history().len(), 2);
        assert_eq!(a.history()[1].kind(), &TransactionKind::Withdrawal);
        assert_eq!(a.history()[1].amount(), money("-1200"));
    }

    #[test]
    fn withdraw_entire_balance_is_allowed() {
        let mut a = john();
        a.withdraw(money("5000")).unwrap();
        assert_eq!(a.balance(), Money::ZERO);
    }

    #[test]
    fn overdraw_is_rejected_without_side_effects() {
        let mut a = john();
        let err = a.withdraw(money("5000.01")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                requested: money("5000.01"),
                available: money("5000"),
            }
        );
        assert_eq!(a.balance(), money("5000"));
        assert_eq!(a.history().len(), 1);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut a = john();
        assert_eq!(a.deposit(money("-5")), Err(LedgerError::InvalidAmount(money("-5"))));
        assert_eq!(a.deposit(Money::ZERO), Err(LedgerError::InvalidAmount(Money::ZERO)));
        assert_eq!(a.withdraw(Money::ZERO), Err(LedgerError::InvalidAmount(Money::ZERO)));
        assert_eq!(a.history().len(), 1);
        assert_eq!(a.balance(), money("5000"));
    }

    #[test]
    fn deposit_overflow_is_rejected() {
        let mut a = account("1", "0", "Rich", "0");
        a.deposit(Money::from_cents(i64::MAX)).unwrap();
        assert_eq!(a.deposit(Money::from_cents(1)), Err(LedgerError::Overflow));
        assert_eq!(a.history().len(), 2);
    }

    #[test]
    fn transfer_moves_funds_and_records_both_sides() {
        let mut a = john();
        let mut b = jane();
        a.withdraw(money("1200")).unwrap();

        a.transfer(&mut b, money("800")).unwrap();

        assert_eq!(a.balance(), money("3000"));
        assert_eq!(b.balance(), money("3800"));
        assert_eq!(a.history().len(), 3);
        assert_eq!(b.history().len(), 2);
        assert_eq!(
            a.history()[2].kind(),
            &TransactionKind::TransferOut {
                to: AccountId::new("654321").unwrap()
            }
        );
        assert_eq!(a.history()[2].amount(), money("-800"));
        assert_eq!(b.history()[1].kind(), &TransactionKind::Deposit);
        assert_eq!(b.history()[1].amount(), money("800"));
    }

    #[test]
    fn transfer_to_same_id_is_rejected() {
        let mut a = john();
        let mut twin = john();
        assert_eq!(
            a.transfer(&mut twin, money("10")),
            Err(LedgerError::SelfTransfer(AccountId::new("123456").unwrap()))
        );
        assert_eq!(a.balance(), money("5000"));
        assert_eq!(twin.balance(), money("5000"));
        assert_eq!(a.history().len(), 1);
        assert_eq!(twin.history().len(), 1);
    }

    #[test]
    fn failed_transfer_leaves_both_accounts_untouched() {
        let mut a = john();
        let mut b = jane();

        assert!(matches!(
            a.transfer(&mut b, money("6000")),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(a.transfer(&mut b, money("-1")), Err(LedgerError::InvalidAmount(money("-1"))));

        assert_eq!(a.balance(), money("5000"));
        assert_eq!(b.balance(), money("3000"));
        assert_eq!(a.history().len(), 1);
        assert_eq!(b.history().len(), 1);
    }

    #[test]
    fn transfer_overflow_on_recipient_does_not_debit_sender() {
        let mut a = john();
        let mut rich = account("999", "0", "Rich", "0");
        rich.deposit(Money::from_cents(i64::MAX)).unwrap();

        assert_eq!(a.transfer(&mut rich, money("1")), Err(LedgerError::Overflow));
        assert_eq!(a.balance(), money("5000"));
        assert_eq!(a.history().len(), 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn rejected_operations_log_a_warning() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut a = john();
            let mut b = jane();
            a.deposit(money("10")).unwrap();
            let _ = a.withdraw(money("99999"));
            let _ = a.deposit(Money::ZERO);
            let _ = a.transfer(&mut b, money("-1"));
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("ledger operation rejected").count(), 3);
        assert!(output.contains("WARN"));
        assert!(output.contains("operation=\"withdraw\""));
        assert!(output.contains("operation=\"deposit\""));
        assert!(output.contains("operation=\"transfer\""));
        assert!(output.contains("account=123456"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(i64),
        Withdraw(i64),
        TransferOut(i64),
        TransferIn(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-1_000i64..1_000_000).prop_map(Op::Deposit),
            (-1_000i64..1_000_000).prop_map(Op::Withdraw),
            (-1_000i64..1_000_000).prop_map(Op::TransferOut),
            (-1_000i64..1_000_000).prop_map(Op::TransferIn),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: whatever sequence of operations is attempted, balances stay
        /// non-negative, every record's sign matches its kind, history grows by
        /// exactly one per success, and the total across both accounts only
        /// changes through deposits and withdrawals.
        #[test]
        fn ledger_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut a = john();
            let mut b = jane();
            let mut expected_total = a.balance().cents() + b.balance().cents();

            for op in ops {
                let (len_a, len_b) = (a.history().len(), b.history().len());
                let result = match op {
                    Op::Deposit(c) => a.deposit(Money::from_cents(c)).map(|_| (1, 0, c)),
                    Op::Withdraw(c) => a.withdraw(Money::from_cents(c)).map(|_| (1, 0, -c)),
                    Op::TransferOut(c) => a.transfer(&mut b, Money::from_cents(c)).map(|_| (1, 1, 0)),
                    Op::TransferIn(c) => b.transfer(&mut a, Money::from_cents(c)).map(|_| (1, 1, 0)),
                };
                match result {
                    Ok((da, db, delta)) => {
                        prop_assert_eq!(a.history().len(), len_a + da);
                        prop_assert_eq!(b.history().len(), len_b + db);
                        expected_total += delta;
                    }
                    Err(_) => {
                        prop_assert_eq!(a.history().len(), len_a);
                        prop_assert_eq!(b.history().len(), len_b);
                    }
                }

                prop_assert!(!a.balance().is_negative());
                prop_assert!(!b.balance().is_negative());
                prop_assert_eq!(a.balance().cents() + b.balance().cents(), expected_total);
            }

            for record in a.history().iter().chain(b.history()) {
                prop_assert_eq!(record.kind().is_credit(), !record.amount().is_negative());
            }
        }

        /// Property: deposit followed by withdrawal of the same amount restores
        /// the balance exactly.
        #[test]
        fn deposit_then_withdraw_round_trips(cents in 1i64..10_000_000_000) {
            let mut a = john();
            let before = a.balance();
            a.deposit(Money::from_cents(cents)).unwrap();
            a.withdraw(Money::from_cents(cents)).unwrap();
            prop_assert_eq!(a.balance(), before);
            prop_assert_eq!(a.history().len(), 3);
        }
    }
}
