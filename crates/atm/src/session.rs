//! Line-oriented teller menu.
//!
//! The session only talks to the ledger through its public operations and
//! renders the outcome. End of input ends the session.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{info, warn};

use teller_core::{LedgerError, Money};
use teller_ledger::{Ledger, SharedAccount};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal io: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MenuChoice {
    History,
    Withdraw,
    Deposit,
    Transfer,
    Quit,
}

impl MenuChoice {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::History),
            2 => Some(MenuChoice::Withdraw),
            3 => Some(MenuChoice::Deposit),
            4 => Some(MenuChoice::Transfer),
            5 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

pub struct Session<'a, R, W> {
    ledger: &'a Ledger,
    input: R,
    output: W,
    current: Option<SharedAccount>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(ledger: &'a Ledger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
            current: None,
        }
    }

    /// Drive the menu until input runs out.
    pub fn run(&mut self) -> SessionResult<()> {
        writeln!(self.output, "\n===== Welcome to the ATM System =====\n")?;

        loop {
            let account = match self.current.clone() {
                Some(account) => account,
                None => match self.login()? {
                    Some(account) => account,
                    None if self.at_eof()? => return Ok(()),
                    None => continue,
                },
            };

            self.display_menu()?;
            let Some(line) = self.prompt("\nEnter your choice (1-5): ")? else {
                return Ok(());
            };

            let step = match MenuChoice::parse(&line) {
                Some(MenuChoice::History) => self.show_history(&account)?,
                Some(MenuChoice::Withdraw) => self.withdraw(&account)?,
                Some(MenuChoice::Deposit) => self.deposit(&account)?,
                Some(MenuChoice::Transfer) => self.transfer(&account)?,
                Some(MenuChoice::Quit) => self.logout(&account)?,
                None => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Step::Continue
                }
            };
            if step == Step::Exit {
                return Ok(());
            }

            writeln!(self.output, "\nPress Enter to continue...")?;
            if self.read_line()?.is_none() {
                return Ok(());
            }
        }
    }

    /// Returns the authenticated account, or `None` on failure or end of input.
    fn login(&mut self) -> SessionResult<Option<SharedAccount>> {
        let Some(user_id) = self.prompt("Enter User ID: ")? else {
            return Ok(None);
        };
        let Some(pin) = self.prompt("Enter PIN: ")? else {
            return Ok(None);
        };
        // Both credentials are compared exactly as typed.
        let account = if self.ledger.authenticate(&user_id, &pin) {
            self.ledger.get_account(&user_id)
        } else {
            None
        };

        match account {
            Some(account) => {
                info!(account = %account.id(), "session login");
                writeln!(
                    self.output,
                    "\nLogin successful! Welcome, {}!",
                    account.name()
                )?;
                self.current = Some(account.clone());
                Ok(Some(account))
            }
            None => {
                warn!(account = %user_id, "session login rejected");
                writeln!(self.output, "\nInvalid User ID or PIN. Please try again.")?;
                Ok(None)
            }
        }
    }

    fn display_menu(&mut self) -> SessionResult<()> {
        writeln!(self.output, "\n===== ATM Menu =====")?;
        writeln!(self.output, "1. Transaction History")?;
        writeln!(self.output, "2. Withdraw")?;
        writeln!(self.output, "3. Deposit")?;
        writeln!(self.output, "4. Transfer")?;
        writeln!(self.output, "5. Quit")?;
        Ok(())
    }

    fn show_history(&mut self, account: &SharedAccount) -> SessionResult<Step> {
        writeln!(self.output, "\n===== Transaction History =====")?;
        let history = account.history()?;
        if history.is_empty() {
            writeln!(self.output, "No transactions found.")?;
        } else {
            writeln!(self.output, "Date & Time | Type | Amount")?;
            writeln!(self.output, "--------------------------------")?;
            for record in &history {
                writeln!(self.output, "{record}")?;
            }
        }
        writeln!(self.output, "\nCurrent Balance: ${}", account.balance()?)?;
        Ok(Step::Continue)
    }

    fn withdraw(&mut self, account: &SharedAccount) -> SessionResult<Step> {
        writeln!(self.output, "\n===== Withdraw Money =====")?;
        writeln!(self.output, "Current Balance: ${}", account.balance()?)?;
        let Some(line) = self.prompt("Enter amount to withdraw: $")? else {
            return Ok(Step::Exit);
        };
        let Some(amount) = self.parse_amount(&line)? else {
            return Ok(Step::Continue);
        };

        let outcome = account.withdraw(amount);
        self.report(account, outcome, "Withdrawal successful!")?;
        Ok(Step::Continue)
    }

    fn deposit(&mut self, account: &SharedAccount) -> SessionResult<Step> {
        writeln!(self.output, "\n===== Deposit Money =====")?;
        writeln!(self.output, "Current Balance: ${}", account.balance()?)?;
        let Some(line) = self.prompt("Enter amount to deposit: $")? else {
            return Ok(Step::Exit);
        };
        let Some(amount) = self.parse_amount(&line)? else {
            return Ok(Step::Continue);
        };

        let outcome = account.deposit(amount);
        self.report(account, outcome, "Deposit successful!")?;
        Ok(Step::Continue)
    }

    fn transfer(&mut self, account: &SharedAccount) -> SessionResult<Step> {
        writeln!(self.output, "\n===== Transfer Money =====")?;
        writeln!(self.output, "Current Balance: ${}", account.balance()?)?;
        let Some(recipient_id) = self.prompt("Enter recipient's User ID: ")? else {
            return Ok(Step::Exit);
        };

        let Some(recipient) = self.ledger.get_account(&recipient_id) else {
            writeln!(self.output, "Recipient not found.")?;
            return Ok(Step::Continue);
        };
        if recipient.id() == account.id() {
            writeln!(self.output, "Cannot transfer to your own account.")?;
            return Ok(Step::Continue);
        }

        let Some(line) = self.prompt("Enter amount to transfer: $")? else {
            return Ok(Step::Exit);
        };
        let Some(amount) = self.parse_amount(&line)? else {
            return Ok(Step::Continue);
        };

        let outcome = account.transfer(&recipient, amount);
        self.report(account, outcome, "Transfer successful!")?;
        Ok(Step::Continue)
    }

    fn logout(&mut self, account: &SharedAccount) -> SessionResult<Step> {
        info!(account = %account.id(), "session logout");
        writeln!(
            self.output,
            "\nThank you for using the ATM, {}!",
            account.name()
        )?;
        self.current = None;
        writeln!(self.output, "You have been logged out.")?;
        Ok(Step::Continue)
    }

    /// Print the result of a mutation. Business rejections are rendered;
    /// anything else (e.g. a poisoned lock) aborts the session.
    fn report(
        &mut self,
        account: &SharedAccount,
        outcome: Result<(), LedgerError>,
        success: &str,
    ) -> SessionResult<()> {
        match outcome {
            Ok(()) => {
                writeln!(self.output, "{success}")?;
                writeln!(self.output, "New Balance: ${}", account.balance()?)?;
            }
            Err(
                e @ (LedgerError::InsufficientFunds { .. }
                | LedgerError::InvalidAmount(_)
                | LedgerError::SelfTransfer(_)),
            ) => {
                info!(account = %account.id(), error = %e, "operation rejected");
                writeln!(self.output, "Insufficient funds or invalid amount.")?;
            }
            Err(LedgerError::Overflow) => {
                info!(account = %account.id(), "operation rejected: overflow");
                writeln!(self.output, "Transaction failed: amount too large.")?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// `None` after printing why the amount was not accepted.
    fn parse_amount(&mut self, line: &str) -> SessionResult<Option<Money>> {
        match line.parse::<Money>() {
            Ok(amount) if amount.is_positive() => Ok(Some(amount)),
            Ok(_) => {
                writeln!(self.output, "Amount must be positive.")?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.output, "Invalid amount format.")?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, text: &str) -> SessionResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// One line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> SessionResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn at_eof(&mut self) -> SessionResult<bool> {
        Ok(self.input.fill_buf()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choice_parsing() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::History));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("two"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }
}
