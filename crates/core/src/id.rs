//! Account identifiers and credentials.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Identifier of an account (the ledger key).
///
/// Ordering is lexicographic and is the global lock order for transfers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create an identifier. The text is kept as given and compared exactly;
    /// blank ids are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, LedgerError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(LedgerError::validation("account id cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl core::borrow::Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Static PIN credential, compared by exact string equality.
///
/// Never serialized and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Pin(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_is_kept_verbatim() {
        let id = AccountId::new(" 123456 ").unwrap();
        assert_eq!(id.as_str(), " 123456 ");
        assert_ne!(id, AccountId::new("123456").unwrap());
    }

    #[test]
    fn blank_account_id_is_rejected() {
        assert!(matches!(AccountId::new("   "), Err(LedgerError::Validation(_))));
        assert!("".parse::<AccountId>().is_err());
    }

    #[test]
    fn account_id_serde_is_transparent_and_validated() {
        let id = AccountId::new("654321").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"654321\"");
        assert!(serde_json::from_str::<AccountId>("\" \"").is_err());
    }

    #[test]
    fn pin_requires_exact_match() {
        let pin = Pin::new("1234");
        assert!(pin.matches("1234"));
        assert!(!pin.matches("1234 "));
        assert!(!pin.matches("9999"));
        assert!(!pin.matches(""));
    }

    #[test]
    fn pin_debug_is_redacted() {
        assert_eq!(format!("{:?}", Pin::new("1234")), "Pin(****)");
    }
}
