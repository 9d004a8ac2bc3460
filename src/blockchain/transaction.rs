use serde::{Deserialize, Serialize};

use std::fmt;

/// Represents a single transfer recorded in a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's identifier (absent for the genesis placeholder)
    pub(super) from: Option<String>,

    /// Recipient's identifier (absent for the genesis placeholder)
    pub(super) to: Option<String>,

    /// Amount being transferred
    pub(super) amount: i64,
}

impl Transaction {
    /// Creates a new transaction
    ///
    /// # Arguments
    ///
    /// * `from` - The sender's identifier
    /// * `to` - The recipient's identifier
    /// * `amount` - The amount to transfer
    ///
    /// # Returns
    ///
    /// A new Transaction instance
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: i64) -> Self {
        Transaction {
            from: Some(from.into()),
            to: Some(to.into()),
            amount,
        }
    }

    /// Creates the placeholder transaction carried by the genesis block
    pub fn genesis() -> Self {
        Transaction {
            from: None,
            to: None,
            amount: 0,
        }
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Signed effect of this transaction on `address`'s balance
    ///
    /// Returns `None` if the effect does not fit in an `i64`.
    pub fn balance_delta(&self, address: &str) -> Option<i64> {
        let mut delta = 0i64;
        if self.to.as_deref() == Some(address) {
            delta = delta.checked_add(self.amount)?;
        }
        if self.from.as_deref() == Some(address) {
            delta = delta.checked_sub(self.amount)?;
        }
        Some(delta)
    }
}

/// The textual form is part of the block hash input and must stay byte-for-byte stable.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction [from={}, to={}, amount={}]",
            self.from.as_deref().unwrap_or("null"),
            self.to.as_deref().unwrap_or("null"),
            self.amount
        )
    }
}
