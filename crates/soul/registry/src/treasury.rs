use soul_types::Amount;

use crate::error::{ArgumentError, RegistryError};

/// Collected registration fees, in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Treasury {
    balance: Amount,
}

impl Treasury {
    pub fn new(balance: Amount) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Credit `amount`. Returns the new balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<Amount, RegistryError> {
        if amount == Amount::ZERO {
            return Err(ArgumentError::ZeroAmount { field: "amount" }.into());
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ArgumentError::Overflow { field: "amount" })?;
        Ok(self.balance)
    }

    /// Debit `amount`. Returns the new balance.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount, RegistryError> {
        if amount == Amount::ZERO {
            return Err(ArgumentError::ZeroAmount { field: "amount" }.into());
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(RegistryError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            })?;
        Ok(self.balance)
    }
}
