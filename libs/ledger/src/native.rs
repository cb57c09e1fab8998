//! Wei balances for the native value asset.
//!
//! Stands in for the platform's own value bookkeeping so that an attached
//! value can be debited from the caller and payouts credited back, all
//! observable in-process.

use dashmap::DashMap;
use tracing::debug;

use crate::account::AccountId;
use crate::error::LedgerError;

#[derive(Default)]
pub struct NativeLedger {
    balances: DashMap<AccountId, u128>,
}

impl NativeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: AccountId) -> u128 {
        self.balances.get(&account).map(|b| *b).unwrap_or(0)
    }

    /// Add `amount` wei to `account`. Infallible; also the faucet for tests.
    pub fn credit(&self, account: AccountId, amount: u128) {
        *self.balances.entry(account).or_insert(0) += amount;
        debug!(%account, amount, "wei credited");
    }

    /// Remove `amount` wei from `account`, failing if the balance cannot
    /// cover it.
    pub fn debit(&self, account: AccountId, amount: u128) -> Result<(), LedgerError> {
        let mut entry = self.balances.entry(account).or_insert(0);
        if *entry < amount {
            return Err(LedgerError::InsufficientBalance {
                have: *entry,
                need: amount,
            });
        }
        *entry -= amount;
        drop(entry);
        debug!(%account, amount, "wei debited");
        Ok(())
    }

    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }
}
