//! Pool state: reserves and liquidity-share bookkeeping.
//!
//! Mutation happens only through the engine while it holds the pool write
//! lock; this module owns the share map discipline: `total_shares` always
//! equals the sum over the map, and exhausted positions leave no entry.

use std::collections::HashMap;

use ledger::AccountId;

#[derive(Debug, Clone)]
pub(crate) struct PoolState {
    pub(crate) eth_reserve: u128,
    pub(crate) token_reserve: u128,
    pub(crate) total_shares: u128,
    shares: HashMap<AccountId, u128>,
}

impl PoolState {
    /// Seed the pool from the creator's deposit. The creator's initial share
    /// balance equals the wei side of the deposit.
    pub(crate) fn seed(eth_reserve: u128, token_reserve: u128, creator: AccountId) -> Self {
        let mut shares = HashMap::new();
        shares.insert(creator, eth_reserve);
        Self {
            eth_reserve,
            token_reserve,
            total_shares: eth_reserve,
            shares,
        }
    }

    pub(crate) fn shares_of(&self, account: AccountId) -> u128 {
        self.shares.get(&account).copied().unwrap_or(0)
    }

    pub(crate) fn credit_shares(&mut self, account: AccountId, amount: u128) {
        if amount == 0 {
            return;
        }
        *self.shares.entry(account).or_insert(0) += amount;
        self.total_shares += amount;
    }

    /// Burn shares. The caller has already validated the balance; an
    /// exhausted position is removed from the map entirely.
    pub(crate) fn debit_shares(&mut self, account: AccountId, amount: u128) {
        if amount == 0 {
            return;
        }
        if let Some(held) = self.shares.get_mut(&account) {
            *held -= amount;
            if *held == 0 {
                self.shares.remove(&account);
            }
        }
        self.total_shares -= amount;
    }

    #[cfg(test)]
    pub(crate) fn shares_sum(&self) -> u128 {
        self.shares.values().sum()
    }
}
