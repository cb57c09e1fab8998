//! Owner-gated fungible token ledger.
//!
//! Balances and allowances live in sharded maps so reads never block the
//! whole ledger; each mutation touches one entry at a time and checks before
//! it writes, which keeps every call atomic without a global lock.

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::account::AccountId;
use crate::error::LedgerError;

pub struct TokenLedger {
    name: String,
    symbol: String,
    owner: AccountId,
    balances: DashMap<AccountId, u128>,
    allowances: DashMap<(AccountId, AccountId), u128>,
    total_supply: RwLock<u128>,
    can_mint: AtomicBool,
}

impl TokenLedger {
    /// New empty ledger administered by `owner`. Minting starts enabled.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, owner: AccountId) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            owner,
            balances: DashMap::new(),
            allowances: DashMap::new(),
            total_supply: RwLock::new(0),
            can_mint: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn balance_of(&self, account: AccountId) -> u128 {
        self.balances.get(&account).map(|b| *b).unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        *self.total_supply.read()
    }

    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
        self.allowances
            .get(&(owner, spender))
            .map(|a| *a)
            .unwrap_or(0)
    }

    /// Mint `amount` to the caller. Owner-only, and fails permanently once
    /// minting has been disabled.
    pub fn mint(&self, caller: AccountId, amount: u128) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::NotOwner);
        }
        if !self.can_mint.load(Ordering::Acquire) {
            return Err(LedgerError::MintingDisabled);
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        {
            let mut supply = self.total_supply.write();
            *supply = supply.checked_add(amount).ok_or(LedgerError::SupplyOverflow)?;
        }
        *self.balances.entry(caller).or_insert(0) += amount;

        info!(%caller, amount, symbol = %self.symbol, "➕ minted tokens");
        Ok(())
    }

    /// One-way switch: after this call every mint fails. Owner-only.
    pub fn disable_mint(&self, caller: AccountId) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::NotOwner);
        }
        self.can_mint.store(false, Ordering::Release);
        info!(symbol = %self.symbol, "minting disabled permanently");
        Ok(())
    }

    pub fn can_mint(&self) -> bool {
        self.can_mint.load(Ordering::Acquire)
    }

    /// Grant `spender` the right to pull up to `amount` from `owner` via
    /// [`transfer_from`](Self::transfer_from). Overwrites any prior grant.
    pub fn approve(&self, owner: AccountId, spender: AccountId, amount: u128) {
        self.allowances.insert((owner, spender), amount);
        debug!(%owner, %spender, amount, "allowance set");
    }

    /// Move `amount` from `from` to `to`.
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
        *self.balances.entry(to).or_insert(0) += amount;
        debug!(%from, %to, amount, "transfer");
        Ok(())
    }

    /// Allowance-gated pull: `spender` moves `amount` of `owner`'s tokens to
    /// itself. Decrements the allowance on success; restores it if the
    /// balance debit fails, so a rejected pull has no effect.
    pub fn transfer_from(
        &self,
        owner: AccountId,
        spender: AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        {
            let mut entry = self.allowances.entry((owner, spender)).or_insert(0);
            if *entry < amount {
                return Err(LedgerError::InsufficientAllowance {
                    have: *entry,
                    need: amount,
                });
            }
            *entry -= amount;
        }

        if let Err(err) = self.debit(owner, amount) {
            *self.allowances.entry((owner, spender)).or_insert(0) += amount;
            return Err(err);
        }
        *self.balances.entry(spender).or_insert(0) += amount;
        debug!(%owner, %spender, amount, "delegated transfer");
        Ok(())
    }

    fn debit(&self, account: AccountId, amount: u128) -> Result<(), LedgerError> {
        let mut entry = self.balances.entry(account).or_insert(0);
        if *entry < amount {
            return Err(LedgerError::InsufficientBalance {
                have: *entry,
                need: amount,
            });
        }
        *entry -= amount;
        Ok(())
    }
}
