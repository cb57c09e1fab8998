//! The exchange engine: swap execution and liquidity management over a
//! single constant-product pool.
//!
//! Concurrency model: the pool sits behind one `RwLock`; every mutating
//! operation holds the write lock for its full duration, so calls from any
//! number of threads serialize into a total order and each one prices
//! against the reserves as of its own position in that order. Ledger debits
//! run before any reserve mutation and payouts cannot fail, which makes
//! every operation all-or-nothing; the single fallible step that follows a
//! debit is explicitly rolled back.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use ledger::{AccountId, NativeLedger, TokenLedger};

use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::guards::{ensure_nonzero, RateWindow};
use crate::pool::PoolState;

/// Payout of a liquidity removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub value_out: u128,
    pub tokens_out: u128,
    pub shares_burned: u128,
}

pub struct Exchange {
    config: ExchangeConfig,
    /// Custody account holding the pool's token reserve on the token ledger.
    account: AccountId,
    token: Arc<TokenLedger>,
    native: Arc<NativeLedger>,
    pool: RwLock<Option<PoolState>>,
}

impl Exchange {
    /// Wire an engine onto existing ledgers. `account` is the custody
    /// identity the engine pulls tokens into and pays them out of; callers
    /// must `approve` it before depositing.
    pub fn new(
        config: ExchangeConfig,
        token: Arc<TokenLedger>,
        native: Arc<NativeLedger>,
        account: AccountId,
    ) -> Self {
        Self {
            config,
            account,
            token,
            native,
            pool: RwLock::new(None),
        }
    }

    /// Build the engine together with fresh ledgers: a token ledger carrying
    /// the configured metadata and administered by `owner`, and an empty
    /// native ledger.
    pub fn bootstrap(
        config: ExchangeConfig,
        owner: AccountId,
        account: AccountId,
    ) -> (Self, Arc<TokenLedger>, Arc<NativeLedger>) {
        let token = Arc::new(TokenLedger::new(
            config.token.name.clone(),
            config.token.symbol.clone(),
            owner,
        ));
        let native = Arc::new(NativeLedger::new());
        let exchange = Self::new(config, Arc::clone(&token), Arc::clone(&native), account);
        (exchange, token, native)
    }

    pub fn custody_account(&self) -> AccountId {
        self.account
    }

    pub fn token_ledger(&self) -> &Arc<TokenLedger> {
        &self.token
    }

    pub fn native_ledger(&self) -> &Arc<NativeLedger> {
        &self.native
    }

    /// Seed the pool from the creator's deposit. First call only; the
    /// attached value and token amount become the opening reserves and the
    /// creator receives the initial share balance.
    pub fn create_pool(
        &self,
        caller: AccountId,
        value_in: u128,
        token_amount: u128,
    ) -> Result<(), ExchangeError> {
        let mut pool = self.pool.write();
        if pool.is_some() {
            return Err(ExchangeError::PoolAlreadyCreated);
        }
        if value_in == 0 || token_amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }

        self.native.debit(caller, value_in)?;
        if let Err(err) = self.token.transfer_from(caller, self.account, token_amount) {
            self.native.credit(caller, value_in);
            return Err(err.into());
        }

        *pool = Some(PoolState::seed(value_in, token_amount, caller));
        info!(
            %caller,
            eth_reserve = value_in,
            token_reserve = token_amount,
            "🏊 pool created"
        );
        Ok(())
    }

    /// Swap attached value for tokens at the constant-product quote,
    /// rejecting execution worse than `max_slippage_pct` off the pre-trade
    /// rate. Returns the tokens paid out.
    pub fn swap_eth_for_tokens(
        &self,
        caller: AccountId,
        value_in: u128,
        max_slippage_pct: u8,
    ) -> Result<u128, ExchangeError> {
        let mut pool = self.pool.write();
        let state = pool.as_mut().ok_or(ExchangeError::PoolNotCreated)?;

        ensure_nonzero(value_in)?;
        if max_slippage_pct > 100 {
            return Err(ExchangeError::InvalidSlippagePercent);
        }

        let scale = self.config.rates.eth_to_token_scale;
        let rate = amm::exchange_rate(state.token_reserve, state.eth_reserve, scale)?;
        let tokens_out = amm::amount_out(state.eth_reserve, state.token_reserve, value_in)?;
        let floor = amm::min_output_for_slippage(value_in, rate, scale, max_slippage_pct)?;
        // a swap may thin the token side but never empty it
        if tokens_out >= state.token_reserve || tokens_out < floor {
            return Err(ExchangeError::InsufficientReserve);
        }

        let new_eth = state
            .eth_reserve
            .checked_add(value_in)
            .ok_or(amm::MathError::Overflow)?;
        let new_token = state.token_reserve - tokens_out;

        self.native.debit(caller, value_in)?;
        if tokens_out > 0 {
            if let Err(err) = self.token.transfer(self.account, caller, tokens_out) {
                self.native.credit(caller, value_in);
                return Err(err.into());
            }
        }

        state.eth_reserve = new_eth;
        state.token_reserve = new_token;
        info!(%caller, value_in, tokens_out, "🔄 swapped value for tokens");
        Ok(tokens_out)
    }

    /// Swap tokens for value. `max_rate` is the caller's single-sided bound
    /// on the token→value rate: a bound above the live pre-trade rate means
    /// the price has moved against the caller since submission, and the
    /// trade is rejected. Returns the wei paid out.
    pub fn swap_tokens_for_eth(
        &self,
        caller: AccountId,
        amount_tokens: u128,
        max_rate: u128,
    ) -> Result<u128, ExchangeError> {
        let mut pool = self.pool.write();
        let state = pool.as_mut().ok_or(ExchangeError::PoolNotCreated)?;

        ensure_nonzero(amount_tokens)?;

        let have = self.token.balance_of(caller);
        if have < amount_tokens {
            return Err(ExchangeError::InsufficientBalance {
                have,
                need: amount_tokens,
            });
        }

        let rate = amm::exchange_rate(
            state.eth_reserve,
            state.token_reserve,
            self.config.rates.token_to_eth_scale,
        )?;
        if max_rate > rate {
            return Err(ExchangeError::RateBoundViolated {
                bound: max_rate,
                rate,
            });
        }

        let value_out = amm::amount_out(state.token_reserve, state.eth_reserve, amount_tokens)?;
        // a swap may thin the value side but never empty it
        if value_out >= state.eth_reserve {
            return Err(ExchangeError::InsufficientReserve);
        }

        let new_token = state
            .token_reserve
            .checked_add(amount_tokens)
            .ok_or(amm::MathError::Overflow)?;
        let new_eth = state.eth_reserve - value_out;

        self.token.transfer_from(caller, self.account, amount_tokens)?;
        if value_out > 0 {
            self.native.credit(caller, value_out);
        }

        state.token_reserve = new_token;
        state.eth_reserve = new_eth;
        info!(%caller, amount_tokens, value_out, "🔄 swapped tokens for value");
        Ok(value_out)
    }

    /// Deposit attached value plus the ratio-matched token amount, minting
    /// shares proportional to the value side. Returns the shares minted.
    pub fn add_liquidity(
        &self,
        caller: AccountId,
        value_in: u128,
        window: RateWindow,
    ) -> Result<u128, ExchangeError> {
        let mut pool = self.pool.write();
        let state = pool.as_mut().ok_or(ExchangeError::PoolNotCreated)?;

        if value_in == 0 {
            return Err(ExchangeError::NoValueSent);
        }

        let rate = amm::exchange_rate(
            state.token_reserve,
            state.eth_reserve,
            self.config.rates.eth_to_token_scale,
        )?;
        window.ensure_accepts(rate)?;

        let tokens_required =
            amm::proportional_share(value_in, state.token_reserve, state.eth_reserve)?;
        let have = self.token.balance_of(caller);
        if have < tokens_required {
            return Err(ExchangeError::InsufficientBalance {
                have,
                need: tokens_required,
            });
        }

        let minted = amm::proportional_share(value_in, state.total_shares, state.eth_reserve)?;
        let new_eth = state
            .eth_reserve
            .checked_add(value_in)
            .ok_or(amm::MathError::Overflow)?;
        let new_token = state
            .token_reserve
            .checked_add(tokens_required)
            .ok_or(amm::MathError::Overflow)?;
        state
            .total_shares
            .checked_add(minted)
            .ok_or(amm::MathError::Overflow)?;

        self.native.debit(caller, value_in)?;
        if tokens_required > 0 {
            if let Err(err) = self
                .token
                .transfer_from(caller, self.account, tokens_required)
            {
                self.native.credit(caller, value_in);
                return Err(err.into());
            }
        }

        state.eth_reserve = new_eth;
        state.token_reserve = new_token;
        state.credit_shares(caller, minted);
        info!(%caller, value_in, tokens_required, minted, "➕ liquidity added");
        Ok(minted)
    }

    /// Withdraw `value_out` wei plus the proportional token amount, burning
    /// the backing shares.
    pub fn remove_liquidity(
        &self,
        caller: AccountId,
        value_out: u128,
        window: RateWindow,
    ) -> Result<Withdrawal, ExchangeError> {
        let mut pool = self.pool.write();
        let state = pool.as_mut().ok_or(ExchangeError::PoolNotCreated)?;

        let rate = amm::exchange_rate(
            state.token_reserve,
            state.eth_reserve,
            self.config.rates.eth_to_token_scale,
        )?;
        window.ensure_accepts(rate)?;

        let to_burn = amm::proportional_share(value_out, state.total_shares, state.eth_reserve)?;
        let held = state.shares_of(caller);
        if held < to_burn {
            return Err(ExchangeError::InsufficientLiquidity {
                held,
                required: to_burn,
            });
        }
        ensure_nonzero(value_out)?;
        // Coarse share granularity can floor `to_burn` under the caller's
        // holding while the wei request still exceeds the reserve.
        if value_out > state.eth_reserve {
            return Err(ExchangeError::InsufficientReserve);
        }

        let tokens_out =
            amm::proportional_share(value_out, state.token_reserve, state.eth_reserve)?;

        self.pay_out(state, caller, value_out, tokens_out, to_burn)
    }

    /// Withdraw the caller's entire position.
    pub fn remove_all_liquidity(
        &self,
        caller: AccountId,
        window: RateWindow,
    ) -> Result<Withdrawal, ExchangeError> {
        let mut pool = self.pool.write();
        let state = pool.as_mut().ok_or(ExchangeError::PoolNotCreated)?;

        let rate = amm::exchange_rate(
            state.token_reserve,
            state.eth_reserve,
            self.config.rates.eth_to_token_scale,
        )?;
        window.ensure_accepts(rate)?;

        let held = state.shares_of(caller);
        if held == 0 {
            return Err(ExchangeError::InsufficientLiquidity {
                held: 0,
                required: 1,
            });
        }

        let value_out = amm::proportional_share(held, state.eth_reserve, state.total_shares)?;
        let tokens_out = amm::proportional_share(held, state.token_reserve, state.total_shares)?;

        self.pay_out(state, caller, value_out, tokens_out, held)
    }

    /// Commit a liquidity removal: token payout first (the only fallible
    /// step), then the infallible wei credit, then the reserve and share
    /// bookkeeping.
    fn pay_out(
        &self,
        state: &mut PoolState,
        caller: AccountId,
        value_out: u128,
        tokens_out: u128,
        shares_burned: u128,
    ) -> Result<Withdrawal, ExchangeError> {
        if tokens_out > 0 {
            self.token.transfer(self.account, caller, tokens_out)?;
        }
        if value_out > 0 {
            self.native.credit(caller, value_out);
        }

        state.eth_reserve -= value_out;
        state.token_reserve -= tokens_out;
        state.debit_shares(caller, shares_burned);
        info!(%caller, value_out, tokens_out, shares_burned, "➖ liquidity removed");
        Ok(Withdrawal {
            value_out,
            tokens_out,
            shares_burned,
        })
    }

    /// Value→token rate over the current reserves, scaled by
    /// `eth_to_token_scale`.
    pub fn exchange_rate_for_eth(&self) -> Result<u128, ExchangeError> {
        let pool = self.pool.read();
        let state = pool.as_ref().ok_or(ExchangeError::PoolNotCreated)?;
        Ok(amm::exchange_rate(
            state.token_reserve,
            state.eth_reserve,
            self.config.rates.eth_to_token_scale,
        )?)
    }

    /// Token→value rate over the current reserves, scaled by
    /// `token_to_eth_scale`.
    pub fn exchange_rate_for_token(&self) -> Result<u128, ExchangeError> {
        let pool = self.pool.read();
        let state = pool.as_ref().ok_or(ExchangeError::PoolNotCreated)?;
        Ok(amm::exchange_rate(
            state.eth_reserve,
            state.token_reserve,
            self.config.rates.token_to_eth_scale,
        )?)
    }

    /// Current `(eth_reserve, token_reserve)`.
    pub fn reserves(&self) -> Result<(u128, u128), ExchangeError> {
        let pool = self.pool.read();
        let state = pool.as_ref().ok_or(ExchangeError::PoolNotCreated)?;
        Ok((state.eth_reserve, state.token_reserve))
    }

    /// Total outstanding liquidity shares; zero before pool creation.
    pub fn total_shares(&self) -> u128 {
        self.pool
            .read()
            .as_ref()
            .map(|state| state.total_shares)
            .unwrap_or(0)
    }

    /// `account`'s share balance; zero before pool creation or without a
    /// position.
    pub fn shares_of(&self, account: AccountId) -> u128 {
        self.pool
            .read()
            .as_ref()
            .map(|state| state.shares_of(account))
            .unwrap_or(0)
    }
}
