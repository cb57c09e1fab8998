//! Shared fixtures for the end-to-end exchange scenarios.

use std::sync::Arc;

use exchange::{Exchange, ExchangeConfig};
use ledger::{AccountId, NativeLedger, TokenLedger};

pub const WEI_PER_UNIT: u128 = 1_000_000_000_000_000_000;

/// A funded exchange deployment: engine, ledgers, and a cast of accounts.
pub struct TestBench {
    pub exchange: Arc<Exchange>,
    pub token: Arc<TokenLedger>,
    pub native: Arc<NativeLedger>,
    pub owner: AccountId,
    pub users: Vec<AccountId>,
}

impl TestBench {
    /// Bootstrap an exchange, mint the owner a supply, fund `user_count`
    /// accounts with wei and tokens, and pre-approve the custody account
    /// for everyone.
    pub fn new(user_count: usize) -> Self {
        init_tracing();

        let owner = AccountId::from_low_u64(1);
        let custody = AccountId::from_low_u64(0xE0);
        let (exchange, token, native) =
            Exchange::bootstrap(ExchangeConfig::default(), owner, custody);
        let exchange = Arc::new(exchange);

        token.mint(owner, 2_000 * WEI_PER_UNIT).unwrap();
        native.credit(owner, 2_000 * WEI_PER_UNIT);
        token.approve(owner, custody, u128::MAX);

        let users: Vec<AccountId> = (0..user_count)
            .map(|i| AccountId::from_low_u64(100 + i as u64))
            .collect();
        for &user in &users {
            native.credit(user, 100 * WEI_PER_UNIT);
            token.transfer(owner, user, 10 * WEI_PER_UNIT).unwrap();
            token.approve(user, custody, u128::MAX);
        }

        tracing::info!(user_count, "test bench funded");
        Self {
            exchange,
            token,
            native,
            owner,
            users,
        }
    }

    /// Bench with a pool already seeded 1:1 at `reserve` on both sides.
    pub fn with_pool(user_count: usize, reserve: u128) -> Self {
        let bench = Self::new(user_count);
        bench
            .exchange
            .create_pool(bench.owner, reserve, reserve)
            .unwrap();
        bench
    }

    /// Sum of all known share positions, for checking against
    /// `total_shares`.
    pub fn shares_sum(&self) -> u128 {
        let mut sum = self.exchange.shares_of(self.owner);
        for &user in &self.users {
            sum += self.exchange.shares_of(user);
        }
        sum
    }
}

/// Install a subscriber once for the whole test binary; RUST_LOG filters.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
