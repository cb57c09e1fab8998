use amm::MathError;
use ledger::LedgerError;
use thiserror::Error;

/// Exchange operation failures.
///
/// Each guard maps to its own variant so a rejected caller can tell exactly
/// which precondition failed and resubmit with fresh parameters. Every
/// failure aborts the whole call with no state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("pool has already been created")]
    PoolAlreadyCreated,

    #[error("pool has not been created")]
    PoolNotCreated,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("attached value required to add liquidity")]
    NoValueSent,

    #[error("slippage percent must be at most 100")]
    InvalidSlippagePercent,

    #[error("insufficient token balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },

    #[error("insufficient liquidity: holding {held} shares, need {required}")]
    InsufficientLiquidity { held: u128, required: u128 },

    #[error("pool reserve cannot cover the requested trade")]
    InsufficientReserve,

    #[error("max rate bound must be greater than min rate bound")]
    InvalidBoundOrdering,

    #[error("current rate {rate} is below the accepted minimum {min}")]
    RateTooLow { rate: u128, min: u128 },

    #[error("current rate {rate} is above the accepted maximum {max}")]
    RateTooHigh { rate: u128, max: u128 },

    #[error("rate bound {bound} exceeds the current rate {rate}")]
    RateBoundViolated { bound: u128, rate: u128 },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
