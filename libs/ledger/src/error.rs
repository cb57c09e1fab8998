use thiserror::Error;

/// Ledger operation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },

    #[error("caller is not the owner")]
    NotOwner,

    #[error("minting is disabled")]
    MintingDisabled,

    #[error("supply overflow")]
    SupplyOverflow,
}
