use thiserror::Error;

/// Failures the math core can surface.
///
/// Every variant is a caller-input problem or an arithmetic-capacity problem;
/// the functions themselves never panic on adversarial values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("reserve must be greater than zero")]
    ZeroReserve,

    #[error("rate scale must be greater than zero")]
    ZeroScale,

    #[error("slippage percent must be at most 100")]
    InvalidPercent,

    #[error("arithmetic overflow")]
    Overflow,
}
