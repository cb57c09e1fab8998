//! Shared integer types for AMM arithmetic.

use crate::error::MathError;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products of `u128` amounts.
    pub struct U256(4);
}

/// Narrow a 256-bit intermediate back to `u128`, surfacing overflow instead
/// of truncating.
pub(crate) fn narrow(value: U256) -> Result<u128, MathError> {
    if value > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(value.as_u128())
}
