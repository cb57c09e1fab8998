//! Directional exchange rates and the bounds derived from them.
//!
//! A rate is the fixed-point price of one asset in units of the other:
//! `opposite_reserve * scale / own_reserve`. The two directions carry
//! independent scale factors: the value→token rate is quoted at 1e8 and the
//! token→value rate at 1e18. The engine treats them as separately
//! configurable constants rather than a single canonical scale.

use crate::error::MathError;
use crate::types::{narrow, U256};

/// Default fixed-point scale for the value→token rate.
pub const ETH_TO_TOKEN_SCALE: u128 = 100_000_000; // 1e8

/// Default fixed-point scale for the token→value rate.
pub const TOKEN_TO_ETH_SCALE: u128 = 1_000_000_000_000_000_000; // 1e18

/// Instantaneous exchange rate of the "own" asset quoted in the opposite
/// asset, fixed-point scaled.
pub fn exchange_rate(
    opposite_reserve: u128,
    own_reserve: u128,
    scale: u128,
) -> Result<u128, MathError> {
    if own_reserve == 0 || opposite_reserve == 0 {
        return Err(MathError::ZeroReserve);
    }
    if scale == 0 {
        return Err(MathError::ZeroScale);
    }

    let rate = U256::from(opposite_reserve) * U256::from(scale) / U256::from(own_reserve);
    narrow(rate)
}

/// Floor on the output of a swap of `amount_in`, given the pre-trade `rate`
/// (at `scale`) and the caller's tolerated slippage percentage.
///
/// `floor(amount_in * rate * (100 - pct) / (100 * scale))`
///
/// A realized output below this floor means the trade moved the price past
/// what the caller accepted.
pub fn min_output_for_slippage(
    amount_in: u128,
    rate: u128,
    scale: u128,
    max_slippage_pct: u8,
) -> Result<u128, MathError> {
    if max_slippage_pct > 100 {
        return Err(MathError::InvalidPercent);
    }
    if scale == 0 {
        return Err(MathError::ZeroScale);
    }

    let numerator = U256::from(amount_in) * U256::from(rate);
    let numerator = numerator
        .checked_mul(U256::from(100 - max_slippage_pct))
        .ok_or(MathError::Overflow)?;
    let denominator = U256::from(100u8) * U256::from(scale);
    narrow(numerator / denominator)
}

/// Floor of `amount * numerator / denominator`.
///
/// The shared primitive behind share minting, share burning, and
/// matched-deposit sizing: all three are "the same proportion of a different
/// quantity".
pub fn proportional_share(
    amount: u128,
    numerator: u128,
    denominator: u128,
) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::ZeroReserve);
    }

    let scaled = U256::from(amount) * U256::from(numerator) / U256::from(denominator);
    narrow(scaled)
}
