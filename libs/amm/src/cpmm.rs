//! Constant-product (x·y = k) swap quoting.
//!
//! The pool keeps `k = reserve_in * reserve_out` constant across a swap:
//! depositing `amount_in` of one side releases
//! `reserve_out - k / (reserve_in + amount_in)` of the other. Division is
//! floor division over 256-bit intermediates, so the quote is exact in
//! smallest units and `k` can drift by strictly less than one divisor unit
//! per trade.

use crate::error::MathError;
use crate::types::{narrow, U256};

#[inline]
fn ensure_reserves(reserve_in: u128, reserve_out: u128) -> Result<(), MathError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(MathError::ZeroReserve);
    }
    Ok(())
}

/// The pricing invariant `reserve_in * reserve_out` in 256 bits.
pub fn invariant_k(reserve_in: u128, reserve_out: u128) -> U256 {
    U256::from(reserve_in) * U256::from(reserve_out)
}

/// Quote the output amount released for `amount_in` of the input side.
///
/// `amount_out = reserve_out - (reserve_in * reserve_out) / (reserve_in + amount_in)`
///
/// The result never exceeds `reserve_out`. An input large enough to floor
/// the kept side to zero drains the reserve exactly; callers guarding a live
/// pool reject such trades with their slippage floor.
pub fn amount_out(
    reserve_in: u128,
    reserve_out: u128,
    amount_in: u128,
) -> Result<u128, MathError> {
    ensure_reserves(reserve_in, reserve_out)?;
    if amount_in == 0 {
        return Err(MathError::ZeroAmount);
    }

    let k = invariant_k(reserve_in, reserve_out);
    let grown_in = U256::from(reserve_in) + U256::from(amount_in);

    // kept_out = floor(k / grown_in) <= reserve_out, so it fits u128
    let kept_out = (k / grown_in).as_u128();
    Ok(reserve_out - kept_out)
}

/// Quote the input amount required to release `amount_out` of the output
/// side. Inverse of [`amount_out`] up to floor rounding; used by callers that
/// target an exact output.
pub fn amount_in(
    reserve_in: u128,
    reserve_out: u128,
    amount_out: u128,
) -> Result<u128, MathError> {
    ensure_reserves(reserve_in, reserve_out)?;
    if amount_out == 0 {
        return Err(MathError::ZeroAmount);
    }
    if amount_out >= reserve_out {
        return Err(MathError::ZeroReserve);
    }

    // dx = ceil(reserve_in * dy / (reserve_out - dy))
    let numerator = U256::from(reserve_in) * U256::from(amount_out);
    let denominator = U256::from(reserve_out - amount_out);
    let one = U256::from(1u8);
    narrow((numerator + denominator - one) / denominator)
}
