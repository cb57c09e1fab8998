//! # Tidepool AMM Library - Constant-Product Mathematics Engine
//!
//! ## Purpose
//!
//! Pure mathematical core for the tidepool exchange: constant-product (x·y=k)
//! swap quoting, directional exchange-rate computation, slippage floors, and
//! proportional share arithmetic. All amounts are unsigned integers in the
//! smallest unit of their asset (wei on the value side); every intermediate
//! product runs in 256 bits so `u128` reserves can never overflow mid-quote.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve snapshots from the exchange pool state
//! - **Output Destinations**: swap engine and liquidity manager guards
//! - **Precision**: integer-exact, floor division at every boundary; the
//!   quote a caller receives is the quote the pool books
//!
//! ## Architecture Role
//!
//! Everything here is a free function over plain integers: no state, no I/O,
//! no locks. The exchange layer owns sequencing and atomicity; this crate
//! owns only the numbers.

pub mod cpmm;
pub mod error;
pub mod rate;
pub mod types;

pub use cpmm::{amount_in, amount_out, invariant_k};
pub use error::MathError;
pub use rate::{
    exchange_rate, min_output_for_slippage, proportional_share, ETH_TO_TOKEN_SCALE,
    TOKEN_TO_ETH_SCALE,
};
pub use types::U256;
