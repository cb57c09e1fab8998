//! Balance bookkeeping collaborators for the tidepool exchange.
//!
//! Two ledgers, both thread-safe and per-call atomic:
//!
//! - [`TokenLedger`]: the fungible token with balances, transfers, an
//!   allowance gate for delegated pulls, and owner-gated minting with a
//!   one-way disable switch.
//! - [`NativeLedger`]: wei balances standing in for the platform's value
//!   asset, so callers' value holdings are observable in-process.
//!
//! A failed operation leaves every balance untouched; the exchange layer
//! composes these calls into larger all-or-nothing operations.

pub mod account;
pub mod error;
pub mod native;
pub mod token;

pub use account::AccountId;
pub use error::LedgerError;
pub use native::NativeLedger;
pub use token::TokenLedger;
