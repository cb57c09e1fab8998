//! # Tidepool Exchange - Constant-Product Market-Maker Engine
//!
//! ## Purpose
//!
//! The pool engine behind the tidepool exchange: reserve tracking, share
//! accounting, bounded swaps, and proportional liquidity provisioning for a
//! single native-value/token pair. Every public operation is atomic and
//! serialized: it reads the pre-trade rate, validates the caller's bounds,
//! and either commits the full reserve/ledger mutation or leaves no trace.
//!
//! ## Integration Points
//!
//! - **Input Sources**: caller operations (swaps, liquidity adds/removes)
//!   with attached value and caller-supplied rate bounds
//! - **Output Destinations**: token ledger (custody transfers), native
//!   ledger (wei debits and payouts)
//! - **Math Core**: all quoting delegated to the `amm` crate; the engine
//!   owns sequencing, guards, and bookkeeping, never formulas
//! - **Concurrency**: one write-lock acquisition per mutating call
//!   reproduces serialized-ledger semantics in a multithreaded host
//!
//! ## Architecture Role
//!
//! ```text
//! Callers ──► [Guards] ──► [Rate Oracle] ──► [Swap Engine]      ──► Pool State
//!                 │              │           [Liquidity Manager] ──► Token/Native Ledgers
//!                 └── typed rejection, zero state mutation
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod guards;
pub mod pool;

pub use config::{ExchangeConfig, RateConfig, TokenConfig};
pub use engine::{Exchange, Withdrawal};
pub use error::ExchangeError;
pub use guards::RateWindow;
