//! Core type definitions for the AMM engine.
//!
//! Re-exports from alloy-primitives and num-bigint so callers share one set of
//! primitive types.

use std::fmt;

pub use alloy::primitives::{Address, B256};
pub use num_bigint::BigInt;

/// EIP-155 chain identifier.
pub type ChainId = u64;

/// Liquidity permanently locked by the first deposit into a pool.
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Denominator for basis-point quantities (fees, slippage).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Which side of a trade is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    /// The input amount is exact; the output is computed.
    ExactInput,
    /// The output amount is exact; the input is computed.
    ExactOutput,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::ExactInput => write!(f, "exact-in"),
            TradeType::ExactOutput => write!(f, "exact-out"),
        }
    }
}
