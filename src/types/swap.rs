//! Swap selection types

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapPair {
    pub source: String,
    pub destination: String,
}

impl SwapPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// A resolved swap, consumed right away by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapDecision {
    pub source: String,
    pub destination: String,
    pub amount: u64,
}

impl SwapDecision {
    pub fn from_pair(pair: SwapPair, amount: u64) -> Self {
        Self {
            source: pair.source,
            destination: pair.destination,
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasParams {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
}
