//! Wallet balance types

use serde::Serialize;
use super::APTOS_COIN_CONTRACT;

/// One coin a wallet holds, as reported by the balance indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinHolding {
    pub contract: String,
    /// Balance in the coin's smallest unit.
    pub balance: u64,
    pub decimals: u8,
}

impl CoinHolding {
    pub fn new(contract: impl Into<String>, balance: u64, decimals: u8) -> Self {
        Self {
            contract: contract.into(),
            balance,
            decimals,
        }
    }

    pub fn is_native(&self) -> bool {
        self.contract == APTOS_COIN_CONTRACT
    }

    pub fn is_funded(&self) -> bool {
        self.balance > 0
    }
}

pub fn balance_of(holdings: &[CoinHolding], contract: &str) -> Option<u64> {
    holdings
        .iter()
        .find(|h| h.contract == contract)
        .map(|h| h.balance)
}

/// Native balance of a wallet; a wallet the indexer reports without an
/// AptosCoin entry holds zero.
pub fn native_balance(holdings: &[CoinHolding]) -> u64 {
    balance_of(holdings, APTOS_COIN_CONTRACT).unwrap_or(0)
}
