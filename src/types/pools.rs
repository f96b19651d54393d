//! Pool-related types and structures

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    Stable,
    Unstable,
}

/// Liquidswap contract generation a pool lives in. Serialized as the
/// number the pool directory uses (`0` or `0.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ContractVersion {
    V0,
    V05,
}

impl TryFrom<f64> for ContractVersion {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(ContractVersion::V0)
        } else if value == 0.5 {
            Ok(ContractVersion::V05)
        } else {
            Err(format!("unsupported Liquidswap contract version {}", value))
        }
    }
}

impl From<ContractVersion> for f64 {
    fn from(version: ContractVersion) -> f64 {
        match version {
            ContractVersion::V0 => 0.0,
            ContractVersion::V05 => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub coin_x: String,
    pub coin_y: String,
    pub curve: CurveType,
    pub contract: ContractVersion,
    pub network_id: u32,
}

impl Pool {
    pub fn coins(&self) -> [&str; 2] {
        [self.coin_x.as_str(), self.coin_y.as_str()]
    }

    pub fn contains(&self, coin: &str) -> bool {
        self.coin_x == coin || self.coin_y == coin
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({:?}, v{})",
            self.coin_x,
            self.coin_y,
            self.curve,
            f64::from(self.contract)
        )
    }
}
