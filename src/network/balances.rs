//! Wallet balances from the Apscan indexer

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, warn};
use crate::{
    errors::{BotError, BotResult},
    types::CoinHolding,
};

#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Every coin contract the wallet holds, queried live.
    async fn wallet_coins(&self, address: &str) -> BotResult<Vec<CoinHolding>>;
}

pub struct ApscanClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ApscanAccount {
    #[serde(default)]
    all_balances: Option<Vec<ApscanBalance>>,
}

#[derive(Deserialize)]
struct ApscanBalance {
    #[serde(default)]
    move_resource_generic_type_params: Vec<String>,
    balance: serde_json::Value,
    coin_info: Option<ApscanCoinInfo>,
}

#[derive(Deserialize)]
struct ApscanCoinInfo {
    decimals: u8,
}

impl ApscanClient {
    pub fn new(base_url: &str, accept_invalid_certs: bool) -> BotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| BotError::network("Failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// The indexer stores addresses without leading zeros.
pub fn indexer_address(address: &str) -> String {
    let trimmed = address.trim_start_matches("0x").trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

fn parse_balance(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl BalanceSource for ApscanClient {
    async fn wallet_coins(&self, address: &str) -> BotResult<Vec<CoinHolding>> {
        let request_url = format!("{}/accounts", self.base_url);
        let filter = format!("eq.{}", indexer_address(address));
        let response = self
            .http
            .get(&request_url)
            .query(&[("address", filter.as_str())])
            .send()
            .await
            .map_err(|e| BotError::network(format!("Balance request for {} failed", address), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::network(format!("Balance response for {} unreadable", address), e))?;
        if !status.is_success() {
            return Err(BotError::Chain {
                endpoint: request_url,
                status: status.as_u16(),
                body,
            });
        }

        let accounts: Vec<ApscanAccount> = serde_json::from_str(&body)
            .map_err(|e| BotError::parsing(format!("balances of {}", address), e))?;
        let Some(balances) = accounts.into_iter().next().and_then(|a| a.all_balances) else {
            error!("Bad response from {}. Response {}", request_url, body);
            return Err(BotError::parsing(
                format!("balances of {}", address),
                anyhow::anyhow!("missing all_balances"),
            ));
        };

        let mut holdings = Vec::with_capacity(balances.len());
        for entry in balances {
            let Some(contract) = entry.move_resource_generic_type_params.into_iter().next() else {
                warn!("Skipping balance entry without coin type for {}", address);
                continue;
            };
            let balance = parse_balance(&entry.balance).ok_or_else(|| {
                BotError::parsing(
                    format!("balance of {} at {}", contract, address),
                    anyhow::anyhow!("unexpected balance value {}", entry.balance),
                )
            })?;
            let decimals = entry.coin_info.map(|c| c.decimals).unwrap_or(0);
            holdings.push(CoinHolding::new(contract, balance, decimals));
        }
        Ok(holdings)
    }
}
