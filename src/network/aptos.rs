//! Aptos fullnode REST client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use crate::{
    errors::{BotError, BotResult},
    network::ChainClient,
    types::{COIN_STORE_RESOURCE, EntryFunctionPayload, GasParams, TransactionRequest, TxResult},
    wallets::Wallet,
};

pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const TXN_EXPIRATION_SECS: i64 = 60;
pub const POLL_INTERVAL_MS: u64 = 500;

pub struct AptosRestClient {
    http: reqwest::Client,
    base_url: String,
    tx_timeout: Duration,
    poll_interval: Duration,
}

#[derive(Serialize)]
struct SignedTransaction<'a> {
    #[serde(flatten)]
    request: &'a TransactionRequest,
    signature: Ed25519Signature,
}

#[derive(Serialize)]
struct Ed25519Signature {
    #[serde(rename = "type")]
    kind: &'static str,
    public_key: String,
    signature: String,
}

impl Ed25519Signature {
    fn new(public_key: String, signature: &[u8]) -> Self {
        Self {
            kind: "ed25519_signature",
            public_key,
            signature: format!("0x{}", hex::encode(signature)),
        }
    }
}

#[derive(Deserialize)]
struct AccountData {
    sequence_number: String,
}

#[derive(Deserialize)]
struct PendingTransaction {
    hash: String,
}

#[derive(Serialize)]
struct ViewRequest<'a> {
    function: &'a str,
    type_arguments: &'a [String],
    arguments: &'a [String],
}

impl AptosRestClient {
    pub fn new(base_url: &str, tx_timeout: Duration) -> BotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| BotError::network("Failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tx_timeout,
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_raw(&self, path: &str) -> BotResult<(StatusCode, String)> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| BotError::network(format!("GET {} failed", path), e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::network(format!("GET {} body unreadable", path), e))?;
        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BotResult<T> {
        let (status, body) = self.get_raw(path).await?;
        decode(path, status, &body)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> BotResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(payload)
            .send()
            .await
            .map_err(|e| BotError::network(format!("POST {} failed", path), e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::network(format!("POST {} body unreadable", path), e))?;
        decode(path, status, &body)
    }

    pub async fn sequence_number(&self, address: &str) -> BotResult<u64> {
        let account: AccountData = self.get_json(&format!("/accounts/{}", address)).await?;
        account
            .sequence_number
            .parse()
            .map_err(|e| BotError::parsing(format!("sequence number of {}", address), e))
    }
}

fn decode<T: DeserializeOwned>(path: &str, status: StatusCode, body: &str) -> BotResult<T> {
    if !status.is_success() {
        return Err(BotError::Chain {
            endpoint: path.to_string(),
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| BotError::parsing(format!("response of {}", path), e))
}

#[async_trait]
impl ChainClient for AptosRestClient {
    async fn has_coin_store(&self, address: &str, coin: &str) -> BotResult<bool> {
        let path = format!("/accounts/{}/resource/{}<{}>", address, COIN_STORE_RESOURCE, coin);
        let (status, body) = self.get_raw(&path).await?;
        // any answer without resource data counts as unregistered
        let registered = status.is_success()
            && serde_json::from_str::<serde_json::Value>(&body)
                .map(|v| v.get("data").is_some())
                .unwrap_or(false);
        debug!("Coin store {} for {}: {} ({})", coin, address, registered, status);
        Ok(registered)
    }

    async fn build_transaction(
        &self,
        wallet: &Wallet,
        payload: EntryFunctionPayload,
        gas: GasParams,
    ) -> BotResult<TransactionRequest> {
        let sequence_number = self.sequence_number(wallet.address()).await?;
        Ok(TransactionRequest {
            sender: wallet.address().to_string(),
            sequence_number,
            max_gas_amount: gas.max_gas_amount,
            gas_unit_price: gas.gas_unit_price,
            expiration_timestamp_secs: (Utc::now().timestamp() + TXN_EXPIRATION_SECS) as u64,
            payload,
        })
    }

    async fn simulate(&self, wallet: &Wallet, request: &TransactionRequest) -> BotResult<TxResult> {
        // simulation rejects valid signatures, so the signature is zeroed
        let body = SignedTransaction {
            request,
            signature: Ed25519Signature::new(wallet.public_key_hex(), &[0u8; 64]),
        };
        let results: Vec<TxResult> = self.post_json("/transactions/simulate", &body).await?;
        results.into_iter().next().ok_or_else(|| {
            BotError::parsing("simulation response", anyhow::anyhow!("empty result list"))
        })
    }

    async fn submit(&self, wallet: &Wallet, request: &TransactionRequest) -> BotResult<String> {
        let signing_message: String = self.post_json("/transactions/encode_submission", request).await?;
        let message = hex::decode(signing_message.trim_start_matches("0x"))
            .map_err(|e| BotError::parsing("signing message", e))?;

        let body = SignedTransaction {
            request,
            signature: Ed25519Signature::new(wallet.public_key_hex(), &wallet.sign(&message)),
        };
        let pending: PendingTransaction = self.post_json("/transactions", &body).await?;
        Ok(pending.hash)
    }

    async fn wait_for_transaction(&self, hash: &str) -> BotResult<TxResult> {
        let path = format!("/transactions/by_hash/{}", hash);
        let deadline = Instant::now() + self.tx_timeout;

        loop {
            let (status, body) = self.get_raw(&path).await?;
            if status.is_success() {
                let value: serde_json::Value = decode(&path, status, &body)?;
                if value.get("type").and_then(|t| t.as_str()) != Some("pending_transaction") {
                    return serde_json::from_value(value)
                        .map_err(|e| BotError::parsing(format!("transaction {}", hash), e));
                }
            } else if status != StatusCode::NOT_FOUND {
                return Err(BotError::Chain {
                    endpoint: path,
                    status: status.as_u16(),
                    body,
                });
            }

            if Instant::now() >= deadline {
                return Err(BotError::Network {
                    message: format!(
                        "Transaction {} not finalized after {}s",
                        hash,
                        self.tx_timeout.as_secs_f64()
                    ),
                    source: None,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn view(
        &self,
        function: &str,
        type_arguments: &[String],
        arguments: &[String],
    ) -> BotResult<Vec<serde_json::Value>> {
        let body = ViewRequest { function, type_arguments, arguments };
        self.post_json("/view", &body).await
    }
}
