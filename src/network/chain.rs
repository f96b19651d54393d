//! Chain access used by the transaction sequencer

use async_trait::async_trait;
use crate::{
    errors::BotResult,
    types::{EntryFunctionPayload, GasParams, TransactionRequest, TxResult},
    wallets::Wallet,
};

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Whether `address` already holds a coin store for `coin`.
    async fn has_coin_store(&self, address: &str, coin: &str) -> BotResult<bool>;

    async fn build_transaction(
        &self,
        wallet: &Wallet,
        payload: EntryFunctionPayload,
        gas: GasParams,
    ) -> BotResult<TransactionRequest>;

    /// Dry-runs the transaction without committing it.
    async fn simulate(&self, wallet: &Wallet, request: &TransactionRequest) -> BotResult<TxResult>;

    /// Signs and submits the transaction, returning its hash.
    async fn submit(&self, wallet: &Wallet, request: &TransactionRequest) -> BotResult<String>;

    /// Blocks until the chain reports a final result for `hash`.
    async fn wait_for_transaction(&self, hash: &str) -> BotResult<TxResult>;

    /// Calls a Move view function.
    async fn view(
        &self,
        function: &str,
        type_arguments: &[String],
        arguments: &[String],
    ) -> BotResult<Vec<serde_json::Value>>;
}
