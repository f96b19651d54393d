//! Transaction request, result and log types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use super::GasParams;

/// Entry function call in the JSON shape the Aptos REST API accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "entry_function_payload")]
pub struct EntryFunctionPayload {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

impl EntryFunctionPayload {
    pub fn new(function: impl Into<String>, type_arguments: Vec<String>, arguments: Vec<u64>) -> Self {
        Self {
            function: function.into(),
            type_arguments,
            // u64 move arguments travel as decimal strings
            arguments: arguments
                .into_iter()
                .map(|a| serde_json::Value::String(a.to_string()))
                .collect(),
        }
    }
}

/// Unsigned user transaction, ready to be simulated or signed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    pub sender: String,
    #[serde(serialize_with = "u64_as_string")]
    pub sequence_number: u64,
    #[serde(serialize_with = "u64_as_string")]
    pub max_gas_amount: u64,
    #[serde(serialize_with = "u64_as_string")]
    pub gas_unit_price: u64,
    #[serde(serialize_with = "u64_as_string")]
    pub expiration_timestamp_secs: u64,
    pub payload: EntryFunctionPayload,
}

/// Outcome reported by the chain for a simulated or committed transaction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TxResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub vm_status: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub max_gas_amount: String,
    #[serde(default)]
    pub gas_unit_price: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Microseconds since the unix epoch, as a decimal string.
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxKind {
    #[serde(rename = "simulation")]
    Simulation,
    #[serde(rename = "on-chain")]
    OnChain,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Simulation => write!(f, "simulation"),
            TxKind::OnChain => write!(f, "on-chain"),
        }
    }
}

/// One row of the execution report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxLogEntry {
    #[serde(rename = "Wallet Address")]
    pub wallet_address: String,
    #[serde(rename = "Tx time")]
    pub time: String,
    #[serde(rename = "Tx status")]
    pub tx_status: TxStatus,
    #[serde(rename = "Tx type")]
    pub tx_type: TxKind,
    #[serde(rename = "Vm status")]
    pub vm_status: String,
    #[serde(rename = "Tx hash")]
    pub hash: String,
    #[serde(rename = "Gas used")]
    pub gas_used: String,
    #[serde(rename = "Max gas")]
    pub max_gas: String,
    #[serde(rename = "Gas price")]
    pub gas_price: String,
    #[serde(rename = "Tx payload args")]
    pub payload_args: String,
    #[serde(rename = "Error message")]
    pub error: Option<String>,
}

impl TxLogEntry {
    pub fn from_result(wallet_address: &str, result: &TxResult, kind: TxKind) -> Self {
        Self {
            wallet_address: wallet_address.to_string(),
            time: format_chain_timestamp(&result.timestamp),
            tx_status: if result.success { TxStatus::Success } else { TxStatus::Failure },
            tx_type: kind,
            vm_status: result.vm_status.clone(),
            hash: result.hash.clone(),
            gas_used: result.gas_used.clone(),
            max_gas: result.max_gas_amount.clone(),
            gas_price: result.gas_unit_price.clone(),
            payload_args: result.payload.to_string(),
            error: None,
        }
    }

    /// Entry for a call that never got a chain-reported result.
    pub fn from_error(
        wallet_address: &str,
        payload: &EntryFunctionPayload,
        gas: GasParams,
        kind: TxKind,
        error: &str,
    ) -> Self {
        Self {
            wallet_address: wallet_address.to_string(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            tx_status: TxStatus::Failure,
            tx_type: kind,
            vm_status: String::new(),
            hash: String::new(),
            gas_used: String::new(),
            max_gas: gas.max_gas_amount.to_string(),
            gas_price: gas.gas_unit_price.to_string(),
            payload_args: serde_json::to_string(payload).unwrap_or_default(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.tx_status == TxStatus::Success
    }
}

/// Chain timestamps are microseconds; the report uses RFC 3339 with
/// millisecond precision in UTC.
pub fn format_chain_timestamp(micros: &str) -> String {
    micros
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn u64_as_string<S: serde::Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}
