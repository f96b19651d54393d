//! Custom error types for the bot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Insufficient funds at wallet {wallet}: {details}")]
    InsufficientFunds {
        wallet: String,
        details: String,
    },

    #[error("No pool found for {coin_x} - {coin_y}")]
    NoPoolFound {
        coin_x: String,
        coin_y: String,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Chain rejected request: {endpoint} returned {status} - {body}")]
    Chain {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration for {key}: {message}")]
    Config {
        key: String,
        message: String,
    },

    #[error("Invalid wallet at line {line}: {message}")]
    Wallet {
        line: usize,
        message: String,
    },

    #[error("Storage error at {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl BotError {
    pub fn network(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        BotError::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn parsing(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        BotError::DataParsing {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn config(key: &str, message: impl Into<String>) -> Self {
        BotError::Config {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Errors that abandon the turn as an assertion on the wallet's state
    /// rather than a transport problem.
    pub fn is_funding_error(&self) -> bool {
        matches!(self, BotError::InsufficientFunds { .. } | BotError::NoPoolFound { .. })
    }
}

pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funding_errors_are_classified() {
        let funds = BotError::InsufficientFunds {
            wallet: "0xA".to_string(),
            details: "nothing to swap".to_string(),
        };
        let pool = BotError::NoPoolFound {
            coin_x: "X".to_string(),
            coin_y: "Y".to_string(),
        };
        let net = BotError::Network { message: "down".to_string(), source: None };

        assert!(funds.is_funding_error());
        assert!(pool.is_funding_error());
        assert!(!net.is_funding_error());
        assert_eq!(funds.to_string(), "Insufficient funds at wallet 0xA: nothing to swap");
    }
}
