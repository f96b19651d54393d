//! Signing wallets loaded from the secret file

use ed25519_dalek::{Signer, SigningKey};
use sha3::{Digest, Sha3_256};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};
use crate::errors::{BotError, BotResult};
use super::{APTOS_DERIVATION_PATH, derive_private_key};

/// Authentication-key scheme byte for single ed25519 keys.
const ED25519_SCHEME: u8 = 0x00;

#[derive(Clone)]
pub struct Wallet {
    address: String,
    signing_key: SigningKey,
}

impl Wallet {
    pub fn from_private_key(bytes: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&bytes);
        let address = derive_address(&signing_key);
        Self { address, signing_key }
    }

    pub fn from_hex(hex_key: &str) -> anyhow::Result<Self> {
        let raw = hex::decode(hex_key.trim().trim_start_matches("0x"))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|v: Vec<u8>| anyhow::anyhow!("expected 32 key bytes, got {}", v.len()))?;
        Ok(Self::from_private_key(bytes))
    }

    pub fn from_phrase(phrase: &str) -> anyhow::Result<Self> {
        Ok(Self::from_private_key(derive_private_key(phrase, &APTOS_DERIVATION_PATH)?))
    }

    /// A line with several words is a secret phrase; anything else is a raw key.
    pub fn from_secret_line(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        if line.split_whitespace().count() > 1 {
            Self::from_phrase(line)
        } else {
            Self::from_hex(line)
        }
    }

    /// Full-length `0x`-prefixed account address.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.verifying_key().to_bytes()))
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet").field("address", &self.address).finish_non_exhaustive()
    }
}

fn derive_address(signing_key: &SigningKey) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(signing_key.verifying_key().to_bytes());
    hasher.update([ED25519_SCHEME]);
    format!("0x{}", hex::encode(hasher.finalize()))
}

/// Loaded wallets in file order, addressable by account address.
#[derive(Debug, Default)]
pub struct WalletBook {
    wallets: Vec<Wallet>,
    by_address: HashMap<String, usize>,
}

impl WalletBook {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> BotResult<Self> {
        let mut book = WalletBook::default();
        for (index, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let wallet = Wallet::from_secret_line(line).map_err(|e| BotError::Wallet {
                line: index + 1,
                message: e.to_string(),
            })?;
            book.insert(wallet);
        }
        Ok(book)
    }

    pub fn load(path: &Path) -> BotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BotError::Storage {
            path: path.display().to_string(),
            source: e.into(),
        })?;
        let book = Self::from_lines(content.lines())?;
        if book.is_empty() {
            return Err(BotError::Wallet {
                line: 0,
                message: format!("no wallets found in {}", path.display()),
            });
        }
        info!("Loaded {} wallets from {}", book.len(), path.display());
        Ok(book)
    }

    pub fn insert(&mut self, wallet: Wallet) {
        if self.by_address.contains_key(wallet.address()) {
            warn!("Wallet {} listed twice, keeping the first entry", wallet.address());
            return;
        }
        self.by_address.insert(wallet.address().to_string(), self.wallets.len());
        self.wallets.push(wallet);
    }

    pub fn get(&self, address: &str) -> Option<&Wallet> {
        self.by_address.get(address).map(|&index| &self.wallets[index])
    }

    pub fn addresses(&self) -> Vec<String> {
        self.wallets.iter().map(|w| w.address().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}
