//! SLIP-0010 ed25519 derivation for Aptos secret phrases

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Derivation path Aptos wallets use for the first account.
pub const APTOS_DERIVATION_PATH: [u32; 5] = [44, 637, 0, 0, 0];

const HARDENED_OFFSET: u32 = 0x8000_0000;
const ED25519_CURVE_SEED: &[u8] = b"ed25519 seed";

/// Derives the ed25519 private key for `path` (all segments hardened) from a
/// BIP-39 phrase with an empty passphrase.
pub fn derive_private_key(phrase: &str, path: &[u32]) -> anyhow::Result<[u8; 32]> {
    let mnemonic = Mnemonic::parse_normalized(phrase)
        .map_err(|e| anyhow::anyhow!("invalid secret phrase: {}", e))?;
    let seed = mnemonic.to_seed_normalized("");

    let (mut key, mut chain_code) = split(hmac_sha512(ED25519_CURVE_SEED, &seed)?);
    for segment in path {
        let mut data = Vec::with_capacity(37);
        data.push(0u8);
        data.extend_from_slice(&key);
        data.extend_from_slice(&(segment | HARDENED_OFFSET).to_be_bytes());
        (key, chain_code) = split(hmac_sha512(&chain_code, &data)?);
    }
    Ok(key)
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> anyhow::Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| anyhow::anyhow!("hmac key rejected: {}", e))?;
    mac.update(data);
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    Ok(digest)
}

fn split(digest: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    (key, chain_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon \
                          abandon abandon abandon abandon abandon about";

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_private_key(PHRASE, &APTOS_DERIVATION_PATH).unwrap();
        let b = derive_private_key(PHRASE, &APTOS_DERIVATION_PATH).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn account_index_changes_key() {
        let first = derive_private_key(PHRASE, &APTOS_DERIVATION_PATH).unwrap();
        let second = derive_private_key(PHRASE, &[44, 637, 1, 0, 0]).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let phrase = PHRASE.replace("about", "abandon");
        assert!(derive_private_key(&phrase, &APTOS_DERIVATION_PATH).is_err());
    }
}
