//! Builds the shuffled list of wallet turns for one run

use anyhow::Context;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::warn;
use crate::{
    config::ValueRange,
    wallets::WalletBook,
};

/// Reads a newline-separated address list, skipping blank lines.
pub fn read_address_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading warm-up list {}", path.display()))?;
    Ok(parse_address_list(&contents))
}

pub fn parse_address_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Warm-up subset when one is given, otherwise every wallet in load order.
/// Addresses with no loaded key are dropped.
pub fn select_candidates(warm_up: &[String], wallets: &WalletBook) -> Vec<String> {
    if warm_up.is_empty() {
        return wallets.addresses();
    }

    warm_up
        .iter()
        .filter(|address| {
            let known = wallets.get(address).is_some();
            if !known {
                warn!(wallet = %address, "No key loaded for warm-up address, skipping");
            }
            known
        })
        .cloned()
        .collect()
}

/// Repeats every candidate by its own draw from `turns`, preserving order.
pub fn expand_turns<R: Rng + ?Sized>(
    candidates: &[String],
    turns: ValueRange<u32>,
    rng: &mut R,
) -> Vec<String> {
    let mut sequence = Vec::new();
    for candidate in candidates {
        let count = turns.draw(rng);
        sequence.extend(std::iter::repeat_n(candidate.clone(), count as usize));
    }
    sequence
}

pub fn build_swap_sequence<R: Rng + ?Sized>(
    candidates: &[String],
    turns: ValueRange<u32>,
    rng: &mut R,
) -> Vec<String> {
    let mut sequence = expand_turns(candidates, turns, rng);
    sequence.shuffle(rng);
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallets::{Wallet, WalletBook};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn book(seeds: &[u8]) -> WalletBook {
        let mut book = WalletBook::default();
        for seed in seeds {
            book.insert(Wallet::from_private_key([*seed; 32]));
        }
        book
    }

    #[test]
    fn fixed_counts_expand_in_order() {
        let candidates = vec!["W1".to_string(), "W2".to_string()];
        let mut rng = StdRng::seed_from_u64(7);

        let expanded = expand_turns(&candidates, ValueRange::fixed(2), &mut rng);
        assert_eq!(expanded, vec!["W1", "W1", "W2", "W2"]);
    }

    #[test]
    fn shuffled_sequence_is_permutation() {
        let candidates = vec!["W1".to_string(), "W2".to_string()];
        let mut rng = StdRng::seed_from_u64(11);

        let mut sequence = build_swap_sequence(&candidates, ValueRange::fixed(2), &mut rng);
        sequence.sort();
        assert_eq!(sequence, vec!["W1", "W1", "W2", "W2"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_address_list("0xa\n\n  \n0xb\r\n"), vec!["0xa", "0xb"]);
        assert!(parse_address_list("\n\n").is_empty());
    }

    #[test]
    fn empty_warm_up_list_uses_every_wallet() {
        let wallets = book(&[1, 2, 3]);
        assert_eq!(select_candidates(&[], &wallets), wallets.addresses());
    }

    #[test]
    fn unknown_warm_up_addresses_are_dropped() {
        let wallets = book(&[1, 2]);
        let known = wallets.addresses()[1].clone();
        let warm_up = vec!["0xdead".to_string(), known.clone()];

        assert_eq!(select_candidates(&warm_up, &wallets), vec![known]);
    }

    proptest! {
        #[test]
        fn prop_turn_counts_stay_in_range(
            n in 1usize..8,
            min in 0u32..4,
            extra in 0u32..4,
            seed in any::<u64>(),
        ) {
            let candidates: Vec<String> = (0..n).map(|i| format!("W{}", i)).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let sequence = build_swap_sequence(&candidates, ValueRange::new(min, min + extra), &mut rng);

            for candidate in &candidates {
                let count = sequence.iter().filter(|s| *s == candidate).count() as u32;
                prop_assert!(count >= min && count <= min + extra);
            }
        }
    }
}
