//! Swap-pair selection policy

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;
use crate::{
    errors::{BotError, BotResult},
    pools::PoolCatalog,
    types::{APTOS_COIN_CONTRACT, CoinHolding, Pool, SwapPair, native_balance},
};

/// Picks the coins a wallet swaps between.
///
/// Below the native floor the wallet sells some other coin back into
/// AptosCoin. Otherwise a random catalog pool is tried and bent into a
/// pair the wallet can fund.
pub fn select_swap_pair<R: Rng + ?Sized>(
    wallet: &str,
    holdings: &[CoinHolding],
    native_floor: u64,
    catalog: &PoolCatalog,
    rng: &mut R,
) -> BotResult<SwapPair> {
    if native_balance(holdings) < native_floor {
        to_native_pair(wallet, holdings, catalog, rng)
    } else {
        random_catalog_pair(holdings, catalog, rng)
    }
}

fn to_native_pair<R: Rng + ?Sized>(
    wallet: &str,
    holdings: &[CoinHolding],
    catalog: &PoolCatalog,
    rng: &mut R,
) -> BotResult<SwapPair> {
    let mut candidates: Vec<&str> = holdings
        .iter()
        .filter(|h| h.is_funded() && !h.is_native())
        .map(|h| h.contract.as_str())
        .collect();
    candidates.shuffle(rng);

    let source = candidates
        .into_iter()
        .find(|coin| catalog.has_pool(APTOS_COIN_CONTRACT, coin))
        .ok_or_else(|| BotError::InsufficientFunds {
            wallet: wallet.to_string(),
            details: "native balance below floor and no coin with an AptosCoin pool".to_string(),
        })?;

    info!("Aptos balance is small. Choosing {} - {} pool", source, APTOS_COIN_CONTRACT);
    Ok(SwapPair::new(source, APTOS_COIN_CONTRACT))
}

fn random_catalog_pair<R: Rng + ?Sized>(
    holdings: &[CoinHolding],
    catalog: &PoolCatalog,
    rng: &mut R,
) -> BotResult<SwapPair> {
    let pool = catalog.pick_random(rng);
    info!("Randomly chosen {} pool", pool);

    let mut held = funded_pool_coins(holdings, pool);
    match held.len() {
        0 => {
            let mut coins = pool.coins();
            coins.shuffle(rng);
            let destination = coins
                .into_iter()
                .find(|coin| catalog.has_pool(APTOS_COIN_CONTRACT, coin))
                .ok_or_else(|| BotError::NoPoolFound {
                    coin_x: APTOS_COIN_CONTRACT.to_string(),
                    coin_y: format!("{} | {}", pool.coin_x, pool.coin_y),
                })?;
            Ok(SwapPair::new(APTOS_COIN_CONTRACT, destination))
        }
        1 if held[0] != pool.coin_x => Ok(SwapPair::new(&pool.coin_y, &pool.coin_x)),
        1 => Ok(SwapPair::new(&pool.coin_x, &pool.coin_y)),
        _ => {
            held.shuffle(rng);
            Ok(SwapPair::new(held[0], held[1]))
        }
    }
}

/// Pool coins the wallet holds with a positive balance, in holdings order.
fn funded_pool_coins<'a>(holdings: &'a [CoinHolding], pool: &Pool) -> Vec<&'a str> {
    let mut held: Vec<&str> = Vec::with_capacity(2);
    for holding in holdings {
        let coin = holding.contract.as_str();
        if holding.is_funded() && pool.contains(coin) && !held.contains(&coin) {
            held.push(coin);
        }
    }
    held
}
