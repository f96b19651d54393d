//! Static catalog of tradable Liquidswap pools

use rand::Rng;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;
use crate::{
    errors::{BotError, BotResult},
    types::Pool,
};

const EMBEDDED_POOLS: &str = include_str!("../../data/liquidswap_pools.json");

/// Immutable pool directory, indexed under both orderings of every pair.
#[derive(Debug, Clone)]
pub struct PoolCatalog {
    pools: Vec<Pool>,
    by_pair: HashMap<(String, String), usize>,
}

impl PoolCatalog {
    pub fn new(pools: Vec<Pool>) -> BotResult<Self> {
        if pools.is_empty() {
            return Err(BotError::config("POOLS_FILE", "pool catalog is empty"));
        }

        // a later pool for the same pair replaces an earlier one
        let mut by_pair = HashMap::with_capacity(pools.len() * 2);
        for (index, pool) in pools.iter().enumerate() {
            by_pair.insert((pool.coin_x.clone(), pool.coin_y.clone()), index);
            by_pair.insert((pool.coin_y.clone(), pool.coin_x.clone()), index);
        }

        Ok(Self { pools, by_pair })
    }

    pub fn from_json(json: &str) -> BotResult<Self> {
        let pools: Vec<Pool> = serde_json::from_str(json)
            .map_err(|e| BotError::parsing("pool catalog", e))?;
        Self::new(pools)
    }

    pub fn embedded() -> BotResult<Self> {
        Self::from_json(EMBEDDED_POOLS)
    }

    /// Reads the catalog from `path`, or falls back to the embedded pool list.
    pub fn load(path: Option<&Path>) -> BotResult<Self> {
        let catalog = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| BotError::Storage {
                    path: path.display().to_string(),
                    source: e.into(),
                })?;
                Self::from_json(&json)?
            }
            None => Self::embedded()?,
        };
        info!("Loaded {} swap pools", catalog.len());
        Ok(catalog)
    }

    pub fn lookup(&self, coin_a: &str, coin_b: &str) -> Option<&Pool> {
        self.by_pair
            .get(&(coin_a.to_string(), coin_b.to_string()))
            .map(|&index| &self.pools[index])
    }

    pub fn has_pool(&self, coin_a: &str, coin_b: &str) -> bool {
        self.lookup(coin_a, coin_b).is_some()
    }

    /// Uniform pick over the whole catalog.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> &Pool {
        &self.pools[rng.random_range(0..self.pools.len())]
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{APTOS_COIN_CONTRACT, ContractVersion, CurveType};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool(x: &str, y: &str, contract: ContractVersion) -> Pool {
        Pool {
            coin_x: x.to_string(),
            coin_y: y.to_string(),
            curve: CurveType::Unstable,
            contract,
            network_id: 1,
        }
    }

    #[test]
    fn embedded_catalog_loads() {
        let catalog = PoolCatalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.pools().iter().any(|p| p.contains(APTOS_COIN_CONTRACT)));
        assert!(catalog.pools().iter().any(|p| p.contract == ContractVersion::V05));
    }

    #[test]
    fn every_pool_resolves_both_ways() {
        let catalog = PoolCatalog::embedded().unwrap();
        for p in catalog.pools() {
            assert!(catalog.has_pool(&p.coin_x, &p.coin_y));
            assert_eq!(catalog.lookup(&p.coin_x, &p.coin_y), catalog.lookup(&p.coin_y, &p.coin_x));
        }
    }

    #[test]
    fn lookup_is_exact() {
        let catalog = PoolCatalog::new(vec![pool("0x1::a::A", "0x2::b::B", ContractVersion::V0)]).unwrap();
        assert!(catalog.lookup("0x1::a::a", "0x2::b::B").is_none());
        assert!(catalog.lookup("0x1::a::A", "0x1::a::A").is_none());
    }

    #[test]
    fn later_pool_replaces_earlier_for_same_pair() {
        let catalog = PoolCatalog::new(vec![
            pool("A", "B", ContractVersion::V0),
            pool("B", "A", ContractVersion::V05),
        ])
        .unwrap();

        assert_eq!(catalog.lookup("A", "B").map(|p| p.contract), Some(ContractVersion::V05));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(PoolCatalog::new(Vec::new()).is_err());
        assert!(PoolCatalog::from_json("[]").is_err());
    }

    #[test]
    fn unknown_contract_version_is_rejected() {
        let json = r#"[{"coinX":"A","coinY":"B","curve":"stable","contract":2,"networkId":1}]"#;
        assert!(PoolCatalog::from_json(json).is_err());
    }

    #[test]
    fn random_pick_reaches_every_pool() {
        let catalog = PoolCatalog::new(vec![
            pool("A", "B", ContractVersion::V0),
            pool("C", "D", ContractVersion::V0),
            pool("E", "F", ContractVersion::V0),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(catalog.pick_random(&mut rng).coin_x.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_lookup_is_symmetric(a in 0usize..12, b in 0usize..12) {
            let catalog = PoolCatalog::embedded().unwrap();
            let mut coins: Vec<String> = catalog
                .pools()
                .iter()
                .flat_map(|p| [p.coin_x.clone(), p.coin_y.clone()])
                .collect();
            coins.push("0xdead::missing::Coin".to_string());
            let x = &coins[a % coins.len()];
            let y = &coins[b % coins.len()];

            prop_assert_eq!(catalog.lookup(x, y), catalog.lookup(y, x));
        }
    }
}
