//! Bot configuration settings loaded from the `.properties` store

use rand::Rng;
use rand::distr::uniform::SampleUniform;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use crate::{
    errors::{BotError, BotResult},
    types::{APTOS_DECIMALS, DEFAULT_BALANCE_API},
    utils::to_base_units,
};

// Delay defaults (seconds)
pub const DEFAULT_MIN_SWAP_DELAY_SECS: u64 = 60;
pub const DEFAULT_MAX_SWAP_DELAY_SECS: u64 = 180;
pub const DEFAULT_MIN_REGISTER_DELAY_SECS: u64 = 10;
pub const DEFAULT_MAX_REGISTER_DELAY_SECS: u64 = 30;

// Schedule defaults
pub const DEFAULT_MIN_SWAPS_PER_ACCOUNT: u32 = 1;
pub const DEFAULT_MAX_SWAPS_PER_ACCOUNT: u32 = 3;

// Native balance floor defaults (APT)
pub const DEFAULT_APTOS_BALANCE_MIN: Decimal = dec!(0.1);
pub const DEFAULT_APTOS_BALANCE_MAX: Decimal = dec!(0.2);

// Percentages
pub const DEFAULT_SWAP_MIN_PERCENT: u64 = 10;
pub const DEFAULT_SWAP_MAX_PERCENT: u64 = 50;
pub const DEFAULT_SLIPPAGE_MIN_PERCENT: u64 = 1;
pub const DEFAULT_SLIPPAGE_MAX_PERCENT: u64 = 3;

// Gas
pub const DEFAULT_MIN_GAS_AMOUNT: u64 = 2_000;
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 5_000;
pub const DEFAULT_MIN_GAS_PRICE: u64 = 100;
pub const DEFAULT_MAX_GAS_PRICE: u64 = 150;

pub const DEFAULT_TX_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_WARM_UP_WALLETS_FILE: &str = "wallets.txt";
pub const PROPERTIES_FILE: &str = ".properties";

/// Inclusive `[min, max]` range a value is drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn fixed(value: T) -> Self {
        Self { min: value, max: value }
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.random_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sid_phrases_file: PathBuf,
    pub rpc: String,
    pub swap_delay_secs: ValueRange<u64>,
    pub register_delay_secs: ValueRange<u64>,
    pub swaps_per_account: ValueRange<u32>,
    /// Native balance kept untouched, in octas.
    pub native_balance_floor: ValueRange<u64>,
    pub swap_percent: ValueRange<u64>,
    pub slippage_percent: ValueRange<u64>,
    pub gas_amount: ValueRange<u64>,
    pub gas_price: ValueRange<u64>,
    pub log_file_per_execution: bool,
    pub balance_api: String,
    pub balance_api_accept_invalid_certs: bool,
    pub pools_file: Option<PathBuf>,
    pub tx_timeout_secs: u64,
    pub warm_up_wallets_file: PathBuf,
}

impl Config {
    /// Loads `.properties` from `config_dir` into the process environment
    /// and reads the settings from there.
    pub fn load(config_dir: &Path) -> BotResult<Self> {
        let properties = config_dir.join(PROPERTIES_FILE);
        dotenv::from_path(&properties).map_err(|e| {
            BotError::config(PROPERTIES_FILE, format!("cannot read {}: {}", properties.display(), e))
        })?;

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        if config.warm_up_wallets_file.is_relative() {
            config.warm_up_wallets_file = config_dir.join(&config.warm_up_wallets_file);
        }
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            sid_phrases_file: PathBuf::from(required(&lookup, "SID_PHRASES_FILE")?),
            rpc: required(&lookup, "RPC")?.trim_end_matches('/').to_string(),
            swap_delay_secs: range(
                &lookup,
                ("MIN_DELAY_BETWEEN_SWAPS_SECONDS", DEFAULT_MIN_SWAP_DELAY_SECS),
                ("MAX_DELAY_BETWEEN_SWAPS_SECONDS", DEFAULT_MAX_SWAP_DELAY_SECS),
            )?,
            register_delay_secs: range(
                &lookup,
                ("MIN_REGISTER_TOKEN_DELAY_SECONDS", DEFAULT_MIN_REGISTER_DELAY_SECS),
                ("MAX_REGISTER_TOKEN_DELAY_SECONDS", DEFAULT_MAX_REGISTER_DELAY_SECS),
            )?,
            swaps_per_account: range(
                &lookup,
                ("MIN_SWAPS_PER_ACCOUNT", DEFAULT_MIN_SWAPS_PER_ACCOUNT),
                ("MAX_SWAPS_PER_ACCOUNT", DEFAULT_MAX_SWAPS_PER_ACCOUNT),
            )?,
            native_balance_floor: native_range(
                &lookup,
                ("APTOS_BALANCE_MIN", DEFAULT_APTOS_BALANCE_MIN),
                ("APTOS_BALANCE_MAX", DEFAULT_APTOS_BALANCE_MAX),
            )?,
            swap_percent: range(
                &lookup,
                ("SWAP_MIN_PERCENT", DEFAULT_SWAP_MIN_PERCENT),
                ("SWAP_MAX_PERCENT", DEFAULT_SWAP_MAX_PERCENT),
            )?,
            slippage_percent: range(
                &lookup,
                ("SLIPPAGE_MIN_PERCENT", DEFAULT_SLIPPAGE_MIN_PERCENT),
                ("SLIPPAGE_MAX_PERCENT", DEFAULT_SLIPPAGE_MAX_PERCENT),
            )?,
            gas_amount: range(
                &lookup,
                ("MIN_GAS_AMOUNT", DEFAULT_MIN_GAS_AMOUNT),
                ("MAX_GAS_AMOUNT", DEFAULT_MAX_GAS_AMOUNT),
            )?,
            gas_price: range(
                &lookup,
                ("MIN_GAS_PRICE", DEFAULT_MIN_GAS_PRICE),
                ("MAX_GAS_PRICE", DEFAULT_MAX_GAS_PRICE),
            )?,
            log_file_per_execution: parse_or(&lookup, "LOG_FILE_PER_EXECUTION", false)?,
            balance_api: lookup("BALANCE_API")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BALANCE_API.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string(),
            balance_api_accept_invalid_certs: parse_or(
                &lookup,
                "BALANCE_API_ACCEPT_INVALID_CERTS",
                false,
            )?,
            pools_file: lookup("POOLS_FILE")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            tx_timeout_secs: parse_or(&lookup, "TX_TIMEOUT_SECONDS", DEFAULT_TX_TIMEOUT_SECS)?,
            warm_up_wallets_file: PathBuf::from(
                lookup("WARM_UP_WALLETS_FILE")
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_WARM_UP_WALLETS_FILE.to_string()),
            ),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> BotResult<()> {
        if self.swap_percent.min == 0 || self.swap_percent.max > 100 {
            return Err(BotError::config("SWAP_MIN_PERCENT", "swap percent must lie within 1..=100"));
        }
        if self.slippage_percent.max >= 100 {
            return Err(BotError::config("SLIPPAGE_MAX_PERCENT", "slippage must be below 100%"));
        }
        if self.gas_amount.min == 0 {
            return Err(BotError::config("MIN_GAS_AMOUNT", "gas amount must be positive"));
        }
        if self.tx_timeout_secs == 0 {
            return Err(BotError::config("TX_TIMEOUT_SECONDS", "timeout must be positive"));
        }
        Ok(())
    }
}

fn required<F>(lookup: &F, key: &str) -> BotResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BotError::config(key, "missing required setting"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> BotResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).map(|s| s.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|e| BotError::config(key, format!("cannot parse '{}': {}", raw, e))),
        _ => Ok(default),
    }
}

fn range<F, T>(lookup: &F, min: (&str, T), max: (&str, T)) -> BotResult<ValueRange<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + SampleUniform + PartialOrd + Copy,
    T::Err: std::fmt::Display,
{
    let lower = parse_or(lookup, min.0, min.1)?;
    let upper = parse_or(lookup, max.0, max.1)?;
    if lower > upper {
        return Err(BotError::config(min.0, format!("{} is greater than {}", min.0, max.0)));
    }
    Ok(ValueRange::new(lower, upper))
}

fn native_range<F>(lookup: &F, min: (&str, Decimal), max: (&str, Decimal)) -> BotResult<ValueRange<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    let to_octas = |key: &str, apt: Decimal| {
        to_base_units(apt, APTOS_DECIMALS)
            .ok_or_else(|| BotError::config(key, format!("{} APT is not a valid balance", apt)))
    };
    let lower = to_octas(min.0, parse_or(lookup, min.0, min.1)?)?;
    let upper = to_octas(max.0, parse_or(lookup, max.0, max.1)?)?;
    if lower > upper {
        return Err(BotError::config(min.0, format!("{} is greater than {}", min.0, max.0)));
    }
    Ok(ValueRange::new(lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SID_PHRASES_FILE", "secrets.txt"),
            ("RPC", "https://fullnode.mainnet.aptoslabs.com/v1/"),
        ]
    }

    #[test]
    fn defaults_fill_missing_settings() {
        let config = Config::from_lookup(lookup_from(&minimal())).unwrap();

        assert_eq!(config.rpc, "https://fullnode.mainnet.aptoslabs.com/v1");
        assert_eq!(config.swap_delay_secs, ValueRange::new(60, 180));
        assert_eq!(config.native_balance_floor, ValueRange::new(10_000_000, 20_000_000));
        assert_eq!(config.balance_api, DEFAULT_BALANCE_API);
        assert_eq!(config.warm_up_wallets_file, PathBuf::from("wallets.txt"));
        assert!(!config.log_file_per_execution);
        assert!(config.pools_file.is_none());
    }

    #[test]
    fn native_floor_is_converted_to_octas() {
        let mut pairs = minimal();
        pairs.push(("APTOS_BALANCE_MIN", "0.5"));
        pairs.push(("APTOS_BALANCE_MAX", "1.25"));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.native_balance_floor, ValueRange::new(50_000_000, 125_000_000));
    }

    #[test]
    fn missing_rpc_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("SID_PHRASES_FILE", "s.txt")])).unwrap_err();
        assert!(matches!(err, BotError::Config { ref key, .. } if key == "RPC"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut pairs = minimal();
        pairs.push(("MIN_GAS_PRICE", "200"));
        pairs.push(("MAX_GAS_PRICE", "100"));

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, BotError::Config { ref key, .. } if key == "MIN_GAS_PRICE"));
    }

    #[test]
    fn malformed_number_is_rejected() {
        let mut pairs = minimal();
        pairs.push(("MIN_SWAPS_PER_ACCOUNT", "two"));

        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn swap_percent_above_hundred_is_rejected() {
        let mut pairs = minimal();
        pairs.push(("SWAP_MAX_PERCENT", "150"));

        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn range_draws_stay_inclusive() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::new(3u64, 5u64);
        for _ in 0..200 {
            let v = range.draw(&mut rng);
            assert!((3..=5).contains(&v));
        }
        assert_eq!(ValueRange::fixed(9u32).draw(&mut rng), 9);
    }
}
