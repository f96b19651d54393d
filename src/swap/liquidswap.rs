//! Liquidswap quoting and payload construction

use tracing::info;
use crate::{
    errors::{BotError, BotResult},
    network::ChainClient,
    pools::PoolCatalog,
    types::{
        COIN_REGISTER_FUNCTION, ContractVersion, CurveType, EntryFunctionPayload,
        LIQUIDSWAP_V0_ADDRESS, LIQUIDSWAP_V0_ROUTER, LIQUIDSWAP_V0_SCRIPTS,
        LIQUIDSWAP_V05_ADDRESS, LIQUIDSWAP_V05_ROUTER, LIQUIDSWAP_V05_SCRIPTS, Pool,
        SwapDecision,
    },
    utils::percent_of,
};

/// Module layout of one Liquidswap deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidswapModules {
    pub address: &'static str,
    pub scripts: &'static str,
    pub router: &'static str,
}

pub fn modules(version: ContractVersion) -> LiquidswapModules {
    match version {
        ContractVersion::V0 => LiquidswapModules {
            address: LIQUIDSWAP_V0_ADDRESS,
            scripts: LIQUIDSWAP_V0_SCRIPTS,
            router: LIQUIDSWAP_V0_ROUTER,
        },
        ContractVersion::V05 => LiquidswapModules {
            address: LIQUIDSWAP_V05_ADDRESS,
            scripts: LIQUIDSWAP_V05_SCRIPTS,
            router: LIQUIDSWAP_V05_ROUTER,
        },
    }
}

/// Move type of the pool's pricing curve.
pub fn curve_type(pool: &Pool) -> String {
    let curve = match pool.curve {
        CurveType::Stable => "Stable",
        CurveType::Unstable => "Uncorrelated",
    };
    format!("{}::curves::{}", modules(pool.contract).address, curve)
}

fn type_arguments(pool: &Pool, decision: &SwapDecision) -> Vec<String> {
    vec![decision.source.clone(), decision.destination.clone(), curve_type(pool)]
}

/// Expected output of swapping `decision.amount` through the pool router.
pub async fn quote_amount_out(
    chain: &dyn ChainClient,
    pool: &Pool,
    decision: &SwapDecision,
) -> BotResult<u64> {
    let m = modules(pool.contract);
    let function = format!("{}::{}::get_amount_out", m.address, m.router);
    let values = chain
        .view(&function, &type_arguments(pool, decision), &[decision.amount.to_string()])
        .await?;

    let value = values.first().ok_or_else(|| {
        BotError::parsing(function.clone(), anyhow::anyhow!("empty view result"))
    })?;
    let parsed = match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| BotError::parsing(function, anyhow::anyhow!("unexpected quote {}", value)))
}

/// Floor of the quoted output after giving up `slippage_percent`.
pub fn min_amount_out(quote: u64, slippage_percent: u64) -> u64 {
    percent_of(quote, 100u64.saturating_sub(slippage_percent))
}

pub fn swap_payload(pool: &Pool, decision: &SwapDecision, min_out: u64) -> EntryFunctionPayload {
    let m = modules(pool.contract);
    EntryFunctionPayload::new(
        format!("{}::{}::swap", m.address, m.scripts),
        type_arguments(pool, decision),
        vec![decision.amount, min_out],
    )
}

pub fn register_payload(coin: &str) -> EntryFunctionPayload {
    EntryFunctionPayload::new(COIN_REGISTER_FUNCTION, vec![coin.to_string()], vec![])
}

/// Quotes the swap and wraps it into an exact-input swap call.
pub async fn build_swap_payload(
    chain: &dyn ChainClient,
    catalog: &PoolCatalog,
    decision: &SwapDecision,
    slippage_percent: u64,
) -> BotResult<EntryFunctionPayload> {
    let pool = catalog
        .lookup(&decision.source, &decision.destination)
        .ok_or_else(|| BotError::NoPoolFound {
            coin_x: decision.source.clone(),
            coin_y: decision.destination.clone(),
        })?;

    let quote = quote_amount_out(chain, pool, decision).await?;
    let min_out = min_amount_out(quote, slippage_percent);
    info!("Using {}% slippage: quoted {}, minimum {}", slippage_percent, quote, min_out);

    Ok(swap_payload(pool, decision, min_out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::APTOS_COIN_CONTRACT;

    const USDC: &str = "0xf22::asset::USDC";

    fn pool(curve: CurveType, contract: ContractVersion) -> Pool {
        Pool {
            coin_x: APTOS_COIN_CONTRACT.to_string(),
            coin_y: USDC.to_string(),
            curve,
            contract,
            network_id: 1,
        }
    }

    fn decision() -> SwapDecision {
        SwapDecision {
            source: USDC.to_string(),
            destination: APTOS_COIN_CONTRACT.to_string(),
            amount: 1_000_000,
        }
    }

    #[test]
    fn curve_types_follow_contract_version() {
        assert_eq!(
            curve_type(&pool(CurveType::Unstable, ContractVersion::V0)),
            format!("{}::curves::Uncorrelated", LIQUIDSWAP_V0_ADDRESS)
        );
        assert_eq!(
            curve_type(&pool(CurveType::Stable, ContractVersion::V05)),
            format!("{}::curves::Stable", LIQUIDSWAP_V05_ADDRESS)
        );
    }

    #[test]
    fn slippage_rounds_minimum_down() {
        assert_eq!(min_amount_out(1_000, 3), 970);
        assert_eq!(min_amount_out(999, 1), 989);
        assert_eq!(min_amount_out(50, 0), 50);
    }

    #[test]
    fn swap_payload_uses_decision_direction() {
        let payload = swap_payload(&pool(CurveType::Unstable, ContractVersion::V0), &decision(), 42);

        assert_eq!(payload.function, format!("{}::scripts_v2::swap", LIQUIDSWAP_V0_ADDRESS));
        assert_eq!(payload.type_arguments[0], USDC);
        assert_eq!(payload.type_arguments[1], APTOS_COIN_CONTRACT);
        assert_eq!(
            payload.arguments,
            vec![serde_json::json!("1000000"), serde_json::json!("42")]
        );
    }

    #[test]
    fn register_payload_targets_coin() {
        let payload = register_payload(USDC);
        assert_eq!(payload.function, "0x1::managed_coin::register");
        assert_eq!(payload.type_arguments, vec![USDC.to_string()]);
        assert!(payload.arguments.is_empty());
    }
}
