//! On-chain identifiers used by the bot

/// Native gas coin of the Aptos network.
pub const APTOS_COIN_CONTRACT: &str = "0x1::aptos_coin::AptosCoin";
pub const APTOS_DECIMALS: u32 = 8;

pub const COIN_STORE_RESOURCE: &str = "0x1::coin::CoinStore";
pub const COIN_REGISTER_FUNCTION: &str = "0x1::managed_coin::register";

// Liquidswap v0
pub const LIQUIDSWAP_V0_ADDRESS: &str =
    "0x190d44266241744264b964a37b8f09863167a12d3e70cda39376cfb4e3561e12";
pub const LIQUIDSWAP_V0_SCRIPTS: &str = "scripts_v2";
pub const LIQUIDSWAP_V0_ROUTER: &str = "router_v2";

// Liquidswap v0.5
pub const LIQUIDSWAP_V05_ADDRESS: &str =
    "0x163df34fccbf003ce219d3f1d9e70d140b60622cb9dd47599c25fb2f797ba6e";
pub const LIQUIDSWAP_V05_SCRIPTS: &str = "scripts";
pub const LIQUIDSWAP_V05_ROUTER: &str = "router";

pub const DEFAULT_BALANCE_API: &str = "https://api.apscan.io";
