//! Mathematical utility functions

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

pub fn pow10(n: u32) -> Decimal {
    match n {
        0 => dec!(1),
        6 => dec!(1_000_000),
        8 => dec!(100_000_000),
        _ => {
            let mut result = dec!(1);
            for _ in 0..n {
                result *= dec!(10);
            }
            result
        }
    }
}

/// Converts a human amount (e.g. `0.5` APT) into the coin's smallest unit,
/// truncating any precision the coin cannot represent.
pub fn to_base_units(amount: Decimal, decimals: u32) -> Option<u64> {
    if amount.is_sign_negative() {
        return None;
    }
    amount.checked_mul(pow10(decimals))?.trunc().to_u64()
}

pub fn from_base_units(amount: u64, decimals: u32) -> Decimal {
    Decimal::from(amount) / pow10(decimals)
}

/// `floor(value * percent / 100)` without intermediate overflow.
pub fn percent_of(value: u64, percent: u64) -> u64 {
    let scaled = value as u128 * percent as u128 / 100;
    scaled.min(u64::MAX as u128) as u64
}
