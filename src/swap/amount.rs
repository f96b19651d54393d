//! Swap-amount selection

use rand::Rng;
use crate::{
    config::ValueRange,
    errors::{BotError, BotResult},
    types::{APTOS_COIN_CONTRACT, APTOS_DECIMALS, CoinHolding, balance_of},
    utils::{from_base_units, percent_of},
};

/// Share of the spendable balance to swap, rounded down to whole units.
/// AptosCoin keeps `native_floor` untouched for gas.
pub fn select_swap_amount<R: Rng + ?Sized>(
    wallet: &str,
    holdings: &[CoinHolding],
    source: &str,
    native_floor: u64,
    percent: ValueRange<u64>,
    rng: &mut R,
) -> BotResult<u64> {
    let balance = balance_of(holdings, source).ok_or_else(|| BotError::InsufficientFunds {
        wallet: wallet.to_string(),
        details: format!("{} is not held", source),
    })?;

    let spendable = if source == APTOS_COIN_CONTRACT {
        if balance <= native_floor {
            return Err(BotError::InsufficientFunds {
                wallet: wallet.to_string(),
                details: format!(
                    "{} native balance is not enough for swap",
                    from_base_units(balance, APTOS_DECIMALS)
                ),
            });
        }
        balance - native_floor
    } else {
        balance
    };

    let amount = percent_of(spendable, percent.draw(rng));
    if amount == 0 {
        return Err(BotError::InsufficientFunds {
            wallet: wallet.to_string(),
            details: format!("{} balance {} rounds to a zero swap", source, balance),
        });
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const USDC: &str = "0xf22::asset::USDC";

    #[test]
    fn native_amount_keeps_floor() {
        let holdings = vec![CoinHolding::new(APTOS_COIN_CONTRACT, 1_000, 8)];
        let mut rng = StdRng::seed_from_u64(1);

        let amount = select_swap_amount(
            "0xa", &holdings, APTOS_COIN_CONTRACT, 400, ValueRange::fixed(50), &mut rng,
        )
        .unwrap();
        assert_eq!(amount, 300);
    }

    #[test]
    fn other_coins_use_full_balance() {
        let holdings = vec![
            CoinHolding::new(APTOS_COIN_CONTRACT, 10, 8),
            CoinHolding::new(USDC, 1_001, 6),
        ];
        let mut rng = StdRng::seed_from_u64(2);

        let amount = select_swap_amount("0xa", &holdings, USDC, 10_000, ValueRange::fixed(50), &mut rng).unwrap();
        assert_eq!(amount, 500);
    }

    #[test]
    fn native_at_floor_is_insufficient() {
        let holdings = vec![CoinHolding::new(APTOS_COIN_CONTRACT, 400, 8)];
        let mut rng = StdRng::seed_from_u64(3);

        let err = select_swap_amount(
            "0xa", &holdings, APTOS_COIN_CONTRACT, 400, ValueRange::fixed(100), &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, BotError::InsufficientFunds { .. }));
    }

    #[test]
    fn unheld_source_is_insufficient() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = select_swap_amount("0xa", &[], USDC, 0, ValueRange::fixed(10), &mut rng).unwrap_err();
        assert!(matches!(err, BotError::InsufficientFunds { .. }));
    }

    #[test]
    fn dust_rounding_to_zero_is_insufficient() {
        let holdings = vec![CoinHolding::new(USDC, 1, 6)];
        let mut rng = StdRng::seed_from_u64(5);

        assert!(select_swap_amount("0xa", &holdings, USDC, 0, ValueRange::fixed(99), &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn prop_native_amount_within_spendable(
            balance in 0u64..u64::MAX,
            floor in 0u64..u64::MAX,
            min_pct in 1u64..=100,
            extra in 0u64..=100,
            seed in any::<u64>(),
        ) {
            let percent = ValueRange::new(min_pct, (min_pct + extra).min(100));
            let holdings = vec![CoinHolding::new(APTOS_COIN_CONTRACT, balance, 8)];
            let mut rng = StdRng::seed_from_u64(seed);

            match select_swap_amount("0xa", &holdings, APTOS_COIN_CONTRACT, floor, percent, &mut rng) {
                Ok(amount) => {
                    prop_assert!(balance > floor);
                    prop_assert!(amount > 0);
                    prop_assert!(amount <= balance - floor);
                }
                Err(err) => {
                    let insufficient = matches!(err, BotError::InsufficientFunds { .. });
                    prop_assert!(insufficient);
                }
            }
        }
    }
}
