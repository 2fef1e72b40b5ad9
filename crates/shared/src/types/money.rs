//! Money rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations. All amounts in
//! the system are `rust_decimal::Decimal` and every consumer rounds through
//! the helpers here, so there is exactly one rounding authority.

use rust_decimal::prelude::*;

/// Decimal places for all stored monetary amounts.
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary value to 2 decimal places.
///
/// Uses commercial rounding (`MidpointAwayFromZero`): `0.995` becomes
/// `1.00`, `-0.995` becomes `-1.00`. This matches how line and total
/// amounts on customer documents are expected to round.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to `decimal_places` using the same strategy as [`round2`].
#[must_use]
pub fn round_dp(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2_basic() {
        assert_eq!(round2(dec!(10.004)), dec!(10.00));
        assert_eq!(round2(dec!(10.005)), dec!(10.01));
        assert_eq!(round2(dec!(10.006)), dec!(10.01));
    }

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        // Commercial rounding, not Banker's: .995 always rounds up in magnitude.
        assert_eq!(round2(dec!(0.995)), dec!(1.00));
        assert_eq!(round2(dec!(1.995)), dec!(2.00));
        assert_eq!(round2(dec!(2.995)), dec!(3.00));
        assert_eq!(round2(dec!(-0.995)), dec!(-1.00));
    }

    #[test]
    fn test_round2_already_rounded() {
        assert_eq!(round2(dec!(100)), dec!(100));
        assert_eq!(round2(dec!(100.50)), dec!(100.50));
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(dec!(1.23456), 4), dec!(1.2346));
        assert_eq!(round_dp(dec!(1.23456), 0), dec!(1));
    }
}
