//! Quote pricing
//!
//! Surcharges accumulate onto a running fare; each one is computed from the
//! fare as it stood before that step. VAT applies to the final subtotal.
//! All amounts are whole won, so the floors are exact integer divisions.

use crate::model::{QuoteOptions, QuoteResult};

/// Round trip adds 70% of the fare
const ROUND_TRIP_NUMERATOR: u64 = 7;
const ROUND_TRIP_DENOMINATOR: u64 = 10;

/// 1,000 won per full 10 minutes of waiting
const WAIT_BLOCK_MINUTES: u64 = 10;
const WAIT_BLOCK_FEE: u64 = 1_000;

pub const HOLIDAY_SURCHARGE: u64 = 10_000;
pub const RACK_FEE: u64 = 5_000;

/// VAT 10%
const TAX_DIVISOR: u64 = 10;

/// `amount * numerator / denominator` without intermediate overflow,
/// clamped to `u64::MAX`
fn scale(amount: u64, numerator: u64, denominator: u64) -> u64 {
    let scaled = u128::from(amount) * u128::from(numerator) / u128::from(denominator);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

pub fn price(base_fare: u64, options: &QuoteOptions, is_motorcycle: bool) -> QuoteResult {
    let mut fare = base_fare;
    let mut result = QuoteResult {
        base_fare,
        ..Default::default()
    };

    if options.round_trip {
        result.round_trip_surcharge = scale(fare, ROUND_TRIP_NUMERATOR, ROUND_TRIP_DENOMINATOR);
        fare = fare.saturating_add(result.round_trip_surcharge);
    }

    result.wait_surcharge = u64::from(options.wait_minutes) / WAIT_BLOCK_MINUTES * WAIT_BLOCK_FEE;
    fare = fare.saturating_add(result.wait_surcharge);

    if options.holiday {
        result.holiday_surcharge = HOLIDAY_SURCHARGE;
        fare = fare.saturating_add(result.holiday_surcharge);
    }

    // Urgency and rack options only exist for motorcycle dispatch
    if is_motorcycle {
        let rack = if options.rack_fee { RACK_FEE } else { 0 };
        result.misc_surcharge = options.urgency.amount() + rack;
        fare = fare.saturating_add(result.misc_surcharge);
    }

    result.subtotal = fare;
    if options.include_tax {
        result.tax = fare / TAX_DIVISOR;
    }
    result.total = result.subtotal.saturating_add(result.tax);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UrgencyTier;

    fn no_tax() -> QuoteOptions {
        QuoteOptions {
            include_tax: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_with_tax() {
        let options = QuoteOptions {
            round_trip: true,
            ..Default::default()
        };
        let r = price(10_000, &options, false);
        assert_eq!(r.round_trip_surcharge, 7_000);
        assert_eq!(r.subtotal, 17_000);
        assert_eq!(r.tax, 1_700);
        assert_eq!(r.total, 18_700);
    }

    #[test]
    fn test_wait_minutes_floor() {
        let options = QuoteOptions {
            wait_minutes: 25,
            ..no_tax()
        };
        let r = price(10_000, &options, false);
        assert_eq!(r.wait_surcharge, 2_000);
        assert_eq!(r.total, 12_000);
    }

    #[test]
    fn test_wait_text_invalid_is_zero() {
        let options = no_tax().with_wait_text("ten");
        assert_eq!(price(10_000, &options, false).wait_surcharge, 0);
    }

    #[test]
    fn test_round_trip_floors() {
        let options = QuoteOptions {
            round_trip: true,
            ..no_tax()
        };
        assert_eq!(price(12_345, &options, false).round_trip_surcharge, 8_641);
    }

    #[test]
    fn test_tax_floors_on_subtotal() {
        let r = price(12_345, &QuoteOptions::default(), false);
        assert_eq!(r.tax, 1_234);
        assert_eq!(r.total, 13_579);
    }

    #[test]
    fn test_motorcycle_options_inert_for_trucks() {
        let options = QuoteOptions {
            urgency: UrgencyTier::Rain,
            rack_fee: true,
            ..no_tax()
        };
        let truck = price(30_000, &options, false);
        assert_eq!(truck.misc_surcharge, 0);
        assert_eq!(truck.total, 30_000);

        let moto = price(30_000, &options, true);
        assert_eq!(moto.misc_surcharge, 25_000);
        assert_eq!(moto.total, 55_000);
    }

    #[test]
    fn test_all_surcharges_accumulate() {
        let options = QuoteOptions {
            round_trip: true,
            wait_minutes: 30,
            holiday: true,
            urgency: UrgencyTier::Urgent,
            rack_fee: false,
            include_tax: true,
        };
        let r = price(20_000, &options, true);
        assert_eq!(r.round_trip_surcharge, 14_000);
        assert_eq!(r.wait_surcharge, 3_000);
        assert_eq!(r.holiday_surcharge, 10_000);
        assert_eq!(r.misc_surcharge, 10_000);
        assert_eq!(r.subtotal, 57_000);
        assert_eq!(r.tax, 5_700);
        assert_eq!(r.total, 62_700);
    }

    #[test]
    fn test_huge_fare_saturates() {
        let options = QuoteOptions {
            round_trip: true,
            wait_minutes: 60,
            holiday: true,
            ..Default::default()
        };
        let r = price(3_000_000_000_000_000_000, &options, false);
        assert_eq!(r.round_trip_surcharge, 2_100_000_000_000_000_000);
        assert_eq!(r.subtotal, 5_100_000_000_000_016_000);
        assert_eq!(r.tax, 510_000_000_000_001_600);
        assert_eq!(r.total, 5_610_000_000_000_017_600);

        let max = price(u64::MAX, &options, true);
        assert_eq!(max.subtotal, u64::MAX);
        assert_eq!(max.total, u64::MAX);
    }
}
