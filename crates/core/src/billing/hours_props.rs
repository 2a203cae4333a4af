//! Property-based tests for billable hours and amounts.
//!
//! - Rounding never bills less than was worked
//! - Rounding never adds a full step
//! - Amounts carry at most two decimal places

use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::amount::{AMOUNT_SCALE, line_amount};
use super::hours::{billable_hours, billed_minutes, raw_minutes};
use crate::contract::RoundingPolicy;

/// Strategy to generate shift lengths up to 24 hours, in milliseconds.
fn shift_millis() -> impl Strategy<Value = i64> {
    0i64..86_400_000
}

/// Strategy to generate the rounding policies that have a step.
fn stepped_policy() -> impl Strategy<Value = RoundingPolicy> {
    prop_oneof![Just(RoundingPolicy::Nearest5), Just(RoundingPolicy::Nearest15)]
}

/// Strategy to generate bill rates (0.00 to 1,000.00).
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Billed minutes are never below worked minutes.
    #[test]
    fn prop_billed_at_least_raw(millis in shift_millis(), policy in stepped_policy()) {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let raw = raw_minutes(start, start + TimeDelta::milliseconds(millis)).unwrap();
        prop_assert!(billed_minutes(raw, policy) >= raw);
    }

    /// Billed minutes are within one step of worked minutes and land on a step.
    #[test]
    fn prop_billed_within_one_step(millis in shift_millis(), policy in stepped_policy()) {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let raw = raw_minutes(start, start + TimeDelta::milliseconds(millis)).unwrap();
        let step = Decimal::from(policy.step_minutes().unwrap());
        let billed = billed_minutes(raw, policy);

        prop_assert!(billed - raw < step);
        prop_assert_eq!(billed % step, Decimal::ZERO);
    }

    /// Whole-minute shifts with no rounding bill exactly minutes / 60.
    #[test]
    fn prop_unrounded_whole_minutes(minutes in 0i64..1_440) {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let end = start + TimeDelta::minutes(minutes);
        let hours = billable_hours(start, end, RoundingPolicy::None).unwrap();
        prop_assert_eq!(hours, Decimal::from(minutes) / Decimal::from(60));
    }

    /// Amounts have at most two decimal places and stay within half a cent.
    #[test]
    fn prop_amount_rounded_to_cents(minutes in 0i64..1_440, rate in rate()) {
        let hours = Decimal::from(minutes) / Decimal::from(60);
        let amount = line_amount(hours, rate).unwrap();
        let exact = hours * rate;

        prop_assert!(amount.scale() <= AMOUNT_SCALE);
        prop_assert!((amount - exact).abs() <= Decimal::new(5, 3));
    }
}
