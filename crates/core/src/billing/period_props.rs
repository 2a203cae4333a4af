//! Property-based tests for billing period derivation.
//!
//! Biweekly periods always start on a Monday at most 13 days back.

use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use proptest::prelude::*;

use super::period::PeriodDeriver;
use crate::contract::PeriodType;

/// Strategy to generate calendar dates between 1990 and 2100.
fn date() -> impl Strategy<Value = NaiveDate> {
    (0i64..40_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + TimeDelta::days(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every date maps to a Monday fortnight start at most 13 days earlier.
    #[test]
    fn prop_fortnight_start_is_recent_monday(day in date()) {
        let start = PeriodDeriver::default().fortnight_start(day).unwrap();
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert!(start <= day);
        prop_assert!((day - start).num_days() < 14);
    }

    /// Dates 14 days apart fall in consecutive biweekly periods.
    #[test]
    fn prop_fortnights_step_by_fourteen(day in date()) {
        let deriver = PeriodDeriver::default();
        let here = deriver.fortnight_start(day).unwrap();
        let next = deriver.fortnight_start(day + TimeDelta::days(14)).unwrap();
        prop_assert_eq!(next - here, TimeDelta::days(14));
    }

    /// The period id depends only on the UTC date, not the time of day.
    #[test]
    fn prop_period_ignores_time_of_day(day in date(), secs in 0u32..86_400) {
        let deriver = PeriodDeriver::default();
        let midnight = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
        let later = midnight + TimeDelta::seconds(i64::from(secs));

        for period in [PeriodType::Weekly, PeriodType::Biweekly, PeriodType::Monthly] {
            prop_assert_eq!(
                deriver.period_id(midnight, period).unwrap(),
                deriver.period_id(later, period).unwrap()
            );
        }
    }
}
