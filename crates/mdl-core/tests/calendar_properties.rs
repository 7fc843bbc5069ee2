//! # Calendar Arithmetic Properties
//!
//! Property tests over the civil-date helpers that every licensing rule
//! depends on: ages are monotone in the reference date, and anniversaries
//! always land on the original month and day (or Feb 28 for leap days).

use chrono::{Datelike, NaiveDate};
use mdl_core::{age_on, anniversary_in_year};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=31).prop_filter_map("valid calendar date", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

proptest! {
    #[test]
    fn age_never_decreases(birth in arb_date(), offset in 0i64..40_000, step in 0i64..4_000) {
        let first = birth + chrono::Duration::days(offset);
        let later = first + chrono::Duration::days(step);
        let a = age_on(birth, first).unwrap();
        let b = age_on(birth, later).unwrap();
        prop_assert!(a <= b);
    }

    #[test]
    fn age_is_year_difference_on_anniversary(birth in arb_date(), years in 0i32..100) {
        let anniversary = anniversary_in_year(birth, birth.year() + years).unwrap();
        let age = age_on(birth, anniversary).unwrap().years();
        if birth.month() == 2 && birth.day() == 29 && anniversary.day() == 28 {
            prop_assert_eq!(age as i32, years - 1);
        } else {
            prop_assert_eq!(age as i32, years);
        }
    }

    #[test]
    fn anniversary_preserves_month(birth in arb_date(), year in 1900i32..2200) {
        let a = anniversary_in_year(birth, year).unwrap();
        prop_assert_eq!(a.year(), year);
        prop_assert_eq!(a.month(), birth.month());
        prop_assert!(a.day() == birth.day() || (birth.day() == 29 && a.day() == 28));
    }
}
