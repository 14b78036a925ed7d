//! Property tests for the accrual calculator.

use chrono::{Duration, TimeZone, Utc};
use nicoboo_core::accrual::{compute, DurationBreakdown, SECS_PER_DAY};
use nicoboo_core::{Profile, SmokingType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn breakdown_recomposes_elapsed_seconds(elapsed in 0u64..(200 * 365 * SECS_PER_DAY)) {
        let b = DurationBreakdown::from_secs(elapsed);
        prop_assert_eq!(
            b.days * 86_400 + b.hours * 3_600 + b.minutes * 60 + b.seconds,
            elapsed
        );
        prop_assert!(b.hours < 24);
        prop_assert!(b.minutes < 60);
        prop_assert!(b.seconds < 60);
    }

    #[test]
    fn compute_floors_partial_seconds(secs in 0i64..10_000_000, millis in 0i64..1000) {
        let stop = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let now = stop + Duration::seconds(secs) + Duration::milliseconds(millis);
        let snap = compute(&Profile::new(SmokingType::Smoke, stop), now);
        prop_assert_eq!(snap.breakdown.total_secs(), secs as u64);
        prop_assert_eq!(snap.units_avoided, 0);
        prop_assert_eq!(snap.money_saved, 0.0);
    }

    #[test]
    fn units_and_money_never_decrease(
        per_day in 1u32..80,
        per_pack in 1u32..40,
        price in 0.0f64..50.0,
        earlier in 0i64..5_000_000,
        extra in 0i64..5_000_000,
    ) {
        let stop = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut profile = Profile::new(SmokingType::Smoke, stop);
        profile.cigarettes_per_day = Some(per_day);
        profile.cigarettes_per_pack = Some(per_pack);
        profile.price_per_pack = Some(price);

        let a = compute(&profile, stop + Duration::seconds(earlier));
        let b = compute(&profile, stop + Duration::seconds(earlier + extra));
        prop_assert!(b.units_avoided >= a.units_avoided);
        prop_assert!(b.money_saved >= a.money_saved);
        prop_assert!(a.money_saved >= 0.0);
    }

    #[test]
    fn future_stop_date_is_zero(ahead in 1i64..10_000_000) {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let mut profile = Profile::new(SmokingType::Both, now + Duration::seconds(ahead));
        profile.cigarettes_per_day = Some(20);
        profile.pods_per_day = Some(2);
        let snap = compute(&profile, now);
        prop_assert_eq!(snap.breakdown, DurationBreakdown::default());
        prop_assert_eq!(snap.units_avoided, 0);
    }
}
