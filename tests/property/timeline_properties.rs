// Property-based tests for deadline derivation
// Random anchors and offsets must always yield a well-ordered timeline

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use meeting_timeline::services::timeline::AMENDMENT_CLOSE_LEAD_DAYS;
use meeting_timeline::{derive_timeline, FieldValue, TimelineConfig, TimelinePoint};
use proptest::prelude::*;

fn no_fields() -> HashMap<TimelinePoint, String> {
    HashMap::new()
}

fn anchor_strategy() -> impl Strategy<Value = String> {
    (1990..2100i32, 1..=12u32, 1..=28u32, 0..24u32, 0..60u32)
        .prop_map(|(y, m, d, h, min)| format!("{:04}-{:02}-{:02}T{:02}:{:02}", y, m, d, h, min))
}

fn config_strategy() -> impl Strategy<Value = TimelineConfig> {
    (
        0..60u32,
        0..30u32,
        0..30u32,
        0..10u32,
        0..10_000u32,
        0..30u32,
        0..30u32,
    )
        .prop_map(
            |(notice, stage1, stage2, gap, runoff, window, deadline_gap)| TimelineConfig {
                notice_days: notice,
                stage1_days: stage1,
                stage2_days: stage2,
                stage_gap_days: gap,
                runoff_minutes: runoff,
                motion_window_days: window,
                motion_deadline_gap_days: deadline_gap,
            },
        )
}

fn point_strategy() -> impl Strategy<Value = TimelinePoint> {
    (1..TimelinePoint::ALL.len()).prop_map(|i| TimelinePoint::ALL[i])
}

proptest! {
    /// Property: walking back from the anchor, every point is no later than the one it derives from
    #[test]
    fn prop_derived_points_descend(anchor in anchor_strategy(), config in config_strategy()) {
        let timeline = derive_timeline(&anchor, &config, &no_fields(), false).unwrap();
        let get = |point| timeline.computed(point).unwrap();

        prop_assert!(get(TimelinePoint::Stage2Opens) <= get(TimelinePoint::Stage2Closes));
        prop_assert!(get(TimelinePoint::Stage1Closes) <= get(TimelinePoint::Stage2Opens));
        prop_assert!(get(TimelinePoint::Stage1Opens) <= get(TimelinePoint::Stage1Closes));
        prop_assert!(get(TimelinePoint::NoticeDate) <= get(TimelinePoint::Stage1Opens));
        prop_assert!(get(TimelinePoint::MotionsClosesAt) <= get(TimelinePoint::NoticeDate));
        prop_assert!(get(TimelinePoint::MotionsOpensAt) <= get(TimelinePoint::MotionsClosesAt));
        prop_assert_eq!(get(TimelinePoint::AmendmentsOpensAt), get(TimelinePoint::NoticeDate));
        prop_assert!(get(TimelinePoint::AmendmentsClosesAt) <= get(TimelinePoint::Stage1Opens));
    }

    /// Property: with the default config the gaps are exactly the configured offsets
    #[test]
    fn prop_default_offsets_are_exact(anchor in anchor_strategy()) {
        let config = TimelineConfig::default();
        let timeline = derive_timeline(&anchor, &config, &no_fields(), false).unwrap();
        let get = |point| timeline.computed(point).unwrap();

        prop_assert_eq!(
            get(TimelinePoint::Stage2Closes) - get(TimelinePoint::Stage2Opens),
            Duration::days(5)
        );
        prop_assert_eq!(
            get(TimelinePoint::Stage2Opens) - get(TimelinePoint::Stage1Closes),
            Duration::days(1) + Duration::minutes(2880)
        );
        prop_assert_eq!(
            get(TimelinePoint::Stage1Opens) - get(TimelinePoint::AmendmentsClosesAt),
            Duration::days(i64::from(AMENDMENT_CLOSE_LEAD_DAYS))
        );
    }

    /// Property: feeding the output back in changes nothing
    #[test]
    fn prop_second_run_is_idempotent(anchor in anchor_strategy(), config in config_strategy()) {
        let first = derive_timeline(&anchor, &config, &no_fields(), false).unwrap();
        let existing: HashMap<_, _> = first.to_field_values().into_iter().collect();
        let second = derive_timeline(&anchor, &config, &existing, false).unwrap();

        prop_assert_eq!(second.to_field_values(), first.to_field_values());
        prop_assert!(second.changes().is_empty());
    }

    /// Property: force mode ignores whatever the fields held
    #[test]
    fn prop_force_ignores_existing(
        anchor in anchor_strategy(),
        junk in proptest::collection::vec("[a-z0-9:-]{1,16}", 9),
    ) {
        let existing: HashMap<_, _> = TimelinePoint::ALL.into_iter().zip(junk).collect();
        let config = TimelineConfig::default();

        let forced = derive_timeline(&anchor, &config, &existing, true).unwrap();
        let fresh = derive_timeline(&anchor, &config, &no_fields(), false).unwrap();

        prop_assert_eq!(forced, fresh);
    }

    /// Property: one pre-filled point is kept verbatim and every other point matches a fresh run
    #[test]
    fn prop_single_prefill_preserved_without_chaining(
        anchor in anchor_strategy(),
        point in point_strategy(),
        value in "[a-z0-9 :-]{1,20}",
    ) {
        prop_assume!(!value.trim().is_empty());
        let config = TimelineConfig::default();
        let mut existing = HashMap::new();
        existing.insert(point, value.clone());

        let partial = derive_timeline(&anchor, &config, &existing, false).unwrap();
        let fresh = derive_timeline(&anchor, &config, &no_fields(), false).unwrap();

        for other in TimelinePoint::ALL {
            if other == point {
                prop_assert_eq!(partial.get(other), Some(&FieldValue::Preserved(value.clone())));
            } else {
                prop_assert_eq!(partial.get(other), fresh.get(other));
            }
        }
    }

    /// Property: anchors without a date never produce a timeline
    #[test]
    fn prop_non_dates_are_rejected(anchor in "[a-zA-Z ]{0,24}") {
        prop_assert!(derive_timeline(&anchor, &TimelineConfig::default(), &no_fields(), false).is_err());
    }

    /// Property: minutes in the anchor survive every whole-day step
    #[test]
    fn prop_wall_clock_time_is_kept(
        y in 2000..2050i32, m in 1..=12u32, d in 1..=28u32, h in 0..24u32, min in 0..60u32,
    ) {
        let anchor = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap();
        let text = anchor.format("%Y-%m-%dT%H:%M").to_string();
        let timeline = derive_timeline(&text, &TimelineConfig::default(), &no_fields(), false).unwrap();

        for point in TimelinePoint::ALL {
            prop_assert_eq!(timeline.computed(point).unwrap().time(), anchor.time());
        }
    }
}
