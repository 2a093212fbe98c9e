//! Property tests for timestamp normalization.

use chrono::NaiveDate;
use mimic_model::is_fixed_format_timestamp;
use mimic_transform::normalization::{format_timestamp, normalize_timestamp};
use proptest::prelude::*;

fn any_datetime() -> impl Strategy<Value = chrono::NaiveDateTime> {
    (1000i32..=9999, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, m, d, h, min, s)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(h, min, s))
                .unwrap()
        },
    )
}

proptest! {
    #[test]
    fn normalized_values_are_fixed_points(dt in any_datetime()) {
        let canonical = format_timestamp(dt);
        prop_assert!(is_fixed_format_timestamp(&canonical));
        prop_assert_eq!(normalize_timestamp(&canonical), Some(canonical));
    }

    #[test]
    fn iso_t_separator_normalizes(dt in any_datetime()) {
        let iso = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
        prop_assert_eq!(normalize_timestamp(&iso), Some(format_timestamp(dt)));
    }

    #[test]
    fn date_only_lands_on_midnight(dt in any_datetime()) {
        let date = dt.format("%Y-%m-%d").to_string();
        let expected = format!("{date} 00:00:00");
        prop_assert_eq!(normalize_timestamp(&date), Some(expected));
    }
}
