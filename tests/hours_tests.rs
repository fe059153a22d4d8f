use sheetclock::core::hours::{format_hours, hours_between};

#[test]
fn test_full_day_shift() {
    assert_eq!(hours_between("09:00:00 AM", "05:30:00 PM"), Some(8.5));
    assert_eq!(
        format_hours(hours_between("09:00:00 AM", "05:30:00 PM")),
        "8.50"
    );
}

#[test]
fn test_empty_sides_yield_nothing() {
    assert_eq!(hours_between("09:00:00 AM", ""), None);
    assert_eq!(hours_between("", "05:30:00 PM"), None);
    assert_eq!(hours_between("", ""), None);
    assert_eq!(hours_between("   ", "05:30:00 PM"), None);
    assert_eq!(format_hours(None), "");
}

#[test]
fn test_unparsable_input_yields_nothing() {
    assert_eq!(hours_between("9am", "05:30:00 PM"), None);
    assert_eq!(hours_between("09:00 AM", "05:30:00 PM"), None);
    assert_eq!(hours_between("09:00:00 AM", "17:30:00"), None);
}

#[test]
fn test_seconds_are_counted_and_rounded() {
    assert_eq!(hours_between("02:15:30 PM", "03:15:30 PM"), Some(1.0));
    // 20 minutes = 0.333.. h
    assert_eq!(hours_between("09:00:00 AM", "09:20:00 AM"), Some(0.33));
    // 40 minutes = 0.666.. h
    assert_eq!(hours_between("09:00:00 AM", "09:40:00 AM"), Some(0.67));
    // 45 seconds
    assert_eq!(hours_between("09:00:00 AM", "09:00:45 AM"), Some(0.01));
}

#[test]
fn test_elapsed_matches_seconds_over_3600() {
    // start 07:05:10 AM, end in whole-minute steps up to 11:05:10 AM
    for minutes in [1_i64, 7, 30, 59, 61, 125, 240] {
        let total = 7 * 3600 + 5 * 60 + 10 + minutes * 60;
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        let end = format!("{:02}:{:02}:{:02} AM", h, m, s);

        let expected = ((minutes * 60) as f64 / 3600.0 * 100.0).round() / 100.0;
        assert_eq!(hours_between("07:05:10 AM", &end), Some(expected), "end {end}");
    }
}

#[test]
fn test_noon_and_midnight_markers() {
    assert_eq!(hours_between("11:30:00 AM", "12:30:00 PM"), Some(1.0));
    assert_eq!(hours_between("12:00:00 AM", "06:00:00 AM"), Some(6.0));
}

#[test]
fn test_shift_crossing_midnight_wraps() {
    assert_eq!(hours_between("10:00:00 PM", "06:00:00 AM"), Some(8.0));
    assert_eq!(hours_between("11:45:00 PM", "12:15:00 AM"), Some(0.5));
}

#[test]
fn test_lowercase_markers_parse() {
    assert_eq!(hours_between("09:00:00 am", "05:30:00 pm"), Some(8.5));
}
