use std::ffi::{c_char, c_int};

use fdate::ffi::*;

fn format(dt: i64, pattern: &str, size: usize) -> String {
    let mut buf = vec![b'?' as c_char; size.max(1)];
    unsafe {
        f_datetime_format(
            dt,
            pattern.as_ptr().cast(),
            buf.as_mut_ptr(),
            pattern.len() as c_int,
            size as c_int,
        );
    }
    let bytes: Vec<u8> =
        buf.iter().map(|&b| b as u8).take_while(|&b| b != 0).collect();
    String::from_utf8(bytes).unwrap()
}

fn parse(input: &str, pattern: &str) -> i64 {
    unsafe {
        f_datetime_parse(
            input.as_ptr().cast(),
            pattern.as_ptr().cast(),
            input.len() as c_int,
            pattern.len() as c_int,
        )
    }
}

#[test]
fn parse_then_format() {
    let _ = env_logger::try_init();

    let dt = parse("14/07/2024 16:24", "%d/%m/%Y %H:%M");
    assert_ne!(dt, f_invalid_timestamp());
    assert_eq!(format(dt, "%Y-%m-%dT%H:%M", 64), "2024-07-14T16:24");
    // Truncated to `buffer_size - 1` bytes.
    assert_eq!(format(dt, "%Y-%m-%dT%H:%M", 5), "2024");
}

#[test]
fn parse_failure_is_sentinel() {
    let _ = env_logger::try_init();

    assert_eq!(parse("2024-13-01", "%Y-%m-%d"), f_invalid_timestamp());
    assert_eq!(parse("not a date", "%Y"), f_invalid_timestamp());
}

#[test]
fn sentinel_for_undefined_arithmetic() {
    let invalid = f_invalid_timestamp();
    assert_eq!(f_timespan_divide(f_timespan_from_days(1), 0), invalid);
    assert_eq!(f_timespan_from_days(i64::MAX / 1_000), invalid);
    assert_eq!(f_datetime_subtract_timespan(i64::MIN, 1), invalid);
    assert_eq!(f_datetime_create(-1, 1, 1, 0, 0, 0, 0), invalid);
}

#[test]
fn difference_matches_core() {
    let a = f_datetime_create(2024, 1, 1, 0, 0, 0, 0);
    let b = f_datetime_create(2024, 3, 1, 12, 0, 0, 0);
    let diff = f_datetime_difference(b, a);
    assert_eq!(f_timespan_get_days(diff), 60);
    assert_eq!(f_timespan_get_hours(diff), 12);
    assert_eq!(f_datetime_add_timespan(a, diff), b);
}
