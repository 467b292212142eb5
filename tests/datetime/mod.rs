use fdate::{date, datetime, DateTime, FixedClock, TimeSpan, Weekday};

#[test]
fn construct_and_extract() -> crate::Result {
    let dt = DateTime::new(1999, 12, 31, 23, 59, 59, 999)?;
    assert_eq!(
        (dt.year(), dt.month(), dt.day()),
        (1999, 12, 31),
    );
    assert_eq!(
        (dt.hour(), dt.minute(), dt.second(), dt.millisecond()),
        (23, 59, 59, 999),
    );
    assert_eq!(dt + TimeSpan::from_milliseconds(1), date(2000, 1, 1));
    Ok(())
}

#[test]
fn pre_epoch_extraction() {
    let dt = DateTime::from_timestamp_millis(-1);
    assert_eq!(dt.year(), 1969);
    assert_eq!(dt.month(), 12);
    assert_eq!(dt.day(), 31);
    assert_eq!(dt.hour(), 23);
    assert_eq!(dt.minute(), 59);
    assert_eq!(dt.second(), 59);
    assert_eq!(dt.millisecond(), 999);

    let dt = date(1900, 3, 1);
    assert_eq!(dt.weekday(), Weekday::Thursday);
    assert_eq!(dt - TimeSpan::from_days(1), date(1900, 2, 28));
}

#[test]
fn add_days_across_month_and_leap_year() {
    assert_eq!(date(2022, 1, 31) + TimeSpan::from_days(1), date(2022, 2, 1));
    assert_eq!(
        date(2020, 2, 29) + TimeSpan::from_days(366),
        date(2021, 3, 1)
    );
    assert_eq!(date(2021, 3, 1) - date(2020, 2, 29), TimeSpan::from_days(366));
}

#[test]
fn calendar_overflow_normalizes() {
    assert_eq!(date(2024, 14, 1), date(2025, 2, 1));
    assert_eq!(date(2024, 2, 30), date(2024, 3, 1));
    assert_eq!(date(2023, 2, 29), date(2023, 3, 1));
    assert_eq!(datetime(2024, 12, 31, 23, 59, 60, 0), date(2025, 1, 1));
    assert_eq!(datetime(2024, 1, 1, -1, 0, 0, 0), datetime(2023, 12, 31, 23, 0, 0, 0));
}

#[test]
fn leap_years() {
    for (year, leap) in [(1600, true), (1700, false), (2000, true), (2100, false), (2024, true), (2023, false)] {
        assert_eq!(date(year, 1, 1).in_leap_year(), leap, "year {year}");
        let feb = date(year, 2, 1).days_in_month();
        assert_eq!(feb, if leap { 29 } else { 28 }, "year {year}");
    }
}

#[test]
fn format_directives() {
    let dt = datetime(2024, 9, 5, 21, 7, 3, 250);
    insta::assert_snapshot!(
        dt.format("%A %a %B %b %C %D %d %e %F %f %H %I %j %k %l %M %m %P %p %R %S %s %T %u %w %Y %y %%"),
        @"Thursday Thu September Sep 20 09/05/24 05  5 2024-09-05 000 21 09 249 21  9 07 09 pm PM 21:07 03 1725570423 21:07:03 4 4 2024 24 %"
    );
    insta::assert_snapshot!(
        dt.format_with_milliseconds("%S|%T|%f"),
        @"03.250|21:07:03.250|250"
    );
}

#[test]
fn parse_format_roundtrip() {
    let patterns = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %I:%M:%S %p",
        "%a, %d %b %Y %T",
        "%A %B %e %Y %k:%M:%S",
        "%Y%j %H%M%S",
    ];
    let dt = datetime(2024, 2, 29, 13, 5, 9, 0);
    for pattern in patterns {
        let text = dt.format(pattern);
        let got = DateTime::parse(&text, pattern);
        assert_eq!(got, Some(dt), "pattern {pattern:?} via {text:?}");
    }

    let dt = datetime(1969, 7, 20, 20, 17, 40, 123);
    let text = dt.format_with_milliseconds("%Y-%m-%d %H:%M:%S");
    assert_eq!(text, "1969-07-20 20:17:40.123");
    assert_eq!(DateTime::parse_default(&text), Some(dt));
}

#[test]
fn parse_failures() {
    let cases = [
        ("", "%Y"),
        ("abcd", "%Y"),
        ("2024-07-14", "%Y-%m-%d %H"),
        ("2024-07-14 extra", "%Y-%m-%d"),
        ("2024-00-14", "%Y-%m-%d"),
        ("2024-04-31", "%Y-%m-%d"),
        ("2024-07-14 12:60", "%Y-%m-%d %H:%M"),
        ("Mon 2024-07-14", "%a %Y-%m-%d"),
        ("2024 11:00", "%Y %I:%M"),
        ("20", "%C"),
    ];
    for (input, format) in cases {
        assert_eq!(DateTime::parse(input, format), None, "{input:?} {format:?}");
    }
}

#[test]
fn parse_default_rejects_garbage() {
    assert_eq!(DateTime::parse_default("not a date"), None);
    assert_eq!(DateTime::parse_default("2022-01-XX"), None);
    assert_eq!(DateTime::parse_default("2022-01-31"), None);
    assert_eq!(
        DateTime::parse_default("2022-01-31 12:34:56"),
        Some(datetime(2022, 1, 31, 12, 34, 56, 0)),
    );
}

#[test]
fn format_default_drops_milliseconds() {
    let dt = datetime(2022, 1, 31, 12, 34, 56, 789);
    assert_eq!(dt.format_default(), "2022-01-31 12:34:56");
    assert_eq!(dt.to_string(), "2022-01-31 12:34:56");
}

#[test]
fn strptime_errors() {
    let err = DateTime::strptime("%H:%M", "12:61").unwrap_err();
    assert!(err.is_range());

    insta::assert_snapshot!(
        DateTime::strptime("%Y-%m-%d", "2024-07-14 extra").unwrap_err(),
        @"strptime expects to consume the entire input, but ` extra` remains unparsed"
    );
    insta::assert_snapshot!(
        DateTime::strptime("%Y-%m-%d %H:%M", "2024-07-14 12:61").unwrap_err(),
        @"strptime parsing failed: %M failed: failed to parse minute number: parameter 'minute' with value 61 is not in the required range of 0..=59"
    );
}

#[test]
fn display_and_iso() {
    let dt = datetime(2024, 7, 14, 16, 24, 59, 5);
    assert_eq!(dt.to_string(), "2024-07-14 16:24:59");
    assert_eq!(dt.format_default(), "2024-07-14 16:24:59");
    assert_eq!(dt.to_iso_string(), "2024-07-14T16:24:59");
    assert_eq!(dt.to_iso_string_millis(), "2024-07-14T16:24:59.005");
    let parsed: DateTime = dt.to_iso_string_millis().parse().unwrap();
    assert_eq!(parsed, dt);
}

#[test]
fn ordering_is_total() {
    let a = date(1969, 12, 31);
    let b = DateTime::UNIX_EPOCH;
    let c = datetime(1970, 1, 1, 0, 0, 0, 1);
    assert!(a < b && b < c);
    assert_eq!(a.max(c), c);
    assert_eq!(c - a, TimeSpan::new(1, 0, 0, 0, 1));
}

#[test]
fn clock_injection() {
    let clock = FixedClock::new(-86_400_000);
    assert_eq!(DateTime::now_with(&clock), date(1969, 12, 31));
}

#[test]
fn arithmetic_overflow() {
    let max = DateTime::from_timestamp_millis(i64::MAX);
    let err = max.checked_add(TimeSpan::from_days(1)).unwrap_err();
    assert!(err.is_range());
    insta::assert_snapshot!(err, @"adding time span overflowed datetime");

    let min = DateTime::from_timestamp_millis(i64::MIN);
    let err = min.checked_sub(TimeSpan::from_days(1)).unwrap_err();
    insta::assert_snapshot!(err, @"subtracting time span overflowed datetime");
}
