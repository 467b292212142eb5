use fdate::{Components, TimeSpan};

#[test]
fn unit_ratios() {
    assert_eq!(TimeSpan::from_days(1), TimeSpan::from_hours(24));
    assert_eq!(TimeSpan::from_hours(24), TimeSpan::from_minutes(1_440));
    assert_eq!(TimeSpan::from_minutes(1_440), TimeSpan::from_seconds(86_400));
    assert_eq!(
        TimeSpan::from_seconds(86_400),
        TimeSpan::from_milliseconds(86_400_000)
    );
}

#[test]
fn components_compose() -> crate::Result {
    let span = TimeSpan::try_new(1, 2, 3, 4, 5)?;
    let Components { days, hours, minutes, seconds, milliseconds } =
        span.components();
    let rebuilt = TimeSpan::try_new(
        days,
        hours.into(),
        minutes.into(),
        seconds.into(),
        milliseconds.into(),
    )?;
    assert_eq!(rebuilt, span);
    Ok(())
}

#[test]
fn sign_uniformity() {
    let span = TimeSpan::from_milliseconds(-93_784_005);
    let c = span.components();
    assert_eq!(
        (c.days, c.hours, c.minutes, c.seconds, c.milliseconds),
        (-1, -2, -3, -4, -5),
    );
    assert_eq!(span.total_hours(), -26);
    assert_eq!(span.total_minutes(), -1_563);
}

#[test]
fn mixed_signs_sum() {
    assert_eq!(TimeSpan::new(0, 1, -30, 0, 0), TimeSpan::from_minutes(30));
    assert_eq!(TimeSpan::new(1, -24, 0, 0, 0), TimeSpan::ZERO);
}

#[test]
fn arithmetic_identities() -> crate::Result {
    let a = TimeSpan::new(3, 4, 5, 6, 7);
    let b = TimeSpan::from_hours(-30);
    assert_eq!(a + b - b, a);
    assert_eq!(a - a, TimeSpan::ZERO);
    assert_eq!(a * 3, a + a + a);
    assert_eq!((a * 4) / 4, a);
    assert_eq!(-(-a), a);
    assert_eq!(a.checked_add(b)?, b.checked_add(a)?);
    assert_eq!([a, b, a].iter().sum::<TimeSpan>(), a * 2 + b);
    Ok(())
}

#[test]
fn division_of_whole_days() {
    assert_eq!(TimeSpan::from_days(6) / 2, TimeSpan::from_days(3));
    assert_eq!(TimeSpan::from_days(-6) / 2, TimeSpan::from_days(-3));
    assert_eq!(TimeSpan::from_days(1) / 24, TimeSpan::from_hours(1));
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(TimeSpan::from_milliseconds(7) / 2, TimeSpan::from_milliseconds(3));
    assert_eq!(
        TimeSpan::from_milliseconds(-7) / 2,
        TimeSpan::from_milliseconds(-3)
    );
}

#[test]
fn errors() {
    let err = TimeSpan::from_seconds(1).checked_div(0).unwrap_err();
    assert!(err.is_divide_by_zero());
    assert!(!err.is_range());
    insta::assert_snapshot!(err, @"time span division by zero");

    let err = TimeSpan::MAX.checked_add(TimeSpan::from_milliseconds(1)).unwrap_err();
    assert!(err.is_range());

    let err = TimeSpan::try_from_hours(i64::MAX).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"converting hours to milliseconds overflowed a 64-bit integer"
    );

    assert!(TimeSpan::MIN.checked_neg().is_err());
    assert!(TimeSpan::MIN.checked_div(-1).is_err());
}

#[test]
#[should_panic(expected = "dividing `TimeSpan` by zero")]
fn division_by_zero_panics() {
    let _ = TimeSpan::from_days(1) / 0;
}

#[test]
fn display() {
    insta::assert_snapshot!(TimeSpan::new(2, 3, 4, 5, 0), @"2d 03:04:05");
    insta::assert_snapshot!(TimeSpan::new(0, 0, 0, 1, 250), @"00:00:01.250");
    insta::assert_snapshot!(TimeSpan::new(0, -1, -30, 0, 0), @"-1:-30:00");
}

#[test]
fn ordering() {
    let mut spans = vec![
        TimeSpan::from_days(1),
        TimeSpan::from_milliseconds(-1),
        TimeSpan::ZERO,
        TimeSpan::MIN,
        TimeSpan::MAX,
    ];
    spans.sort();
    assert_eq!(
        spans,
        vec![
            TimeSpan::MIN,
            TimeSpan::from_milliseconds(-1),
            TimeSpan::ZERO,
            TimeSpan::from_days(1),
            TimeSpan::MAX,
        ]
    );
}

#[test]
fn std_duration() -> crate::Result {
    let span = TimeSpan::try_from(std::time::Duration::from_micros(1_500_999))?;
    assert_eq!(span, TimeSpan::from_milliseconds(1_500));
    let duration = std::time::Duration::try_from(span)?;
    assert_eq!(duration, std::time::Duration::from_millis(1_500));
    assert!(std::time::Duration::try_from(-span).is_err());
    Ok(())
}
