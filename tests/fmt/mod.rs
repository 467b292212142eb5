use fdate::{date, datetime, DateTime};

#[test]
fn lenient_versus_strict() -> crate::Result {
    let dt = date(2024, 7, 14);
    assert_eq!(dt.format("%Y %J %"), "2024 %J %");
    assert!(dt.strftime("%Y %J").is_err());
    assert!(dt.strftime("%Y %").is_err());
    assert_eq!(dt.strftime("%Y %%")?, "2024 %");
    Ok(())
}

#[test]
fn names_are_case_insensitive() {
    let want = Some(date(2024, 7, 14));
    assert_eq!(DateTime::parse("SUN JUL 14 2024", "%a %b %d %Y"), want);
    assert_eq!(DateTime::parse("sunday july 14 2024", "%A %B %d %Y"), want);
}

#[test]
fn whitespace_is_flexible() {
    let want = Some(datetime(2024, 7, 14, 9, 5, 0, 0));
    assert_eq!(DateTime::parse("2024-07-14   9:05", "%F %H:%M"), want);
    assert_eq!(DateTime::parse("2024-07-14\t 9:05", "%F%t%k:%M"), want);
}

#[test]
fn two_digit_years() {
    assert_eq!(DateTime::parse("68", "%y").map(|dt| dt.year()), Some(2068));
    assert_eq!(DateTime::parse("69", "%y").map(|dt| dt.year()), Some(1969));
}

#[test]
fn unix_timestamps() -> crate::Result {
    let dt = DateTime::strptime("%s", "-86400")?;
    assert_eq!(dt, date(1969, 12, 31));
    assert_eq!(dt.format("%s"), "-86400");
    Ok(())
}
