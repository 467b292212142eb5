use alloc::string::String;

use crate::{
    clock::Clock,
    error::{datetime::Error as E, Error},
    fmt::strtime::{self, BrokenDownTime, Config},
    util::itime::{self, IDate, IDateTime, ITimestamp, MILLIS_PER_DAY},
    TimeSpan, Weekday,
};

/// The pattern used by [`DateTime::parse_default`],
/// [`DateTime::format_default`] and the `Display` impl.
const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// The pattern used by the ISO 8601 routines.
const ISO_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// A point in time, as a count of milliseconds since the Unix epoch.
///
/// The calendar is the proleptic Gregorian calendar and the time scale is
/// UTC without leap seconds. Every `i64` is a valid `DateTime`, so this type
/// covers roughly 292 million years on either side of 1970.
///
/// # Construction
///
/// A datetime can be built from its civil components with [`DateTime::new`]
/// (or the [`date`] and [`datetime`] shorthands), from a raw timestamp with
/// [`DateTime::from_timestamp_millis`], from the current time with
/// [`DateTime::now`], or by parsing with [`DateTime::parse`].
///
/// Civil components that are out of range are normalized rather than
/// rejected:
///
/// ```
/// use fdate::{date, datetime};
///
/// // Month 13 is January of the following year.
/// assert_eq!(date(2023, 13, 1), date(2024, 1, 1));
/// // Day 0 is the last day of the prior month.
/// assert_eq!(date(2024, 3, 0), date(2024, 2, 29));
/// // Hour 25 is 1 o'clock on the next day.
/// assert_eq!(datetime(2024, 7, 14, 25, 0, 0, 0), datetime(2024, 7, 15, 1, 0, 0, 0));
/// ```
///
/// # Parsing and formatting
///
/// Parsing and formatting use `strftime` style format strings. See the
/// [`fmt`](crate::fmt) module for the supported directives.
///
/// ```
/// use fdate::{datetime, DateTime};
///
/// let dt = DateTime::parse("2024-07-14 16:24:59.005", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(dt, datetime(2024, 7, 14, 16, 24, 59, 5));
/// assert_eq!(dt.format("%a %b %e %H:%M:%S %Y"), "Sun Jul 14 16:24:59 2024");
/// assert_eq!(dt.format_with_milliseconds("%T"), "16:24:59.005");
/// ```
///
/// # Arithmetic
///
/// A [`TimeSpan`] can be added to or subtracted from a datetime, and
/// subtracting two datetimes gives the `TimeSpan` between them. The
/// operators panic on overflow. [`DateTime::checked_add`],
/// [`DateTime::checked_sub`] and [`DateTime::since`] return an error instead.
///
/// ```
/// use fdate::{date, TimeSpan};
///
/// let dt = date(2024, 2, 28) + TimeSpan::from_days(1);
/// assert_eq!(dt, date(2024, 2, 29));
/// assert_eq!(date(2024, 3, 1) - dt, TimeSpan::from_days(1));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
    millis: i64,
}

impl DateTime {
    /// The Unix epoch, `1970-01-01 00:00:00`.
    pub const UNIX_EPOCH: DateTime = DateTime { millis: 0 };

    /// The timestamp reserved by the C interface to mean "no value".
    ///
    /// This is `-(2^63 - 1)`. Nothing in this crate treats it specially
    /// except the `ffi` module. In particular, it's a valid `DateTime`.
    pub const INVALID_TIMESTAMP: i64 = -i64::MAX;

    /// Creates a datetime from its civil components.
    ///
    /// Components outside their usual ranges are normalized. Months outside
    /// of `1..=12` carry into the year, then the day is counted from the
    /// first of that month, then the clock time is counted from midnight of
    /// that day. Any component may be negative.
    ///
    /// # Errors
    ///
    /// When the result doesn't fit in a 64-bit count of milliseconds.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::DateTime;
    ///
    /// let dt = DateTime::new(2024, 1, 32, 0, 0, 0, 0)?;
    /// assert_eq!(dt.to_string(), "2024-02-01 00:00:00");
    ///
    /// let dt = DateTime::new(2024, 1, 1, 0, 0, 0, -1)?;
    /// assert_eq!(dt.to_iso_string_millis(), "2023-12-31T23:59:59.999");
    ///
    /// assert!(DateTime::new(i32::MAX, 1, 1, 0, 0, 0, 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Result<DateTime, Error> {
        let epoch_day =
            IDate::normalize(year, i64::from(month), i64::from(day))
                .ok_or(E::OverflowCivil)?;
        let millis = i128::from(epoch_day.epoch_day)
            * i128::from(MILLIS_PER_DAY)
            + i128::from(hour) * 3_600_000
            + i128::from(minute) * 60_000
            + i128::from(second) * 1_000
            + i128::from(millisecond);
        let millis = i64::try_from(millis).map_err(|_| E::OverflowCivil)?;
        Ok(DateTime { millis })
    }

    /// Creates a datetime at midnight of the given date.
    ///
    /// This normalizes the same way as [`DateTime::new`].
    ///
    /// # Errors
    ///
    /// When the result doesn't fit in a 64-bit count of milliseconds.
    #[inline]
    pub fn from_date(year: i32, month: i32, day: i32) -> Result<DateTime, Error> {
        DateTime::new(year, month, day, 0, 0, 0, 0)
    }

    /// Creates a datetime from milliseconds since the Unix epoch.
    ///
    /// This never fails.
    #[inline]
    pub const fn from_timestamp_millis(millis: i64) -> DateTime {
        DateTime { millis }
    }

    /// Returns the number of milliseconds since the Unix epoch.
    #[inline]
    pub const fn timestamp_millis(self) -> i64 {
        self.millis
    }

    /// Returns the current time according to the system clock.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::{date, DateTime};
    ///
    /// assert!(DateTime::now() > date(2020, 1, 1));
    /// ```
    #[cfg(feature = "std")]
    pub fn now() -> DateTime {
        DateTime::now_with(&crate::clock::SystemClock)
    }

    /// Returns the current time according to the given clock.
    pub fn now_with<C: Clock + ?Sized>(clock: &C) -> DateTime {
        DateTime::from_timestamp_millis(clock.now_millis())
    }

    /// Parses `input` according to the strftime style `format` string.
    ///
    /// When the fourth to last byte of `input` is a `.`, then `%S` also
    /// parses a fractional second of 1 to 3 digits. Otherwise, `%S` parses
    /// whole seconds only. (`%f` always parses a fractional second.)
    ///
    /// This returns `None` when the input doesn't match the format string,
    /// when a parsed field is out of range, or when the input isn't
    /// entirely consumed. Use [`DateTime::strptime`] to find out why parsing
    /// failed.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::{datetime, DateTime};
    ///
    /// let dt = DateTime::parse("14/07/2024 16:24", "%d/%m/%Y %H:%M");
    /// assert_eq!(dt, Some(datetime(2024, 7, 14, 16, 24, 0, 0)));
    ///
    /// let dt = DateTime::parse("2024-07-14 16:24:59.500", "%F %T");
    /// assert_eq!(dt, Some(datetime(2024, 7, 14, 16, 24, 59, 500)));
    ///
    /// assert_eq!(DateTime::parse("2024-07-14 junk", "%F"), None);
    /// assert_eq!(DateTime::parse("2024-02-30", "%F"), None);
    /// ```
    pub fn parse(input: &str, format: &str) -> Option<DateTime> {
        let bytes = input.as_bytes();
        let milliseconds =
            bytes.len() >= 4 && bytes[bytes.len() - 4] == b'.';
        let config = Config::new().milliseconds(milliseconds);
        let result =
            BrokenDownTime::parse(format.as_bytes(), bytes, config)
                .and_then(|tm| tm.to_datetime());
        match result {
            Ok(dt) => Some(dt),
            Err(_err) => {
                trace!(
                    "failed to parse {input:?} with format {format:?}: {_err}",
                );
                None
            }
        }
    }

    /// Parses `input` with the default pattern, `%Y-%m-%d %H:%M:%S`.
    ///
    /// This follows the same rules as [`DateTime::parse`].
    #[inline]
    pub fn parse_default(input: &str) -> Option<DateTime> {
        DateTime::parse(input, DEFAULT_PATTERN)
    }

    /// Parses `input` according to the strftime style `format` string, and
    /// returns an error describing the problem when parsing fails.
    ///
    /// Unlike [`DateTime::parse`], `%S` always accepts an optional
    /// fractional second.
    ///
    /// # Errors
    ///
    /// When the format string is invalid, when the input doesn't match it,
    /// when a field is out of range or inconsistent with another, or when
    /// there's unparsed input remaining.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::DateTime;
    ///
    /// let err = DateTime::strptime("%Y-%m-%d", "2024-02-30").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid date: parameter 'day' with value 30 \
    ///      is not in the required range of 1..=29",
    /// );
    /// ```
    pub fn strptime(
        format: impl AsRef<[u8]>,
        input: impl AsRef<[u8]>,
    ) -> Result<DateTime, Error> {
        let config = Config::new().milliseconds(true);
        BrokenDownTime::parse(format.as_ref(), input.as_ref(), config)?
            .to_datetime()
    }

    /// Returns the year.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::DateTime;
    ///
    /// // One millisecond before the epoch is still in 1969.
    /// assert_eq!(DateTime::from_timestamp_millis(-1).year(), 1969);
    /// ```
    #[inline]
    pub fn year(self) -> i32 {
        self.to_idatetime().date.year
    }

    /// Returns the month, in the range `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.to_idatetime().date.month
    }

    /// Returns the day of the month, in the range `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.to_idatetime().date.day
    }

    /// Returns the hour, in the range `0..=23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.to_idatetime().time.hour
    }

    /// Returns the minute, in the range `0..=59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.to_idatetime().time.minute
    }

    /// Returns the second, in the range `0..=59`.
    #[inline]
    pub fn second(self) -> i8 {
        self.to_idatetime().time.second
    }

    /// Returns the millisecond, in the range `0..=999`.
    #[inline]
    pub fn millisecond(self) -> i16 {
        self.to_idatetime().time.millisecond
    }

    /// Returns the day of the week.
    #[inline]
    pub fn weekday(self) -> Weekday {
        let epoch_day = self.to_idatetime().date.to_epoch_day();
        Weekday::from_sunday_zero_offset_unchecked(
            epoch_day.weekday_sunday_zero(),
        )
    }

    /// Returns the ordinal day of the year, in the range `1..=366`.
    #[inline]
    pub fn day_of_year(self) -> i16 {
        self.to_idatetime().date.day_of_year()
    }

    /// Returns true when this datetime's year is a leap year.
    #[inline]
    pub fn in_leap_year(self) -> bool {
        itime::is_leap_year(self.year())
    }

    /// Returns the number of days in this datetime's month.
    #[inline]
    pub fn days_in_month(self) -> i8 {
        let date = self.to_idatetime().date;
        itime::days_in_month(date.year, date.month)
    }

    /// Returns midnight at the start of this datetime's day.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::{date, datetime};
    ///
    /// let dt = datetime(1969, 12, 31, 23, 59, 59, 999);
    /// assert_eq!(dt.start_of_day(), date(1969, 12, 31));
    /// ```
    #[inline]
    pub fn start_of_day(self) -> DateTime {
        let millis = self.millis - self.millis.rem_euclid(MILLIS_PER_DAY);
        DateTime { millis }
    }

    /// Formats this datetime according to the strftime style `format`
    /// string. Milliseconds are ignored, so `%S` is whole seconds.
    ///
    /// An invalid directive is written literally instead of failing. Use
    /// [`DateTime::strftime`] to get an error instead.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::datetime;
    ///
    /// let dt = datetime(2024, 7, 14, 16, 24, 59, 999);
    /// assert_eq!(dt.format("%Y-%m-%d %H:%M:%S"), "2024-07-14 16:24:59");
    /// assert_eq!(dt.format("%Y %Q"), "2024 %Q");
    /// ```
    pub fn format(self, format: &str) -> String {
        let config = Config::new().lenient(true).floor_seconds(true);
        self.format_with_config(config, format)
    }

    /// Like [`DateTime::format`], but `%S` (and `%T`) include milliseconds
    /// as `SS.mmm`.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::datetime;
    ///
    /// let dt = datetime(2024, 7, 14, 16, 24, 59, 5);
    /// assert_eq!(dt.format_with_milliseconds("%H:%M:%S"), "16:24:59.005");
    /// ```
    pub fn format_with_milliseconds(self, format: &str) -> String {
        let config = Config::new().lenient(true).milliseconds(true);
        self.format_with_config(config, format)
    }

    /// Formats this datetime with the default pattern, `%Y-%m-%d %H:%M:%S`.
    ///
    /// This is the same as the `Display` impl.
    #[inline]
    pub fn format_default(self) -> String {
        self.format(DEFAULT_PATTERN)
    }

    /// Formats this datetime as `%Y-%m-%dT%H:%M:%S`.
    #[inline]
    pub fn to_iso_string(self) -> String {
        self.format(ISO_PATTERN)
    }

    /// Formats this datetime as `%Y-%m-%dT%H:%M:%S.mmm`.
    #[inline]
    pub fn to_iso_string_millis(self) -> String {
        self.format_with_milliseconds(ISO_PATTERN)
    }

    /// Like [`DateTime::format`], but an invalid format string is reported
    /// as an error.
    ///
    /// # Errors
    ///
    /// When the format string contains an unknown directive or ends with a
    /// `%`.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::date;
    ///
    /// assert_eq!(date(2024, 7, 14).strftime("%A")?, "Sunday");
    /// assert!(date(2024, 7, 14).strftime("%Q").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(self, format: &str) -> Result<String, Error> {
        let mut buf = String::new();
        let config = Config::new().floor_seconds(true);
        strtime::format(config, format, self, &mut buf)?;
        Ok(buf)
    }

    /// Like [`DateTime::strftime`], but `%S` (and `%T`) include
    /// milliseconds as `SS.mmm`.
    ///
    /// # Errors
    ///
    /// When the format string contains an unknown directive or ends with a
    /// `%`.
    pub fn strftime_with_milliseconds(
        self,
        format: &str,
    ) -> Result<String, Error> {
        let mut buf = String::new();
        let config = Config::new().milliseconds(true);
        strtime::format(config, format, self, &mut buf)?;
        Ok(buf)
    }

    /// Adds a time span to this datetime.
    ///
    /// # Errors
    ///
    /// When the result overflows.
    #[inline]
    pub fn checked_add(self, span: TimeSpan) -> Result<DateTime, Error> {
        let millis = self
            .millis
            .checked_add(span.total_milliseconds())
            .ok_or(E::OverflowAddSpan)?;
        Ok(DateTime { millis })
    }

    /// Subtracts a time span from this datetime.
    ///
    /// # Errors
    ///
    /// When the result overflows.
    #[inline]
    pub fn checked_sub(self, span: TimeSpan) -> Result<DateTime, Error> {
        let millis = self
            .millis
            .checked_sub(span.total_milliseconds())
            .ok_or(E::OverflowSubSpan)?;
        Ok(DateTime { millis })
    }

    /// Returns the time span from `other` to this datetime. The span is
    /// negative when `other` is later.
    ///
    /// # Errors
    ///
    /// When the difference overflows a 64-bit count of milliseconds.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::{date, DateTime, TimeSpan};
    ///
    /// let span = date(2024, 1, 1).since(date(2023, 1, 1))?;
    /// assert_eq!(span, TimeSpan::from_days(365));
    ///
    /// let (min, max) = (DateTime::from_timestamp_millis(i64::MIN), DateTime::from_timestamp_millis(i64::MAX));
    /// assert!(max.since(min).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn since(self, other: DateTime) -> Result<TimeSpan, Error> {
        let millis =
            self.millis.checked_sub(other.millis).ok_or(E::OverflowSince)?;
        Ok(TimeSpan::from_milliseconds(millis))
    }

    pub(crate) fn to_idatetime(self) -> IDateTime {
        ITimestamp { millisecond: self.millis }.to_datetime()
    }

    fn format_with_config(self, config: Config, format: &str) -> String {
        let mut buf = String::new();
        // Lenient formatting into a `String` can't fail, so this is only
        // reachable by a bug.
        if let Err(_err) = strtime::format(config, format, self, &mut buf) {
            warn!("lenient formatting with {format:?} failed: {_err}");
        }
        buf
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "DateTime({})", self.to_iso_string_millis())
    }
}

/// Formats with `%Y-%m-%d %H:%M:%S`.
impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.format_default())
    }
}

/// Parses the ISO 8601 form `%Y-%m-%dT%H:%M:%S`, with optional
/// milliseconds.
///
/// # Example
///
/// ```
/// use fdate::{datetime, DateTime};
///
/// let dt: DateTime = "2024-07-14T16:24:59.005".parse()?;
/// assert_eq!(dt, datetime(2024, 7, 14, 16, 24, 59, 5));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime, Error> {
        DateTime::strptime(ISO_PATTERN, s)
    }
}

/// Adds a time span to a datetime.
///
/// This panics on overflow. For checked arithmetic, use
/// [`DateTime::checked_add`].
impl core::ops::Add<TimeSpan> for DateTime {
    type Output = DateTime;

    #[inline]
    fn add(self, rhs: TimeSpan) -> DateTime {
        self.checked_add(rhs).expect("adding time span to datetime overflowed")
    }
}

impl core::ops::AddAssign<TimeSpan> for DateTime {
    #[inline]
    fn add_assign(&mut self, rhs: TimeSpan) {
        *self = *self + rhs;
    }
}

/// Subtracts a time span from a datetime.
///
/// This panics on overflow. For checked arithmetic, use
/// [`DateTime::checked_sub`].
impl core::ops::Sub<TimeSpan> for DateTime {
    type Output = DateTime;

    #[inline]
    fn sub(self, rhs: TimeSpan) -> DateTime {
        self.checked_sub(rhs)
            .expect("subtracting time span from datetime overflowed")
    }
}

impl core::ops::SubAssign<TimeSpan> for DateTime {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeSpan) {
        *self = *self - rhs;
    }
}

/// Computes the time span between two datetimes.
///
/// This panics on overflow. For checked arithmetic, use
/// [`DateTime::since`].
impl core::ops::Sub for DateTime {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: DateTime) -> TimeSpan {
        self.since(rhs).expect("time span between datetimes overflowed")
    }
}

/// Serializes as `%Y-%m-%dT%H:%M:%S.mmm`.
#[cfg(feature = "serde")]
impl serde::Serialize for DateTime {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string_millis())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateTime {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime, D::Error> {
        use serde::de;

        struct DateTimeVisitor;

        impl<'de> de::Visitor<'de> for DateTimeVisitor {
            type Value = DateTime;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a datetime string")
            }

            #[inline]
            fn visit_bytes<E: de::Error>(
                self,
                value: &[u8],
            ) -> Result<DateTime, E> {
                DateTime::strptime(ISO_PATTERN, value).map_err(de::Error::custom)
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<DateTime, E> {
                self.visit_bytes(value.as_bytes())
            }
        }

        deserializer.deserialize_str(DateTimeVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        let millis = <i64 as quickcheck::Arbitrary>::arbitrary(g);
        DateTime::from_timestamp_millis(millis)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        let millis = quickcheck::Arbitrary::shrink(&self.millis);
        alloc::boxed::Box::new(millis.map(DateTime::from_timestamp_millis))
    }
}

/// Creates a datetime at midnight of the given date.
///
/// This is a convenience function for [`DateTime::from_date`]. Out of range
/// components are normalized.
///
/// # Panics
///
/// When the result overflows. This only happens for years near the limits
/// of `i32`.
///
/// # Example
///
/// ```
/// use fdate::date;
///
/// assert_eq!(date(2024, 2, 30).to_string(), "2024-03-01 00:00:00");
/// ```
#[inline]
pub fn date(year: i32, month: i32, day: i32) -> DateTime {
    DateTime::from_date(year, month, day).expect("date is out of range")
}

/// Creates a datetime from its civil components.
///
/// This is a convenience function for [`DateTime::new`]. Out of range
/// components are normalized.
///
/// # Panics
///
/// When the result overflows.
#[inline]
pub fn datetime(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    millisecond: i32,
) -> DateTime {
    DateTime::new(year, month, day, hour, minute, second, millisecond)
        .expect("datetime is out of range")
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::clock::FixedClock;

    use super::*;

    #[test]
    fn civil_fields() {
        let dt = datetime(2024, 7, 14, 16, 24, 59, 5);
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 7);
        assert_eq!(dt.day(), 14);
        assert_eq!(dt.hour(), 16);
        assert_eq!(dt.minute(), 24);
        assert_eq!(dt.second(), 59);
        assert_eq!(dt.millisecond(), 5);
        assert_eq!(dt.weekday(), Weekday::Sunday);
        assert_eq!(dt.day_of_year(), 196);
        assert!(dt.in_leap_year());
        assert_eq!(dt.days_in_month(), 31);
        assert_eq!(dt.start_of_day(), date(2024, 7, 14));
    }

    #[test]
    fn epoch() {
        assert_eq!(DateTime::UNIX_EPOCH, date(1970, 1, 1));
        assert_eq!(DateTime::UNIX_EPOCH.weekday(), Weekday::Thursday);
        assert_eq!(
            DateTime::UNIX_EPOCH.to_iso_string_millis(),
            "1970-01-01T00:00:00.000"
        );
    }

    #[test]
    fn pre_epoch_floors() {
        let dt = DateTime::from_timestamp_millis(-1);
        insta::assert_snapshot!(dt.to_iso_string_millis(), @"1969-12-31T23:59:59.999");
        assert_eq!(dt.start_of_day(), date(1969, 12, 31));

        let dt = DateTime::from_timestamp_millis(-86_400_001);
        insta::assert_snapshot!(dt.to_iso_string_millis(), @"1969-12-30T23:59:59.999");

        let dt = DateTime::from_timestamp_millis(-1_500);
        insta::assert_snapshot!(dt.to_string(), @"1969-12-31 23:59:58");
    }

    #[test]
    fn normalization() {
        assert_eq!(date(2023, 13, 1), date(2024, 1, 1));
        assert_eq!(date(2024, 0, 1), date(2023, 12, 1));
        assert_eq!(date(2024, -11, 1), date(2023, 1, 1));
        assert_eq!(date(2024, 1, 32), date(2024, 2, 1));
        assert_eq!(date(2023, 2, 29), date(2023, 3, 1));
        assert_eq!(date(2024, 2, 29).day(), 29);
        assert_eq!(date(2024, 3, 0), date(2024, 2, 29));
        assert_eq!(
            datetime(2024, 7, 14, 24, 0, 0, 0),
            date(2024, 7, 15)
        );
        assert_eq!(
            datetime(2024, 7, 14, 0, 0, 0, -1),
            datetime(2024, 7, 13, 23, 59, 59, 999)
        );
        assert_eq!(
            datetime(2024, 7, 14, 0, 90, 61, 1_001),
            datetime(2024, 7, 14, 1, 31, 2, 1)
        );
    }

    #[test]
    fn leap_years() {
        assert!(date(2000, 1, 1).in_leap_year());
        assert!(!date(1900, 1, 1).in_leap_year());
        assert!(date(2024, 1, 1).in_leap_year());
        assert!(!date(2023, 1, 1).in_leap_year());
        assert_eq!(date(1900, 2, 1).days_in_month(), 28);
        assert_eq!(date(2000, 2, 1).days_in_month(), 29);
    }

    #[test]
    fn new_overflow() {
        let err = DateTime::new(i32::MAX, 1, 1, 0, 0, 0, 0).unwrap_err();
        assert!(err.is_range());
        insta::assert_snapshot!(
            err,
            @"civil date and time overflowed the range of 64-bit millisecond timestamps"
        );
        assert!(DateTime::new(i32::MAX, 13, 1, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn parse_milliseconds_rule() {
        let dt = DateTime::parse("2024-07-14 16:24:59.123", "%Y-%m-%d %H:%M:%S");
        assert_eq!(dt, Some(datetime(2024, 7, 14, 16, 24, 59, 123)));

        // The fraction isn't in the fourth to last position, so `%S` reads
        // whole seconds and the fraction is left over.
        let dt = DateTime::parse("2024-07-14 16:24:59.5", "%Y-%m-%d %H:%M:%S");
        assert_eq!(dt, None);

        let dt = DateTime::parse("2024-07-14 16:24:59", "%Y-%m-%d %H:%M:%S");
        assert_eq!(dt.map(|dt| dt.millisecond()), Some(0));

        // With `%f`, the rule still applies to `%S`. So three fractional
        // digits get consumed by `%S` and nothing is left for `%f`.
        let dt = DateTime::parse("2024 16:24:59.5", "%Y %H:%M:%S.%f");
        assert_eq!(dt, Some(datetime(2024, 1, 1, 16, 24, 59, 500)));
        let dt = DateTime::parse("2024 16:24:59.500", "%Y %H:%M:%S.%f");
        assert_eq!(dt, None);
    }

    #[test]
    fn parse_rejects() {
        assert_eq!(DateTime::parse_default("2024-07-14 16:24:59 "), None);
        assert_eq!(DateTime::parse_default("2024-07-14"), None);
        assert_eq!(DateTime::parse_default("2024-13-14 16:24:59"), None);
        assert_eq!(DateTime::parse_default("2023-02-29 00:00:00"), None);
        assert_eq!(DateTime::parse_default("2024-07-14 24:00:00"), None);
        assert_eq!(DateTime::parse_default(""), None);
        assert_eq!(DateTime::parse("2024", "%Y %Q"), None);
    }

    #[test]
    fn format_truncates() {
        let dt = datetime(2024, 7, 14, 16, 24, 59, 999);
        assert_eq!(dt.format("%T"), "16:24:59");
        assert_eq!(dt.format("%f"), "000");
        assert_eq!(dt.format_with_milliseconds("%f"), "999");
        assert_eq!(dt.to_iso_string(), "2024-07-14T16:24:59");
        assert_eq!(dt.to_iso_string_millis(), "2024-07-14T16:24:59.999");
        assert_eq!(dt.format_default(), dt.to_string());
    }

    #[test]
    fn strftime_strict() {
        let dt = datetime(2024, 7, 14, 16, 24, 59, 5);
        assert_eq!(dt.strftime("%F").unwrap(), "2024-07-14");
        assert_eq!(
            dt.strftime_with_milliseconds("%T").unwrap(),
            "16:24:59.005"
        );
        insta::assert_snapshot!(
            dt.strftime("%Y %").unwrap_err(),
            @"strftime formatting failed: invalid format string, expected byte after `%`, but found end of format string"
        );
    }

    #[test]
    fn from_str() {
        let dt: DateTime = "2024-07-14T16:24:59".parse().unwrap();
        assert_eq!(dt, datetime(2024, 7, 14, 16, 24, 59, 0));
        let dt: DateTime = "2024-07-14T16:24:59.5".parse().unwrap();
        assert_eq!(dt, datetime(2024, 7, 14, 16, 24, 59, 500));
        assert!("2024-07-14 16:24:59".parse::<DateTime>().is_err());
    }

    #[test]
    fn arithmetic() {
        let dt = date(2024, 2, 28);
        assert_eq!(dt + TimeSpan::from_days(1), date(2024, 2, 29));
        assert_eq!(dt - TimeSpan::from_days(59), date(2023, 12, 31));
        assert_eq!(date(2024, 3, 1) - dt, TimeSpan::from_days(2));
        assert_eq!(dt - date(2024, 3, 1), TimeSpan::from_days(-2));

        let mut dt = dt;
        dt += TimeSpan::from_milliseconds(1);
        dt -= TimeSpan::from_milliseconds(2);
        assert_eq!(dt, datetime(2024, 2, 27, 23, 59, 59, 999));

        let max = DateTime::from_timestamp_millis(i64::MAX);
        let min = DateTime::from_timestamp_millis(i64::MIN);
        assert!(max.checked_add(TimeSpan::from_milliseconds(1)).is_err());
        assert!(min.checked_sub(TimeSpan::from_milliseconds(1)).is_err());
        insta::assert_snapshot!(
            max.since(min).unwrap_err(),
            @"time span between datetimes overflowed 64-bit millisecond count"
        );
    }

    #[test]
    #[should_panic]
    fn add_panics_on_overflow() {
        let _ = DateTime::from_timestamp_millis(i64::MAX)
            + TimeSpan::from_milliseconds(1);
    }

    #[test]
    fn now_with_fixed_clock() {
        let clock = FixedClock::new(1_720_974_299_005);
        let dt = DateTime::now_with(&clock);
        assert_eq!(dt, datetime(2024, 7, 14, 16, 24, 59, 5));
    }

    #[test]
    fn extremes_do_not_panic() {
        let max = DateTime::from_timestamp_millis(i64::MAX);
        let min = DateTime::from_timestamp_millis(i64::MIN);
        insta::assert_snapshot!(max.to_iso_string_millis(), @"292278994-08-17T07:12:55.807");
        insta::assert_snapshot!(min.to_iso_string_millis(), @"-292275055-05-16T16:47:04.192");

        // Truncating to whole seconds can't be done on the timestamp here,
        // since the result would be below `i64::MIN`.
        insta::assert_snapshot!(max.to_iso_string(), @"292278994-08-17T07:12:55");
        insta::assert_snapshot!(min.to_iso_string(), @"-292275055-05-16T16:47:04");
        insta::assert_snapshot!(min.to_string(), @"-292275055-05-16 16:47:04");
        let invalid = DateTime::from_timestamp_millis(DateTime::INVALID_TIMESTAMP);
        insta::assert_snapshot!(invalid.to_iso_string(), @"-292275055-05-16T16:47:04");
        insta::assert_snapshot!(invalid.to_string(), @"-292275055-05-16 16:47:04");
        insta::assert_snapshot!(invalid.format("%s %f"), @"-9223372036854776 000");
        assert_eq!(invalid.year(), -292_275_055);
    }

    #[test]
    fn debug() {
        let dt = datetime(2024, 7, 14, 16, 24, 59, 5);
        insta::assert_debug_snapshot!(dt, @"DateTime(2024-07-14T16:24:59.005)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let dt = datetime(2024, 7, 14, 16, 24, 59, 5);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, r#""2024-07-14T16:24:59.005""#);
        let got: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(got, dt);
    }

    quickcheck::quickcheck! {
        fn prop_civil_roundtrip(dt: DateTime) -> bool {
            let got = DateTime::new(
                dt.year(),
                i32::from(dt.month()),
                i32::from(dt.day()),
                i32::from(dt.hour()),
                i32::from(dt.minute()),
                i32::from(dt.second()),
                i32::from(dt.millisecond()),
            );
            got.map_or(false, |got| got == dt)
        }

        fn prop_iso_roundtrip(millis: i64) -> bool {
            // `%Y` parses at most four digits, so stay before the year 10000.
            let millis = millis.rem_euclid(253_402_300_800_000);
            let dt = DateTime::from_timestamp_millis(millis);
            let got: DateTime = dt.to_iso_string_millis().parse().unwrap();
            got == dt
        }

        fn prop_since_inverts_add(dt: DateTime, span: TimeSpan) -> quickcheck::TestResult {
            let Ok(sum) = dt.checked_add(span) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(sum.since(dt).unwrap() == span)
        }
    }
}
