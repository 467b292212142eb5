/*!
This module defines the internal core calendar data types.

These types exist to provide a home for the core algorithms in this crate.
For example, converting a count of milliseconds since the Unix epoch to a
proleptic Gregorian calendar date and a clock time.

These routines are implemented on simple primitive integer types. Every
routine here is total for the inputs that `DateTime` can produce, that is,
any `i64` millisecond count. The epoch day range that results from that is
roughly `+/- 1.07 * 10^11`, which corresponds to years well within `i32`.

# Naming

The types in this module are prefixed with letter `I` to make it clear that
they are internal types. Specifically, to distinguish them from the public
types. For example, `DateTime` versus `IDateTime`.
*/

/// The number of milliseconds in a single civil day.
pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

/// A count of milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimestamp {
    pub(crate) millisecond: i64,
}

impl ITimestamp {
    /// Converts a Unix timestamp to a Gregorian datetime.
    ///
    /// This uses floor division, so a negative timestamp resolves to the day
    /// before the epoch (and a clock time counted forward from its midnight).
    #[inline(always)]
    pub(crate) const fn to_datetime(&self) -> IDateTime {
        let epoch_day = self.millisecond.div_euclid(MILLIS_PER_DAY);
        let millisecond = self.millisecond.rem_euclid(MILLIS_PER_DAY);
        let date = IEpochDay { epoch_day }.to_date();
        let time = ITimeMillisecond { millisecond: millisecond as i32 }.to_time();
        IDateTime { date, time }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDateTime {
    pub(crate) date: IDate,
    pub(crate) time: ITime,
}

impl IDateTime {
    /// Converts this datetime to a Unix timestamp.
    ///
    /// This returns `None` when the result doesn't fit in an `i64`.
    #[inline(always)]
    pub(crate) const fn to_timestamp(&self) -> Option<ITimestamp> {
        // The day count alone can overflow near the minimum timestamp even
        // when adding the clock time brings it back into range.
        let epoch_day = self.date.to_epoch_day().epoch_day as i128;
        let time = self.time.to_millisecond().millisecond as i128;
        let millisecond = epoch_day * (MILLIS_PER_DAY as i128) + time;
        if millisecond < i64::MIN as i128 || millisecond > i64::MAX as i128 {
            return None;
        }
        Some(ITimestamp { millisecond: millisecond as i64 })
    }
}

/// A count of days since the Unix epoch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IEpochDay {
    pub(crate) epoch_day: i64,
}

impl IEpochDay {
    /// Converts days since the Unix epoch to a Gregorian date.
    ///
    /// This is Howard Hinnant's `civil_from_days`, written for 64-bit days
    /// so that the full range of millisecond timestamps is covered.
    ///
    /// Ref: <https://howardhinnant.github.io/date_algorithms.html#civil_from_days>
    #[inline(always)]
    pub(crate) const fn to_date(&self) -> IDate {
        let z = self.epoch_day + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as i8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as i8;
        let year = yoe + era * 400 + (month <= 2) as i64;
        IDate { year: year as i32, month, day }
    }

    /// Returns the weekday for this epoch day, with Sunday being `0`.
    #[inline(always)]
    pub(crate) const fn weekday_sunday_zero(&self) -> i8 {
        // 1970-01-01 was a Thursday.
        (self.epoch_day + 4).rem_euclid(7) as i8
    }
}

/// A Gregorian calendar date.
///
/// The month and day are expected to be valid. Callers that accept
/// out-of-range values normalize them first with [`IDate::normalize`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDate {
    pub(crate) year: i32,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl IDate {
    /// Converts a Gregorian date to days since the Unix epoch.
    ///
    /// This is Howard Hinnant's `days_from_civil`.
    ///
    /// Ref: <https://howardhinnant.github.io/date_algorithms.html#days_from_civil>
    #[inline(always)]
    pub(crate) const fn to_epoch_day(&self) -> IEpochDay {
        let month = self.month as i64;
        let day = self.day as i64;
        let year = self.year as i64 - (month <= 2) as i64;
        let era = year.div_euclid(400);
        let yoe = year.rem_euclid(400);
        let mp = if month > 2 { month - 3 } else { month + 9 };
        let doy = (153 * mp + 2) / 5 + day - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        IEpochDay { epoch_day: era * 146_097 + doe - 719_468 }
    }

    /// Returns the epoch day for a date whose month and day may be out of
    /// range.
    ///
    /// Months outside of `1..=12` carry into the year (month `13` is January
    /// of the following year, month `0` is December of the prior year). Days
    /// are then counted forward (or backward) from the first of that month,
    /// so that day `32` of January is February 1.
    ///
    /// This returns `None` when the carried year doesn't fit in an `i32`.
    #[inline(always)]
    pub(crate) const fn normalize(
        year: i32,
        month: i64,
        day: i64,
    ) -> Option<IEpochDay> {
        let carry = (month - 1).div_euclid(12);
        let month = ((month - 1).rem_euclid(12) + 1) as i8;
        let year = year as i64 + carry;
        if year < i32::MIN as i64 || year > i32::MAX as i64 {
            return None;
        }
        let first = IDate { year: year as i32, month, day: 1 }.to_epoch_day();
        match first.epoch_day.checked_add(day - 1) {
            Some(epoch_day) => Some(IEpochDay { epoch_day }),
            None => None,
        }
    }

    /// Returns the ordinal day of the year for this date, starting at `1`.
    #[inline(always)]
    pub(crate) const fn day_of_year(&self) -> i16 {
        let jan1 = IDate { year: self.year, month: 1, day: 1 };
        (self.to_epoch_day().epoch_day - jan1.to_epoch_day().epoch_day + 1)
            as i16
    }
}

/// Represents a clock time to millisecond precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITime {
    pub(crate) hour: i8,
    pub(crate) minute: i8,
    pub(crate) second: i8,
    pub(crate) millisecond: i16,
}

impl ITime {
    pub(crate) const ZERO: ITime =
        ITime { hour: 0, minute: 0, second: 0, millisecond: 0 };

    #[inline(always)]
    pub(crate) const fn to_millisecond(&self) -> ITimeMillisecond {
        let mut millisecond: i32 = 0;
        millisecond += (self.hour as i32) * 3_600_000;
        millisecond += (self.minute as i32) * 60_000;
        millisecond += (self.second as i32) * 1_000;
        millisecond += self.millisecond as i32;
        ITimeMillisecond { millisecond }
    }
}

/// Represents a single point in the day, to millisecond precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimeMillisecond {
    pub(crate) millisecond: i32,
}

impl ITimeMillisecond {
    #[inline(always)]
    pub(crate) const fn to_time(&self) -> ITime {
        let mut millisecond = self.millisecond;
        let mut time = ITime::ZERO;
        if millisecond != 0 {
            time.hour = (millisecond / 3_600_000) as i8;
            millisecond %= 3_600_000;
            time.minute = (millisecond / 60_000) as i8;
            millisecond %= 60_000;
            time.second = (millisecond / 1_000) as i8;
            time.millisecond = (millisecond % 1_000) as i16;
        }
        time
    }
}

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Returns the number of days in the given year.
#[inline]
pub(crate) const fn days_in_year(year: i32) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Return the number of days in the given month.
#[inline]
pub(crate) const fn days_in_month(year: i32, month: i8) -> i8 {
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ month >> 3)
    }
}
