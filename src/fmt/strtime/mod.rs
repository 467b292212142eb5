/*!
The `strptime` and `strftime` engine.

Parsing produces a [`BrokenDownTime`], which is converted to a [`DateTime`]
once every directive has been handled. Formatting works directly from a
[`DateTime`] broken down into its civil components.
*/

use alloc::{boxed::Box, string::String};

use crate::{
    error::{fmt::strtime::Error as E, ErrorContext},
    util::itime::{self, IDate, IDateTime, IEpochDay, ITime},
    DateTime, Error, Weekday,
};

use self::{format::Formatter, parse::Parser};

mod format;
mod parse;

/// Knobs for the parser and the formatter.
///
/// Note that `lenient` only influences formatting. Parsing is never
/// lenient.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Config {
    lenient: bool,
    milliseconds: bool,
    floor_seconds: bool,
}

impl Config {
    /// The default configuration: strict and to second precision.
    pub(crate) const fn new() -> Config {
        Config { lenient: false, milliseconds: false, floor_seconds: false }
    }

    /// When enabled, an invalid directive in a format string is written
    /// literally instead of causing an error.
    pub(crate) const fn lenient(self, yes: bool) -> Config {
        Config { lenient: yes, ..self }
    }

    /// When enabled, `%S` formats as `SS.mmm` and parses an optional
    /// fractional part of 1 to 3 digits.
    pub(crate) const fn milliseconds(self, yes: bool) -> Config {
        Config { milliseconds: yes, ..self }
    }

    /// When enabled, formatting truncates the datetime to whole seconds
    /// first, so `%f` writes `000`. Only the broken down fields are
    /// truncated, which works for every instant including those within a
    /// second of `i64::MIN`.
    pub(crate) const fn floor_seconds(self, yes: bool) -> Config {
        Config { floor_seconds: yes, ..self }
    }
}

/// The "broken down time" produced by parsing.
///
/// Every field is optional because a format string may include any subset of
/// directives. Converting to a [`DateTime`] is where defaults are filled in
/// and the fields are checked for consistency with one another.
#[derive(Debug, Default)]
pub(crate) struct BrokenDownTime {
    year: Option<i32>,
    month: Option<i8>,
    day: Option<i8>,
    day_of_year: Option<i16>,
    hour: Option<i8>,
    minute: Option<i8>,
    second: Option<i8>,
    millisecond: Option<i16>,
    // Unix seconds from `%s`. When present, it takes precedence over every
    // other field except milliseconds.
    timestamp: Option<i64>,
    // Only used to confirm that it is consistent with the date given. It
    // cannot pick a date on its own.
    weekday: Option<Weekday>,
    meridiem: Option<Meridiem>,
    // Set when the hour came from `%I` or `%l`.
    hour12: bool,
}

impl BrokenDownTime {
    /// Parse the given `input` according to the given `format` string.
    ///
    /// # Errors
    ///
    /// When the format string is invalid, when the input doesn't match it,
    /// or when there is input left over after the format string is
    /// exhausted.
    pub(crate) fn parse(
        format: &[u8],
        input: &[u8],
        config: Config,
    ) -> Result<BrokenDownTime, Error> {
        let mut tm = BrokenDownTime::default();
        let mut p = Parser { config, fmt: format, inp: input, tm: &mut tm };
        p.parse().context(E::FailedStrptime)?;
        if !p.inp.is_empty() {
            return Err(Error::from(E::UnconsumedStrptime {
                remaining: Box::from(p.inp),
            }));
        }
        Ok(tm)
    }

    /// Converts this broken down time into a datetime.
    ///
    /// # Errors
    ///
    /// When there isn't enough information to build a datetime, when fields
    /// are inconsistent with one another (like a weekday that doesn't match
    /// the date), or when the result overflows.
    pub(crate) fn to_datetime(&self) -> Result<DateTime, Error> {
        if let Some(second) = self.timestamp {
            let subsec = i64::from(self.millisecond.unwrap_or(0));
            let millis = second
                .checked_mul(1_000)
                .and_then(|ms| ms.checked_add(subsec))
                .ok_or(E::RangeTimestamp)?;
            return Ok(DateTime::from_timestamp_millis(millis));
        }
        let date = self.to_date()?;
        let time = self.to_time()?;
        let ts = IDateTime { date, time }
            .to_timestamp()
            .ok_or(crate::error::datetime::Error::OverflowCivil)?;
        Ok(DateTime::from_timestamp_millis(ts.millisecond))
    }

    fn to_date(&self) -> Result<IDate, Error> {
        let Some(year) = self.year else {
            return Err(Error::from(E::RequiredYearForDate));
        };
        let date = match self.day_of_year {
            Some(doy) if self.month.is_none() && self.day.is_none() => {
                let max = itime::days_in_year(year);
                if doy > max {
                    return Err(Error::range("day-of-year", doy, 1, max)
                        .context(E::InvalidDate));
                }
                let jan1 = IDate { year, month: 1, day: 1 }.to_epoch_day();
                let epoch_day = jan1.epoch_day + i64::from(doy) - 1;
                IEpochDay { epoch_day }.to_date()
            }
            _ => {
                let month = self.month.unwrap_or(1);
                let day = self.day.unwrap_or(1);
                let max = itime::days_in_month(year, month);
                if day > max {
                    return Err(Error::range("day", day, 1, max)
                        .context(E::InvalidDate));
                }
                IDate { year, month, day }
            }
        };
        if let Some(parsed) = self.weekday {
            let offset = date.to_epoch_day().weekday_sunday_zero();
            let got = Weekday::from_sunday_zero_offset_unchecked(offset);
            if parsed != got {
                return Err(Error::from(E::MismatchWeekday { parsed, got }));
            }
        }
        Ok(date)
    }

    fn to_time(&self) -> Result<ITime, Error> {
        let Some(hour) = self.hour else {
            if self.minute.is_some() {
                return Err(Error::from(E::MissingTimeHourForMinute));
            }
            if self.second.is_some() {
                return Err(Error::from(E::MissingTimeHourForSecond));
            }
            if self.millisecond.is_some() {
                return Err(Error::from(E::MissingTimeHourForFractional));
            }
            return Ok(ITime::ZERO);
        };
        let hour = if self.hour12 {
            match self.meridiem {
                None => return Err(Error::from(E::MissingMeridiemForHour12)),
                Some(Meridiem::AM) => hour % 12,
                Some(Meridiem::PM) => (hour % 12) + 12,
            }
        } else {
            hour
        };
        let Some(minute) = self.minute else {
            if self.second.is_some() {
                return Err(Error::from(E::MissingTimeMinuteForSecond));
            }
            if self.millisecond.is_some() {
                return Err(Error::from(E::MissingTimeMinuteForFractional));
            }
            return Ok(ITime { hour, ..ITime::ZERO });
        };
        let Some(second) = self.second else {
            if self.millisecond.is_some() {
                return Err(Error::from(E::MissingTimeSecondForFractional));
            }
            return Ok(ITime { hour, minute, ..ITime::ZERO });
        };
        let millisecond = self.millisecond.unwrap_or(0);
        Ok(ITime { hour, minute, second, millisecond })
    }
}

/// Formats `dt` according to `format` into `wtr`.
///
/// # Errors
///
/// Only when the format string is invalid and the config isn't lenient.
pub(crate) fn format(
    config: Config,
    format: &str,
    dt: DateTime,
    wtr: &mut String,
) -> Result<(), Error> {
    let mut tm = dt.to_idatetime();
    if config.floor_seconds {
        tm.time.millisecond = 0;
    }
    let epoch_day = tm.date.to_epoch_day();
    let mut formatter = Formatter {
        config,
        fmt: format,
        tm,
        weekday: Weekday::from_sunday_zero_offset_unchecked(
            epoch_day.weekday_sunday_zero(),
        ),
        timestamp: dt.timestamp_millis(),
        wtr,
    };
    formatter.format().context(E::FailedStrftime)?;
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Meridiem {
    AM,
    PM,
}

/// Returns the "full" month name.
fn month_name_full(month: i8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// Returns the abbreviated month name.
fn month_name_abbrev(month: i8) -> &'static str {
    &month_name_full(month)[..3]
}
