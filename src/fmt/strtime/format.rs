use alloc::string::String;

use crate::{
    error::{fmt::strtime::Error as E, ErrorContext},
    fmt::strtime::{month_name_abbrev, month_name_full, Config},
    util::itime::IDateTime,
    Error, Weekday,
};

pub(super) struct Formatter<'f, 'w> {
    pub(super) config: Config,
    pub(super) fmt: &'f str,
    pub(super) tm: IDateTime,
    pub(super) weekday: Weekday,
    /// Milliseconds since the Unix epoch. Only used by `%s`.
    pub(super) timestamp: i64,
    pub(super) wtr: &'w mut String,
}

impl<'f, 'w> Formatter<'f, 'w> {
    pub(super) fn format(&mut self) -> Result<(), Error> {
        while !self.fmt.is_empty() {
            if self.f() != b'%' {
                // '%' is ASCII, so splitting here is always on a char
                // boundary.
                let end = self.fmt.find('%').unwrap_or(self.fmt.len());
                self.wtr.push_str(&self.fmt[..end]);
                self.fmt = &self.fmt[end..];
                continue;
            }
            if !self.bump_fmt() {
                if self.config.lenient {
                    self.wtr.push('%');
                    break;
                }
                return Err(Error::from(E::UnexpectedEndAfterPercent));
            }
            let orig = self.fmt;
            if let Err(err) = self.format_one() {
                if !self.config.lenient {
                    return Err(err);
                }
                trace!("writing invalid strftime directive literally: {err}");
                // Write the `%` and then let the literal handling above
                // take care of whatever followed it.
                self.wtr.push('%');
                self.fmt = orig;
            }
        }
        Ok(())
    }

    fn format_one(&mut self) -> Result<(), Error> {
        let fail = |directive| E::DirectiveFailure { directive };

        match self.f() {
            b'%' => self.fmt_literal("%").context(fail(b'%')),
            b'A' => self.fmt_weekday_full().context(fail(b'A')),
            b'a' => self.fmt_weekday_abbrev().context(fail(b'a')),
            b'B' => self.fmt_month_full().context(fail(b'B')),
            b'b' => self.fmt_month_abbrev().context(fail(b'b')),
            b'C' => self.fmt_century().context(fail(b'C')),
            b'D' => self.fmt_american_date().context(fail(b'D')),
            b'd' => self.fmt_day(b'0').context(fail(b'd')),
            b'e' => self.fmt_day(b' ').context(fail(b'e')),
            b'F' => self.fmt_iso_date().context(fail(b'F')),
            b'f' => self.fmt_fractional().context(fail(b'f')),
            b'H' => self.fmt_hour24(b'0').context(fail(b'H')),
            b'h' => self.fmt_month_abbrev().context(fail(b'h')),
            b'I' => self.fmt_hour12(b'0').context(fail(b'I')),
            b'j' => self.fmt_day_of_year().context(fail(b'j')),
            b'k' => self.fmt_hour24(b' ').context(fail(b'k')),
            b'l' => self.fmt_hour12(b' ').context(fail(b'l')),
            b'M' => self.fmt_minute().context(fail(b'M')),
            b'm' => self.fmt_month().context(fail(b'm')),
            b'n' => self.fmt_literal("\n").context(fail(b'n')),
            b'P' => self.fmt_ampm_lower().context(fail(b'P')),
            b'p' => self.fmt_ampm_upper().context(fail(b'p')),
            b'R' => self.fmt_clock_nosecs().context(fail(b'R')),
            b'S' => self.fmt_second().context(fail(b'S')),
            b's' => self.fmt_timestamp().context(fail(b's')),
            b'T' => self.fmt_clock_secs().context(fail(b'T')),
            b't' => self.fmt_literal("\t").context(fail(b't')),
            b'u' => self.fmt_weekday_mon().context(fail(b'u')),
            b'w' => self.fmt_weekday_sun().context(fail(b'w')),
            b'Y' => self.fmt_year().context(fail(b'Y')),
            b'y' => self.fmt_year2().context(fail(b'y')),
            unk => Err(Error::from(E::UnknownDirective { directive: unk })),
        }
    }

    /// Returns the byte at the current position of the format string.
    ///
    /// # Panics
    ///
    /// This panics when the entire format string has been consumed.
    fn f(&self) -> u8 {
        self.fmt.as_bytes()[0]
    }

    /// Bumps the position of the format string.
    ///
    /// This must only be called when the current byte is ASCII. It returns
    /// true when there is more format string to consume.
    fn bump_fmt(&mut self) -> bool {
        self.fmt = &self.fmt[1..];
        !self.fmt.is_empty()
    }

    /// Writes `n` padded to at least `width` digits.
    ///
    /// A negative sign is written before any padding, so `-44` with a zero
    /// pad and a width of `4` is written as `-0044`.
    fn write_int(&mut self, n: i64, pad: u8, width: usize) -> Result<(), Error> {
        use core::fmt::Write;

        if n < 0 {
            self.wtr.push('-');
        }
        let n = n.unsigned_abs();
        let result = if pad == b'0' {
            write!(self.wtr, "{n:0width$}")
        } else {
            write!(self.wtr, "{n:>width$}")
        };
        result.map_err(|_| {
            Error::from_args(format_args!(
                "an error occurred when formatting an argument",
            ))
        })
    }

    // Each formatting routine below assumes the formatter is positioned at
    // the directive byte immediately following a `%`. Routines bump past the
    // directive only once everything was written.

    /// %%, %n, %t
    fn fmt_literal(&mut self, literal: &str) -> Result<(), Error> {
        self.wtr.push_str(literal);
        self.bump_fmt();
        Ok(())
    }

    /// %P
    fn fmt_ampm_lower(&mut self) -> Result<(), Error> {
        self.wtr.push_str(if self.tm.time.hour < 12 { "am" } else { "pm" });
        self.bump_fmt();
        Ok(())
    }

    /// %p
    fn fmt_ampm_upper(&mut self) -> Result<(), Error> {
        self.wtr.push_str(if self.tm.time.hour < 12 { "AM" } else { "PM" });
        self.bump_fmt();
        Ok(())
    }

    /// %D
    fn fmt_american_date(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.date.month.into(), b'0', 2)?;
        self.wtr.push('/');
        self.write_int(self.tm.date.day.into(), b'0', 2)?;
        self.wtr.push('/');
        self.write_int(self.tm.date.year.rem_euclid(100).into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %F
    fn fmt_iso_date(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.date.year.into(), b'0', 4)?;
        self.wtr.push('-');
        self.write_int(self.tm.date.month.into(), b'0', 2)?;
        self.wtr.push('-');
        self.write_int(self.tm.date.day.into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %R
    fn fmt_clock_nosecs(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.time.hour.into(), b'0', 2)?;
        self.wtr.push(':');
        self.write_int(self.tm.time.minute.into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %T
    fn fmt_clock_secs(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.time.hour.into(), b'0', 2)?;
        self.wtr.push(':');
        self.write_int(self.tm.time.minute.into(), b'0', 2)?;
        self.wtr.push(':');
        self.write_seconds()?;
        self.bump_fmt();
        Ok(())
    }

    /// %C
    fn fmt_century(&mut self) -> Result<(), Error> {
        let century = self.tm.date.year.div_euclid(100);
        self.write_int(century.into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %d, %e
    fn fmt_day(&mut self, pad: u8) -> Result<(), Error> {
        self.write_int(self.tm.date.day.into(), pad, 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %j
    fn fmt_day_of_year(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.date.day_of_year().into(), b'0', 3)?;
        self.bump_fmt();
        Ok(())
    }

    /// %f
    fn fmt_fractional(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.time.millisecond.into(), b'0', 3)?;
        self.bump_fmt();
        Ok(())
    }

    /// %H, %k
    fn fmt_hour24(&mut self, pad: u8) -> Result<(), Error> {
        self.write_int(self.tm.time.hour.into(), pad, 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %I, %l
    fn fmt_hour12(&mut self, pad: u8) -> Result<(), Error> {
        let mut hour = self.tm.time.hour % 12;
        if hour == 0 {
            hour = 12;
        }
        self.write_int(hour.into(), pad, 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %M
    fn fmt_minute(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.time.minute.into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %m
    fn fmt_month(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.date.month.into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }

    /// %B
    fn fmt_month_full(&mut self) -> Result<(), Error> {
        self.wtr.push_str(month_name_full(self.tm.date.month));
        self.bump_fmt();
        Ok(())
    }

    /// %b, %h
    fn fmt_month_abbrev(&mut self) -> Result<(), Error> {
        self.wtr.push_str(month_name_abbrev(self.tm.date.month));
        self.bump_fmt();
        Ok(())
    }

    /// %S
    fn fmt_second(&mut self) -> Result<(), Error> {
        self.write_seconds()?;
        self.bump_fmt();
        Ok(())
    }

    /// Writes the seconds for `%S` and `%T`, including milliseconds when
    /// enabled.
    fn write_seconds(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.time.second.into(), b'0', 2)?;
        if self.config.milliseconds {
            self.wtr.push('.');
            self.write_int(self.tm.time.millisecond.into(), b'0', 3)?;
        }
        Ok(())
    }

    /// %s
    fn fmt_timestamp(&mut self) -> Result<(), Error> {
        self.write_int(self.timestamp.div_euclid(1_000), b'0', 0)?;
        self.bump_fmt();
        Ok(())
    }

    /// %A
    fn fmt_weekday_full(&mut self) -> Result<(), Error> {
        self.wtr.push_str(self.weekday.name_full());
        self.bump_fmt();
        Ok(())
    }

    /// %a
    fn fmt_weekday_abbrev(&mut self) -> Result<(), Error> {
        self.wtr.push_str(self.weekday.name_abbrev());
        self.bump_fmt();
        Ok(())
    }

    /// %u
    fn fmt_weekday_mon(&mut self) -> Result<(), Error> {
        self.write_int(self.weekday.to_monday_one_offset().into(), b'0', 1)?;
        self.bump_fmt();
        Ok(())
    }

    /// %w
    fn fmt_weekday_sun(&mut self) -> Result<(), Error> {
        self.write_int(self.weekday.to_sunday_zero_offset().into(), b'0', 1)?;
        self.bump_fmt();
        Ok(())
    }

    /// %Y
    fn fmt_year(&mut self) -> Result<(), Error> {
        self.write_int(self.tm.date.year.into(), b'0', 4)?;
        self.bump_fmt();
        Ok(())
    }

    /// %y
    fn fmt_year2(&mut self) -> Result<(), Error> {
        let year = self.tm.date.year.rem_euclid(100);
        self.write_int(year.into(), b'0', 2)?;
        self.bump_fmt();
        Ok(())
    }
}
