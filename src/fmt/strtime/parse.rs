use crate::{
    error::{
        fmt::strtime::{Error as E, ParseError as PE},
        util::ParseIntError,
        ErrorContext,
    },
    fmt::strtime::{BrokenDownTime, Config, Meridiem},
    util::b,
    Error, Weekday,
};

pub(super) struct Parser<'f, 'i, 't> {
    pub(super) config: Config,
    pub(super) fmt: &'f [u8],
    pub(super) inp: &'i [u8],
    pub(super) tm: &'t mut BrokenDownTime,
}

impl<'f, 'i, 't> Parser<'f, 'i, 't> {
    pub(super) fn parse(&mut self) -> Result<(), Error> {
        let fail = |directive| E::DirectiveFailure { directive };

        while !self.fmt.is_empty() {
            if self.f() != b'%' {
                self.parse_literal()?;
                continue;
            }
            if !self.bump_fmt() {
                return Err(Error::from(E::UnexpectedEndAfterPercent));
            }
            // `%n` and `%t` match zero or more whitespace, so they're fine
            // at the end of the input.
            if self.inp.is_empty() && !matches!(self.f(), b'n' | b't') {
                return Err(Error::from(PE::ExpectedNonEmpty {
                    directive: self.f(),
                }));
            }
            match self.f() {
                b'%' => self.parse_percent().context(fail(b'%'))?,
                b'A' => self.parse_weekday_full().context(fail(b'A'))?,
                b'a' => self.parse_weekday_abbrev().context(fail(b'a'))?,
                b'B' => self.parse_month_name_full().context(fail(b'B'))?,
                b'b' => self.parse_month_name_abbrev().context(fail(b'b'))?,
                b'C' => return Err(Error::from(PE::NotAllowedCentury)),
                b'D' => self.parse_american_date().context(fail(b'D'))?,
                b'd' => self.parse_day().context(fail(b'd'))?,
                b'e' => self.parse_day().context(fail(b'e'))?,
                b'F' => self.parse_iso_date().context(fail(b'F'))?,
                b'f' => self.parse_fractional().context(fail(b'f'))?,
                b'H' => self.parse_hour24().context(fail(b'H'))?,
                b'h' => self.parse_month_name_abbrev().context(fail(b'h'))?,
                b'I' => self.parse_hour12().context(fail(b'I'))?,
                b'j' => self.parse_day_of_year().context(fail(b'j'))?,
                b'k' => self.parse_hour24().context(fail(b'k'))?,
                b'l' => self.parse_hour12().context(fail(b'l'))?,
                b'M' => self.parse_minute().context(fail(b'M'))?,
                b'm' => self.parse_month().context(fail(b'm'))?,
                b'n' => self.parse_whitespace().context(fail(b'n'))?,
                b'P' => self.parse_ampm().context(fail(b'P'))?,
                b'p' => self.parse_ampm().context(fail(b'p'))?,
                b'R' => self.parse_clock_nosecs().context(fail(b'R'))?,
                b'S' => self.parse_second().context(fail(b'S'))?,
                b's' => self.parse_timestamp().context(fail(b's'))?,
                b'T' => self.parse_clock_secs().context(fail(b'T'))?,
                b't' => self.parse_whitespace().context(fail(b't'))?,
                b'u' => self.parse_weekday_mon().context(fail(b'u'))?,
                b'w' => self.parse_weekday_sun().context(fail(b'w'))?,
                b'Y' => self.parse_year().context(fail(b'Y'))?,
                b'y' => self.parse_year2().context(fail(b'y'))?,
                unk => {
                    return Err(Error::from(E::UnknownDirective {
                        directive: unk,
                    }));
                }
            }
        }
        Ok(())
    }

    /// Returns the byte at the current position of the format string.
    ///
    /// # Panics
    ///
    /// This panics when the entire format string has been consumed.
    fn f(&self) -> u8 {
        self.fmt[0]
    }

    /// Returns the byte at the current position of the input string.
    ///
    /// # Panics
    ///
    /// This panics when the entire input string has been consumed.
    fn i(&self) -> u8 {
        self.inp[0]
    }

    /// Bumps the position of the format string.
    ///
    /// This returns true in precisely the cases where `self.f()` will not
    /// panic. i.e., When the end of the format string hasn't been reached yet.
    fn bump_fmt(&mut self) -> bool {
        self.fmt = &self.fmt[1..];
        !self.fmt.is_empty()
    }

    /// Bumps the position of the input string.
    ///
    /// This returns true in precisely the cases where `self.i()` will not
    /// panic.
    fn bump_input(&mut self) -> bool {
        self.inp = &self.inp[1..];
        !self.inp.is_empty()
    }

    /// Runs a nested parser for a directive that expands to a fixed format
    /// string, like `%F`.
    fn parse_expansion(&mut self, fmt: &'static [u8]) -> Result<(), Error> {
        let mut p = Parser {
            config: self.config,
            fmt,
            inp: self.inp,
            tm: &mut *self.tm,
        };
        p.parse()?;
        self.inp = p.inp;
        self.bump_fmt();
        Ok(())
    }

    // We write out a parsing routine for each directive below. Each parsing
    // routine assumes that the parser is positioned immediately after the
    // `%` for the current directive, and that there is at least one unconsumed
    // byte in the input (except for `%n` and `%t`).

    /// Parses a literal from the input that matches the current byte in the
    /// format string.
    ///
    /// A single whitespace byte in the format string matches zero or more
    /// whitespace bytes in the input.
    fn parse_literal(&mut self) -> Result<(), Error> {
        if self.f().is_ascii_whitespace() {
            if !self.inp.is_empty() {
                while self.i().is_ascii_whitespace() && self.bump_input() {}
            }
        } else if self.inp.is_empty() {
            return Err(Error::from(PE::ExpectedMatchLiteralEndOfInput {
                expected: self.f(),
            }));
        } else if self.f() != self.i() {
            return Err(Error::from(PE::ExpectedMatchLiteralByte {
                expected: self.f(),
                got: self.i(),
            }));
        } else {
            self.bump_input();
        }
        self.bump_fmt();
        Ok(())
    }

    /// Parses an arbitrary (zero or more) amount of ASCII whitespace.
    ///
    /// This is for `%n` and `%t`.
    fn parse_whitespace(&mut self) -> Result<(), Error> {
        if !self.inp.is_empty() {
            while self.i().is_ascii_whitespace() && self.bump_input() {}
        }
        self.bump_fmt();
        Ok(())
    }

    /// Parses a literal '%' from the input.
    fn parse_percent(&mut self) -> Result<(), Error> {
        if self.i() != b'%' {
            return Err(Error::from(PE::ExpectedMatchLiteralByte {
                expected: b'%',
                got: self.i(),
            }));
        }
        self.bump_fmt();
        self.bump_input();
        Ok(())
    }

    /// Parses `%D`, which is equivalent to `%m/%d/%y`.
    fn parse_american_date(&mut self) -> Result<(), Error> {
        self.parse_expansion(b"%m/%d/%y")
    }

    /// Parses `%F`, which is equivalent to `%Y-%m-%d`.
    fn parse_iso_date(&mut self) -> Result<(), Error> {
        self.parse_expansion(b"%Y-%m-%d")
    }

    /// Parses `%T`, which is equivalent to `%H:%M:%S`.
    fn parse_clock_secs(&mut self) -> Result<(), Error> {
        self.parse_expansion(b"%H:%M:%S")
    }

    /// Parses `%R`, which is equivalent to `%H:%M`.
    fn parse_clock_nosecs(&mut self) -> Result<(), Error> {
        self.parse_expansion(b"%H:%M")
    }

    /// Parse `%p` or `%P`, which indicates whether the time is AM or PM.
    ///
    /// This only influences the clock time when the hour was parsed with
    /// `%I` or `%l`.
    fn parse_ampm(&mut self) -> Result<(), Error> {
        let (index, inp) = parse_ampm(self.inp)?;
        self.inp = inp;

        self.tm.meridiem =
            Some(if index == 0 { Meridiem::AM } else { Meridiem::PM });
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%d` and `%e`, which is equivalent to the day of the month.
    ///
    /// We merely require that it is in the range 1-31 here. The day is
    /// checked against the month when building a datetime.
    fn parse_day(&mut self) -> Result<(), Error> {
        let (day, inp) = parse_number(2, self.inp).context(PE::ParseDay)?;
        self.inp = inp;

        self.tm.day = Some(b::Day::check(day).context(PE::ParseDay)?);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%j`, which is equivalent to the day of the year.
    fn parse_day_of_year(&mut self) -> Result<(), Error> {
        let (day, inp) =
            parse_number(3, self.inp).context(PE::ParseDayOfYear)?;
        self.inp = inp;

        let day = b::DayOfYear::check(day).context(PE::ParseDayOfYear)?;
        self.tm.day_of_year = Some(day);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%H` and `%k`, which is equivalent to the hour.
    fn parse_hour24(&mut self) -> Result<(), Error> {
        let (hour, inp) = parse_number(2, self.inp).context(PE::ParseHour)?;
        self.inp = inp;

        self.tm.hour = Some(b::Hour::check(hour).context(PE::ParseHour)?);
        self.tm.hour12 = false;
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%I` and `%l`, which is equivalent to the hour on a 12-hour
    /// clock.
    fn parse_hour12(&mut self) -> Result<(), Error> {
        let (hour, inp) = parse_number(2, self.inp).context(PE::ParseHour)?;
        self.inp = inp;

        self.tm.hour = Some(b::Hour12::check(hour).context(PE::ParseHour)?);
        self.tm.hour12 = true;
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%M`, which is equivalent to the minute.
    fn parse_minute(&mut self) -> Result<(), Error> {
        let (minute, inp) =
            parse_number(2, self.inp).context(PE::ParseMinute)?;
        self.inp = inp;

        let minute = b::Minute::check(minute).context(PE::ParseMinute)?;
        self.tm.minute = Some(minute);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%S`, which is equivalent to the second.
    ///
    /// When milliseconds are enabled, this also parses an optional fraction
    /// like `.5` or `.005`.
    fn parse_second(&mut self) -> Result<(), Error> {
        let (second, inp) =
            parse_number(2, self.inp).context(PE::ParseSecond)?;
        self.inp = inp;

        let mut second =
            b::LeapSecond::check(second).context(PE::ParseSecond)?;
        // Leap seconds aren't supported, so `60` is constrained to `59`.
        if second == 60 {
            second = 59;
        }
        self.tm.second = Some(second);
        if self.config.milliseconds && self.inp.first() == Some(&b'.') {
            self.inp = &self.inp[1..];
            let (millisecond, inp) = parse_fraction(self.inp)?;
            self.inp = inp;
            self.tm.millisecond = Some(millisecond);
        }
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%f`, which is a fractional second of up to 3 digits. This
    /// must always parse at least one decimal digit and does not parse any
    /// leading dot.
    fn parse_fractional(&mut self) -> Result<(), Error> {
        let (millisecond, inp) = parse_fraction(self.inp)?;
        self.inp = inp;
        self.tm.millisecond = Some(millisecond);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%s`, which is equivalent to a Unix timestamp in seconds.
    fn parse_timestamp(&mut self) -> Result<(), Error> {
        let (sign, inp) = parse_optional_sign(self.inp);
        // 19 comes from `i64::MAX.to_string().len()`.
        let (timestamp, inp) =
            parse_number(19, inp).context(PE::ParseTimestamp)?;
        // Negating any positive `i64` always results in a valid `i64`.
        let timestamp =
            timestamp.checked_mul(sign).ok_or(PE::ParseTimestamp)?;
        self.inp = inp;
        self.tm.timestamp = Some(timestamp);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%m`, which is equivalent to the month.
    fn parse_month(&mut self) -> Result<(), Error> {
        let (month, inp) = parse_number(2, self.inp).context(PE::ParseMonth)?;
        self.inp = inp;

        self.tm.month = Some(b::Month::check(month).context(PE::ParseMonth)?);
        self.bump_fmt();
        Ok(())
    }

    /// Parse `%b` or `%h`, which is an abbreviated month name.
    fn parse_month_name_abbrev(&mut self) -> Result<(), Error> {
        let (index, inp) = parse_month_name_abbrev(self.inp)?;
        self.inp = inp;

        // OK because 0 <= index <= 11.
        self.tm.month = Some(index as i8 + 1);
        self.bump_fmt();
        Ok(())
    }

    /// Parse `%B`, which is a full month name.
    fn parse_month_name_full(&mut self) -> Result<(), Error> {
        static CHOICES: &'static [&'static [u8]] = &[
            b"January",
            b"February",
            b"March",
            b"April",
            b"May",
            b"June",
            b"July",
            b"August",
            b"September",
            b"October",
            b"November",
            b"December",
        ];

        let (index, inp) =
            parse_choice(self.inp, CHOICES).context(PE::UnknownMonthName)?;
        self.inp = inp;

        // OK because 0 <= index <= 11.
        self.tm.month = Some(index as i8 + 1);
        self.bump_fmt();
        Ok(())
    }

    /// Parse `%a`, which is an abbreviated weekday.
    fn parse_weekday_abbrev(&mut self) -> Result<(), Error> {
        let (index, inp) = parse_weekday_abbrev(self.inp)?;
        self.inp = inp;

        // OK because 0 <= index <= 6.
        self.tm.weekday =
            Some(Weekday::from_sunday_zero_offset_unchecked(index as i8));
        self.bump_fmt();
        Ok(())
    }

    /// Parse `%A`, which is a full weekday name.
    fn parse_weekday_full(&mut self) -> Result<(), Error> {
        static CHOICES: &'static [&'static [u8]] = &[
            b"Sunday",
            b"Monday",
            b"Tuesday",
            b"Wednesday",
            b"Thursday",
            b"Friday",
            b"Saturday",
        ];

        let (index, inp) = parse_choice(self.inp, CHOICES)
            .context(PE::UnknownWeekdayName)?;
        self.inp = inp;

        // OK because 0 <= index <= 6.
        self.tm.weekday =
            Some(Weekday::from_sunday_zero_offset_unchecked(index as i8));
        self.bump_fmt();
        Ok(())
    }

    /// Parse `%u`, which is a weekday number with Monday being `1` and
    /// Sunday being `7`.
    fn parse_weekday_mon(&mut self) -> Result<(), Error> {
        let (weekday, inp) =
            parse_number(1, self.inp).context(PE::ParseWeekdayNumber)?;
        self.inp = inp;

        let weekday =
            i8::try_from(weekday).map_err(|_| PE::ParseWeekdayNumber)?;
        let weekday = Weekday::from_monday_one_offset(weekday)
            .context(PE::ParseWeekdayNumber)?;
        self.tm.weekday = Some(weekday);
        self.bump_fmt();
        Ok(())
    }

    /// Parse `%w`, which is a weekday number with Sunday being `0`.
    fn parse_weekday_sun(&mut self) -> Result<(), Error> {
        let (weekday, inp) =
            parse_number(1, self.inp).context(PE::ParseWeekdayNumber)?;
        self.inp = inp;

        let weekday =
            i8::try_from(weekday).map_err(|_| PE::ParseWeekdayNumber)?;
        let weekday = Weekday::from_sunday_zero_offset(weekday)
            .context(PE::ParseWeekdayNumber)?;
        self.tm.weekday = Some(weekday);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%Y`, which we permit to be any year of up to 4 digits,
    /// including a negative year.
    fn parse_year(&mut self) -> Result<(), Error> {
        let (sign, inp) = parse_optional_sign(self.inp);
        let (year, inp) = parse_number(4, inp).context(PE::ParseYear)?;
        self.inp = inp;

        // OK because sign=={1,-1} and year can't be bigger than 4 digits
        // so overflow isn't possible.
        let year = b::Year::check(sign * year).context(PE::ParseYear)?;
        self.tm.year = Some(year);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%y`, which is equivalent to a 2-digit year.
    ///
    /// The numbers 69-99 refer to 1969-1999, while 00-68 refer to 2000-2068.
    fn parse_year2(&mut self) -> Result<(), Error> {
        let (year, inp) =
            parse_number(2, self.inp).context(PE::ParseYearTwoDigit)?;
        self.inp = inp;

        let year =
            b::YearTwoDigit::check(year).context(PE::ParseYearTwoDigit)?;
        let year = i32::from(year);
        self.tm.year = Some(if year <= 68 { year + 2000 } else { year + 1900 });
        self.bump_fmt();
        Ok(())
    }
}

/// Parses an unsigned integer of at most `max_digits` digits.
///
/// Leading whitespace is skipped, which permits space padded numbers like
/// ` 5` from `%e` to round trip. The remaining input is returned. This
/// returns an error if no digits were found.
fn parse_number<'i>(
    max_digits: usize,
    mut inp: &'i [u8],
) -> Result<(i64, &'i [u8]), Error> {
    while inp.first().map_or(false, |b| b.is_ascii_whitespace()) {
        inp = &inp[1..];
    }
    let mut digits = 0;
    let mut n: i64 = 0;
    while digits < inp.len()
        && digits < max_digits
        && inp[digits].is_ascii_digit()
    {
        let digit = i64::from(inp[digits] - b'0');
        digits += 1;
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or(ParseIntError::TooBig)?;
    }
    if digits == 0 {
        return Err(Error::from(match inp.first() {
            None => ParseIntError::NoDigitsFound,
            Some(&byte) => ParseIntError::InvalidDigit(byte),
        }));
    }
    Ok((n, &inp[digits..]))
}

/// Parses 1 to 3 digits of a fractional second, and returns it scaled to
/// milliseconds. So `5` is `500` and `05` is `50`.
fn parse_fraction<'i>(inp: &'i [u8]) -> Result<(i16, &'i [u8]), Error> {
    let len = inp.iter().take(3).take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return Err(Error::from(PE::ExpectedFractionalDigit));
    }
    let (digits, inp) = inp.split_at(len);
    let mut millisecond: i16 = 0;
    for &digit in digits {
        millisecond = millisecond * 10 + i16::from(digit - b'0');
    }
    for _ in len..3 {
        millisecond *= 10;
    }
    let millisecond = b::Millisecond::check(millisecond)
        .context(PE::ParseFractionalSeconds)?;
    Ok((millisecond, inp))
}

/// Parses an optional sign from the beginning of the input. If one isn't
/// found, then the sign returned is positive.
///
/// This also returns the remaining unparsed input.
fn parse_optional_sign<'i>(input: &'i [u8]) -> (i64, &'i [u8]) {
    match input.first() {
        Some(&b'-') => (-1, &input[1..]),
        Some(&b'+') => (1, &input[1..]),
        _ => (1, input),
    }
}

/// Parses the input such that, on success, the index of the first matching
/// choice (via ASCII case insensitive comparisons) is returned, along with
/// any remaining unparsed input.
///
/// If no choice given is a prefix of the input, then an error is returned.
/// The error includes the possible allowed choices.
fn parse_choice<'i>(
    input: &'i [u8],
    choices: &'static [&'static [u8]],
) -> Result<(usize, &'i [u8]), Error> {
    for (i, choice) in choices.iter().enumerate() {
        if input.len() < choice.len() {
            continue;
        }
        let (candidate, input) = input.split_at(choice.len());
        if candidate.eq_ignore_ascii_case(choice) {
            return Ok((i, input));
        }
    }
    Err(Error::from(PE::ExpectedChoice { available: choices }))
}

/// Like `parse_choice`, but specialized for AM/PM.
fn parse_ampm<'i>(input: &'i [u8]) -> Result<(usize, &'i [u8]), Error> {
    if input.len() < 2 {
        return Err(Error::from(PE::ExpectedAmPmTooShort));
    }
    let (x, input) = input.split_at(2);
    let candidate = &[x[0].to_ascii_lowercase(), x[1].to_ascii_lowercase()];
    let index = match candidate {
        b"am" => 0,
        b"pm" => 1,
        _ => return Err(Error::from(PE::ExpectedAmPm)),
    };
    Ok((index, input))
}

/// Like `parse_choice`, but specialized for weekday abbreviation.
fn parse_weekday_abbrev<'i>(
    input: &'i [u8],
) -> Result<(usize, &'i [u8]), Error> {
    if input.len() < 3 {
        return Err(Error::from(PE::ExpectedWeekdayAbbreviationTooShort));
    }
    let (x, input) = input.split_at(3);
    let candidate = &[
        x[0].to_ascii_lowercase(),
        x[1].to_ascii_lowercase(),
        x[2].to_ascii_lowercase(),
    ];
    let index = match candidate {
        b"sun" => 0,
        b"mon" => 1,
        b"tue" => 2,
        b"wed" => 3,
        b"thu" => 4,
        b"fri" => 5,
        b"sat" => 6,
        _ => return Err(Error::from(PE::ExpectedWeekdayAbbreviation)),
    };
    Ok((index, input))
}

/// Like `parse_choice`, but specialized for month name abbreviation.
fn parse_month_name_abbrev<'i>(
    input: &'i [u8],
) -> Result<(usize, &'i [u8]), Error> {
    if input.len() < 3 {
        return Err(Error::from(PE::ExpectedMonthAbbreviationTooShort));
    }
    let (x, input) = input.split_at(3);
    let candidate = &[
        x[0].to_ascii_lowercase(),
        x[1].to_ascii_lowercase(),
        x[2].to_ascii_lowercase(),
    ];
    let index = match candidate {
        b"jan" => 0,
        b"feb" => 1,
        b"mar" => 2,
        b"apr" => 3,
        b"may" => 4,
        b"jun" => 5,
        b"jul" => 6,
        b"aug" => 7,
        b"sep" => 8,
        b"oct" => 9,
        b"nov" => 10,
        b"dec" => 11,
        _ => return Err(Error::from(PE::ExpectedMonthAbbreviation)),
    };
    Ok((index, input))
}
