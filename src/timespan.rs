use crate::{error::timespan::Error as E, Error};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// A signed duration of time with millisecond precision.
///
/// A `TimeSpan` is a single 64-bit integer number of milliseconds. Any `i64`
/// value is a valid time span, including negative values. There are no units
/// bigger than days: a day is always exactly 24 hours.
///
/// # Construction
///
/// A time span can be built from a single unit with routines like
/// [`TimeSpan::from_hours`], or from a mix of units with [`TimeSpan::new`].
/// Mixed signs are allowed and are simply summed:
///
/// ```
/// use fdate::TimeSpan;
///
/// let span = TimeSpan::new(1, -1, 0, 0, 0);
/// assert_eq!(span, TimeSpan::from_hours(23));
/// ```
///
/// The shorthand constructors panic when the result overflows an `i64`. The
/// `try_` variants, like [`TimeSpan::try_from_days`], return an error instead.
///
/// # Components and totals
///
/// A time span can be viewed in two ways. Its [components](TimeSpan::components)
/// break it down into days, hours, minutes, seconds and milliseconds, where
/// each component is bounded by the size of the next bigger unit. Its totals,
/// like [`TimeSpan::total_minutes`], express the entire span in one unit,
/// truncated toward zero.
///
/// Every component of a negative time span is zero or negative:
///
/// ```
/// use fdate::TimeSpan;
///
/// let span = -TimeSpan::new(1, 2, 3, 4, 5);
/// assert_eq!(span.days(), -1);
/// assert_eq!(span.hours(), -2);
/// assert_eq!(span.minutes(), -3);
/// assert_eq!(span.seconds(), -4);
/// assert_eq!(span.milliseconds(), -5);
/// assert_eq!(span.total_hours(), -26);
/// ```
///
/// # Arithmetic
///
/// Time spans support addition, subtraction, negation, and multiplication and
/// division by an integer. The operator forms panic on overflow (and on
/// division by zero). The `checked_` methods return an error instead.
///
/// # Display
///
/// The `Display` impl renders `HH:MM:SS`, prefixed with `{days}d ` when the
/// days component is non-zero and suffixed with `.mmm` when the milliseconds
/// component is non-zero:
///
/// ```
/// use fdate::TimeSpan;
///
/// assert_eq!(TimeSpan::new(1, 2, 3, 4, 5).to_string(), "1d 02:03:04.005");
/// assert_eq!(TimeSpan::new(0, 2, 3, 4, 0).to_string(), "02:03:04");
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct TimeSpan {
    millis: i64,
}

/// The sign-uniform breakdown of a [`TimeSpan`].
///
/// This is returned by [`TimeSpan::components`]. Each field carries the sign
/// of the time span it came from, and summing each field's millisecond
/// equivalent reproduces the total exactly.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Components {
    /// The number of whole days.
    pub days: i64,
    /// Hours in the range `-23..=23`.
    pub hours: i8,
    /// Minutes in the range `-59..=59`.
    pub minutes: i8,
    /// Seconds in the range `-59..=59`.
    pub seconds: i8,
    /// Milliseconds in the range `-999..=999`.
    pub milliseconds: i16,
}

impl TimeSpan {
    /// A time span of zero length.
    pub const ZERO: TimeSpan = TimeSpan { millis: 0 };

    /// The smallest possible time span, `i64::MIN` milliseconds.
    pub const MIN: TimeSpan = TimeSpan { millis: i64::MIN };

    /// The largest possible time span, `i64::MAX` milliseconds.
    pub const MAX: TimeSpan = TimeSpan { millis: i64::MAX };

    /// Creates a time span by summing the given units.
    ///
    /// # Panics
    ///
    /// When the sum overflows a 64-bit count of milliseconds. Use
    /// [`TimeSpan::try_new`] to get an error instead.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::TimeSpan;
    ///
    /// let span = TimeSpan::new(1, 2, 3, 4, 5);
    /// assert_eq!(span.total_milliseconds(), 93_784_005);
    /// ```
    #[inline]
    pub fn new(
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
    ) -> TimeSpan {
        TimeSpan::try_new(days, hours, minutes, seconds, milliseconds)
            .expect("time span components overflowed")
    }

    /// Creates a time span by summing the given units.
    ///
    /// # Errors
    ///
    /// When any unit, or their sum, overflows a 64-bit count of milliseconds.
    #[inline]
    pub fn try_new(
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
    ) -> Result<TimeSpan, Error> {
        let mut span = TimeSpan::try_from_days(days)?;
        span = span.checked_add(TimeSpan::try_from_hours(hours)?)?;
        span = span.checked_add(TimeSpan::try_from_minutes(minutes)?)?;
        span = span.checked_add(TimeSpan::try_from_seconds(seconds)?)?;
        span.checked_add(TimeSpan::from_milliseconds(milliseconds))
    }

    /// Creates a time span of the given number of days.
    ///
    /// # Panics
    ///
    /// When the result overflows. Use [`TimeSpan::try_from_days`] to get an
    /// error instead.
    #[inline]
    pub const fn from_days(days: i64) -> TimeSpan {
        match days.checked_mul(MILLIS_PER_DAY) {
            Some(millis) => TimeSpan { millis },
            None => panic!("value for days is out of bounds"),
        }
    }

    /// Creates a time span of the given number of hours.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[inline]
    pub const fn from_hours(hours: i64) -> TimeSpan {
        match hours.checked_mul(MILLIS_PER_HOUR) {
            Some(millis) => TimeSpan { millis },
            None => panic!("value for hours is out of bounds"),
        }
    }

    /// Creates a time span of the given number of minutes.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[inline]
    pub const fn from_minutes(minutes: i64) -> TimeSpan {
        match minutes.checked_mul(MILLIS_PER_MINUTE) {
            Some(millis) => TimeSpan { millis },
            None => panic!("value for minutes is out of bounds"),
        }
    }

    /// Creates a time span of the given number of seconds.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[inline]
    pub const fn from_seconds(seconds: i64) -> TimeSpan {
        match seconds.checked_mul(MILLIS_PER_SECOND) {
            Some(millis) => TimeSpan { millis },
            None => panic!("value for seconds is out of bounds"),
        }
    }

    /// Creates a time span of the given number of milliseconds.
    ///
    /// This never fails.
    #[inline]
    pub const fn from_milliseconds(milliseconds: i64) -> TimeSpan {
        TimeSpan { millis: milliseconds }
    }

    /// Like [`TimeSpan::from_days`], but returns an error on overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::TimeSpan;
    ///
    /// assert!(TimeSpan::try_from_days(i64::MAX).is_err());
    /// assert_eq!(TimeSpan::try_from_days(2)?, TimeSpan::from_hours(48));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn try_from_days(days: i64) -> Result<TimeSpan, Error> {
        TimeSpan::try_from_unit(days, MILLIS_PER_DAY, "days")
    }

    /// Like [`TimeSpan::from_hours`], but returns an error on overflow.
    #[inline]
    pub fn try_from_hours(hours: i64) -> Result<TimeSpan, Error> {
        TimeSpan::try_from_unit(hours, MILLIS_PER_HOUR, "hours")
    }

    /// Like [`TimeSpan::from_minutes`], but returns an error on overflow.
    #[inline]
    pub fn try_from_minutes(minutes: i64) -> Result<TimeSpan, Error> {
        TimeSpan::try_from_unit(minutes, MILLIS_PER_MINUTE, "minutes")
    }

    /// Like [`TimeSpan::from_seconds`], but returns an error on overflow.
    #[inline]
    pub fn try_from_seconds(seconds: i64) -> Result<TimeSpan, Error> {
        TimeSpan::try_from_unit(seconds, MILLIS_PER_SECOND, "seconds")
    }

    #[inline]
    fn try_from_unit(
        value: i64,
        millis_per_unit: i64,
        unit: &'static str,
    ) -> Result<TimeSpan, Error> {
        let millis = value
            .checked_mul(millis_per_unit)
            .ok_or(E::OverflowUnit { unit })?;
        Ok(TimeSpan { millis })
    }

    /// Breaks this time span down into days, hours, minutes, seconds and
    /// milliseconds.
    ///
    /// Every component has the same sign as this time span (or is zero).
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::{Components, TimeSpan};
    ///
    /// let span = TimeSpan::from_milliseconds(-90_061_001);
    /// assert_eq!(span.components(), Components {
    ///     days: -1,
    ///     hours: -1,
    ///     minutes: -1,
    ///     seconds: -1,
    ///     milliseconds: -1,
    /// });
    /// ```
    #[inline]
    pub fn components(self) -> Components {
        // Working on the magnitude as a `u64` means `i64::MIN` needs no
        // special casing.
        let mut rest = self.millis.unsigned_abs();
        let milliseconds = (rest % 1_000) as i16;
        rest /= 1_000;
        let seconds = (rest % 60) as i8;
        rest /= 60;
        let minutes = (rest % 60) as i8;
        rest /= 60;
        let hours = (rest % 24) as i8;
        let days = (rest / 24) as i64;
        if self.millis < 0 {
            Components {
                days: -days,
                hours: -hours,
                minutes: -minutes,
                seconds: -seconds,
                milliseconds: -milliseconds,
            }
        } else {
            Components { days, hours, minutes, seconds, milliseconds }
        }
    }

    /// Returns the days component of this time span.
    #[inline]
    pub fn days(self) -> i64 {
        self.components().days
    }

    /// Returns the hours component of this time span, in `-23..=23`.
    #[inline]
    pub fn hours(self) -> i8 {
        self.components().hours
    }

    /// Returns the minutes component of this time span, in `-59..=59`.
    #[inline]
    pub fn minutes(self) -> i8 {
        self.components().minutes
    }

    /// Returns the seconds component of this time span, in `-59..=59`.
    #[inline]
    pub fn seconds(self) -> i8 {
        self.components().seconds
    }

    /// Returns the milliseconds component of this time span, in
    /// `-999..=999`.
    #[inline]
    pub fn milliseconds(self) -> i16 {
        self.components().milliseconds
    }

    /// Returns the number of whole days in this time span, truncated toward
    /// zero.
    #[inline]
    pub fn total_days(self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    /// Returns the number of whole hours in this time span, truncated toward
    /// zero.
    #[inline]
    pub fn total_hours(self) -> i64 {
        self.millis / MILLIS_PER_HOUR
    }

    /// Returns the number of whole minutes in this time span, truncated
    /// toward zero.
    #[inline]
    pub fn total_minutes(self) -> i64 {
        self.millis / MILLIS_PER_MINUTE
    }

    /// Returns the number of whole seconds in this time span, truncated
    /// toward zero.
    #[inline]
    pub fn total_seconds(self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    /// Returns this time span as a number of milliseconds.
    #[inline]
    pub const fn total_milliseconds(self) -> i64 {
        self.millis
    }

    /// Returns true if this time span has zero length.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.millis == 0
    }

    /// Returns true if this time span is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.millis < 0
    }

    /// Returns `-1`, `0` or `1` depending on the sign of this time span.
    #[inline]
    pub const fn signum(self) -> i8 {
        self.millis.signum() as i8
    }

    /// Adds two time spans.
    ///
    /// # Errors
    ///
    /// When the sum overflows.
    #[inline]
    pub fn checked_add(self, rhs: TimeSpan) -> Result<TimeSpan, Error> {
        let millis = self.millis.checked_add(rhs.millis).ok_or(E::OverflowAdd)?;
        Ok(TimeSpan { millis })
    }

    /// Subtracts `rhs` from this time span.
    ///
    /// # Errors
    ///
    /// When the difference overflows.
    #[inline]
    pub fn checked_sub(self, rhs: TimeSpan) -> Result<TimeSpan, Error> {
        let millis = self.millis.checked_sub(rhs.millis).ok_or(E::OverflowSub)?;
        Ok(TimeSpan { millis })
    }

    /// Multiplies this time span by an integer.
    ///
    /// # Errors
    ///
    /// When the product overflows.
    #[inline]
    pub fn checked_mul(self, rhs: i64) -> Result<TimeSpan, Error> {
        let millis = self.millis.checked_mul(rhs).ok_or(E::OverflowMul)?;
        Ok(TimeSpan { millis })
    }

    /// Divides this time span by an integer, truncating toward zero.
    ///
    /// # Errors
    ///
    /// When `rhs` is zero, or when dividing `TimeSpan::MIN` by `-1`.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::TimeSpan;
    ///
    /// let span = TimeSpan::from_days(6).checked_div(4)?;
    /// assert_eq!(span, TimeSpan::from_hours(36));
    ///
    /// let err = TimeSpan::from_days(6).checked_div(0).unwrap_err();
    /// assert!(err.is_divide_by_zero());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_div(self, rhs: i64) -> Result<TimeSpan, Error> {
        if rhs == 0 {
            return Err(Error::from(E::DivideByZero));
        }
        let millis = self.millis.checked_div(rhs).ok_or(E::OverflowDiv)?;
        Ok(TimeSpan { millis })
    }

    /// Negates this time span.
    ///
    /// # Errors
    ///
    /// Only for `TimeSpan::MIN`, whose negation isn't representable.
    #[inline]
    pub fn checked_neg(self) -> Result<TimeSpan, Error> {
        let millis = self.millis.checked_neg().ok_or(E::OverflowNeg)?;
        Ok(TimeSpan { millis })
    }

    /// Returns the absolute value of this time span.
    ///
    /// # Errors
    ///
    /// Only for `TimeSpan::MIN`.
    #[inline]
    pub fn checked_abs(self) -> Result<TimeSpan, Error> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Returns the absolute value of this time span.
    ///
    /// # Panics
    ///
    /// Only for `TimeSpan::MIN`.
    #[inline]
    pub fn abs(self) -> TimeSpan {
        self.checked_abs().expect("absolute value of time span overflowed")
    }
}

impl core::fmt::Debug for TimeSpan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("TimeSpan").field(&self.millis).finish()
    }
}

impl core::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let Components { days, hours, minutes, seconds, milliseconds } =
            self.components();
        if days != 0 {
            write!(f, "{days}d ")?;
        }
        // Zero padding is sign aware, so -5 milliseconds is `.-05` and not
        // the fill-then-sign `.0-5` that width padding alone would give.
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if milliseconds != 0 {
            write!(f, ".{milliseconds:03}")?;
        }
        Ok(())
    }
}

/// Adds two time spans.
///
/// This panics on overflow. For checked arithmetic, use
/// [`TimeSpan::checked_add`].
impl core::ops::Add for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn add(self, rhs: TimeSpan) -> TimeSpan {
        self.checked_add(rhs).expect("adding `TimeSpan`s overflowed")
    }
}

impl core::ops::AddAssign for TimeSpan {
    #[inline]
    fn add_assign(&mut self, rhs: TimeSpan) {
        *self = *self + rhs;
    }
}

/// Subtracts two time spans.
///
/// This panics on overflow. For checked arithmetic, use
/// [`TimeSpan::checked_sub`].
impl core::ops::Sub for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: TimeSpan) -> TimeSpan {
        self.checked_sub(rhs).expect("subtracting `TimeSpan`s overflowed")
    }
}

impl core::ops::SubAssign for TimeSpan {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeSpan) {
        *self = *self - rhs;
    }
}

/// Multiplies a time span by an integer.
///
/// This panics on overflow. For checked arithmetic, use
/// [`TimeSpan::checked_mul`].
impl core::ops::Mul<i64> for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn mul(self, rhs: i64) -> TimeSpan {
        self.checked_mul(rhs)
            .expect("multiplying `TimeSpan` by a scalar overflowed")
    }
}

/// Multiplies a time span by an integer.
///
/// This panics on overflow. For checked arithmetic, use
/// [`TimeSpan::checked_mul`].
impl core::ops::Mul<TimeSpan> for i64 {
    type Output = TimeSpan;

    #[inline]
    fn mul(self, rhs: TimeSpan) -> TimeSpan {
        rhs * self
    }
}

impl core::ops::MulAssign<i64> for TimeSpan {
    #[inline]
    fn mul_assign(&mut self, rhs: i64) {
        *self = *self * rhs;
    }
}

/// Divides a time span by an integer, truncating toward zero.
///
/// This panics when dividing by zero, or on overflow. For checked
/// arithmetic, use [`TimeSpan::checked_div`].
impl core::ops::Div<i64> for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn div(self, rhs: i64) -> TimeSpan {
        match self.checked_div(rhs) {
            Ok(span) => span,
            Err(err) if err.is_divide_by_zero() => {
                panic!("dividing `TimeSpan` by zero")
            }
            Err(_) => panic!("dividing `TimeSpan` by a scalar overflowed"),
        }
    }
}

impl core::ops::DivAssign<i64> for TimeSpan {
    #[inline]
    fn div_assign(&mut self, rhs: i64) {
        *self = *self / rhs;
    }
}

impl core::ops::Neg for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn neg(self) -> TimeSpan {
        self.checked_neg().expect("negating `TimeSpan::MIN` overflowed")
    }
}

impl core::iter::Sum for TimeSpan {
    fn sum<I: Iterator<Item = TimeSpan>>(iter: I) -> TimeSpan {
        iter.fold(TimeSpan::ZERO, |acc, span| acc + span)
    }
}

impl<'a> core::iter::Sum<&'a TimeSpan> for TimeSpan {
    fn sum<I: Iterator<Item = &'a TimeSpan>>(iter: I) -> TimeSpan {
        iter.copied().sum()
    }
}

/// Converts a `TimeSpan` to an unsigned [`core::time::Duration`].
///
/// # Errors
///
/// When the time span is negative.
impl TryFrom<TimeSpan> for core::time::Duration {
    type Error = Error;

    fn try_from(span: TimeSpan) -> Result<core::time::Duration, Error> {
        let millis = u64::try_from(span.millis)
            .map_err(|_| Error::from(E::ConvertNegative))?;
        Ok(core::time::Duration::from_millis(millis))
    }
}

/// Converts a [`core::time::Duration`] to a `TimeSpan`.
///
/// Precision beyond milliseconds is truncated.
///
/// # Errors
///
/// When the duration exceeds `i64::MAX` milliseconds.
impl TryFrom<core::time::Duration> for TimeSpan {
    type Error = Error;

    fn try_from(duration: core::time::Duration) -> Result<TimeSpan, Error> {
        let millis = i64::try_from(duration.as_millis())
            .map_err(|_| Error::from(E::ConvertTooBig))?;
        Ok(TimeSpan { millis })
    }
}

/// Serializes as an integer number of milliseconds.
#[cfg(feature = "serde")]
impl serde::Serialize for TimeSpan {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.millis)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeSpan {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimeSpan, D::Error> {
        let millis = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(TimeSpan::from_milliseconds(millis))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for TimeSpan {
    fn arbitrary(g: &mut quickcheck::Gen) -> TimeSpan {
        let millis = <i64 as quickcheck::Arbitrary>::arbitrary(g);
        TimeSpan::from_milliseconds(millis)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        let millis = quickcheck::Arbitrary::shrink(&self.millis);
        alloc::boxed::Box::new(millis.map(TimeSpan::from_milliseconds))
    }
}
