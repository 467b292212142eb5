/*!
A module for the bounds of the individual fields recognized by the strftime
parser.

Each bound is a zero sized type with an associated `check` routine that
returns a range error naming the field when a value is out of bounds.
*/

use crate::Error;

macro_rules! define_bounds {
    ($((
        $name:ident,
        $ty:ty,
        $what:expr,
        $min:expr,
        $max:expr $(,)?
    )),* $(,)?) => {
        $(
            pub(crate) struct $name(());

            impl $name {
                pub(crate) const WHAT: &'static str = $what;
                pub(crate) const MIN: $ty = $min;
                pub(crate) const MAX: $ty = $max;

                /// Checks that `n` is within this bound, and returns it as
                /// this bound's primitive type when it is.
                #[inline]
                pub(crate) fn check(n: impl Into<i64>) -> Result<$ty, Error> {
                    let n = n.into();
                    if !(i64::from(Self::MIN) <= n && n <= i64::from(Self::MAX)) {
                        return Err(Error::range(
                            Self::WHAT,
                            n,
                            Self::MIN,
                            Self::MAX,
                        ));
                    }
                    // OK because the range check above guarantees `n` is
                    // within `MIN..=MAX`, both of which are `$ty`.
                    Ok(n as $ty)
                }
            }
        )*
    }
}

define_bounds! {
    (Day, i8, "day", 1, 31),
    (DayOfYear, i16, "day-of-year", 1, 366),
    (Hour, i8, "hour", 0, 23),
    (Hour12, i8, "hour (12 hour clock)", 1, 12),
    (Millisecond, i16, "millisecond", 0, 999),
    (Minute, i8, "minute", 0, 59),
    (Month, i8, "month", 1, 12),
    // This is only used in parsing. A value of `60` gets clamped to `59`.
    (LeapSecond, i8, "second", 0, 60),
    (WeekdayMondayOne, i8, "weekday (Monday is 1)", 1, 7),
    (WeekdaySundayZero, i8, "weekday (Sunday is 0)", 0, 6),
    (Year, i32, "year", i32::MIN, i32::MAX),
    (YearTwoDigit, i8, "year (2 digits)", 0, 99),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_and_out_of_range() {
        assert_eq!(Minute::check(59).unwrap(), 59);
        assert_eq!(DayOfYear::check(366).unwrap(), 366);
        let err = Minute::check(60).unwrap_err();
        assert!(err.is_range());
        insta::assert_snapshot!(
            err,
            @"parameter 'minute' with value 60 is not in the required range of 0..=59"
        );
        assert!(Year::check(i64::from(i32::MAX) + 1).is_err());
    }
}
