use crate::{util::b, Error};

/// A representation for the day of the week.
///
/// The default representation follows ISO 8601. That is, the week starts with
/// Monday and numbering starts at `1`. Routines for the Sunday based numbering
/// used by the `%w` strftime directive are also provided.
///
/// # Example
///
/// ```
/// use fdate::{date, Weekday};
///
/// assert_eq!(date(2024, 7, 14).weekday(), Weekday::Sunday);
/// assert_eq!(Weekday::Sunday.to_monday_one_offset(), 7);
/// assert_eq!(Weekday::Sunday.to_sunday_zero_offset(), 0);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Convert an offset to a structured `Weekday`, where Monday is `1` and
    /// Sunday is `7`.
    ///
    /// # Errors
    ///
    /// This returns an error when `offset` is not in the range `1..=7`.
    #[inline]
    pub fn from_monday_one_offset(offset: i8) -> Result<Weekday, Error> {
        let offset = b::WeekdayMondayOne::check(offset)?;
        Ok(Weekday::from_sunday_zero_offset_unchecked(offset % 7))
    }

    /// Convert an offset to a structured `Weekday`, where Sunday is `0` and
    /// Saturday is `6`.
    ///
    /// # Errors
    ///
    /// This returns an error when `offset` is not in the range `0..=6`.
    #[inline]
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        let offset = b::WeekdaySundayZero::check(offset)?;
        Ok(Weekday::from_sunday_zero_offset_unchecked(offset))
    }

    /// Returns this weekday as an offset where Monday is `1` and Sunday is
    /// `7`.
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        match self.to_sunday_zero_offset() {
            0 => 7,
            n => n,
        }
    }

    /// Returns this weekday as an offset where Sunday is `0` and Saturday is
    /// `6`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    /// The full English name, e.g., `Monday`.
    pub(crate) fn name_full(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// The abbreviated English name, e.g., `Mon`.
    pub(crate) fn name_abbrev(self) -> &'static str {
        &self.name_full()[..3]
    }

    /// Callers must guarantee `0 <= offset <= 6`. Anything bigger is
    /// treated as Saturday.
    pub(crate) fn from_sunday_zero_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Weekday {
    fn arbitrary(g: &mut quickcheck::Gen) -> Weekday {
        let offset = <i8 as quickcheck::Arbitrary>::arbitrary(g);
        let offset = offset.rem_euclid(7);
        Weekday::from_sunday_zero_offset_unchecked(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_out_of_range() {
        assert!(Weekday::from_monday_one_offset(0).unwrap_err().is_range());
        assert!(Weekday::from_monday_one_offset(8).is_err());
        assert!(Weekday::from_sunday_zero_offset(7).is_err());
        assert!(Weekday::from_sunday_zero_offset(-1).is_err());
    }

    #[test]
    fn names() {
        assert_eq!(Weekday::Wednesday.name_full(), "Wednesday");
        assert_eq!(Weekday::Wednesday.name_abbrev(), "Wed");
    }

    quickcheck::quickcheck! {
        fn prop_roundtrip_monday_one(wd: Weekday) -> bool {
            let offset = wd.to_monday_one_offset();
            Weekday::from_monday_one_offset(offset).unwrap() == wd
        }

        fn prop_roundtrip_sunday_zero(wd: Weekday) -> bool {
            let offset = wd.to_sunday_zero_offset();
            Weekday::from_sunday_zero_offset(offset).unwrap() == wd
        }
    }
}
