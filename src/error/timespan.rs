use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ConvertNegative,
    ConvertTooBig,
    DivideByZero,
    OverflowAdd,
    OverflowDiv,
    OverflowMul,
    OverflowNeg,
    OverflowSub,
    OverflowUnit { unit: &'static str },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TimeSpan(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            ConvertNegative => f.write_str(
                "cannot convert negative time span \
                 to unsigned `core::time::Duration`",
            ),
            ConvertTooBig => f.write_str(
                "unsigned `core::time::Duration` is too big \
                 to fit in a time span",
            ),
            DivideByZero => f.write_str("time span division by zero"),
            OverflowAdd => f.write_str("adding time spans overflowed"),
            OverflowDiv => f.write_str("dividing time span overflowed"),
            OverflowMul => f.write_str("multiplying time span overflowed"),
            OverflowNeg => f.write_str("negating time span overflowed"),
            OverflowSub => f.write_str("subtracting time spans overflowed"),
            OverflowUnit { unit } => write!(
                f,
                "converting {unit} to milliseconds overflowed \
                 a 64-bit integer",
            ),
        }
    }
}
