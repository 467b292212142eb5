use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    OverflowAddSpan,
    OverflowCivil,
    OverflowSince,
    OverflowSubSpan,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::DateTime(err).into()
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
            OverflowAddSpan => {
                f.write_str("adding time span overflowed datetime")
            }
            OverflowCivil => f.write_str(
                "civil date and time overflowed the range of \
                 64-bit millisecond timestamps",
            ),
            OverflowSince => f.write_str(
                "time span between datetimes overflowed \
                 64-bit millisecond count",
            ),
            OverflowSubSpan => {
                f.write_str("subtracting time span overflowed datetime")
            }
        }
    }
}
