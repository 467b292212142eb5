use alloc::{boxed::Box, sync::Arc};

pub(crate) mod datetime;
pub(crate) mod fmt;
pub(crate) mod timespan;
pub(crate) mod util;

/// An error that can occur in this crate.
///
/// Most errors are a result of overflow. For example, adding two time spans
/// whose sum doesn't fit into a 64-bit count of milliseconds, or dividing a
/// time span by zero. The other common source of errors is
/// [`DateTime::strptime`](crate::DateTime::strptime), which reports why an
/// input didn't match a format string.
///
/// Note that routines like [`DateTime::parse`](crate::DateTime::parse)
/// return an `Option` instead. They throw the error away.
///
/// # Introspection is limited
///
/// Other than implementing the [`std::error::Error`] trait when the
/// `std` feature is enabled, the [`core::fmt::Debug`] trait and the
/// [`core::fmt::Display`] trait, this error type currently provides
/// very limited introspection capabilities. Simple predicates like
/// [`Error::is_range`] are provided, but the predicates are not exhaustive.
///
/// # Design
///
/// There is only one error type for every fallible operation in this crate.
/// An error may have a cause, which in turn may have a cause and so on. The
/// `Display` impl prints the whole chain, starting with the highest level
/// context and ending with the root cause.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cheaply cloneable, and to keep
    /// its size down to one word. Many of the hot routines in this crate
    /// return a `Result<T, Error>`.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// Callers should generally use their own error types. But in some
    /// circumstances, it can be convenient to manufacture an `fdate` error
    /// value specifically.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated as a result of a value being
    /// out of its supported range.
    ///
    /// This includes integer overflow in time span and date-time arithmetic,
    /// and parsed fields that are out of bounds (like a minute of `61`).
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::{DateTime, TimeSpan};
    ///
    /// assert!(TimeSpan::MAX.checked_add(TimeSpan::from_days(1)).unwrap_err().is_range());
    /// assert!(DateTime::strptime("%H:%M", "12:61").unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        use self::{
            datetime::Error as DateTimeError, timespan::Error as SpanError,
        };

        matches!(
            *self.root().kind(),
            ErrorKind::Range(_)
                | ErrorKind::TimeSpan(
                    SpanError::ConvertNegative
                        | SpanError::ConvertTooBig
                        | SpanError::OverflowAdd
                        | SpanError::OverflowDiv
                        | SpanError::OverflowMul
                        | SpanError::OverflowNeg
                        | SpanError::OverflowSub
                        | SpanError::OverflowUnit { .. }
                )
                | ErrorKind::DateTime(
                    DateTimeError::OverflowAddSpan
                        | DateTimeError::OverflowCivil
                        | DateTimeError::OverflowSince
                        | DateTimeError::OverflowSubSpan
                )
        )
    }

    /// Returns true when this error originated from dividing a time span by
    /// zero.
    ///
    /// # Example
    ///
    /// ```
    /// use fdate::TimeSpan;
    ///
    /// let err = TimeSpan::from_days(6).checked_div(0).unwrap_err();
    /// assert!(err.is_divide_by_zero());
    /// ```
    pub fn is_divide_by_zero(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::TimeSpan(timespan::Error::DivideByZero)
        )
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "minute")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(always)]
    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        let inner = Arc::get_mut(&mut err.inner)
            .expect("consequent error must be freshly created");
        assert!(inner.cause.is_none(), "cause of consequence must be `None`");
        inner.cause = Some(self);
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    DateTime(self::datetime::Error),
    FmtStrtime(self::fmt::strtime::Error),
    FmtStrtimeParse(self::fmt::strtime::ParseError),
    ParseInt(self::util::ParseIntError),
    Range(RangeError),
    TimeSpan(self::timespan::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            DateTime(ref err) => err.fmt(f),
            FmtStrtime(ref err) => err.fmt(f),
            FmtStrtimeParse(ref err) => err.fmt(f),
            ParseInt(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            TimeSpan(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// This exists to support the `Error::from_args` public API, which permits
/// users of this crate to manifest their own `Error` values from an
/// arbitrary message.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError { what, given: given.into(), min: min.into(), max: max.into() }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls. Each internal error enum implements it,
/// which keeps those enums out of the public API.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful if the creation of the consequent error is not otherwise
    /// guarded and when error construction is potentially "costly" (i.e., it
    /// allocates). The closure avoids paying the cost of contextual error
    /// creation in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: IntoError,
{
    #[inline(always)]
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    #[inline(always)]
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // We test that our 'Error' type is the size we expect. This isn't an API
    // guarantee, but if the size increases, we really want to make sure we
    // decide to do that intentionally.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let root = Error::range("minute", 61, 0, 59);
        let err = root.context(Error::from_args(format_args!("outer")));
        insta::assert_snapshot!(
            err,
            @"outer: parameter 'minute' with value 61 is not in the required range of 0..=59"
        );
        assert!(err.is_range());
        assert!(!err.is_divide_by_zero());
    }

    #[test]
    fn adhoc_is_not_range() {
        let err = Error::from_args(format_args!("nope"));
        assert!(!err.is_range());
        assert_eq!(alloc::format!("{err:?}"), "nope");
    }
}
