/*!
A flat C interface for callers that can't use Rust types, like Fortran.

Every value crosses the boundary as a plain integer. A [`TimeSpan`] is its
total number of milliseconds, and a [`DateTime`] is its number of
milliseconds since the Unix epoch. Integer fields are `c_int`, and predicates
return `1` for true and `0` for false.

Since C has no optional type, failure is signaled with the sentinel
[`DateTime::INVALID_TIMESTAMP`], which is also available to callers via
[`f_invalid_timestamp`]. It is returned for parse failures, rejected
arguments, overflowing arithmetic and division by zero. Note that the
sentinel is itself a valid millisecond count, so a caller doing arithmetic
close to the limits of `i64` can't tell it apart from a real result.

Strings are passed as a pointer and an explicit length, and need not be NUL
terminated. Output strings are copied into a caller provided buffer,
truncated to `buffer_size - 1` bytes and then padded with NUL bytes up to
`buffer_size`.

Panics are caught at the boundary and reported as the sentinel (or as
`0`/nothing written, depending on the return type).
*/

use core::ffi::{c_char, c_int};

use alloc::string::ToString;

use crate::{DateTime, Error, TimeSpan};

/// Runs `$body`, and evaluates to `$default` if it panics.
macro_rules! catch_panic {
    ($default:expr, $body:expr) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body))
        {
            Ok(result) => result,
            Err(_) => {
                error!("caught panic at the C boundary");
                $default
            }
        }
    }};
}

const INVALID: i64 = DateTime::INVALID_TIMESTAMP;

/// Returns the sentinel used to signal failure, `-(2^63 - 1)`.
#[no_mangle]
pub extern "C" fn f_invalid_timestamp() -> i64 {
    INVALID
}

/// Creates a time span from the sum of the given units, and returns its
/// total milliseconds.
#[no_mangle]
pub extern "C" fn f_timespan_create(
    days: c_int,
    hours: c_int,
    minutes: c_int,
    seconds: c_int,
    milliseconds: c_int,
) -> i64 {
    catch_panic!(INVALID, {
        span_or_invalid(TimeSpan::try_new(
            i64::from(days),
            i64::from(hours),
            i64::from(minutes),
            i64::from(seconds),
            i64::from(milliseconds),
        ))
    })
}

#[no_mangle]
pub extern "C" fn f_timespan_from_days(days: i64) -> i64 {
    catch_panic!(INVALID, span_or_invalid(TimeSpan::try_from_days(days)))
}

#[no_mangle]
pub extern "C" fn f_timespan_from_hours(hours: i64) -> i64 {
    catch_panic!(INVALID, span_or_invalid(TimeSpan::try_from_hours(hours)))
}

#[no_mangle]
pub extern "C" fn f_timespan_from_minutes(minutes: i64) -> i64 {
    catch_panic!(
        INVALID,
        span_or_invalid(TimeSpan::try_from_minutes(minutes))
    )
}

#[no_mangle]
pub extern "C" fn f_timespan_from_seconds(seconds: i64) -> i64 {
    catch_panic!(
        INVALID,
        span_or_invalid(TimeSpan::try_from_seconds(seconds))
    )
}

/// This is the identity function. It exists for symmetry.
#[no_mangle]
pub extern "C" fn f_timespan_from_milliseconds(milliseconds: i64) -> i64 {
    TimeSpan::from_milliseconds(milliseconds).total_milliseconds()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_days(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).days()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_hours(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).hours().into()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_minutes(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).minutes().into()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_seconds(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).seconds().into()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_milliseconds(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).milliseconds().into()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_total_days(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).total_days()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_total_hours(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).total_hours()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_total_minutes(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).total_minutes()
}

#[no_mangle]
pub extern "C" fn f_timespan_get_total_seconds(ts: i64) -> i64 {
    TimeSpan::from_milliseconds(ts).total_seconds()
}

#[no_mangle]
pub extern "C" fn f_timespan_add(ts1: i64, ts2: i64) -> i64 {
    let (ts1, ts2) =
        (TimeSpan::from_milliseconds(ts1), TimeSpan::from_milliseconds(ts2));
    catch_panic!(INVALID, span_or_invalid(ts1.checked_add(ts2)))
}

#[no_mangle]
pub extern "C" fn f_timespan_subtract(ts1: i64, ts2: i64) -> i64 {
    let (ts1, ts2) =
        (TimeSpan::from_milliseconds(ts1), TimeSpan::from_milliseconds(ts2));
    catch_panic!(INVALID, span_or_invalid(ts1.checked_sub(ts2)))
}

#[no_mangle]
pub extern "C" fn f_timespan_multiply(ts: i64, factor: c_int) -> i64 {
    let ts = TimeSpan::from_milliseconds(ts);
    catch_panic!(INVALID, span_or_invalid(ts.checked_mul(i64::from(factor))))
}

/// Divides a time span by an integer, truncating toward zero. Dividing by
/// zero returns the sentinel.
#[no_mangle]
pub extern "C" fn f_timespan_divide(ts: i64, divisor: i64) -> i64 {
    let ts = TimeSpan::from_milliseconds(ts);
    catch_panic!(INVALID, span_or_invalid(ts.checked_div(divisor)))
}

/// Writes the `Display` form of a time span, like `1d 02:03:04.005`, into
/// `buffer`.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `buffer_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn f_timespan_to_string(
    ts: i64,
    buffer: *mut c_char,
    buffer_size: c_int,
) {
    catch_panic!((), {
        let text = TimeSpan::from_milliseconds(ts).to_string();
        copy_to_buffer(&text, buffer, buffer_size);
    })
}

#[no_mangle]
pub extern "C" fn f_timespan_equals(ts1: i64, ts2: i64) -> c_int {
    c_int::from(ts1 == ts2)
}

#[no_mangle]
pub extern "C" fn f_timespan_less_than(ts1: i64, ts2: i64) -> c_int {
    c_int::from(ts1 < ts2)
}

#[no_mangle]
pub extern "C" fn f_timespan_greater_than(ts1: i64, ts2: i64) -> c_int {
    c_int::from(ts1 > ts2)
}

#[no_mangle]
pub extern "C" fn f_timespan_less_equal(ts1: i64, ts2: i64) -> c_int {
    c_int::from(ts1 <= ts2)
}

#[no_mangle]
pub extern "C" fn f_timespan_greater_equal(ts1: i64, ts2: i64) -> c_int {
    c_int::from(ts1 >= ts2)
}

/// Creates a datetime from its civil components, and returns its
/// milliseconds since the Unix epoch.
///
/// Any negative component is rejected with the sentinel. Components that
/// are too big are normalized, so month `13` is January of the following
/// year.
#[no_mangle]
pub extern "C" fn f_datetime_create(
    year: c_int,
    month: c_int,
    day: c_int,
    hour: c_int,
    minute: c_int,
    second: c_int,
    millisecond: c_int,
) -> i64 {
    let fields = [year, month, day, hour, minute, second, millisecond];
    if fields.iter().any(|&field| field < 0) {
        warn!(
            "rejecting datetime with negative field: \
             {year}-{month}-{day} {hour}:{minute}:{second}.{millisecond}",
        );
        return INVALID;
    }
    catch_panic!(INVALID, {
        datetime_or_invalid(DateTime::new(
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        ))
    })
}

/// Returns the current time as milliseconds since the Unix epoch.
#[no_mangle]
pub extern "C" fn f_datetime_now() -> i64 {
    catch_panic!(INVALID, DateTime::now().timestamp_millis())
}

/// Parses `input` according to the strftime style `format`.
///
/// This follows the rules of [`DateTime::parse`]. Non-positive lengths,
/// null pointers, invalid UTF-8 and parse failures all return the sentinel.
///
/// # Safety
///
/// `input` must be null or valid for reads of `str_len` bytes, and likewise
/// for `format` and `format_len`.
#[no_mangle]
pub unsafe extern "C" fn f_datetime_parse(
    input: *const c_char,
    format: *const c_char,
    str_len: c_int,
    format_len: c_int,
) -> i64 {
    catch_panic!(INVALID, {
        let Some(input) = read_str(input, str_len) else {
            warn!("invalid input string given to parse (length {str_len})");
            return INVALID;
        };
        let Some(format) = read_str(format, format_len) else {
            warn!("invalid format string given to parse (length {format_len})");
            return INVALID;
        };
        match DateTime::parse(input, format) {
            Some(dt) => dt.timestamp_millis(),
            None => INVALID,
        }
    })
}

#[no_mangle]
pub extern "C" fn f_datetime_get_year(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).year().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_get_month(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).month().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_get_day(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).day().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_get_hour(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).hour().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_get_minute(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).minute().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_get_second(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).second().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_get_millisecond(dt: i64) -> i64 {
    DateTime::from_timestamp_millis(dt).millisecond().into()
}

#[no_mangle]
pub extern "C" fn f_datetime_add_timespan(dt: i64, ts: i64) -> i64 {
    let dt = DateTime::from_timestamp_millis(dt);
    let ts = TimeSpan::from_milliseconds(ts);
    catch_panic!(INVALID, datetime_or_invalid(dt.checked_add(ts)))
}

#[no_mangle]
pub extern "C" fn f_datetime_subtract_timespan(dt: i64, ts: i64) -> i64 {
    let dt = DateTime::from_timestamp_millis(dt);
    let ts = TimeSpan::from_milliseconds(ts);
    catch_panic!(INVALID, datetime_or_invalid(dt.checked_sub(ts)))
}

/// Returns `dt1 - dt2` as a time span in milliseconds.
#[no_mangle]
pub extern "C" fn f_datetime_difference(dt1: i64, dt2: i64) -> i64 {
    let dt1 = DateTime::from_timestamp_millis(dt1);
    let dt2 = DateTime::from_timestamp_millis(dt2);
    catch_panic!(INVALID, span_or_invalid(dt1.since(dt2)))
}

/// Formats a datetime with [`DateTime::format`] into `buffer`.
///
/// Nothing is written when `format` is invalid.
///
/// # Safety
///
/// `format` must be null or valid for reads of `format_len` bytes, and
/// `buffer` must be null or valid for writes of `buffer_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn f_datetime_format(
    dt: i64,
    format: *const c_char,
    buffer: *mut c_char,
    format_len: c_int,
    buffer_size: c_int,
) {
    catch_panic!((), {
        let Some(format) = read_str(format, format_len) else {
            warn!("invalid format string given to format (length {format_len})");
            return;
        };
        let text = DateTime::from_timestamp_millis(dt).format(format);
        copy_to_buffer(&text, buffer, buffer_size);
    })
}

/// Formats a datetime with [`DateTime::format_with_milliseconds`] into
/// `buffer`.
///
/// # Safety
///
/// The same requirements as [`f_datetime_format`] apply.
#[no_mangle]
pub unsafe extern "C" fn f_datetime_format_milliseconds(
    dt: i64,
    format: *const c_char,
    buffer: *mut c_char,
    format_len: c_int,
    buffer_size: c_int,
) {
    catch_panic!((), {
        let Some(format) = read_str(format, format_len) else {
            warn!("invalid format string given to format (length {format_len})");
            return;
        };
        let text =
            DateTime::from_timestamp_millis(dt).format_with_milliseconds(format);
        copy_to_buffer(&text, buffer, buffer_size);
    })
}

/// Writes `%Y-%m-%dT%H:%M:%S` into `buffer`.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `buffer_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn f_datetime_to_iso_string(
    dt: i64,
    buffer: *mut c_char,
    buffer_size: c_int,
) {
    catch_panic!((), {
        let text = DateTime::from_timestamp_millis(dt).to_iso_string();
        copy_to_buffer(&text, buffer, buffer_size);
    })
}

/// Writes `%Y-%m-%dT%H:%M:%S.mmm` into `buffer`.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `buffer_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn f_datetime_to_iso_string_milliseconds(
    dt: i64,
    buffer: *mut c_char,
    buffer_size: c_int,
) {
    catch_panic!((), {
        let text = DateTime::from_timestamp_millis(dt).to_iso_string_millis();
        copy_to_buffer(&text, buffer, buffer_size);
    })
}

#[no_mangle]
pub extern "C" fn f_datetime_equals(dt1: i64, dt2: i64) -> c_int {
    c_int::from(dt1 == dt2)
}

#[no_mangle]
pub extern "C" fn f_datetime_less_than(dt1: i64, dt2: i64) -> c_int {
    c_int::from(dt1 < dt2)
}

#[no_mangle]
pub extern "C" fn f_datetime_greater_than(dt1: i64, dt2: i64) -> c_int {
    c_int::from(dt1 > dt2)
}

#[no_mangle]
pub extern "C" fn f_datetime_less_equal(dt1: i64, dt2: i64) -> c_int {
    c_int::from(dt1 <= dt2)
}

#[no_mangle]
pub extern "C" fn f_datetime_greater_equal(dt1: i64, dt2: i64) -> c_int {
    c_int::from(dt1 >= dt2)
}

fn span_or_invalid(result: Result<TimeSpan, Error>) -> i64 {
    match result {
        Ok(span) => span.total_milliseconds(),
        Err(_err) => {
            debug!("time span operation failed at the C boundary: {_err}");
            INVALID
        }
    }
}

fn datetime_or_invalid(result: Result<DateTime, Error>) -> i64 {
    match result {
        Ok(dt) => dt.timestamp_millis(),
        Err(_err) => {
            debug!("datetime operation failed at the C boundary: {_err}");
            INVALID
        }
    }
}

/// Borrows `len` bytes at `ptr` as a string.
///
/// This returns `None` for a null pointer, a non-positive length or invalid
/// UTF-8.
///
/// # Safety
///
/// `ptr` must be null or valid for reads of `len` bytes for the lifetime
/// `'a`.
unsafe fn read_str<'a>(ptr: *const c_char, len: c_int) -> Option<&'a str> {
    if ptr.is_null() || len <= 0 {
        return None;
    }
    let len = usize::try_from(len).ok()?;
    // SAFETY: The caller guarantees `ptr` is valid for `len` bytes, and we
    // checked that it's non-null and that `len` is positive.
    let bytes = unsafe { core::slice::from_raw_parts(ptr.cast::<u8>(), len) };
    core::str::from_utf8(bytes).ok()
}

/// Copies `text` into `buffer`, truncated to `buffer_size - 1` bytes, and
/// fills the rest of the buffer with NUL bytes.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `buffer_size` bytes.
unsafe fn copy_to_buffer(text: &str, buffer: *mut c_char, buffer_size: c_int) {
    if buffer.is_null() || buffer_size <= 0 {
        warn!("invalid output buffer (size {buffer_size}), writing nothing");
        return;
    }
    let Ok(size) = usize::try_from(buffer_size) else { return };
    let len = text.len().min(size - 1);
    if len < text.len() {
        trace!("truncating {text:?} to {len} bytes");
    }
    // SAFETY: The caller guarantees `buffer` is valid for `size` bytes, and
    // `len < size`. `text` can't overlap with a buffer we're allowed to
    // write to.
    unsafe {
        core::ptr::copy_nonoverlapping(
            text.as_ptr(),
            buffer.cast::<u8>(),
            len,
        );
        core::ptr::write_bytes(buffer.add(len), 0, size - len);
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::*;

    /// Returns the contents of a NUL padded buffer up to its first NUL.
    fn buffer_to_string(buffer: &[c_char]) -> String {
        let bytes: Vec<u8> = buffer
            .iter()
            .map(|&b| b as u8)
            .take_while(|&b| b != 0)
            .collect();
        String::from_utf8(bytes).unwrap()
    }

    fn parse(input: &str, format: &str) -> i64 {
        unsafe {
            f_datetime_parse(
                input.as_ptr().cast(),
                format.as_ptr().cast(),
                input.len() as c_int,
                format.len() as c_int,
            )
        }
    }

    #[test]
    fn timespan_roundtrip() {
        let ts = f_timespan_create(1, 2, 3, 4, 5);
        assert_eq!(ts, 93_784_005);
        assert_eq!(f_timespan_get_days(ts), 1);
        assert_eq!(f_timespan_get_hours(ts), 2);
        assert_eq!(f_timespan_get_minutes(ts), 3);
        assert_eq!(f_timespan_get_seconds(ts), 4);
        assert_eq!(f_timespan_get_milliseconds(ts), 5);
        assert_eq!(f_timespan_get_total_hours(ts), 26);
        assert_eq!(f_timespan_get_total_minutes(ts), 1563);
        assert_eq!(f_timespan_get_total_seconds(ts), 93_784);
        assert_eq!(f_timespan_get_total_days(ts), 1);
    }

    #[test]
    fn timespan_arithmetic_sentinel() {
        let _ = env_logger::try_init();

        assert_eq!(f_timespan_from_days(i64::MAX), INVALID);
        assert_eq!(f_timespan_from_hours(2), 7_200_000);
        assert_eq!(f_timespan_add(i64::MAX, 1), INVALID);
        assert_eq!(f_timespan_subtract(i64::MIN, 1), INVALID);
        assert_eq!(f_timespan_multiply(i64::MAX, 2), INVALID);
        assert_eq!(f_timespan_divide(1_000, 0), INVALID);
        assert_eq!(f_timespan_divide(1_000, 3), 333);
        assert_eq!(f_timespan_multiply(1_000, -3), -3_000);
    }

    #[test]
    fn timespan_to_string_truncates() {
        let ts = f_timespan_create(1, 2, 3, 4, 5);
        let mut buf = [b'x' as c_char; 32];
        unsafe { f_timespan_to_string(ts, buf.as_mut_ptr(), 32) };
        assert_eq!(buffer_to_string(&buf), "1d 02:03:04.005");
        assert!(buf[15..].iter().all(|&b| b == 0));

        let mut buf = [b'x' as c_char; 6];
        unsafe { f_timespan_to_string(ts, buf.as_mut_ptr(), 6) };
        assert_eq!(buffer_to_string(&buf), "1d 02");
        assert_eq!(buf[5], 0);

        // A zero sized buffer is left alone.
        let mut buf = [b'x' as c_char; 1];
        unsafe { f_timespan_to_string(ts, buf.as_mut_ptr(), 0) };
        assert_eq!(buf[0], b'x' as c_char);
        unsafe { f_timespan_to_string(ts, core::ptr::null_mut(), 10) };
    }

    #[test]
    fn comparisons() {
        assert_eq!(f_timespan_equals(5, 5), 1);
        assert_eq!(f_timespan_less_than(4, 5), 1);
        assert_eq!(f_timespan_greater_than(4, 5), 0);
        assert_eq!(f_timespan_less_equal(5, 5), 1);
        assert_eq!(f_timespan_greater_equal(4, 5), 0);
        assert_eq!(f_datetime_equals(5, 6), 0);
        assert_eq!(f_datetime_less_than(-1, 0), 1);
        assert_eq!(f_datetime_greater_than(0, -1), 1);
        assert_eq!(f_datetime_less_equal(1, 0), 0);
        assert_eq!(f_datetime_greater_equal(0, 0), 1);
    }

    #[test]
    fn datetime_create() {
        let dt = f_datetime_create(2024, 7, 14, 16, 24, 59, 5);
        assert_eq!(dt, 1_720_974_299_005);
        assert_eq!(f_datetime_get_year(dt), 2024);
        assert_eq!(f_datetime_get_month(dt), 7);
        assert_eq!(f_datetime_get_day(dt), 14);
        assert_eq!(f_datetime_get_hour(dt), 16);
        assert_eq!(f_datetime_get_minute(dt), 24);
        assert_eq!(f_datetime_get_second(dt), 59);
        assert_eq!(f_datetime_get_millisecond(dt), 5);

        assert_eq!(f_datetime_create(2024, -1, 14, 0, 0, 0, 0), INVALID);
        assert_eq!(f_datetime_create(2024, 7, 14, 0, 0, 0, -5), INVALID);
        assert_eq!(
            f_datetime_create(2023, 13, 1, 0, 0, 0, 0),
            f_datetime_create(2024, 1, 1, 0, 0, 0, 0),
        );
    }

    #[test]
    fn datetime_parse() {
        let _ = env_logger::try_init();

        let dt = parse("2024-07-14 16:24:59.005", "%Y-%m-%d %H:%M:%S");
        assert_eq!(dt, 1_720_974_299_005);
        assert_eq!(parse("2024-07-14 junk", "%Y-%m-%d"), INVALID);
        assert_eq!(parse("", "%Y"), INVALID);
        assert_eq!(parse("2024", ""), INVALID);

        let bad = [0xFFu8, b'1'];
        let dt = unsafe {
            f_datetime_parse(bad.as_ptr().cast(), b"%Y".as_ptr().cast(), 2, 2)
        };
        assert_eq!(dt, INVALID);
        let dt = unsafe {
            f_datetime_parse(core::ptr::null(), b"%Y".as_ptr().cast(), 4, 2)
        };
        assert_eq!(dt, INVALID);
    }

    #[test]
    fn datetime_arithmetic() {
        let dt = f_datetime_create(2024, 2, 28, 0, 0, 0, 0);
        let day = f_timespan_from_days(1);
        let next = f_datetime_add_timespan(dt, day);
        assert_eq!(f_datetime_get_day(next), 29);
        assert_eq!(f_datetime_subtract_timespan(next, day), dt);
        assert_eq!(f_datetime_difference(next, dt), day);
        assert_eq!(f_datetime_difference(dt, next), -day);
        assert_eq!(f_datetime_add_timespan(i64::MAX, 1), INVALID);
        assert_eq!(f_datetime_difference(i64::MAX, -1), INVALID);
    }

    #[test]
    fn datetime_format() {
        let dt = f_datetime_create(2024, 7, 14, 16, 24, 59, 5);
        let mut buf = [0 as c_char; 64];

        let format = "%a %d %b %Y %T";
        unsafe {
            f_datetime_format(
                dt,
                format.as_ptr().cast(),
                buf.as_mut_ptr(),
                format.len() as c_int,
                64,
            )
        };
        assert_eq!(buffer_to_string(&buf), "Sun 14 Jul 2024 16:24:59");

        unsafe {
            f_datetime_format_milliseconds(
                dt,
                format.as_ptr().cast(),
                buf.as_mut_ptr(),
                format.len() as c_int,
                64,
            )
        };
        assert_eq!(buffer_to_string(&buf), "Sun 14 Jul 2024 16:24:59.005");

        unsafe { f_datetime_to_iso_string(dt, buf.as_mut_ptr(), 64) };
        assert_eq!(buffer_to_string(&buf), "2024-07-14T16:24:59");

        unsafe {
            f_datetime_to_iso_string_milliseconds(dt, buf.as_mut_ptr(), 11)
        };
        assert_eq!(buffer_to_string(&buf), "2024-07-14");
    }

    #[test]
    fn invalid_is_sentinel() {
        assert_eq!(f_invalid_timestamp(), -i64::MAX);
    }

    #[test]
    fn sentinel_formats_as_iso() {
        let mut buf = [b'x' as c_char; 32];
        unsafe { f_datetime_to_iso_string(INVALID, buf.as_mut_ptr(), 32) };
        assert_eq!(buffer_to_string(&buf), "-292275055-05-16T16:47:04");

        let mut buf = [b'x' as c_char; 32];
        unsafe { f_datetime_to_iso_string(i64::MIN, buf.as_mut_ptr(), 32) };
        assert_eq!(buffer_to_string(&buf), "-292275055-05-16T16:47:04");
        assert_eq!(buf[31], 0);
    }

    #[test]
    fn now_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(f_datetime_now() > 1_577_836_800_000);
    }
}
