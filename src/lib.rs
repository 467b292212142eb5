/*!
Millisecond precision date-time and time span values for Rust, with
`strftime` style parsing and formatting and a flat C interface for Fortran.

There are two core types:

* [`DateTime`] is a point in time, stored as a signed 64-bit count of
milliseconds since the Unix epoch. It uses the proleptic Gregorian calendar
and has no time zone. Think of it as UTC without leap seconds.
* [`TimeSpan`] is a signed duration, stored as a 64-bit count of
milliseconds. Days are always 24 hours.

Both are `Copy`, cheap to compare and free of any shared state.

# Example

```
use fdate::{datetime, DateTime, TimeSpan};

let start = datetime(2024, 7, 14, 16, 24, 59, 5);
let end = start + TimeSpan::new(1, 2, 0, 0, 995);
assert_eq!(end.to_string(), "2024-07-15 18:25:00");
assert_eq!((end - start).to_string(), "1d 02:00:00.995");

let parsed = DateTime::parse("2024-07-15 18:25:00.000", "%F %T").unwrap();
assert_eq!(parsed, end);
```

# Crate features

* **std** (enabled by default) - Enables [`DateTime::now`] and
[`SystemClock`], and implements `std::error::Error` for [`Error`].
* **ffi** (enabled by default) - Exports the `extern "C"` functions in the
[`ffi`] module. This requires `std`.
* **logging** - Emits a few internal events (like rejected arguments at the C
boundary) through the [`log`](https://docs.rs/log) crate.
* **serde** - Implements `Serialize` and `Deserialize` for [`DateTime`] and
[`TimeSpan`].
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors and formatting allocate, so there is no core-only mode.
extern crate alloc;

pub use crate::{
    clock::{Clock, FixedClock},
    datetime::{date, datetime, DateTime},
    error::Error,
    timespan::{Components, TimeSpan},
    weekday::Weekday,
};

#[cfg(feature = "std")]
pub use crate::clock::SystemClock;

#[macro_use]
mod logging;

mod clock;
mod datetime;
mod error;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod fmt;
mod timespan;
mod util;
mod weekday;
