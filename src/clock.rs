/*!
Sources of the current time.

[`DateTime::now`](crate::DateTime::now) reads the system clock. Code that
needs deterministic behavior (tests, replays, simulations) can instead
pass any [`Clock`] implementation to
[`DateTime::now_with`](crate::DateTime::now_with).
*/

/// A source of the current time, as milliseconds since the Unix epoch.
///
/// # Example
///
/// ```
/// use fdate::{Clock, DateTime, FixedClock};
///
/// let clock = FixedClock::new(86_400_000);
/// assert_eq!(clock.now_millis(), 86_400_000);
/// assert_eq!(DateTime::now_with(&clock).to_string(), "1970-01-02 00:00:00");
/// ```
pub trait Clock: Send + Sync {
    /// Returns the number of milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

impl<'a, C: Clock + ?Sized> Clock for &'a C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// The process wall clock.
///
/// Sub-millisecond precision is floored away. This is true for times before
/// the Unix epoch too, so one nanosecond before the epoch reads as `-1`.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let now = std::time::SystemTime::now();
        match now.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => match i64::try_from(duration.as_millis()) {
                Ok(millis) => millis,
                Err(_) => {
                    debug!(
                        "system clock at {duration:?} past the Unix epoch \
                         exceeds the millisecond range, saturating",
                    );
                    i64::MAX
                }
            },
            Err(err) => {
                let duration = err.duration();
                let mut millis = duration.as_millis();
                if duration.subsec_nanos() % 1_000_000 != 0 {
                    millis += 1;
                }
                debug!("system clock is {duration:?} before the Unix epoch");
                match i64::try_from(millis) {
                    Ok(millis) => -millis,
                    Err(_) => i64::MIN,
                }
            }
        }
    }
}

/// A clock that always reports the same instant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedClock(i64);

impl FixedClock {
    /// Creates a clock that always reads `millis` milliseconds since the
    /// Unix epoch.
    pub const fn new(millis: i64) -> FixedClock {
        FixedClock(millis)
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed() {
        let clock = FixedClock::new(-1);
        assert_eq!(clock.now_millis(), -1);
        assert_eq!((&clock).now_millis(), -1);
        let dynamic: &dyn Clock = &clock;
        assert_eq!(dynamic.now_millis(), -1);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_is_after_2020() {
        let _ = env_logger::try_init();

        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
