//! Time abstraction traits for platform-agnostic timing.
//!
//! Debouncing only needs a monotonic "now" and the distance between two
//! instants. [`Millis`] covers the common case of a free-running 32-bit
//! millisecond tick.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Half of this duration, rounded down to whole milliseconds.
    fn halved(self) -> Self {
        Self::from_millis(self.as_millis() / 2)
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration paired with [`Millis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        MillisDuration(millis.min(u32::MAX as u64) as u32)
    }
}

/// Instant read from a free-running, wrapping 32-bit millisecond counter.
///
/// `duration_since` uses wrapping subtraction, so intervals shorter than
/// ~49.7 days are measured correctly across the counter rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }
}
