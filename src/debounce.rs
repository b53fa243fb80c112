//! Per-channel switch debouncing.
//!
//! A raw level that differs from the last stable level opens a transition.
//! The transition commits once the level has differed for the whole debounce
//! window, and is cancelled outright the moment the raw level matches the
//! stable level again. Only commits to the pressed level are reported.
//!
//! While a transition is open, every raw level other than the stable one
//! counts as the same transition: the timer is not restarted and the level
//! committed is whatever the raw level is at commit time.

use crate::time::{TimeDuration, TimeInstant};
use crate::types::{Level, PressEvent};

/// Debounce state of a single channel.
#[derive(Debug, Clone, Copy)]
pub struct DebounceState<I: TimeInstant> {
    stable: Level,
    pending: Level,
    /// `Some` while a transition is in progress.
    transition_start: Option<I>,
}

impl<I: TimeInstant> DebounceState<I> {
    /// Creates a settled state from the first raw sample.
    pub fn new(initial: Level) -> Self {
        Self {
            stable: initial,
            pending: initial,
            transition_start: None,
        }
    }

    /// Feeds one raw sample.
    ///
    /// Returns the newly committed level, if this sample completed a
    /// transition.
    pub fn update(&mut self, raw: Level, now: I, window: I::Duration) -> Option<Level> {
        if raw == self.stable {
            // Bounced back before settling.
            self.transition_start = None;
            return None;
        }

        match self.transition_start {
            None => {
                self.pending = raw;
                self.transition_start = Some(now);
                None
            }
            Some(start) if now.duration_since(start).as_millis() >= window.as_millis() => {
                self.stable = raw;
                self.transition_start = None;
                Some(raw)
            }
            Some(_) => None,
        }
    }

    /// Last confirmed level.
    pub fn stable_level(&self) -> Level {
        self.stable
    }

    /// Level that opened the current transition. Only meaningful while
    /// [`in_transition`](Self::in_transition) is true.
    pub fn pending_level(&self) -> Level {
        self.pending
    }

    pub fn in_transition(&self) -> bool {
        self.transition_start.is_some()
    }

    /// When the current transition began.
    pub fn transition_start(&self) -> Option<I> {
        self.transition_start
    }
}

/// Debouncers for a fixed bank of `N` channels sharing one window.
pub struct Debouncer<I: TimeInstant, const N: usize> {
    channels: [DebounceState<I>; N],
    window: I::Duration,
}

impl<I: TimeInstant, const N: usize> Debouncer<I, N> {
    /// Creates a bank settled at the given initial levels.
    pub fn new(initial: [Level; N], window: I::Duration) -> Self {
        Self {
            channels: initial.map(DebounceState::new),
            window,
        }
    }

    /// Feeds one raw sample for a channel.
    ///
    /// Returns a [`PressEvent`] when the channel commits to the pressed level.
    /// Releases and unknown channel indices produce nothing.
    pub fn update(&mut self, channel: usize, raw: Level, now: I) -> Option<PressEvent> {
        let window = self.window;
        let state = self.channels.get_mut(channel)?;

        match state.update(raw, now, window) {
            Some(level) if level.is_pressed() => Some(PressEvent { channel }),
            _ => None,
        }
    }

    /// State of one channel.
    pub fn state(&self, channel: usize) -> Option<&DebounceState<I>> {
        self.channels.get(channel)
    }

    pub fn window(&self) -> I::Duration {
        self.window
    }
}
