//! Switch polling.

use crate::debounce::{DebounceState, Debouncer};
use crate::time::{TimeInstant, TimeSource};
use crate::types::{Level, PressEvent};
use embedded_hal::digital::InputPin;

/// Polls a fixed bank of active-low switches and debounces them.
///
/// Channel indices are the positions of the pins in the array passed to
/// [`InputScanner::new`].
pub struct InputScanner<P: InputPin, I: TimeInstant, const N: usize> {
    pins: [P; N],
    debouncer: Debouncer<I, N>,
}

impl<P: InputPin, I: TimeInstant, const N: usize> InputScanner<P, I, N> {
    /// Takes ownership of the pins and settles each debouncer on a first raw
    /// sample. A pin that cannot be read yet is assumed released.
    pub fn new(mut pins: [P; N], window: I::Duration) -> Self {
        let initial = core::array::from_fn(|channel| {
            read_level(&mut pins[channel]).unwrap_or(Level::High)
        });

        Self {
            pins,
            debouncer: Debouncer::new(initial, window),
        }
    }

    /// Samples one channel and feeds it to its debouncer.
    ///
    /// A failed read skips the channel for this cycle.
    pub fn sample(&mut self, channel: usize, now: I) -> Option<PressEvent> {
        let pin = self.pins.get_mut(channel)?;
        let Some(level) = read_level(pin) else {
            #[cfg(feature = "defmt")]
            defmt::debug!("channel {} read failed, skipped", channel);
            return None;
        };

        self.debouncer.update(channel, level, now)
    }

    /// Samples every channel in ascending order, calling `on_press` for each
    /// debounced press before moving to the next channel.
    ///
    /// The clock is read afresh for every channel. `on_press` may block (a
    /// move runs inside it), and a level seen after it returns must be stamped
    /// with the time it was actually read.
    pub fn scan<S: TimeSource<I>>(
        &mut self,
        time_source: &S,
        mut on_press: impl FnMut(PressEvent),
    ) {
        for channel in 0..N {
            if let Some(event) = self.sample(channel, time_source.now()) {
                on_press(event);
            }
        }
    }

    /// Debounce state of one channel.
    pub fn channel_state(&self, channel: usize) -> Option<&DebounceState<I>> {
        self.debouncer.state(channel)
    }

    pub const fn channel_count(&self) -> usize {
        N
    }

    /// Releases the pins.
    pub fn into_pins(self) -> [P; N] {
        self.pins
    }
}

fn read_level<P: InputPin>(pin: &mut P) -> Option<Level> {
    pin.is_high().ok().map(Level::from)
}
