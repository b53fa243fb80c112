//! Blocking macro sequencer.
//!
//! Provides [`MacroSequencer`], which plays a [`MoveDefinition`] to completion
//! on the calling context, and the [`HidTransport`] trait it reports through.
//!
//! Timing is realised with blocking waits. A move in progress cannot be
//! interrupted, and the caller cannot scan inputs until it returns.

use crate::config::KeyBindings;
use crate::keys::KeyCode;
use crate::motion::MoveDefinition;
use crate::time::TimeDuration;
use crate::types::{Facing, KeyReport, MAX_REPORT_KEYS, MoveStep};
use embedded_hal::delay::DelayNs;

/// Trait for abstracting the USB HID keyboard transport.
///
/// Implement this over your USB stack's keyboard interface.
pub trait HidTransport {
    /// Returns true if the host can accept a report right now.
    fn is_ready(&self) -> bool;

    /// Replaces the full set of asserted keys with `report`.
    fn send_keys(&mut self, report: &KeyReport);

    /// Clears every asserted key.
    fn release_all(&mut self);
}

/// Counters for reports handed to, or dropped before, the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendStats {
    /// Key reports and releases passed to the transport.
    pub sent: u32,
    /// Key reports and releases skipped because the transport was not ready.
    pub dropped: u32,
}

/// Plays moves through a HID transport with blocking timing.
///
/// Sends are best effort: when the transport is not ready the report is
/// dropped without retry and the move carries on with its fixed timing.
///
/// # Type Parameters
/// * `T` - HID transport implementation type
/// * `Dl` - Blocking delay provider
pub struct MacroSequencer<T: HidTransport, Dl: DelayNs> {
    transport: T,
    delay: Dl,
    bindings: KeyBindings,
    stats: SendStats,
}

impl<T: HidTransport, Dl: DelayNs> MacroSequencer<T, Dl> {
    /// Creates a sequencer with nothing asserted.
    pub fn new(transport: T, delay: Dl, bindings: KeyBindings) -> Self {
        Self {
            transport,
            delay,
            bindings,
            stats: SendStats::default(),
        }
    }

    /// Blocks until the transport reports ready, checking every `poll_ms`.
    ///
    /// Intended for startup, while the host is still enumerating the device.
    pub fn wait_until_ready(&mut self, poll_ms: u32) {
        while !self.transport.is_ready() {
            self.delay.delay_ms(poll_ms);
        }
    }

    /// Runs `definition` to completion.
    ///
    /// `Forward`/`Back` resolve against `facing` as it is now, and `Attack`
    /// resolves to `attack`. Blocks for the move's total duration.
    pub fn perform<D: TimeDuration, const N: usize>(
        &mut self,
        definition: &MoveDefinition<D, N>,
        facing: Facing,
        attack: KeyCode,
    ) {
        for step in definition.steps() {
            match step {
                MoveStep::Hold { inputs, duration } => {
                    let mut keys = [KeyCode::NONE; MAX_REPORT_KEYS];
                    for (slot, input) in keys.iter_mut().zip(inputs.iter()) {
                        *slot = self.bindings.resolve(*input, facing, attack);
                    }
                    let report = KeyReport::from_keys(&keys[..inputs.len()]);
                    self.hold(&report, *duration);
                }
                MoveStep::Release { gap } => {
                    self.release_all();
                    self.wait(*gap);
                }
            }
        }
    }

    /// Asserts `report`, then blocks for `duration`. Keys stay asserted.
    pub fn hold<D: TimeDuration>(&mut self, report: &KeyReport, duration: D) {
        self.send_keys(report);
        self.wait(duration);
    }

    /// Sends a key report if the transport is ready.
    ///
    /// Returns false if the report was dropped.
    pub fn send_keys(&mut self, report: &KeyReport) -> bool {
        if !self.transport.is_ready() {
            #[cfg(feature = "defmt")]
            defmt::trace!("transport busy, dropped {}", report);
            self.stats.dropped = self.stats.dropped.wrapping_add(1);
            return false;
        }

        self.transport.send_keys(report);
        self.stats.sent = self.stats.sent.wrapping_add(1);
        true
    }

    /// Releases every key if the transport is ready.
    ///
    /// Returns false if the release was dropped.
    pub fn release_all(&mut self) -> bool {
        if !self.transport.is_ready() {
            #[cfg(feature = "defmt")]
            defmt::trace!("transport busy, dropped release");
            self.stats.dropped = self.stats.dropped.wrapping_add(1);
            return false;
        }

        self.transport.release_all();
        self.stats.sent = self.stats.sent.wrapping_add(1);
        true
    }

    fn wait<D: TimeDuration>(&mut self, duration: D) {
        let millis = duration.as_millis();
        if millis > 0 {
            self.delay.delay_ms(millis.min(u32::MAX as u64) as u32);
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn stats(&self) -> SendStats {
        self.stats
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the sequencer, returning the transport and delay.
    pub fn into_parts(self) -> (T, Dl) {
        (self.transport, self.delay)
    }
}
