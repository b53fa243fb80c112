//! The control loop: scan, dispatch, perform.

use crate::command::{Action, ActionTable};
use crate::motion::MoveLibrary;
use crate::scanner::InputScanner;
use crate::sequencer::{HidTransport, MacroSequencer};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{Facing, PressEvent};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Ties the scanner, the action table, the facing state and the sequencer
/// into one single-threaded control loop.
///
/// Everything runs on the caller's context. A press that starts a move blocks
/// [`poll`](Self::poll) until the move completes, so switches are not sampled
/// in the meantime: changes that come and go during a move are never seen.
/// Facing is owned here and only changed by [`Action::ToggleFacing`].
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `P` - Switch input pin type
/// * `I` - Time instant type
/// * `S` - Time source implementation type
/// * `T` - HID transport implementation type
/// * `Dl` - Blocking delay provider
/// * `N` - Number of switch channels
/// * `M` - Step capacity of each move
pub struct Controller<'t, P, I, S, T, Dl, const N: usize, const M: usize>
where
    P: InputPin,
    I: TimeInstant,
    S: TimeSource<I>,
    T: HidTransport,
    Dl: DelayNs,
{
    scanner: InputScanner<P, I, N>,
    actions: ActionTable<N>,
    library: MoveLibrary<I::Duration, M>,
    sequencer: MacroSequencer<T, Dl>,
    facing: Facing,
    time_source: &'t S,
}

impl<'t, P, I, S, T, Dl, const N: usize, const M: usize> Controller<'t, P, I, S, T, Dl, N, M>
where
    P: InputPin,
    I: TimeInstant,
    S: TimeSource<I>,
    T: HidTransport,
    Dl: DelayNs,
{
    /// Creates a controller facing the default direction.
    pub fn new(
        scanner: InputScanner<P, I, N>,
        actions: ActionTable<N>,
        library: MoveLibrary<I::Duration, M>,
        sequencer: MacroSequencer<T, Dl>,
        time_source: &'t S,
    ) -> Self {
        Self {
            scanner,
            actions,
            library,
            sequencer,
            facing: Facing::default(),
            time_source,
        }
    }

    /// Runs one control cycle.
    ///
    /// Samples every channel in ascending order, reading the clock for each.
    /// Each debounced press is dispatched, and any move it starts runs to
    /// completion, before the next channel is sampled.
    ///
    /// # Returns
    /// The number of presses handled this cycle.
    pub fn poll(&mut self) -> usize {
        let Self {
            scanner,
            actions,
            library,
            sequencer,
            facing,
            time_source,
        } = self;
        let mut handled = 0;

        scanner.scan(*time_source, |PressEvent { channel }| {
            dispatch(actions, library, sequencer, facing, channel);
            handled += 1;
        });

        handled
    }

    /// Performs the action assigned to `channel`.
    ///
    /// Unassigned and out-of-range channels are ignored.
    pub fn on_press(&mut self, channel: usize) {
        dispatch(
            &self.actions,
            &self.library,
            &mut self.sequencer,
            &mut self.facing,
            channel,
        );
    }

    /// Current facing direction.
    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn scanner(&self) -> &InputScanner<P, I, N> {
        &self.scanner
    }

    pub fn sequencer(&self) -> &MacroSequencer<T, Dl> {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut MacroSequencer<T, Dl> {
        &mut self.sequencer
    }
}

fn dispatch<T, Dl, D, const N: usize, const M: usize>(
    actions: &ActionTable<N>,
    library: &MoveLibrary<D, M>,
    sequencer: &mut MacroSequencer<T, Dl>,
    facing: &mut Facing,
    channel: usize,
) where
    T: HidTransport,
    Dl: DelayNs,
    D: TimeDuration,
{
    match actions.action_for(channel) {
        Some(Action::Perform { motion, attack }) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("channel {}: {} + {} facing {}", channel, motion, attack, *facing);
            let key = sequencer.bindings().attack(attack);
            sequencer.perform(library.get(motion), *facing, key);
        }
        Some(Action::ToggleFacing) => {
            facing.toggle();
            #[cfg(feature = "defmt")]
            defmt::debug!("channel {}: now facing {}", channel, *facing);
        }
        None => {
            #[cfg(feature = "defmt")]
            defmt::trace!("channel {}: unassigned", channel);
        }
    }
}
