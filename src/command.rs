//! Channel-to-action dispatch.

/// Attack buttons the pad can press at the end of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attack {
    LightPunch,
    MediumPunch,
    HeavyPunch,
    LightKick,
    MediumKick,
    HeavyKick,
}

impl Attack {
    /// Number of attack buttons.
    pub const COUNT: usize = 6;
}

/// The motions in the move library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    /// Down, down-forward, forward + attack.
    QuarterCircleForward,
    /// Forward, down, down-forward + attack.
    AntiAir,
    /// Down, down-back, back + attack.
    SpinKick,
}

/// What a debounced press on a channel does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Run a motion to completion, finishing with the given attack.
    Perform { motion: Motion, attack: Attack },
    /// Flip the facing direction. Emits no HID output.
    ToggleFacing,
}

/// Fixed mapping from channel index to action.
///
/// Built once at compile time; there is no runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTable<const N: usize> {
    actions: [Option<Action>; N],
}

impl<const N: usize> ActionTable<N> {
    /// Creates a table. `None` entries leave a channel unassigned.
    pub const fn new(actions: [Option<Action>; N]) -> Self {
        Self { actions }
    }

    /// Looks up the action for a channel.
    ///
    /// Returns `None` for unassigned channels and out-of-range indices.
    pub fn action_for(&self, channel: usize) -> Option<Action> {
        self.actions.get(channel).copied().flatten()
    }

    /// Number of channels the table covers.
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}
