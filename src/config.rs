//! Compile-time configuration: key bindings, timings and the channel table.
//!
//! The defaults reproduce the reference pad layout. Change the constants here
//! to rebind keys for another game or to slow the motions down if the game
//! drops inputs.

use crate::command::{Action, ActionTable, Attack, Motion};
use crate::keys::KeyCode;
use crate::time::TimeDuration;
use crate::types::{Facing, Input};

/// Number of switch channels on the reference board.
pub const CHANNEL_COUNT: usize = 5;

/// Time a raw level must hold before it is committed (ms).
pub const DEBOUNCE_MS: u64 = 30;

/// Duration of each directional step (ms).
pub const STEP_MS: u64 = 28;

/// Duration an attack button is held by a tap (ms).
pub const TAP_MS: u64 = 22;

/// Gap between steps (ms).
pub const GAP_MS: u64 = 16;

/// Interval between readiness checks while waiting for USB enumeration (ms).
pub const READY_POLL_MS: u32 = 10;

/// Step capacity of each move in the reference library.
pub const MOVE_CAPACITY: usize = 8;

/// Keys the pad emits for each logical direction and attack button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    /// Indexed by [`Attack`].
    pub attacks: [KeyCode; Attack::COUNT],
}

impl KeyBindings {
    /// Default layout: WASD for directions, J/K/; for punches, N/M/, for kicks.
    pub const REFERENCE: KeyBindings = KeyBindings {
        up: KeyCode::W,
        left: KeyCode::A,
        down: KeyCode::S,
        right: KeyCode::D,
        attacks: [
            KeyCode::J,
            KeyCode::K,
            KeyCode::SEMICOLON,
            KeyCode::N,
            KeyCode::M,
            KeyCode::COMMA,
        ],
    };

    /// Key bound to an attack button.
    #[inline]
    pub fn attack(&self, attack: Attack) -> KeyCode {
        self.attacks[attack as usize]
    }

    /// Direction key that moves toward the opponent.
    #[inline]
    pub fn forward(&self, facing: Facing) -> KeyCode {
        match facing {
            Facing::Right => self.right,
            Facing::Left => self.left,
        }
    }

    /// Direction key that moves away from the opponent.
    #[inline]
    pub fn backward(&self, facing: Facing) -> KeyCode {
        match facing {
            Facing::Right => self.left,
            Facing::Left => self.right,
        }
    }

    /// Resolves a symbolic input against the current facing and the attack
    /// key chosen for this invocation.
    pub fn resolve(&self, input: Input, facing: Facing, attack: KeyCode) -> KeyCode {
        match input {
            Input::Up => self.up,
            Input::Down => self.down,
            Input::Forward => self.forward(facing),
            Input::Back => self.backward(facing),
            Input::Attack => attack,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Hold, tap and gap durations used to build the move library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing<D: TimeDuration> {
    pub step: D,
    pub tap: D,
    pub gap: D,
}

impl<D: TimeDuration> Timing<D> {
    /// STEP = 28 ms, TAP = 22 ms, GAP = 16 ms.
    pub fn reference() -> Self {
        Self {
            step: D::from_millis(STEP_MS),
            tap: D::from_millis(TAP_MS),
            gap: D::from_millis(GAP_MS),
        }
    }
}

impl<D: TimeDuration> Default for Timing<D> {
    fn default() -> Self {
        Self::reference()
    }
}

/// Reference channel assignment. Channel 4 is wired but unassigned.
pub const REFERENCE_ACTIONS: ActionTable<CHANNEL_COUNT> = ActionTable::new([
    Some(Action::Perform {
        motion: Motion::QuarterCircleForward,
        attack: Attack::LightPunch,
    }),
    Some(Action::Perform {
        motion: Motion::AntiAir,
        attack: Attack::MediumPunch,
    }),
    Some(Action::Perform {
        motion: Motion::SpinKick,
        attack: Attack::LightKick,
    }),
    Some(Action::ToggleFacing),
    None,
]);
