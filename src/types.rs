//! Core types shared by the debouncer, the move library and the sequencer.

use crate::keys::KeyCode;
use crate::time::TimeDuration;
use heapless::Vec;

/// Maximum number of simultaneously asserted keys in one boot-keyboard report.
pub const MAX_REPORT_KEYS: usize = 6;

/// Logic level sampled from a switch input.
///
/// Switches are wired active-low with pull-up biasing, so `Low` means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

impl Level {
    /// Level a switch reads while held down.
    pub const PRESSED: Level = Level::Low;

    /// Returns true if this is the pressed polarity.
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == Self::PRESSED
    }
}

impl From<bool> for Level {
    /// Maps a pin's `is_high()` reading to a level.
    fn from(is_high: bool) -> Self {
        if is_high { Level::High } else { Level::Low }
    }
}

/// A debounced press on one input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    pub channel: usize,
}

/// Which side of the screen the controlled character faces.
///
/// `Right` is the power-on default: the opponent stands to the right, so
/// "forward" is the right direction key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Flips the facing direction in place.
    #[inline]
    pub fn toggle(&mut self) {
        *self = match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        };
    }

    #[inline]
    pub fn is_right(self) -> bool {
        self == Facing::Right
    }
}

/// Symbolic input inside a move step.
///
/// `Forward` and `Back` depend on [`Facing`]; `Attack` is whatever button the
/// move was invoked with. Resolution to key codes happens when the move runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    Up,
    Down,
    Forward,
    Back,
    Attack,
}

/// Set of symbolic inputs asserted together by one hold.
pub type Chord = Vec<Input, MAX_REPORT_KEYS>;

/// A single step in a move.
#[derive(Debug, Clone)]
pub enum MoveStep<D: TimeDuration> {
    /// Assert exactly these inputs, then wait. Keys stay asserted afterwards
    /// until the next hold replaces them or a release clears them.
    Hold { inputs: Chord, duration: D },

    /// Release every key, then wait.
    Release { gap: D },
}

impl<D: TimeDuration> MoveStep<D> {
    /// Time the step blocks for.
    #[inline]
    pub fn duration(&self) -> D {
        match self {
            MoveStep::Hold { duration, .. } => *duration,
            MoveStep::Release { gap } => *gap,
        }
    }
}

/// The set of key codes sent to the host in a single report.
///
/// Holds at most [`MAX_REPORT_KEYS`] codes. No modifier keys are ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyReport {
    keycodes: [KeyCode; MAX_REPORT_KEYS],
    len: u8,
}

impl KeyReport {
    /// An empty report, equivalent to releasing every key.
    pub const EMPTY: KeyReport = KeyReport {
        keycodes: [KeyCode::NONE; MAX_REPORT_KEYS],
        len: 0,
    };

    /// Builds a report from a key list, keeping only the first six keys.
    pub fn from_keys(keys: &[KeyCode]) -> Self {
        let mut report = Self::EMPTY;
        for key in keys.iter().take(MAX_REPORT_KEYS) {
            report.keycodes[report.len as usize] = *key;
            report.len += 1;
        }
        report
    }

    /// The asserted keys, in the order they were added.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keycodes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw usage IDs zero-padded to a full six-slot report.
    pub fn as_array(&self) -> [u8; MAX_REPORT_KEYS] {
        self.keycodes.map(KeyCode::usage)
    }
}

#[cfg(feature = "usbd-hid")]
impl From<&KeyReport> for usbd_hid::descriptor::KeyboardReport {
    fn from(report: &KeyReport) -> Self {
        usbd_hid::descriptor::KeyboardReport {
            modifier: 0,
            reserved: 0,
            leds: 0,
            keycodes: report.as_array(),
        }
    }
}

/// Move validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveError {
    /// No steps provided.
    EmptyMove,

    /// Move step capacity exceeded.
    CapacityExceeded,

    /// A hold named more keys than fit in one report.
    TooManyKeys,
}

impl core::fmt::Display for MoveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MoveError::EmptyMove => write!(f, "move must have at least one step"),
            MoveError::CapacityExceeded => write!(f, "move step capacity exceeded"),
            MoveError::TooManyKeys => {
                write!(f, "a hold can assert at most {} keys", MAX_REPORT_KEYS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}
