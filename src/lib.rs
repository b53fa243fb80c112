#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Debouncer`**: Turns noisy active-low switch samples into clean press events
//! - **`InputScanner`**: Owns the switch pins and polls them in ascending order
//! - **`MoveDefinition`**: A timed list of holds and releases over symbolic inputs
//! - **`MoveLibrary`**: The built-in motions (quarter-circle forward, anti-air, spin kick)
//! - **`MacroSequencer`**: Plays a move to completion with blocking waits
//! - **`HidTransport`**: Trait to implement for your USB HID keyboard
//! - **`UsbKeyboard`**: Ready-made `HidTransport` over `usb-device` + `usbd-hid` (feature `usbd-hid`)
//! - **`ActionTable`**: Fixed mapping from channel index to `Action`
//! - **`Controller`**: One single-threaded control loop over all of the above
//! - **`TimeSource`**: Trait to implement for your monotonic clock
//!
//! `Forward` and `Back` inside a move are resolved against the current
//! `Facing` each time the move runs, so the same button produces mirrored
//! key output after the facing toggle is pressed.

pub mod time;
pub mod keys;
pub mod types;
pub mod config;
pub mod debounce;
pub mod motion;
pub mod sequencer;
pub mod command;
pub mod scanner;
pub mod controller;
#[cfg(feature = "usbd-hid")]
pub mod usb;

pub use command::{Action, ActionTable, Attack, Motion};
pub use config::{KeyBindings, Timing};
pub use controller::Controller;
pub use debounce::{DebounceState, Debouncer};
pub use keys::KeyCode;
pub use motion::{MoveBuilder, MoveDefinition, MoveLibrary};
pub use scanner::InputScanner;
pub use sequencer::{HidTransport, MacroSequencer, SendStats};
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
pub use types::{Facing, Input, KeyReport, Level, MoveError, MoveStep, PressEvent};
#[cfg(feature = "usbd-hid")]
pub use usb::UsbKeyboard;
