//! Shared test infrastructure for motion-pad integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, InputPin};
use motion_pad::{HidTransport, KeyCode, KeyReport, TimeDuration, TimeInstant, TimeSource};
use std::collections::VecDeque;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Bench: shared clock and output log
// ============================================================================

/// Everything observable at the HID boundary, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Keys(Vec<KeyCode>),
    Release,
    Wait(u64),
}

/// Shorthand for a key report event.
pub fn keys(codes: &[KeyCode]) -> Event {
    Event::Keys(codes.to_vec())
}

/// Shared clock, transport readiness and output log.
///
/// The delay mock advances the clock, so pins scripted against the clock see
/// time pass while a move blocks.
pub struct Bench {
    pub clock: MockTimeSource,
    log: RefCell<Vec<Event>>,
    /// Answers for upcoming `is_ready` calls; empty means ready.
    readiness: RefCell<VecDeque<bool>>,
    always_busy: Cell<bool>,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            clock: MockTimeSource::new(),
            log: RefCell::new(Vec::new()),
            readiness: RefCell::new(VecDeque::new()),
            always_busy: Cell::new(false),
        }
    }

    pub fn transport(&self) -> MockTransport<'_> {
        MockTransport { bench: self }
    }

    pub fn delay(&self) -> MockDelay<'_> {
        MockDelay { bench: self }
    }

    pub fn pin(&self, script: &'static [(u64, Sample)]) -> MockPin<'_> {
        MockPin {
            bench: self,
            script,
        }
    }

    /// Queues answers for the next `is_ready` calls.
    pub fn script_readiness(&self, answers: &[bool]) {
        self.readiness.borrow_mut().extend(answers.iter().copied());
    }

    pub fn set_always_busy(&self, busy: bool) {
        self.always_busy.set(busy);
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    /// Sum of every logged wait.
    pub fn waited(&self) -> u64 {
        self.log
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Wait(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    fn is_ready(&self) -> bool {
        if self.always_busy.get() {
            return false;
        }
        self.readiness.borrow_mut().pop_front().unwrap_or(true)
    }
}

// ============================================================================
// Mock HID transport and delay
// ============================================================================

pub struct MockTransport<'a> {
    bench: &'a Bench,
}

impl HidTransport for MockTransport<'_> {
    fn is_ready(&self) -> bool {
        self.bench.is_ready()
    }

    fn send_keys(&mut self, report: &KeyReport) {
        self.bench.record(Event::Keys(report.keys().to_vec()));
    }

    fn release_all(&mut self) {
        self.bench.record(Event::Release);
    }
}

pub struct MockDelay<'a> {
    bench: &'a Bench,
}

impl MockDelay<'_> {
    fn wait(&mut self, millis: u64) {
        self.bench.record(Event::Wait(millis));
        self.bench.clock.advance(TestDuration(millis));
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(ns as u64 / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(ms as u64);
    }
}

// ============================================================================
// Mock switch pin
// ============================================================================

/// What a scripted pin reads from a given time onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    High,
    Low,
    Fault,
}

/// Read failure reported by a scripted pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Switch whose level follows a script of `(time_ms, sample)` entries.
///
/// Reads `High` (released) before the first entry.
pub struct MockPin<'a> {
    bench: &'a Bench,
    script: &'static [(u64, Sample)],
}

impl MockPin<'_> {
    fn current(&self) -> Sample {
        let now = self.bench.clock.millis();
        self.script
            .iter()
            .take_while(|(at, _)| *at <= now)
            .last()
            .map(|(_, sample)| *sample)
            .unwrap_or(Sample::High)
    }
}

impl ErrorType for MockPin<'_> {
    type Error = PinFault;
}

impl InputPin for MockPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        match self.current() {
            Sample::High => Ok(true),
            Sample::Low => Ok(false),
            Sample::Fault => Err(PinFault),
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// A pin that stays released.
pub const IDLE: &[(u64, Sample)] = &[];

// ============================================================================
// Expected output
// ============================================================================

pub const UP: KeyCode = KeyCode::W;
pub const DOWN: KeyCode = KeyCode::S;
pub const LEFT: KeyCode = KeyCode::A;
pub const RIGHT: KeyCode = KeyCode::D;
pub const LP: KeyCode = KeyCode::J;
pub const MP: KeyCode = KeyCode::K;
pub const LK: KeyCode = KeyCode::N;

/// Quarter-circle forward with the reference timing.
pub fn quarter_circle_forward(forward: KeyCode, attack: KeyCode) -> Vec<Event> {
    vec![
        keys(&[DOWN]),
        Event::Wait(28),
        Event::Release,
        Event::Wait(16),
        keys(&[DOWN, forward]),
        Event::Wait(28),
        Event::Release,
        Event::Wait(16),
        keys(&[forward]),
        Event::Wait(14),
        keys(&[attack]),
        Event::Wait(22),
        Event::Release,
        Event::Wait(16),
        Event::Release,
    ]
}

/// Anti-air with the reference timing.
pub fn anti_air(forward: KeyCode, attack: KeyCode) -> Vec<Event> {
    vec![
        keys(&[forward]),
        Event::Wait(14),
        Event::Release,
        Event::Wait(8),
        keys(&[DOWN]),
        Event::Wait(14),
        Event::Release,
        Event::Wait(8),
        keys(&[DOWN, forward]),
        Event::Wait(28),
        keys(&[attack]),
        Event::Wait(22),
        Event::Release,
        Event::Wait(16),
        Event::Release,
    ]
}

/// Spin kick with the reference timing.
pub fn spin_kick(back: KeyCode, attack: KeyCode) -> Vec<Event> {
    vec![
        keys(&[DOWN]),
        Event::Wait(28),
        Event::Release,
        Event::Wait(16),
        keys(&[DOWN, back]),
        Event::Wait(28),
        Event::Release,
        Event::Wait(16),
        keys(&[back]),
        Event::Wait(14),
        keys(&[attack]),
        Event::Wait(22),
        Event::Release,
        Event::Wait(16),
        Event::Release,
    ]
}
