//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (monotonic clock for charge measurement)
//! - Capabilities (audio, haptics)
//! - Delivery of game events to sound/vibration/UI collaborators
//!
//! The simulation never asks which host it runs on, only what the host can do.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::sim::GameEvent;

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Native clock backed by `Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand (tests, replays, headless runs)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// What the host can do with game events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    pub audio: bool,
    pub haptics: bool,
}

impl HostCapabilities {
    pub const NONE: Self = Self {
        audio: false,
        haptics: false,
    };
    pub const ALL: Self = Self {
        audio: true,
        haptics: true,
    };
}

/// One-way receiver of game events, called after a tick has completed
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Sink that keeps every event (replays and tests)
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl EventSink for RecordingSink {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Sink that writes each event to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, event: &GameEvent) {
        log::debug!("event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10.0);
        assert_eq!(clock.now_ms(), 10.0);
        clock.advance(5.5);
        assert_eq!(clock.now_ms(), 15.5);
        // Never runs backwards
        clock.advance(-100.0);
        assert_eq!(clock.now_ms(), 15.5);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::default();
        sink.notify(&GameEvent::ChargeStarted);
        assert_eq!(sink.events, vec![GameEvent::ChargeStarted]);
    }
}
