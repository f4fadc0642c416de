//! Fixed-timestep game loop
//!
//! Turns host frame callbacks into whole simulation ticks, forwards input
//! with the clock's timestamp, and hands each tick's events to the sink once
//! the tick is done.

use crate::config::GameConfig;
use crate::platform::{Clock, EventSink};
use crate::sim::{GameState, Snapshot, tick};

/// Fixed simulation timestep (60 Hz)
pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
/// Maximum substeps per frame to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 8;
/// Longest frame gap fed to the accumulator (tab switches, breakpoints)
pub const MAX_FRAME_MS: f64 = 100.0;

/// Drives a [`GameState`] from a clock
pub struct GameLoop<C: Clock, S: EventSink> {
    state: GameState,
    clock: C,
    sink: S,
    accumulator: f64,
    last_frame_ms: Option<f64>,
    running: bool,
}

impl<C: Clock, S: EventSink> GameLoop<C, S> {
    pub fn new(config: GameConfig, seed: u64, clock: C, sink: S) -> Self {
        Self::with_state(GameState::new(config, seed), clock, sink)
    }

    pub fn with_state(state: GameState, clock: C, sink: S) -> Self {
        Self {
            state,
            clock,
            sink,
            accumulator: 0.0,
            last_frame_ms: None,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume after [`stop`](Self::stop); no catch-up for the stopped time
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_frame_ms = None;
            log::info!("Game loop started");
        }
    }

    /// Stop ticking. Safe to call any number of times; the session is left
    /// exactly as the last completed tick left it.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.accumulator = 0.0;
            self.last_frame_ms = None;
            log::info!("Game loop stopped at tick {}", self.state.time_ticks);
        }
    }

    pub fn press(&mut self) {
        if self.running {
            self.state.on_press_start(self.clock.now_ms());
        }
    }

    pub fn release(&mut self) {
        if self.running {
            self.state.on_press_end(self.clock.now_ms());
        }
    }

    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.state.resize(viewport_width, viewport_height);
    }

    /// Host frame callback. Runs as many fixed ticks as the elapsed time
    /// allows and returns how many ran.
    pub fn frame(&mut self) -> u32 {
        if !self.running {
            return 0;
        }

        let now = self.clock.now_ms();
        let elapsed = self.last_frame_ms.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame_ms = Some(now);
        self.accumulator += elapsed.min(MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            for event in tick(&mut self.state, now) {
                self.sink.notify(&event);
            }
            self.accumulator -= SIM_DT_MS;
            substeps += 1;
        }
        substeps
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, RecordingSink};
    use crate::sim::{GameEvent, GamePhase};
    use std::rc::Rc;

    fn new_loop() -> (GameLoop<Rc<ManualClock>, RecordingSink>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(0.0));
        let game = GameLoop::new(
            GameConfig::default(),
            7,
            Rc::clone(&clock),
            RecordingSink::default(),
        );
        (game, clock)
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let (mut game, clock) = new_loop();
        assert_eq!(game.frame(), 0); // first frame only primes the timer
        clock.advance(SIM_DT_MS * 3.0 + 1.0);
        assert_eq!(game.frame(), 3);
        assert_eq!(game.state().time_ticks, 3);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let (mut game, clock) = new_loop();
        game.frame();
        clock.advance(10_000.0);
        let ticks = game.frame();
        // 100 ms of catch-up is six ticks, give or take float rounding
        assert!((5..=6).contains(&ticks), "ran {} ticks", ticks);
    }

    #[test]
    fn test_events_reach_sink_after_tick() {
        let (mut game, clock) = new_loop();
        game.frame();
        game.press();
        assert!(game.sink().events.is_empty());
        clock.advance(SIM_DT_MS);
        game.frame();
        assert_eq!(game.sink().events, vec![GameEvent::ChargeStarted]);
    }

    #[test]
    fn test_charge_uses_clock() {
        let (mut game, clock) = new_loop();
        game.frame();
        game.press();
        for _ in 0..30 {
            clock.advance(SIM_DT_MS);
            game.frame();
        }
        let power = game.state().charge_power;
        assert!((power - 0.5).abs() < 0.01, "power {}", power);
        game.release();
        assert_eq!(game.state().phase, GamePhase::Jumping);
    }

    #[test]
    fn test_stop_is_idempotent_and_resumable() {
        let (mut game, clock) = new_loop();
        game.frame();
        clock.advance(SIM_DT_MS * 2.0);
        game.frame();
        let before = game.snapshot();
        let ticks = game.state().time_ticks;

        game.stop();
        game.stop();
        assert!(!game.is_running());

        clock.advance(5_000.0);
        assert_eq!(game.frame(), 0);
        game.press();
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.state().time_ticks, ticks);

        game.start();
        game.start();
        assert!(game.is_running());
        // Stopped time is not replayed
        assert_eq!(game.frame(), 0);
        clock.advance(SIM_DT_MS);
        assert_eq!(game.frame(), 1);
    }
}
