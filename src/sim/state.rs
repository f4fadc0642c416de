//! Game session state and core simulation types
//!
//! Everything a run needs lives in `GameState`. Renderers read a
//! [`Snapshot`]; audio and haptics react to [`GameEvent`]s.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::camera::Camera;
use super::landing::LandingQuality;
use super::platform::{Platform, PlatformKind, PlatformStream};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Standing on a platform, waiting for a press
    Start,
    /// Control held, power building up
    Charging,
    /// In the air
    Jumping,
    /// Run ended, waiting for a press to restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    /// Nothing to jump to when the control was released
    NoTarget,
    /// Came down with no platform underneath
    MissedPlatform,
    /// Dropped below the bottom of the viewport
    FellOff,
}

/// Discrete things that happened, for sound/vibration/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ChargeStarted,
    Jump {
        power: f32,
        target_id: u32,
    },
    Landed {
        platform_id: u32,
        kind: PlatformKind,
        quality: LandingQuality,
        points: u64,
        combo: u32,
    },
    GameOver {
        score: u64,
        reason: FailReason,
    },
    Reset {
        seed: u64,
    },
}

/// Read-only copy of everything a renderer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub combo: u32,
    pub charge_power: f32,
    pub camera_x: f32,
    pub actor: Actor,
    pub platforms: Vec<Platform>,
    pub target_id: Option<u32>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Complete session state (deterministic for a given seed and input timing)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed of the current run
    pub seed: u64,
    /// Runs played, including the current one
    pub runs: u32,
    pub phase: GamePhase,
    pub score: u64,
    /// Consecutive perfect landings
    pub combo: u32,
    pub charge_power: f32,
    /// Clock reading when the control was pressed
    pub charge_start_ms: Option<f64>,
    pub actor: Actor,
    pub platforms: PlatformStream,
    pub camera: Camera,
    /// Platform the current jump is aimed at
    pub target_id: Option<u32>,
    /// Successful landings this run
    pub jumps: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events not yet handed out by `tick`
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given config and seed
    ///
    /// A config that fails validation is replaced by the defaults.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.validated_or_default();
        let actor = Actor::resting(
            config.start_x + config.platform_width / 2.0,
            config.ground_y,
            config.actor_size,
        );
        let mut camera = Camera::default();
        camera.snap_to(actor.pos.x, config.viewport_width);
        let platforms = PlatformStream::new(&config, seed, camera.x);

        log::info!("New run: seed={} platforms={}", seed, platforms.len());

        Self {
            config,
            seed,
            runs: 1,
            phase: GamePhase::Start,
            score: 0,
            combo: 0,
            charge_power: 0.0,
            charge_start_ms: None,
            actor,
            platforms,
            camera,
            target_id: None,
            jumps: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Seed for the run after this one
    pub fn next_run_seed(&self) -> u64 {
        self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
    }

    /// Re-initialise everything for a fresh run with the same config
    pub fn reset(&mut self) {
        let seed = self.next_run_seed();
        let runs = self.runs + 1;
        let pending = std::mem::take(&mut self.events);
        *self = Self::new(self.config.clone(), seed);
        self.runs = runs;
        self.events = pending;
        self.events.push(GameEvent::Reset { seed });
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Platform the current jump is aimed at, if any
    pub fn target(&self) -> Option<&Platform> {
        self.target_id.and_then(|id| self.platforms.find(id))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            combo: self.combo,
            charge_power: self.charge_power,
            camera_x: self.camera.x,
            actor: self.actor.clone(),
            platforms: self.platforms.as_slice().to_vec(),
            target_id: self.target_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let config = GameConfig::default();
        let state = GameState::new(config.clone(), 1);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert!(state.platforms.len() >= 2);

        // Actor stands centred on the first platform
        let first = state.platforms.first().unwrap();
        assert!((state.actor.center_x() - first.center_x()).abs() < 1e-4);
        assert!((state.actor.bottom() - first.y).abs() < 1e-4);
        assert!(!state.actor.airborne);
    }

    #[test]
    fn test_reset_changes_seed_and_counts_runs() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.score = 42;
        state.combo = 3;
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.runs, 2);
        assert_ne!(state.seed, 9);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset { seed: state.seed }]);
    }

    #[test]
    fn test_reset_keeps_undelivered_events() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.events.push(GameEvent::ChargeStarted);
        state.reset();
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ChargeStarted, GameEvent::Reset { seed: state.seed }]
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let config = GameConfig {
            gravity: 0.0,
            ..Default::default()
        };
        let state = GameState::new(config, 1);
        assert_eq!(state.config, GameConfig::default());
    }

    #[test]
    fn test_snapshot_json() {
        let state = GameState::new(GameConfig::default(), 3);
        let json = state.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.platforms.len(), state.platforms.len());
    }
}
