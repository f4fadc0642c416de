//! Charge Jump - A side-scrolling charge-and-jump arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump solver, platforms, landing, session)
//! - `config`: Tunable constants, replaced wholesale on resize
//! - `platform`: Host abstraction (clock, capabilities, event sinks)
//! - `feedback`: Game events to sound/vibration cues
//! - `runner`: Fixed-timestep loop driver
//! - `web`: Browser bindings (wasm32 only)

pub mod config;
pub mod feedback;
pub mod platform;
pub mod runner;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};
pub use runner::GameLoop;
pub use sim::{GameEvent, GamePhase, GameState, Snapshot};
