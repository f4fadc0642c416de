//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical step only (wall-clock time only measures charge)
//! - Seeded RNG only
//! - Platforms kept in ascending x order
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod camera;
pub mod landing;
pub mod physics;
pub mod platform;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use camera::Camera;
pub use landing::{Landing, LandingCheck, LandingQuality, apply_landing, check_landing};
pub use physics::{JumpVelocity, solve_jump, time_of_flight};
pub use platform::{KindTable, Platform, PlatformKind, PlatformStream};
pub use state::{FailReason, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::tick;
