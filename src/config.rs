//! Game tuning configuration
//!
//! A `GameConfig` is an immutable value handed to a session at construction.
//! Viewport changes never mutate it in place: a new config is derived with
//! [`GameConfig::for_viewport`] and swapped in wholesale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Viewport height all default lengths are tuned for
pub const REFERENCE_HEIGHT: f32 = 600.0;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be positive and finite")]
    NonPositive { field: &'static str },
    #[error("`{field}` is out of range")]
    OutOfRange { field: &'static str },
    #[error("base_distance must exceed platform_width or platforms overlap")]
    Overlapping,
}

/// Tunable constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Physics ===
    /// Gravity added to vertical velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Launch speed at full charge (pixels/tick)
    pub jump_force: f32,
    /// Upper bound of charge power, in (0, 1]
    pub max_power: f32,
    /// Floor applied to charge power before solving a jump
    pub min_power: f32,
    /// Charge power gained per millisecond held
    pub charge_rate: f32,

    // === Platform stream ===
    /// Base gap between consecutive platform anchors
    pub base_distance: f32,
    /// Upper bound of the uniform random gap added to each platform
    pub distance_jitter: f32,
    /// Extra gap per point of score
    pub difficulty_factor: f32,
    /// Largest gap the generator will ever produce
    pub max_gap: f32,
    /// Probability that a new platform is a bonus platform
    pub bonus_chance: f32,
    /// Probability that a new platform is a spring platform
    pub spring_chance: f32,
    /// Buffer behind the camera and ahead of the viewport
    pub stream_margin: f32,

    // === Scoring ===
    /// Max centre distance for a perfect landing
    pub perfect_tolerance: f32,
    /// Extra points for landing on a bonus platform
    pub bonus_score: u64,

    // === Geometry ===
    /// Edge length of the square actor
    pub actor_size: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    /// Y coordinate of every platform top
    pub ground_y: f32,
    /// X of the starting platform
    pub start_x: f32,
    /// Vertical float slack when testing for ground contact
    pub landing_epsilon: f32,

    // === Viewport / camera ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Per-tick camera interpolation factor, in (0, 1)
    pub camera_smoothing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_force: 15.0,
            max_power: 1.0,
            min_power: 0.05,
            charge_rate: 0.001,

            base_distance: 150.0,
            distance_jitter: 100.0,
            difficulty_factor: 0.5,
            max_gap: 400.0,
            bonus_chance: 0.10,
            spring_chance: 0.05,
            stream_margin: 200.0,

            perfect_tolerance: 5.0,
            bonus_score: 5,

            actor_size: 40.0,
            platform_width: 60.0,
            platform_height: 20.0,
            ground_y: 450.0,
            start_x: 100.0,
            landing_epsilon: 0.01,

            viewport_width: 800.0,
            viewport_height: REFERENCE_HEIGHT,
            camera_smoothing: 0.1,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config, falling back to defaults on any problem
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded game config");
                config
            }
            Err(e) => {
                log::warn!("Using default game config: {}", e);
                Self::default()
            }
        }
    }

    /// This config if it validates, otherwise the defaults
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Using default game config: {}", e);
                Self::default()
            }
        }
    }

    /// Check every constant is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("charge_rate", self.charge_rate),
            ("base_distance", self.base_distance),
            ("max_gap", self.max_gap),
            ("stream_margin", self.stream_margin),
            ("perfect_tolerance", self.perfect_tolerance),
            ("actor_size", self.actor_size),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("landing_epsilon", self.landing_epsilon),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }

        let non_negative = [
            ("distance_jitter", self.distance_jitter),
            ("difficulty_factor", self.difficulty_factor),
            ("ground_y", self.ground_y),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange { field });
            }
        }

        if self.ground_y >= self.viewport_height {
            return Err(ConfigError::OutOfRange { field: "ground_y" });
        }
        if !(self.max_power > 0.0 && self.max_power <= 1.0) {
            return Err(ConfigError::OutOfRange { field: "max_power" });
        }
        if !(self.min_power > 0.0 && self.min_power <= self.max_power) {
            return Err(ConfigError::OutOfRange { field: "min_power" });
        }
        if !(self.camera_smoothing > 0.0 && self.camera_smoothing < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "camera_smoothing",
            });
        }
        for (field, p) in [
            ("bonus_chance", self.bonus_chance),
            ("spring_chance", self.spring_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::OutOfRange { field });
            }
        }
        if self.bonus_chance + self.spring_chance > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "spring_chance",
            });
        }
        if self.base_distance <= self.platform_width || self.max_gap < self.base_distance {
            return Err(ConfigError::Overlapping);
        }
        Ok(())
    }

    /// Whether a host-reported viewport is usable (hidden canvases report 0x0)
    pub fn is_usable_viewport(viewport_width: f32, viewport_height: f32) -> bool {
        viewport_width.is_finite()
            && viewport_width > 0.0
            && viewport_height.is_finite()
            && viewport_height > 0.0
    }

    /// Ratio between a new viewport height and this config's
    ///
    /// 1.0 for an unusable viewport.
    pub fn scale_factor_to(&self, viewport_height: f32) -> f32 {
        if viewport_height.is_finite() && viewport_height > 0.0 && self.viewport_height > 0.0 {
            viewport_height / self.viewport_height
        } else {
            1.0
        }
    }

    /// Derive the config for a resized viewport
    ///
    /// Every length scales with the height ratio. Gravity and jump force
    /// scale too, so jump arcs keep the same duration in ticks. An unusable
    /// viewport leaves the config as it is.
    pub fn for_viewport(&self, viewport_width: f32, viewport_height: f32) -> Self {
        if !Self::is_usable_viewport(viewport_width, viewport_height) {
            return self.clone();
        }
        let s = self.scale_factor_to(viewport_height);
        Self {
            gravity: self.gravity * s,
            jump_force: self.jump_force * s,
            base_distance: self.base_distance * s,
            distance_jitter: self.distance_jitter * s,
            difficulty_factor: self.difficulty_factor * s,
            max_gap: self.max_gap * s,
            stream_margin: self.stream_margin * s,
            perfect_tolerance: self.perfect_tolerance * s,
            actor_size: self.actor_size * s,
            platform_width: self.platform_width * s,
            platform_height: self.platform_height * s,
            ground_y: self.ground_y * s,
            start_x: self.start_x * s,
            viewport_width,
            viewport_height,
            ..self.clone()
        }
    }
}
