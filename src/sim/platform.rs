//! Procedural platform stream
//!
//! Platforms are kept sorted by `x`. New ones are appended ahead of the
//! viewport and old ones dropped behind the camera, so the stream is an
//! unbounded run that only ever holds a screenful or two.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Awards extra points on landing
    Bonus,
    /// Drawn differently; lands like a normal platform
    Spring,
}

/// A platform, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
}

impl Platform {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether a horizontal coordinate lies on this platform's span
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.x && x <= self.right()
    }
}

/// Weighted choice of platform kind
///
/// Entries hold cumulative probabilities; a roll past the last entry
/// yields `Normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct KindTable {
    entries: Vec<(PlatformKind, f32)>,
}

impl KindTable {
    pub fn new(bonus_chance: f32, spring_chance: f32) -> Self {
        Self {
            entries: vec![
                (PlatformKind::Bonus, bonus_chance),
                (PlatformKind::Spring, bonus_chance + spring_chance),
            ],
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.bonus_chance, config.spring_chance)
    }

    /// Map a roll in [0, 1) to a kind
    pub fn pick(&self, roll: f32) -> PlatformKind {
        self.entries
            .iter()
            .find(|(_, cumulative)| roll < *cumulative)
            .map(|(kind, _)| *kind)
            .unwrap_or(PlatformKind::Normal)
    }

    pub fn draw(&self, rng: &mut impl Rng) -> PlatformKind {
        self.pick(rng.random::<f32>())
    }
}

/// Ordered, evict-behind / extend-ahead run of platforms
#[derive(Debug, Clone)]
pub struct PlatformStream {
    platforms: Vec<Platform>,
    kinds: KindTable,
    rng: Pcg32,
    next_id: u32,
}

impl PlatformStream {
    /// Starting platform at `config.start_x`, one follower, then filled to
    /// the look-ahead edge
    pub fn new(config: &GameConfig, seed: u64, camera_x: f32) -> Self {
        let mut stream = Self {
            platforms: Vec::new(),
            kinds: KindTable::from_config(config),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        let id = stream.alloc_id();
        stream.platforms.push(Platform {
            id,
            x: config.start_x,
            y: config.ground_y,
            width: config.platform_width,
            height: config.platform_height,
            kind: PlatformKind::Normal,
        });
        stream.push_next(config, 0);
        stream.extend(config, camera_x, 0);
        stream
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Gap to the next anchor at the given score
    fn next_gap(&mut self, config: &GameConfig, score: u64) -> f32 {
        let jitter = self.rng.random::<f32>() * config.distance_jitter;
        let gap = config.base_distance + jitter + score as f32 * config.difficulty_factor;
        gap.min(config.max_gap).max(config.platform_width + 1.0)
    }

    fn push_next(&mut self, config: &GameConfig, score: u64) {
        let last_x = self.platforms.last().map_or(config.start_x, |p| p.x);
        let x = last_x + self.next_gap(config, score);
        let kind = self.kinds.draw(&mut self.rng);
        let id = self.alloc_id();
        log::debug!("Platform {} at x={:.1} ({:?})", id, x, kind);
        self.platforms.push(Platform {
            id,
            x,
            y: config.ground_y,
            width: config.platform_width,
            height: config.platform_height,
            kind,
        });
    }

    /// Append platforms until the stream reaches past the look-ahead edge
    pub fn extend(&mut self, config: &GameConfig, camera_x: f32, score: u64) {
        let horizon = camera_x + config.viewport_width + config.stream_margin;
        while self.platforms.last().is_some_and(|p| p.x < horizon) {
            self.push_next(config, score);
        }
    }

    /// Drop platforms that scrolled behind the camera (always keeps two)
    pub fn evict(&mut self, config: &GameConfig, camera_x: f32) {
        let cutoff = camera_x - config.stream_margin;
        let behind = self.platforms.iter().take_while(|p| p.x < cutoff).count();
        let drop = behind.min(self.platforms.len().saturating_sub(2));
        if drop > 0 {
            self.platforms.drain(..drop);
        }
    }

    /// First platform whose anchor is strictly past `x`
    pub fn next_after(&self, x: f32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.x > x)
    }

    pub fn find(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn first(&self) -> Option<&Platform> {
        self.platforms.first()
    }

    pub fn rightmost(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn as_slice(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Scale every platform about the world origin
    pub fn rescale(&mut self, factor: f32) {
        for p in &mut self.platforms {
            p.x *= factor;
            p.y *= factor;
            p.width *= factor;
            p.height *= factor;
        }
    }

    /// Drop every platform past `x` (lets tests starve the look-ahead)
    #[cfg(test)]
    pub(crate) fn truncate_after(&mut self, x: f32) {
        self.platforms.retain(|p| p.x <= x);
    }
}
