//! Landing detection and scoring
//!
//! A jump resolves on the first descending tick where the actor's bottom edge
//! reaches the ground line. At that moment the actor either stands on a
//! platform (its centre is on the platform's span) or the run is over.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::platform::{Platform, PlatformKind};
use crate::config::GameConfig;

/// How close to the platform centre the actor came down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingQuality {
    Perfect,
    Normal,
}

/// Contact with a platform
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub platform_id: u32,
    pub kind: PlatformKind,
    /// Top of the platform landed on
    pub top: f32,
    /// |platform centre - actor centre|
    pub distance: f32,
    pub quality: LandingQuality,
}

/// Result of a per-tick landing check
#[derive(Debug, Clone, PartialEq)]
pub enum LandingCheck {
    /// Still in the air (rising, or above the ground line)
    Airborne,
    Landed(Landing),
    /// Reached the ground line with no platform underneath
    Missed,
}

/// Perfect within `tolerance` of the platform centre, normal otherwise
pub fn classify(distance: f32, tolerance: f32) -> LandingQuality {
    if distance <= tolerance {
        LandingQuality::Perfect
    } else {
        LandingQuality::Normal
    }
}

/// Look for ground contact this tick
pub fn check_landing(actor: &Actor, platforms: &[Platform], config: &GameConfig) -> LandingCheck {
    if !actor.is_descending() {
        return LandingCheck::Airborne;
    }

    let eps = config.landing_epsilon;
    let bottom = actor.bottom();
    if bottom < config.ground_y - eps {
        return LandingCheck::Airborne;
    }

    // The bottom edge swept from prev_bottom to bottom during this tick
    let prev_bottom = bottom - actor.vel.y;
    let center = actor.center_x();

    let candidate = platforms
        .iter()
        .find(|p| p.spans(center) && p.y >= prev_bottom - eps && p.y <= bottom + eps);

    match candidate {
        Some(p) => {
            let distance = (p.center_x() - center).abs();
            LandingCheck::Landed(Landing {
                platform_id: p.id,
                kind: p.kind,
                top: p.y,
                distance,
                quality: classify(distance, config.perfect_tolerance),
            })
        }
        None => LandingCheck::Missed,
    }
}

/// Apply a landing to score and combo, returning the points awarded
pub fn apply_landing(score: &mut u64, combo: &mut u32, landing: &Landing, config: &GameConfig) -> u64 {
    let mut points = match landing.quality {
        LandingQuality::Perfect => {
            *combo += 1;
            2 + u64::from(*combo)
        }
        LandingQuality::Normal => {
            *combo = 0;
            1
        }
    };
    if landing.kind == PlatformKind::Bonus {
        points += config.bonus_score;
    }
    *score += points;
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn platform(x: f32, kind: PlatformKind) -> Platform {
        let config = GameConfig::default();
        Platform {
            id: 7,
            x,
            y: config.ground_y,
            width: config.platform_width,
            height: config.platform_height,
            kind,
        }
    }

    /// Descending actor whose bottom is exactly on the ground, centred at `cx`
    fn falling_actor(cx: f32) -> Actor {
        let config = GameConfig::default();
        let mut actor = Actor::resting(cx, config.ground_y, config.actor_size);
        actor.vel = Vec2::new(2.0, 14.4);
        actor.airborne = true;
        actor
    }

    fn landing(distance: f32, kind: PlatformKind) -> Landing {
        let config = GameConfig::default();
        Landing {
            platform_id: 1,
            kind,
            top: config.ground_y,
            distance,
            quality: classify(distance, config.perfect_tolerance),
        }
    }

    #[test]
    fn test_rising_actor_is_airborne() {
        let config = GameConfig::default();
        let mut actor = falling_actor(330.0);
        actor.vel.y = -3.0;
        let platforms = [platform(300.0, PlatformKind::Normal)];
        assert_eq!(check_landing(&actor, &platforms, &config), LandingCheck::Airborne);
    }

    #[test]
    fn test_above_ground_is_airborne() {
        let config = GameConfig::default();
        let mut actor = falling_actor(330.0);
        actor.pos.y -= 10.0;
        let platforms = [platform(300.0, PlatformKind::Normal)];
        assert_eq!(check_landing(&actor, &platforms, &config), LandingCheck::Airborne);
    }

    #[test]
    fn test_lands_on_spanning_platform() {
        let config = GameConfig::default();
        let actor = falling_actor(333.0);
        let platforms = [
            platform(100.0, PlatformKind::Normal),
            platform(300.0, PlatformKind::Bonus),
        ];
        let LandingCheck::Landed(hit) = check_landing(&actor, &platforms, &config) else {
            panic!("expected a landing");
        };
        assert_eq!(hit.kind, PlatformKind::Bonus);
        assert!((hit.distance - 3.0).abs() < 1e-4);
        assert_eq!(hit.quality, LandingQuality::Perfect);
    }

    #[test]
    fn test_misses_between_platforms() {
        let config = GameConfig::default();
        let actor = falling_actor(250.0);
        let platforms = [
            platform(100.0, PlatformKind::Normal),
            platform(300.0, PlatformKind::Normal),
        ];
        assert_eq!(check_landing(&actor, &platforms, &config), LandingCheck::Missed);
    }

    #[test]
    fn test_perfect_landing_scoring() {
        let config = GameConfig::default();
        let (mut score, mut combo) = (0, 0);
        let points = apply_landing(&mut score, &mut combo, &landing(3.0, PlatformKind::Normal), &config);
        assert_eq!(combo, 1);
        assert_eq!(points, 3);
        assert_eq!(score, 3);

        // Streak grows the reward
        let points = apply_landing(&mut score, &mut combo, &landing(0.0, PlatformKind::Normal), &config);
        assert_eq!(combo, 2);
        assert_eq!(points, 4);
        assert_eq!(score, 7);
    }

    #[test]
    fn test_normal_landing_resets_combo() {
        let config = GameConfig::default();
        let (mut score, mut combo) = (10, 4);
        let points = apply_landing(&mut score, &mut combo, &landing(8.0, PlatformKind::Normal), &config);
        assert_eq!(combo, 0);
        assert_eq!(points, 1);
        assert_eq!(score, 11);
    }

    #[test]
    fn test_bonus_normal_landing() {
        let config = GameConfig::default();
        let (mut score, mut combo) = (0, 0);
        let points = apply_landing(&mut score, &mut combo, &landing(8.0, PlatformKind::Bonus), &config);
        assert_eq!(points, 6);
        assert_eq!(score, 6);
    }

    #[test]
    fn test_spring_scores_like_normal() {
        let config = GameConfig::default();
        let (mut score, mut combo) = (0, 0);
        apply_landing(&mut score, &mut combo, &landing(8.0, PlatformKind::Spring), &config);
        assert_eq!(score, 1);
    }
}
