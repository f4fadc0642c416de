//! Input handling and the fixed-step simulation tick
//!
//! Press/release are applied the moment the host delivers them. `tick`
//! advances one logical step in a fixed order: charge, actor, landing,
//! camera, platform stream. Events from both paths are returned by `tick`.

use super::landing::{self, LandingCheck};
use super::physics::solve_jump;
use super::state::{FailReason, GameEvent, GamePhase, GameState};
use crate::config::GameConfig;

impl GameState {
    /// Control pressed
    pub fn on_press_start(&mut self, now_ms: f64) {
        match self.phase {
            GamePhase::Start => {
                self.phase = GamePhase::Charging;
                self.charge_start_ms = Some(now_ms);
                self.charge_power = 0.0;
                self.events.push(GameEvent::ChargeStarted);
            }
            GamePhase::GameOver => {
                log::info!("Restarting after game over (score {})", self.score);
                self.reset();
            }
            GamePhase::Charging | GamePhase::Jumping => {}
        }
    }

    /// Control released
    pub fn on_press_end(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Charging {
            return;
        }
        self.update_charge(now_ms);
        self.charge_start_ms = None;

        let Some(target) = self.platforms.next_after(self.actor.right()) else {
            self.fail(FailReason::NoTarget);
            return;
        };
        let target_id = target.id;
        let dx = target.center_x() - self.actor.center_x();

        let c = &self.config;
        let v = solve_jump(self.charge_power, c.gravity, c.jump_force, dx, c.min_power);
        self.actor.launch(v);
        self.target_id = Some(target_id);
        self.phase = GamePhase::Jumping;

        log::debug!(
            "Jump: power={:.2} dx={:.1} vx={:.2} vy={:.2} target={}",
            self.charge_power,
            dx,
            v.vx,
            v.vy,
            target_id
        );
        self.events.push(GameEvent::Jump {
            power: self.charge_power,
            target_id,
        });
    }

    /// Recompute charge power from how long the control has been held
    fn update_charge(&mut self, now_ms: f64) {
        if let Some(start) = self.charge_start_ms {
            let held = (now_ms - start).max(0.0) as f32;
            self.charge_power = (held * self.config.charge_rate).min(self.config.max_power);
        }
    }

    fn fail(&mut self, reason: FailReason) {
        self.phase = GamePhase::GameOver;
        self.combo = 0;
        self.target_id = None;
        log::info!(
            "Game over ({:?}): score={} jumps={}",
            reason,
            self.score,
            self.jumps
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            reason,
        });
    }

    fn resolve_jump(&mut self) {
        self.actor.step(self.config.gravity);

        match landing::check_landing(&self.actor, self.platforms.as_slice(), &self.config) {
            LandingCheck::Airborne => {
                if self.actor.is_descending() && self.actor.bottom() > self.config.viewport_height {
                    self.fail(FailReason::FellOff);
                }
            }
            LandingCheck::Landed(l) => {
                self.actor.land_on(l.top);
                let points = landing::apply_landing(&mut self.score, &mut self.combo, &l, &self.config);
                self.jumps += 1;
                self.target_id = None;
                self.phase = GamePhase::Start;
                log::debug!(
                    "Landed on {} ({:?}, {:?}) distance={:.2} +{} score={}",
                    l.platform_id,
                    l.kind,
                    l.quality,
                    l.distance,
                    points,
                    self.score
                );
                self.events.push(GameEvent::Landed {
                    platform_id: l.platform_id,
                    kind: l.kind,
                    quality: l.quality,
                    points,
                    combo: self.combo,
                });
            }
            LandingCheck::Missed => self.fail(FailReason::MissedPlatform),
        }
    }

    /// Swap in a config for a new viewport, scaling the world to match
    ///
    /// Zero, negative or non-finite sizes are ignored.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if !GameConfig::is_usable_viewport(viewport_width, viewport_height) {
            log::debug!("Ignoring resize to {}x{}", viewport_width, viewport_height);
            return;
        }
        let factor = self.config.scale_factor_to(viewport_height);
        let config = self.config.for_viewport(viewport_width, viewport_height);

        self.actor.rescale(factor);
        self.platforms.rescale(factor);
        self.camera.x *= factor;
        self.config = config;

        log::info!(
            "Resized to {}x{} (scale {:.3})",
            viewport_width,
            viewport_height,
            factor
        );
    }
}

/// Advance the session by one fixed step and return the events since the
/// previous tick
pub fn tick(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    if state.phase == GamePhase::GameOver {
        return state.drain_events();
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Charging => state.update_charge(now_ms),
        GamePhase::Jumping => state.resolve_jump(),
        GamePhase::Start | GamePhase::GameOver => {}
    }

    // Camera and stream freeze with the rest of the world on game over
    if state.phase != GamePhase::GameOver {
        let c = &state.config;
        state
            .camera
            .follow(state.actor.pos.x, c.viewport_width, c.camera_smoothing);
        state.platforms.extend(c, state.camera.x, state.score);
        state.platforms.evict(c, state.camera.x);
    }

    state.drain_events()
}
