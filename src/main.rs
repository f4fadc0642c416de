//! Charge Jump headless runner
//!
//! Plays seeded runs with a simple autopilot and logs the results. The
//! browser build is driven from JavaScript through the `web` module.
//!
//! Usage: `charge-jump [seed] [runs] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::rc::Rc;

    use charge_jump::platform::{LogSink, ManualClock};
    use charge_jump::runner::SIM_DT_MS;
    use charge_jump::{GameConfig, GameLoop, GamePhase};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Longest run the autopilot plays before giving up on it
    const MAX_JUMPS: u32 = 500;

    type Game = GameLoop<Rc<ManualClock>, LogSink>;

    /// Advance the clock one frame at a time for at least `ms`
    fn run_for(game: &mut Game, clock: &ManualClock, ms: f64) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            clock.advance(SIM_DT_MS);
            game.frame();
            elapsed += SIM_DT_MS;
        }
    }

    /// Hold time that should land within the perfect tolerance, with some
    /// human-ish error mixed in
    fn choose_hold(game: &Game, rng: &mut Pcg32) -> f64 {
        let state = game.state();
        let c = &state.config;
        let Some(target) = state.platforms.next_after(state.actor.right()) else {
            return 0.0;
        };
        let dx = target.center_x() - state.actor.center_x();
        // Jumps are aimed at the target centre and land `vx` short of it,
        // so pick the power whose vx fits inside the perfect tolerance
        let power = (dx * c.gravity / (2.0 * c.jump_force * c.perfect_tolerance))
            .clamp(c.min_power, c.max_power);
        let error = rng.random_range(0.85..1.15);
        (power / c.charge_rate) as f64 * error
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
        let runs = args.next().and_then(|s| s.parse().ok()).unwrap_or(3u32);
        let config = match args.next() {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(json) => GameConfig::load_or_default(&json),
                Err(e) => {
                    log::warn!("Could not read {}: {}", path, e);
                    GameConfig::default()
                }
            },
            None => GameConfig::default(),
        };

        log::info!("Charge Jump (native) starting...");
        log::info!("Autopilot: seed={} runs={}", seed, runs);

        let clock = Rc::new(ManualClock::new(0.0));
        let mut game = GameLoop::new(config, seed, Rc::clone(&clock), LogSink);
        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
        game.frame();

        let mut best = 0;
        for run in 1..=runs {
            while game.state().phase != GamePhase::GameOver && game.state().jumps < MAX_JUMPS {
                let hold = choose_hold(&game, &mut rng);
                game.press();
                run_for(&mut game, &clock, hold);
                game.release();
                while game.state().phase == GamePhase::Jumping {
                    run_for(&mut game, &clock, SIM_DT_MS);
                }
            }

            let state = game.state();
            best = best.max(state.score);
            log::info!(
                "Run {}: score={} jumps={} ticks={}",
                run,
                state.score,
                state.jumps,
                state.time_ticks
            );

            // Restart from game over (or abandon a run that hit the cap)
            if game.state().phase != GamePhase::GameOver {
                let config = game.state().config.clone();
                let seed = game.state().next_run_seed();
                game = GameLoop::new(config, seed, Rc::clone(&clock), LogSink);
                game.frame();
            } else {
                game.press();
                run_for(&mut game, &clock, SIM_DT_MS);
            }
        }

        game.stop();
        log::info!("Best score over {} runs: {}", runs, best);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
