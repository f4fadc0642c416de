//! Browser bindings
//!
//! A thin `wasm_bindgen` wrapper around [`GameLoop`]. The page owns the
//! canvas, input listeners, audio and the animation-frame loop; it forwards
//! press/release/resize/frame calls here and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::feedback::{Cue, CuePlayer, FeedbackSink, SoundEffect};
use crate::platform::{Clock, HostCapabilities};
use crate::runner::GameLoop;

/// `performance.now()`, falling back to `Date.now()`
struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// Forwards cues to a JS callback `(kind: string, value: number)`
#[derive(Default)]
struct JsCuePlayer {
    callback: Option<js_sys::Function>,
}

impl CuePlayer for JsCuePlayer {
    fn play(&mut self, cue: Cue) {
        let Some(callback) = &self.callback else { return };
        let (kind, value) = match cue {
            Cue::Sound(effect) => (sound_name(effect), 0),
            Cue::Vibrate { millis } => ("vibrate", millis),
        };
        // A throwing callback must not take the game down with it
        if let Err(e) = callback.call2(&JsValue::NULL, &JsValue::from_str(kind), &JsValue::from(value)) {
            log::warn!("Cue callback failed: {:?}", e);
        }
    }
}

fn sound_name(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Charge => "charge",
        SoundEffect::Jump => "jump",
        SoundEffect::Land => "land",
        SoundEffect::Perfect => "perfect",
        SoundEffect::Bonus => "bonus",
        SoundEffect::GameOver => "game_over",
    }
}

/// What this browser offers
fn detect_capabilities() -> HostCapabilities {
    let Some(window) = web_sys::window() else {
        return HostCapabilities::NONE;
    };
    let audio = js_sys::Reflect::has(&window, &JsValue::from_str("AudioContext")).unwrap_or(false);
    let haptics =
        js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("vibrate")).unwrap_or(false);
    HostCapabilities { audio, haptics }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Charge Jump starting...");
}

/// Game handle exposed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    inner: GameLoop<PerformanceClock, FeedbackSink<JsCuePlayer>>,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` may be empty for defaults; `seed` 0 picks one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: f64, width: f32, height: f32) -> WebGame {
        let base = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::load_or_default(config_json)
        };
        let config = base.for_viewport(width, height);
        let seed = if seed > 0.0 { seed as u64 } else { js_sys::Date::now() as u64 };
        let caps = detect_capabilities();
        log::info!("Game initialized with seed: {} ({:?})", seed, caps);

        WebGame {
            inner: GameLoop::new(
                config,
                seed,
                PerformanceClock::new(),
                FeedbackSink::new(JsCuePlayer::default(), caps),
            ),
        }
    }

    pub fn set_cue_callback(&mut self, callback: js_sys::Function) {
        self.inner.sink_mut().player_mut().callback = Some(callback);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.inner.sink_mut().set_muted(muted);
    }

    pub fn press(&mut self) {
        self.inner.press();
    }

    pub fn release(&mut self) {
        self.inner.release();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    /// Call once per animation frame; returns ticks run
    pub fn frame(&mut self) -> u32 {
        self.inner.frame()
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn stop(&mut self) {
        self.inner.stop();
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.inner
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
