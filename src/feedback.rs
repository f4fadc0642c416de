//! Sound and vibration cues
//!
//! Maps game events to requests for the host's audio and haptics
//! collaborators. Synthesis and playback happen outside the crate; this only
//! decides what to ask for, and only asks for what the host supports.

use crate::platform::{EventSink, HostCapabilities};
use crate::sim::{GameEvent, LandingQuality, PlatformKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Control pressed, charge building
    Charge,
    /// Actor left the ground
    Jump,
    /// Ordinary landing
    Land,
    /// Landing within the perfect tolerance
    Perfect,
    /// Landed on a bonus platform
    Bonus,
    /// Run ended
    GameOver,
}

/// A request to a feedback collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Sound(SoundEffect),
    Vibrate { millis: u32 },
}

/// Cues for one event, filtered by what the host can do
pub fn cues_for(event: &GameEvent, caps: HostCapabilities) -> Vec<Cue> {
    let mut sounds = Vec::new();
    let vibrate = match event {
        GameEvent::ChargeStarted => {
            sounds.push(SoundEffect::Charge);
            None
        }
        GameEvent::Jump { .. } => {
            sounds.push(SoundEffect::Jump);
            Some(10)
        }
        GameEvent::Landed { quality, kind, .. } => {
            let millis = match quality {
                LandingQuality::Perfect => {
                    sounds.push(SoundEffect::Perfect);
                    50
                }
                LandingQuality::Normal => {
                    sounds.push(SoundEffect::Land);
                    20
                }
            };
            if *kind == PlatformKind::Bonus {
                sounds.push(SoundEffect::Bonus);
            }
            Some(millis)
        }
        GameEvent::GameOver { .. } => {
            sounds.push(SoundEffect::GameOver);
            Some(200)
        }
        GameEvent::Reset { .. } => None,
    };

    let mut cues = Vec::new();
    if caps.audio {
        cues.extend(sounds.into_iter().map(Cue::Sound));
    }
    if caps.haptics {
        if let Some(millis) = vibrate {
            cues.push(Cue::Vibrate { millis });
        }
    }
    cues
}

/// Receives cues produced by [`FeedbackSink`]
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Event sink that turns events into cues for a player
pub struct FeedbackSink<P: CuePlayer> {
    player: P,
    caps: HostCapabilities,
    muted: bool,
}

impl<P: CuePlayer> FeedbackSink<P> {
    pub fn new(player: P, caps: HostCapabilities) -> Self {
        Self {
            player,
            caps,
            muted: false,
        }
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}

impl<P: CuePlayer> EventSink for FeedbackSink<P> {
    fn notify(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }
        for cue in cues_for(event, self.caps) {
            self.player.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FailReason;

    fn perfect_bonus() -> GameEvent {
        GameEvent::Landed {
            platform_id: 2,
            kind: PlatformKind::Bonus,
            quality: LandingQuality::Perfect,
            points: 8,
            combo: 1,
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl CuePlayer for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_cues_respect_capabilities() {
        let event = perfect_bonus();
        assert!(cues_for(&event, HostCapabilities::NONE).is_empty());

        let audio_only = HostCapabilities {
            audio: true,
            haptics: false,
        };
        assert_eq!(
            cues_for(&event, audio_only),
            vec![
                Cue::Sound(SoundEffect::Perfect),
                Cue::Sound(SoundEffect::Bonus)
            ]
        );

        let haptics_only = HostCapabilities {
            audio: false,
            haptics: true,
        };
        assert_eq!(cues_for(&event, haptics_only), vec![Cue::Vibrate { millis: 50 }]);
    }

    #[test]
    fn test_game_over_cue() {
        let event = GameEvent::GameOver {
            score: 10,
            reason: FailReason::MissedPlatform,
        };
        assert_eq!(
            cues_for(&event, HostCapabilities::ALL),
            vec![
                Cue::Sound(SoundEffect::GameOver),
                Cue::Vibrate { millis: 200 }
            ]
        );
    }

    #[test]
    fn test_feedback_sink_mute() {
        let mut sink = FeedbackSink::new(Recorder::default(), HostCapabilities::ALL);
        sink.notify(&GameEvent::ChargeStarted);
        assert_eq!(sink.player().0, vec![Cue::Sound(SoundEffect::Charge)]);

        sink.set_muted(true);
        sink.notify(&perfect_bonus());
        assert_eq!(sink.player().0.len(), 1);
    }
}
