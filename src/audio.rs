//! Audio cue boundary
//!
//! The simulation never plays sound itself. It raises `GameEvent`s and
//! `dispatch` turns the audible ones into calls on an `AudioSink`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player lost a life
    PlayerHit,
    /// Hazard grazed the player
    Graze,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::Graze { .. } => Some(SoundEffect::Graze),
            _ => None,
        }
    }
}

/// Receiver for audio cues. Every hook defaults to doing nothing.
pub trait AudioSink {
    fn on_player_hit(&mut self) {}
    fn on_graze(&mut self) {}
}

/// Sink that ignores every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {}

/// Sink that logs cues and counts them, for headless runs
#[derive(Debug, Clone)]
pub struct LogAudio {
    volume: f32,
    muted: bool,
    pub hits: u32,
    pub grazes: u32,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            volume: 0.8,
            muted: false,
            hits: 0,
            grazes: 0,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::PlayerHit => self.hits += 1,
            SoundEffect::Graze => self.grazes += 1,
        }
        let vol = self.effective_volume();
        if vol > 0.0 {
            log::debug!("Audio cue {:?} at volume {:.2}", effect, vol);
        }
    }
}

impl AudioSink for LogAudio {
    fn on_player_hit(&mut self) {
        self.play(SoundEffect::PlayerHit);
    }

    fn on_graze(&mut self) {
        self.play(SoundEffect::Graze);
    }
}

/// Forward the audible events of a tick to `sink`
pub fn dispatch(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        match effect {
            SoundEffect::PlayerHit => sink.on_player_hit(),
            SoundEffect::Graze => sink.on_graze(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Difficulty;

    #[test]
    fn test_dispatch_routes_cues() {
        let events = vec![
            GameEvent::SessionStarted {
                difficulty: Difficulty::Normal,
            },
            GameEvent::Graze { count: 3 },
            GameEvent::PlayerHit { lives_left: 2 },
            GameEvent::BombUsed,
            GameEvent::Graze { count: 1 },
        ];
        let mut sink = LogAudio::new();
        dispatch(&events, &mut sink);
        assert_eq!(sink.hits, 1);
        // One cue per graze event, not per hazard
        assert_eq!(sink.grazes, 2);
    }

    #[test]
    fn test_muted_sink_still_counts() {
        let mut sink = LogAudio::new();
        sink.set_muted(true);
        sink.set_volume(3.0);
        dispatch(&[GameEvent::PlayerHit { lives_left: 0 }], &mut sink);
        assert_eq!(sink.hits, 1);
        assert_eq!(sink.effective_volume(), 0.0);
    }

    #[test]
    fn test_silent_sink_accepts_everything() {
        let mut sink = Silent;
        dispatch(&[GameEvent::Graze { count: 1 }, GameEvent::GameOver], &mut sink);
    }
}
