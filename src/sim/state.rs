//! Match and session state
//!
//! Everything the simulation needs to continue deterministically lives here
//! and is serializable, including the RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{Boss, Stage};
use super::motion::{Hazard, PlayerShot};
use super::player::Player;
use crate::consts::*;
use crate::error::ConfigError;
use crate::tuning::{Difficulty, DifficultyTuning, Tuning};

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Picking a difficulty
    DifficultySelect { cursor: Difficulty },
    /// Normal three-phase boss fight
    Fight,
    /// Fight frozen; `extra` remembers which fight to resume
    Paused { extra: bool },
    /// Normal boss defeated, showing clear times
    Results,
    /// Ceremony before the extra stage
    ExtraTransition { ticks_left: u32 },
    /// Extra-stage boss fight
    ExtraFight,
    /// Extra boss defeated; input is ignored until the hold runs out
    ExtraResults { hold_ticks: u32 },
    /// Out of lives
    GameOver,
    /// Session over, nothing left to tick
    Exited,
}

impl MatchPhase {
    pub fn is_fight(&self) -> bool {
        matches!(self, MatchPhase::Fight | MatchPhase::ExtraFight)
    }
}

/// Things that happened during a tick, for audio and UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { difficulty: Difficulty },
    PlayerHit { lives_left: u32 },
    Graze { count: u32 },
    BombUsed,
    PhaseCleared { index: usize, seconds: f32 },
    BossDefeated { stage: Stage },
    ExtraStageRequested,
    ExtraStageStarted,
    GameOver,
    ReturnedToSelect,
    Exited,
}

/// Simulation clock: ticks since the session started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    ticks: u64,
}

impl SimClock {
    pub fn now(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick and return the new time
    pub fn advance(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    pub fn seconds(&self) -> f32 {
        self.ticks as f32 / TICKS_PER_SECOND as f32
    }
}

/// Entity ID allocator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityIds {
    last: u32,
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        self.last = self.last.wrapping_add(1);
        self.last
    }
}

/// One run at a chosen difficulty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub difficulty: Difficulty,
    pub tuning: DifficultyTuning,
    pub score: u64,
    pub player: Player,
    pub boss: Boss,
    /// Player homing shots
    pub shots: Vec<PlayerShot>,
    /// Enemy bullets and lasers
    pub hazards: Vec<Hazard>,
    pub clock: SimClock,
    pub rng: Pcg32,
    pub ids: EntityIds,
}

impl Session {
    pub fn new(difficulty: Difficulty, tuning: &DifficultyTuning, seed: u64) -> Self {
        let clock = SimClock::default();
        Self {
            difficulty,
            tuning: tuning.clone(),
            score: 0,
            player: Player::new(tuning.player_lives, tuning.bombs),
            boss: Boss::new(tuning.phases.clone(), clock.now()),
            shots: Vec::new(),
            hazards: Vec::new(),
            clock,
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::default(),
        }
    }

    /// Swap the boss to the extra phase-set and reset the field for it
    pub fn begin_extra_stage(&mut self) {
        let now = self.clock.now();
        self.boss.begin_extra_stage(self.tuning.extra_phase.clone(), now);
        self.player.respawn();
        self.hazards.clear();
        self.shots.clear();
        log::info!(
            "Extra stage armed: {} ({} hp)",
            self.boss.phase_name(),
            self.boss.hp
        );
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Base seed; each session derives its own from it
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: MatchPhase,
    /// Present from difficulty confirmation until exit or return to select
    pub session: Option<Session>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    sessions_started: u64,
}

impl GameState {
    /// Validate `tuning` and open the difficulty selector
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            seed,
            tuning,
            phase: MatchPhase::DifficultySelect {
                cursor: Difficulty::default(),
            },
            session: None,
            events: Vec::new(),
            sessions_started: 0,
        })
    }

    /// Build a session for `difficulty` and enter the fight
    pub fn start_session(&mut self, difficulty: Difficulty) {
        let seed = self
            .seed
            .wrapping_add(self.sessions_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.sessions_started += 1;
        let tuning = self.tuning.for_difficulty(difficulty);
        self.session = Some(Session::new(difficulty, tuning, seed));
        self.phase = MatchPhase::Fight;
        self.events.push(GameEvent::SessionStarted { difficulty });
        log::info!("Session started on {} (seed {})", difficulty, seed);
    }

    /// Drop the session and go back to the selector
    pub fn return_to_select(&mut self) {
        let cursor = self
            .session
            .take()
            .map(|s| s.difficulty)
            .unwrap_or_default();
        self.phase = MatchPhase::DifficultySelect { cursor };
        self.events.push(GameEvent::ReturnedToSelect);
        log::info!("Returned to difficulty select");
    }

    pub fn exit(&mut self) {
        self.session = None;
        self.phase = MatchPhase::Exited;
        self.events.push(GameEvent::Exited);
        log::info!("Session exited");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_opens_selector() {
        let state = GameState::new(Tuning::default(), 1).unwrap();
        assert_eq!(
            state.phase,
            MatchPhase::DifficultySelect {
                cursor: Difficulty::Normal
            }
        );
        assert!(state.session.is_none());
    }

    #[test]
    fn test_invalid_tuning_rejected_before_fight() {
        let mut tuning = Tuning::default();
        tuning.normal.phases[0].max_hp = 0;
        assert!(GameState::new(tuning, 1).is_err());
    }

    #[test]
    fn test_session_uses_difficulty_tables() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start_session(Difficulty::Hard);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.player.lives, state.tuning.hard.player_lives);
        assert_eq!(session.boss.hp, state.tuning.hard.phases[0].max_hp);
        assert_eq!(state.phase, MatchPhase::Fight);
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start_session(Difficulty::Normal);
        let first = state.session.as_ref().unwrap().rng.clone();
        state.return_to_select();
        assert!(state.session.is_none());
        state.start_session(Difficulty::Normal);
        let second = state.session.as_ref().unwrap().rng.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut ids = EntityIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a, 1);
    }

    #[test]
    fn test_session_serializes() {
        let mut state = GameState::new(Tuning::default(), 5).unwrap();
        state.start_session(Difficulty::Easy);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, state.phase);
        assert_eq!(
            back.session.as_ref().unwrap().rng,
            state.session.as_ref().unwrap().rng
        );
    }
}
