//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod motion;
pub mod pattern;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossPhase, PhaseCleared, Stage};
pub use collision::{CollisionReport, resolve};
pub use motion::{BulletSize, ChargeLaser, ChargeState, Hazard, HazardKind, PlayerShot};
pub use pattern::{Emitter, EmitterSpec, PatternKind};
pub use player::{Lifecycle, Movement, Player};
pub use rect::Rect;
pub use state::{EntityIds, GameEvent, GameState, MatchPhase, Session, SimClock};
pub use tick::{FightOutcome, TickInput, step_session, tick};
