//! Frame snapshots
//!
//! Flattens the match state into draw-ready data: a sprite list in draw order
//! plus the HUD scalars. Backends never read `GameState` directly.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{LASER_LENGTH, LASER_WIDTH};
use crate::sim::{BulletSize, ChargeState, GameState, Hazard, HazardKind, MatchPhase, Session};
use crate::tuning::Difficulty;

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKind {
    Player,
    Boss,
    PlayerShot,
    SmallBullet,
    LargeBullet,
    HugeBullet,
    Laser,
    /// Charge laser telegraph
    ChargeWarning,
    ChargeLaser,
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Center
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation in degrees for oriented sprites
    pub heading: Option<f32>,
    pub visible: bool,
}

/// HUD and results-screen data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub difficulty: Difficulty,
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub phase_name: String,
    pub boss_hp: i32,
    pub hp_ratio: f32,
    /// Seconds into the current phase
    pub elapsed_secs: f32,
    /// Clear time of each finished phase
    pub clear_times: Vec<f32>,
    pub total_clear_secs: f32,
    /// Invincible and waiting: show the respawn prompt
    pub respawn_prompt: bool,
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: MatchPhase,
    pub sprites: Vec<Sprite>,
    /// Absent outside a session
    pub hud: Option<Hud>,
}

fn hazard_sprite(hazard: &Hazard) -> Option<Sprite> {
    let kind = match &hazard.kind {
        HazardKind::Bullet(BulletSize::Small) => SpriteKind::SmallBullet,
        HazardKind::Bullet(BulletSize::Large) => SpriteKind::LargeBullet,
        HazardKind::Bullet(BulletSize::Huge) => SpriteKind::HugeBullet,
        HazardKind::Laser { .. } => SpriteKind::Laser,
        HazardKind::Charge(charge) => match charge.state {
            ChargeState::Warning => SpriteKind::ChargeWarning,
            ChargeState::Active => SpriteKind::ChargeLaser,
            ChargeState::Finished => return None,
        },
    };
    let size = match &hazard.kind {
        // Thin lasers draw as the unrotated beam; the box is only for collision
        HazardKind::Laser { .. } => Vec2::new(LASER_LENGTH, LASER_WIDTH),
        _ => hazard.size,
    };
    Some(Sprite {
        kind,
        pos: hazard.pos,
        size,
        heading: hazard.heading(),
        visible: true,
    })
}

fn session_sprites(session: &Session) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(session.hazards.len() + session.shots.len() + 2);

    if session.boss.present {
        let rect = session.boss.rect();
        sprites.push(Sprite {
            kind: SpriteKind::Boss,
            pos: rect.center,
            size: rect.size,
            heading: None,
            visible: true,
        });
    }

    let player = session.player.sprite();
    sprites.push(Sprite {
        kind: SpriteKind::Player,
        pos: player.center,
        size: player.size,
        heading: None,
        visible: session.player.visible,
    });

    sprites.extend(session.shots.iter().map(|shot| {
        let rect = shot.rect();
        Sprite {
            kind: SpriteKind::PlayerShot,
            pos: rect.center,
            size: rect.size,
            heading: Some(shot.heading),
            visible: true,
        }
    }));

    // Hazards last so they draw over everything
    sprites.extend(session.hazards.iter().filter_map(hazard_sprite));
    sprites
}

fn session_hud(session: &Session) -> Hud {
    let boss = &session.boss;
    Hud {
        difficulty: session.difficulty,
        score: session.score,
        lives: session.player.lives,
        bombs: session.player.bombs,
        phase_name: boss.phase_name().to_string(),
        boss_hp: boss.display_hp(),
        hp_ratio: boss.hp_ratio(),
        elapsed_secs: boss.elapsed_secs(session.clock.now()),
        clear_times: boss.clear_times.clone(),
        total_clear_secs: boss.total_clear_secs(),
        respawn_prompt: session.player.is_invincible(),
    }
}

/// Build the frame for the current state
pub fn snapshot(state: &GameState) -> FrameSnapshot {
    match &state.session {
        Some(session) => FrameSnapshot {
            phase: state.phase,
            sprites: session_sprites(session),
            hud: Some(session_hud(session)),
        },
        None => FrameSnapshot {
            phase: state.phase,
            sprites: Vec::new(),
            hud: None,
        },
    }
}

impl GameState {
    pub fn snapshot(&self) -> FrameSnapshot {
        snapshot(self)
    }
}
