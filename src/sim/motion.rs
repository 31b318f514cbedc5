//! Entity kinds and their per-tick motion rules
//!
//! Every hazard and player shot advances exactly once per tick. Linear
//! hazards integrate a velocity fixed at spawn, charge lasers sit still and
//! run their warning/active countdown, and player shots home on the boss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::{heading_between, heading_to_vec, normalize_degrees};

/// Bullet sprite sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletSize {
    Small,
    Large,
    /// Oversized bullet used by the extra stage
    Huge,
}

impl BulletSize {
    pub fn side(&self) -> f32 {
        match self {
            BulletSize::Small => SMALL_BULLET_SIZE,
            BulletSize::Large => LARGE_BULLET_SIZE,
            BulletSize::Huge => HUGE_BULLET_SIZE,
        }
    }
}

/// Charge laser lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeState {
    /// Telegraphed, not collidable
    Warning,
    /// Collidable
    Active,
    /// Spent, removed at the end of the motion step
    Finished,
}

/// A stationary laser that warns before it fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLaser {
    /// Ticks since spawn
    pub elapsed: u32,
    /// Warning ticks
    pub delay: u32,
    /// Active ticks
    pub duration: u32,
    pub state: ChargeState,
}

impl ChargeLaser {
    pub fn new(delay: u32, duration: u32) -> Self {
        Self {
            elapsed: 0,
            delay,
            duration,
            state: ChargeState::Warning,
        }
    }

    /// Advance one local tick and return the new state
    pub fn advance(&mut self) -> ChargeState {
        self.elapsed = self.elapsed.saturating_add(1);
        self.state = if self.elapsed <= self.delay {
            ChargeState::Warning
        } else if self.elapsed <= self.delay.saturating_add(self.duration) {
            ChargeState::Active
        } else {
            ChargeState::Finished
        };
        self.state
    }
}

/// Hazard variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    Bullet(BulletSize),
    /// Thin laser; heading only orients the sprite
    Laser { heading: f32 },
    Charge(ChargeLaser),
}

/// What happened to a hazard during its motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardFate {
    Live,
    /// Left the playfield; the player is credited for dodging it
    Avoided,
    /// Ran out its own lifetime
    Expired,
}

/// An enemy projectile or laser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision box size (centered on `pos`)
    pub size: Vec2,
    /// Set once the hazard has awarded its graze
    pub grazed: bool,
}

impl Hazard {
    pub fn bullet(id: u32, bullet: BulletSize, pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            id,
            kind: HazardKind::Bullet(bullet),
            pos,
            vel: heading_to_vec(angle) * speed,
            size: Vec2::splat(bullet.side()),
            grazed: false,
        }
    }

    pub fn laser(id: u32, pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            id,
            kind: HazardKind::Laser {
                heading: normalize_degrees(angle),
            },
            pos,
            vel: heading_to_vec(angle) * speed,
            size: Rect::rotated_extent(LASER_LENGTH, LASER_WIDTH, angle),
            grazed: false,
        }
    }

    pub fn charge_laser(id: u32, pos: Vec2, delay: u32, duration: u32) -> Self {
        Self {
            id,
            kind: HazardKind::Charge(ChargeLaser::new(delay, duration)),
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(CHARGE_LASER_WIDTH, CHARGE_LASER_HEIGHT),
            grazed: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Whether this hazard takes part in hit and graze checks
    pub fn is_collidable(&self) -> bool {
        match &self.kind {
            HazardKind::Charge(charge) => charge.state == ChargeState::Active,
            _ => true,
        }
    }

    /// Travel heading for oriented sprites
    pub fn heading(&self) -> Option<f32> {
        match self.kind {
            HazardKind::Laser { heading } => Some(heading),
            _ => None,
        }
    }

    /// Apply one tick of motion
    pub fn advance(&mut self) -> HazardFate {
        match &mut self.kind {
            HazardKind::Charge(charge) => match charge.advance() {
                ChargeState::Finished => HazardFate::Expired,
                _ => HazardFate::Live,
            },
            HazardKind::Bullet(_) | HazardKind::Laser { .. } => {
                self.pos += self.vel;
                if self.rect().overlaps(&Rect::playfield()) {
                    HazardFate::Live
                } else {
                    HazardFate::Avoided
                }
            }
        }
    }
}

/// Player homing shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShot {
    pub id: u32,
    pub pos: Vec2,
    /// Degrees, standard orientation in screen space
    pub heading: f32,
    pub speed: f32,
}

impl PlayerShot {
    /// New shot leaving the player straight up
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            heading: -90.0,
            speed: SHOT_SPEED,
        }
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        heading_to_vec(self.heading) * self.speed
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, SHOT_SIZE)
    }

    /// Steer toward `target` (if any), move, and report whether the shot is still in bounds
    pub fn advance(&mut self, target: Option<Vec2>) -> bool {
        if let Some(target) = target {
            let wanted = heading_between(self.pos, target);
            self.heading = steer_heading(self.heading, wanted, SHOT_TURN_RATE);
        }
        self.pos += self.vel();
        Rect::playfield().contains_point_strict(self.pos)
    }
}

/// Rotate `current` toward `target` by at most `turn_rate` degrees, taking the shorter way.
/// Snaps onto the target when it is within reach.
pub fn steer_heading(current: f32, target: f32, turn_rate: f32) -> f32 {
    let delta = normalize_degrees(target - current);
    let next = if delta > turn_rate {
        current + turn_rate
    } else if delta < -turn_rate {
        current - turn_rate
    } else {
        target
    };
    normalize_degrees(next)
}

/// Advance all player shots, dropping those that leave the playfield
pub fn advance_shots(shots: &mut Vec<PlayerShot>, target: Option<Vec2>) {
    shots.retain_mut(|shot| shot.advance(target));
}

/// Advance all hazards, dropping spent ones. Returns how many were dodged off-screen.
pub fn advance_hazards(hazards: &mut Vec<Hazard>) -> u32 {
    let mut avoided = 0;
    hazards.retain_mut(|hazard| match hazard.advance() {
        HazardFate::Live => true,
        HazardFate::Avoided => {
            avoided += 1;
            false
        }
        HazardFate::Expired => false,
    });
    avoided
}
