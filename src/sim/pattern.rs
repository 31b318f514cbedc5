//! Boss bullet patterns
//!
//! A pattern is a table of `(period, emitter)` pairs. Each tick the boss
//! bumps its pattern timer and every emitter whose period divides the timer
//! fires once. Tables live in the difficulty tuning; `PatternKind` picks one.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::{BulletSize, Hazard};
use super::state::EntityIds;
use crate::consts::*;
use crate::heading_between;

/// The fixed set of boss patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Rotating large-bullet rings plus aimed small-bullet fans
    CrimsonSeal,
    /// Charge lasers plus rapid thin lasers
    AzureLaser,
    /// Everything from the first two, thinner
    GoldenNightmare,
    /// Extra stage: every emitter shape, compressed, plus huge bullets
    Extra,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::CrimsonSeal => "crimson_seal",
            PatternKind::AzureLaser => "azure_laser",
            PatternKind::GoldenNightmare => "golden_nightmare",
            PatternKind::Extra => "extra",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitter shape and its parameters. Angles are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Emitter {
    /// `density` bullets evenly around the boss, rotated by `timer * spin`
    Radial {
        bullet: BulletSize,
        density: u32,
        speed: f32,
        spin: f32,
        jitter: f32,
    },
    /// A fan of `count` bullets centered on the player, `spread` apart
    Aimed {
        bullet: BulletSize,
        count: u32,
        spread: f32,
        speed: f32,
        jitter: f32,
    },
    /// `count` stationary lasers at random points in the lower field
    ChargeLaser {
        count: u32,
        delay: u32,
        duration: u32,
    },
    /// One thin laser toward the player
    ThinLaser { speed: f32, jitter: f32 },
}

impl Emitter {
    /// Reason the parameters can never produce a sane hazard
    pub fn problem(&self) -> Option<&'static str> {
        let bad_speed = |s: f32| !s.is_finite() || s <= 0.0;
        match *self {
            Emitter::Radial {
                density,
                speed,
                spin,
                jitter,
                ..
            } => {
                if density == 0 {
                    Some("radial density must be at least 1")
                } else if bad_speed(speed) {
                    Some("speed must be positive")
                } else if !spin.is_finite() || !jitter.is_finite() || jitter < 0.0 {
                    Some("spin and jitter must be finite, jitter non-negative")
                } else {
                    None
                }
            }
            Emitter::Aimed {
                count,
                spread,
                speed,
                jitter,
                ..
            } => {
                if count == 0 {
                    Some("aimed count must be at least 1")
                } else if bad_speed(speed) {
                    Some("speed must be positive")
                } else if !spread.is_finite() || !jitter.is_finite() || jitter < 0.0 {
                    Some("spread and jitter must be finite, jitter non-negative")
                } else {
                    None
                }
            }
            Emitter::ChargeLaser {
                count, duration, ..
            } => {
                if count == 0 {
                    Some("charge laser count must be at least 1")
                } else if duration == 0 {
                    Some("charge laser duration must be at least 1")
                } else {
                    None
                }
            }
            Emitter::ThinLaser { speed, jitter } => {
                if bad_speed(speed) {
                    Some("speed must be positive")
                } else if !jitter.is_finite() || jitter < 0.0 {
                    Some("jitter must be finite and non-negative")
                } else {
                    None
                }
            }
        }
    }

    fn fire<R: Rng>(
        &self,
        ctx: &EmitContext,
        rng: &mut R,
        ids: &mut EntityIds,
        out: &mut Vec<Hazard>,
    ) {
        match *self {
            Emitter::Radial {
                bullet,
                density,
                speed,
                spin,
                jitter,
            } => {
                let step = 360.0 / density as f32;
                let offset = ctx.timer as f32 * spin;
                for i in 0..density {
                    let angle = step * i as f32 + offset + jitter_deg(rng, jitter);
                    out.push(Hazard::bullet(ids.next_id(), bullet, ctx.origin, angle, speed));
                }
            }
            Emitter::Aimed {
                bullet,
                count,
                spread,
                speed,
                jitter,
            } => {
                let center = heading_between(ctx.origin, ctx.aim);
                let mid = count.saturating_sub(1) as f32 / 2.0;
                for i in 0..count {
                    let angle = center + (i as f32 - mid) * spread + jitter_deg(rng, jitter);
                    out.push(Hazard::bullet(ids.next_id(), bullet, ctx.origin, angle, speed));
                }
            }
            Emitter::ChargeLaser {
                count,
                delay,
                duration,
            } => {
                for _ in 0..count {
                    let pos = charge_laser_point(rng);
                    out.push(Hazard::charge_laser(ids.next_id(), pos, delay, duration));
                }
            }
            Emitter::ThinLaser { speed, jitter } => {
                let angle = heading_between(ctx.origin, ctx.aim) + jitter_deg(rng, jitter);
                out.push(Hazard::laser(ids.next_id(), ctx.origin, angle, speed));
            }
        }
    }
}

/// An emitter and how often it fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterSpec {
    /// Fires when `timer % period == 0`; must be at least 1
    pub period: u32,
    pub emitter: Emitter,
}

impl EmitterSpec {
    pub fn new(period: u32, emitter: Emitter) -> Self {
        Self { period, emitter }
    }
}

/// Per-tick inputs an emitter may read
#[derive(Debug, Clone, Copy)]
pub struct EmitContext {
    /// Pattern timer (ticks since phase start, already incremented this tick)
    pub timer: u32,
    /// Where bullets spawn (boss center)
    pub origin: Vec2,
    /// Current player position
    pub aim: Vec2,
}

/// Fire every due emitter of `table` into `out`. Returns the number of hazards spawned.
pub fn run_pattern<R: Rng>(
    table: &[EmitterSpec],
    ctx: &EmitContext,
    rng: &mut R,
    ids: &mut EntityIds,
    out: &mut Vec<Hazard>,
) -> usize {
    let before = out.len();
    for spec in table {
        // checked_rem keeps a zero period inert instead of panicking
        if ctx.timer.checked_rem(spec.period) == Some(0) {
            spec.emitter.fire(ctx, rng, ids, out);
        }
    }
    out.len() - before
}

fn jitter_deg<R: Rng>(rng: &mut R, jitter: f32) -> f32 {
    if jitter > 0.0 {
        rng.random_range(-jitter..=jitter)
    } else {
        0.0
    }
}

fn charge_laser_point<R: Rng>(rng: &mut R) -> Vec2 {
    let margin = CHARGE_LASER_MARGIN as i32;
    let x = rng.random_range(margin..=SCREEN_WIDTH as i32 - margin);
    let y = rng.random_range(SCREEN_HEIGHT as i32 / 2..=SCREEN_HEIGHT as i32 - margin);
    Vec2::new(x as f32, y as f32)
}
