//! Demo-mode player input
//!
//! Dodges hazards that come close, otherwise drifts back under the boss.

use glam::Vec2;

use super::motion::{ChargeState, Hazard, HazardKind};
use super::player::{Movement, Player};
use super::state::Session;
use crate::consts::*;

/// Hazards closer than this (edge to player center) are dodged
const AVOID_RADIUS: f32 = 72.0;

/// Distance from a point to the nearest edge of a hazard's box (0 inside)
fn gap_to(hazard: &Hazard, point: Vec2) -> (Vec2, f32) {
    let rect = hazard.rect();
    let closest = point.clamp(rect.min(), rect.max());
    let away = point - closest;
    (away, away.length())
}

fn threatens(hazard: &Hazard) -> bool {
    !matches!(&hazard.kind, HazardKind::Charge(c) if c.state == ChargeState::Finished)
}

fn axis(value: f32, dead_zone: f32) -> i8 {
    if value > dead_zone {
        1
    } else if value < -dead_zone {
        -1
    } else {
        0
    }
}

/// Pick this tick's movement for the player
pub fn steer(session: &Session) -> Movement {
    let pos = session.player.pos;

    // Sum a repulsion from every hazard inside the avoid radius
    let mut push = Vec2::ZERO;
    for hazard in session.hazards.iter().filter(|h| threatens(h)) {
        let (away, dist) = gap_to(hazard, pos);
        if dist >= AVOID_RADIUS {
            continue;
        }
        let dir = if dist > 0.0 {
            away / dist
        } else {
            // Already inside: leave through the nearer side
            (pos - hazard.pos).try_normalize().unwrap_or(Vec2::X)
        };
        push += dir * (AVOID_RADIUS - dist) / AVOID_RADIUS;
    }

    if push.length_squared() > 1e-4 {
        return Movement {
            dx: axis(push.x, 0.05),
            dy: axis(push.y, 0.05),
            focus: false,
        };
    }

    // Nothing close: line up under the boss near the bottom
    let target_x = if session.boss.present {
        session.boss.pos.x
    } else {
        SCREEN_WIDTH / 2.0
    };
    let target = Vec2::new(target_x, Player::home().y);
    let to_target = target - pos;
    Movement {
        dx: axis(to_target.x, PLAYER_FOCUS_SPEED),
        dy: axis(to_target.y, PLAYER_FOCUS_SPEED),
        focus: to_target.length() < PLAYER_SPEED * 4.0,
    }
}
