//! Hit and graze resolution for one tick
//!
//! The resolver only flips graze flags and removes consumed entities. Score,
//! lives and boss HP are left to the caller, which applies the returned report.

use super::boss::Boss;
use super::motion::{Hazard, PlayerShot};
use super::player::Player;

/// Outcome of collision checks for a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Hazards that grazed the player for the first time
    pub grazes: u32,
    /// At least one hazard touched the hitbox (counts once per tick)
    pub player_hit: bool,
    /// Shots absorbed by the boss, one damage each
    pub boss_damage: u32,
}

/// Resolve all collisions for the tick
pub fn resolve(
    player: &Player,
    hazards: &mut Vec<Hazard>,
    shots: &mut Vec<PlayerShot>,
    boss: &Boss,
) -> CollisionReport {
    let boss_damage = shots_vs_boss(shots, boss);
    let (grazes, player_hit) = hazards_vs_player(player, hazards);
    CollisionReport {
        grazes,
        player_hit,
        boss_damage,
    }
}

/// Remove every shot touching the boss; returns how many were consumed
pub fn shots_vs_boss(shots: &mut Vec<PlayerShot>, boss: &Boss) -> u32 {
    if !boss.is_active() {
        return 0;
    }
    let boss_rect = boss.rect();
    let before = shots.len();
    shots.retain(|shot| !shot.rect().overlaps(&boss_rect));
    (before - shots.len()) as u32
}

/// Graze and hit checks against the player. A hit clears the whole hazard field.
///
/// Returns `(new grazes, hit)`. Hazards that are not collidable (charge lasers
/// outside their active window) are skipped, as is everything while the player
/// is invincible.
pub fn hazards_vs_player(player: &Player, hazards: &mut Vec<Hazard>) -> (u32, bool) {
    if player.is_invincible() {
        return (0, false);
    }
    let hitbox = player.hitbox();
    let grazebox = player.grazebox();

    let mut grazes = 0;
    let mut hit = false;
    for hazard in hazards.iter_mut().filter(|h| h.is_collidable()) {
        let rect = hazard.rect();
        if rect.overlaps(&hitbox) {
            hit = true;
        } else if !hazard.grazed && rect.overlaps(&grazebox) {
            hazard.grazed = true;
            grazes += 1;
        }
    }

    if hit {
        log::debug!("Player hit, clearing {} hazards", hazards.len());
        hazards.clear();
    }
    (grazes, hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::BossPhase;
    use crate::sim::motion::{BulletSize, ChargeState, HazardKind};
    use crate::sim::pattern::PatternKind;
    use glam::Vec2;

    fn player() -> Player {
        Player::new(3, 3)
    }

    fn bullet_at(id: u32, pos: Vec2) -> Hazard {
        Hazard::bullet(id, BulletSize::Small, pos, 0.0, 0.0)
    }

    fn boss() -> Boss {
        Boss::new(vec![BossPhase::new("p", 100, PatternKind::CrimsonSeal)], 0)
    }

    #[test]
    fn test_center_hit_is_not_a_graze() {
        let p = player();
        let mut hazards = vec![bullet_at(1, p.pos)];
        let (grazes, hit) = hazards_vs_player(&p, &mut hazards);
        assert!(hit);
        assert_eq!(grazes, 0);
        assert!(hazards.is_empty());
    }

    #[test]
    fn test_graze_only_once_per_hazard() {
        let p = player();
        // Inside the 40x40 grazebox, clear of the 8x8 hitbox
        let mut hazards = vec![bullet_at(1, p.pos + Vec2::new(14.0, 0.0))];
        assert_eq!(hazards_vs_player(&p, &mut hazards), (1, false));
        assert!(hazards[0].grazed);
        for _ in 0..10 {
            assert_eq!(hazards_vs_player(&p, &mut hazards), (0, false));
        }
        assert!(hazards[0].grazed);
    }

    #[test]
    fn test_far_hazard_ignored() {
        let p = player();
        let mut hazards = vec![bullet_at(1, p.pos + Vec2::new(100.0, 0.0))];
        assert_eq!(hazards_vs_player(&p, &mut hazards), (0, false));
        assert!(!hazards[0].grazed);
    }

    #[test]
    fn test_multiple_hits_count_once_and_clear_everything() {
        let p = player();
        let mut hazards = vec![
            bullet_at(1, p.pos),
            bullet_at(2, p.pos + Vec2::new(1.0, 1.0)),
            bullet_at(3, Vec2::new(50.0, 50.0)),
        ];
        let (_, hit) = hazards_vs_player(&p, &mut hazards);
        assert!(hit);
        assert!(hazards.is_empty());
    }

    #[test]
    fn test_graze_and_hit_in_same_tick() {
        let p = player();
        let mut hazards = vec![
            bullet_at(1, p.pos + Vec2::new(0.0, 15.0)),
            bullet_at(2, p.pos),
        ];
        let (grazes, hit) = hazards_vs_player(&p, &mut hazards);
        assert_eq!(grazes, 1);
        assert!(hit);
    }

    #[test]
    fn test_charge_laser_gated_by_state() {
        let p = player();
        let mut hazards = vec![Hazard::charge_laser(1, p.pos, 2, 2)];
        // Warning: transparent
        assert_eq!(hazards_vs_player(&p, &mut hazards), (0, false));
        hazards[0].advance();
        hazards[0].advance();
        assert_eq!(hazards_vs_player(&p, &mut hazards), (0, false));
        hazards[0].advance();
        assert!(matches!(
            &hazards[0].kind,
            HazardKind::Charge(c) if c.state == ChargeState::Active
        ));
        assert_eq!(hazards_vs_player(&p, &mut hazards), (0, true));
    }

    #[test]
    fn test_finished_charge_laser_is_transparent() {
        let p = player();
        let mut laser = Hazard::charge_laser(1, p.pos, 1, 1);
        for _ in 0..3 {
            laser.advance();
        }
        let mut hazards = vec![laser];
        assert_eq!(hazards_vs_player(&p, &mut hazards), (0, false));
    }

    #[test]
    fn test_invincible_player_untouchable() {
        let mut p = player();
        p.hit();
        let mut hazards = vec![bullet_at(1, p.pos), bullet_at(2, p.pos + Vec2::new(14.0, 0.0))];
        assert_eq!(hazards_vs_player(&p, &mut hazards), (0, false));
        assert_eq!(hazards.len(), 2);
        assert!(!hazards[1].grazed);
    }

    #[test]
    fn test_shots_consumed_by_boss() {
        let b = boss();
        let mut shots = vec![
            PlayerShot::new(1, b.pos),
            PlayerShot::new(2, b.pos + Vec2::new(30.0, 30.0)),
            PlayerShot::new(3, Vec2::new(320.0, 600.0)),
        ];
        assert_eq!(shots_vs_boss(&mut shots, &b), 2);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].id, 3);
    }

    #[test]
    fn test_defeated_boss_absorbs_nothing() {
        let mut b = boss();
        b.hit(100);
        b.check_transition(1);
        let mut shots = vec![PlayerShot::new(1, b.pos)];
        assert_eq!(shots_vs_boss(&mut shots, &b), 0);
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn test_resolve_combines_reports() {
        let p = player();
        let b = boss();
        let mut hazards = vec![bullet_at(1, p.pos + Vec2::new(-14.0, 0.0))];
        let mut shots = vec![PlayerShot::new(1, b.pos)];
        let report = resolve(&p, &mut hazards, &mut shots, &b);
        assert_eq!(
            report,
            CollisionReport {
                grazes: 1,
                player_hit: false,
                boss_damage: 1
            }
        );
    }
}
