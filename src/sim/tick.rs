//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one 60 Hz step. Inside a fight the
//! order is: spawn, motion, collisions, transitions.

use super::autopilot;
use super::collision;
use super::motion::{PlayerShot, advance_hazards, advance_shots};
use super::player::Movement;
use super::state::{GameEvent, GameState, MatchPhase, Session};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Slow movement
    pub focus: bool,
    /// Leave invincibility early
    pub respawn: bool,
    /// Clear the hazard field
    pub bomb: bool,
    /// Menu cursor
    pub nav_up: bool,
    pub nav_down: bool,
    pub confirm: bool,
    /// Results screen: continue into the extra stage
    pub extra_stage: bool,
    /// Pause toggle
    pub pause: bool,
    pub return_to_select: bool,
    pub quit: bool,
    /// Demo mode - the autopilot flies the player
    pub autopilot: bool,
}

impl TickInput {
    /// Directional keys as a movement intent
    pub fn movement(&self) -> Movement {
        Movement {
            dx: self.right as i8 - self.left as i8,
            dy: self.down as i8 - self.up as i8,
            focus: self.focus,
        }
    }
}

/// How a fight tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    Continue,
    PlayerDefeated,
    BossDefeated,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == MatchPhase::Exited {
        return;
    }
    if input.quit {
        state.exit();
        return;
    }
    if input.return_to_select && state.session.is_some() {
        state.return_to_select();
        return;
    }

    match state.phase {
        MatchPhase::DifficultySelect { cursor } => {
            let mut cursor = cursor;
            if input.nav_up {
                cursor = cursor.prev();
            }
            if input.nav_down {
                cursor = cursor.next();
            }
            if input.confirm {
                state.start_session(cursor);
            } else {
                state.phase = MatchPhase::DifficultySelect { cursor };
            }
        }
        MatchPhase::Fight | MatchPhase::ExtraFight => {
            let extra = state.phase == MatchPhase::ExtraFight;
            if input.pause {
                state.phase = MatchPhase::Paused { extra };
                log::info!("Paused");
                return;
            }
            let Some(session) = state.session.as_mut() else {
                return;
            };
            match step_session(session, input, &mut state.events) {
                FightOutcome::Continue => {}
                FightOutcome::PlayerDefeated => {
                    state.phase = MatchPhase::GameOver;
                    state.events.push(GameEvent::GameOver);
                    log::info!("Game over (score {})", session.score);
                }
                FightOutcome::BossDefeated => {
                    state.phase = if extra {
                        MatchPhase::ExtraResults {
                            hold_ticks: EXTRA_RESULTS_HOLD_TICKS,
                        }
                    } else {
                        MatchPhase::Results
                    };
                    log::info!(
                        "Boss down in {:.2}s (score {})",
                        session.boss.total_clear_secs(),
                        session.score
                    );
                }
            }
        }
        MatchPhase::Paused { extra } => {
            if input.pause {
                state.phase = if extra {
                    MatchPhase::ExtraFight
                } else {
                    MatchPhase::Fight
                };
                log::info!("Resumed");
            }
        }
        MatchPhase::Results => {
            if input.extra_stage {
                if let Some(session) = state.session.as_mut() {
                    session.begin_extra_stage();
                    state.events.push(GameEvent::ExtraStageRequested);
                    state.phase = MatchPhase::ExtraTransition {
                        ticks_left: EXTRA_TRANSITION_TICKS,
                    };
                }
            } else if input.confirm {
                state.exit();
            }
        }
        MatchPhase::ExtraTransition { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                state.phase = MatchPhase::ExtraFight;
                state.events.push(GameEvent::ExtraStageStarted);
                log::info!("Extra stage started");
            } else {
                state.phase = MatchPhase::ExtraTransition { ticks_left };
            }
        }
        MatchPhase::ExtraResults { hold_ticks } => {
            if hold_ticks > 0 {
                state.phase = MatchPhase::ExtraResults {
                    hold_ticks: hold_ticks - 1,
                };
            } else if input.confirm {
                state.exit();
            }
        }
        MatchPhase::GameOver => {
            if input.confirm {
                state.exit();
            }
        }
        MatchPhase::Exited => {}
    }
}

/// Run one fight tick on the session
pub fn step_session(
    session: &mut Session,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> FightOutcome {
    let now = session.clock.advance();

    if input.respawn && session.player.is_invincible() {
        session.player.respawn();
        log::debug!("Respawned early");
    }
    if input.bomb && session.player.use_bomb() {
        session.hazards.clear();
        events.push(GameEvent::BombUsed);
        log::debug!("Bomb used, {} left", session.player.bombs);
    }

    // Spawn
    let movement = if input.autopilot {
        autopilot::steer(session)
    } else {
        input.movement()
    };
    if session.player.update(movement, now) {
        let id = session.ids.next_id();
        session.shots.push(PlayerShot::new(id, session.player.pos));
    }
    session.boss.update(
        session.player.pos,
        &session.tuning.patterns,
        &mut session.rng,
        &mut session.ids,
        &mut session.hazards,
    );

    // Motion
    let target = session.boss.is_active().then_some(session.boss.pos);
    advance_shots(&mut session.shots, target);
    let avoided = advance_hazards(&mut session.hazards);
    session.score += avoided as u64 * AVOID_SCORE;

    // Collisions
    let report = collision::resolve(
        &session.player,
        &mut session.hazards,
        &mut session.shots,
        &session.boss,
    );
    session.score += report.grazes as u64 * GRAZE_SCORE + report.boss_damage as u64 * DAMAGE_SCORE;
    if report.grazes > 0 {
        events.push(GameEvent::Graze {
            count: report.grazes,
        });
    }
    session.boss.hit(report.boss_damage);

    // Transitions
    if report.player_hit && session.player.hit() {
        let lives_left = session.player.lives;
        events.push(GameEvent::PlayerHit { lives_left });
        log::debug!("Player hit, {} lives left", lives_left);
        if session.player.is_defeated() {
            return FightOutcome::PlayerDefeated;
        }
    }

    if let Some(cleared) = session.boss.check_transition(now) {
        session.hazards.clear();
        events.push(GameEvent::PhaseCleared {
            index: cleared.index,
            seconds: cleared.seconds,
        });
        if cleared.defeated {
            events.push(GameEvent::BossDefeated {
                stage: session.boss.stage,
            });
            return FightOutcome::BossDefeated;
        }
    }

    FightOutcome::Continue
}
