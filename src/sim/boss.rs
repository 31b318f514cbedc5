//! Boss phase progression and movement
//!
//! The boss walks through an ordered phase-set. Each phase has its own HP pool
//! and pattern; when HP runs out the clear time is logged and the next phase
//! starts. Running past the last phase leaves the boss defeated and inert.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::Hazard;
use super::pattern::{EmitContext, PatternKind, run_pattern};
use super::rect::Rect;
use super::state::EntityIds;
use crate::consts::*;
use crate::tuning::PatternTables;

/// One HP-gated segment of the fight (a spell card)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossPhase {
    /// Display name
    pub name: String,
    pub max_hp: i32,
    pub pattern: PatternKind,
}

impl BossPhase {
    pub fn new(name: impl Into<String>, max_hp: i32, pattern: PatternKind) -> Self {
        Self {
            name: name.into(),
            max_hp,
            pattern,
        }
    }
}

/// Which phase-set the boss is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Normal,
    Extra,
}

/// Result of a phase ending
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCleared {
    /// Index of the phase that ended
    pub index: usize,
    /// Seconds the phase lasted
    pub seconds: f32,
    /// No phases left
    pub defeated: bool,
}

/// The boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub stage: Stage,
    pub phases: Vec<BossPhase>,
    /// Current phase; equals `phases.len()` once defeated
    pub phase_index: usize,
    /// Current phase HP. Only written by `hit` and phase starts.
    pub hp: i32,
    /// Ticks since the current phase started
    pub pattern_timer: u32,
    /// Clock tick the current phase started on
    pub phase_started_at: u64,
    /// Seconds taken by each cleared phase of this phase-set
    pub clear_times: Vec<f32>,
    /// Still on screen (a defeated normal-stage boss is removed)
    pub present: bool,
    pub move_timer: u32,
    pub move_target: Vec2,
}

impl Boss {
    /// Boss at its home point with phase 0 of `phases` running
    pub fn new(phases: Vec<BossPhase>, now: u64) -> Self {
        let home = Self::home();
        let mut boss = Self {
            pos: home,
            stage: Stage::Normal,
            phases,
            phase_index: 0,
            hp: 0,
            pattern_timer: 0,
            phase_started_at: now,
            clear_times: Vec::new(),
            present: true,
            move_timer: 0,
            move_target: home,
        };
        boss.start_phase(0, now);
        boss
    }

    pub fn home() -> Vec2 {
        Vec2::new(SCREEN_WIDTH / 2.0, BOSS_HOME_Y)
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, BOSS_SIZE)
    }

    /// A phase is running
    pub fn is_active(&self) -> bool {
        self.phase_index < self.phases.len()
    }

    pub fn is_defeated(&self) -> bool {
        !self.is_active()
    }

    pub fn current_phase(&self) -> Option<&BossPhase> {
        self.phases.get(self.phase_index)
    }

    pub fn phase_name(&self) -> &str {
        self.current_phase().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Max HP of the current phase, 1 when none is running
    pub fn max_hp(&self) -> i32 {
        self.current_phase().map(|p| p.max_hp).unwrap_or(1)
    }

    /// HP for display, never negative
    pub fn display_hp(&self) -> i32 {
        if self.is_active() { self.hp.max(0) } else { 0 }
    }

    pub fn hp_ratio(&self) -> f32 {
        (self.display_hp() as f32 / self.max_hp().max(1) as f32).clamp(0.0, 1.0)
    }

    /// Seconds since the current phase started, 0 when none is running
    pub fn elapsed_secs(&self, now: u64) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        now.saturating_sub(self.phase_started_at) as f32 / TICKS_PER_SECOND as f32
    }

    pub fn total_clear_secs(&self) -> f32 {
        self.clear_times.iter().sum()
    }

    fn start_phase(&mut self, index: usize, now: u64) {
        self.phase_index = index.min(self.phases.len());
        self.pattern_timer = 0;
        self.phase_started_at = now;
        match self.phases.get(self.phase_index) {
            Some(phase) => {
                self.hp = phase.max_hp;
                log::info!("Boss phase {} started: {}", self.phase_index + 1, phase.name);
            }
            None => self.hp = 0,
        }
    }

    /// Run one tick: random walk, then the current phase's pattern into `hazards`
    pub fn update<R: Rng>(
        &mut self,
        aim: Vec2,
        patterns: &PatternTables,
        rng: &mut R,
        ids: &mut EntityIds,
        hazards: &mut Vec<Hazard>,
    ) {
        let Some(pattern) = self.current_phase().map(|p| p.pattern) else {
            return;
        };
        self.pattern_timer += 1;
        self.roam(rng);

        let ctx = EmitContext {
            timer: self.pattern_timer,
            origin: self.pos,
            aim,
        };
        run_pattern(patterns.table(pattern), &ctx, rng, ids, hazards);
    }

    /// Random walk inside the upper band of the playfield
    fn roam<R: Rng>(&mut self, rng: &mut R) {
        self.move_timer += 1;
        if self.move_timer > BOSS_RETARGET_TICKS {
            self.move_timer = 0;
            let margin = BOSS_ROAM_MARGIN_X as i32;
            let x = rng.random_range(margin..=SCREEN_WIDTH as i32 - margin);
            let y = rng.random_range(BOSS_ROAM_MIN_Y as i32..=BOSS_ROAM_MAX_Y as i32);
            self.move_target = Vec2::new(x as f32, y as f32);
        }

        let to_target = self.move_target - self.pos;
        let dist = to_target.length();
        if dist > BOSS_MOVE_SPEED {
            self.pos += to_target / dist * BOSS_MOVE_SPEED;
        } else {
            self.pos = self.move_target;
        }
    }

    /// Apply shot damage. Ignored unless a phase is running.
    pub fn hit(&mut self, damage: u32) {
        if self.is_active() {
            self.hp = self.hp.saturating_sub(damage.min(i32::MAX as u32) as i32);
        }
    }

    /// Move to the next phase if the current one is out of HP
    pub fn check_transition(&mut self, now: u64) -> Option<PhaseCleared> {
        if !self.is_active() || self.hp > 0 {
            return None;
        }
        let index = self.phase_index;
        let seconds = self.elapsed_secs(now);
        self.clear_times.push(seconds);
        log::info!("Boss phase {} cleared in {:.2}s", index + 1, seconds);

        self.start_phase(index + 1, now);
        let defeated = self.is_defeated();
        if defeated {
            // The extra-stage boss stays on screen for the results
            self.present = self.stage == Stage::Extra;
            log::info!("Boss defeated ({:?} stage)", self.stage);
        }
        Some(PhaseCleared {
            index,
            seconds,
            defeated,
        })
    }

    /// Swap in the extra-stage phase-set and restart progression
    pub fn begin_extra_stage(&mut self, extra: BossPhase, now: u64) {
        self.stage = Stage::Extra;
        self.phases = vec![extra];
        self.clear_times.clear();
        self.present = true;
        self.pos = Self::home();
        self.move_target = self.pos;
        self.move_timer = 0;
        self.start_phase(0, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn three_phases() -> Vec<BossPhase> {
        vec![
            BossPhase::new("one", 100, PatternKind::CrimsonSeal),
            BossPhase::new("two", 150, PatternKind::AzureLaser),
            BossPhase::new("three", 200, PatternKind::GoldenNightmare),
        ]
    }

    #[test]
    fn test_new_boss_starts_first_phase() {
        let boss = Boss::new(three_phases(), 0);
        assert!(boss.is_active());
        assert_eq!(boss.phase_index, 0);
        assert_eq!(boss.hp, 100);
        assert_eq!(boss.phase_name(), "one");
        assert_eq!(boss.hp_ratio(), 1.0);
    }

    #[test]
    fn test_hundred_damage_moves_to_phase_two() {
        let mut boss = Boss::new(three_phases(), 0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ids = EntityIds::default();
        let mut hazards = Vec::new();
        let patterns = Tuning::default().normal.patterns;
        for _ in 0..37 {
            boss.update(Vec2::new(320.0, 670.0), &patterns, &mut rng, &mut ids, &mut hazards);
        }
        assert_eq!(boss.pattern_timer, 37);

        for damage in [40, 35, 25] {
            assert_eq!(boss.check_transition(120), None);
            boss.hit(damage);
        }
        assert_eq!(boss.hp, 0);
        let cleared = boss.check_transition(120).expect("phase should end");
        assert_eq!(cleared.index, 0);
        assert!(!cleared.defeated);
        assert!((cleared.seconds - 2.0).abs() < 1e-4);
        assert_eq!(boss.phase_index, 1);
        assert_eq!(boss.hp, 150);
        assert_eq!(boss.pattern_timer, 0);
        assert_eq!(boss.clear_times, vec![2.0]);
    }

    #[test]
    fn test_overkill_still_single_transition() {
        let mut boss = Boss::new(three_phases(), 0);
        boss.hit(500);
        assert!(boss.display_hp() == 0 && boss.hp_ratio() == 0.0);
        boss.check_transition(10);
        assert_eq!(boss.phase_index, 1);
        assert_eq!(boss.hp, 150);
    }

    #[test]
    fn test_phase_index_monotonic_and_bounded() {
        let mut boss = Boss::new(three_phases(), 0);
        let mut last = boss.phase_index;
        for now in 0..20 {
            boss.hit(1000);
            boss.check_transition(now);
            assert!(boss.phase_index >= last);
            assert!(boss.phase_index <= boss.phases.len());
            last = boss.phase_index;
        }
        assert!(boss.is_defeated());
        assert_eq!(boss.clear_times.len(), 3);
    }

    #[test]
    fn test_normal_defeat_removes_boss() {
        let mut boss = Boss::new(vec![BossPhase::new("only", 1, PatternKind::CrimsonSeal)], 0);
        boss.hit(1);
        let cleared = boss.check_transition(30).unwrap();
        assert!(cleared.defeated);
        assert!(!boss.present);
        // Inert afterwards
        boss.hit(5);
        assert_eq!(boss.check_transition(40), None);
        assert_eq!(boss.phase_name(), "");
        assert_eq!(boss.max_hp(), 1);
        assert_eq!(boss.elapsed_secs(40), 0.0);
    }

    #[test]
    fn test_defeated_boss_does_not_update() {
        let mut boss = Boss::new(vec![BossPhase::new("only", 1, PatternKind::CrimsonSeal)], 0);
        boss.hit(1);
        boss.check_transition(1);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ids = EntityIds::default();
        let mut hazards = Vec::new();
        let patterns = Tuning::default().normal.patterns;
        let pos = boss.pos;
        for _ in 0..200 {
            boss.update(Vec2::ZERO, &patterns, &mut rng, &mut ids, &mut hazards);
        }
        assert!(hazards.is_empty());
        assert_eq!(boss.pos, pos);
    }

    #[test]
    fn test_extra_stage_resets_log_and_hp() {
        let mut boss = Boss::new(three_phases(), 0);
        for now in 1..=3 {
            boss.hit(1000);
            boss.check_transition(now * 60);
        }
        assert!(!boss.present);
        assert_eq!(boss.clear_times.len(), 3);

        boss.begin_extra_stage(BossPhase::new("extra", 450, PatternKind::Extra), 500);
        assert_eq!(boss.stage, Stage::Extra);
        assert!(boss.present && boss.is_active());
        assert_eq!(boss.hp, 450);
        assert_eq!(boss.phase_index, 0);
        assert!(boss.clear_times.is_empty());

        boss.hit(450);
        let cleared = boss.check_transition(560).unwrap();
        assert!(cleared.defeated);
        // Extra boss stays for the ceremony
        assert!(boss.present);
    }

    #[test]
    fn test_roam_stays_in_band_and_never_overshoots() {
        let mut boss = Boss::new(three_phases(), 0);
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..2000 {
            let before = boss.pos;
            boss.roam(&mut rng);
            assert!((boss.pos - before).length() <= BOSS_MOVE_SPEED + 1e-3);
            assert!(boss.move_target.x >= BOSS_ROAM_MARGIN_X);
            assert!(boss.move_target.x <= SCREEN_WIDTH - BOSS_ROAM_MARGIN_X);
            assert!(boss.move_target.y >= BOSS_ROAM_MIN_Y && boss.move_target.y <= BOSS_ROAM_MAX_Y);
        }
    }
}
