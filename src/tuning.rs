//! Data-driven difficulty balance
//!
//! Every difficulty carries a complete table: lives, bombs, the normal
//! phase-set, the extra-stage phase and the emitter tables for every pattern.
//! Nothing falls back to another difficulty at runtime, so a JSON file must
//! spell out all three.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::boss::BossPhase;
use crate::sim::motion::BulletSize;
use crate::sim::pattern::{Emitter, EmitterSpec, PatternKind};

/// Selectable difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Selector order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Next entry down the selector, wrapping
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous entry up the selector, wrapping
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitter tables for each pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternTables {
    pub crimson_seal: Vec<EmitterSpec>,
    pub azure_laser: Vec<EmitterSpec>,
    pub golden_nightmare: Vec<EmitterSpec>,
    pub extra: Vec<EmitterSpec>,
}

impl PatternTables {
    pub fn table(&self, kind: PatternKind) -> &[EmitterSpec] {
        match kind {
            PatternKind::CrimsonSeal => &self.crimson_seal,
            PatternKind::AzureLaser => &self.azure_laser,
            PatternKind::GoldenNightmare => &self.golden_nightmare,
            PatternKind::Extra => &self.extra,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (PatternKind, &[EmitterSpec])> {
        [
            PatternKind::CrimsonSeal,
            PatternKind::AzureLaser,
            PatternKind::GoldenNightmare,
            PatternKind::Extra,
        ]
        .into_iter()
        .map(move |kind| (kind, self.table(kind)))
    }
}

/// Everything a session needs for one difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    pub player_lives: u32,
    pub bombs: u32,
    /// Normal phase-set, in order
    pub phases: Vec<BossPhase>,
    /// Sole phase of the extra stage. Its HP is tuned directly rather than
    /// derived from `phases`.
    pub extra_phase: BossPhase,
    pub patterns: PatternTables,
}

impl DifficultyTuning {
    pub fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        if self.player_lives == 0 {
            return Err(ConfigError::NoLives { difficulty });
        }
        if self.phases.is_empty() {
            return Err(ConfigError::EmptyPhaseSet { difficulty });
        }
        for phase in self.phases.iter().chain(std::iter::once(&self.extra_phase)) {
            if phase.max_hp <= 0 {
                return Err(ConfigError::NonPositiveHp {
                    difficulty,
                    phase: phase.name.clone(),
                    hp: phase.max_hp,
                });
            }
        }
        for (pattern, table) in self.patterns.iter() {
            for (index, spec) in table.iter().enumerate() {
                if spec.period == 0 {
                    return Err(ConfigError::ZeroPeriod {
                        difficulty,
                        pattern,
                        index,
                    });
                }
                if let Some(reason) = spec.emitter.problem() {
                    return Err(ConfigError::InvalidEmitter {
                        difficulty,
                        pattern,
                        index,
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    /// Sum of the normal phase-set HP
    pub fn normal_total_hp(&self) -> i32 {
        self.phases.iter().map(|p| p.max_hp).sum()
    }
}

/// The full configuration surface: one complete table per difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub easy: DifficultyTuning,
    pub normal: DifficultyTuning,
    pub hard: DifficultyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: DifficultyScale::EASY.build(),
            normal: DifficultyScale::NORMAL.build(),
            hard: DifficultyScale::HARD.build(),
        }
    }
}

impl Tuning {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> &DifficultyTuning {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            self.for_difficulty(difficulty).validate(difficulty)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Multipliers applied to the Normal tables to derive the other presets
struct DifficultyScale {
    lives: u32,
    bombs: u32,
    hp: f32,
    period: f32,
    density: i32,
    speed: f32,
    warning: f32,
}

impl DifficultyScale {
    const EASY: Self = Self {
        lives: 12,
        bombs: 4,
        hp: 0.8,
        period: 1.25,
        density: -2,
        speed: 0.85,
        warning: 1.2,
    };
    const NORMAL: Self = Self {
        lives: 10,
        bombs: 3,
        hp: 1.0,
        period: 1.0,
        density: 0,
        speed: 1.0,
        warning: 1.0,
    };
    const HARD: Self = Self {
        lives: 5,
        bombs: 2,
        hp: 1.25,
        period: 0.75,
        density: 3,
        speed: 1.2,
        warning: 0.8,
    };

    fn hp(&self, base: i32) -> i32 {
        ((base as f32 * self.hp).round() as i32).max(1)
    }

    fn period(&self, base: u32) -> u32 {
        ((base as f32 * self.period).round() as u32).max(1)
    }

    fn density(&self, base: u32) -> u32 {
        (base as i32 + self.density).max(1) as u32
    }

    fn speed(&self, base: f32) -> f32 {
        base * self.speed
    }

    fn warning(&self, base: u32) -> u32 {
        (base as f32 * self.warning).round() as u32
    }

    fn radial(
        &self,
        period: u32,
        bullet: BulletSize,
        density: u32,
        speed: f32,
        spin: f32,
        jitter: f32,
    ) -> EmitterSpec {
        EmitterSpec::new(
            self.period(period),
            Emitter::Radial {
                bullet,
                density: self.density(density),
                speed: self.speed(speed),
                spin,
                jitter,
            },
        )
    }

    fn aimed(
        &self,
        period: u32,
        bullet: BulletSize,
        count: u32,
        spread: f32,
        speed: f32,
        jitter: f32,
    ) -> EmitterSpec {
        EmitterSpec::new(
            self.period(period),
            Emitter::Aimed {
                bullet,
                count,
                spread,
                speed: self.speed(speed),
                jitter,
            },
        )
    }

    fn charge(&self, period: u32, count: u32, delay: u32, duration: u32) -> EmitterSpec {
        EmitterSpec::new(
            self.period(period),
            Emitter::ChargeLaser {
                count,
                delay: self.warning(delay),
                duration,
            },
        )
    }

    fn thin(&self, period: u32, speed: f32, jitter: f32) -> EmitterSpec {
        EmitterSpec::new(
            self.period(period),
            Emitter::ThinLaser {
                speed: self.speed(speed),
                jitter,
            },
        )
    }

    fn build(&self) -> DifficultyTuning {
        use BulletSize::*;

        let phases = vec![
            BossPhase::new("Spell Card 1 \"Crimson Seal\"", self.hp(100), PatternKind::CrimsonSeal),
            BossPhase::new("Spell Card 2 \"Azure Laser\"", self.hp(150), PatternKind::AzureLaser),
            BossPhase::new(
                "Spell Card 3 \"Golden Nightmare\"",
                self.hp(200),
                PatternKind::GoldenNightmare,
            ),
        ];
        let extra_hp = phases.iter().map(|p| p.max_hp).sum();

        let patterns = PatternTables {
            crimson_seal: vec![
                self.radial(60, Large, 8, 2.0, 0.1, 10.0),
                self.aimed(12, Small, 3, 10.0, 4.0, 5.0),
            ],
            azure_laser: vec![self.charge(90, 2, 30, 60), self.thin(18, 8.0, 15.0)],
            golden_nightmare: vec![
                self.radial(70, Large, 6, 2.0, -0.05, 5.0),
                self.aimed(25, Small, 1, 0.0, 4.0, 10.0),
                self.charge(50, 1, 30, 30),
            ],
            extra: vec![
                self.radial(40, Large, 10, 2.5, 0.15, 8.0),
                self.aimed(10, Small, 5, 8.0, 4.5, 4.0),
                self.charge(60, 3, 24, 40),
                self.thin(14, 9.0, 12.0),
                self.radial(120, Huge, 8, 1.2, -0.08, 0.0),
                self.aimed(150, Huge, 1, 0.0, 1.5, 3.0),
            ],
        };

        DifficultyTuning {
            player_lives: self.lives,
            bombs: self.bombs,
            phases,
            extra_phase: BossPhase::new(
                "Extra Spell \"Eternal Prism\"",
                extra_hp,
                PatternKind::Extra,
            ),
            patterns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        Tuning::default().validate().expect("defaults must validate");
    }

    #[test]
    fn test_normal_matches_reference_values() {
        let t = Tuning::default();
        let hp: Vec<i32> = t.normal.phases.iter().map(|p| p.max_hp).collect();
        assert_eq!(hp, vec![100, 150, 200]);
        assert_eq!(t.normal.player_lives, 10);
        assert_eq!(t.normal.extra_phase.max_hp, 450);
        assert_eq!(t.normal.patterns.crimson_seal[0].period, 60);
        match t.normal.patterns.azure_laser[0].emitter {
            Emitter::ChargeLaser { delay, duration, .. } => {
                assert_eq!((delay, duration), (30, 60));
            }
            ref other => panic!("unexpected emitter {other:?}"),
        }
    }

    #[test]
    fn test_harder_difficulties_are_denser_and_faster() {
        let t = Tuning::default();
        let period = |d: &DifficultyTuning| d.patterns.crimson_seal[1].period;
        assert!(period(&t.easy) > period(&t.normal));
        assert!(period(&t.normal) > period(&t.hard));
        assert!(t.hard.extra_phase.max_hp > t.normal.extra_phase.max_hp);
        assert!(t.easy.player_lives > t.hard.player_lives);
    }

    #[test]
    fn test_extra_hp_defaults_to_phase_sum() {
        let t = Tuning::default();
        for d in Difficulty::ALL {
            let tuning = t.for_difficulty(d);
            assert_eq!(tuning.extra_phase.max_hp, tuning.normal_total_hp());
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut t = Tuning::default();
        t.hard.patterns.azure_laser[1].period = 0;
        match t.validate() {
            Err(ConfigError::ZeroPeriod {
                difficulty,
                pattern,
                index,
            }) => {
                assert_eq!(difficulty, Difficulty::Hard);
                assert_eq!(pattern, PatternKind::AzureLaser);
                assert_eq!(index, 1);
            }
            other => panic!("expected ZeroPeriod, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_hp_rejected() {
        let mut t = Tuning::default();
        t.easy.extra_phase.max_hp = -5;
        assert!(matches!(
            t.validate(),
            Err(ConfigError::NonPositiveHp { hp: -5, .. })
        ));
    }

    #[test]
    fn test_zero_lives_and_empty_phases_rejected() {
        let mut t = Tuning::default();
        t.normal.player_lives = 0;
        assert!(matches!(t.validate(), Err(ConfigError::NoLives { .. })));

        let mut t = Tuning::default();
        t.normal.phases.clear();
        assert!(matches!(t.validate(), Err(ConfigError::EmptyPhaseSet { .. })));
    }

    #[test]
    fn test_json_round_trip_and_partial_rejected() {
        let t = Tuning::default();
        let json = t.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);

        // A document missing a difficulty is refused outright
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("hard");
        let err = Tuning::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_difficulty_selector_wraps() {
        assert_eq!(Difficulty::Easy.prev(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.next(), Difficulty::Normal);
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("lunatic"), None);
    }
}
