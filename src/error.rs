use thiserror::Error;

use crate::sim::PatternKind;
use crate::tuning::Difficulty;

/// Rejected difficulty tuning. Raised before any session is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{difficulty}: player must start with at least one life")]
    NoLives { difficulty: Difficulty },

    #[error("{difficulty}: phase set is empty")]
    EmptyPhaseSet { difficulty: Difficulty },

    #[error("{difficulty}: phase \"{phase}\" has non-positive hp {hp}")]
    NonPositiveHp {
        difficulty: Difficulty,
        phase: String,
        hp: i32,
    },

    #[error("{difficulty}: emitter {index} of {pattern} has period 0")]
    ZeroPeriod {
        difficulty: Difficulty,
        pattern: PatternKind,
        index: usize,
    },

    #[error("{difficulty}: emitter {index} of {pattern} is invalid: {reason}")]
    InvalidEmitter {
        difficulty: Difficulty,
        pattern: PatternKind,
        index: usize,
        reason: &'static str,
    },
}

impl ConfigError {
    /// Errors caused by the tuning content rather than by reading it
    pub fn is_validation(&self) -> bool {
        !matches!(self, ConfigError::Io(_) | ConfigError::Json(_))
    }
}
