//! Error types surfaced by the simulation driver.
use thiserror::Error;

use defense_core::{ErrorSeverity, GameError, UnitId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("unit {id} is not on the roster")]
    UnitNotFound { id: UnitId },

    #[error("invalid config value for `{field}`: {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound { .. } => ErrorSeverity::Validation,
            Self::InvalidConfig { .. } => ErrorSeverity::Fatal,
        }
    }

    fn unit(&self) -> Option<UnitId> {
        match self {
            Self::UnitNotFound { id } => Some(*id),
            Self::InvalidConfig { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound { .. } => "RUNTIME_UNIT_NOT_FOUND",
            Self::InvalidConfig { .. } => "RUNTIME_INVALID_CONFIG",
        }
    }
}
