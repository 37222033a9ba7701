use thiserror::Error;

/// Lookup and input failures. Gameplay outcomes are never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("unknown move: {0}")]
    UnknownMove(String),

    #[error("unknown stage: {0}")]
    UnknownStage(String),

    #[error("invalid frame time: {0}")]
    InvalidFrameTime(f64),
}

pub type CoreResult<T> = Result<T, CoreError>;
