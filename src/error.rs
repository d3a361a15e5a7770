use thiserror::Error;
use uuid::Uuid;

use crate::errors::domain::DomainError;

/// Top-level error returned by `GameFlowService` operations.
///
/// Wraps recoverable domain rejections and registry-level failures.
/// Fatal domain invariant breaches also surface here, after the
/// orchestrator has already terminated the affected game.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("game not found: {0}")]
    GameNotFound(Uuid),
    #[error("player {0} is not seated in this game")]
    PlayerNotInGame(Uuid),
    #[error("invalid table configuration: {detail}")]
    Config { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}
