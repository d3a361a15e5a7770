//! Domain-level error type used across the engine and its collaborators.
//!
//! This error type is transport-agnostic. Orchestrator methods return
//! `Result<T, crate::error::EngineError>` and convert from `DomainError`
//! using the provided `From<DomainError> for EngineError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Recoverable input-validation failures. State is unchanged and the
/// caller may correct the request and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    PhaseMismatch,
    AlreadyPassed,
    BidBelowMinimum,
    BidAboveMaximum,
    BidNotMultipleOfFive,
    PartnerOutbid,
    CardNotInHand,
    MustFollowSuit,
    WrongDiscardCount,
    NoKitty,
    NotInGame,
    InvalidConfig,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or business rule violation. Recoverable.
    Validation(ValidationKind, String),
    /// A structural invariant of the round state machine is broken
    /// (hand-size mismatch, missing contract where one is required).
    /// Unrecoverable for the current game: the orchestrator aborts the
    /// game rather than repairing state.
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Whether this error ends the game (as opposed to rejecting one input).
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::Invariant(_))
    }
}
