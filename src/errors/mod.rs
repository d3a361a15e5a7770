//! Error handling for the 200 game engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
