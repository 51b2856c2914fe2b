use thiserror::Error;

/// Errors produced by the game core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A cell identifier that does not decode to a coordinate
    #[error("Malformed cell identifier: {0:?}")]
    MalformedIdentifier(String),

    /// A configuration the engine cannot start from
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
