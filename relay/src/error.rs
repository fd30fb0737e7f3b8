//! Error types for the relay crate.
//!
//! The error channel is reserved for contract violations. Outcomes that are
//! merely unhelpful — a workflow that never reaches its final report, a
//! session invoked before it was built — are plain return values, not errors.

use thiserror::Error;

/// Errors raised while interpreting a workflow event stream.
#[derive(Debug, Error)]
pub enum InterpretError {
    /// The routing stage's payload could not be decoded as structured data.
    ///
    /// This signals an upstream contract violation and is never recovered
    /// from or silently ignored.
    #[error("malformed routing payload: {0}")]
    MalformedRouting(#[from] serde_json::Error),

    /// The routing stage emitted an event without a routing payload.
    #[error("routing stage emitted no routing payload")]
    MissingRouting,
}

/// Errors raised at the external workflow-engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Graph construction or compilation failed.
    #[error("graph compilation failed: {0}")]
    Compile(String),

    /// The engine's token stream produced an error mid-turn.
    #[error("token stream failed: {0}")]
    Stream(String),
}

impl EngineError {
    /// Create a compile error from any displayable cause.
    #[must_use]
    pub fn compile(cause: impl std::fmt::Display) -> Self {
        Self::Compile(cause.to_string())
    }

    /// Create a stream error from any displayable cause.
    #[must_use]
    pub fn stream(cause: impl std::fmt::Display) -> Self {
        Self::Stream(cause.to_string())
    }
}

/// Top-level error type for relay operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Error while interpreting the event stream.
    #[error("InterpretError: {0}")]
    Interpret(#[from] InterpretError),

    /// Error at the engine boundary.
    #[error("EngineError: {0}")]
    Engine(#[from] EngineError),
}

/// Result type alias for relay operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
