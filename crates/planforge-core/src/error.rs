//! Engine error types.

use thiserror::Error;

/// Failures the engine reports to the host.
///
/// Expected user-driven edge cases (degenerate draw, empty room detection,
/// history bounds) never surface here; they are soft no-ops on their own
/// operations. `InsufficientSelection` is a caller-visible status for the
/// host to render; `Document` is the one hard contract violation, raised
/// for malformed import payloads.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("at least two elements must be selected")]
    InsufficientSelection,

    #[error("invalid plan document: {0}")]
    Document(#[from] serde_json::Error),
}
