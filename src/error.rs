//! Error taxonomy for the session runtime.

/// Errors that can occur in the reef session runtime.
///
/// Remote failures are resolved at the orchestrator boundary: the session is
/// left in a defined state and a failure event is emitted before the error is
/// returned, so callers may ignore the value and still observe a consistent
/// session.
#[derive(thiserror::Error, Debug)]
pub enum ReefError {
    #[error("remote service unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    #[error("another request is already in flight")]
    Busy,

    #[error("precondition unmet: {0}")]
    PreconditionUnmet(String),

    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),
}

/// Convenience result type.
pub type ReefResult<T> = Result<T, ReefError>;
