use std::fmt;

use crate::result::RunResult;

/// Result type for conduit-types operations, and the return type of
/// `conduit_runtime::lifecycle::run`.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy surfaced distinctly to callers.
///
/// Decode errors on individual stream lines and unknown provider event
/// types are *not* represented here — they never leave the parser as
/// errors; see `RawEvent::err` and `CanonicalEvent::is_unknown_event`.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed (reading a captured stream, recorder plumbing).
    Io(std::io::Error),

    /// JSON encode/decode failed.
    Json(serde_json::Error),

    /// The child could not be started at all: binary not found, permission
    /// denied, pipe setup failed, or no command was configured. No
    /// `RunResult` exists for a run that never spawned.
    SpawnFailure(String),

    /// The run was cancelled. Carries whatever partial `RunResult` had
    /// already been assembled — in particular a captured
    /// `agent_session_id` — so the caller can still resume; this pairing
    /// is contractual. `Result<T, E>` cannot carry a `T` and an `E` at
    /// once, so the partial result rides inside the error variant rather
    /// than alongside it; see DESIGN.md for the rationale.
    Cancelled(Option<Box<RunResult>>),

    /// Any other unrecoverable error (`wait()` failed in a way that isn't a
    /// coded exit, process-group signal delivery failed for a reason other
    /// than "no such process", etc).
    Fatal(String),
}

impl Error {
    /// The partial result attached to a `Cancelled` error, if any.
    pub fn partial_result(&self) -> Option<&RunResult> {
        match self {
            Error::Cancelled(partial) => partial.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::SpawnFailure(msg) => write!(f, "failed to spawn agent process: {}", msg),
            Error::Cancelled(_) => write!(f, "run cancelled"),
            Error::Fatal(msg) => write!(f, "fatal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
