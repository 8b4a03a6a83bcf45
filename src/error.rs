//! Persistence error types.
//!
//! The simulation itself never fails; only loading and saving leaderboards,
//! settings and tuning files can. Those paths return [`PersistenceError`] and
//! callers decide whether to fall back to defaults.

use std::fmt;

/// Error raised while reading or writing persisted data
#[derive(Debug)]
pub enum PersistenceError {
    /// Filesystem failure (native only)
    Io(std::io::Error),

    /// Stored text was not valid JSON for the expected type
    Json(serde_json::Error),

    /// Envelope was written by a format version this build cannot read
    UnsupportedVersion {
        /// Version found in the stored envelope.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// Storage backend is missing (e.g. LocalStorage disabled in the browser)
    Unavailable(&'static str),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(err) => write!(f, "storage I/O failed: {}", err),
            PersistenceError::Json(err) => write!(f, "stored data is malformed: {}", err),
            PersistenceError::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported save format version {} (expected {})",
                found, expected
            ),
            PersistenceError::Unavailable(what) => write!(f, "storage unavailable: {}", what),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Json(err)
    }
}
