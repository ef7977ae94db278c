use thiserror::Error;

use crate::xlog::Field;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed xlog line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("missing required field: {0}")]
    MissingField(Field),

    #[error("invalid value for field {field}: {message}")]
    InvalidField { field: Field, message: String },

    #[error("game cannot start in the future")]
    StartsInFuture,

    #[error("game cannot end in the future")]
    EndsInFuture,

    #[error("game cannot end before it has begun")]
    EndsBeforeStart,

    #[error("wallclock time cannot be less than realtime ({wallclock}s < {realtime}s)")]
    WallclockBelowRealtime { wallclock: i64, realtime: i64 },

    #[error("Failed to load mapping table {path}: {message}")]
    TableLoad { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Record on line {line} rejected: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Future timestamps, end-before-start and wallclock/realtime violations
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Error::StartsInFuture
                | Error::EndsInFuture
                | Error::EndsBeforeStart
                | Error::WallclockBelowRealtime { .. }
        )
    }

    /// Errors that reject a single line or record without affecting the rest of a batch
    pub fn is_record_scoped(&self) -> bool {
        self.is_temporal()
            || matches!(
                self,
                Error::MalformedLine { .. } | Error::MissingField(_) | Error::InvalidField { .. }
            )
    }
}
