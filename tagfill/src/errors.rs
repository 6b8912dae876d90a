use thiserror::Error;

use crate::decode::DecodeError;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FillError>;

/// Top-level error type returned by the applier, the emitter and the walker.
#[derive(Debug, Error)]
pub enum FillError {
    /// The record reference, or one of the indirections leading to it, is empty.
    #[error("passed nil value where a record was expected")]
    NilInput,

    /// The value is not a record, or the field's declared type cannot hold a default.
    #[error("unsupported value given for `{name}`")]
    UnsupportedValue { name: String },

    /// A field carries a default specification but cannot be written.
    #[error("default is defined for field `{field}` but the field is not writable")]
    UnsupportedOperation { field: String },

    /// The default specification does not parse for the field's declared type.
    #[error("invalid default `{spec}` for field `{field}`: {source}")]
    InvalidSpec {
        field: String,
        spec: String,
        #[source]
        source: DecodeError,
    },

    /// Writing generated code failed.
    #[error("failed to write generated code: {0}")]
    Io(#[from] std::io::Error),
}

impl FillError {
    pub(crate) fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedValue { name: name.into() }
    }

    /// Returns `true` for the error raised when a value turns out not to be a record.
    pub fn is_unsupported_value(&self) -> bool {
        matches!(self, Self::UnsupportedValue { .. })
    }
}
