use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A provider field that must carry a value was blank.
    InvalidProvider {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A media kind string that is neither `movie` nor `tv`.
    UnknownMediaKind(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidProvider { field } => {
                write!(f, "invalid provider: `{field}` must not be empty")
            }
            ModelError::UnknownMediaKind(kind) => {
                write!(f, "unknown media kind '{kind}' (expected movie or tv)")
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
