use std::fmt::{self, Display};

/// Errors produced by model parsers and constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownDomain(String),
    UnknownPreset(String),
    InvalidGenreId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownDomain(raw) => write!(f, "unknown media type: {raw}"),
            ModelError::UnknownPreset(raw) => write!(f, "unknown preset: {raw}"),
            ModelError::InvalidGenreId(raw) => write!(f, "invalid genre id: {raw}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
