use std::fmt::{self, Display};

/// Rejected item ids and unparsable shooting dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    EmptyId,
    InvalidDate(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyId => write!(f, "item id must not be empty"),
            ModelError::InvalidDate(raw) => {
                write!(f, "invalid shooting date: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
