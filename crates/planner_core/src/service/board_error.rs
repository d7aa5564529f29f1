use crate::model::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Error returned by controller operations.
#[derive(Debug)]
pub enum BoardError {
    /// User input was rejected; nothing changed.
    Validation(ValidationError),
    /// Backend read or write failed; in-memory state is unchanged.
    Store(StoreError),
}

impl BoardError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
