use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised by record constructors and controller inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record id is empty.
    EmptyId,
    /// Title is empty after trimming.
    EmptyTitle,
    /// Description is present but blank; absent descriptions are `None`.
    BlankDescription,
    /// No subject was selected.
    MissingSubject,
    /// Subject label is not one of the fixed subjects.
    UnknownSubject(String),
    /// Priority label is not `high|medium|low`.
    UnknownPriority(String),
    /// Goal target must be strictly positive.
    NonPositiveTarget(i64),
    /// Goal progress lies outside `[0, target]`.
    ProgressOutOfRange { current: i64, target: i64 },
    /// Date is not a well-formed `YYYY-MM-DD` calendar date.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record id must not be empty"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::BlankDescription => write!(f, "description must be omitted rather than blank"),
            Self::MissingSubject => write!(f, "subject must be selected"),
            Self::UnknownSubject(value) => write!(f, "unknown subject `{value}`"),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected high|medium|low")
            }
            Self::NonPositiveTarget(target) => {
                write!(f, "goal target must be greater than zero, got {target}")
            }
            Self::ProgressOutOfRange { current, target } => {
                write!(f, "goal progress {current} is outside 0..={target}")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ValidationError {}
