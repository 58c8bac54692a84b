use std::fmt;

/// Why a save state or score submission was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    NotFinite {
        field: &'static str,
    },
    NameTooLong {
        len: usize,
        max: usize,
    },
    UnknownId {
        field: &'static str,
        id: u32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is outside {min}..={max}"),
            ValidationError::NotFinite { field } => write!(f, "{field} is not a finite number"),
            ValidationError::NameTooLong { len, max } => {
                write!(f, "player name is {len} characters, limit is {max}")
            }
            ValidationError::UnknownId { field, id } => {
                write!(f, "{field} references unknown id {id}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check `value` against an inclusive range.
pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}
