use std::fmt;

/// Cast declaration error
///
/// Only produced while building a declaration under [`TagPolicy::Strict`](super::TagPolicy::Strict).
/// Coercion itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastConfigError {
    /// Tag is not one of `int`, `integer`, `string`, `array`, `boolean`, `bool`
    UnknownCastType {
        /// Field the tag was declared for, when known
        field: Option<String>,
        /// The unrecognized tag
        tag: String,
    },
    /// Tag is not a string at all (e.g. a number or a nested object)
    InvalidCastType {
        /// Field the tag was declared for
        field: String,
        /// JSON type name of the offending tag
        found: &'static str,
    },
}

impl fmt::Display for CastConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastConfigError::UnknownCastType { field: Some(field), tag } => {
                write!(
                    f,
                    "Cast declaration error: Unknown cast type '{}' for field '{}'. \
                    Expected one of: int, integer, string, array, boolean, bool",
                    tag, field
                )
            }
            CastConfigError::UnknownCastType { field: None, tag } => {
                write!(
                    f,
                    "Cast declaration error: Unknown cast type '{}'. \
                    Expected one of: int, integer, string, array, boolean, bool",
                    tag
                )
            }
            CastConfigError::InvalidCastType { field, found } => {
                write!(
                    f,
                    "Cast declaration error: Cast type for field '{}' must be a string, found {}",
                    field, found
                )
            }
        }
    }
}

impl std::error::Error for CastConfigError {}
