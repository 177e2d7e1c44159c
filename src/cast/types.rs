use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::CastConfigError;

/// Canonical tag for integer casts
pub const INT: &str = "int";
/// Canonical tag for string casts
pub const STRING: &str = "string";
/// Canonical tag for array casts
pub const ARRAY: &str = "array";
/// Canonical tag for boolean casts
pub const BOOL: &str = "boolean";

/// Alias of [`BOOL`]
pub const BOOLEAN: &str = BOOL;
/// Alias of [`INT`]
pub const INTEGER: &str = INT;

/// Target kind a declared field is coerced to.
///
/// Spelling aliases (`integer`, `bool`) collapse to the same variant when a
/// tag is parsed, so nothing downstream ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastType {
    /// Signed 64-bit integer
    #[serde(rename = "int", alias = "integer")]
    Int,
    /// String (also the fallback for unrecognized tags)
    #[serde(rename = "string")]
    String,
    /// Ordered sequence
    #[serde(rename = "array")]
    Array,
    /// Boolean
    #[serde(rename = "boolean", alias = "bool")]
    Boolean,
}

impl CastType {
    /// Canonical tag name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CastType::Int => INT,
            CastType::String => STRING,
            CastType::Array => ARRAY,
            CastType::Boolean => BOOL,
        }
    }

    /// Parse a tag, falling back to [`CastType::String`] for anything unrecognized.
    ///
    /// Returns the resolved type and whether the tag was recognized, so callers
    /// can report typos without changing the outcome.
    #[must_use]
    pub fn parse_lenient(tag: &str) -> (Self, bool) {
        match tag.parse::<CastType>() {
            Ok(ty) => (ty, true),
            Err(_) => (CastType::String, false),
        }
    }
}

impl FromStr for CastType {
    type Err = CastConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" | "integer" => Ok(CastType::Int),
            "string" => Ok(CastType::String),
            "array" => Ok(CastType::Array),
            "boolean" | "bool" => Ok(CastType::Boolean),
            other => Err(CastConfigError::UnknownCastType {
                field: None,
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
