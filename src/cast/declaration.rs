use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use super::error::CastConfigError;
use super::types::CastType;

/// How unrecognized tags are treated while building a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagPolicy {
    /// Unrecognized tags cast to string and log a warning
    #[default]
    Lenient,
    /// Unrecognized tags are a [`CastConfigError`]
    Strict,
}

impl TagPolicy {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "1" | "true" | "yes" | "strict" => TagPolicy::Strict,
            _ => TagPolicy::Lenient,
        }
    }
}

/// Ordered field name → [`CastType`] mapping.
///
/// Read-only to the coercer. Declaring the same field twice replaces its type
/// in place, so a field is never cast twice in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastDeclaration {
    fields: Vec<(String, CastType)>,
}

impl CastDeclaration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: CastType) -> Self {
        self.insert(name, ty);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: CastType) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = ty,
            None => self.fields.push((name, ty)),
        }
    }

    /// Build from `(field, tag)` string pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CastConfigError::UnknownCastType`] for an unrecognized tag
    /// under [`TagPolicy::Strict`].
    pub fn from_pairs<I, K, T>(pairs: I, policy: TagPolicy) -> Result<Self, CastConfigError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: AsRef<str>,
    {
        let mut decl = Self::new();
        for (field, tag) in pairs {
            let field = field.into();
            let ty = resolve_tag(&field, tag.as_ref(), policy)?;
            decl.insert(field, ty);
        }
        Ok(decl)
    }

    /// Build from a JSON object such as `{"age": "integer", "tags": "array"}`.
    ///
    /// # Errors
    ///
    /// Under [`TagPolicy::Strict`], unknown tags and non-string tags are rejected.
    pub fn from_map(map: &Map<String, Value>, policy: TagPolicy) -> Result<Self, CastConfigError> {
        let mut decl = Self::new();
        for (field, tag) in map {
            let ty = match tag {
                Value::String(tag) => resolve_tag(field, tag, policy)?,
                other => match policy {
                    TagPolicy::Strict => {
                        return Err(CastConfigError::InvalidCastType {
                            field: field.clone(),
                            found: json_type_name(other),
                        })
                    }
                    TagPolicy::Lenient => {
                        warn!(
                            field = %field,
                            found = json_type_name(other),
                            "Non-string cast type, falling back to string"
                        );
                        CastType::String
                    }
                },
            };
            decl.insert(field.clone(), ty);
        }
        Ok(decl)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<CastType> {
        self.fields.iter().find(|(n, _)| n == field).map(|(_, ty)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CastType)> {
        self.fields.iter().map(|(n, ty)| (n.as_str(), *ty))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn resolve_tag(field: &str, tag: &str, policy: TagPolicy) -> Result<CastType, CastConfigError> {
    let (ty, known) = CastType::parse_lenient(tag);
    if known {
        return Ok(ty);
    }
    match policy {
        TagPolicy::Strict => Err(CastConfigError::UnknownCastType {
            field: Some(field.to_string()),
            tag: tag.to_string(),
        }),
        TagPolicy::Lenient => {
            warn!(field = %field, tag = %tag, "Unknown cast type, falling back to string");
            Ok(ty)
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K: Into<String>> FromIterator<(K, CastType)> for CastDeclaration {
    fn from_iter<I: IntoIterator<Item = (K, CastType)>>(iter: I) -> Self {
        let mut decl = Self::new();
        for (name, ty) in iter {
            decl.insert(name, ty);
        }
        decl
    }
}

impl Serialize for CastDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, ty) in &self.fields {
            map.serialize_entry(name, ty)?;
        }
        map.end()
    }
}

/// Lenient: unknown tags fall back to string. Document order is kept.
impl<'de> Deserialize<'de> for CastDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DeclarationVisitor;

        impl<'de> Visitor<'de> for DeclarationVisitor {
            type Value = CastDeclaration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to cast types")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = Map::new();
                while let Some((field, tag)) = access.next_entry::<String, Value>()? {
                    map.insert(field, tag);
                }
                CastDeclaration::from_map(&map, TagPolicy::Lenient).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(DeclarationVisitor)
    }
}
