use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::convert::cast_value;
use super::declaration::{json_type_name, CastDeclaration};
use super::types::CastType;

/// A mutable key-value record the coercer can work on.
///
/// Only three operations are needed: existence check, read, and write.
pub trait InputRecord {
    /// Whether `key` is present (a stored null still counts as present)
    fn has(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Option<&Value>;
    fn set(&mut self, key: &str, value: Value);

    /// Remove and return the current value, leaving null behind.
    ///
    /// The default goes through `get` + `set`; stores that own their values
    /// should override it to avoid the clone.
    fn take(&mut self, key: &str) -> Value {
        let value = self.get(key).cloned().unwrap_or(Value::Null);
        self.set(key, Value::Null);
        value
    }
}

impl InputRecord for Map<String, Value> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }

    fn take(&mut self, key: &str) -> Value {
        self.get_mut(key).map(Value::take).unwrap_or(Value::Null)
    }
}

impl InputRecord for HashMap<String, Value> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }

    fn take(&mut self, key: &str) -> Value {
        self.get_mut(key).map(Value::take).unwrap_or(Value::Null)
    }
}

/// Make sure `key` exists, creating it as null when absent or null.
fn add_key<R: InputRecord + ?Sized>(record: &mut R, key: &str) {
    if !matches!(record.get(key), Some(v) if !v.is_null()) {
        record.set(key, Value::Null);
    }
}

/// Coerce every declared field of `record` in declaration order.
///
/// Missing fields are created as null first, so every declared field exists
/// afterwards. Conversion never fails; values that cannot be represented
/// become null.
pub fn cast_values<R: InputRecord + ?Sized>(record: &mut R, declaration: &CastDeclaration) {
    for (field, ty) in declaration.iter() {
        add_key(record, field);

        let current = record.take(field);
        if ty == CastType::String && (current.is_array() || current.is_object()) {
            warn!(
                field = %field,
                found = json_type_name(&current),
                "Structured value declared as string, casting to null"
            );
        }
        let found = json_type_name(&current);
        let cast = cast_value(ty, current);
        debug!(
            field = %field,
            cast_type = %ty,
            found = found,
            result = json_type_name(&cast),
            "Field cast"
        );
        record.set(field, cast);
    }
}
