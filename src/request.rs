use serde_json::{Map, Value};
use tracing::debug;

use crate::cast::{json_type_name, InputRecord};

/// Input fields of one inbound request.
///
/// Merges query string parameters and the JSON body into a single flat record
/// (body fields win on name clashes). This is the record casts are applied to
/// before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInput {
    fields: Map<String, Value>,
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter names
/// and values. Values stay strings; repeated `name[]` keys collect into an
/// array under `name`. A plain repeated key keeps its last value.
///
/// # Arguments
///
/// * `path` - The full URL path (e.g., `/users?limit=10&tags[]=a&tags[]=b`) or a bare query
///
/// # Returns
///
/// A map of parameter names to values, in first-seen order
pub fn parse_query_input(path: &str) -> Map<String, Value> {
    let query_str = match path.find('?') {
        Some(pos) => &path[pos + 1..],
        None if path.starts_with('/') => return Map::new(),
        None => path,
    };

    let mut params = Map::new();
    for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
        if let Some(name) = k.strip_suffix("[]") {
            match params.get_mut(name) {
                Some(Value::Array(items)) => items.push(Value::String(v.into_owned())),
                _ => {
                    params.insert(name.to_string(), Value::Array(vec![Value::String(v.into_owned())]));
                }
            }
        } else {
            params.insert(k.into_owned(), Value::String(v.into_owned()));
        }
    }
    params
}

impl RequestInput {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build the input record from a request path (or bare query string) and
    /// an optional JSON body.
    ///
    /// Only object bodies contribute fields; any other body shape is ignored.
    #[must_use]
    pub fn from_parts(path: &str, body: Option<Value>) -> Self {
        let mut fields = parse_query_input(path);
        let query_count = fields.len();

        match body {
            Some(Value::Object(body)) => {
                debug!(
                    query_fields = query_count,
                    body_fields = body.len(),
                    "Request input merged"
                );
                for (k, v) in body {
                    fields.insert(k, v);
                }
            }
            Some(other) => {
                debug!(
                    query_fields = query_count,
                    body_type = json_type_name(&other),
                    "Non-object request body ignored for input"
                );
            }
            None => {
                debug!(query_fields = query_count, "Request input from query only");
            }
        }

        Self { fields }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn all(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// JSON view of the current fields (cloned)
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
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

impl From<Map<String, Value>> for RequestInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl InputRecord for RequestInput {
    fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    fn take(&mut self, key: &str) -> Value {
        self.fields.get_mut(key).map(Value::take).unwrap_or(Value::Null)
    }
}
