#![allow(dead_code)]

use serde_json::{Map, Value};

/// Object fields of a `json!` literal; anything else yields an empty record
pub fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Creates a temporary declarations file with the given extension
    pub fn create_temp_declarations(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("brrt_cast_test_")
            .suffix(&format!(".{}", ext))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_declarations(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_declarations(content, "json")
    }
}
