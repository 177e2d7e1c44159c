//! # Cast Configuration
//!
//! Environment-driven settings plus loading of per-handler cast declarations
//! from a YAML or JSON file.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_CAST_STRICT`
//!
//! When `1`, `true`, `yes` or `strict`, unrecognized cast types in a
//! declarations file are rejected instead of falling back to `string`.
//!
//! Default: lenient
//!
//! ### `BRRTR_CAST_FILE`
//!
//! Optional path to a declarations file.
//!
//! ## File Format
//!
//! Top-level keys are handler names, each mapping field names to cast types:
//!
//! ```yaml
//! create_pet:
//!   name: string
//!   age: integer
//!   tags: array
//!   vaccinated: boolean
//! list_pets:
//!   limit: int
//! ```

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cast::{CastDeclaration, TagPolicy};
use crate::prepare::DeclaredCasts;

/// Cast configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastConfig {
    /// How unrecognized cast types are handled
    pub tag_policy: TagPolicy,
    /// Declarations file, if one is configured
    pub declarations_file: Option<PathBuf>,
}

impl CastConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let tag_policy = env::var("BRRTR_CAST_STRICT")
            .map(|v| TagPolicy::parse(&v))
            .unwrap_or_default();
        let declarations_file = env::var("BRRTR_CAST_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        CastConfig {
            tag_policy,
            declarations_file,
        }
    }

    /// Load the configured declarations file, or an empty registry when none
    /// is configured.
    ///
    /// # Errors
    ///
    /// See [`load_registry`].
    pub fn load_registry(&self) -> Result<CastRegistry> {
        match &self.declarations_file {
            Some(path) => load_registry(path, self.tag_policy),
            None => Ok(CastRegistry::default()),
        }
    }
}

/// Cast declarations keyed by handler name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastRegistry {
    declarations: HashMap<String, CastDeclaration>,
}

impl CastRegistry {
    pub fn insert(&mut self, handler: impl Into<String>, declaration: CastDeclaration) {
        self.declarations.insert(handler.into(), declaration);
    }

    #[must_use]
    pub fn get(&self, handler: &str) -> Option<&CastDeclaration> {
        self.declarations.get(handler)
    }

    /// [`DeclaredCasts`] for `handler`; empty when the handler declares nothing.
    #[must_use]
    pub fn casts_for(&self, handler: &str) -> DeclaredCasts {
        DeclaredCasts::new(self.get(handler).cloned().unwrap_or_default())
    }

    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Parse a registry document that has already been read into JSON.
///
/// # Errors
///
/// Returns an error if the document is not a map of maps, or if a cast type
/// is rejected under [`TagPolicy::Strict`].
pub fn registry_from_value(value: &Value, policy: TagPolicy) -> Result<CastRegistry> {
    let handlers = value
        .as_object()
        .ok_or_else(|| anyhow!("cast declarations must be a map of handler names"))?;

    let mut registry = CastRegistry::default();
    for (handler, fields) in handlers {
        let fields = fields
            .as_object()
            .ok_or_else(|| anyhow!("casts for handler '{}' must be a map of field names", handler))?;
        let declaration = CastDeclaration::from_map(fields, policy)
            .with_context(|| format!("invalid casts for handler '{}'", handler))?;
        registry.insert(handler.clone(), declaration);
    }
    Ok(registry)
}

/// Load a registry from a `.yaml`/`.yml` or JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if
/// [`registry_from_value`] rejects its contents.
pub fn load_registry(path: impl AsRef<Path>, policy: TagPolicy) -> Result<CastRegistry> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cast declarations from {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?
    };

    let registry = registry_from_value(&value, policy)
        .with_context(|| format!("invalid cast declarations in {}", path.display()))?;
    info!(
        path = %path.display(),
        handlers = registry.len(),
        strict = policy == TagPolicy::Strict,
        "Cast declarations loaded"
    );
    Ok(registry)
}
