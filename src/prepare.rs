//! # Before-validation hook
//!
//! Input casting runs as a preparation step: a type implementing [`Casts`]
//! declares which fields to coerce, and [`FormRequest`] makes sure that
//! declaration is applied exactly once, right before the downstream
//! [`Validator`] sees the input.
//!
//! ```rust
//! use brrtrouter_cast::cast::{CastDeclaration, CastType};
//! use brrtrouter_cast::prepare::{Casts, FormRequest, SchemaValidator};
//! use brrtrouter_cast::request::RequestInput;
//! use serde_json::json;
//!
//! struct CreateItem;
//!
//! impl Casts for CreateItem {
//!     fn casts(&self) -> CastDeclaration {
//!         CastDeclaration::new().field("count", CastType::Int)
//!     }
//! }
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "count": { "type": "integer" } },
//!     "required": ["count"]
//! });
//! let form = FormRequest::new(CreateItem, SchemaValidator::new(&schema).unwrap());
//! let mut input = RequestInput::from_parts("/items?count=7", None);
//! assert!(form.validate(&mut input).is_ok());
//! assert_eq!(input.get("count"), Some(&json!(7)));
//! ```

use anyhow::anyhow;
use serde_json::Value;
use tracing::{debug, info};

use crate::cast::{cast_values, CastDeclaration, InputRecord};
use crate::request::RequestInput;

/// One rejected field reported by a [`Validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(location: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Render issues as a JSON error body in the same shape the router uses for
/// request validation failures.
#[must_use]
pub fn issues_to_json(issues: &[ValidationIssue]) -> Value {
    let details: Vec<Value> = issues
        .iter()
        .map(|i| {
            serde_json::json!({
                "location": i.location,
                "kind": i.kind,
                "message": i.message,
            })
        })
        .collect();
    serde_json::json!({"error": "Request validation failed", "details": details})
}

/// Input preparation behavior.
///
/// Override [`casts`](Casts::casts) to declare field types; the provided
/// [`prepare_for_validation`](Casts::prepare_for_validation) applies them.
pub trait Casts {
    /// Field declarations to apply (none by default)
    fn casts(&self) -> CastDeclaration {
        CastDeclaration::default()
    }

    /// Coerce the declared fields of `input` in place.
    fn prepare_for_validation(&self, input: &mut dyn InputRecord) {
        cast_values(input, &self.casts());
    }
}

/// [`Casts`] backed by a fixed declaration, for when casts come from
/// configuration rather than a hand-written impl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredCasts {
    declaration: CastDeclaration,
}

impl DeclaredCasts {
    #[must_use]
    pub fn new(declaration: CastDeclaration) -> Self {
        Self { declaration }
    }

    #[must_use]
    pub fn declaration(&self) -> &CastDeclaration {
        &self.declaration
    }
}

impl Casts for DeclaredCasts {
    fn casts(&self) -> CastDeclaration {
        self.declaration.clone()
    }

    fn prepare_for_validation(&self, input: &mut dyn InputRecord) {
        cast_values(input, &self.declaration);
    }
}

/// Downstream validation seam.
pub trait Validator {
    /// Check prepared input.
    ///
    /// # Errors
    ///
    /// Returns every issue found; an empty list is never returned as `Err`.
    fn validate(&self, input: &Value) -> Result<(), Vec<ValidationIssue>>;
}

/// Accepts everything. Useful when only the casting step is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl Validator for NoValidation {
    fn validate(&self, _input: &Value) -> Result<(), Vec<ValidationIssue>> {
        Ok(())
    }
}

/// JSON Schema validator for prepared input.
pub struct SchemaValidator {
    compiled: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile `schema` once for reuse across requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema itself is invalid.
    pub fn new(schema: &Value) -> anyhow::Result<Self> {
        let compiled = jsonschema::validator_for(schema)
            .map_err(|e| anyhow!("Failed to compile JSON Schema: {}", e))?;
        Ok(Self { compiled })
    }
}

impl Validator for SchemaValidator {
    fn validate(&self, input: &Value) -> Result<(), Vec<ValidationIssue>> {
        let issues: Vec<ValidationIssue> = self
            .compiled
            .iter_errors(input)
            .map(|e| {
                let location = e.instance_path.to_string();
                ValidationIssue::new(
                    if location.is_empty() { "/".to_string() } else { location },
                    "Schema",
                    e.to_string(),
                )
            })
            .collect();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, input: &Value) -> Result<(), Vec<ValidationIssue>> {
        (**self).validate(input)
    }
}

/// Preparation + validation pipeline for one kind of request.
#[derive(Debug, Clone)]
pub struct FormRequest<C, V> {
    casts: C,
    validator: V,
}

impl<C: Casts, V: Validator> FormRequest<C, V> {
    #[must_use]
    pub fn new(casts: C, validator: V) -> Self {
        Self { casts, validator }
    }

    /// Prepare `input` in place, then validate it.
    ///
    /// Casting always happens, so the caller sees coerced fields even when
    /// validation fails.
    ///
    /// # Errors
    ///
    /// Returns the validator's issues.
    pub fn validate(&self, input: &mut RequestInput) -> Result<(), Vec<ValidationIssue>> {
        self.casts.prepare_for_validation(input);
        let result = self.validator.validate(&input.to_value());
        match &result {
            Ok(()) => debug!(fields = input.len(), "Request input validated"),
            Err(issues) => info!(
                fields = input.len(),
                issue_count = issues.len(),
                "Request input rejected"
            ),
        }
        result
    }

    /// Prepare and validate, consuming the input and returning the coerced
    /// fields on success.
    ///
    /// # Errors
    ///
    /// Returns the validator's issues.
    pub fn into_validated(&self, mut input: RequestInput) -> Result<Value, Vec<ValidationIssue>> {
        self.validate(&mut input)?;
        Ok(input.into_value())
    }

    #[must_use]
    pub fn casts(&self) -> &C {
        &self.casts
    }
}
