//! # brrtrouter-cast
//!
//! Declarative input casting for BRRTRouter request handlers.
//!
//! ## Overview
//!
//! Request input arrives loosely typed: query parameters are always strings,
//! form-style clients send `"0"` for false, and a scalar shows up where a list
//! was expected. This crate normalizes declared fields to one of four primitive
//! kinds (`int`, `string`, `array`, `boolean`) *before* validation runs, so
//! validators and handlers see the types they expect.
//!
//! ## Architecture
//!
//! - **[`cast`]** - Cast types, declarations, conversion rules, and [`cast_values`](cast::cast_values)
//! - **[`request`]** - [`RequestInput`](request::RequestInput), the record built from query string and JSON body
//! - **[`prepare`]** - The before-validation hook ([`Casts`](prepare::Casts)) and [`FormRequest`](prepare::FormRequest) pipeline
//! - **[`config`]** - Environment settings and per-handler declaration files
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Request Preparation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Input as RequestInput
//!     participant Casts as Casts::prepare_for_validation
//!     participant Validator as Validator
//!     participant Handler
//!
//!     Client->>Input: GET /items?count=7&tags[]=a
//!     Input->>Input: Merge query + JSON body
//!     Input->>Casts: Declared fields
//!     Casts->>Casts: Create missing fields as null
//!     Casts->>Casts: Coerce each field (null stays null)
//!     Casts->>Validator: Prepared input
//!     alt Invalid
//!         Validator-->>Client: 400 Request validation failed
//!     else Valid
//!         Validator->>Handler: Typed input
//!     end
//! ```
//!
//! ## Casting Rules
//!
//! | Type | Rule |
//! |------|------|
//! | `array` | null → null; scalars wrap into a one-element array; objects become their values |
//! | `int` / `integer` | null → null; leading numeric prefix of strings, `true` → 1, floats truncate |
//! | `boolean` / `bool` | null → null; `""`, `"0"`, `0`, `[]`, `{}` are false |
//! | `string` (and unknown tags) | arrays/objects → null; scalars to their canonical text |
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_cast::cast::{cast_values, CastDeclaration, CastType};
//! use serde_json::json;
//!
//! let casts = CastDeclaration::new()
//!     .field("name", CastType::String)
//!     .field("tags", CastType::Array)
//!     .field("active", CastType::Boolean)
//!     .field("count", CastType::Int);
//!
//! let mut input = json!({"name": 123, "tags": "x", "active": "0", "count": "7"})
//!     .as_object()
//!     .cloned()
//!     .unwrap_or_default();
//! cast_values(&mut input, &casts);
//!
//! assert_eq!(
//!     serde_json::Value::Object(input),
//!     json!({"name": "123", "tags": ["x"], "active": false, "count": 7})
//! );
//! ```

pub mod cast;
pub mod config;
pub mod logging;
pub mod prepare;
pub mod request;

pub use cast::{cast_values, CastDeclaration, CastType, InputRecord, TagPolicy};
pub use prepare::{Casts, DeclaredCasts, FormRequest, SchemaValidator, ValidationIssue, Validator};
pub use request::RequestInput;
