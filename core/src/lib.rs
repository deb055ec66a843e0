//! Schema-driven hydration of JSON payloads into typed model graphs.
//!
//! This crate turns pre-parsed JSON value trees (via [`serde_json`]) into
//! validated, typed object graphs according to declarative per-type
//! schemas:
//!
//! - [`TargetShape`] / [`PropertyDescriptor`] / [`ModelSchema`] — the
//!   declarative schema data model.
//! - [`PrimitiveType`] / [`TypeRegistry`] — named scalar kinds with a
//!   validate/coerce contract; extend by registering new implementations.
//! - [`MetadataReader`] / [`TypeDiscovery`] — collaborator traits that
//!   supply model metadata from whatever storage front the host uses.
//! - [`compile`] / [`SchemaCache`] — metadata-to-schema compilation with
//!   reference closure checking.
//! - [`Engine`] — the hydrator: recursive required/optional validation,
//!   homogeneous arrays, and ordered first-match polymorphic resolution.
//! - [`ModelValue`] / [`ModelObject`] — the hydrated, caller-owned result
//!   graph.
//!
//! Compilation happens once at startup; afterwards the engine is
//! immutable and safe for unsynchronized concurrent hydration calls.
//!
//! # Example
//!
//! ```
//! use std::collections::{BTreeMap, BTreeSet};
//! use model_hydrator_core::*;
//! use serde_json::json;
//!
//! // Declare model metadata (any MetadataReader works; a map is one).
//! let mut reader = BTreeMap::new();
//! reader.insert(
//!     "TagModel".to_string(),
//!     vec![
//!         PropertyDescriptor::required("id", TargetShape::primitive("number")),
//!         PropertyDescriptor::required("name", TargetShape::primitive("string")),
//!     ],
//! );
//! reader.insert(
//!     "ArticleModel".to_string(),
//!     vec![
//!         PropertyDescriptor::required("id", TargetShape::primitive("number")),
//!         PropertyDescriptor::required("tags", TargetShape::array(TargetShape::model("TagModel"))),
//!     ],
//! );
//!
//! // Compile once, then hydrate as often as needed.
//! let set: BTreeSet<String> = reader.keys().cloned().collect();
//! let mut cache = SchemaCache::new();
//! compile(&set, &reader, &mut cache).unwrap();
//! let engine = Engine::new(TypeRegistry::with_builtins(), cache);
//!
//! let article = engine
//!     .create_model_instance_from_data(
//!         "ArticleModel",
//!         &json!({"id": 1001, "tags": [{"id": 6001, "name": "beach"}]}),
//!     )
//!     .unwrap();
//!
//! let tags = article.get("tags").and_then(|v| v.as_sequence()).unwrap();
//! assert_eq!(tags.len(), 1);
//! assert_eq!(tags[0].as_object().unwrap().get("name").and_then(|v| v.as_str()), Some("beach"));
//! ```

mod compile;
mod hydrate;
mod metadata;
mod primitive;
mod types;
mod value;

pub use compile::{CompileError, SchemaCache, compile};
pub use hydrate::{Engine, HydrationError};
pub use metadata::{MetadataReader, TypeDiscovery};
pub use primitive::{BooleanType, NumberType, PrimitiveType, RegistryError, StringType, TypeRegistry};
pub use types::{ModelSchema, PropertyDescriptor, TargetShape};
pub use value::{ModelObject, ModelValue};
