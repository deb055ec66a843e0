//! Declarative model catalogs for the hydration engine.
//!
//! This crate is the storage front for model metadata:
//!
//! - [`ModelCatalog`] — an in-memory descriptor table implementing both
//!   engine collaborator traits ([`TypeDiscovery`] and [`MetadataReader`]).
//! - [`CatalogDocument`] — JSON/YAML declarations loadable from disk.
//!
//! # Example
//!
//! ```
//! use model_hydrator_core::*;
//! use model_hydrator_catalog::ModelCatalog;
//!
//! let catalog = ModelCatalog::new()
//!     .with_model(
//!         ModelSchema::new("app.TagModel")
//!             .with_property(PropertyDescriptor::required("id", TargetShape::primitive("number")))
//!             .with_property(PropertyDescriptor::required("name", TargetShape::primitive("string"))),
//!     );
//!
//! let ids = catalog.discover("app.");
//! let mut cache = SchemaCache::new();
//! compile(&ids, &catalog, &mut cache).unwrap();
//! let engine = Engine::new(TypeRegistry::with_builtins(), cache);
//!
//! let tag = engine
//!     .create_model_instance_from_data("app.TagModel", &serde_json::json!({"id": 6001, "name": "beach"}))
//!     .unwrap();
//! assert_eq!(tag.get("name").and_then(|v| v.as_str()), Some("beach"));
//! ```
//!
//! [`TypeDiscovery`]: model_hydrator_core::TypeDiscovery
//! [`MetadataReader`]: model_hydrator_core::MetadataReader

mod document;
mod error;
mod table;

pub use document::CatalogDocument;
pub use error::{CatalogError, Result};
pub use table::ModelCatalog;
