//! Schema compilation: metadata in, immutable schema cache out.
//!
//! Compilation reads property metadata for a set of model type
//! identifiers, checks referential closure and per-schema invariants, and
//! populates a [`SchemaCache`]. It performs no JSON processing; hydration
//! only starts once the cache is fully built.

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::metadata::MetadataReader;
use crate::types::ModelSchema;

/// Schema compilation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The type identifier was already compiled into this cache.
    /// Recompiling is rejected to guard against divergent schemas for the
    /// same identifier.
    #[error("model type already compiled: {0}")]
    AlreadyCompiled(String),
    /// A property's target shape references a model type that is neither
    /// in the cache nor in the set being compiled.
    #[error("property {property} of {type_id} references unresolved model type {referenced}")]
    UnresolvedTypeReference {
        /// Type whose schema holds the dangling reference.
        type_id: String,
        /// Property whose shape holds the reference.
        property: String,
        /// The identifier that could not be resolved.
        referenced: String,
    },
    /// Two properties in one schema share an attribute name.
    #[error("duplicate property {property} in model type {type_id}")]
    DuplicateProperty {
        /// Type whose metadata declared the duplicate.
        type_id: String,
        /// The repeated attribute name.
        property: String,
    },
}

/// Mapping from model type identifier to compiled schema.
///
/// Populated exclusively by [`compile`] and read-only afterwards; lookups
/// never fail for identifiers that were part of a compiled set. The cache
/// is moved into the engine at initialization, so post-compilation
/// immutability is enforced by ownership rather than convention.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    schemas: HashMap<String, ModelSchema>,
}

impl SchemaCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a compiled schema.
    pub fn get(&self, type_id: &str) -> Option<&ModelSchema> {
        self.schemas.get(type_id)
    }

    /// Returns `true` if the identifier has been compiled.
    pub fn contains(&self, type_id: &str) -> bool {
        self.schemas.contains_key(type_id)
    }

    /// Number of compiled schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates the compiled type identifiers in sorted order.
    pub fn type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn insert(&mut self, schema: ModelSchema) {
        self.schemas.insert(schema.type_id.clone(), schema);
    }
}

/// Compiles one schema per identifier in `type_ids` into `cache`.
///
/// Every model type referenced by a property shape (directly, inside an
/// array, or inside a candidate list) must already be in the cache or be
/// part of `type_ids`; schemas therefore form a closed set and hydration
/// never encounters a dangling reference. The check also means compiled
/// schema graphs are DAG-shaped from the hydrator's perspective only if
/// the metadata is; self and mutual references within one set are
/// permitted and bounded at hydration time by the input JSON depth.
///
/// Fails without modifying `cache`: validation of the whole set happens
/// before the first insertion.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use model_hydrator_core::*;
///
/// let mut reader = BTreeMap::new();
/// reader.insert(
///     "TagModel".to_string(),
///     vec![
///         PropertyDescriptor::required("id", TargetShape::primitive("number")),
///         PropertyDescriptor::required("name", TargetShape::primitive("string")),
///     ],
/// );
/// reader.insert(
///     "ArticleModel".to_string(),
///     vec![
///         PropertyDescriptor::required("id", TargetShape::primitive("number")),
///         PropertyDescriptor::required("tags", TargetShape::array(TargetShape::model("TagModel"))),
///     ],
/// );
///
/// let set: BTreeSet<String> = reader.keys().cloned().collect();
/// let mut cache = SchemaCache::new();
/// compile(&set, &reader, &mut cache).unwrap();
///
/// assert_eq!(cache.len(), 2);
/// assert!(cache.contains("ArticleModel"));
///
/// // Recompiling an identifier is rejected.
/// let err = compile(&set, &reader, &mut cache).unwrap_err();
/// assert!(matches!(err, CompileError::AlreadyCompiled(_)));
/// ```
pub fn compile(
    type_ids: &BTreeSet<String>,
    reader: &dyn MetadataReader,
    cache: &mut SchemaCache,
) -> Result<(), CompileError> {
    let mut compiled = Vec::with_capacity(type_ids.len());

    for type_id in type_ids {
        if cache.contains(type_id) {
            return Err(CompileError::AlreadyCompiled(type_id.clone()));
        }

        let properties = reader.read_properties(type_id);

        let mut seen: HashSet<&str> = HashSet::new();
        for property in &properties {
            if !seen.insert(&property.name) {
                return Err(CompileError::DuplicateProperty {
                    type_id: type_id.clone(),
                    property: property.name.clone(),
                });
            }

            for referenced in property.shape.referenced_models() {
                if !cache.contains(referenced) && !type_ids.contains(referenced) {
                    return Err(CompileError::UnresolvedTypeReference {
                        type_id: type_id.clone(),
                        property: property.name.clone(),
                        referenced: referenced.to_string(),
                    });
                }
            }
        }

        debug!(%type_id, properties = properties.len(), "compiled model schema");
        compiled.push(ModelSchema {
            type_id: type_id.clone(),
            properties,
        });
    }

    for schema in compiled {
        cache.insert(schema);
    }
    Ok(())
}
