//! The hydration engine: recursive validation and polymorphic resolution.
//!
//! The engine walks a pre-parsed JSON value tree against compiled schemas,
//! producing a caller-owned [`ModelObject`] graph or a typed error. All
//! validation is fail-fast: the first violation aborts the whole call and
//! no partial object is returned. Errors carry a rendered property path
//! (`$.payload.modules[0].id`) for diagnostics.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace};

use crate::compile::SchemaCache;
use crate::primitive::{RegistryError, TypeRegistry};
use crate::types::{ModelSchema, TargetShape};
use crate::value::{ModelObject, ModelValue};

/// Hydration errors.
///
/// Structural variants report a JSON node of the wrong kind or an unknown
/// type identifier; validation variants report required/optional and
/// primitive rule violations. Every variant names the property path at
/// which hydration stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HydrationError {
    /// The requested or referenced model type is not in the schema cache.
    #[error("unknown model type: {0}")]
    UnknownModelType(String),
    /// The JSON node kind does not match the target shape.
    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Path of the offending node.
        path: String,
        /// JSON node kind the target shape requires.
        expected: &'static str,
        /// JSON node kind actually found.
        found: &'static str,
    },
    /// A required property's key is absent from the JSON object.
    #[error("{path}: required property {property} of {type_id} is missing")]
    RequiredPropertyMissing {
        /// Path of the missing property.
        path: String,
        /// Enclosing model type identifier.
        type_id: String,
        /// Attribute name of the missing property.
        property: String,
    },
    /// A required property is present but its value is JSON null.
    #[error("{path}: required property {property} of {type_id} is null")]
    RequiredPropertyWasNull {
        /// Path of the null property.
        path: String,
        /// Enclosing model type identifier.
        type_id: String,
        /// Attribute name of the null property.
        property: String,
    },
    /// A scalar failed its primitive type's validation contract.
    #[error("{path}: value is not a valid {primitive}")]
    InvalidPrimitiveValue {
        /// Path of the invalid scalar.
        path: String,
        /// Name of the primitive type that rejected it.
        primitive: String,
    },
    /// No candidate in an ordered polymorphic list structurally matched
    /// the JSON object.
    #[error("{path}: no candidate model type matched, tried [{}]", .candidates.join(", "))]
    NoMatchingType {
        /// Path of the unresolvable object.
        path: String,
        /// Candidate identifiers, in the order they were probed.
        candidates: Vec<String>,
    },
    /// A schema referenced a primitive type name missing from the
    /// registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_object<'a>(
    raw: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, HydrationError> {
    raw.as_object().ok_or_else(|| HydrationError::TypeMismatch {
        path: path.to_string(),
        expected: "object",
        found: json_kind(raw),
    })
}

/// Hydrates JSON value trees into typed model graphs.
///
/// Owns the [`TypeRegistry`] and [`SchemaCache`] it was initialized with;
/// both are read-only from then on, so one engine can serve arbitrarily
/// many concurrent hydration calls through `&self`.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use model_hydrator_core::*;
/// use serde_json::json;
///
/// let mut reader = BTreeMap::new();
/// reader.insert(
///     "TagModel".to_string(),
///     vec![
///         PropertyDescriptor::required("id", TargetShape::primitive("number")),
///         PropertyDescriptor::required("name", TargetShape::primitive("string")),
///     ],
/// );
///
/// let mut cache = SchemaCache::new();
/// compile(&BTreeSet::from(["TagModel".to_string()]), &reader, &mut cache).unwrap();
/// let engine = Engine::new(TypeRegistry::with_builtins(), cache);
///
/// let tag = engine
///     .create_model_instance_from_data("TagModel", &json!({"id": 6001, "name": "beach"}))
///     .unwrap();
/// assert_eq!(tag.get("id").and_then(|v| v.as_i64()), Some(6001));
///
/// let err = engine
///     .create_model_instance_from_data("TagModel", &json!({"name": "beach"}))
///     .unwrap_err();
/// assert!(matches!(err, HydrationError::RequiredPropertyMissing { .. }));
/// ```
#[derive(Debug)]
pub struct Engine {
    registry: TypeRegistry,
    cache: SchemaCache,
}

impl Engine {
    /// Creates an engine over a finished registry and compiled cache.
    ///
    /// Both are moved in; there is no mutation path afterwards.
    pub fn new(registry: TypeRegistry, cache: SchemaCache) -> Self {
        Self { registry, cache }
    }

    /// The primitive type registry this engine reads.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The compiled schema cache this engine reads.
    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Hydrates a JSON object into an instance of `type_id`.
    ///
    /// The identifier must have been compiled into the cache and `data`
    /// must be a JSON object node. Properties are processed in schema
    /// declaration order; JSON keys the schema does not declare are
    /// ignored, so a schema is a superset check rather than an
    /// exact-match check.
    pub fn create_model_instance_from_data(
        &self,
        type_id: &str,
        data: &Value,
    ) -> Result<ModelObject, HydrationError> {
        let schema = self.schema(type_id)?;
        let object = expect_object(data, "$")?;
        debug!(type_id, "hydrating model instance");
        self.hydrate_object(schema, object, "$")
    }

    /// Hydrates a JSON value against an arbitrary target shape.
    ///
    /// Root entry point for non-object payloads (a bare primitive or a
    /// top-level array);
    /// [`create_model_instance_from_data`](Engine::create_model_instance_from_data)
    /// is the model-typed equivalent.
    ///
    /// # Examples
    ///
    /// ```
    /// # use model_hydrator_core::*;
    /// # use serde_json::json;
    /// # let engine = Engine::new(TypeRegistry::with_builtins(), SchemaCache::new());
    /// let shape = TargetShape::array(TargetShape::primitive("number"));
    /// let values = engine.hydrate(&shape, &json!([1, 2, 3])).unwrap();
    /// assert_eq!(values.as_sequence().map(<[_]>::len), Some(3));
    /// ```
    pub fn hydrate(
        &self,
        shape: &TargetShape,
        data: &Value,
    ) -> Result<ModelValue, HydrationError> {
        self.hydrate_shape(shape, data, "$")
    }

    fn schema(&self, type_id: &str) -> Result<&ModelSchema, HydrationError> {
        self.cache
            .get(type_id)
            .ok_or_else(|| HydrationError::UnknownModelType(type_id.to_string()))
    }

    fn hydrate_object(
        &self,
        schema: &ModelSchema,
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<ModelObject, HydrationError> {
        let mut instance = ModelObject::new(&schema.type_id);

        for property in &schema.properties {
            let key = property.json_key();
            let attr_path = format!("{path}.{key}");

            // Absent key and present-null are distinct presence states;
            // they select different errors on required properties.
            let value = match object.get(key) {
                None if property.required => {
                    return Err(HydrationError::RequiredPropertyMissing {
                        path: attr_path,
                        type_id: schema.type_id.clone(),
                        property: property.name.clone(),
                    });
                }
                Some(Value::Null) if property.required => {
                    return Err(HydrationError::RequiredPropertyWasNull {
                        path: attr_path,
                        type_id: schema.type_id.clone(),
                        property: property.name.clone(),
                    });
                }
                None | Some(Value::Null) => ModelValue::Null,
                Some(raw) => self.hydrate_shape(&property.shape, raw, &attr_path)?,
            };
            instance.push_attribute(&property.name, value);
        }

        Ok(instance)
    }

    fn hydrate_shape(
        &self,
        shape: &TargetShape,
        raw: &Value,
        path: &str,
    ) -> Result<ModelValue, HydrationError> {
        match shape {
            TargetShape::Primitive(name) => {
                let primitive = self.registry.lookup(name)?;
                if !primitive.validate(raw) {
                    return Err(HydrationError::InvalidPrimitiveValue {
                        path: path.to_string(),
                        primitive: name.clone(),
                    });
                }
                Ok(ModelValue::Scalar(primitive.coerce(raw)))
            }
            TargetShape::Model(type_id) => {
                let schema = self.schema(type_id)?;
                let object = expect_object(raw, path)?;
                Ok(ModelValue::Object(self.hydrate_object(schema, object, path)?))
            }
            TargetShape::Array(element) => {
                let Some(items) = raw.as_array() else {
                    return Err(HydrationError::TypeMismatch {
                        path: path.to_string(),
                        expected: "array",
                        found: json_kind(raw),
                    });
                };
                let mut hydrated = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let element_path = format!("{path}[{index}]");
                    hydrated.push(self.hydrate_shape(element, item, &element_path)?);
                }
                Ok(ModelValue::Sequence(hydrated))
            }
            TargetShape::OneOf(candidates) => {
                let object = expect_object(raw, path)?;
                let schema = self.resolve_candidate(candidates, object, path)?;
                Ok(ModelValue::Object(self.hydrate_object(schema, object, path)?))
            }
        }
    }

    /// Probes candidates in declared order and returns the first whose
    /// required properties are structurally satisfied. No specificity
    /// ranking happens here; declaration order is the tie-break.
    fn resolve_candidate(
        &self,
        candidates: &[String],
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<&ModelSchema, HydrationError> {
        for candidate in candidates {
            let schema = self.schema(candidate)?;
            if self.matches_structurally(schema, object) {
                trace!(path, %candidate, "resolved polymorphic candidate");
                return Ok(schema);
            }
        }
        Err(HydrationError::NoMatchingType {
            path: path.to_string(),
            candidates: candidates.to_vec(),
        })
    }

    /// One-level structural probe: every required property of the
    /// candidate must be present with a non-null, shape-compatible value.
    /// A candidate without required properties matches any object.
    fn matches_structurally(&self, schema: &ModelSchema, object: &Map<String, Value>) -> bool {
        schema
            .required_properties()
            .all(|property| match object.get(property.json_key()) {
                None | Some(Value::Null) => false,
                Some(value) => self.shape_compatible(&property.shape, value),
            })
    }

    /// Shallow shape compatibility used by the probe. Primitives delegate
    /// to the registered validator; everything else is a node-kind check,
    /// without recursing into nested schemas.
    fn shape_compatible(&self, shape: &TargetShape, value: &Value) -> bool {
        match shape {
            TargetShape::Primitive(name) => self
                .registry
                .lookup(name)
                .is_ok_and(|primitive| primitive.validate(value)),
            TargetShape::Model(_) | TargetShape::OneOf(_) => value.is_object(),
            TargetShape::Array(_) => value.is_array(),
        }
    }
}
