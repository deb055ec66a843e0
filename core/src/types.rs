//! Schema type definitions for model hydration.
//!
//! This module defines the declarative data model that drives hydration:
//! what shape each property expects, whether it is required, and how the
//! properties of one model type are grouped into a schema. The types are
//! designed for serialization with [`serde`] so catalogs of model
//! declarations can round-trip through JSON and YAML.

use serde::{Deserialize, Serialize};

/// Expected form of a property's value.
///
/// A target shape describes what a JSON value must look like and how it is
/// hydrated: a named primitive, a single model type, a homogeneous array,
/// or an ordered list of candidate model types resolved by structural
/// matching.
///
/// # Examples
///
/// ```
/// use model_hydrator_core::TargetShape;
///
/// let tags = TargetShape::array(TargetShape::model("TagModel"));
/// assert!(matches!(tags, TargetShape::Array(_)));
///
/// let module = TargetShape::one_of(["ArticleModel", "TagModel"]);
/// assert!(matches!(module, TargetShape::OneOf(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    /// A scalar validated and coerced by a registered primitive type
    /// (e.g. `"string"`, `"number"`).
    Primitive(String),
    /// A single model type, hydrated against its compiled schema.
    Model(String),
    /// A homogeneous array whose elements all share one target shape.
    Array(Box<TargetShape>),
    /// An ordered list of candidate model types; the first candidate whose
    /// required properties are structurally satisfied wins.
    OneOf(Vec<String>),
}

impl TargetShape {
    /// Creates a primitive shape by registry name.
    pub fn primitive(name: &str) -> Self {
        Self::Primitive(name.to_string())
    }

    /// Creates a single-model shape.
    pub fn model(type_id: &str) -> Self {
        Self::Model(type_id.to_string())
    }

    /// Creates a homogeneous array shape.
    pub fn array(element: TargetShape) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates an ordered polymorphic candidate list.
    ///
    /// Candidates are probed in the given order during hydration, so
    /// callers should list the most specific type (most required
    /// properties) first and any catch-all last.
    pub fn one_of<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(candidates.into_iter().map(Into::into).collect())
    }

    /// Collects every model type identifier this shape refers to,
    /// including identifiers nested inside arrays and candidate lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use model_hydrator_core::TargetShape;
    ///
    /// let shape = TargetShape::array(TargetShape::one_of(["ArticleModel", "TagModel"]));
    /// assert_eq!(shape.referenced_models(), vec!["ArticleModel", "TagModel"]);
    ///
    /// assert!(TargetShape::primitive("string").referenced_models().is_empty());
    /// ```
    pub fn referenced_models(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_models(&mut out);
        out
    }

    fn collect_models<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Primitive(_) => {}
            Self::Model(type_id) => out.push(type_id),
            Self::Array(element) => element.collect_models(out),
            Self::OneOf(candidates) => out.extend(candidates.iter().map(String::as_str)),
        }
    }
}

/// Declaration of one model property: name, JSON key, required flag, and
/// target shape.
///
/// Use the constructors [`required`](PropertyDescriptor::required) and
/// [`optional`](PropertyDescriptor::optional), then chain
/// [`with_json_key`](PropertyDescriptor::with_json_key) when the JSON key
/// differs from the attribute name.
///
/// # Examples
///
/// ```
/// use model_hydrator_core::{PropertyDescriptor, TargetShape};
///
/// let id = PropertyDescriptor::required("id", TargetShape::primitive("number"));
/// assert!(id.required);
/// assert_eq!(id.json_key(), "id");
///
/// let region = PropertyDescriptor::required("region_id", TargetShape::primitive("string"))
///     .with_json_key("regionId");
/// assert_eq!(region.json_key(), "regionId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Attribute name on the hydrated object.
    pub name: String,
    /// JSON key to read; `None` means the key equals `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Whether the property must be present and non-null.
    #[serde(default)]
    pub required: bool,
    /// Expected shape of the property's value.
    pub shape: TargetShape,
}

impl PropertyDescriptor {
    /// Creates a required property.
    pub fn required(name: &str, shape: TargetShape) -> Self {
        Self {
            name: name.to_string(),
            key: None,
            required: true,
            shape,
        }
    }

    /// Creates an optional property.
    ///
    /// Optional properties hydrate to a null attribute when the key is
    /// absent from the JSON object or its value is JSON null.
    pub fn optional(name: &str, shape: TargetShape) -> Self {
        Self {
            name: name.to_string(),
            key: None,
            required: false,
            shape,
        }
    }

    /// Overrides the JSON key this property reads from.
    pub fn with_json_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Returns the JSON key (explicit key if set, attribute name otherwise).
    pub fn json_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }
}

/// Compiled, ordered property rules for one model type.
///
/// One schema exists per model type identifier. Property order is the
/// declaration order from the metadata reader and is preserved through
/// hydration. A schema with zero properties (the "empty model") matches
/// any JSON object.
///
/// # Examples
///
/// ```
/// use model_hydrator_core::{ModelSchema, PropertyDescriptor, TargetShape};
///
/// let tag = ModelSchema::new("TagModel")
///     .with_property(PropertyDescriptor::required("id", TargetShape::primitive("number")))
///     .with_property(PropertyDescriptor::required("name", TargetShape::primitive("string")));
///
/// assert_eq!(tag.type_id, "TagModel");
/// assert_eq!(tag.properties.len(), 2);
/// assert!(tag.property("id").is_some());
/// assert_eq!(tag.required_properties().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Fully-qualified model type identifier.
    pub type_id: String,
    /// Property rules in declaration order.
    pub properties: Vec<PropertyDescriptor>,
}

impl ModelSchema {
    /// Creates an empty schema for the given type identifier.
    pub fn new(type_id: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            properties: Vec::new(),
        }
    }

    /// Appends a property descriptor.
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Finds a property by attribute name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Iterates the required properties, in declaration order.
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.required)
    }
}
