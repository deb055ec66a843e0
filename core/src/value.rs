//! Hydrated values: the typed object graph produced by the engine.

use serde_json::Value;

/// A hydrated value node.
///
/// `Null` covers both "key absent" and "key present with JSON null" for
/// optional properties; the distinction only matters for error
/// classification on required properties, which never produce `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValue {
    /// Optional property that was absent or null.
    Null,
    /// Coerced primitive scalar.
    Scalar(Value),
    /// Hydrated model instance.
    Object(ModelObject),
    /// Hydrated array, element order preserved from the input.
    Sequence(Vec<ModelValue>),
}

impl ModelValue {
    /// Returns `true` for the null (absent/optional) value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the scalar if this is a primitive value.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the object if this is a hydrated model instance.
    pub fn as_object(&self) -> Option<&ModelObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the elements if this is a hydrated array.
    pub fn as_sequence(&self) -> Option<&[ModelValue]> {
        match self {
            Self::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    /// Shortcut for string scalars.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }

    /// Shortcut for integer scalars.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Value::as_i64)
    }
}

/// An instantiated model: a type identifier plus attributes in schema
/// declaration order.
///
/// Ownership is exclusive to the caller that receives the object from the
/// engine; it holds no reference back to the schema or the JSON source.
/// Every declared property has an attribute entry, with optional
/// absent/null properties stored as [`ModelValue::Null`].
///
/// # Examples
///
/// ```
/// # use model_hydrator_core::*;
/// # use std::collections::{BTreeMap, BTreeSet};
/// # use serde_json::json;
/// # let mut reader = BTreeMap::new();
/// # reader.insert("TagModel".to_string(), vec![
/// #     PropertyDescriptor::required("id", TargetShape::primitive("number")),
/// #     PropertyDescriptor::required("name", TargetShape::primitive("string")),
/// # ]);
/// # let mut cache = SchemaCache::default();
/// # compile(&BTreeSet::from(["TagModel".to_string()]), &reader, &mut cache).unwrap();
/// # let engine = Engine::new(TypeRegistry::with_builtins(), cache);
/// let tag = engine
///     .create_model_instance_from_data("TagModel", &json!({"id": 6001, "name": "beach"}))
///     .unwrap();
///
/// assert_eq!(tag.type_id(), "TagModel");
/// assert_eq!(tag.get("id").and_then(|v| v.as_i64()), Some(6001));
/// assert_eq!(tag.get("name").and_then(|v| v.as_str()), Some("beach"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelObject {
    type_id: String,
    attributes: Vec<(String, ModelValue)>,
}

impl ModelObject {
    pub(crate) fn new(type_id: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn push_attribute(&mut self, name: &str, value: ModelValue) {
        self.attributes.push((name.to_string(), value));
    }

    /// The model type identifier this object was hydrated as.
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Looks up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&ModelValue> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }

    /// Iterates attributes in schema declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &ModelValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of declared attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` for the empty model (zero declared properties).
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_value_accessors() {
        assert!(ModelValue::Null.is_null());
        assert_eq!(ModelValue::Scalar(json!("beach")).as_str(), Some("beach"));
        assert_eq!(ModelValue::Scalar(json!(6001)).as_i64(), Some(6001));
        assert!(ModelValue::Scalar(json!("beach")).as_sequence().is_none());

        let seq = ModelValue::Sequence(vec![ModelValue::Null]);
        assert_eq!(seq.as_sequence().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_model_object_preserves_attribute_order() {
        let mut object = ModelObject::new("TagModel");
        object.push_attribute("id", ModelValue::Scalar(json!(6001)));
        object.push_attribute("name", ModelValue::Scalar(json!("beach")));

        let names: Vec<&str> = object.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(object.len(), 2);
        assert_eq!(object.get("name").and_then(ModelValue::as_str), Some("beach"));
        assert!(object.get("missing").is_none());
    }
}
