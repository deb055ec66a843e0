//! Primitive scalar types and the process-wide type registry.
//!
//! Primitives are the leaves of every schema: named, stateless value kinds
//! with a validate/coerce contract over raw JSON scalars. New kinds are
//! added by registering additional [`PrimitiveType`] implementations, not
//! by modifying the hydration engine.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Type registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A primitive with this name is already registered.
    #[error("duplicate primitive type name: {0}")]
    DuplicateTypeName(String),
    /// No primitive with this name is registered.
    #[error("unknown primitive type: {0}")]
    UnknownPrimitiveType(String),
}

/// Validation/coercion contract for a named scalar kind.
///
/// Implementations must be stateless; the registry shares them across all
/// hydration calls. `coerce` is only invoked on values that passed
/// `validate`.
///
/// # Examples
///
/// ```
/// use model_hydrator_core::{PrimitiveType, TypeRegistry};
/// use serde_json::{json, Value};
///
/// /// Accepts strings of the form "#rrggbb".
/// struct ColorType;
///
/// impl PrimitiveType for ColorType {
///     fn name(&self) -> &str {
///         "color"
///     }
///
///     fn validate(&self, raw: &Value) -> bool {
///         raw.as_str().is_some_and(|s| s.len() == 7 && s.starts_with('#'))
///     }
///
///     fn coerce(&self, raw: &Value) -> Value {
///         Value::from(raw.as_str().unwrap_or_default().to_lowercase())
///     }
/// }
///
/// let mut registry = TypeRegistry::with_builtins();
/// registry.register(Box::new(ColorType)).unwrap();
///
/// let color = registry.lookup("color").unwrap();
/// assert!(color.validate(&json!("#A1B2C3")));
/// assert_eq!(color.coerce(&json!("#A1B2C3")), json!("#a1b2c3"));
/// ```
pub trait PrimitiveType: Send + Sync {
    /// Unique registry name (e.g. `"string"`).
    fn name(&self) -> &str;

    /// Checks whether the raw JSON scalar is acceptable for this kind.
    fn validate(&self, raw: &Value) -> bool;

    /// Converts a validated raw scalar into its stored form.
    fn coerce(&self, raw: &Value) -> Value;
}

impl fmt::Debug for dyn PrimitiveType + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveType")
            .field("name", &self.name())
            .finish()
    }
}

/// Built-in `"string"` primitive: accepts JSON strings.
#[derive(Debug, Default)]
pub struct StringType;

impl PrimitiveType for StringType {
    fn name(&self) -> &str {
        "string"
    }

    fn validate(&self, raw: &Value) -> bool {
        raw.is_string()
    }

    fn coerce(&self, raw: &Value) -> Value {
        raw.clone()
    }
}

/// Built-in `"number"` primitive: accepts JSON numbers.
#[derive(Debug, Default)]
pub struct NumberType;

impl PrimitiveType for NumberType {
    fn name(&self) -> &str {
        "number"
    }

    fn validate(&self, raw: &Value) -> bool {
        raw.is_number()
    }

    fn coerce(&self, raw: &Value) -> Value {
        raw.clone()
    }
}

/// Built-in `"boolean"` primitive: accepts JSON booleans.
#[derive(Debug, Default)]
pub struct BooleanType;

impl PrimitiveType for BooleanType {
    fn name(&self) -> &str {
        "boolean"
    }

    fn validate(&self, raw: &Value) -> bool {
        raw.is_boolean()
    }

    fn coerce(&self, raw: &Value) -> Value {
        raw.clone()
    }
}

/// Immutable-after-construction mapping from primitive names to
/// implementations.
///
/// Built once at engine initialization and then moved into the engine, so
/// concurrent hydration calls read it without synchronization. There is no
/// runtime insertion path once the registry has been handed off.
///
/// # Examples
///
/// ```
/// use model_hydrator_core::{RegistryError, TypeRegistry};
///
/// let registry = TypeRegistry::with_builtins();
/// assert!(registry.lookup("string").is_ok());
/// assert_eq!(
///     registry.lookup("uuid").unwrap_err(),
///     RegistryError::UnknownPrimitiveType("uuid".to_string()),
/// );
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, Box<dyn PrimitiveType>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in string, number, and boolean
    /// primitives.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Fresh registry, built-in names cannot collide.
        let _ = registry.register(Box::new(StringType));
        let _ = registry.register(Box::new(NumberType));
        let _ = registry.register(Box::new(BooleanType));
        registry
    }

    /// Registers a primitive under its own name.
    ///
    /// Fails with [`RegistryError::DuplicateTypeName`] if the name is
    /// already taken.
    pub fn register(&mut self, primitive: Box<dyn PrimitiveType>) -> Result<(), RegistryError> {
        let name = primitive.name().to_string();
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateTypeName(name));
        }
        self.types.insert(name, primitive);
        Ok(())
    }

    /// Looks up a primitive by name.
    pub fn lookup(&self, name: &str) -> Result<&dyn PrimitiveType, RegistryError> {
        self.types
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| RegistryError::UnknownPrimitiveType(name.to_string()))
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
