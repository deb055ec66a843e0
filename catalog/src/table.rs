//! In-memory model catalogs.

use std::collections::{BTreeMap, BTreeSet};

use model_hydrator_core::{MetadataReader, ModelSchema, PropertyDescriptor, TypeDiscovery};

/// Descriptor table mapping model type identifiers to their property
/// declarations.
///
/// A catalog is both collaborators the engine needs: it implements
/// [`TypeDiscovery`] (identifiers filtered by namespace prefix) and
/// [`MetadataReader`] (per-type property lists). Build one with
/// [`with_model`](ModelCatalog::with_model), load it from a file via
/// [`CatalogDocument`](crate::CatalogDocument), or merge several with
/// [`extend`](ModelCatalog::extend).
///
/// # Examples
///
/// ```
/// use model_hydrator_core::{ModelSchema, PropertyDescriptor, TargetShape, TypeDiscovery};
/// use model_hydrator_catalog::ModelCatalog;
///
/// let catalog = ModelCatalog::new()
///     .with_model(
///         ModelSchema::new("app.TagModel")
///             .with_property(PropertyDescriptor::required("id", TargetShape::primitive("number"))),
///     )
///     .with_model(ModelSchema::new("other.EmptyModel"));
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.discover("app.").len(), 1);
/// assert_eq!(catalog.discover("").len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: BTreeMap<String, Vec<PropertyDescriptor>>,
}

impl ModelCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a model declaration.
    pub fn with_model(mut self, schema: ModelSchema) -> Self {
        self.models.insert(schema.type_id, schema.properties);
        self
    }

    /// Adds all declarations from another catalog, later entries winning
    /// on identifier collisions.
    pub fn extend(&mut self, other: ModelCatalog) {
        self.models.extend(other.models);
    }

    /// Returns `true` if the catalog declares the identifier.
    pub fn contains(&self, type_id: &str) -> bool {
        self.models.contains_key(type_id)
    }

    /// Number of declared models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if no models are declared.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterates declared identifiers in sorted order.
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, type_id: String, properties: Vec<PropertyDescriptor>) {
        self.models.insert(type_id, properties);
    }
}

impl TypeDiscovery for ModelCatalog {
    /// Treats `location` as a namespace prefix over type identifiers; an
    /// empty prefix yields every declared identifier.
    fn discover(&self, location: &str) -> BTreeSet<String> {
        self.models
            .keys()
            .filter(|id| id.starts_with(location))
            .cloned()
            .collect()
    }
}

impl MetadataReader for ModelCatalog {
    fn read_properties(&self, type_id: &str) -> Vec<PropertyDescriptor> {
        self.models.get(type_id).cloned().unwrap_or_default()
    }
}
