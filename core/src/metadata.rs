//! Collaborator traits at the engine boundary.
//!
//! The engine does not discover model types or read their property
//! metadata itself; both concerns sit behind traits so hosts can plug in
//! whatever storage front they use (descriptor tables, generated code,
//! configuration files).

use std::collections::{BTreeMap, BTreeSet};

use crate::types::PropertyDescriptor;

/// Yields the set of model type identifiers available at a location.
///
/// Consumed once before compilation; the engine places no constraint on
/// how identifiers are discovered.
pub trait TypeDiscovery {
    /// Returns every known type identifier under `location`.
    fn discover(&self, location: &str) -> BTreeSet<String>;
}

/// Reads the declarative property metadata of one model type.
///
/// Invoked once per type identifier during compilation. Implementations
/// must be deterministic and side-effect-free from the engine's
/// perspective. An identifier the reader does not know yields an empty
/// descriptor list, which compiles to the empty model (a schema matching
/// any JSON object); identifiers are expected to come from a
/// [`TypeDiscovery`] source that only yields known ids.
pub trait MetadataReader {
    /// Returns the property descriptors of `type_id`, in declaration
    /// order.
    fn read_properties(&self, type_id: &str) -> Vec<PropertyDescriptor>;
}

/// A plain ordered map is already a descriptor table.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use model_hydrator_core::{MetadataReader, PropertyDescriptor, TargetShape};
///
/// let mut table = BTreeMap::new();
/// table.insert(
///     "TagModel".to_string(),
///     vec![PropertyDescriptor::required("id", TargetShape::primitive("number"))],
/// );
///
/// assert_eq!(table.read_properties("TagModel").len(), 1);
/// assert!(table.read_properties("Missing").is_empty());
/// ```
impl MetadataReader for BTreeMap<String, Vec<PropertyDescriptor>> {
    fn read_properties(&self, type_id: &str) -> Vec<PropertyDescriptor> {
        self.get(type_id).cloned().unwrap_or_default()
    }
}
