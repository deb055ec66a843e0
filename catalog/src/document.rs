//! File-backed catalog documents.
//!
//! A catalog document declares model metadata in JSON or YAML and converts
//! into a [`ModelCatalog`]. Property declarations reuse the core schema
//! types directly, so a document round-trips losslessly through serde.
//!
//! ```yaml
//! version: "1.0.0"
//! models:
//!   app.TagModel:
//!     - name: id
//!       required: true
//!       shape: { primitive: number }
//!     - name: name
//!       required: true
//!       shape: { primitive: string }
//!   app.EmptyModel: []
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use model_hydrator_core::PropertyDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::table::ModelCatalog;

/// Serializable declaration of a model catalog.
///
/// # Examples
///
/// ```
/// use model_hydrator_catalog::CatalogDocument;
///
/// let doc = CatalogDocument::from_json_str(r#"{
///     "models": {
///         "app.TagModel": [
///             {"name": "id", "required": true, "shape": {"primitive": "number"}}
///         ]
///     }
/// }"#).unwrap();
///
/// let catalog = doc.into_catalog();
/// assert!(catalog.contains("app.TagModel"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Optional document format version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Model declarations keyed by type identifier.
    pub models: BTreeMap<String, Vec<PropertyDescriptor>>,
}

impl CatalogDocument {
    /// Parses a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a document from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads a document from disk, dispatching on the file extension
    /// (`.json`, `.yaml`, or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedExtension`] for any other
    /// extension, [`CatalogError::Io`] if the file cannot be read, and a
    /// format error if parsing fails.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let document = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            _ => return Err(CatalogError::UnsupportedExtension(path.to_path_buf())),
        };
        debug!(
            path = %path.display(),
            models = document.models.len(),
            "loaded catalog document"
        );
        Ok(document)
    }

    /// Converts the document into an in-memory catalog.
    pub fn into_catalog(self) -> ModelCatalog {
        let mut catalog = ModelCatalog::new();
        for (type_id, properties) in self.models {
            catalog.insert(type_id, properties);
        }
        catalog
    }
}
