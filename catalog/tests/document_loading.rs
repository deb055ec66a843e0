//! Loading catalog documents from disk and driving the engine with them.

use std::fs;

use model_hydrator_catalog::{CatalogDocument, CatalogError};
use model_hydrator_core::{Engine, ModelValue, SchemaCache, TypeDiscovery, TypeRegistry, compile};
use serde_json::json;

const RESPONSE_CATALOG_JSON: &str = r#"{
    "version": "1.0.0",
    "models": {
        "app.TagModel": [
            {"name": "id", "required": true, "shape": {"primitive": "number"}},
            {"name": "name", "required": true, "shape": {"primitive": "string"}}
        ],
        "app.ArticleModel": [
            {"name": "id", "required": true, "shape": {"primitive": "number"}},
            {"name": "region_id", "key": "regionId", "required": true,
             "shape": {"primitive": "string"}},
            {"name": "tags", "required": true, "shape": {"array": {"model": "app.TagModel"}}}
        ],
        "app.EmptyModel": [],
        "app.PayloadModel": [
            {"name": "modules", "required": true,
             "shape": {"array": {"one_of": ["app.ArticleModel", "app.TagModel", "app.EmptyModel"]}}}
        ]
    }
}"#;

#[test]
fn test_json_file_to_hydrated_modules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models.json");
    fs::write(&path, RESPONSE_CATALOG_JSON).unwrap();

    let catalog = CatalogDocument::from_path(&path).unwrap().into_catalog();
    let ids = catalog.discover("app.");
    assert_eq!(ids.len(), 4);

    let mut cache = SchemaCache::new();
    compile(&ids, &catalog, &mut cache).unwrap();
    let engine = Engine::new(TypeRegistry::with_builtins(), cache);

    let payload = engine
        .create_model_instance_from_data(
            "app.PayloadModel",
            &json!({
                "modules": [
                    {"id": 1001, "regionId": "2001", "tags": [{"id": 6001, "name": "beach"}]},
                    {"id": 6002, "name": "summer"},
                    {},
                ],
            }),
        )
        .unwrap();

    let modules = payload.get("modules").and_then(ModelValue::as_sequence).unwrap();
    let type_ids: Vec<&str> = modules
        .iter()
        .map(|m| m.as_object().unwrap().type_id())
        .collect();
    assert_eq!(
        type_ids,
        vec!["app.ArticleModel", "app.TagModel", "app.EmptyModel"],
    );
}

#[test]
fn test_yaml_file_round_trip() {
    let yaml = "\
version: \"1.0.0\"
models:
  app.TagModel:
    - name: id
      required: true
      shape: { primitive: number }
    - name: name
      required: true
      shape: { primitive: string }
";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models.yaml");
    fs::write(&path, yaml).unwrap();

    let catalog = CatalogDocument::from_path(&path).unwrap().into_catalog();
    assert!(catalog.contains("app.TagModel"));

    let ids = catalog.discover("");
    let mut cache = SchemaCache::new();
    compile(&ids, &catalog, &mut cache).unwrap();
    let engine = Engine::new(TypeRegistry::with_builtins(), cache);

    let tag = engine
        .create_model_instance_from_data("app.TagModel", &json!({"id": 6001, "name": "beach"}))
        .unwrap();
    assert_eq!(tag.get("id").and_then(ModelValue::as_i64), Some(6001));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models.toml");
    fs::write(&path, "models = {}").unwrap();

    let err = CatalogDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedExtension(_)));
}

#[test]
fn test_invalid_json_surfaces_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models.json");
    fs::write(&path, "{ not json").unwrap();

    let err = CatalogDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}
