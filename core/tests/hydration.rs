//! End-to-end hydration of a nested, polymorphic response payload.
//!
//! Exercises the full pipeline over a realistic API response: a response
//! envelope containing a payload whose `modules` array mixes article,
//! tag, and catch-all module types resolved by ordered structural
//! matching.

use std::collections::{BTreeMap, BTreeSet};

use model_hydrator_core::{
    Engine, HydrationError, ModelValue, PropertyDescriptor, SchemaCache, TargetShape,
    TypeRegistry, compile,
};
use serde_json::json;

/// Metadata for the response model family.
fn response_reader() -> BTreeMap<String, Vec<PropertyDescriptor>> {
    let mut reader = BTreeMap::new();
    reader.insert(
        "TagModel".to_string(),
        vec![
            PropertyDescriptor::required("id", TargetShape::primitive("number")),
            PropertyDescriptor::required("name", TargetShape::primitive("string")),
        ],
    );
    reader.insert(
        "ArticleModel".to_string(),
        vec![
            PropertyDescriptor::required("id", TargetShape::primitive("number")),
            PropertyDescriptor::required("region_id", TargetShape::primitive("string"))
                .with_json_key("regionId"),
            PropertyDescriptor::required("tags", TargetShape::array(TargetShape::model("TagModel"))),
        ],
    );
    // Zero required properties: matches any object, so it must stay last
    // in the candidate list.
    reader.insert("EmptyModel".to_string(), Vec::new());
    reader.insert(
        "PayloadModel".to_string(),
        vec![PropertyDescriptor::required(
            "modules",
            TargetShape::array(TargetShape::one_of([
                "ArticleModel",
                "TagModel",
                "EmptyModel",
            ])),
        )],
    );
    reader.insert(
        "ResponseModel".to_string(),
        vec![
            PropertyDescriptor::required("status", TargetShape::primitive("number")),
            PropertyDescriptor::required("message", TargetShape::primitive("string")),
            PropertyDescriptor::required("payload", TargetShape::model("PayloadModel")),
        ],
    );
    reader
}

fn response_engine() -> Engine {
    let reader = response_reader();
    let set: BTreeSet<String> = reader.keys().cloned().collect();
    let mut cache = SchemaCache::new();
    compile(&set, &reader, &mut cache).expect("response metadata should compile");
    Engine::new(TypeRegistry::with_builtins(), cache)
}

fn article(id: i64, region_id: &str, tags: serde_json::Value) -> serde_json::Value {
    json!({"id": id, "regionId": region_id, "tags": tags})
}

#[test]
fn test_hydrates_tag_model() {
    let engine = response_engine();
    let tag = engine
        .create_model_instance_from_data("TagModel", &json!({"id": 6001, "name": "beach"}))
        .unwrap();

    assert_eq!(tag.get("id").and_then(ModelValue::as_i64), Some(6001));
    assert_eq!(tag.get("name").and_then(ModelValue::as_str), Some("beach"));
}

#[test]
fn test_hydrates_nested_response() {
    let engine = response_engine();
    let response = engine
        .create_model_instance_from_data(
            "ResponseModel",
            &json!({
                "status": 200,
                "message": "OK",
                "payload": {
                    "modules": [
                        article(1001, "2001", json!([{"id": 6001, "name": "beach"}])),
                    ],
                },
            }),
        )
        .unwrap();

    assert_eq!(response.get("status").and_then(ModelValue::as_i64), Some(200));
    assert_eq!(response.get("message").and_then(ModelValue::as_str), Some("OK"));

    let payload = response.get("payload").and_then(ModelValue::as_object).unwrap();
    let modules = payload.get("modules").and_then(ModelValue::as_sequence).unwrap();
    assert_eq!(modules.len(), 1);

    let module = modules[0].as_object().unwrap();
    assert_eq!(module.type_id(), "ArticleModel");
    assert_eq!(module.get("id").and_then(ModelValue::as_i64), Some(1001));
    assert_eq!(
        module.get("region_id").and_then(ModelValue::as_str),
        Some("2001"),
    );

    let tags = module.get("tags").and_then(ModelValue::as_sequence).unwrap();
    assert_eq!(tags.len(), 1);
    let tag = tags[0].as_object().unwrap();
    assert_eq!(tag.get("id").and_then(ModelValue::as_i64), Some(6001));
    assert_eq!(tag.get("name").and_then(ModelValue::as_str), Some("beach"));
}

#[test]
fn test_empty_tags_array_hydrates_to_empty_sequence() {
    let engine = response_engine();
    let module = engine
        .create_model_instance_from_data("ArticleModel", &article(1001, "2001", json!([])))
        .unwrap();

    let tags = module.get("tags").and_then(ModelValue::as_sequence).unwrap();
    assert!(tags.is_empty());
}

#[test]
fn test_tags_preserve_input_order() {
    let engine = response_engine();
    let module = engine
        .create_model_instance_from_data(
            "ArticleModel",
            &article(
                1001,
                "2001",
                json!([
                    {"id": 6001, "name": "beach"},
                    {"id": 6002, "name": "summer"},
                    {"id": 6017, "name": "colorful"},
                ]),
            ),
        )
        .unwrap();

    let tags = module.get("tags").and_then(ModelValue::as_sequence).unwrap();
    let names: Vec<&str> = tags
        .iter()
        .map(|t| t.as_object().unwrap().get("name").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["beach", "summer", "colorful"]);
}

#[test]
fn test_mixed_modules_resolve_in_declared_candidate_order() {
    let engine = response_engine();
    let payload = engine
        .create_model_instance_from_data(
            "PayloadModel",
            &json!({
                "modules": [
                    article(1001, "2001", json!([])),
                    {"id": 6001, "name": "beach"},
                    {"id": 6002, "name": "summer"},
                ],
            }),
        )
        .unwrap();

    let modules = payload.get("modules").and_then(ModelValue::as_sequence).unwrap();
    let type_ids: Vec<&str> = modules
        .iter()
        .map(|m| m.as_object().unwrap().type_id())
        .collect();
    assert_eq!(type_ids, vec!["ArticleModel", "TagModel", "TagModel"]);
}

#[test]
fn test_empty_object_falls_through_to_catch_all_candidate() {
    let engine = response_engine();
    let payload = engine
        .create_model_instance_from_data("PayloadModel", &json!({"modules": [{}]}))
        .unwrap();

    let modules = payload.get("modules").and_then(ModelValue::as_sequence).unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].as_object().unwrap().type_id(), "EmptyModel");
}

#[test]
fn test_no_matching_candidate_reports_the_list_tried() {
    // Same family but without the catch-all in the candidate list.
    let mut reader = response_reader();
    reader.insert(
        "StrictPayloadModel".to_string(),
        vec![PropertyDescriptor::required(
            "modules",
            TargetShape::array(TargetShape::one_of(["ArticleModel", "TagModel"])),
        )],
    );
    let set: BTreeSet<String> = reader.keys().cloned().collect();
    let mut cache = SchemaCache::new();
    compile(&set, &reader, &mut cache).unwrap();
    let engine = Engine::new(TypeRegistry::with_builtins(), cache);

    let err = engine
        .create_model_instance_from_data("StrictPayloadModel", &json!({"modules": [{}]}))
        .unwrap_err();
    assert_eq!(
        err,
        HydrationError::NoMatchingType {
            path: "$.modules[0]".to_string(),
            candidates: vec!["ArticleModel".to_string(), "TagModel".to_string()],
        }
    );
}

#[test]
fn test_missing_and_null_required_id_select_different_errors() {
    let engine = response_engine();

    let err = engine
        .create_model_instance_from_data(
            "ArticleModel",
            &json!({"regionId": "2001", "tags": []}),
        )
        .unwrap_err();
    assert_eq!(
        err,
        HydrationError::RequiredPropertyMissing {
            path: "$.id".to_string(),
            type_id: "ArticleModel".to_string(),
            property: "id".to_string(),
        }
    );

    let err = engine
        .create_model_instance_from_data(
            "ArticleModel",
            &json!({"id": null, "regionId": "2001", "tags": []}),
        )
        .unwrap_err();
    assert_eq!(
        err,
        HydrationError::RequiredPropertyWasNull {
            path: "$.id".to_string(),
            type_id: "ArticleModel".to_string(),
            property: "id".to_string(),
        }
    );
}

#[test]
fn test_probe_checks_shape_not_just_presence() {
    // An object with the article keys but wrong kinds must not resolve
    // to ArticleModel; with id/name as a valid tag pair it falls through
    // to TagModel, otherwise to the catch-all.
    let engine = response_engine();
    let payload = engine
        .create_model_instance_from_data(
            "PayloadModel",
            &json!({
                "modules": [
                    // regionId is a number and tags is an object: not an article.
                    {"id": 1, "regionId": 2001, "tags": {}, "name": "beach"},
                ],
            }),
        )
        .unwrap();

    let modules = payload.get("modules").and_then(ModelValue::as_sequence).unwrap();
    assert_eq!(modules[0].as_object().unwrap().type_id(), "TagModel");
}

#[test]
fn test_nested_failure_carries_full_property_path() {
    let engine = response_engine();
    let err = engine
        .create_model_instance_from_data(
            "ResponseModel",
            &json!({
                "status": 200,
                "message": "OK",
                "payload": {
                    "modules": [
                        article(1001, "2001", json!([{"id": 6001, "name": "beach"}, {"id": "bad", "name": "x"}])),
                    ],
                },
            }),
        )
        .unwrap_err();

    assert_eq!(
        err,
        HydrationError::InvalidPrimitiveValue {
            path: "$.payload.modules[0].tags[1].id".to_string(),
            primitive: "number".to_string(),
        }
    );
}
