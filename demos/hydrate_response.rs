//! Hydrates a polymorphic API response against an in-code catalog.
//!
//! Run with: `cargo run -p model-hydrator-demos --example hydrate_response`

use model_hydrator_catalog::ModelCatalog;
use model_hydrator_core::{
    Engine, ModelObject, ModelSchema, ModelValue, PropertyDescriptor, SchemaCache, TargetShape,
    TypeDiscovery, TypeRegistry, compile,
};
use serde_json::json;

fn catalog() -> ModelCatalog {
    ModelCatalog::new()
        .with_model(
            ModelSchema::new("demo.TagModel")
                .with_property(PropertyDescriptor::required(
                    "id",
                    TargetShape::primitive("number"),
                ))
                .with_property(PropertyDescriptor::required(
                    "name",
                    TargetShape::primitive("string"),
                )),
        )
        .with_model(
            ModelSchema::new("demo.ArticleModel")
                .with_property(PropertyDescriptor::required(
                    "id",
                    TargetShape::primitive("number"),
                ))
                .with_property(
                    PropertyDescriptor::required("region_id", TargetShape::primitive("string"))
                        .with_json_key("regionId"),
                )
                .with_property(PropertyDescriptor::required(
                    "tags",
                    TargetShape::array(TargetShape::model("demo.TagModel")),
                )),
        )
        .with_model(ModelSchema::new("demo.EmptyModel"))
        .with_model(
            ModelSchema::new("demo.PayloadModel").with_property(PropertyDescriptor::required(
                "modules",
                TargetShape::array(TargetShape::one_of([
                    "demo.ArticleModel",
                    "demo.TagModel",
                    "demo.EmptyModel",
                ])),
            )),
        )
        .with_model(
            ModelSchema::new("demo.ResponseModel")
                .with_property(PropertyDescriptor::required(
                    "status",
                    TargetShape::primitive("number"),
                ))
                .with_property(PropertyDescriptor::required(
                    "message",
                    TargetShape::primitive("string"),
                ))
                .with_property(PropertyDescriptor::required(
                    "payload",
                    TargetShape::model("demo.PayloadModel"),
                )),
        )
}

fn print_object(object: &ModelObject, indent: usize) {
    let pad = "  ".repeat(indent);
    println!("{pad}{} {{", object.type_id());
    for (name, value) in object.attributes() {
        match value {
            ModelValue::Null => println!("{pad}  {name}: null"),
            ModelValue::Scalar(scalar) => println!("{pad}  {name}: {scalar}"),
            ModelValue::Object(nested) => {
                println!("{pad}  {name}:");
                print_object(nested, indent + 2);
            }
            ModelValue::Sequence(elements) => {
                println!("{pad}  {name}: [{} elements]", elements.len());
                for element in elements {
                    if let Some(nested) = element.as_object() {
                        print_object(nested, indent + 2);
                    }
                }
            }
        }
    }
    println!("{pad}}}");
}

fn main() {
    let catalog = catalog();
    let ids = catalog.discover("demo.");

    let mut cache = SchemaCache::new();
    compile(&ids, &catalog, &mut cache).expect("demo catalog should compile");
    let engine = Engine::new(TypeRegistry::with_builtins(), cache);

    let response = json!({
        "status": 200,
        "message": "OK",
        "payload": {
            "modules": [
                {
                    "id": 1001,
                    "regionId": "2001",
                    "tags": [
                        {"id": 6001, "name": "beach"},
                        {"id": 6002, "name": "summer"},
                    ],
                },
                {"id": 6017, "name": "colorful"},
                {},
            ],
        },
    });

    match engine.create_model_instance_from_data("demo.ResponseModel", &response) {
        Ok(instance) => print_object(&instance, 0),
        Err(err) => eprintln!("hydration failed: {err}"),
    }

    // A broken payload shows the fail-fast error with its property path.
    let broken = json!({
        "status": 200,
        "message": "OK",
        "payload": {"modules": [{"id": 1001, "regionId": "2001", "tags": [{"id": null, "name": "beach"}]}]},
    });
    if let Err(err) = engine.create_model_instance_from_data("demo.ResponseModel", &broken) {
        println!("\nexpected failure: {err}");
    }
}
