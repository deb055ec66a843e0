//! Loads a YAML catalog document and hydrates against it.
//!
//! Run with: `cargo run -p model-hydrator-demos --example catalog_document`

use model_hydrator_catalog::CatalogDocument;
use model_hydrator_core::{Engine, SchemaCache, TypeDiscovery, TypeRegistry, compile};
use serde_json::json;

const CATALOG_YAML: &str = r#"
version: "1.0.0"
models:
  shop.ProductModel:
    - name: sku
      required: true
      shape: { primitive: string }
    - name: price
      required: true
      shape: { primitive: number }
    - name: labels
      shape:
        array:
          model: shop.LabelModel
  shop.LabelModel:
    - name: text
      required: true
      shape: { primitive: string }
"#;

fn main() {
    let document = CatalogDocument::from_yaml_str(CATALOG_YAML).expect("catalog should parse");
    let catalog = document.into_catalog();

    let ids = catalog.discover("shop.");
    let mut cache = SchemaCache::new();
    compile(&ids, &catalog, &mut cache).expect("catalog should compile");
    let engine = Engine::new(TypeRegistry::with_builtins(), cache);

    let product = engine
        .create_model_instance_from_data(
            "shop.ProductModel",
            &json!({
                "sku": "TOW-42",
                "price": 19.95,
                "labels": [{"text": "summer"}, {"text": "beach"}],
            }),
        )
        .expect("product should hydrate");

    println!("sku:    {:?}", product.get("sku").and_then(|v| v.as_str()));
    println!(
        "labels: {:?}",
        product
            .get("labels")
            .and_then(|v| v.as_sequence())
            .map(<[_]>::len)
    );

    // Optional array property left out entirely: hydrates to null.
    let bare = engine
        .create_model_instance_from_data(
            "shop.ProductModel",
            &json!({"sku": "TOW-43", "price": 24.50}),
        )
        .expect("labels are optional");
    println!("bare labels null: {}", bare.get("labels").unwrap().is_null());
}
