use std::collections::HashSet;
use std::path::Path;

const KINDS: [&str; 3] = ["gearbox", "coupling", "standby_pump"];

const NUMERIC_FIELDS: [&str; 12] = [
    "capacity",
    "ratio",
    "torque",
    "max_speed",
    "flow",
    "pressure",
    "power",
    "weight",
    "base_price",
    "discount_rate",
    "factory_price",
    "market_price",
];

fn main() {
    let catalog_path = Path::new("catalogs/marine_equipment.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    for field in ["version", "created_at"] {
        assert!(
            catalog.get(field).is_some_and(serde_json::Value::is_string),
            "\n\nCATALOG BUILD ERROR: Missing '{field}' string field\n"
        );
    }

    let items = catalog.get("items").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'items' field\n\
             The catalog must have a top-level 'items' array.\n"
        );
    });

    let items = items.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'items' must be an array\n\
             Got: {items}\n"
        );
    });

    validate_items(items);

    println!("cargo:warning=Validated catalog: {} items", items.len());
}

fn validate_items(items: &[serde_json::Value]) {
    let mut seen = HashSet::new();

    for (i, item) in items.iter().enumerate() {
        let model = item
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Item at index {i} missing 'model' string\n")
            });
        assert!(
            !model.trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Item at index {i} has an empty model\n"
        );

        let kind = item.get("kind").and_then(|v| v.as_str()).unwrap_or("<missing>");
        assert!(
            KINDS.contains(&kind),
            "\n\nCATALOG BUILD ERROR: Item '{model}' (index {i}) has unknown kind '{kind}'\n\
             Expected one of: {}\n",
            KINDS.join(", ")
        );

        validate_numeric_fields(item, model);

        let key: String = model
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        assert!(
            seen.insert((kind.to_string(), key)),
            "\n\nCATALOG BUILD ERROR: Duplicate {kind} '{model}' (index {i})\n"
        );
    }
}

fn validate_numeric_fields(item: &serde_json::Value, model: &str) {
    for field in NUMERIC_FIELDS {
        if let Some(value) = item.get(field) {
            let number = value.as_f64().unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Item '{model}' field '{field}' is not a number\n")
            });
            assert!(
                number >= 0.0,
                "\n\nCATALOG BUILD ERROR: Item '{model}' field '{field}' is negative\n"
            );
        }
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/marine_equipment.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
