use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/conditions.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the condition catalog before building.\n",
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

    let conditions = catalog.get("conditions").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'conditions' field\n\
             The catalog must have a top-level 'conditions' array.\n"
        );
    });

    let entries = conditions.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'conditions' must be an array\n\
             Got: {conditions}\n"
        );
    });

    assert!(
        !entries.is_empty(),
        "\n\nCATALOG BUILD ERROR: 'conditions' is empty\n\
         At least one condition is required to build the matcher.\n"
    );

    for (i, entry) in entries.iter().enumerate() {
        validate_condition_fields(entry, i);
    }

    println!(
        "cargo:warning=Validated catalog: {} conditions",
        entries.len()
    );
}

fn validate_condition_fields(entry: &serde_json::Value, index: usize) {
    let name = entry
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    for field in ["name", "symptoms", "specialist", "precautions"] {
        assert!(
            entry.get(field).and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Condition '{name}' (index {index}) missing '{field}' field\n"
        );
    }

    let symptoms = entry
        .get("symptoms")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    assert!(
        !symptoms.trim().is_empty(),
        "\n\nCATALOG BUILD ERROR: Condition '{name}' (index {index}) has blank symptoms\n\
         Every condition needs at least one symptom keyword.\n"
    );
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=catalogs/conditions.json");
    println!("cargo:rerun-if-changed=build.rs");
}
