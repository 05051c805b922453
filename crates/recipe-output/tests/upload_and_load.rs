//! Integration tests for the upload → load path.

use recipe_model::{IngredientRow, RecipeRow, RowSets, StepRow, TableKind};
use recipe_output::{
    DatasetRef, LocalBucket, LocalWarehouse, ObjectStore, Warehouse, load_all, plan_loads,
    upload_extract,
};
use recipe_report::encode_row_sets;

fn rows() -> RowSets {
    RowSets {
        recipes: vec![RecipeRow {
            recipe_id: "rec_1".to_string(),
            title: "Soup".to_string(),
            author_id: "u1".to_string(),
            prep_time_minutes: "35".to_string(),
            difficulty: "Medium".to_string(),
            created_at: "2025-01-15T12:00:00Z".to_string(),
        }],
        ingredients: vec![
            IngredientRow {
                recipe_id: "rec_1".to_string(),
                name: "Water".to_string(),
                quantity: "250".to_string(),
                unit: "ml".to_string(),
            },
            IngredientRow {
                recipe_id: "rec_1".to_string(),
                name: "Salt".to_string(),
                quantity: "0.5".to_string(),
                unit: "tbsp".to_string(),
            },
        ],
        steps: vec![StepRow {
            recipe_id: "rec_1".to_string(),
            step_number: 1,
            instruction: "Boil, then season".to_string(),
        }],
        ..RowSets::default()
    }
}

#[test]
fn uploaded_extract_loads_into_every_table() {
    let dir = tempfile::tempdir().unwrap();
    let bucket = LocalBucket::open(&dir.path().join("bucket"), "recipes").unwrap();
    let warehouse = LocalWarehouse::open(
        &dir.path().join("warehouse"),
        DatasetRef::new("local", "recipe_analytics"),
    )
    .unwrap();

    let tables = encode_row_sets(&rows()).unwrap();
    upload_extract(&bucket, &tables).unwrap();
    bucket.put("backups/notes.txt", b"ignore me", "text/plain").unwrap();

    let keys = bucket.list("").unwrap();
    let targets = plan_loads(keys.iter().map(String::as_str), warehouse.dataset());
    assert_eq!(targets.len(), TableKind::ALL.len());

    let loaded = load_all(&bucket, &warehouse, &targets).unwrap();
    let recipes = loaded
        .iter()
        .find(|table| table.table_id == "local.recipe_analytics.recipes")
        .unwrap();
    assert_eq!(recipes.rows, 1);
    let ingredients = loaded
        .iter()
        .find(|table| table.table_id.ends_with(".ingredients"))
        .unwrap();
    assert_eq!(ingredients.rows, 2);

    for kind in TableKind::ALL {
        assert!(warehouse.table_path(kind.table_name()).is_file(), "{kind}");
    }
    let steps = std::fs::read_to_string(warehouse.table_path("steps")).unwrap();
    assert!(steps.contains("\"Boil, then season\""));
}

#[test]
fn load_fails_on_missing_object() {
    let dir = tempfile::tempdir().unwrap();
    let bucket = LocalBucket::open(dir.path(), "empty").unwrap();
    let warehouse = LocalWarehouse::open(dir.path(), DatasetRef::new("p", "d")).unwrap();
    let targets = plan_loads(["backups/users.csv"], warehouse.dataset());
    assert!(load_all(&bucket, &warehouse, &targets).is_err());
}
