//! Integration tests for the validation report encoding.

use chrono::NaiveDate;

use recipe_model::{IngredientRow, InteractionRow, RecipeRow, RowSets, StepRow, UserRow};
use recipe_report::{encode_validation_report, write_validation_report};
use recipe_validate::{ValidationReport, validate};

fn report() -> ValidationReport {
    let rows = RowSets {
        users: vec![
            UserRow {
                user_id: "u1".to_string(),
                username: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                created_at: String::new(),
            },
            UserRow {
                user_id: "u2".to_string(),
                username: String::new(),
                email: "broken".to_string(),
                created_at: String::new(),
            },
        ],
        recipes: vec![RecipeRow {
            recipe_id: "rec_1".to_string(),
            title: "Soup".to_string(),
            author_id: "u1".to_string(),
            prep_time_minutes: "35".to_string(),
            difficulty: "Medium".to_string(),
            created_at: String::new(),
        }],
        ingredients: vec![IngredientRow {
            recipe_id: "rec_1".to_string(),
            name: "Water".to_string(),
            quantity: "0".to_string(),
            unit: "ml".to_string(),
        }],
        steps: vec![StepRow {
            recipe_id: "rec_1".to_string(),
            step_number: 1,
            instruction: "Boil".to_string(),
        }],
        interactions: vec![InteractionRow {
            interaction_id: "int_0000".to_string(),
            user_id: "u9".to_string(),
            recipe_id: String::new(),
            interaction_type: "like".to_string(),
            rating: Some("5".to_string()),
            timestamp: "2025-01-02T00:00:00Z".to_string(),
        }],
    };
    let at = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    validate(&rows.to_raw_tables(), at).unwrap()
}

#[test]
fn report_csv_layout() {
    let bytes = encode_validation_report(&report()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    insta::assert_snapshot!(text.trim_end(), @"
Table,Record_ID,Status,Issues,Validated_At
Users,u1,PASS,OK,2025-01-15 12:00:00
Users,u2,FAIL,Missing username; Invalid email format,2025-01-15 12:00:00
Recipes,rec_1,PASS,OK,2025-01-15 12:00:00
Interactions,u9,FAIL,Missing recipe_id; Orphaned User ID; Orphaned Recipe ID,2025-01-15 12:00:00
Ingredients,rec_1,FAIL,Zero/Negative quantity,2025-01-15 12:00:00
Steps,rec_1,PASS,OK,2025-01-15 12:00:00");
}

#[test]
fn report_file_replaces_previous() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("validation_report.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "stale").unwrap();

    let written = write_validation_report(&path, &report()).unwrap();
    assert_eq!(written, 6);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Table,Record_ID,Status,Issues,Validated_At\n"));
    assert_eq!(contents.lines().count(), 7);
}
