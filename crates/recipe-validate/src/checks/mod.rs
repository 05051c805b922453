//! Per-table rule functions.
//!
//! Every rule is a pure function of one record and the [`ReferenceIndex`];
//! issues are emitted in a fixed order per table.

pub mod fields;

use recipe_model::{Difficulty, InteractionType, RawRecord, TableKind};

use crate::index::ReferenceIndex;
use crate::issue::Issue;
use fields::{Positivity, check_required, in_closed_set, is_valid_email, positivity};

/// Fields that must be non-empty, per table.
pub fn required_fields(kind: TableKind) -> &'static [&'static str] {
    match kind {
        TableKind::Recipes => &["recipe_id", "title", "prep_time_minutes", "difficulty"],
        TableKind::Users => &["user_id", "username", "email"],
        TableKind::Interactions => &["interaction_id", "user_id", "recipe_id", "type", "timestamp"],
        TableKind::Ingredients => &["recipe_id", "name", "quantity"],
        TableKind::Steps => &["recipe_id", "step_number", "instruction"],
    }
}

/// Run the rules for `kind` against one record.
pub fn check_record(kind: TableKind, record: &RawRecord, index: &ReferenceIndex) -> Vec<Issue> {
    let mut issues = Vec::new();
    check_required(record, required_fields(kind), &mut issues);
    match kind {
        TableKind::Users => check_user(record, &mut issues),
        TableKind::Recipes => check_recipe(record, index, &mut issues),
        TableKind::Interactions => check_interaction(record, index, &mut issues),
        TableKind::Ingredients => check_ingredient(record, index, &mut issues),
        TableKind::Steps => check_step(record, index, &mut issues),
    }
    issues
}

fn check_user(record: &RawRecord, issues: &mut Vec<Issue>) {
    if let Some(email) = record.non_empty("email")
        && !is_valid_email(email)
    {
        issues.push(Issue::InvalidEmail);
    }
}

fn check_recipe(record: &RawRecord, index: &ReferenceIndex, issues: &mut Vec<Issue>) {
    match positivity(record.get("prep_time_minutes")) {
        Positivity::Positive => {}
        Positivity::NotPositive => issues.push(Issue::InvalidPrepTime),
        Positivity::NonNumeric => issues.push(Issue::NonNumericPrepTime),
    }

    let difficulty = record.get("difficulty");
    if !in_closed_set::<Difficulty>(difficulty) {
        issues.push(Issue::InvalidDifficulty {
            value: difficulty.to_string(),
        });
    }

    let recipe_id = record.get("recipe_id");
    if !index.recipes_with_ingredients.contains(recipe_id) {
        issues.push(Issue::NoIngredientsLinked);
    }
    if !index.recipes_with_steps.contains(recipe_id) {
        issues.push(Issue::NoStepsLinked);
    }
}

fn check_interaction(record: &RawRecord, index: &ReferenceIndex, issues: &mut Vec<Issue>) {
    if !index.has_user(record.get("user_id")) {
        issues.push(Issue::OrphanedUser);
    }
    if !index.has_recipe(record.get("recipe_id")) {
        issues.push(Issue::OrphanedRecipe);
    }

    let interaction_type = record.get("type");
    if !in_closed_set::<InteractionType>(interaction_type) {
        issues.push(Issue::InvalidType {
            value: interaction_type.to_string(),
        });
    }
}

fn check_ingredient(record: &RawRecord, index: &ReferenceIndex, issues: &mut Vec<Issue>) {
    if !index.has_recipe(record.get("recipe_id")) {
        issues.push(Issue::UnknownRecipe);
    }
    match positivity(record.get("quantity")) {
        Positivity::Positive => {}
        Positivity::NotPositive => issues.push(Issue::NonPositiveQuantity),
        Positivity::NonNumeric => issues.push(Issue::NonNumericQuantity),
    }
}

fn check_step(record: &RawRecord, index: &ReferenceIndex, issues: &mut Vec<Issue>) {
    if !index.has_recipe(record.get("recipe_id")) {
        issues.push(Issue::UnknownRecipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ReferenceIndex {
        ReferenceIndex {
            recipe_ids: ["rec_1", "rec_2"].map(String::from).into(),
            user_ids: ["u1"].map(String::from).into(),
            recipes_with_ingredients: ["rec_1", "rec_2"].map(String::from).into(),
            recipes_with_steps: ["rec_1"].map(String::from).into(),
        }
    }

    fn recipe(id: &str, prep: &str, difficulty: &str) -> RawRecord {
        RawRecord::from_pairs([
            ("recipe_id", id),
            ("title", "Soup"),
            ("prep_time_minutes", prep),
            ("difficulty", difficulty),
        ])
    }

    #[test]
    fn test_linked_recipe_passes() {
        let issues = check_record(TableKind::Recipes, &recipe("rec_1", "35", "Medium"), &index());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn test_recipe_without_steps() {
        let issues = check_record(TableKind::Recipes, &recipe("rec_2", "35", "Easy"), &index());
        assert_eq!(issues, vec![Issue::NoStepsLinked]);
    }

    #[test]
    fn test_recipe_issue_order() {
        let issues = check_record(TableKind::Recipes, &recipe("rec_9", "", ""), &index());
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "Missing prep_time_minutes",
                "Missing difficulty",
                "Non-numeric prep_time",
                "Invalid difficulty: ",
                "No ingredients linked",
                "No steps linked",
            ]
        );
    }

    #[test]
    fn test_impossible_difficulty() {
        let issues = check_record(TableKind::Recipes, &recipe("rec_1", "-1", "Impossible"), &index());
        assert_eq!(
            issues,
            vec![
                Issue::InvalidPrepTime,
                Issue::InvalidDifficulty {
                    value: "Impossible".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_user_email() {
        let good = RawRecord::from_pairs([("user_id", "u1"), ("username", "Ann"), ("email", "a@b.co")]);
        assert!(check_record(TableKind::Users, &good, &index()).is_empty());

        let bad = RawRecord::from_pairs([("user_id", "u1"), ("username", "Ann"), ("email", "ann")]);
        assert_eq!(check_record(TableKind::Users, &bad, &index()), vec![Issue::InvalidEmail]);

        let missing = RawRecord::from_pairs([("user_id", "u1"), ("username", "Ann")]);
        assert_eq!(
            check_record(TableKind::Users, &missing, &index()),
            vec![Issue::Missing { field: "email" }]
        );
    }

    #[test]
    fn test_interaction_references() {
        let record = RawRecord::from_pairs([
            ("interaction_id", "int_0001"),
            ("user_id", "ghost"),
            ("recipe_id", "rec_404"),
            ("type", "share"),
            ("timestamp", "2024-01-01T00:00:00Z"),
        ]);
        let messages: Vec<String> = check_record(TableKind::Interactions, &record, &index())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            messages,
            vec!["Orphaned User ID", "Orphaned Recipe ID", "Invalid type: share"]
        );
    }

    #[test]
    fn test_ingredient_quantity() {
        let ingredient = |quantity: &str| {
            RawRecord::from_pairs([("recipe_id", "rec_1"), ("name", "Salt"), ("quantity", quantity)])
        };
        assert!(check_record(TableKind::Ingredients, &ingredient("3"), &index()).is_empty());
        assert_eq!(
            check_record(TableKind::Ingredients, &ingredient("-5"), &index()),
            vec![Issue::NonPositiveQuantity]
        );
        assert_eq!(
            check_record(TableKind::Ingredients, &ingredient("abc"), &index()),
            vec![Issue::NonNumericQuantity]
        );
    }

    #[test]
    fn test_step_unknown_recipe() {
        let record = RawRecord::from_pairs([
            ("recipe_id", "rec_404"),
            ("step_number", "1"),
            ("instruction", "Stir"),
        ]);
        assert_eq!(
            check_record(TableKind::Steps, &record, &index()),
            vec![Issue::UnknownRecipe]
        );
    }
}
