//! Synthetic demo data for the document source.
//!
//! Produces one hand-authored recipe with its author, a batch of random
//! recipes and users, and interactions linking them. Synthetic recipe
//! authors are drawn from a range that does not overlap the seeded users, as
//! author references are never checked.

use std::ops::Range;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};
use tracing::info;

use recipe_model::Difficulty;

use crate::document::{Collection, Document};
use crate::source::MemorySource;

/// Id of the hand-authored demo recipe.
pub const FEATURED_RECIPE_ID: &str = "rec_001_saurav_chicken_gravy";
/// Id of the demo recipe's author.
pub const FEATURED_USER_ID: &str = "user_saurav_001";

const FOOD_TYPES: &[&str] = &[
    "Pasta", "Curry", "Salad", "Soup", "Cake", "Stir Fry", "Tacos", "Sandwich",
];
const ADJECTIVES: &[&str] = &[
    "Spicy",
    "Creamy",
    "Vegan",
    "Quick",
    "Homestyle",
    "Delicious",
    "Cheesy",
];
const INGREDIENT_POOL: &[&str] = &[
    "Salt",
    "Pepper",
    "Olive Oil",
    "Garlic",
    "Tomato",
    "Cheese",
    "Basil",
    "Chicken",
    "Rice",
    "Flour",
];
const UNITS: &[&str] = &["grams", "tbsp", "cup", "pcs"];
const SYNTHETIC_STEPS: &[&str] = &["Step 1: Prep", "Step 2: Cook", "Step 3: Serve"];
/// Views are three times as likely as cook attempts, likes twice as likely.
const WEIGHTED_TYPES: &[&str] = &["view", "view", "view", "like", "like", "cook_attempt"];
const RATINGS: &[i64] = &[3, 4, 5, 5];
const RATING_PROBABILITY: f64 = 0.3;
/// Numbers of synthetic user ids (`user_1000` to `user_9999`).
const SYNTHETIC_USER_NUMBERS: Range<usize> = 1000..10_000;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Priya", "Jordan", "Mei", "Tomas", "Amara", "Lena", "Ravi", "Sofia", "Kenji",
];
const LAST_NAMES: &[&str] = &[
    "Garcia", "Patel", "Okafor", "Nguyen", "Schmidt", "Rossi", "Kim", "Silva", "Haddad",
];
const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Knobs for [`generate`].
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Reference time for generated timestamps.
    pub now: DateTime<Utc>,
    pub synthetic_users: usize,
    pub synthetic_recipes: usize,
    pub interactions: usize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            seed: None,
            now: Utc::now(),
            synthetic_users: 10,
            synthetic_recipes: 19,
            interactions: 50,
        }
    }
}

/// Generate a complete demo source.
pub fn generate(options: &SeedOptions) -> MemorySource {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = options.now;

    let mut users = vec![featured_user(now)];
    let mut user_ids = vec![FEATURED_USER_ID.to_string()];
    for number in synthetic_user_numbers(&mut rng, options.synthetic_users) {
        let user_id = format!("user_{number}");
        users.push(synthetic_user(&mut rng, &user_id, now));
        user_ids.push(user_id);
    }

    let mut recipes = vec![featured_recipe(now)];
    let mut recipe_ids = vec![FEATURED_RECIPE_ID.to_string()];
    for index in 0..options.synthetic_recipes {
        let recipe_id = format!("rec_{:03}_synthetic", index + 2);
        recipes.push(synthetic_recipe(&mut rng, &recipe_id, now));
        recipe_ids.push(recipe_id);
    }

    let interactions: Vec<Document> = (0..options.interactions)
        .map(|index| synthetic_interaction(&mut rng, index, &user_ids, &recipe_ids, now))
        .collect();

    info!(
        users = users.len(),
        recipes = recipes.len(),
        interactions = interactions.len(),
        "generated synthetic source"
    );

    MemorySource::new()
        .with_collection(Collection::Users, users)
        .with_collection(Collection::Recipes, recipes)
        .with_collection(Collection::Interactions, interactions)
}

/// Distinct synthetic user numbers: random picks from the four-digit range,
/// then sequential numbers past it once the range is used up.
fn synthetic_user_numbers(rng: &mut StdRng, count: usize) -> Vec<usize> {
    let span = SYNTHETIC_USER_NUMBERS.end - SYNTHETIC_USER_NUMBERS.start;
    let mut numbers: Vec<usize> = index::sample(rng, span, count.min(span))
        .into_iter()
        .map(|offset| SYNTHETIC_USER_NUMBERS.start + offset)
        .collect();
    let overflow = count.saturating_sub(span);
    numbers.extend(SYNTHETIC_USER_NUMBERS.end..SYNTHETIC_USER_NUMBERS.end + overflow);
    numbers
}

fn timestamp(value: DateTime<Utc>) -> Value {
    Value::String(value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn document(value: Value) -> Document {
    match value {
        Value::Object(fields) => Document::new(fields),
        _ => Document::new(Map::new()),
    }
}

fn featured_user(now: DateTime<Utc>) -> Document {
    document(json!({
        "user_id": FEATURED_USER_ID,
        "username": "Saurav Nayak",
        "email": "saurav.nayak@example.com",
        "created_at": timestamp(now),
    }))
}

fn featured_recipe(now: DateTime<Utc>) -> Document {
    document(json!({
        "recipe_id": FEATURED_RECIPE_ID,
        "title": "Chicken Gravy for 2 People",
        "author_id": FEATURED_USER_ID,
        "prep_time_minutes": 35,
        "difficulty": "Medium",
        "created_at": timestamp(now),
        "ingredients": [
            {"name": "Chicken (washed)", "quantity": 300, "unit": "grams"},
            {"name": "Onion", "quantity": 2, "unit": "count"},
            {"name": "Tomato", "quantity": 1, "unit": "count"},
            {"name": "Ginger Garlic Paste", "quantity": 1, "unit": "tbsp"},
            {"name": "Salt", "quantity": 1, "unit": "tbsp"},
            {"name": "Chicken Masala", "quantity": 1, "unit": "tbsp"},
            {"name": "Turmeric Powder", "quantity": 0.5, "unit": "tbsp"},
            {"name": "Cumin Powder", "quantity": 0.5, "unit": "tbsp"},
            {"name": "Garam Masala", "quantity": 0.5, "unit": "tbsp"},
            {"name": "Chilli Powder", "quantity": 0.5, "unit": "tbsp"},
            {"name": "Water", "quantity": 250, "unit": "ml"},
            {"name": "Oil", "quantity": 2, "unit": "tbsp"},
        ],
        "steps": [
            "Chop onion and tomato finely.",
            "Heat oil in pan (high flame).",
            "Sauté onions until golden brown.",
            "Add ginger garlic paste, mix 1 min.",
            "Add masalas, mix properly.",
            "Add chicken, cook 5 min to soak water.",
            "Add 250ml water, cover, cook on medium for 15 min.",
            "Turn off flame and serve.",
        ],
    }))
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn synthetic_user(rng: &mut StdRng, user_id: &str, now: DateTime<Utc>) -> Document {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let suffix: u32 = rng.gen_range(1..=99);
    let domain = pick(rng, EMAIL_DOMAINS);
    let email = format!(
        "{}.{}{suffix}@{domain}",
        first.to_lowercase(),
        last.to_lowercase()
    );
    document(json!({
        "user_id": user_id,
        "username": format!("{first} {last}"),
        "email": email,
        "created_at": timestamp(now),
    }))
}

fn synthetic_recipe(rng: &mut StdRng, recipe_id: &str, now: DateTime<Utc>) -> Document {
    let ingredient_count = rng.gen_range(3..=8);
    let ingredients: Vec<Value> = (0..ingredient_count)
        .map(|_| {
            json!({
                "name": pick(rng, INGREDIENT_POOL),
                "quantity": rng.gen_range(1..=500),
                "unit": pick(rng, UNITS),
            })
        })
        .collect();
    let difficulty = Difficulty::ALL
        .choose(rng)
        .copied()
        .unwrap_or(Difficulty::Medium);
    let title = format!("{} {}", pick(rng, ADJECTIVES), pick(rng, FOOD_TYPES));
    document(json!({
        "recipe_id": recipe_id,
        "title": title,
        "author_id": format!("user_{}", rng.gen_range(100..=999)),
        "prep_time_minutes": rng.gen_range(10..=120),
        "difficulty": difficulty.as_str(),
        "created_at": timestamp(now - Duration::days(rng.gen_range(1..=365))),
        "ingredients": ingredients,
        "steps": SYNTHETIC_STEPS,
    }))
}

fn synthetic_interaction(
    rng: &mut StdRng,
    index: usize,
    user_ids: &[String],
    recipe_ids: &[String],
    now: DateTime<Utc>,
) -> Document {
    let user_id = user_ids.choose(rng).cloned().unwrap_or_default();
    let recipe_id = recipe_ids.choose(rng).cloned().unwrap_or_default();
    let interaction_type = pick(rng, WEIGHTED_TYPES);
    let rating = if rng.gen_bool(RATING_PROBABILITY) {
        RATINGS.choose(rng).map_or(Value::Null, |rating| json!(rating))
    } else {
        Value::Null
    };
    document(json!({
        "interaction_id": format!("int_{index:04}"),
        "user_id": user_id,
        "recipe_id": recipe_id,
        "type": interaction_type,
        "rating": rating,
        "timestamp": timestamp(now - Duration::days(rng.gen_range(0..=30))),
    }))
}
