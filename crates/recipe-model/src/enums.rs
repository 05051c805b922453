//! Closed value sets used by the recipe tables.
//!
//! Source documents carry these as free text. The denormalizer passes them
//! through untouched and the validator checks membership, so parsing is
//! exact and case-sensitive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recipe difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Every accepted value, in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Returns the value as stored in the tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|value| value.as_str() == s)
            .ok_or_else(|| format!("Unknown difficulty: {s}"))
    }
}

/// Kind of user interaction with a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    View,
    Like,
    CookAttempt,
}

impl InteractionType {
    /// Every accepted value, in display order.
    pub const ALL: [InteractionType; 3] = [
        InteractionType::View,
        InteractionType::Like,
        InteractionType::CookAttempt,
    ];

    /// Returns the value as stored in the tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::View => "view",
            InteractionType::Like => "like",
            InteractionType::CookAttempt => "cook_attempt",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InteractionType::ALL
            .into_iter()
            .find(|value| value.as_str() == s)
            .ok_or_else(|| format!("Unknown interaction type: {s}"))
    }
}
