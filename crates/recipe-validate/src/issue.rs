//! Validation issue types.
//!
//! Each variant renders to the exact reason string carried by the report.

use std::fmt;

/// One rule violation found on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    // Presence checks
    /// A required field is empty or absent.
    Missing { field: &'static str },

    // Format checks
    InvalidEmail,
    NonNumericPrepTime,
    /// Preparation time is zero, negative, or NaN.
    InvalidPrepTime,
    NonNumericQuantity,
    NonPositiveQuantity,

    // Closed-set checks
    InvalidDifficulty { value: String },
    InvalidType { value: String },

    // Cross-table checks
    NoIngredientsLinked,
    NoStepsLinked,
    OrphanedUser,
    OrphanedRecipe,
    /// A child row references a recipe that does not exist.
    UnknownRecipe,
}

impl Issue {
    /// Whether the issue comes from a lookup in another table.
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            Issue::NoIngredientsLinked
                | Issue::NoStepsLinked
                | Issue::OrphanedUser
                | Issue::OrphanedRecipe
                | Issue::UnknownRecipe
        )
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Missing { field } => write!(f, "Missing {field}"),
            Issue::InvalidEmail => f.write_str("Invalid email format"),
            Issue::NonNumericPrepTime => f.write_str("Non-numeric prep_time"),
            Issue::InvalidPrepTime => f.write_str("Invalid prep_time"),
            Issue::NonNumericQuantity => f.write_str("Non-numeric quantity"),
            Issue::NonPositiveQuantity => f.write_str("Zero/Negative quantity"),
            Issue::InvalidDifficulty { value } => write!(f, "Invalid difficulty: {value}"),
            Issue::InvalidType { value } => write!(f, "Invalid type: {value}"),
            Issue::NoIngredientsLinked => f.write_str("No ingredients linked"),
            Issue::NoStepsLinked => f.write_str("No steps linked"),
            Issue::OrphanedUser => f.write_str("Orphaned User ID"),
            Issue::OrphanedRecipe => f.write_str("Orphaned Recipe ID"),
            Issue::UnknownRecipe => f.write_str("Links to non-existent recipe"),
        }
    }
}

/// Outcome of validating one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
