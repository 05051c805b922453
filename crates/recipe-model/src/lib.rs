pub mod enums;
pub mod record;
pub mod rows;
pub mod table;

pub use enums::{Difficulty, InteractionType};
pub use record::{RawRecord, RawTable};
pub use rows::{IngredientRow, InteractionRow, RecipeRow, RowSets, StepRow, TableRow, UserRow};
pub use table::{EXPORT_PREFIX, TABLE_FILE_EXTENSION, TableKind, TableLayout};
