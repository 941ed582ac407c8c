//! Table positions.

use serde::{Deserialize, Serialize};

/// Number of slots in one table row.
pub const ROW_WIDTH: usize = 3;

/// Number of rows in the opening layout.
pub const INITIAL_ROWS: usize = 4;

/// Number of slots in the opening layout (4 x 3).
pub const BASE_SLOTS: usize = INITIAL_ROWS * ROW_WIDTH;

/// A (row, column) slot on the table.
///
/// Rows grow downward as extra rows are appended; columns are `0..3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Check if this position lies in one of the opening rows.
    #[must_use]
    pub const fn is_base(self) -> bool {
        self.row < INITIAL_ROWS
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
