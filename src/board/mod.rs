//! The table: which card occupies which slot.
//!
//! The table opens as a 4 x 3 grid. Extra rows of 3 are appended when no set
//! is on the table, and compaction folds the trailing row back into the slots
//! freed by a resolved set.
//!
//! ## Key Types
//!
//! - `Board`: forward (slot -> card) and inverse (card -> slot) mappings
//! - `SlotChange`: one slot's new content, as reported to the display layer

pub mod table;

pub use table::{Board, SlotChange};
