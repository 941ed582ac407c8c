//! Set rules: deciding whether three cards form a set, and searching a
//! table for one.
//!
//! A triple is a set when, for each of the four attributes, the three cards
//! are all identical or all pairwise different. Everything here is pure and
//! works only on card identifiers.

pub mod validator;
pub mod search;

pub use validator::{completing_card, is_set, is_set_by_sum};
pub use search::find_set;
