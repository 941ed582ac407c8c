//! Exhaustive set search over the cards on the table.

use super::validator::is_set;
use crate::core::Card;

/// Find a set among `cards`, scanning triples in index order.
///
/// Returns the first set found (lowest `i`, then `j`, then `k`), or `None`
/// when no triple is a set. O(k^3) in the number of cards with early exit;
/// nothing is cached since the table changes between calls.
#[must_use]
pub fn find_set(cards: &[Card]) -> Option<[Card; 3]> {
    let n = cards.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if is_set(cards[i], cards[j], cards[k]) {
                    return Some([cards[i], cards[j], cards[k]]);
                }
            }
        }
    }
    None
}
