//! Set validation.
//!
//! Two equivalent formulations are provided:
//! - [`is_set`] peels base-3 digits off the zero-based card values and checks
//!   each digit triple for "all equal or all different"
//! - [`is_set_by_sum`] uses the closed form: every digit sum is `0 mod 3`
//!
//! ```
//! use set_engine::core::Card;
//! use set_engine::rules::{completing_card, is_set};
//!
//! let a = Card::new(1).unwrap();
//! let b = Card::new(2).unwrap();
//! let c = completing_card(a, b);
//! assert_eq!(c.id(), 3);
//! assert!(is_set(a, b, c));
//! ```

use crate::core::{Card, ATTRIBUTE_COUNT};

/// Check whether three distinct cards form a set.
///
/// Callers pass pairwise distinct cards; the selection tracker guarantees
/// this. Runs a fixed 4 iterations, least-significant digit first.
#[must_use]
pub fn is_set(a: Card, b: Card, c: Card) -> bool {
    let (mut x, mut y, mut z) = (a.index(), b.index(), c.index());

    for _ in 0..ATTRIBUTE_COUNT {
        let (dx, dy, dz) = (x % 3, y % 3, z % 3);
        let all_equal = dx == dy && dy == dz;
        let all_different = dx != dy && dy != dz && dx != dz;
        if !(all_equal || all_different) {
            return false;
        }
        x /= 3;
        y /= 3;
        z /= 3;
    }

    true
}

/// Closed-form set check: every attribute's digit sum is divisible by 3.
#[must_use]
pub fn is_set_by_sum(a: Card, b: Card, c: Card) -> bool {
    let (da, db, dc) = (a.digits(), b.digits(), c.digits());
    (0..ATTRIBUTE_COUNT).all(|i| (da[i] + db[i] + dc[i]) % 3 == 0)
}

/// Get the unique card that completes a set with `a` and `b`.
///
/// For distinct `a` and `b` the result is distinct from both.
#[must_use]
pub fn completing_card(a: Card, b: Card) -> Card {
    let (da, db) = (a.digits(), b.digits());
    let mut digits = [0u8; ATTRIBUTE_COUNT];
    for (i, digit) in digits.iter_mut().enumerate() {
        *digit = (3 - (da[i] + db[i]) % 3) % 3;
    }
    Card::from_digits(digits)
}
