//! Item-item co-occurrence built from per-user distinct item sets.
//!
//! The co-occurrence count `C[i, j]` is the number of users who interacted
//! with both item i and item j; the diagonal `C[i, i]` is the number of
//! distinct users who touched item i. Rather than expanding item pairs per
//! user, the build forms a binary user-item incidence matrix U and computes
//! `C = Uᵀ·U` with sparse multiplication, which keeps the cost at the sum
//! over users of (items-per-user)².

use crate::data::Interaction;
use crate::primitives::{CooMatrix, CsrMatrix};
use crate::vocab::Vocabulary;
use std::collections::HashSet;

/// Builds the binary user-item incidence matrix (n_users × n_items).
///
/// Each distinct (user, item) pair observed in `interactions` becomes a
/// single 1.0 entry, regardless of how many events the pair has. Events
/// whose user or item is absent from the vocabularies are dropped.
#[must_use]
pub fn incidence(
    interactions: &[Interaction],
    users: &Vocabulary,
    items: &Vocabulary,
) -> CsrMatrix {
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(interactions.len());
    for event in interactions {
        if let (Some(u), Some(i)) = (users.index(&event.user), items.index(&event.item)) {
            seen.insert((u, i));
        }
    }

    let mut coo = CooMatrix::with_capacity(users.len(), items.len(), seen.len());
    for (u, i) in seen {
        coo.push(u, i, 1.0);
    }
    coo.to_csr()
}

/// Computes the item-item co-occurrence matrix `C = Uᵀ·U` from a binary
/// incidence matrix U.
///
/// The result is symmetric and nonnegative by construction, with
/// `C[i, i] >= C[i, j]` for all j (a pair of items cannot co-occur for
/// more users than either item was touched by).
///
/// # Examples
///
/// ```
/// use sugerir::cooccurrence::{cooccurrence, incidence};
/// use sugerir::data::Interaction;
/// use sugerir::vocab::Vocabulary;
///
/// let events = vec![
///     Interaction::new("a", "x"),
///     Interaction::new("a", "y"),
///     Interaction::new("b", "y"),
/// ];
/// let users = Vocabulary::from_ids(events.iter().map(|e| e.user.as_str()));
/// let items = Vocabulary::from_ids(events.iter().map(|e| e.item.as_str()));
///
/// let c = cooccurrence(&incidence(&events, &users, &items));
/// assert_eq!(c.get(0, 0), 1.0); // x touched by one user
/// assert_eq!(c.get(1, 1), 2.0); // y touched by two users
/// assert_eq!(c.get(0, 1), 1.0); // x and y share user "a"
/// ```
#[must_use]
pub fn cooccurrence(incidence: &CsrMatrix) -> CsrMatrix {
    incidence
        .transpose()
        .matmul(incidence)
        .expect("transpose inner dimension always matches")
}
