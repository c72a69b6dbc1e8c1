//! The comparison functions: comparator and hasher plug-points.
//!
//! Containers and algorithms take these as their comparator/hasher:
//!
//! - [`equals`]: equality
//! - [`less`]: strict ordering (identity fallback via an explicit registry)
//! - [`greater`]: derived from `less` and `equals`
//! - [`hash`]: hash code agreeing with `equals`
//! - [`compare`] / [`comparator`]: the same order as a [`core::cmp::Ordering`]
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use comparable_core::cmp::{equals, greater, less};
//! use comparable_core::registry::IdentityRegistry;
//!
//! let ids = IdentityRegistry::new();
//! assert!(equals(&5, &5));
//!
//! // No ordering of their own: first looked up orders first.
//! let o1 = Rc::new(());
//! let o2 = Rc::new(());
//! assert!(less(&ids, &o1, &o2));
//! assert!(!less(&ids, &o2, &o1));
//! assert!(greater(&ids, &o2, &o1));
//! ```

use core::cmp::Ordering;

use crate::domain::{Equality, Ordered};

/// Whether `left` and `right` are equal in their domain.
///
/// Delegates to [`Comparable::equals`](crate::capability::Comparable::equals)
/// when implemented, else strict primitive equality, else reference identity.
/// No side effects.
pub fn equals<T: Equality + ?Sized>(left: &T, right: &T) -> bool {
    left.equals_in_domain(right)
}

/// Whether `left` orders strictly before `right`.
///
/// Delegates to [`Comparable::less`](crate::capability::Comparable::less) when
/// implemented, else primitive `<`. Reference handles without their own order
/// compare by registry identity, assigning ids lazily (`left` first).
pub fn less<T: Ordered<R> + ?Sized, R: ?Sized>(ids: &R, left: &T, right: &T) -> bool {
    left.less_in_domain(right, ids)
}

/// Whether `left` orders strictly after `right`.
///
/// Computed as `!less(left, right) && !equals(left, right)`. Only meaningful
/// when `less` and `equals` form a strict total order.
pub fn greater<T: Ordered<R> + ?Sized, R: ?Sized>(ids: &R, left: &T, right: &T) -> bool {
    !less(ids, left, right) && !equals(left, right)
}

/// Hash code of `value`, agreeing with [`equals`].
pub fn hash<T: Equality + ?Sized>(value: &T) -> u64 {
    value.hash_in_domain()
}

/// Three-way form of the protocol order.
pub fn compare<T: Ordered<R> + ?Sized, R: ?Sized>(ids: &R, left: &T, right: &T) -> Ordering {
    if equals(left, right) {
        Ordering::Equal
    } else if less(ids, left, right) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Comparator closure over `ids`, for `sort_by`, `binary_search_by` and the
/// like.
///
/// Handles sort by identity. To sort shared values by what they point at,
/// wrap them in [`ByValue`](crate::by_value::ByValue):
///
/// ```rust
/// use std::rc::Rc;
/// use comparable_core::{comparator, ByValue, IdentityRegistry};
///
/// let ids = IdentityRegistry::new();
/// let mut words: Vec<ByValue<Rc<String>>> = ["pear", "fig", "apple"]
///     .into_iter()
///     .map(|w| ByValue(Rc::new(String::from(w))))
///     .collect();
/// words.sort_by(comparator::<ByValue<Rc<String>>, _>(&ids));
/// let sorted: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
/// assert_eq!(sorted, ["apple", "fig", "pear"]);
/// ```
pub fn comparator<'r, T: Ordered<R> + ?Sized, R: ?Sized>(
    ids: &'r R,
) -> impl Fn(&T, &T) -> Ordering + 'r {
    move |left, right| compare(ids, left, right)
}
