//! The comparable capability: a type's own equality, ordering, and hash.
//!
//! # Implementing for a new type
//!
//! ```rust
//! use comparable_core::capability::Comparable;
//! use comparable_core::hash::default_hash;
//!
//! struct Version { major: u32, minor: u32 }
//!
//! impl Comparable for Version {
//!     fn equals(&self, other: &Self) -> bool {
//!         (self.major, self.minor) == (other.major, other.minor)
//!     }
//!     fn less(&self, other: &Self) -> bool {
//!         (self.major, self.minor) < (other.major, other.minor)
//!     }
//!     fn hash_code(&self) -> u64 {
//!         default_hash(&(self.major, self.minor))
//!     }
//! }
//! // Now `equals`, `less`, `greater` and `hash` dispatch to these methods.
//! ```

/// Capability a type implements to supply its own comparison logic.
///
/// The free functions in [`cmp`](crate::cmp) delegate to these methods
/// unchecked. Implementers carry the contract:
///
/// - `equals` is an equivalence relation (reflexive, symmetric, transitive).
/// - `less` with `equals` is a strict total order: irreflexive, asymmetric,
///   transitive, and for any two values exactly one of `a.less(b)`,
///   `b.less(a)`, `a.equals(b)` holds.
/// - `hash_code` agrees with `equals`: equal values hash equal.
///
/// Violations are not detected; they surface as inconsistent
/// [`greater`](crate::cmp::greater) results or misbehaving containers.
pub trait Comparable {
    /// Whether `self` and `other` are equal.
    fn equals(&self, other: &Self) -> bool;

    /// Whether `self` orders strictly before `other`.
    fn less(&self, other: &Self) -> bool;

    /// Hash code consistent with [`equals`](Comparable::equals).
    fn hash_code(&self) -> u64;
}
