//! `ByValue<P>`: compare a pointer by its pointee.
//!
//! `Rc<T>` and `Arc<T>` compare by identity even when `T` is [`Comparable`].
//! Wrapping the handle routes every protocol question to the pointee instead,
//! and the same wrapper covers `Box<T>` and `&T`.
//!
//! ```rust
//! use std::rc::Rc;
//! use comparable_core::{comparator, default_hash, equals, ByValue, Comparable, IdentityRegistry};
//!
//! struct Version(u32);
//!
//! impl Comparable for Version {
//!     fn equals(&self, other: &Self) -> bool { self.0 == other.0 }
//!     fn less(&self, other: &Self) -> bool { self.0 < other.0 }
//!     fn hash_code(&self) -> u64 { default_hash(&self.0) }
//! }
//!
//! let ids = IdentityRegistry::new();
//! let mut versions: Vec<ByValue<Rc<Version>>> =
//!     [3, 1, 2].into_iter().map(|v| ByValue(Rc::new(Version(v)))).collect();
//! versions.sort_by(comparator::<ByValue<Rc<Version>>, _>(&ids));
//! assert_eq!(versions.iter().map(|v| v.0 .0).collect::<Vec<_>>(), [1, 2, 3]);
//!
//! // Two allocations, one value.
//! assert!(equals(&ByValue(Rc::new(Version(7))), &ByValue(Rc::new(Version(7)))));
//! assert!(ids.is_empty());
//! ```
//!
//! [`Comparable`]: crate::capability::Comparable

use core::ops::Deref;

use crate::domain::{Equality, Ordered};

/// Pointer compared, ordered, and hashed through what it points at.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByValue<P>(pub P);

impl<P> ByValue<P> {
    /// Unwrap the pointer.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> Deref for ByValue<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.0
    }
}

impl<P: Deref> Equality for ByValue<P>
where
    P::Target: Equality,
{
    fn equals_in_domain(&self, other: &Self) -> bool {
        (*self.0).equals_in_domain(&*other.0)
    }

    fn hash_in_domain(&self) -> u64 {
        (*self.0).hash_in_domain()
    }
}

impl<P: Deref, R: ?Sized> Ordered<R> for ByValue<P>
where
    P::Target: Ordered<R>,
{
    fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
        (*self.0).less_in_domain(&*other.0, ids)
    }
}
