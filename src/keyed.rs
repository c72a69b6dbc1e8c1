//! `Keyed<T>`: a protocol value usable as a hash-container key.

use core::hash::{Hash, Hasher};
use core::ops::Deref;

use crate::cmp::{equals, hash};
use crate::domain::Equality;

/// Wrapper whose `Eq` and `Hash` are [`equals`] and [`hash`].
///
/// Lets any [`Equality`] type key a `HashMap`/`HashSet` without its own
/// `Eq`/`Hash` impls. Capability types key by their own equality, handles by
/// identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keyed<T>(pub T);

impl<T> Keyed<T> {
    /// Unwrap the value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Keyed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Equality> PartialEq for Keyed<T> {
    fn eq(&self, other: &Self) -> bool {
        equals(&self.0, &other.0)
    }
}

impl<T: Equality> Eq for Keyed<T> {}

impl<T: Equality> Hash for Keyed<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hash(&self.0));
    }
}
