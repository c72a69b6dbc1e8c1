//! Identity values handed out by the identity registries.
//!
//! A [`Uid`] is metadata about a value, never part of its state: two
//! allocations with equal contents still carry distinct ids, and an id once
//! issued is never handed to another allocation.

use core::fmt;

/// Unique, monotonically issued identity of one reference handle.
///
/// Ids compare by issue order: a handle registered earlier always holds the
/// smaller id. This order is the fallback ordering used by
/// [`less`](crate::cmp::less) for types without their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Uid(u64);

impl Uid {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<Uid> for u64 {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

/// Failures of the identity registries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The counter reached `u64::MAX`; issuing another id would repeat one.
    #[error("identity counter exhausted after {issued} ids")]
    Exhausted {
        /// Ids handed out before exhaustion.
        issued: u64,
    },
}
