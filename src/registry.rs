//! Identity registry: lazy handle → [`Uid`] side table.
//!
//! The registry gives every reference handle a unique, stable, monotonically
//! issued id the first time it is looked up. It exists to give
//! [`less`](crate::cmp::less) a total-order fallback for values whose types
//! carry no ordering of their own.
//!
//! # Invariants
//!
//! - **Stability**: repeated lookups of one live allocation return the same id.
//! - **Uniqueness**: no id is ever issued twice by one registry, including ids
//!   whose values have since been dropped.
//! - **Monotonicity**: ids are issued in strictly increasing order; the first
//!   lookup of a handle gets a larger id than every earlier first lookup.
//! - **Non-owning**: entries hold a weak watch, never keeping a value alive.
//!
//! A dead entry still pins its allocation's memory (the weak count) until
//! [`IdentityRegistry::prune`] removes it, so a new value can never land at an
//! address the registry still remembers.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use comparable_core::registry::IdentityRegistry;
//!
//! let registry = IdentityRegistry::new();
//! let a = Rc::new("first");
//! let b = Rc::new("second");
//!
//! assert_eq!(registry.identity_id(&a).get(), 1);
//! assert_eq!(registry.identity_id(&b).get(), 2);
//! assert_eq!(registry.identity_id(&a).get(), 1);
//! ```

use alloc::boxed::Box;
use core::cell::{Cell, RefCell};
use core::fmt;

use hashbrown::HashMap;

use crate::handle::{Handle, Liveness};
use crate::uid::{IdentityError, Uid};

// ─── Identities ─────────────────────────────────────────────────────────────

/// Source of identities for handles of type `H`.
///
/// This is the seam [`Ordered`](crate::domain::Ordered) reaches through: the
/// ordering function takes any `R: Identities<H>` explicitly instead of a
/// hidden global.
pub trait Identities<H: ?Sized> {
    /// Identity of `handle`, assigning a fresh one on first lookup.
    fn identity_of(&self, handle: &H) -> Uid;
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Configuration for an identity registry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    /// First id handed out. Default: 1.
    pub first_uid: u64,

    /// Insertions between automatic [`prune`](IdentityRegistry::prune) passes.
    /// Default: 0 (never prune automatically).
    pub prune_interval: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            first_uid: 1,
            prune_interval: 0,
        }
    }
}

/// Point-in-time summary of a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryStats {
    /// Entries currently held, live and dead.
    pub entries: usize,
    /// Entries whose value is still alive.
    pub live: usize,
    /// Ids issued since construction.
    pub issued: u64,
    /// Next id to hand out.
    pub next: u64,
}

// ─── Counter ────────────────────────────────────────────────────────────────

/// Monotonic id counter shared by both registry flavours.
///
/// Single state: the next id to hand out. Only moves upward; `u64::MAX` is
/// never issued so exhaustion is detectable without wrapping.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Counter {
    first: u64,
    next: u64,
}

impl Counter {
    pub(crate) const fn starting_at(first: u64) -> Self {
        Self { first, next: first }
    }

    pub(crate) fn issue(&mut self) -> Result<Uid, IdentityError> {
        if self.next == u64::MAX {
            return Err(IdentityError::Exhausted {
                issued: self.issued(),
            });
        }
        let uid = Uid::new(self.next);
        self.next += 1;
        Ok(uid)
    }

    pub(crate) fn issued(&self) -> u64 {
        self.next - self.first
    }

    pub(crate) fn next(&self) -> u64 {
        self.next
    }
}

// ─── Identity Registry ──────────────────────────────────────────────────────

struct Entry<'a> {
    uid: Uid,
    watch: Box<dyn Liveness + 'a>,
}

/// Single-threaded identity registry.
///
/// Interior mutability lets lookups run through `&self`, so one registry can
/// be shared by every comparison in a container. Not `Sync`; see
/// `SharedIdentityRegistry` (feature `std`) for a thread-safe flavour.
///
/// `'a` bounds the pointees of registered handles; a registry holding only
/// handles over owned data is an `IdentityRegistry<'static>`.
pub struct IdentityRegistry<'a> {
    config: RegistryConfig,
    counter: Cell<Counter>,
    since_prune: Cell<usize>,
    entries: RefCell<HashMap<usize, Entry<'a>>>,
}

impl<'a> IdentityRegistry<'a> {
    /// Empty registry with the default configuration (ids start at 1).
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Empty registry with an explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            counter: Cell::new(Counter::starting_at(config.first_uid)),
            since_prune: Cell::new(0),
            entries: RefCell::new(HashMap::new()),
            config,
        }
    }

    /// Configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Identity of `handle`, assigned lazily on first lookup.
    ///
    /// # Panics
    ///
    /// Panics if the counter is exhausted. Use
    /// [`try_identity_id`](Self::try_identity_id) to handle that case.
    pub fn identity_id<H: Handle + ?Sized + 'a>(&self, handle: &H) -> Uid {
        match self.try_identity_id(handle) {
            Ok(uid) => uid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Identity of `handle`, or an error instead of ever repeating an id.
    pub fn try_identity_id<H: Handle + ?Sized + 'a>(&self, handle: &H) -> Result<Uid, IdentityError> {
        let address = handle.address();
        let uid = {
            let mut entries = self.entries.borrow_mut();
            if let Some(entry) = entries.get(&address) {
                if entry.watch.is_alive() {
                    return Ok(entry.uid);
                }
            }

            let mut counter = self.counter.get();
            let uid = counter.issue()?;
            self.counter.set(counter);
            entries.insert(
                address,
                Entry {
                    uid,
                    watch: handle.watch(),
                },
            );
            tracing::trace!(uid = uid.get(), address, "identity assigned");
            uid
        };

        self.after_insert();
        Ok(uid)
    }

    /// Identity of `handle` if it has one, without assigning.
    pub fn peek<H: Handle + ?Sized>(&self, handle: &H) -> Option<Uid> {
        let entries = self.entries.borrow();
        entries
            .get(&handle.address())
            .filter(|entry| entry.watch.is_alive())
            .map(|entry| entry.uid)
    }

    /// Entries currently held, including ones whose value was dropped.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// `true` if no handle has been registered (or all were pruned).
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Ids issued since construction.
    pub fn issued(&self) -> u64 {
        self.counter.get().issued()
    }

    /// Drop every entry whose value has been dropped. Returns how many went.
    ///
    /// Pruned ids are retired, never reissued.
    pub fn prune(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| entry.watch.is_alive());
        let reclaimed = before - entries.len();
        self.since_prune.set(0);
        tracing::debug!(reclaimed, remaining = entries.len(), "pruned identity entries");
        reclaimed
    }

    /// Snapshot of the registry's counters.
    pub fn stats(&self) -> RegistryStats {
        let entries = self.entries.borrow();
        let counter = self.counter.get();
        RegistryStats {
            entries: entries.len(),
            live: entries.values().filter(|e| e.watch.is_alive()).count(),
            issued: counter.issued(),
            next: counter.next(),
        }
    }

    fn after_insert(&self) {
        let interval = self.config.prune_interval;
        if interval == 0 {
            return;
        }
        let inserted = self.since_prune.get() + 1;
        if inserted >= interval {
            self.prune();
        } else {
            self.since_prune.set(inserted);
        }
    }
}

impl Default for IdentityRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdentityRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<'a, H: Handle + ?Sized + 'a> Identities<H> for IdentityRegistry<'a> {
    fn identity_of(&self, handle: &H) -> Uid {
        self.identity_id(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    #[test]
    fn test_first_ids_start_at_one() {
        let reg = IdentityRegistry::new();
        let a = Rc::new(0u8);
        let b = Rc::new(0u8);
        assert_eq!(reg.identity_id(&a), Uid::new(1));
        assert_eq!(reg.identity_id(&b), Uid::new(2));
    }

    #[test]
    fn test_lookup_is_stable() {
        let reg = IdentityRegistry::new();
        let a = Rc::new(String::from("a"));
        let first = reg.identity_id(&a);
        let second = reg.identity_id(&a);
        assert_eq!(first, second);
        assert_eq!(reg.identity_id(&Rc::clone(&a)), first);
        assert_eq!(reg.issued(), 1);
    }

    #[test]
    fn test_equal_contents_get_distinct_ids() {
        let reg = IdentityRegistry::new();
        let a = Arc::new(3u32);
        let b = Arc::new(3u32);
        assert_ne!(reg.identity_id(&a), reg.identity_id(&b));
    }

    #[test]
    fn test_handles_over_borrowed_data() {
        let rows = [String::from("a"), String::from("b")];
        let reg = IdentityRegistry::new();
        let first = Rc::new(rows[0].as_str());
        let second = Rc::new(rows[1].as_str());
        assert_eq!(reg.identity_id(&first), Uid::new(1));
        assert_eq!(reg.identity_id(&second), Uid::new(2));
        assert_eq!(reg.identity_id(&first), Uid::new(1));
    }

    #[test]
    fn test_peek_does_not_assign() {
        let reg = IdentityRegistry::new();
        let a = Rc::new(1i32);
        assert_eq!(reg.peek(&a), None);
        assert!(reg.is_empty());
        let uid = reg.identity_id(&a);
        assert_eq!(reg.peek(&a), Some(uid));
    }

    #[test]
    fn test_custom_first_uid() {
        let reg = IdentityRegistry::with_config(RegistryConfig {
            first_uid: 0,
            ..RegistryConfig::default()
        });
        let a = Rc::new(());
        assert_eq!(reg.identity_id(&a).get(), 0);
        assert_eq!(reg.stats().next, 1);
    }

    #[test]
    fn test_prune_drops_only_dead_entries() {
        let reg = IdentityRegistry::new();
        let keep = Rc::new(1u8);
        let gone = Rc::new(2u8);
        let keep_id = reg.identity_id(&keep);
        reg.identity_id(&gone);
        drop(gone);

        assert_eq!(reg.stats().live, 1);
        assert_eq!(reg.prune(), 1);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.identity_id(&keep), keep_id);
    }

    #[test]
    fn test_pruned_ids_are_never_reissued() {
        let reg = IdentityRegistry::new();
        let mut seen = Vec::new();
        for n in 0..16u32 {
            let value = Rc::new(n);
            seen.push(reg.identity_id(&value));
            reg.prune();
        }
        for pair in seen.windows(2) {
            assert!(pair[0] < pair[1], "ids must keep increasing: {:?}", pair);
        }
        assert_eq!(reg.issued(), 16);
    }

    #[test]
    fn test_auto_prune_interval() {
        let reg = IdentityRegistry::with_config(RegistryConfig {
            prune_interval: 4,
            ..RegistryConfig::default()
        });
        for n in 0..4u32 {
            let value = Rc::new(n);
            reg.identity_id(&value);
        }
        // Fourth insertion triggers a pass; only its own (then live) entry survives.
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.stats().live, 0);
        assert_eq!(reg.issued(), 4);
    }

    #[test]
    fn test_exhaustion_is_an_error() {
        let reg = IdentityRegistry::with_config(RegistryConfig {
            first_uid: u64::MAX - 1,
            ..RegistryConfig::default()
        });
        let a = Rc::new(1u8);
        let b = Rc::new(2u8);
        assert_eq!(reg.try_identity_id(&a), Ok(Uid::new(u64::MAX - 1)));
        assert_eq!(
            reg.try_identity_id(&b),
            Err(IdentityError::Exhausted { issued: 1 })
        );
        // Existing entries stay readable.
        assert_eq!(reg.try_identity_id(&a), Ok(Uid::new(u64::MAX - 1)));
    }

    #[test]
    #[should_panic(expected = "identity counter exhausted")]
    fn test_identity_id_panics_on_exhaustion() {
        let reg = IdentityRegistry::with_config(RegistryConfig {
            first_uid: u64::MAX,
            ..RegistryConfig::default()
        });
        reg.identity_id(&Rc::new(0u8));
    }
}
