//! Thread-safe identity registry and the process-wide instance.
//!
//! Requires the `std` feature. The counter increment and the first-lookup
//! check run in one critical section under a `parking_lot::Mutex`, so two
//! threads racing to register different handles can never receive the same
//! id, and a handle raced from two threads is registered exactly once.

use std::boxed::Box;
use std::fmt;
use std::sync::OnceLock;

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::handle::{Liveness, SharedHandle};
use crate::registry::{Counter, Identities, RegistryConfig, RegistryStats};
use crate::uid::{IdentityError, Uid};

struct SharedEntry {
    uid: Uid,
    watch: Box<dyn Liveness + Send + Sync>,
}

struct State {
    counter: Counter,
    since_prune: usize,
    entries: HashMap<usize, SharedEntry>,
}

impl State {
    fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.watch.is_alive());
        self.since_prune = 0;
        before - self.entries.len()
    }
}

/// Identity registry usable from many threads at once.
///
/// Accepts [`SharedHandle`]s only (`Arc` over `Send + Sync` values).
pub struct SharedIdentityRegistry {
    config: RegistryConfig,
    state: Mutex<State>,
}

impl SharedIdentityRegistry {
    /// Empty registry with the default configuration (ids start at 1).
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Empty registry with an explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            state: Mutex::new(State {
                counter: Counter::starting_at(config.first_uid),
                since_prune: 0,
                entries: HashMap::new(),
            }),
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
    /// Panics if the counter is exhausted.
    pub fn identity_id<H: SharedHandle + ?Sized>(&self, handle: &H) -> Uid {
        match self.try_identity_id(handle) {
            Ok(uid) => uid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Identity of `handle`, or an error instead of ever repeating an id.
    pub fn try_identity_id<H: SharedHandle + ?Sized>(
        &self,
        handle: &H,
    ) -> Result<Uid, IdentityError> {
        let address = handle.address();
        let mut state = self.state.lock();
        if let Some(entry) = state.entries.get(&address) {
            if entry.watch.is_alive() {
                return Ok(entry.uid);
            }
        }

        let uid = state.counter.issue()?;
        state.entries.insert(
            address,
            SharedEntry {
                uid,
                watch: handle.watch_shared(),
            },
        );
        tracing::trace!(uid = uid.get(), address, "shared identity assigned");

        let interval = self.config.prune_interval;
        if interval != 0 {
            state.since_prune += 1;
            if state.since_prune >= interval {
                let reclaimed = state.prune();
                tracing::debug!(reclaimed, "pruned shared identity entries");
            }
        }
        Ok(uid)
    }

    /// Identity of `handle` if it has one, without assigning.
    pub fn peek<H: SharedHandle + ?Sized>(&self, handle: &H) -> Option<Uid> {
        let state = self.state.lock();
        state
            .entries
            .get(&handle.address())
            .filter(|entry| entry.watch.is_alive())
            .map(|entry| entry.uid)
    }

    /// Entries currently held, including ones whose value was dropped.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// `true` if no handle is registered.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Ids issued since construction.
    pub fn issued(&self) -> u64 {
        self.state.lock().counter.issued()
    }

    /// Drop every entry whose value has been dropped. Returns how many went.
    pub fn prune(&self) -> usize {
        let reclaimed = self.state.lock().prune();
        tracing::debug!(reclaimed, "pruned shared identity entries");
        reclaimed
    }

    /// Snapshot of the registry's counters.
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();
        RegistryStats {
            entries: state.entries.len(),
            live: state.entries.values().filter(|e| e.watch.is_alive()).count(),
            issued: state.counter.issued(),
            next: state.counter.next(),
        }
    }
}

impl Default for SharedIdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedIdentityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedIdentityRegistry")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<H: SharedHandle + ?Sized> Identities<H> for SharedIdentityRegistry {
    fn identity_of(&self, handle: &H) -> Uid {
        self.identity_id(handle)
    }
}

/// The process-wide registry, built on first use and never torn down.
///
/// Prefer an explicit registry per container or per test; this one exists for
/// callers that need one identity space across the whole process.
pub fn global() -> &'static SharedIdentityRegistry {
    static GLOBAL: OnceLock<SharedIdentityRegistry> = OnceLock::new();
    GLOBAL.get_or_init(SharedIdentityRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    #[test]
    fn test_shared_ids_start_at_one_and_are_stable() {
        let reg = SharedIdentityRegistry::new();
        let a = Arc::new(1u64);
        let b = Arc::new(1u64);
        assert_eq!(reg.identity_id(&a), Uid::new(1));
        assert_eq!(reg.identity_id(&b), Uid::new(2));
        assert_eq!(reg.identity_id(&a), Uid::new(1));
        assert_eq!(reg.peek(&b), Some(Uid::new(2)));
    }

    #[test]
    fn test_concurrent_first_lookups_are_unique() {
        let reg = Arc::new(SharedIdentityRegistry::new());
        let values: Vec<Arc<u32>> = (0..64).map(Arc::new).collect();

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let reg = Arc::clone(&reg);
                let values = values.clone();
                thread::spawn(move || {
                    values
                        .iter()
                        .map(|v| reg.identity_id(v))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<Uid>> = workers
            .into_iter()
            .map(|w| w.join().expect("worker panicked"))
            .collect();

        // Every thread saw the same id for each value.
        for ids in &results[1..] {
            assert_eq!(ids, &results[0]);
        }
        let mut ids = results[0].clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        assert_eq!(reg.issued(), 64);
    }

    #[test]
    fn test_shared_prune() {
        let reg = SharedIdentityRegistry::new();
        let a = Arc::new(());
        reg.identity_id(&a);
        drop(a);
        assert_eq!(reg.stats().live, 0);
        assert_eq!(reg.prune(), 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_global_is_one_instance() {
        let a = Arc::new(String::from("process"));
        let first = global().identity_id(&a);
        assert_eq!(global().identity_id(&a), first);
        assert!(core::ptr::eq(global(), global()));
    }
}
