//! # comparable-core
//!
//! Comparison and identity protocol: the comparator/hasher substrate for
//! sorting, merging, and ordered or hashed containers.
//!
//! ---
//!
//! Given two values of one comparison domain the protocol answers four
//! questions consistently: are they equal, does one order strictly before the
//! other, does it order strictly after, and what is a value's hash code. It
//! answers them even for types that define no comparison logic at all.
//!
//! **The capability**: a type implements [`Comparable`] to supply its own
//! `equals`, `less`, and `hash_code`. The free functions delegate to it.
//!
//! **Primitive fallback**: numbers, `bool`, `char`, `str`, and `String` compare
//! with strict `==` and `<`.
//!
//! **Structural domains**: tuples, slices, arrays, `Vec<T>`, and `Option<T>`
//! compare element by element; [`ByValue`] compares any pointer by its pointee.
//!
//! **Identity fallback**: reference handles (`Rc<T>`, `Arc<T>`) with no ordering
//! of their own are ordered by an [`IdentityRegistry`]: the first handle looked
//! up gets id 1, the next id 2, and so on. The order carries no meaning beyond
//! being stable and total, which is exactly what a balanced tree or a sort
//! needs.
//!
//! ## The pipeline
//!
//! ```text
//! container ──▶ equals / less / greater / hash ──▶ Comparable impl
//!                        │                      ├─▶ primitive == / <
//!                        │                      └─▶ IdentityRegistry (handles)
//!                        └─▶ compare / comparator / Keyed  (container adapters)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`capability`] | [`Comparable`] | The capability a type implements |
//! | [`cmp`] | [`equals`], [`less`], [`greater`], [`hash()`] | The protocol functions |
//! | [`domain`] | [`Equality`], [`Ordered`] | Static dispatch per kind of type |
//! | [`registry`] | [`IdentityRegistry`], [`RegistryConfig`] | Lazy handle → id side table |
//! | `shared` | `SharedIdentityRegistry`, `global` | Thread-safe registry (requires `std`) |
//! | [`handle`] | [`Handle`], [`Liveness`] | Reference identity of `Rc`/`Arc` |
//! | [`hash`](mod@hash) | [`FnvHasher`], [`default_hash`] | Default hash-code computation |
//! | [`keyed`] | [`Keyed`] | Hash-container key adapter |
//! | [`by_value`] | [`ByValue`] | Pointer compared through its pointee |
//! | [`uid`] | [`Uid`], [`IdentityError`] | Issued identities |
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `std` feature for the thread-safe registry and the process-wide instance.
//! Enable the `serde` feature to serialise [`Uid`] and [`RegistryStats`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// Pull in std when the feature is enabled (shared registry).
#[cfg(feature = "std")]
extern crate std;

pub mod uid;
pub mod handle;
pub mod registry;
pub mod hash;
pub mod capability;
pub mod domain;
pub mod cmp;
pub mod keyed;
pub mod by_value;
#[cfg(feature = "std")]
pub mod shared;

pub use by_value::ByValue;
pub use capability::Comparable;
pub use cmp::{compare, comparator, equals, greater, hash, less};
pub use domain::{Equality, Ordered};
pub use handle::{Handle, Liveness, SharedHandle};
pub use hash::{default_hash, FnvHasher};
pub use keyed::Keyed;
pub use registry::{Identities, IdentityRegistry, RegistryConfig, RegistryStats};
pub use uid::{IdentityError, Uid};

#[cfg(feature = "std")]
pub use shared::{global, SharedIdentityRegistry};
