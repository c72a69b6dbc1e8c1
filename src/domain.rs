//! Comparison domains: how each kind of type answers the protocol.
//!
//! Dispatch is resolved at compile time from the operand type:
//!
//! | Type | equality | ordering | hash |
//! |------|----------|----------|------|
//! | `T: Comparable` | `T::equals` | `T::less` | `T::hash_code` |
//! | primitives, `str`, `String` | strict `==` | `<` | FNV-1a of the value |
//! | `Rc<T>`, `Arc<T>` | same allocation | identity registry | FNV-1a of the address |
//! | tuples, `[T]`, `[T; N]`, `Vec<T>`, `Option<T>` | per element | lexicographic | per-element hashes folded |
//! | `ByValue<P>` (`Box`, `&T`, `Rc`, ...) | pointee | pointee | pointee |
//!
//! Both operands of every call share one static type, so comparing across
//! domains (say a number against its textual form) does not type-check.
//! Primitive equality is strict: no coercion between representations.
//!
//! Handles compare by identity even when the pointee implements
//! [`Comparable`]; wrap them in [`ByValue`](crate::by_value::ByValue) to use
//! the pointee's own logic. `Box<T>` and `&T` have no impls of their own: both
//! are fundamental types, so a downstream `impl Comparable for Box<Local>`
//! would overlap with the capability impls here. `ByValue` covers them.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::capability::Comparable;
use crate::handle::Handle;
use core::hash::Hasher;

use crate::hash::{default_hash, float32_hash, float64_hash, FnvHasher};
use crate::registry::Identities;

/// Equality and hashing for a comparison domain.
pub trait Equality {
    /// Domain equality; see [`equals`](crate::cmp::equals).
    fn equals_in_domain(&self, other: &Self) -> bool;

    /// Domain hash code; see [`hash`](crate::cmp::hash).
    fn hash_in_domain(&self) -> u64;
}

/// Strict ordering for a comparison domain, drawing fallback identities from
/// `R`.
pub trait Ordered<R: ?Sized>: Equality {
    /// Domain ordering; see [`less`](crate::cmp::less).
    fn less_in_domain(&self, other: &Self, ids: &R) -> bool;
}

// ─── Capability ─────────────────────────────────────────────────────────────

impl<T: Comparable + ?Sized> Equality for T {
    fn equals_in_domain(&self, other: &Self) -> bool {
        Comparable::equals(self, other)
    }

    fn hash_in_domain(&self) -> u64 {
        Comparable::hash_code(self)
    }
}

impl<T: Comparable + ?Sized, R: ?Sized> Ordered<R> for T {
    fn less_in_domain(&self, other: &Self, _ids: &R) -> bool {
        Comparable::less(self, other)
    }
}

// ─── Primitives ─────────────────────────────────────────────────────────────

macro_rules! primitive_domain {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Equality for $ty {
                fn equals_in_domain(&self, other: &Self) -> bool {
                    self == other
                }

                fn hash_in_domain(&self) -> u64 {
                    default_hash(self)
                }
            }

            impl<R: ?Sized> Ordered<R> for $ty {
                fn less_in_domain(&self, other: &Self, _ids: &R) -> bool {
                    self < other
                }
            }
        )*
    };
}

primitive_domain!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, (), str, String,
);

// `NaN` is unequal to itself, so floats break reflexivity for that one value.
macro_rules! float_domain {
    ($($ty:ty => $hash:ident),* $(,)?) => {
        $(
            impl Equality for $ty {
                fn equals_in_domain(&self, other: &Self) -> bool {
                    self == other
                }

                fn hash_in_domain(&self) -> u64 {
                    $hash(*self)
                }
            }

            impl<R: ?Sized> Ordered<R> for $ty {
                fn less_in_domain(&self, other: &Self, _ids: &R) -> bool {
                    self < other
                }
            }
        )*
    };
}

float_domain!(f32 => float32_hash, f64 => float64_hash);

// ─── Reference handles ──────────────────────────────────────────────────────

macro_rules! handle_domain {
    ($($handle:ident),* $(,)?) => {
        $(
            impl<T: ?Sized> Equality for $handle<T> {
                fn equals_in_domain(&self, other: &Self) -> bool {
                    self.address() == other.address()
                }

                fn hash_in_domain(&self) -> u64 {
                    default_hash(&self.address())
                }
            }

            impl<T: ?Sized, R: Identities<$handle<T>> + ?Sized> Ordered<R> for $handle<T> {
                fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
                    let left = ids.identity_of(self);
                    let right = ids.identity_of(other);
                    left < right
                }
            }
        )*
    };
}

handle_domain!(Rc, Arc);

// ─── Structural ─────────────────────────────────────────────────────────────

fn fold_hashes<I: IntoIterator<Item = u64>>(parts: I) -> u64 {
    let mut hasher = FnvHasher::new();
    for part in parts {
        hasher.write_u64(part);
    }
    hasher.finish()
}

impl<T: Equality> Equality for [T] {
    fn equals_in_domain(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(left, right)| left.equals_in_domain(right))
    }

    fn hash_in_domain(&self) -> u64 {
        let mut hasher = FnvHasher::new();
        hasher.write_usize(self.len());
        for item in self {
            hasher.write_u64(item.hash_in_domain());
        }
        hasher.finish()
    }
}

impl<T: Ordered<R>, R: ?Sized> Ordered<R> for [T] {
    fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
        for (left, right) in self.iter().zip(other) {
            if left.less_in_domain(right, ids) {
                return true;
            }
            if !left.equals_in_domain(right) {
                return false;
            }
        }
        self.len() < other.len()
    }
}

impl<T: Equality, const N: usize> Equality for [T; N] {
    fn equals_in_domain(&self, other: &Self) -> bool {
        <[T] as Equality>::equals_in_domain(self, other)
    }

    fn hash_in_domain(&self) -> u64 {
        <[T] as Equality>::hash_in_domain(self)
    }
}

impl<T: Ordered<R>, R: ?Sized, const N: usize> Ordered<R> for [T; N] {
    fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
        <[T] as Ordered<R>>::less_in_domain(self, other, ids)
    }
}

impl<T: Equality> Equality for Vec<T> {
    fn equals_in_domain(&self, other: &Self) -> bool {
        <[T] as Equality>::equals_in_domain(self, other)
    }

    fn hash_in_domain(&self) -> u64 {
        <[T] as Equality>::hash_in_domain(self)
    }
}

impl<T: Ordered<R>, R: ?Sized> Ordered<R> for Vec<T> {
    fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
        <[T] as Ordered<R>>::less_in_domain(self, other, ids)
    }
}

// `None` orders before every `Some`.
impl<T: Equality> Equality for Option<T> {
    fn equals_in_domain(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(left), Some(right)) => left.equals_in_domain(right),
            (None, None) => true,
            _ => false,
        }
    }

    fn hash_in_domain(&self) -> u64 {
        match self {
            Some(value) => fold_hashes([1, value.hash_in_domain()]),
            None => fold_hashes([0]),
        }
    }
}

impl<T: Ordered<R>, R: ?Sized> Ordered<R> for Option<T> {
    fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
        match (self, other) {
            (Some(left), Some(right)) => left.less_in_domain(right, ids),
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

macro_rules! tuple_domain {
    ($(($($name:ident $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Equality),+> Equality for ($($name,)+) {
                fn equals_in_domain(&self, other: &Self) -> bool {
                    $(self.$idx.equals_in_domain(&other.$idx))&&+
                }

                fn hash_in_domain(&self) -> u64 {
                    fold_hashes([$(self.$idx.hash_in_domain()),+])
                }
            }

            impl<R: ?Sized, $($name: Ordered<R>),+> Ordered<R> for ($($name,)+) {
                fn less_in_domain(&self, other: &Self, ids: &R) -> bool {
                    $(
                        if self.$idx.less_in_domain(&other.$idx, ids) {
                            return true;
                        }
                        if !self.$idx.equals_in_domain(&other.$idx) {
                            return false;
                        }
                    )+
                    false
                }
            }
        )*
    };
}

tuple_domain!(
    (A 0),
    (A 0, B 1),
    (A 0, B 1, C 2),
    (A 0, B 1, C 2, D 3),
    (A 0, B 1, C 2, D 3, E 4),
    (A 0, B 1, C 2, D 3, E 4, F 5),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmp::{equals, greater, hash, less};
    use crate::registry::IdentityRegistry;
    use alloc::vec;

    #[derive(Debug)]
    struct Celsius(i32);

    impl Comparable for Celsius {
        fn equals(&self, other: &Self) -> bool {
            self.0 == other.0
        }
        fn less(&self, other: &Self) -> bool {
            self.0 < other.0
        }
        fn hash_code(&self) -> u64 {
            default_hash(&self.0)
        }
    }

    #[test]
    fn test_tuples_compare_per_element() {
        let ids = IdentityRegistry::new();
        assert!(equals(&(1, 2), &(1, 2)));
        assert!(!equals(&(1, 2), &(1, 3)));
        assert!(less(&ids, &(1, 9), &(2, 0)));
        assert!(less(&ids, &(1, 2), &(1, 3)));
        assert!(!less(&ids, &(1, 3), &(1, 3)));
        assert!(greater(&ids, &('b', 1i8, 0u8), &('a', 9i8, 9u8)));
    }

    #[test]
    fn test_sequences_are_lexicographic() {
        let ids = IdentityRegistry::new();
        assert!(equals(&vec![1u8, 2], &vec![1u8, 2]));
        assert!(!equals(&vec![1u8], &vec![1u8, 1]));
        assert!(less(&ids, &vec![1u8], &vec![1u8, 0]));
        assert!(less(&ids, &vec![1u8, 2], &vec![1u8, 3]));
        assert!(!less(&ids, &vec![2u8], &vec![1u8, 9]));
        assert!(less(&ids, &[1, 2, 3], &[1, 2, 4]));
        assert!(less(&ids, &[0u8, 5][..], &[1u8][..]));
    }

    #[test]
    fn test_option_orders_none_first() {
        let ids = IdentityRegistry::new();
        assert!(less(&ids, &Some(3), &Some(4)));
        assert!(less(&ids, &None, &Some(0)));
        assert!(!less(&ids, &Some(0), &None));
        assert!(equals(&None::<i32>, &None));
        assert!(!equals(&Some(1), &None));
    }

    #[test]
    fn test_structural_hash_agrees_with_equality() {
        assert_eq!(hash(&vec![1u8]), hash(&vec![1u8]));
        assert_eq!(hash(&(1, 'x')), hash(&(1, 'x')));
        assert_eq!(hash(&Some(0.0f64)), hash(&Some(-0.0f64)));
        assert_eq!(hash(&[Celsius(4), Celsius(5)]), hash(&[Celsius(4), Celsius(5)]));
        assert_ne!(hash(&vec![1u8, 2]), hash(&vec![2u8, 1]));
        assert_ne!(hash(&None::<u8>), hash(&Some(0u8)));
    }

    #[test]
    fn test_structures_use_element_capability() {
        let ids = IdentityRegistry::new();
        let warm = vec![Celsius(20), Celsius(30)];
        let cold = vec![Celsius(20), Celsius(-5)];
        assert!(less(&ids, &cold, &warm));
        assert!(equals(&(Celsius(1), 2u8), &(Celsius(1), 2u8)));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_structures_of_handles_use_identity() {
        let ids = IdentityRegistry::new();
        let a = Rc::new(());
        let b = Rc::new(());
        let left = (0u8, Rc::clone(&a));
        let right = (0u8, Rc::clone(&b));
        assert!(less(&ids, &left, &right));
        assert!(!equals(&left, &right));
        assert!(equals(&vec![Rc::clone(&a)], &vec![a]));
        assert_eq!(ids.len(), 2);
    }
}
