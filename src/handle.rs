//! Reference handles: values whose identity is their allocation.
//!
//! Plain Rust values have no stable identity: they move, and borrowing one
//! says nothing about whether the same memory will later hold another value.
//! Reference-counted pointers do. Every `Rc`/`Arc` allocation keeps its address
//! for its whole life, and a weak pointer to it tells whether the value is
//! still around without keeping it alive.
//!
//! The registries key entries by [`Handle::address`] and keep the
//! [`Liveness`] watch from [`Handle::watch`] so a dropped value can be told
//! apart from a new one at a recycled address.

use alloc::boxed::Box;
use alloc::rc::{self, Rc};
use alloc::sync::{self, Arc};

/// Non-owning watch reporting whether a watched value is still alive.
pub trait Liveness {
    /// `true` while at least one strong reference to the value exists.
    fn is_alive(&self) -> bool;
}

impl<T: ?Sized> Liveness for rc::Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

impl<T: ?Sized> Liveness for sync::Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

/// A value with reference identity, usable as an identity registry key.
pub trait Handle {
    /// Address of the shared allocation. Clones of one handle agree.
    fn address(&self) -> usize;

    /// Weak watch on the allocation, stored alongside the registry entry.
    ///
    /// The watch lives as long as the pointee's borrows do, so handles over
    /// borrowed data (`Rc<Row<'a>>`) are registry keys too.
    fn watch<'a>(&self) -> Box<dyn Liveness + 'a>
    where
        Self: 'a;
}

/// A [`Handle`] whose watch may be shared across threads.
pub trait SharedHandle: Handle {
    /// Thread-safe variant of [`Handle::watch`].
    fn watch_shared(&self) -> Box<dyn Liveness + Send + Sync>;
}

impl<T: ?Sized> Handle for Rc<T> {
    fn address(&self) -> usize {
        Rc::as_ptr(self).cast::<()>() as usize
    }

    fn watch<'a>(&self) -> Box<dyn Liveness + 'a>
    where
        Self: 'a,
    {
        Box::new(Rc::downgrade(self))
    }
}

impl<T: ?Sized> Handle for Arc<T> {
    fn address(&self) -> usize {
        Arc::as_ptr(self).cast::<()>() as usize
    }

    fn watch<'a>(&self) -> Box<dyn Liveness + 'a>
    where
        Self: 'a,
    {
        Box::new(Arc::downgrade(self))
    }
}

impl<T: ?Sized + Send + Sync + 'static> SharedHandle for Arc<T> {
    fn watch_shared(&self) -> Box<dyn Liveness + Send + Sync> {
        Box::new(Arc::downgrade(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn test_clones_share_address() {
        let a = Rc::new(String::from("x"));
        let b = Rc::clone(&a);
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_equal_contents_distinct_address() {
        let a = Arc::new(5u32);
        let b = Arc::new(5u32);
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_watch_follows_strong_count() {
        let a = Rc::new([1u8, 2, 3]);
        let watch = a.watch();
        assert!(watch.is_alive());
        drop(a);
        assert!(!watch.is_alive());
    }

    #[test]
    fn test_unsized_handles() {
        let s: Rc<str> = Rc::from("abc");
        let watch = s.watch();
        assert_ne!(s.address(), 0);
        assert!(watch.is_alive());

        let shared: Arc<[u8]> = Arc::from(&[1u8, 2][..]);
        let watch = shared.watch_shared();
        drop(shared);
        assert!(!watch.is_alive());
    }

    #[test]
    fn test_watch_over_borrowed_pointee() {
        let source = String::from("borrowed");
        let view: Rc<&str> = Rc::new(source.as_str());
        let watch = view.watch();
        assert!(watch.is_alive());
        drop(view);
        assert!(!watch.is_alive());
    }
}
