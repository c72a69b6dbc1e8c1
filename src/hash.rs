//! Default hash-code computation for values without the capability.
//!
//! 64-bit FNV-1a over the bytes a value feeds through [`core::hash::Hash`].
//! Deterministic: no per-process seed, so the same value hashes the same
//! across runs (on targets of the same endianness and pointer width).

use core::hash::{Hash, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hasher.
#[derive(Clone, Copy, Debug)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    /// Fresh hasher at the FNV offset basis.
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Hash code of any [`Hash`] value.
///
/// Agrees with `==` for every type whose `Hash` and `Eq` agree, which is the
/// standard library contract.
pub fn default_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FnvHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Hash code of an `f32`. `0.0` and `-0.0` compare equal so they hash equal.
pub fn float32_hash(value: f32) -> u64 {
    let bits = if value == 0.0 { 0 } else { value.to_bits() };
    default_hash(&bits)
}

/// Hash code of an `f64`. `0.0` and `-0.0` compare equal so they hash equal.
pub fn float64_hash(value: f64) -> u64 {
    let bits = if value == 0.0 { 0 } else { value.to_bits() };
    default_hash(&bits)
}
