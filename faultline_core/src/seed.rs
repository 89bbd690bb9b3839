//! Lattice seeding and identifier-keyed hashing.
//!
//! Shard selection must be reproducible: the same lattice, seed, and caller
//! identifier always pick the same endpoints. The seed keys a SipHash-2-4
//! hasher over the identifier bytes, and the resulting 64-bit key seeds the
//! per-call shuffle PRNG.

use core::hash::Hasher;

use rand::{SeedableRng, rngs::SmallRng};
use siphasher::sip::SipHasher24;

/// The fixed second SipHash key, so a seed stays a single `u64`.
const KEY1: u64 = 0x5fd8_9f06_1e4a_8c25;

/// Multiplier folded into the PRNG seed derivation.
const SEED_MULTIPLIER: u64 = 42;

/// A 64-bit seed for identifier-keyed shard selection.
///
/// Two lattices with the same contents but different seeds hand out
/// different (but individually stable) shards for the same identifier.
/// A zero seed collapses the PRNG seed derivation to zero for every
/// identifier; prefer any non-zero value.
///
/// # Examples
///
/// ```
/// use faultline_core::LatticeSeed;
///
/// let seed = LatticeSeed::new(7);
/// assert_eq!(seed.as_u64(), 7);
/// assert_eq!(
///     seed.identifier_key(b"customer-1"),
///     seed.identifier_key(b"customer-1"),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LatticeSeed(u64);

impl LatticeSeed {
    /// The seed used by lattices constructed without an explicit one.
    pub const DEFAULT: LatticeSeed = LatticeSeed(42);

    /// Constructor for a [`LatticeSeed`].
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// The raw seed value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create a SipHash-2-4 hasher keyed with this seed.
    #[must_use]
    pub fn hasher(&self) -> SipHasher24 {
        SipHasher24::new_with_keys(self.0, KEY1)
    }

    /// The 64-bit shard key for an identifier under this seed.
    #[must_use]
    pub fn identifier_key(&self, identifier: &[u8]) -> u64 {
        let mut hasher = self.hasher();
        hasher.write(identifier);
        hasher.finish()
    }

    /// The shuffle PRNG for an identifier.
    ///
    /// The seed derivation `seed · key · 42` (wrapping) is locked: changing
    /// it reassigns every identifier's shard.
    pub(crate) fn rng_for_identifier(&self, identifier: &[u8]) -> SmallRng {
        let key = self.identifier_key(identifier);
        SmallRng::seed_from_u64(self.0.wrapping_mul(key).wrapping_mul(SEED_MULTIPLIER))
    }
}

impl Default for LatticeSeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for LatticeSeed {
    fn from(seed: u64) -> Self {
        Self(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn identifier_keys_are_stable() {
        let seed = LatticeSeed::new(7);
        assert_eq!(
            seed.identifier_key(b"customer-1"),
            seed.identifier_key(b"customer-1"),
        );
    }

    #[test]
    fn identifier_keys_differ_across_identifiers() {
        let seed = LatticeSeed::new(7);
        assert_ne!(
            seed.identifier_key(b"customer-1"),
            seed.identifier_key(b"customer-2"),
        );
    }

    #[test]
    fn identifier_keys_differ_across_seeds() {
        assert_ne!(
            LatticeSeed::new(7).identifier_key(b"customer-1"),
            LatticeSeed::new(8).identifier_key(b"customer-1"),
        );
    }

    #[test]
    fn identifier_rng_streams_are_reproducible() {
        let seed = LatticeSeed::DEFAULT;
        let mut first = seed.rng_for_identifier(b"customer-1");
        let mut second = seed.rng_for_identifier(b"customer-1");
        let draws_first: Vec<u32> = (0..8).map(|_| first.random()).collect();
        let draws_second: Vec<u32> = (0..8).map(|_| second.random()).collect();
        assert_eq!(draws_first, draws_second);
    }
}
