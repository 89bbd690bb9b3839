//! Overlap-bounded stateful shuffle sharding.
//!
//! A [`StatefulSharder`] remembers every shard it has issued as the set of
//! forbidden `(k + 1)`-element endpoint subsets, and refuses to hand out a
//! new shard that would share more than `k` endpoints with any previous one.

use std::collections::BTreeSet;

use itertools::Itertools;
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::{
    coordinate::Coordinate,
    endpoint::Endpoint,
    error::ShardError,
    lattice::Lattice,
};

/// A canonically sorted endpoint subset taken from an issued shard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Fragment(Vec<Endpoint>);

impl Fragment {
    fn new(mut endpoints: Vec<Endpoint>) -> Self {
        endpoints.sort();
        Self(endpoints)
    }
}

/// Issues overlap-bounded shuffle shards, carrying history across calls.
///
/// Each call to [`shuffle_shard`](StatefulSharder::shuffle_shard) runs a
/// depth-first backtracking search over cell-by-cell endpoint choices and
/// rejects any candidate whose `(maximum_overlap + 1)`-element subsets
/// collide with a previously issued shard. Selection is intentionally
/// non-deterministic; the history in `self` is what carries between calls,
/// and `&mut self` serialises callers.
///
/// The search is exponential in the worst case; it is intended for small
/// lattices (tens of cells, tens of endpoints per cell) and modest shard
/// counts.
///
/// # Examples
///
/// ```
/// use faultline_core::{Lattice, StatefulSharder};
///
/// let mut lattice = Lattice::new(["az"])?;
/// lattice.add_endpoints_for_sector(["az1"], ["a", "b", "c", "d", "e", "f"])?;
///
/// let mut sharder = StatefulSharder::new();
/// let shard = sharder.shuffle_shard(&lattice, 2, 1)?;
/// assert_eq!(shard.all_endpoints().len(), 2);
/// # Ok::<(), faultline_core::ShardError>(())
/// ```
#[derive(Clone)]
pub struct StatefulSharder {
    fragments: BTreeSet<Fragment>,
    rng: SmallRng,
}

impl StatefulSharder {
    /// Create a sharder whose selection PRNG is seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Create a sharder with a fixed selection seed, for reproducible tests.
    #[must_use]
    pub fn with_rng_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            fragments: BTreeSet::new(),
            rng,
        }
    }

    /// The number of forbidden fragments recorded so far.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Issue a new shard whose endpoint set shares at most `maximum_overlap`
    /// endpoints with every shard this sharder has issued before.
    ///
    /// The shard has the same dimension names and seed as `lattice`; each of
    /// its cells holds `endpoints_per_cell` endpoints drawn from the
    /// corresponding original cell, and its cells are pairwise disjoint on
    /// every axis.
    ///
    /// # Errors
    ///
    /// - [`ShardError::InvalidEndpointsPerCell`] if `endpoints_per_cell` is
    ///   zero.
    /// - [`ShardError::NoShardsAvailable`] when the search exhausts every
    ///   candidate without selecting a single endpoint.
    pub fn shuffle_shard(
        &mut self,
        lattice: &Lattice,
        endpoints_per_cell: usize,
        maximum_overlap: usize,
    ) -> Result<Lattice, ShardError> {
        if endpoints_per_cell == 0 {
            return Err(ShardError::InvalidEndpointsPerCell);
        }

        let shard = self.search(lattice, endpoints_per_cell, maximum_overlap)?;
        let chosen: Vec<Endpoint> = shard.all_endpoints().into_iter().cloned().collect();
        if chosen.is_empty() {
            return Err(ShardError::NoShardsAvailable);
        }

        for fragment in chosen.iter().cloned().combinations(maximum_overlap + 1) {
            self.fragments.insert(Fragment::new(fragment));
        }
        tracing::debug!(
            endpoints = chosen.len(),
            fragments = self.fragments.len(),
            "issued stateful shuffle shard"
        );
        Ok(shard)
    }

    /// Depth-first backtracking over the lattice's coordinates.
    ///
    /// Returns the first collision-free sub-shard found, or an empty lattice
    /// when no coordinate here admits one; the caller treats the empty
    /// lattice as "no pick at this level" and keeps trying its own
    /// candidates.
    fn search(
        &mut self,
        lattice: &Lattice,
        endpoints_per_cell: usize,
        maximum_overlap: usize,
    ) -> Result<Lattice, ShardError> {
        let mut coordinates: Vec<Coordinate> = lattice.all_coordinates().cloned().collect();
        coordinates.shuffle(&mut self.rng);

        for coordinate in coordinates {
            // Cells sharing any axis value with this coordinate cannot join
            // the same shard; restrict them away dimension by dimension.
            let mut complement = lattice.clone();
            for (name, value) in lattice.dimension_names().iter().zip(coordinate.iter()) {
                complement = complement.simulate_failure(name, value)?;
            }

            let mut endpoints: Vec<&Endpoint> = lattice.endpoints_for_sector(&coordinate)?;
            endpoints.shuffle(&mut self.rng);

            for combination in endpoints.iter().copied().combinations(endpoints_per_cell) {
                let fragment: BTreeSet<Endpoint> =
                    combination.iter().map(|&endpoint| endpoint.clone()).collect();
                if fragment.len() >= maximum_overlap && self.collides(&fragment, maximum_overlap) {
                    continue;
                }

                let picked = self.search(&complement, endpoints_per_cell, maximum_overlap)?;
                let mut combined: BTreeSet<Endpoint> =
                    picked.all_endpoints().into_iter().cloned().collect();
                combined.extend(fragment.iter().cloned());
                if combined.len() >= maximum_overlap && self.collides(&combined, maximum_overlap) {
                    continue;
                }

                let mut shard = picked;
                shard.add_endpoints_for_sector(coordinate.clone(), fragment)?;
                return Ok(shard);
            }
        }

        Ok(Lattice::with_seed(
            lattice.seed(),
            lattice.dimension_names().iter().cloned(),
        )?)
    }

    /// Whether `endpoints` contains a forbidden
    /// `(maximum_overlap + 1)`-element subset.
    fn collides(&self, endpoints: &BTreeSet<Endpoint>, maximum_overlap: usize) -> bool {
        if endpoints.len() <= maximum_overlap {
            return false;
        }
        if endpoints.len() == maximum_overlap + 1 {
            let fragment = Fragment::new(endpoints.iter().cloned().collect());
            return self.fragments.contains(&fragment);
        }
        endpoints
            .iter()
            .cloned()
            .combinations(maximum_overlap + 1)
            .any(|subset| self.fragments.contains(&Fragment::new(subset)))
    }
}

impl Default for StatefulSharder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatefulSharder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulSharder")
            .field("fragments", &self.fragments.len())
            .finish_non_exhaustive()
    }
}
