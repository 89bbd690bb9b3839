//! Fixture helpers for sharding tests.
//!
//! Small, fully populated lattices with single-letter endpoints, plus a
//! seeded RNG constructor for deterministic tests.
//!
//! Enable with the `test_utils` feature flag.

// Test utilities are allowed to panic for clearer test failures
#![allow(clippy::expect_used, clippy::panic)]

use rand::{SeedableRng, rngs::SmallRng};

use crate::{endpoint::Endpoint, lattice::Lattice};

/// Create a seeded RNG for deterministic tests.
#[must_use]
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// The first `count` lowercase letters as endpoints.
///
/// # Panics
///
/// Panics if `count` exceeds the alphabet.
#[must_use]
pub fn letter_endpoints(count: usize) -> Vec<Endpoint> {
    assert!(count <= 26, "only 26 letters available");
    (0..count)
        .map(|index| {
            #[allow(clippy::cast_possible_truncation)]
            let letter = char::from(b'a' + index as u8);
            Endpoint::from(letter.to_string())
        })
        .collect()
}

/// A one-dimensional lattice with a single cell of `endpoint_count` letters.
#[must_use]
pub fn single_cell_lattice(endpoint_count: usize) -> Lattice {
    let mut lattice = Lattice::new(["ring"]).expect("one dimension");
    lattice
        .add_endpoints_for_sector(["x"], letter_endpoints(endpoint_count))
        .expect("arity matches");
    lattice
}

/// A one-dimensional lattice with `cells` cells of `per_cell` letters each.
///
/// The letters are split contiguously: cell `az0` holds the first
/// `per_cell` letters, `az1` the next, and so on.
#[must_use]
pub fn striped_lattice(cells: usize, per_cell: usize) -> Lattice {
    let letters = letter_endpoints(cells * per_cell);
    let mut lattice = Lattice::new(["az"]).expect("one dimension");
    for (index, chunk) in letters.chunks(per_cell).enumerate() {
        lattice
            .add_endpoints_for_sector([format!("az{index}")], chunk.iter().cloned())
            .expect("arity matches");
    }
    lattice
}
