//! Shuffle sharding over an N-dimensional availability lattice.
//!
//! Shuffle sharding is a fault-isolation technique, popularized by the
//! Infima library behind Amazon Route 53, that assigns each caller a small,
//! deterministic subset of backend endpoints so that the pairwise overlap
//! between any two callers' shards stays bounded. A poisonous request then
//! corrupts only a small fraction of the fleet, and the probability that it
//! takes another caller down with it is vanishingly small.
//!
//! The [`Lattice`] decomposes a fleet by independent availability dimensions
//! (availability zone, software version, …) into cells of endpoints, and
//! supports failure simulation by projecting slices of cells away. Two
//! sharding strategies operate on it:
//!
//! - [`Lattice::simple_shuffle_shard`] keys a deterministic shuffle on a
//!   hash of a caller identifier: stateless, reproducible, approximately
//!   uniform across identifiers.
//! - [`StatefulSharder`] runs an overlap-constrained combinatorial search
//!   against the history of every shard it has issued.
//!
//! # Example
//!
//! ```
//! use faultline_core::{Lattice, StatefulSharder};
//!
//! let mut lattice = Lattice::new(["az", "version"])?;
//! lattice.add_endpoints_for_sector(["us-east-1", "0.9"], ["a", "b", "c", "d"])?;
//! lattice.add_endpoints_for_sector(["us-east-1", "1.1"], ["e", "f", "g", "h"])?;
//! lattice.add_endpoints_for_sector(["us-west-1", "0.9"], ["i", "j", "k", "l"])?;
//! lattice.add_endpoints_for_sector(["us-west-1", "1.1"], ["m", "n", "o", "p"])?;
//!
//! // Every caller gets a stable pseudo-random pair of cells.
//! let shard = lattice.simple_shuffle_shard(b"customer-42", 2)?;
//! assert_eq!(shard.all_coordinates().count(), 2);
//! assert_eq!(shard.all_endpoints().len(), 4);
//! assert_eq!(shard, lattice.simple_shuffle_shard(b"customer-42", 2)?);
//!
//! // Stateful shards never share more than one endpoint with each other.
//! let mut sharder = StatefulSharder::new();
//! let first = sharder.shuffle_shard(&lattice, 1, 1)?;
//! let second = sharder.shuffle_shard(&lattice, 1, 1)?;
//! assert_eq!(first.all_endpoints().len(), 2);
//! assert_eq!(second.all_endpoints().len(), 2);
//! # Ok::<(), faultline_core::ShardError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    future_incompatible,
    let_underscore,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style
)]
#![deny(rust_2018_idioms, unreachable_pub, unused_extern_crates)]
#![forbid(unsafe_code)]

pub mod coordinate;
pub mod dimension;
pub mod endpoint;
pub mod error;
pub mod lattice;
pub mod seed;
pub mod shard;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use coordinate::Coordinate;
pub use dimension::{DimensionName, DimensionValue};
pub use endpoint::Endpoint;
pub use error::{LatticeError, ShardError};
pub use lattice::Lattice;
pub use seed::LatticeSeed;
pub use shard::StatefulSharder;
