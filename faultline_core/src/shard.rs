//! Shuffle-shard selection over a lattice.
//!
//! Two strategies with deliberately different randomness scopes:
//!
//! - [`Lattice::simple_shuffle_shard`](crate::Lattice::simple_shuffle_shard)
//!   is stateless and identifier-keyed; the same caller always receives the
//!   same sub-lattice.
//! - [`StatefulSharder`] carries the history of every shard it has issued
//!   and bounds the overlap between any two of them.

mod simple;
mod stateful;

pub use stateful::StatefulSharder;
