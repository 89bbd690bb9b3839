//! Error types for lattice construction and shard selection.

use thiserror::Error;

use crate::{coordinate::Coordinate, dimension::DimensionName};

/// An error from constructing or mutating a [`Lattice`](crate::Lattice).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    /// A lattice needs at least one dimension.
    #[error("a lattice requires at least one dimension")]
    NoDimensions,

    /// A coordinate's arity does not match the lattice's dimension count.
    #[error("coordinate has {got} values but the lattice has {expected} dimensions")]
    DimensionMismatch {
        /// The lattice's dimension count.
        expected: usize,
        /// The number of values the coordinate carried.
        got: usize,
    },

    /// The named dimension is not part of the lattice.
    #[error("unknown dimension name: {0}")]
    UnknownDimension(DimensionName),
}

/// An error from computing a shuffle shard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    /// `endpoints_per_cell` must be at least one.
    #[error("endpoints per cell must be at least one")]
    InvalidEndpointsPerCell,

    /// A cell chosen by the sharder holds no endpoints.
    #[error("no endpoints available in sector {0}")]
    NoEndpoints(Coordinate),

    /// The overlap-bounded search exhausted every candidate shard.
    #[error("no shards available")]
    NoShardsAvailable,

    /// A lattice operation failed while assembling the shard.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
}
