//! The N-dimensional availability lattice.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    coordinate::Coordinate,
    dimension::{DimensionName, DimensionValue},
    endpoint::Endpoint,
    error::LatticeError,
    seed::LatticeSeed,
};

/// An indexed container of backend endpoints keyed by sector coordinates.
///
/// Dimensions are independent availability axes (availability zone, software
/// version, …). Each cell holds the endpoints that share one value on every
/// axis. The lattice is populated additively through
/// [`add_endpoints_for_sector`](Lattice::add_endpoints_for_sector): values
/// and endpoints accumulate and never vanish. Projections produced by
/// [`simulate_failure`](Lattice::simulate_failure) and by the sharders are
/// independent lattices owning their own cells.
///
/// Dimension names are sorted and deduplicated at construction and frozen
/// thereafter; all coordinates use that order positionally. Enumeration
/// accessors observe endpoints and coordinates in sorted order.
///
/// # Examples
///
/// ```
/// use faultline_core::Lattice;
///
/// let mut lattice = Lattice::new(["az", "version"])?;
/// lattice.add_endpoints_for_sector(["us-east-1", "0.9"], ["x", "y"])?;
/// lattice.add_endpoints_for_sector(["us-west-1", "1.1"], ["a", "b"])?;
///
/// let survivors = lattice.simulate_failure(&"az".into(), &"us-east-1".into())?;
/// let names: Vec<_> = survivors.all_endpoints().iter().map(|e| e.as_str()).collect();
/// assert_eq!(names, ["a", "b"]);
/// # Ok::<(), faultline_core::LatticeError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Lattice {
    seed: LatticeSeed,
    dimension_names: Vec<DimensionName>,
    values_by_dimension: BTreeMap<DimensionName, BTreeSet<DimensionValue>>,
    endpoints_by_coordinate: BTreeMap<Coordinate, BTreeSet<Endpoint>>,
}

impl Lattice {
    /// Construct an empty lattice with the default seed.
    ///
    /// Duplicate dimension names are collapsed; the canonical dimension
    /// order is the sorted order of the deduplicated input.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NoDimensions`] if `dimension_names` is empty.
    pub fn new(
        dimension_names: impl IntoIterator<Item = impl Into<DimensionName>>,
    ) -> Result<Self, LatticeError> {
        Self::with_seed(LatticeSeed::DEFAULT, dimension_names)
    }

    /// Construct an empty lattice with an explicit seed.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NoDimensions`] if `dimension_names` is empty.
    pub fn with_seed(
        seed: LatticeSeed,
        dimension_names: impl IntoIterator<Item = impl Into<DimensionName>>,
    ) -> Result<Self, LatticeError> {
        let mut names: Vec<DimensionName> =
            dimension_names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LatticeError::NoDimensions);
        }
        names.sort();
        names.dedup();

        let values_by_dimension = names
            .iter()
            .map(|name| (name.clone(), BTreeSet::new()))
            .collect();

        Ok(Self {
            seed,
            dimension_names: names,
            values_by_dimension,
            endpoints_by_coordinate: BTreeMap::new(),
        })
    }

    /// The seed identifier-keyed shard selection derives from.
    #[must_use]
    pub const fn seed(&self) -> LatticeSeed {
        self.seed
    }

    /// The frozen, sorted dimension names.
    #[must_use]
    pub fn dimension_names(&self) -> &[DimensionName] {
        &self.dimension_names
    }

    /// The name of the dimension at `index`, for positional iteration.
    #[must_use]
    pub fn dimension_name(&self, index: usize) -> Option<&DimensionName> {
        self.dimension_names.get(index)
    }

    /// The sorted values seen on `dimension`.
    ///
    /// Unknown dimension names yield an empty iterator.
    pub fn dimension_values<'a>(
        &'a self,
        dimension: &DimensionName,
    ) -> impl Iterator<Item = &'a DimensionValue> + use<'a> {
        self.values_by_dimension
            .get(dimension)
            .into_iter()
            .flatten()
    }

    /// The number of distinct values seen on `dimension`.
    ///
    /// Unknown dimension names have size zero.
    #[must_use]
    pub fn dimension_size(&self, dimension: &DimensionName) -> usize {
        self.values_by_dimension
            .get(dimension)
            .map_or(0, BTreeSet::len)
    }

    /// Map from each dimension name to the number of values seen on it.
    #[must_use]
    pub fn dimensionality(&self) -> BTreeMap<&DimensionName, usize> {
        self.dimension_names
            .iter()
            .map(|name| (name, self.dimension_size(name)))
            .collect()
    }

    /// Union-add `endpoints` into the cell at `coordinate`.
    ///
    /// The cell is recorded even when `endpoints` is empty, and each of the
    /// coordinate's values is added to its dimension's value set. Unknown
    /// values are permitted; they extend the value universe. Repeated
    /// identical calls are idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::DimensionMismatch`] if the coordinate's arity
    /// does not match the lattice's dimension count.
    pub fn add_endpoints_for_sector(
        &mut self,
        coordinate: impl Into<Coordinate>,
        endpoints: impl IntoIterator<Item = impl Into<Endpoint>>,
    ) -> Result<(), LatticeError> {
        let coordinate = coordinate.into();
        self.check_arity(coordinate.len())?;

        for (name, value) in self.dimension_names.iter().zip(coordinate.iter()) {
            self.values_by_dimension
                .entry(name.clone())
                .or_default()
                .insert(value.clone());
        }

        self.endpoints_by_coordinate
            .entry(coordinate)
            .or_default()
            .extend(endpoints.into_iter().map(Into::into));
        Ok(())
    }

    /// The sorted endpoints in the cell at `coordinate`.
    ///
    /// Returns an empty list if the cell was never populated.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::DimensionMismatch`] if the coordinate's arity
    /// does not match the lattice's dimension count.
    pub fn endpoints_for_sector(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<&Endpoint>, LatticeError> {
        self.check_arity(coordinate.len())?;
        Ok(self
            .endpoints_by_coordinate
            .get(coordinate)
            .into_iter()
            .flatten()
            .collect())
    }

    /// The sorted, deduplicated endpoints across all cells.
    #[must_use]
    pub fn all_endpoints(&self) -> Vec<&Endpoint> {
        let endpoints: BTreeSet<&Endpoint> =
            self.endpoints_by_coordinate.values().flatten().collect();
        endpoints.into_iter().collect()
    }

    /// The coordinates of every recorded cell, in sorted order.
    pub fn all_coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.endpoints_by_coordinate.keys()
    }

    /// Project away every cell whose value on `dimension` equals `value`.
    ///
    /// The surviving cells are replayed into a fresh lattice with the same
    /// dimension names and seed, so the sub-lattice's value universe is
    /// derived from the cells actually installed; the failed value does not
    /// linger in [`dimension_values`](Lattice::dimension_values).
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::UnknownDimension`] if `dimension` is not one
    /// of this lattice's dimensions.
    pub fn simulate_failure(
        &self,
        dimension: &DimensionName,
        value: &DimensionValue,
    ) -> Result<Lattice, LatticeError> {
        let index = self
            .dimension_names
            .iter()
            .position(|name| name == dimension)
            .ok_or_else(|| LatticeError::UnknownDimension(dimension.clone()))?;

        let mut survivor = Lattice::with_seed(self.seed, self.dimension_names.iter().cloned())?;
        for (coordinate, endpoints) in &self.endpoints_by_coordinate {
            if coordinate.get(index) == Some(value) {
                continue;
            }
            survivor.add_endpoints_for_sector(coordinate.clone(), endpoints.iter().cloned())?;
        }

        tracing::trace!(
            %dimension,
            %value,
            surviving_cells = survivor.endpoints_by_coordinate.len(),
            "simulated failure"
        );
        Ok(survivor)
    }

    fn check_arity(&self, got: usize) -> Result<(), LatticeError> {
        let expected = self.dimension_names.len();
        if got == expected {
            Ok(())
        } else {
            Err(LatticeError::DimensionMismatch { expected, got })
        }
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lattice")
            .field("dimensions", &self.dimension_names)
            .field("cells", &self.endpoints_by_coordinate.len())
            .finish()
    }
}
