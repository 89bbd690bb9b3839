//! Simple probabilistic shuffle sharding.
//!
//! The "simple signature" strategy: a keyed hash of a caller-supplied
//! identifier seeds a deterministic shuffle of each dimension's values, and
//! zipping the fronts of the shuffled lists picks one cell per slice of the
//! smallest dimension. Each identifier lands on a pseudo-random but stable
//! set of cells, and across identifiers the endpoint distribution is
//! approximately uniform.

use rand::{rngs::SmallRng, seq::SliceRandom};

use crate::{
    coordinate::Coordinate,
    dimension::DimensionValue,
    error::ShardError,
    lattice::Lattice,
};

impl Lattice {
    /// Compute the shuffle shard for `identifier`.
    ///
    /// For a fixed lattice state and seed, the same identifier always
    /// produces the same sub-lattice. The shard has the same dimension
    /// names as this lattice; each of its cells holds at most
    /// `endpoints_per_cell` endpoints drawn from the corresponding original
    /// cell.
    ///
    /// One-dimensional lattices have no other axis to zip against, so every
    /// value of the single dimension contributes a cell. Otherwise the
    /// shard has `min(dimension sizes)` cells.
    ///
    /// # Errors
    ///
    /// - [`ShardError::InvalidEndpointsPerCell`] if `endpoints_per_cell` is
    ///   zero.
    /// - [`ShardError::NoEndpoints`] if a chosen cell holds no endpoints,
    ///   which an asymmetrically populated lattice can produce.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline_core::Lattice;
    ///
    /// let mut lattice = Lattice::new(["az"])?;
    /// lattice.add_endpoints_for_sector(["az1"], ["a", "b", "c", "d"])?;
    /// lattice.add_endpoints_for_sector(["az2"], ["e", "f", "g", "h"])?;
    ///
    /// let shard = lattice.simple_shuffle_shard(b"customer-7", 2)?;
    /// assert_eq!(shard.all_endpoints().len(), 4);
    /// assert_eq!(shard, lattice.simple_shuffle_shard(b"customer-7", 2)?);
    /// # Ok::<(), faultline_core::ShardError>(())
    /// ```
    pub fn simple_shuffle_shard(
        &self,
        identifier: &[u8],
        endpoints_per_cell: usize,
    ) -> Result<Lattice, ShardError> {
        if endpoints_per_cell == 0 {
            return Err(ShardError::InvalidEndpointsPerCell);
        }

        let mut rng = self.seed().rng_for_identifier(identifier);
        let mut shard = Lattice::with_seed(self.seed(), self.dimension_names().iter().cloned())?;

        // Shuffle each dimension's value list, in lattice order.
        let mut shuffled: Vec<Vec<DimensionValue>> = self
            .dimension_names()
            .iter()
            .map(|name| {
                let mut values: Vec<DimensionValue> =
                    self.dimension_values(name).cloned().collect();
                values.shuffle(&mut rng);
                values
            })
            .collect();

        if shuffled.len() == 1 {
            for value in shuffled.swap_remove(0) {
                self.install_cell(
                    &mut shard,
                    Coordinate::from([value]),
                    endpoints_per_cell,
                    &mut rng,
                )?;
            }
            return Ok(shard);
        }

        // Zip the fronts of the shuffled lists: one cell per slice of the
        // smallest dimension.
        let slices = self
            .dimension_names()
            .iter()
            .map(|name| self.dimension_size(name))
            .min()
            .unwrap_or(0);

        let mut fronts: Vec<std::vec::IntoIter<DimensionValue>> =
            shuffled.into_iter().map(Vec::into_iter).collect();
        for _ in 0..slices {
            let values: Option<Vec<DimensionValue>> =
                fronts.iter_mut().map(Iterator::next).collect();
            let Some(values) = values else { break };
            self.install_cell(
                &mut shard,
                Coordinate::new(values),
                endpoints_per_cell,
                &mut rng,
            )?;
        }

        Ok(shard)
    }

    /// Shuffle the endpoints of one chosen cell and install the first
    /// `endpoints_per_cell` of them into `shard`.
    fn install_cell(
        &self,
        shard: &mut Lattice,
        coordinate: Coordinate,
        endpoints_per_cell: usize,
        rng: &mut SmallRng,
    ) -> Result<(), ShardError> {
        let mut endpoints = self.endpoints_for_sector(&coordinate)?;
        if endpoints.is_empty() {
            return Err(ShardError::NoEndpoints(coordinate));
        }
        endpoints.shuffle(rng);

        let picked = endpoints.into_iter().take(endpoints_per_cell).cloned();
        shard.add_endpoints_for_sector(coordinate, picked)?;
        Ok(())
    }
}
