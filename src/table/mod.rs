// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Table
//!
//! Functions of the in-plane momentum transfer, tabulated on a uniform grid and queried by linear
//! interpolation. The matrix-element and polarizability tables of a transition are built on the
//! same grid, so a single `Bracket` located in one of them can be used to read both.

use crate::error::{LookupError, TableError};
use crate::spectral::UniformSpace;

/// A single node of a `MomentumTable`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableRecord {
    /// Momentum transfer [1/m]
    pub momentum: f64,
    pub value: f64,
}

/// The position of a query momentum relative to the nodes of a table
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bracket {
    /// The query lies exactly on the node with this index
    Exact(usize),
    /// The query lies between nodes `lower` and `lower + 1`, a fraction `weight` of the way along
    Between { lower: usize, weight: f64 },
}

/// A function of momentum transfer sampled on a strictly increasing grid starting at zero
#[derive(Clone, Debug)]
pub struct MomentumTable {
    records: Vec<TableRecord>,
}

/// Queries above the last node by at most this relative amount are read from the last node
const UPPER_TOLERANCE: f64 = 1e-12;

impl MomentumTable {
    /// Evaluates `function` at every node of `space`
    pub fn tabulate<F>(space: &UniformSpace, mut function: F) -> Result<Self, TableError>
    where
        F: FnMut(f64) -> f64,
    {
        let mut records = allocate(space.num_points())?;
        records.extend(space.points().map(|momentum| TableRecord {
            momentum,
            value: function(momentum),
        }));
        Ok(Self { records })
    }

    /// A table on the same grid as `self`, with values given by a fallible `function`
    pub fn try_with_grid_of<F, E>(&self, mut function: F) -> Result<Self, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<TableError>,
    {
        let mut records = allocate(self.records.len())?;
        for record in self.records.iter() {
            records.push(TableRecord {
                momentum: record.momentum,
                value: function(record.momentum)?,
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn minimum_momentum(&self) -> f64 {
        self.records[0].momentum
    }

    pub fn maximum_momentum(&self) -> f64 {
        self.records[self.records.len() - 1].momentum
    }

    /// Finds the nodes bracketing `momentum`
    ///
    /// Queries below the first node, above the last node or which are not a number are errors:
    /// the table is never extrapolated. Queries which only exceed the last node through rounding are
    /// read from the last node.
    pub fn locate(&self, momentum: f64) -> Result<Bracket, LookupError> {
        let minimum = self.minimum_momentum();
        let maximum = self.maximum_momentum();
        let out_of_range = || LookupError::OutOfRange {
            momentum,
            minimum,
            maximum,
        };
        if !(momentum >= minimum) {
            return Err(out_of_range());
        }
        if momentum >= maximum {
            return if momentum <= maximum * (1. + UPPER_TOLERANCE) {
                Ok(Bracket::Exact(self.records.len() - 1))
            } else {
                Err(out_of_range())
            };
        }
        // First node at or above the query. Only zero when the query sits on the first node
        let index = self
            .records
            .partition_point(|record| record.momentum < momentum);
        if self.records[index].momentum == momentum {
            return Ok(Bracket::Exact(index));
        }
        let lower = &self.records[index - 1];
        let upper = &self.records[index];
        Ok(Bracket::Between {
            lower: index - 1,
            weight: (momentum - lower.momentum) / (upper.momentum - lower.momentum),
        })
    }

    /// The value of the table at a bracket found by `locate` on this table or one sharing its grid
    pub fn value_at(&self, bracket: &Bracket) -> f64 {
        match *bracket {
            Bracket::Exact(index) => self.records[index].value,
            Bracket::Between { lower, weight } => {
                let lower_value = self.records[lower].value;
                let upper_value = self.records[lower + 1].value;
                lower_value + (upper_value - lower_value) * weight
            }
        }
    }

    /// Linearly interpolates the table at `momentum`
    pub fn interpolate(&self, momentum: f64) -> Result<f64, LookupError> {
        let bracket = self.locate(momentum)?;
        Ok(self.value_at(&bracket))
    }

    /// Whether `other` is sampled on exactly the same grid
    pub fn shares_grid_with(&self, other: &MomentumTable) -> bool {
        self.len() == other.len()
            && self
                .records
                .iter()
                .zip(other.records.iter())
                .all(|(a, b)| a.momentum == b.momentum)
    }
}

fn allocate(number_of_points: usize) -> Result<Vec<TableRecord>, TableError> {
    let mut records = Vec::new();
    records
        .try_reserve_exact(number_of_points)
        .map_err(|source| TableError::Allocation {
            number_of_points,
            source,
        })?;
    Ok(records)
}

#[cfg(test)]
mod test {
    use super::{Bracket, MomentumTable};
    use crate::error::{LookupError, TableError};
    use crate::spectral::UniformSpaceBuilder;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn table(maximum: f64, number_of_points: usize) -> MomentumTable {
        let space = UniformSpaceBuilder::new()
            .with_number_of_points(number_of_points)
            .with_maximum(maximum)
            .build()
            .unwrap();
        MomentumTable::tabulate(&space, |q| (-q / maximum).exp() * (3. * q / maximum).cos())
            .unwrap()
    }

    #[test]
    fn tabulated_grid_spans_zero_to_the_maximum() {
        let table = table(2.5e9, 101);
        assert_eq!(table.len(), 101);
        assert_eq!(table.minimum_momentum(), 0.);
        assert_eq!(table.maximum_momentum(), 2.5e9);
        assert!(table
            .records()
            .windows(2)
            .all(|pair| pair[1].momentum > pair[0].momentum));
    }

    #[test]
    fn queries_beyond_the_last_node_fail() {
        let table = table(1e9, 11);
        assert!(matches!(
            table.interpolate(1.001e9),
            Err(LookupError::OutOfRange { .. })
        ));
        assert!(table.interpolate(-1.).is_err());
        assert!(table.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn queries_rounding_just_past_the_last_node_read_the_last_node() {
        let table = table(1e9, 11);
        let nudged = 1e9 * (1. + 2. * f64::EPSILON);
        assert_eq!(table.locate(nudged).unwrap(), Bracket::Exact(10));
        assert_eq!(
            table.interpolate(nudged).unwrap(),
            table.records()[10].value
        );
    }

    #[test]
    fn a_bracket_reads_every_table_on_the_grid() {
        let first = table(1e8, 21);
        let second = first
            .try_with_grid_of::<_, TableError>(|q| Ok(2. * q))
            .unwrap();
        assert!(first.shares_grid_with(&second));
        let bracket = first.locate(3.3e7).unwrap();
        assert_relative_eq!(second.value_at(&bracket), 6.6e7, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn nodes_are_returned_exactly(number_of_points in 2_usize..300, maximum in 1e3_f64..1e10) {
            let table = table(maximum, number_of_points);
            for record in table.records() {
                prop_assert_eq!(table.interpolate(record.momentum).unwrap(), record.value);
            }
        }

        #[test]
        fn interpolation_is_linear_between_neighbours(
            number_of_points in 2_usize..300,
            node in 0_usize..299,
            fraction in 0.01_f64..0.99
        ) {
            let table = table(1e9, number_of_points);
            let node = node % (number_of_points - 1);
            let lower = table.records()[node];
            let upper = table.records()[node + 1];
            let momentum = lower.momentum + fraction * (upper.momentum - lower.momentum);

            let value = table.interpolate(momentum).unwrap();
            let (low, high) = if lower.value < upper.value {
                (lower.value, upper.value)
            } else {
                (upper.value, lower.value)
            };
            let slack = 1e-12 * (high.abs() + low.abs());
            prop_assert!(value >= low - slack && value <= high + slack);

            let expected = lower.value + fraction * (upper.value - lower.value);
            prop_assert!((value - expected).abs() <= 1e-9 * (lower.value.abs() + upper.value.abs()) + 1e-15);
        }
    }
}
