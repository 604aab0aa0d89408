// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Spectral
//!
//! The discrete spaces the scattering integrals are evaluated on. Every space is a uniform grid
//! with a fixed `number_of_points` nodes distributed linearly between the two ends of a `Range`.
//! The wavevector spaces run from zero to a cut-off, the angular spaces over a full turn and the
//! momentum-transfer space from zero to the largest reachable transfer.

use crate::error::BuildError;
use ndarray::Array1;
use std::ops::Range;

/// Builder for a `UniformSpace`
///
/// The range is tracked in the type so that `build` is only available once it is provided
pub struct UniformSpaceBuilder<RefRange> {
    number_of_points: Option<usize>,
    range: RefRange,
}

impl UniformSpaceBuilder<()> {
    pub fn new() -> Self {
        Self {
            number_of_points: None,
            range: (),
        }
    }
}

impl Default for UniformSpaceBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefRange> UniformSpaceBuilder<RefRange> {
    pub fn with_number_of_points(self, number_of_points: usize) -> Self {
        UniformSpaceBuilder {
            number_of_points: Some(number_of_points),
            range: self.range,
        }
    }

    pub fn with_range(self, range: Range<f64>) -> UniformSpaceBuilder<Range<f64>> {
        UniformSpaceBuilder {
            number_of_points: self.number_of_points,
            range,
        }
    }

    /// A range from zero to `maximum`, as used for the wavevector and momentum transfer spaces
    pub fn with_maximum(self, maximum: f64) -> UniformSpaceBuilder<Range<f64>> {
        self.with_range(0_f64..maximum)
    }

    /// A full turn, as used for the in-plane angles
    pub fn with_full_turn(self) -> UniformSpaceBuilder<Range<f64>> {
        self.with_range(0_f64..2_f64 * std::f64::consts::PI)
    }
}

impl UniformSpaceBuilder<Range<f64>> {
    pub fn build(self) -> Result<UniformSpace, BuildError> {
        let number_of_points = self
            .number_of_points
            .ok_or_else(|| BuildError::Grid("the number of points was never set".into()))?;
        if number_of_points < 2 {
            return Err(BuildError::Grid(format!(
                "a uniform space needs at least two points, {} requested",
                number_of_points
            )));
        }
        if !(self.range.end >= self.range.start) {
            return Err(BuildError::Grid(format!(
                "invalid range {:?} for a uniform space",
                self.range
            )));
        }
        let step = (self.range.end - self.range.start) / (number_of_points - 1) as f64;
        Ok(UniformSpace {
            start: self.range.start,
            end: self.range.end,
            step,
            number_of_points,
        })
    }
}

/// A uniform grid of `number_of_points` nodes, the first at `start` and the last at `end`
#[derive(Clone, Debug, PartialEq)]
pub struct UniformSpace {
    start: f64,
    end: f64,
    step: f64,
    number_of_points: usize,
}

impl UniformSpace {
    pub fn num_points(&self) -> usize {
        self.number_of_points
    }

    /// The spacing between adjacent nodes
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The value at node `index`
    ///
    /// The last node is pinned to `end` so the space covers its range exactly
    pub fn point(&self, index: usize) -> f64 {
        if index + 1 == self.number_of_points {
            self.end
        } else {
            self.start + self.step * index as f64
        }
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        (0..self.number_of_points).map(move |index| self.point(index))
    }
}

/// Enum for discrete integration methods
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub enum IntegrationRule {
    /// Trapezium rule
    Trapezium,
    /// Romberg integration
    Romberg,
    /// Three point integration
    ThreePoint,
}

impl Default for IntegrationRule {
    fn default() -> Self {
        IntegrationRule::Trapezium
    }
}

impl IntegrationRule {
    /// The quadrature weights for a uniform grid of `num_points` nodes, in units of the grid step
    pub fn generate_weights(&self, num_points: usize) -> Array1<f64> {
        // A closure generating the weight for a given point index
        let weight = |idx: usize| -> f64 {
            match self {
                IntegrationRule::Trapezium => {
                    if (idx == 0) | (idx == num_points - 1) {
                        0.5
                    } else {
                        1.
                    }
                }
                IntegrationRule::Romberg => {
                    if (idx == 0) | (idx == num_points - 1) {
                        1. / 3.
                    } else if idx % 2 == 0 {
                        2. / 3.
                    } else {
                        4. / 3.
                    }
                }
                IntegrationRule::ThreePoint => {
                    if (idx == 0) | (idx == num_points - 1) {
                        17. / 48.
                    } else if (idx == 1) | (idx == num_points - 2) {
                        59. / 48.
                    } else if (idx == 2) | (idx == num_points - 3) {
                        43. / 48.
                    } else if (idx == 3) | (idx == num_points - 4) {
                        49. / 48.
                    } else {
                        1.
                    }
                }
            }
        };
        Array1::from_iter((0..num_points).map(weight))
    }

    /// Checks the weights of the rule are valid on a grid of `num_points` nodes
    ///
    /// Simpson weights alternate between interior nodes and need an even number of strips. The
    /// end-corrected rule modifies four nodes at each end, so needs at least eight.
    pub fn check_grid(&self, num_points: usize) -> Result<(), BuildError> {
        let fits = match self {
            IntegrationRule::Trapezium => num_points >= 2,
            IntegrationRule::Romberg => num_points >= 3 && num_points % 2 == 1,
            IntegrationRule::ThreePoint => num_points >= 8,
        };
        if fits {
            Ok(())
        } else {
            Err(BuildError::IntegrationGrid {
                rule: *self,
                number_of_points: num_points,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::{IntegrationRule, UniformSpaceBuilder};
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use rand::Rng;

    #[test]
    fn uniform_space_spans_its_range_exactly() {
        let mut rng = rand::thread_rng();
        let maximum: f64 = rng.gen_range(1e6..1e10);
        let number_of_points = rng.gen_range(2..500);
        let space = UniformSpaceBuilder::new()
            .with_number_of_points(number_of_points)
            .with_maximum(maximum)
            .build()
            .unwrap();

        let points = space.points().collect::<Vec<_>>();
        assert_eq!(points.len(), number_of_points);
        assert_eq!(points[0], 0.);
        assert_eq!(points[number_of_points - 1], maximum);
        assert!(points.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn full_turn_step_matches_number_of_strips() {
        let space = UniformSpaceBuilder::new()
            .with_number_of_points(101)
            .with_full_turn()
            .build()
            .unwrap();
        assert_relative_eq!(space.step(), 2. * std::f64::consts::PI / 100.);
    }

    #[test]
    fn a_single_point_space_is_rejected() {
        let result = UniformSpaceBuilder::new()
            .with_number_of_points(1)
            .with_maximum(1.)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn integration_rules_are_exact_for_linear_integrands() {
        let number_of_points = 41;
        let step = 0.25;
        let integrand = Array1::from_iter((0..number_of_points).map(|idx| 3. * idx as f64 * step));
        let exact = 1.5 * ((number_of_points - 1) as f64 * step).powi(2);
        for rule in [
            IntegrationRule::Trapezium,
            IntegrationRule::Romberg,
            IntegrationRule::ThreePoint,
        ] {
            let weights = rule.generate_weights(number_of_points);
            assert_relative_eq!(integrand.dot(&weights) * step, exact, max_relative = 1e-12);
        }
    }

    #[test]
    fn rules_report_the_grids_they_cannot_integrate() {
        assert!(IntegrationRule::Trapezium.check_grid(2).is_ok());
        assert!(IntegrationRule::Trapezium.check_grid(1).is_err());
        assert!(IntegrationRule::Romberg.check_grid(41).is_ok());
        assert!(IntegrationRule::Romberg.check_grid(40).is_err());
        assert!(IntegrationRule::Romberg.check_grid(1).is_err());
        assert!(IntegrationRule::ThreePoint.check_grid(8).is_ok());
        assert!(IntegrationRule::ThreePoint.check_grid(7).is_err());
    }
}
