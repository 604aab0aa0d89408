// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The Coulomb form factor
//!
//! `A(q) = ∫dz ∫dz' ψ_i(z) ψ_f(z) ψ_j(z') ψ_g(z') exp(-q|z - z'|)`
//!
//! The modulus is removed by splitting the inner integral at `z`, so for each momentum transfer
//! the form factor costs two cumulative sums over the spatial grid rather than a double integral.

use super::Transition;
use crate::error::{ScatteringError, TableError};
use crate::spectral::IntegrationRule;
use crate::subband::Heterostructure;
use ndarray::{Array1, ArrayView1, Zip};

/// The form factor of a single transition, ready to be evaluated at any momentum transfer
pub struct FormFactor<'a> {
    z: ArrayView1<'a, f64>,
    /// ψ_i ψ_f on the spatial grid
    initial_final: Array1<f64>,
    /// ψ_j ψ_g on the spatial grid
    partner_final: Array1<f64>,
    weights: Array1<f64>,
    step: f64,
}

impl<'a> FormFactor<'a> {
    /// Fails when a subband index is out of range, or when `rule` cannot integrate over the
    /// spatial grid of `structure`
    pub fn new(
        structure: &'a Heterostructure,
        transition: &Transition,
        rule: IntegrationRule,
    ) -> Result<Self, ScatteringError> {
        rule.check_grid(structure.z().len())?;
        let [i, j, f, g] = transition.indices();
        let initial_final =
            structure.subband(i)?.wavefunction() * structure.subband(f)?.wavefunction();
        let partner_final =
            structure.subband(j)?.wavefunction() * structure.subband(g)?.wavefunction();
        Ok(Self {
            z: structure.z().view(),
            initial_final,
            partner_final,
            weights: rule.generate_weights(structure.z().len()),
            step: structure.step(),
        })
    }

    /// The form factor at in-plane momentum transfer `momentum` [1/m]
    pub fn evaluate(&self, momentum: f64) -> f64 {
        let kernel = exponential_kernel(momentum, self.z);
        let upper = upper_convolution(&self.partner_final, &kernel, self.step);
        let lower = lower_convolution(&self.partner_final, &kernel, self.step);

        let integrand = Zip::from(&self.initial_final)
            .and(&upper)
            .and(&lower)
            .and(&kernel)
            .map_collect(|&initial_final, &upper, &lower, &kernel| {
                initial_final * (lower / kernel + upper * kernel)
            });
        integrand.dot(&self.weights) * self.step
    }
}

/// `exp(q (z - z_0))`, anchored on the first grid point so the largest exponent is `q L`
fn exponential_kernel(momentum: f64, z: ArrayView1<f64>) -> Array1<f64> {
    let origin = z[0];
    z.mapv(|position| (momentum * (position - origin)).exp())
}

/// `C+(z) = ∫_z^∞ dz' ψ(z') / exp(q z')`, accumulated inward from the far end of the grid
///
/// The sum includes the point `z` itself
fn upper_convolution(product: &Array1<f64>, kernel: &Array1<f64>, step: f64) -> Array1<f64> {
    let mut result = Array1::zeros(product.len());
    let mut running = 0.;
    for index in (0..product.len()).rev() {
        running += product[index] / kernel[index] * step;
        result[index] = running;
    }
    result
}

/// `C-(z) = ∫_{-∞}^z dz' ψ(z') exp(q z')`, accumulated outward from the near end of the grid
///
/// The sum stops one point short of `z`, so no point is counted in both halves
fn lower_convolution(product: &Array1<f64>, kernel: &Array1<f64>, step: f64) -> Array1<f64> {
    let mut result = Array1::zeros(product.len());
    for index in 1..product.len() {
        result[index] = result[index - 1] + product[index - 1] * kernel[index - 1] * step;
    }
    result
}

/// The largest in-plane momentum transfer reachable by a transition
///
/// The initial and partner carriers have wavevectors at most `initial_maximum` and
/// `partner_maximum`, so their relative wavevector is at most the sum `K` of the two. The
/// momentum transfer then peaks at `sqrt(2K^2 + Δ + 2K sqrt(K^2 + Δ)) / 2`.
///
/// Returns `None` when `K^2 + Δ` is negative. No pair of carriers below the barrier carries
/// enough energy for the transition, so every momentum transfer it could need is imaginary.
pub fn maximum_momentum_transfer(
    initial_maximum: f64,
    partner_maximum: f64,
    delta_k0_squared: f64,
) -> Result<Option<f64>, TableError> {
    let relative = initial_maximum + partner_maximum;
    let reach = relative.powi(2) + delta_k0_squared;
    if reach < 0. {
        return Ok(None);
    }
    let maximum =
        (2. * relative.powi(2) + delta_k0_squared + 2. * relative * reach.sqrt()).sqrt() / 2.;
    if maximum.is_finite() && maximum > 0. {
        Ok(Some(maximum))
    } else {
        Err(TableError::InvalidRange(maximum))
    }
}
