// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The rate integration
//!
//! For an initial wavevector `k_i` the rate is a sum over the partner wavevector `k_j`, the angle
//! `α` between `k_i` and `k_j`, and the angle `θ` between their difference `k_ij` and the
//! momentum transfer. Each angular grid covers a full turn with both end points included.

use super::{QuadratureSettings, ScatteringSettings, ScatteringTables, Transition};
use crate::constants::{ELECTRON_CHARGE, HBAR};
use crate::error::{LookupError, ScatteringError};
use crate::spectral::{UniformSpace, UniformSpaceBuilder};
use crate::subband::{Heterostructure, Subband};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use std::f64::consts::PI;

/// The in-plane momentum transfer for a relative wavevector `relative` at angle `cos_theta`
///
/// Returns `None` when the momentum transfer would be imaginary
pub fn momentum_transfer(relative: f64, delta_k0_squared: f64, cos_theta: f64) -> Option<f64> {
    let four_q_squared = 2. * relative.powi(2) + delta_k0_squared
        - 2. * relative * (relative.powi(2) + delta_k0_squared).sqrt() * cos_theta;
    // NaN fails the comparison and is skipped with the negative values
    if four_q_squared >= 0. {
        Some(four_q_squared.sqrt() / 2.)
    } else {
        None
    }
}

/// The form factor divided by the screened dielectric function, `A / (q ε(q))`
///
/// Screening enters the denominator additively, so the expression stays finite as `q` goes to
/// zero whenever the polarizability is non-zero
pub fn screened_matrix_element(
    form_factor: f64,
    polarizability: f64,
    momentum: f64,
    permittivity: f64,
) -> f64 {
    form_factor
        / (momentum
            + 2. * PI * ELECTRON_CHARGE.powi(2) * polarizability * form_factor
                / (4. * PI * permittivity))
}

/// The physical constants multiplying the quadrature sum, `(e^2 / 4πεħ)^2 m / πħ`
pub fn coulomb_prefactor(permittivity: f64, mass: f64) -> f64 {
    (ELECTRON_CHARGE.powi(2) / (HBAR * 4. * PI * permittivity)).powi(2) * mass / (PI * HBAR)
}

/// The rate at a single initial wavevector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateSample {
    /// Initial wavevector [1/m]
    pub wavevector: f64,
    /// Total energy of the initial carrier [J]
    pub energy: f64,
    /// Scattering rate [1/s]
    pub rate: f64,
}

impl RateSample {
    /// The sample at in-plane wavevector `wavevector` of a carrier in `subband`
    pub fn new(subband: &Subband, wavevector: f64, rate: f64) -> Self {
        Self {
            wavevector,
            energy: subband.energy() + subband.kinetic_energy(wavevector),
            rate,
        }
    }
}

/// The grid of initial wavevectors of `transition`, from zero to the top of the well
pub(crate) fn initial_wavevector_space(
    structure: &Heterostructure,
    transition: &Transition,
    quadrature: &QuadratureSettings,
) -> Result<UniformSpace, ScatteringError> {
    Ok(UniformSpaceBuilder::new()
        .with_number_of_points(quadrature.number_of_initial_wavevectors)
        .with_maximum(structure.maximum_wavevector(transition.initial())?)
        .build()?)
}

/// The scattering rate on a uniform grid of initial wavevectors, in order of increasing energy
#[derive(Clone, Debug)]
pub struct ScatteringRateCurve {
    step: f64,
    samples: Vec<RateSample>,
}

impl ScatteringRateCurve {
    /// A curve from `samples` taken on a uniform wavevector grid of spacing `step`
    pub fn new(step: f64, samples: Vec<RateSample>) -> Self {
        Self { step, samples }
    }

    /// A curve which is zero at every node of `wavevectors`, for a transition no carrier in
    /// `subband` can make
    pub fn vanishing(subband: &Subband, wavevectors: &UniformSpace) -> Self {
        Self::new(
            wavevectors.step(),
            wavevectors
                .points()
                .map(|wavevector| RateSample::new(subband, wavevector, 0.))
                .collect(),
        )
    }

    pub fn samples(&self) -> &[RateSample] {
        &self.samples
    }

    /// The rate averaged over the carrier distribution in `subband`
    ///
    /// `Σ W(k) k f(k) dk / (π N)`, where `f` is the Fermi-Dirac occupation and `N` the sheet
    /// density of the subband
    pub fn thermal_average(&self, subband: &Subband, temperature: f64) -> f64 {
        if subband.population() <= 0. {
            tracing::warn!(
                "Averaging over a subband with population {}, the mean rate will not be finite",
                subband.population()
            );
        }
        let weighted_sum: f64 = self
            .samples
            .iter()
            .map(|sample| {
                sample.rate * sample.wavevector * subband.occupation(sample.wavevector, temperature)
            })
            .sum();
        weighted_sum * self.step / (PI * subband.population())
    }
}

/// Builder for a `RateIntegrator`. All four components must be supplied before `build`
pub struct RateIntegratorBuilder<RefStructure, RefTransition, RefTables, RefSettings> {
    structure: RefStructure,
    transition: RefTransition,
    tables: RefTables,
    settings: RefSettings,
}

impl RateIntegratorBuilder<(), (), (), ()> {
    pub fn new() -> Self {
        Self {
            structure: (),
            transition: (),
            tables: (),
            settings: (),
        }
    }
}

impl Default for RateIntegratorBuilder<(), (), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefStructure, RefTransition, RefTables, RefSettings>
    RateIntegratorBuilder<RefStructure, RefTransition, RefTables, RefSettings>
{
    pub fn with_structure(
        self,
        structure: &Heterostructure,
    ) -> RateIntegratorBuilder<&Heterostructure, RefTransition, RefTables, RefSettings> {
        RateIntegratorBuilder {
            structure,
            transition: self.transition,
            tables: self.tables,
            settings: self.settings,
        }
    }

    pub fn with_transition(
        self,
        transition: &Transition,
    ) -> RateIntegratorBuilder<RefStructure, &Transition, RefTables, RefSettings> {
        RateIntegratorBuilder {
            structure: self.structure,
            transition,
            tables: self.tables,
            settings: self.settings,
        }
    }

    pub fn with_tables(
        self,
        tables: &ScatteringTables,
    ) -> RateIntegratorBuilder<RefStructure, RefTransition, &ScatteringTables, RefSettings> {
        RateIntegratorBuilder {
            structure: self.structure,
            transition: self.transition,
            tables,
            settings: self.settings,
        }
    }

    pub fn with_settings(
        self,
        settings: &ScatteringSettings,
    ) -> RateIntegratorBuilder<RefStructure, RefTransition, RefTables, &ScatteringSettings> {
        RateIntegratorBuilder {
            structure: self.structure,
            transition: self.transition,
            tables: self.tables,
            settings,
        }
    }
}

impl<'a>
    RateIntegratorBuilder<
        &'a Heterostructure,
        &'a Transition,
        &'a ScatteringTables,
        &'a ScatteringSettings,
    >
{
    pub fn build(self) -> Result<RateIntegrator<'a>, ScatteringError> {
        let initial_index = self.transition.initial();
        let partner_index = self.transition.partner();
        let quadrature = &self.settings.quadrature;

        let initial_wavevectors =
            initial_wavevector_space(self.structure, self.transition, quadrature)?;
        let partner_wavevectors = UniformSpaceBuilder::new()
            .with_number_of_points(quadrature.number_of_partner_wavevectors)
            .with_maximum(self.structure.maximum_wavevector(partner_index)?)
            .build()?;
        let alpha = UniformSpaceBuilder::new()
            .with_number_of_points(quadrature.number_of_alpha_points)
            .with_full_turn()
            .build()?;
        let theta = UniformSpaceBuilder::new()
            .with_number_of_points(quadrature.number_of_theta_points)
            .with_full_turn()
            .build()?;

        let initial = self.structure.subband(initial_index)?;
        let partner = self.structure.subband(partner_index)?;
        let temperature = self.settings.physical.temperature;

        // Each partner node carries its Fermi-Dirac occupation and the areal factor `k_j`
        let partner_nodes = partner_wavevectors
            .points()
            .map(|wavevector| {
                (
                    wavevector,
                    partner.occupation(wavevector, temperature) * wavevector,
                )
            })
            .collect();

        Ok(RateIntegrator {
            initial,
            tables: self.tables,
            delta_k0_squared: self.transition.delta_k0_squared(self.structure)?,
            permittivity: self.settings.physical.permittivity,
            prefactor: alpha.step()
                * theta.step()
                * partner_wavevectors.step()
                * coulomb_prefactor(self.settings.physical.permittivity, initial.mass()),
            cos_alpha: alpha.points().map(f64::cos).collect(),
            cos_theta: theta.points().map(f64::cos).collect(),
            partner_nodes,
            initial_wavevectors,
        })
    }
}

/// Integrates the scattering rate of a single transition over the partner states
pub struct RateIntegrator<'a> {
    initial: &'a Subband,
    tables: &'a ScatteringTables,
    delta_k0_squared: f64,
    permittivity: f64,
    /// Quadrature steps multiplied by the physical prefactor
    prefactor: f64,
    cos_alpha: Vec<f64>,
    cos_theta: Vec<f64>,
    /// Partner wavevector and the weight `f_j(k_j) k_j` of each partner node
    partner_nodes: Vec<(f64, f64)>,
    initial_wavevectors: UniformSpace,
}

impl<'a> RateIntegrator<'a> {
    /// The scattering rate [1/s] of a carrier with initial wavevector `wavevector`
    pub fn rate_at(&self, wavevector: f64) -> Result<f64, LookupError> {
        let matrix_elements = self.tables.matrix_elements();
        let polarizability = self.tables.polarizability();

        let mut sum = 0.;
        for &(partner_wavevector, weight) in self.partner_nodes.iter() {
            for &cos_alpha in self.cos_alpha.iter() {
                // Clamped, as rounding can push the square negative when the wavevectors coincide
                let relative = (wavevector.powi(2) + partner_wavevector.powi(2)
                    - 2. * wavevector * partner_wavevector * cos_alpha)
                    .max(0.)
                    .sqrt();
                for &cos_theta in self.cos_theta.iter() {
                    if let Some(momentum) =
                        momentum_transfer(relative, self.delta_k0_squared, cos_theta)
                    {
                        let bracket = matrix_elements.locate(momentum)?;
                        sum += screened_matrix_element(
                            matrix_elements.value_at(&bracket),
                            polarizability.value_at(&bracket),
                            momentum,
                            self.permittivity,
                        )
                        .powi(2)
                            * weight;
                    }
                }
            }
        }
        Ok(sum * self.prefactor)
    }

    /// The rate at every node of the initial wavevector grid
    ///
    /// The nodes are evaluated in parallel and returned in order of increasing wavevector
    pub fn rate_curve(&self, progress: &ProgressBar) -> Result<ScatteringRateCurve, LookupError> {
        progress.set_length(self.initial_wavevectors.num_points() as u64);
        let samples = (0..self.initial_wavevectors.num_points())
            .into_par_iter()
            .progress_with(progress.clone())
            .map(|index| -> Result<RateSample, LookupError> {
                let wavevector = self.initial_wavevectors.point(index);
                Ok(RateSample::new(
                    self.initial,
                    wavevector,
                    self.rate_at(wavevector)?,
                ))
            })
            .collect::<Result<Vec<_>, LookupError>>()?;
        progress.finish_and_clear();
        Ok(ScatteringRateCurve::new(
            self.initial_wavevectors.step(),
            samples,
        ))
    }
}
