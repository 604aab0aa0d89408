// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Scattering
//!
//! Carrier-carrier scattering between the subbands of a heterostructure. A `Transition` takes a
//! pair of carriers in subbands `(i, j)` to subbands `(f, g)`. For each transition this module
//! - tabulates the Coulomb form factor `A(q)` over the reachable momentum transfers,
//! - tabulates the static polarizability of the initial subband on the same grid,
//! - integrates the screened matrix element over the partner wavevector and the two in-plane
//!   angles for every initial wavevector, and
//! - averages the resulting rate over the Fermi-Dirac distribution in the initial subband.
//!
//! The tables of a transition live only as long as `calculate_transition` runs.

mod matrix_element;
mod rate;
mod screening;

pub use matrix_element::{maximum_momentum_transfer, FormFactor};
pub use rate::{
    coulomb_prefactor, momentum_transfer, screened_matrix_element, RateIntegrator,
    RateIntegratorBuilder, RateSample, ScatteringRateCurve,
};
use rate::initial_wavevector_space;
pub use screening::{polarizability, polarizability_table};

use crate::constants::{HBAR, MILLI_ELECTRON_VOLT};
use crate::error::{InputError, ScatteringError};
use crate::spectral::{IntegrationRule, UniformSpaceBuilder};
use crate::subband::{Heterostructure, Subband};
use crate::table::MomentumTable;
use indicatif::ProgressBar;

/// A carrier-carrier transition `(i, j) -> (f, g)`, with 1-based subband indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    initial: usize,
    partner: usize,
    final_state: usize,
    final_partner: usize,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.initial, self.partner, self.final_state, self.final_partner
        )
    }
}

impl Transition {
    pub fn new(initial: usize, partner: usize, final_state: usize, final_partner: usize) -> Self {
        Self {
            initial,
            partner,
            final_state,
            final_partner,
        }
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn partner(&self) -> usize {
        self.partner
    }

    /// Checks every index names a subband of `structure`, and that the initial and partner
    /// subbands lie below the barrier so their carriers have a range of wavevectors
    pub fn validate(&self, structure: &Heterostructure) -> Result<(), InputError> {
        for index in self.indices() {
            structure.subband(index)?;
        }
        structure.maximum_wavevector(self.initial)?;
        structure.maximum_wavevector(self.partner)?;
        Ok(())
    }

    /// The four subband indices in the order `i j f g`
    pub fn indices(&self) -> [usize; 4] {
        [
            self.initial,
            self.partner,
            self.final_state,
            self.final_partner,
        ]
    }

    /// Twice the change in in-plane kinetic energy, in wavevector units [1/m^2]
    ///
    /// Zero whenever the initial and final index sums match, otherwise
    /// `4 m (E_i + E_j - E_f - E_g) / hbar^2` with the mass of the initial subband
    pub fn delta_k0_squared(&self, structure: &Heterostructure) -> Result<f64, InputError> {
        let [i, j, f, g] = self.indices();
        let initial = structure.subband(i)?;
        let energy_change = initial.energy() + structure.subband(j)?.energy()
            - structure.subband(f)?.energy()
            - structure.subband(g)?.energy();
        if i + j == f + g {
            return Ok(0.);
        }
        Ok(4. * initial.mass() * energy_change / HBAR.powi(2))
    }
}

/// Material and carrier parameters shared by every transition
#[derive(Clone, Copy, Debug)]
pub struct PhysicalParameters {
    /// Absolute permittivity [F/m]
    pub permittivity: f64,
    /// Carrier temperature [K]
    pub temperature: f64,
}

/// Number of nodes in each of the quadratures
#[derive(Clone, Copy, Debug)]
pub struct QuadratureSettings {
    pub number_of_alpha_points: usize,
    pub number_of_theta_points: usize,
    pub number_of_initial_wavevectors: usize,
    pub number_of_partner_wavevectors: usize,
    pub number_of_momentum_transfer_points: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            number_of_alpha_points: 101,
            number_of_theta_points: 101,
            number_of_initial_wavevectors: 101,
            number_of_partner_wavevectors: 101,
            number_of_momentum_transfer_points: 101,
        }
    }
}

/// Controls the polarizability integral
#[derive(Clone, Copy, Debug)]
pub struct ScreeningSettings {
    /// When false the polarizability is identically zero
    pub enabled: bool,
    /// Step in chemical potential [J]
    pub energy_step: f64,
    /// The integral stops once the latest increment falls below this fraction of the running total
    pub tolerance: f64,
    pub maximum_iterations: usize,
}

impl Default for ScreeningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            energy_step: MILLI_ELECTRON_VOLT,
            tolerance: 0.01,
            maximum_iterations: 100_000,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScatteringSettings {
    pub physical: PhysicalParameters,
    pub quadrature: QuadratureSettings,
    pub screening: ScreeningSettings,
    /// Rule used for the spatial integral in the form factor
    pub spatial_integration_rule: IntegrationRule,
}

/// The form factor and polarizability of a transition, tabulated on a shared momentum grid
#[derive(Clone, Debug)]
pub struct ScatteringTables {
    matrix_elements: MomentumTable,
    polarizability: MomentumTable,
}

impl ScatteringTables {
    /// Tabulates the form factor of `transition` between zero and the largest reachable momentum
    /// transfer, then the polarizability of the initial subband on the same grid
    ///
    /// Returns `None` when no carriers in the well can make the transition, as there is then no
    /// real momentum transfer to tabulate
    pub fn build(
        structure: &Heterostructure,
        transition: &Transition,
        settings: &ScatteringSettings,
    ) -> Result<Option<Self>, ScatteringError> {
        let maximum_momentum = match maximum_momentum_transfer(
            structure.maximum_wavevector(transition.initial())?,
            structure.maximum_wavevector(transition.partner())?,
            transition.delta_k0_squared(structure)?,
        )? {
            Some(maximum_momentum) => maximum_momentum,
            None => return Ok(None),
        };
        let momentum_space = UniformSpaceBuilder::new()
            .with_number_of_points(settings.quadrature.number_of_momentum_transfer_points)
            .with_maximum(maximum_momentum)
            .build()?;
        tracing::debug!(
            "Tabulating on {} momentum transfers up to {:.4e} 1/m",
            momentum_space.num_points(),
            maximum_momentum
        );

        let form_factor =
            FormFactor::new(structure, transition, settings.spatial_integration_rule)?;
        let matrix_elements =
            MomentumTable::tabulate(&momentum_space, |momentum| form_factor.evaluate(momentum))?;
        let polarizability = polarizability_table(
            &matrix_elements,
            structure.subband(transition.initial())?,
            settings.physical.temperature,
            &settings.screening,
        )?;
        Ok(Some(Self {
            matrix_elements,
            polarizability,
        }))
    }

    pub fn matrix_elements(&self) -> &MomentumTable {
        &self.matrix_elements
    }

    pub fn polarizability(&self) -> &MomentumTable {
        &self.polarizability
    }
}

/// The outcome of a single transition
#[derive(Clone, Debug)]
pub struct TransitionResult {
    pub transition: Transition,
    pub curve: ScatteringRateCurve,
    /// Fermi-Dirac weighted mean rate [1/s]
    pub thermal_average: f64,
}

/// Computes the rate curve and thermally averaged rate of `transition`
#[tracing::instrument(name = "transition", skip_all, fields(transition = %transition))]
pub fn calculate_transition(
    structure: &Heterostructure,
    transition: &Transition,
    settings: &ScatteringSettings,
    progress: &ProgressBar,
) -> Result<TransitionResult, ScatteringError> {
    let initial: &Subband = structure.subband(transition.initial())?;
    let tables = match ScatteringTables::build(structure, transition, settings)? {
        Some(tables) => tables,
        None => {
            tracing::warn!(
                "Transition {} is energetically forbidden, its rate is zero",
                transition
            );
            let wavevectors =
                initial_wavevector_space(structure, transition, &settings.quadrature)?;
            let curve = ScatteringRateCurve::vanishing(initial, &wavevectors);
            let thermal_average = curve.thermal_average(initial, settings.physical.temperature);
            return Ok(TransitionResult {
                transition: *transition,
                curve,
                thermal_average,
            });
        }
    };

    let integrator = RateIntegratorBuilder::new()
        .with_structure(structure)
        .with_transition(transition)
        .with_tables(&tables)
        .with_settings(settings)
        .build()?;
    let curve = integrator.rate_curve(progress)?;
    let thermal_average = curve.thermal_average(initial, settings.physical.temperature);
    tracing::info!("Mean scattering rate {:.6e} 1/s", thermal_average);

    Ok(TransitionResult {
        transition: *transition,
        curve,
        thermal_average,
    })
}
