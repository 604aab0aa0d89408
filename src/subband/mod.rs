// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Controls the storage of the confined states of the heterostructure and their
//! carrier statistics, and the deserialization of the flat input tables which describe them

mod particle;
/// Readers for the energy, wavefunction, population, potential and transition tables
pub mod reader;

pub use particle::{ParseParticleError, Particle};

use crate::constants::{BOLTZMANN, HBAR, MILLI_ELECTRON_VOLT};
use crate::error::InputError;
use ndarray::Array1;

/// A single quantum-confined state
///
/// Holds the band-edge energy and wavefunction of the state together with the
/// Fermi-Dirac distribution of carriers within it
#[derive(Clone, Debug)]
pub struct Subband {
    /// Energy of the subband minimum [J]
    energy: f64,
    /// Wavefunction sampled on the spatial grid of the parent `Heterostructure` [m^-1/2]
    wavefunction: Array1<f64>,
    /// In-plane effective mass [kg]
    mass: f64,
    /// Quasi-Fermi energy of the carriers in the subband [J]
    fermi_energy: f64,
    /// Sheet density of carriers in the subband [m^-2]
    population: f64,
}

impl Subband {
    /// A subband with no carriers. Call `with_distribution` to populate it
    pub fn new(energy: f64, wavefunction: Array1<f64>, mass: f64) -> Self {
        Self {
            energy,
            wavefunction,
            mass,
            fermi_energy: energy,
            population: 0.,
        }
    }

    pub fn with_distribution(mut self, fermi_energy: f64, population: f64) -> Self {
        self.set_distribution(fermi_energy, population);
        self
    }

    pub fn set_distribution(&mut self, fermi_energy: f64, population: f64) {
        self.fermi_energy = fermi_energy;
        self.population = population;
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn wavefunction(&self) -> &Array1<f64> {
        &self.wavefunction
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn fermi_energy(&self) -> f64 {
        self.fermi_energy
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    /// The in-plane wavevector of a carrier with the given kinetic energy
    ///
    /// Negative energies are clamped to the subband minimum
    pub fn wavevector(&self, kinetic_energy: f64) -> f64 {
        (2. * self.mass * kinetic_energy.max(0.)).sqrt() / HBAR
    }

    /// The kinetic energy of a carrier with in-plane wavevector `wavevector`
    pub fn kinetic_energy(&self, wavevector: f64) -> f64 {
        (HBAR * wavevector).powi(2) / (2. * self.mass)
    }

    /// Fermi-Dirac occupation of the state with in-plane wavevector `wavevector`
    pub fn occupation(&self, wavevector: f64, temperature: f64) -> f64 {
        let energy = self.energy + self.kinetic_energy(wavevector);
        1. / (((energy - self.fermi_energy) / (BOLTZMANN * temperature)).exp() + 1.)
    }
}

/// The confined states of a heterostructure, sampled on a common spatial grid
///
/// The lengths of the grid, potential and every wavefunction are checked once on construction, so
/// downstream code can index them freely.
#[derive(Clone, Debug)]
pub struct Heterostructure {
    /// Growth-direction positions [m]
    z: Array1<f64>,
    /// Potential energy profile [J]
    potential: Array1<f64>,
    subbands: Vec<Subband>,
}

impl Heterostructure {
    pub fn new(
        z: Array1<f64>,
        potential: Array1<f64>,
        subbands: Vec<Subband>,
    ) -> Result<Self, InputError> {
        if z.len() < 2 {
            return Err(InputError::SpatialGrid(z.len()));
        }
        if potential.len() != z.len() {
            return Err(InputError::ShapeMismatch {
                potential: potential.len(),
                wavefunction: z.len(),
            });
        }
        if let Some(subband) = subbands
            .iter()
            .find(|subband| subband.wavefunction.len() != z.len())
        {
            return Err(InputError::ShapeMismatch {
                potential: potential.len(),
                wavefunction: subband.wavefunction.len(),
            });
        }
        Ok(Self {
            z,
            potential,
            subbands,
        })
    }

    pub fn z(&self) -> &Array1<f64> {
        &self.z
    }

    /// The spatial step, taken from the first two grid points
    pub fn step(&self) -> f64 {
        self.z[1] - self.z[0]
    }

    /// The largest value of the potential profile [J]
    pub fn maximum_potential(&self) -> f64 {
        self.potential
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn num_subbands(&self) -> usize {
        self.subbands.len()
    }

    pub fn subbands(&self) -> &[Subband] {
        &self.subbands
    }

    /// Access a subband by its 1-based index, as used in the transition tables
    pub fn subband(&self, index: usize) -> Result<&Subband, InputError> {
        index
            .checked_sub(1)
            .and_then(|index| self.subbands.get(index))
            .ok_or(InputError::SubbandIndex {
                index,
                available: self.subbands.len(),
            })
    }

    /// The largest in-plane wavevector a carrier in subband `index` reaches below the potential maximum
    pub fn maximum_wavevector(&self, index: usize) -> Result<f64, InputError> {
        let subband = self.subband(index)?;
        let barrier = self.maximum_potential();
        if subband.energy() >= barrier {
            return Err(InputError::AboveBarrier {
                index,
                energy: subband.energy() / MILLI_ELECTRON_VOLT,
                barrier: barrier / MILLI_ELECTRON_VOLT,
            });
        }
        Ok(subband.wavevector(barrier - subband.energy()))
    }
}

#[cfg(test)]
mod test {
    use super::{Heterostructure, Subband};
    use crate::constants::{BOLTZMANN, ELECTRON_MASS, MILLI_ELECTRON_VOLT};
    use crate::error::InputError;
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use rand::Rng;

    fn subband(energy: f64, number_of_points: usize) -> Subband {
        Subband::new(
            energy,
            Array1::zeros(number_of_points),
            0.067 * ELECTRON_MASS,
        )
    }

    #[test]
    fn wavevector_inverts_kinetic_energy() {
        let mut rng = rand::thread_rng();
        let state = subband(0., 3);
        let energy: f64 = rng.gen_range(0.1..300.) * MILLI_ELECTRON_VOLT;
        assert_relative_eq!(
            state.kinetic_energy(state.wavevector(energy)),
            energy,
            max_relative = 1e-12
        );
    }

    #[test]
    fn occupation_is_one_half_at_the_fermi_level() {
        let fermi_energy = 20. * MILLI_ELECTRON_VOLT;
        let state = subband(5. * MILLI_ELECTRON_VOLT, 3).with_distribution(fermi_energy, 1e15);
        let wavevector = state.wavevector(fermi_energy - state.energy());
        assert_relative_eq!(state.occupation(wavevector, 77.), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn occupation_follows_the_boltzmann_tail() {
        let temperature = 300.;
        let state = subband(0., 3).with_distribution(0., 1e15);
        let wavevector = state.wavevector(20. * BOLTZMANN * temperature);
        assert_relative_eq!(
            state.occupation(wavevector, temperature),
            (-20_f64).exp(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn mismatched_potential_is_rejected() {
        let z = Array1::linspace(0., 1e-8, 10);
        let potential = Array1::zeros(9);
        let result = Heterostructure::new(z, potential, vec![subband(0., 10)]);
        assert!(matches!(
            result,
            Err(InputError::ShapeMismatch {
                potential: 9,
                wavefunction: 10
            })
        ));
    }

    #[test]
    fn subbands_are_indexed_from_one() {
        let z = Array1::linspace(0., 1e-8, 4);
        let potential = Array1::from_elem(4, 100. * MILLI_ELECTRON_VOLT);
        let structure = Heterostructure::new(
            z,
            potential,
            vec![subband(0., 4), subband(MILLI_ELECTRON_VOLT, 4)],
        )
        .unwrap();
        assert_eq!(structure.subband(2).unwrap().energy(), MILLI_ELECTRON_VOLT);
        assert!(structure.subband(0).is_err());
        assert!(structure.subband(3).is_err());
    }

    #[test]
    fn subband_above_the_barrier_has_no_wavevector_range() {
        let z = Array1::linspace(0., 1e-8, 4);
        let potential = Array1::from_elem(4, 10. * MILLI_ELECTRON_VOLT);
        let structure = Heterostructure::new(
            z,
            potential,
            vec![subband(0., 4), subband(20. * MILLI_ELECTRON_VOLT, 4)],
        )
        .unwrap();
        assert!(structure.maximum_wavevector(1).unwrap() > 0.);
        assert!(matches!(
            structure.maximum_wavevector(2),
            Err(InputError::AboveBarrier { index: 2, .. })
        ));
    }
}
