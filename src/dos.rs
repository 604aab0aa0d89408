// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Density of states
//!
//! Closed-form densities of states for bulk material, quantum wells and quantum wires. The
//! effective mass is taken to vary with energy as `m(E) = m_0 [1 + alpha (E - V)]`, where `alpha`
//! is the non-parabolicity factor. Setting `alpha` to zero recovers a parabolic dispersion.

use crate::constants::HBAR;
use std::f64::consts::PI;

/// Bulk density of states [1 / J m^3] for a carrier of energy `energy` above a band edge `band_edge`
///
/// Zero unless the energy lies above the band edge by more than one part in 10^12
pub fn density_of_states_3d(mass: f64, energy: f64, band_edge: f64, alpha: f64) -> f64 {
    if energy - band_edge > energy.abs() * 1e-12 {
        (2. * mass / HBAR.powi(2)).powf(1.5) * (energy - band_edge).sqrt() / (2. * PI.powi(2))
            * (1. + alpha * (2. * energy - band_edge))
    } else {
        0.
    }
}

/// The density of states [1 / J m^2] contributed by a single subband of a quantum well
pub fn subband_density_of_states(mass: f64, energy: f64, band_edge: f64, alpha: f64) -> f64 {
    mass / (PI * HBAR.powi(2)) * (1. + alpha * (2. * energy - band_edge))
}

/// Density of states [1 / J m^2] in a quantum well, at energy `energy`
///
/// Each subband with a minimum below `energy` contributes a single step
pub fn density_of_states_2d(
    mass: f64,
    energy: f64,
    subband_energies: &[f64],
    band_edge: f64,
    alpha: f64,
) -> f64 {
    let occupied = subband_energies
        .iter()
        .filter(|&&minimum| energy > minimum)
        .count();
    occupied as f64 * subband_density_of_states(mass, energy, band_edge, alpha)
}

/// Density of states [1 / J m] in a quantum wire with a parabolic dispersion
pub fn density_of_states_1d(mass: f64, energy: f64, subband_energies: &[f64]) -> f64 {
    subband_energies
        .iter()
        .filter(|&&minimum| energy > minimum)
        .map(|minimum| (2. * mass).sqrt() / HBAR / (PI * (energy - minimum).sqrt()))
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{ELECTRON_MASS, MILLI_ELECTRON_VOLT};
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn bulk_density_vanishes_at_and_below_the_band_edge() {
        let mass = 0.067 * ELECTRON_MASS;
        let band_edge = 100. * MILLI_ELECTRON_VOLT;
        assert_eq!(density_of_states_3d(mass, band_edge, band_edge, 0.), 0.);
        assert_eq!(
            density_of_states_3d(mass, 0.5 * band_edge, band_edge, 0.),
            0.
        );
        assert!(density_of_states_3d(mass, 1.1 * band_edge, band_edge, 0.) > 0.);
    }

    #[test]
    fn bulk_density_grows_as_the_square_root_of_energy() {
        let mut rng = rand::thread_rng();
        let mass = 0.067 * ELECTRON_MASS;
        let energy = rng.gen_range(1.0..100.) * MILLI_ELECTRON_VOLT;
        let ratio =
            density_of_states_3d(mass, 4. * energy, 0., 0.) / density_of_states_3d(mass, energy, 0., 0.);
        assert_relative_eq!(ratio, 2., max_relative = 1e-12);
    }

    #[test]
    fn well_density_is_a_staircase() {
        let mass = 0.067 * ELECTRON_MASS;
        let subbands = [0., 50. * MILLI_ELECTRON_VOLT, 150. * MILLI_ELECTRON_VOLT];
        let step = mass / (std::f64::consts::PI * HBAR.powi(2));
        assert_eq!(density_of_states_2d(mass, -1., &subbands, 0., 0.), 0.);
        assert_relative_eq!(
            density_of_states_2d(mass, 10. * MILLI_ELECTRON_VOLT, &subbands, 0., 0.),
            step
        );
        assert_relative_eq!(
            density_of_states_2d(mass, 100. * MILLI_ELECTRON_VOLT, &subbands, 0., 0.),
            2. * step
        );
        assert_relative_eq!(
            density_of_states_2d(mass, 200. * MILLI_ELECTRON_VOLT, &subbands, 0., 0.),
            3. * step
        );
    }

    #[test]
    fn non_parabolicity_raises_the_well_density() {
        let mass = 0.067 * ELECTRON_MASS;
        let energy = 10. * MILLI_ELECTRON_VOLT;
        let alpha = 0.7 / (1000. * MILLI_ELECTRON_VOLT);
        assert!(
            subband_density_of_states(mass, energy, 0., alpha)
                > subband_density_of_states(mass, energy, 0., 0.)
        );
    }

    #[test]
    fn wire_density_diverges_at_each_subband_edge() {
        let mass = 0.067 * ELECTRON_MASS;
        let subbands = [0., 50. * MILLI_ELECTRON_VOLT];
        let below = density_of_states_1d(mass, 49.999 * MILLI_ELECTRON_VOLT, &subbands);
        let above = density_of_states_1d(mass, 50.001 * MILLI_ELECTRON_VOLT, &subbands);
        assert!(above > 10. * below);
        assert_eq!(density_of_states_1d(mass, 0., &subbands), 0.);
    }
}
