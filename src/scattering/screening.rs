// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Static screening by the carriers of the initial subband
//!
//! The finite-temperature polarizability is the zero-temperature polarizability at chemical
//! potential `μ`, weighted by the derivative of the Fermi-Dirac distribution and integrated over
//! `μ` from the subband minimum upwards.

use super::ScreeningSettings;
use crate::constants::BOLTZMANN;
use crate::dos::subband_density_of_states;
use crate::error::{ScatteringError, ScreeningError};
use crate::subband::Subband;
use crate::table::MomentumTable;

/// The polarizability [1 / J m^2] of `subband` at momentum transfer `momentum`
///
/// The integral over chemical potential proceeds in steps of `settings.energy_step` until the
/// latest increment is smaller than `settings.tolerance` times the running total.
pub fn polarizability(
    subband: &Subband,
    momentum: f64,
    temperature: f64,
    settings: &ScreeningSettings,
) -> Result<f64, ScreeningError> {
    let thermal_energy = BOLTZMANN * temperature;
    let density_of_states =
        subband_density_of_states(subband.mass(), subband.energy(), subband.energy(), 0.);

    let mut integral = 0.;
    let mut chemical_potential = subband.energy();
    for _ in 0..settings.maximum_iterations {
        let wavevector = subband.wavevector(chemical_potential);

        // Zero temperature polarizability at this chemical potential
        let mut zero_temperature = density_of_states;
        if momentum > 2. * wavevector {
            zero_temperature -=
                density_of_states * (1. - (2. * wavevector / momentum).powi(2)).sqrt();
        }

        let increment = zero_temperature
            / (4.
                * thermal_energy
                * ((subband.fermi_energy() - chemical_potential) / (2. * thermal_energy))
                    .cosh()
                    .powi(2));
        if !increment.is_finite() {
            return Err(ScreeningError::NonFinite {
                momentum,
                chemical_potential,
            });
        }
        integral += increment * settings.energy_step;
        chemical_potential += settings.energy_step;

        if !(increment > integral * settings.tolerance) {
            return Ok(integral);
        }
    }
    Err(ScreeningError::Divergence {
        momentum,
        iterations: settings.maximum_iterations,
    })
}

/// The polarizability of `subband` on the momentum grid of `matrix_elements`
///
/// When screening is disabled every value is zero
pub fn polarizability_table(
    matrix_elements: &MomentumTable,
    subband: &Subband,
    temperature: f64,
    settings: &ScreeningSettings,
) -> Result<MomentumTable, ScatteringError> {
    if !settings.enabled {
        tracing::debug!("Screening disabled");
        return matrix_elements.try_with_grid_of(|_| Ok(0.));
    }
    matrix_elements.try_with_grid_of(|momentum| {
        Ok(polarizability(subband, momentum, temperature, settings)?)
    })
}

#[cfg(test)]
mod test {
    use super::polarizability;
    use crate::constants::{BOLTZMANN, ELECTRON_MASS, HBAR, MILLI_ELECTRON_VOLT};
    use crate::error::ScreeningError;
    use crate::scattering::ScreeningSettings;
    use crate::subband::Subband;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    fn subband() -> Subband {
        Subband::new(
            20. * MILLI_ELECTRON_VOLT,
            Array1::zeros(2),
            0.067 * ELECTRON_MASS,
        )
        .with_distribution(30. * MILLI_ELECTRON_VOLT, 1e15)
    }

    #[test]
    fn long_wavelength_limit_is_the_occupied_density_of_states() {
        let subband = subband();
        let temperature = 77.;
        let settings = ScreeningSettings {
            energy_step: 0.1 * MILLI_ELECTRON_VOLT,
            tolerance: 1e-6,
            ..ScreeningSettings::default()
        };
        let density_of_states = subband.mass() / (std::f64::consts::PI * HBAR.powi(2));
        let occupation = 1.
            / (((subband.energy() - subband.fermi_energy()) / (BOLTZMANN * temperature)).exp()
                + 1.);

        let result = polarizability(&subband, 0., temperature, &settings).unwrap();
        assert_relative_eq!(
            result,
            density_of_states * occupation,
            max_relative = 0.01
        );
    }

    #[test]
    fn short_wavelengths_are_screened_less() {
        let subband = subband();
        let settings = ScreeningSettings::default();
        let long = polarizability(&subband, 0., 300., &settings).unwrap();
        let short = polarizability(&subband, 1e10, 300., &settings).unwrap();
        assert!(short < long);
        assert!(short > 0.);
    }

    #[test]
    fn an_unconverged_integral_is_an_error() {
        let settings = ScreeningSettings {
            energy_step: 0.1 * MILLI_ELECTRON_VOLT,
            maximum_iterations: 3,
            ..ScreeningSettings::default()
        };
        assert!(matches!(
            polarizability(&subband(), 1e8, 300., &settings),
            Err(ScreeningError::Divergence { iterations: 3, .. })
        ));
    }

    #[test]
    fn zero_temperature_is_not_finite() {
        assert!(matches!(
            polarizability(&subband(), 1e8, 0., &ScreeningSettings::default()),
            Err(ScreeningError::NonFinite { .. })
        ));
    }
}
