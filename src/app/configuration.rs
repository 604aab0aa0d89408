use crate::constants::MILLI_ELECTRON_VOLT;
use crate::error::BuildError;
use crate::scattering::{QuadratureSettings, ScreeningSettings};
use crate::spectral::IntegrationRule;
use color_eyre::eyre::eyre;
use config::{Config, File};
use serde::Deserialize;
use std::env;

/// Numerical settings for the run, read from `.config/default.toml` and `.config/$RUN_MODE.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Configuration {
    pub(crate) quadrature: QuadratureConfiguration,
    pub(crate) screening: ScreeningConfiguration,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct QuadratureConfiguration {
    pub(crate) number_of_alpha_points: usize,
    pub(crate) number_of_theta_points: usize,
    pub(crate) number_of_initial_wavevectors: usize,
    pub(crate) number_of_partner_wavevectors: usize,
    pub(crate) number_of_momentum_transfer_points: usize,
    pub(crate) spatial_integration_rule: IntegrationRule,
}

impl Default for QuadratureConfiguration {
    fn default() -> Self {
        let defaults = QuadratureSettings::default();
        Self {
            number_of_alpha_points: defaults.number_of_alpha_points,
            number_of_theta_points: defaults.number_of_theta_points,
            number_of_initial_wavevectors: defaults.number_of_initial_wavevectors,
            number_of_partner_wavevectors: defaults.number_of_partner_wavevectors,
            number_of_momentum_transfer_points: defaults.number_of_momentum_transfer_points,
            spatial_integration_rule: IntegrationRule::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct ScreeningConfiguration {
    /// Step in chemical potential, in meV
    pub(crate) energy_step: f64,
    pub(crate) tolerance: f64,
    pub(crate) maximum_iterations: usize,
}

impl Default for ScreeningConfiguration {
    fn default() -> Self {
        Self {
            energy_step: 1.0,
            tolerance: 0.01,
            maximum_iterations: 100_000,
        }
    }
}

impl Configuration {
    pub(crate) fn build() -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default numerical settings, optional as every field has a fallback
            .add_source(File::with_name(".config/default").required(false))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }

    /// Checks every resolution is usable and the screening integral can terminate
    pub(crate) fn validate(&self) -> Result<(), BuildError> {
        let quadrature = &self.quadrature;
        for (name, value) in [
            ("number_of_alpha_points", quadrature.number_of_alpha_points),
            ("number_of_theta_points", quadrature.number_of_theta_points),
            (
                "number_of_initial_wavevectors",
                quadrature.number_of_initial_wavevectors,
            ),
            (
                "number_of_partner_wavevectors",
                quadrature.number_of_partner_wavevectors,
            ),
            (
                "number_of_momentum_transfer_points",
                quadrature.number_of_momentum_transfer_points,
            ),
        ] {
            if value < 2 {
                return Err(BuildError::Configuration(format!(
                    "quadrature.{} must be at least 2, found {}",
                    name, value
                )));
            }
        }

        let screening = &self.screening;
        if !(screening.energy_step > 0.) {
            return Err(BuildError::Configuration(format!(
                "screening.energy_step must be positive, found {}",
                screening.energy_step
            )));
        }
        if !(screening.tolerance > 0.) {
            return Err(BuildError::Configuration(format!(
                "screening.tolerance must be positive, found {}",
                screening.tolerance
            )));
        }
        if screening.maximum_iterations == 0 {
            return Err(BuildError::Configuration(
                "screening.maximum_iterations must be positive".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn quadrature_settings(&self) -> QuadratureSettings {
        QuadratureSettings {
            number_of_alpha_points: self.quadrature.number_of_alpha_points,
            number_of_theta_points: self.quadrature.number_of_theta_points,
            number_of_initial_wavevectors: self.quadrature.number_of_initial_wavevectors,
            number_of_partner_wavevectors: self.quadrature.number_of_partner_wavevectors,
            number_of_momentum_transfer_points: self.quadrature.number_of_momentum_transfer_points,
        }
    }

    pub(crate) fn screening_settings(&self, enabled: bool) -> ScreeningSettings {
        ScreeningSettings {
            enabled,
            energy_step: self.screening.energy_step * MILLI_ELECTRON_VOLT,
            tolerance: self.screening.tolerance,
            maximum_iterations: self.screening.maximum_iterations,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use crate::constants::MILLI_ELECTRON_VOLT;
    use crate::spectral::IntegrationRule;
    use config::{Config, File, FileFormat};

    fn from_toml(contents: &str) -> Configuration {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn missing_fields_take_their_defaults() {
        let configuration = from_toml(
            r#"
            [quadrature]
            number_of_theta_points = 51
            spatial_integration_rule = "Romberg"
            "#,
        );
        assert_eq!(configuration.quadrature.number_of_theta_points, 51);
        assert_eq!(configuration.quadrature.number_of_alpha_points, 101);
        assert_eq!(
            configuration.quadrature.spatial_integration_rule,
            IntegrationRule::Romberg
        );
        assert_eq!(configuration.screening.maximum_iterations, 100_000);
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn screening_step_is_converted_to_joules() {
        let configuration = from_toml("[screening]\nenergy_step = 0.5\n");
        let settings = configuration.screening_settings(true);
        assert_eq!(settings.energy_step, 0.5 * MILLI_ELECTRON_VOLT);
        assert!(settings.enabled);
    }

    #[test]
    fn degenerate_resolutions_are_rejected() {
        let configuration = from_toml("[quadrature]\nnumber_of_alpha_points = 1\n");
        assert!(configuration.validate().is_err());
        let configuration = from_toml("[screening]\ntolerance = 0.0\n");
        assert!(configuration.validate().is_err());
    }
}
