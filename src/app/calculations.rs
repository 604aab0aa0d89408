//! # Calculations
//!
//! Delegated functions from `App` to run each requested transition and write its results
//!

use super::{output, Configuration, RunParameters};
use crate::scattering::{
    calculate_transition, FormFactor, PhysicalParameters, ScatteringSettings, Transition,
};
use crate::subband::Heterostructure;
use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Runs every transition in input order
///
/// The summary line of each transition is appended as soon as it completes, so an aborted run
/// leaves the results of the transitions before the failure in place
pub(crate) fn run_transitions(
    structure: &Heterostructure,
    transitions: &[Transition],
    config: &Configuration,
    parameters: &RunParameters,
) -> color_eyre::Result<()> {
    let settings = ScatteringSettings {
        physical: PhysicalParameters {
            permittivity: parameters.permittivity,
            temperature: parameters.temperature,
        },
        quadrature: config.quadrature_settings(),
        screening: config.screening_settings(parameters.screening),
        spatial_integration_rule: config.quadrature.spatial_integration_rule,
    };

    let summary = output::SummaryWriter::create(&parameters.output)?;
    for transition in transitions {
        tracing::info!("Transition {}", transition);
        if let Some(well_width) = parameters.form_factor_width {
            let form_factor =
                FormFactor::new(structure, transition, settings.spatial_integration_rule)?;
            let path =
                output::write_form_factors(&parameters.output, transition, &form_factor, well_width)?;
            tracing::info!("Form factors written to {}", path.display());
        }

        let result = calculate_transition(structure, transition, &settings, &progress_bar())?;

        let path = output::write_rate_curve(&parameters.output, transition, &result.curve)?;
        tracing::info!("Rate curve written to {}", path.display());
        summary.append(transition, result.thermal_average)?;
    }
    Ok(())
}

fn progress_bar() -> ProgressBar {
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{prefix:.bold.dim} {spinner} {msg} [{wide_bar:.cyan/blue}] {percent}% ({eta})");
    let pb = ProgressBar::with_draw_target(0, ProgressDrawTarget::term(Term::stdout(), 60));
    pb.set_style(spinner_style);
    pb
}
