//! This module governs the high-level implementation of the calculation

mod calculations;
mod configuration;
mod output;
mod telemetry;
pub(crate) use configuration::Configuration;

use crate::constants::{ANGSTROM, ELECTRON_MASS, EPSILON_0};
use crate::subband::{reader, Particle};
use clap::{ArgEnum, Parser};
use std::path::PathBuf;

/// Carrier-carrier scattering rates between the subbands of a heterostructure
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// Write the squared form factor of each transition to `A<ijfg>.r`
    #[clap(short = 'a', long)]
    form_factors: bool,
    /// Relative permittivity of the material
    #[clap(short = 'e', long, default_value_t = 13.18)]
    permittivity: f64,
    /// Effective mass, in units of the free electron mass
    #[clap(short, long, default_value_t = 0.067)]
    mass: f64,
    /// Carrier species, one of e, h or l
    #[clap(short, long, default_value = "e")]
    particle: Particle,
    /// Neglect screening by the carriers in the initial subband
    #[clap(short = 'S', long)]
    no_screening: bool,
    /// Carrier temperature in Kelvin
    #[clap(short = 'T', long, default_value_t = 300.)]
    temperature: f64,
    /// Reference well width in Angstrom, used to scale the form-factor output
    #[clap(short, long, default_value_t = 250.)]
    well_width: f64,
    /// Directory holding the subband, population, potential and transition files
    #[clap(short, long, default_value = ".")]
    input: PathBuf,
    /// Directory the results and log are written to
    #[clap(short, long, default_value = ".")]
    output: PathBuf,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Options which are fixed for the whole run
pub(crate) struct RunParameters {
    pub(crate) permittivity: f64,
    pub(crate) temperature: f64,
    pub(crate) screening: bool,
    /// Reference width for the form-factor dump [m], or `None` when no dump is requested
    pub(crate) form_factor_width: Option<f64>,
    pub(crate) output: PathBuf,
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();

    if !cli.output.exists() {
        std::fs::create_dir_all(&cli.output)?;
    }
    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &cli.output);
    telemetry::init_subscriber(subscriber)?;

    let config = Configuration::build()?;
    config.validate()?;

    tracing::info!(
        "Reading {} states from {}",
        cli.particle,
        cli.input.display()
    );
    let structure = reader::read_structure(&cli.input, cli.particle, cli.mass * ELECTRON_MASS)?;
    let transitions = reader::read_transitions(&cli.input.join("rr.r"))?;
    // Input problems surface before any result file is written
    for transition in transitions.iter() {
        transition.validate(&structure)?;
    }
    config
        .quadrature
        .spatial_integration_rule
        .check_grid(structure.z().len())?;
    tracing::info!(
        "Found {} subbands and {} transitions",
        structure.num_subbands(),
        transitions.len()
    );

    let parameters = RunParameters {
        permittivity: cli.permittivity * EPSILON_0,
        temperature: cli.temperature,
        screening: !cli.no_screening,
        form_factor_width: cli.form_factors.then(|| cli.well_width * ANGSTROM),
        output: cli.output,
    };

    calculations::run_transitions(&structure, &transitions, &config, &parameters)
}
