//! # Output
//!
//! Writers for the flat result files. Every file holds whitespace separated columns so it can be
//! read back by the same tools which produced the inputs.

use crate::constants::MILLI_ELECTRON_VOLT;
use crate::scattering::{FormFactor, ScatteringRateCurve, Transition};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of momentum transfers in a form-factor dump
const FORM_FACTOR_POINTS: usize = 100;

/// Writes the rate curve of `transition` to `cc<ijfg>.r`, one `energy [meV] rate [1/s]` per line
pub(crate) fn write_rate_curve(
    directory: &Path,
    transition: &Transition,
    curve: &ScatteringRateCurve,
) -> Result<PathBuf, std::io::Error> {
    let path = directory.join(format!("cc{}.r", transition));
    let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);
    for sample in curve.samples() {
        writeln!(
            file,
            "{:.17e} {:.17e}",
            sample.energy / MILLI_ELECTRON_VOLT,
            sample.rate
        )?;
    }
    file.flush()?;
    Ok(path)
}

/// The summary of mean rates, `ccABCD.r`
///
/// The file is truncated when the writer is created, and a line is appended for each transition
pub(crate) struct SummaryWriter {
    path: PathBuf,
}

impl SummaryWriter {
    pub(crate) fn create(directory: &Path) -> Result<Self, std::io::Error> {
        let path = directory.join("ccABCD.r");
        std::fs::File::create(&path)?;
        Ok(Self { path })
    }

    pub(crate) fn append(
        &self,
        transition: &Transition,
        thermal_average: f64,
    ) -> Result<(), std::io::Error> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let [i, j, f, g] = transition.indices();
        writeln!(file, "{} {} {} {} {:.17e}", i, j, f, g, thermal_average)?;
        Ok(())
    }
}

/// Writes the squared form factor of `transition` to `A<ijfg>.r`
///
/// The momentum transfer is scaled by the reference width `well_width`, running from zero to just
/// below `6 / well_width`. Each line holds `q W` and `A(q)^2`.
pub(crate) fn write_form_factors(
    directory: &Path,
    transition: &Transition,
    form_factor: &FormFactor,
    well_width: f64,
) -> Result<PathBuf, std::io::Error> {
    let path = directory.join(format!("A{}.r", transition));
    let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);
    for index in 0..FORM_FACTOR_POINTS {
        let momentum = 6. * index as f64 / (FORM_FACTOR_POINTS as f64 * well_width);
        writeln!(
            file,
            "{:e} {:e}",
            momentum * well_width,
            form_factor.evaluate(momentum).powi(2)
        )?;
    }
    file.flush()?;
    Ok(path)
}
