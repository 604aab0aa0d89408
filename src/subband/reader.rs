// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All inputs are whitespace separated columns of numbers, one record per line. Blank lines and
//! lines starting with `#` are skipped.

use super::{Heterostructure, Particle, Subband};
use crate::constants::{MILLI_ELECTRON_VOLT, SHEET_DENSITY_TO_SI};
use crate::error::InputError;
use crate::scattering::Transition;
use ndarray::Array1;
use std::path::{Path, PathBuf};

/// Reads a table with exactly `N` columns of floating point numbers, returning it column-major
pub(crate) fn read_table<const N: usize>(path: &Path) -> Result<[Vec<f64>; N], InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(path, &contents)
}

fn parse_table<const N: usize>(path: &Path, contents: &str) -> Result<[Vec<f64>; N], InputError> {
    parse_numbered_table(path, contents).map(|(columns, _)| columns)
}

/// Parses a table, also returning the 1-based line number each row was read from
fn parse_numbered_table<const N: usize>(
    path: &Path,
    contents: &str,
) -> Result<([Vec<f64>; N], Vec<usize>), InputError> {
    let mut columns: [Vec<f64>; N] = std::array::from_fn(|_| Vec::new());
    let mut lines = Vec::new();
    for (line_index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_error = |message: String| InputError::Parse {
            path: path.to_path_buf(),
            line: line_index + 1,
            message,
        };
        let fields = line.split_whitespace().collect::<Vec<_>>();
        if fields.len() != N {
            return Err(parse_error(format!(
                "expected {} columns, found {}",
                N,
                fields.len()
            )));
        }
        for (column, field) in columns.iter_mut().zip(fields) {
            let value = field
                .parse::<f64>()
                .map_err(|e| parse_error(format!("{:?}: {}", field, e)))?;
            column.push(value);
        }
        lines.push(line_index + 1);
    }
    Ok((columns, lines))
}

/// Reads the subband energies, wavefunctions, carrier distributions and potential from `directory`
///
/// The files are `E<p>.r`, `wf_<p><n>.r`, `Ef.r`, `N.r` and `v.r`, where `<p>` is the particle
/// identifier. Energies are read in meV and populations in units of 10^10 cm^-2.
pub fn read_structure(
    directory: &Path,
    particle: Particle,
    mass: f64,
) -> Result<Heterostructure, InputError> {
    let [_, energies] = read_table::<2>(&directory.join(format!("E{}.r", particle)))?;

    let mut z: Option<Array1<f64>> = None;
    let mut subbands = Vec::with_capacity(energies.len());
    for (index, energy) in energies.iter().enumerate() {
        let path = directory.join(format!("wf_{}{}.r", particle, index + 1));
        let [positions, wavefunction] = read_table::<2>(&path)?;
        if z.is_none() {
            z = Some(Array1::from(positions));
        }
        subbands.push(Subband::new(
            energy * MILLI_ELECTRON_VOLT,
            Array1::from(wavefunction),
            mass,
        ));
    }

    let fermi_energies = read_subband_column(&directory.join("Ef.r"), subbands.len())?;
    let populations = read_subband_column(&directory.join("N.r"), subbands.len())?;
    for ((subband, fermi_energy), population) in subbands
        .iter_mut()
        .zip(fermi_energies)
        .zip(populations)
    {
        subband.set_distribution(
            fermi_energy * MILLI_ELECTRON_VOLT,
            population * SHEET_DENSITY_TO_SI,
        );
    }

    let [_, potential] = read_table::<2>(&directory.join("v.r"))?;

    Heterostructure::new(
        z.unwrap_or_else(|| Array1::zeros(0)),
        Array1::from(potential),
        subbands,
    )
}

/// Reads the second column of a per-subband table, checking there is one entry for each subband
fn read_subband_column(path: &Path, expected: usize) -> Result<Vec<f64>, InputError> {
    let [_, values] = read_table::<2>(path)?;
    if values.len() < expected {
        return Err(InputError::MissingSubbandData {
            path: PathBuf::from(path),
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

/// Reads the list of requested transitions, one `i j f g` quadruple of 1-based indices per line
pub fn read_transitions(path: &Path) -> Result<Vec<Transition>, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_transitions(path, &contents)
}

fn parse_transitions(path: &Path, contents: &str) -> Result<Vec<Transition>, InputError> {
    let ([initial, partner, final_state, final_partner], lines) =
        parse_numbered_table::<4>(path, contents)?;
    let as_index = |value: f64, line: usize| -> Result<usize, InputError> {
        if value.fract() != 0. || value < 1. {
            return Err(InputError::Parse {
                path: path.to_path_buf(),
                line,
                message: format!("{} is not a valid 1-based subband index", value),
            });
        }
        Ok(value as usize)
    };
    itertools::izip!(lines, initial, partner, final_state, final_partner)
        .map(|(line, i, j, f, g)| -> Result<Transition, InputError> {
            Ok(Transition::new(
                as_index(i, line)?,
                as_index(j, line)?,
                as_index(f, line)?,
                as_index(g, line)?,
            ))
        })
        .collect()
}
