// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//!
//! Every failure in the calculation is fatal for the run: there is no recovery path, the
//! errors only exist to carry a useful diagnostic up to `main`

use crate::spectral::IntegrationRule;
use miette::Diagnostic;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// The umbrella error for a scattering-rate calculation
pub enum ScatteringError {
    #[error(transparent)]
    #[diagnostic(code(carrier_scattering::input))]
    Input(#[from] InputError),
    #[error(transparent)]
    #[diagnostic(code(carrier_scattering::table))]
    Table(#[from] TableError),
    #[error(transparent)]
    #[diagnostic(code(carrier_scattering::lookup))]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    #[diagnostic(code(carrier_scattering::screening))]
    Screening(#[from] ScreeningError),
    #[error(transparent)]
    #[diagnostic(code(carrier_scattering::build))]
    Build(#[from] BuildError),
    #[error(transparent)]
    #[diagnostic(code(carrier_scattering::io_error))]
    Io(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Problems with the subband, population, potential or transition data
pub enum InputError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?}, line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("Potential and wavefunction arrays are different sizes: {potential} and {wavefunction} respectively.")]
    #[diagnostic(help("the potential profile must be sampled on the wavefunction grid"))]
    ShapeMismatch { potential: usize, wavefunction: usize },
    #[error("{path:?} holds {found} entries, but there are {expected} subbands")]
    MissingSubbandData {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("subband index {index} is outside 1..={available}")]
    SubbandIndex { index: usize, available: usize },
    #[error("the spatial grid needs at least two points, found {0}")]
    SpatialGrid(usize),
    #[error("subband {index} has its minimum at {energy} meV, at or above the potential maximum {barrier} meV")]
    AboveBarrier {
        index: usize,
        energy: f64,
        barrier: f64,
    },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Failures constructing a momentum-transfer table
pub enum TableError {
    #[error("cannot allocate a table of {number_of_points} points")]
    Allocation {
        number_of_points: usize,
        #[source]
        source: std::collections::TryReserveError,
    },
    #[error("the maximum momentum transfer {0} 1/m is not a finite positive number")]
    InvalidRange(f64),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// A query outside of a tabulated range
pub enum LookupError {
    #[error("q_perp = {momentum} 1/m lies outside the tabulated range [{minimum}, {maximum}]")]
    #[diagnostic(help(
        "the table maximum must bound every momentum transfer reachable by the quadrature"
    ))]
    OutOfRange {
        momentum: f64,
        minimum: f64,
        maximum: f64,
    },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// The polarizability integral failed to converge
pub enum ScreeningError {
    #[error("polarizability integral at q = {momentum} 1/m did not converge within {iterations} steps")]
    Divergence { momentum: f64, iterations: usize },
    #[error("polarizability integrand at q = {momentum} 1/m is not finite at mu = {chemical_potential} J")]
    #[diagnostic(help("check the carrier temperature is strictly positive"))]
    NonFinite {
        momentum: f64,
        chemical_potential: f64,
    },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Invalid grid or configuration values
pub enum BuildError {
    #[error("{0}")]
    Grid(String),
    #[error("{0}")]
    Configuration(String),
    #[error("the {rule:?} rule cannot integrate over {number_of_points} spatial points")]
    #[diagnostic(help(
        "Romberg needs an odd number of points and ThreePoint at least eight"
    ))]
    IntegrationGrid {
        rule: IntegrationRule,
        number_of_points: usize,
    },
}
