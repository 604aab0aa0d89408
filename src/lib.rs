// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Carrier-scattering computes carrier-carrier (Coulomb) scattering rates in semiconductor heterostructures
//!
//! # Overview
//! Two carriers in subbands `i` and `j` of a quantum well scatter into subbands `f` and `g` through their
//! mutual Coulomb interaction. The rate of the process depends on the overlap of the four envelope
//! wavefunctions, captured by the form factor `A(q)`, and on the screening of the interaction by the
//! carriers in the initial subband, captured by the static polarizability `Π(q)`. Both are tabulated on a
//! common grid of in-plane momentum transfers, after which the rate is integrated over the partner carrier
//! wavevector and the two in-plane angles for every initial wavevector. Finally the rate is averaged over
//! the Fermi-Dirac distribution of the initial subband.
//!
//! # Usage
//! Carrier-scattering is distributed as a binary crate, and is intended to be run from the command line in
//! a directory containing the output of a Schrödinger solver:
//!
//! - `E<p>.r` the subband minima in meV, where `<p>` is the particle `e`, `h` or `l`,
//! - `wf_<p><n>.r` the wavefunction of subband `n`,
//! - `Ef.r` and `N.r` the Fermi energy in meV and population in 10^10 cm^-2 of each subband,
//! - `v.r` the potential profile,
//! - `rr.r` the list of transitions `i j f g` to compute.
//!
//! The rate of each transition against carrier energy is written to `cc<ijfg>.r`, and the mean rates to
//! `ccABCD.r`. Numerical resolutions are read from `.config/default.toml`.

/// The command line global application, tracing and output
pub mod app;

/// Physical constants
pub mod constants;

/// Closed-form densities of states
pub mod dos;

/// Error handling
pub mod error;

/// Carrier-carrier scattering rates
pub mod scattering;

/// Uniform grids and quadrature rules
pub mod spectral;

/// Subbands, their carrier distributions and the input readers
pub mod subband;

/// Momentum-transfer tables and their interpolation
pub mod table;
