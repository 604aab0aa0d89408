// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Physical constants used in the simulation, all in SI units, and the conversion
//! factors between SI and the units found in the input and output tables

pub const BOLTZMANN: f64 = 1.38064852e-23; // The Boltzmann constant in m^2 kg / s^2 K
pub const ELECTRON_CHARGE: f64 = 1.60217662e-19; // Single electron charge in C
pub const ELECTRON_MASS: f64 = 9.10938356e-31; // Single electron mass in kg
pub const EPSILON_0: f64 = 8.85418782e-12; // Permitivitty of free space in F / m
pub const HBAR: f64 = 1.0545718e-34; // Reduced Planck constant in J s

/// One milli-electron-volt in Joules
pub const MILLI_ELECTRON_VOLT: f64 = 1e-3 * ELECTRON_CHARGE;
/// Converts a sheet density in units of 10^10 cm^-2 to m^-2
pub const SHEET_DENSITY_TO_SI: f64 = 1e10 * 1e4;
/// One Angstrom in metres
pub const ANGSTROM: f64 = 1e-10;
