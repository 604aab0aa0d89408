// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::str::FromStr;

/// The carrier species whose states are read, used to select the input files
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Particle {
    Electron,
    HeavyHole,
    LightHole,
}

impl std::fmt::Display for Particle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Particle::Electron => {
                write!(f, "e")
            }
            Particle::HeavyHole => {
                write!(f, "h")
            }
            Particle::LightHole => {
                write!(f, "l")
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unrecognised particle {0:?}, expected one of e, h or l")]
pub struct ParseParticleError(String);

impl FromStr for Particle {
    type Err = ParseParticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e" => Ok(Particle::Electron),
            "h" => Ok(Particle::HeavyHole),
            "l" => Ok(Particle::LightHole),
            _ => Err(ParseParticleError(s.to_string())),
        }
    }
}
