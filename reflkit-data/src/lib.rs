#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One slab of a layered sample, listed from the incident medium down.
///
/// SLDs are in Å⁻², thickness and roughness in Å. The thickness of the
/// first and last slab (the semi-infinite media) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub rho: f64,
    #[serde(default)]
    pub mu: f64,
    #[serde(default)]
    pub thickness: f64,
    /// RMS roughness of the interface below this slab.
    #[serde(default)]
    pub interface: f64,
}

/// A slab that also carries a magnetic SLD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticSlab {
    pub rho: f64,
    #[serde(default)]
    pub mu: f64,
    #[serde(default)]
    pub thickness: f64,
    /// Magnetic SLD (Å⁻²).
    #[serde(default)]
    pub rho_m: f64,
    /// Angle between the moment and the applied field (radians).
    #[serde(default)]
    pub theta_m: f64,
}

/// A complete sample: slabs from the incident medium to the substrate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub layers: Vec<Slab>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MagneticSample {
    pub layers: Vec<MagneticSlab>,
}

/// Openings of the two pre-sample slits (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitPair {
    pub s1: f64,
    pub s2: f64,
}

impl SlitPair {
    pub const fn new(s1: f64, s2: f64) -> Self {
        SlitPair { s1, s2 }
    }

    /// Both slits open by the same amount.
    pub const fn same(s: f64) -> Self {
        SlitPair { s1: s, s2: s }
    }
}

/// Fixed geometry of a slit-collimated reflectometer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitGeometry {
    /// Distance from slit 1 to the sample (mm).
    pub d_s1: f64,
    /// Distance from slit 2 to the sample (mm).
    pub d_s2: f64,
    /// Sample width (mm); a tiny sample acts as a second slit.
    #[serde(default = "default_sample_width")]
    pub sample_width: f64,
    /// Extra FWHM divergence from sample warp (radians, may be negative).
    #[serde(default)]
    pub sample_broadening: f64,
}

fn default_sample_width() -> f64 {
    1e10
}

impl SlitGeometry {
    pub fn new(d_s1: f64, d_s2: f64) -> Self {
        SlitGeometry {
            d_s1,
            d_s2,
            sample_width: default_sample_width(),
            sample_broadening: 0.0,
        }
    }
}

/// Slit opening pattern of a scanning measurement.
///
/// Slits stay at `slits_below` under `t_lo`, open in proportion to the angle
/// between `t_lo` and `t_hi`, and stay at `slits_above` past `t_hi`.
/// Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitSchedule {
    #[serde(default)]
    pub t_lo: Option<f64>,
    #[serde(default)]
    pub t_hi: Option<f64>,
    pub slits_at_t_lo: SlitPair,
    #[serde(default)]
    pub slits_below: Option<SlitPair>,
    #[serde(default)]
    pub slits_above: Option<SlitPair>,
}

impl SlitSchedule {
    /// Slits that never move.
    pub const fn fixed(slits: SlitPair) -> Self {
        SlitSchedule {
            t_lo: None,
            t_hi: None,
            slits_at_t_lo: slits,
            slits_below: None,
            slits_above: None,
        }
    }
}
