//! Gaussian resolution smearing of a reflectivity curve.
//!
//! The reference curve (q_ref, r_ref) is taken as piecewise linear. For a
//! target point Q with width σ, each segment [a, c] of the interpolant
//! r(x) = r₀ + m(x − Q) integrates exactly against the unit Gaussian G:
//!
//! ```text
//! ∫ r G dx = r₀ · ½[erf(u_c) − erf(u_a)]
//!          + m σ/√(2π) · [exp(−u_a²) − exp(−u_c²)],     u = (x − Q)/(√2 σ)
//! ```
//!
//! The sum over segments is divided by the Gaussian mass over the same
//! interval, so the weights add to one even where the kernel runs off the
//! end of the data and the result never leaves the range of r_ref.

use crate::constants::FRAC_1_SQRT_2PI;
use crate::erf::{erf_one, erfc_one};
use crate::error::{ReflError, Result};
use crate::interp::interp_one;
use crate::points::{check_len, map_points};

use std::f64::consts::SQRT_2;

/// How much of the reference curve enters each target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvolveMethod {
    /// Integrate over the whole reference curve. O(len(q_ref)) per point.
    Exact,
    /// Integrate over Q ± nsigma·σ only, located by binary search.
    Windowed { nsigma: f64 },
}

impl ConvolveMethod {
    /// Gaussian tails past 6.8σ weigh less than 1e-10.
    pub const DEFAULT_NSIGMA: f64 = 6.8;
}

impl Default for ConvolveMethod {
    fn default() -> Self {
        ConvolveMethod::Windowed {
            nsigma: Self::DEFAULT_NSIGMA,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConvolveOptions {
    pub method: ConvolveMethod,
}

/// Smear `r_ref(q_ref)` with a Gaussian of 1-σ width `dq[i]` at each `q[i]`,
/// using the default windowed method.
///
/// `q_ref` must be non-decreasing. ΔQ from [`crate::resolution`] is FWHM;
/// convert it with [`crate::instrument::fwhm_to_sigma`] first.
pub fn convolve(q_ref: &[f64], r_ref: &[f64], q: &[f64], dq: &[f64]) -> Result<Vec<f64>> {
    convolve_with(q_ref, r_ref, q, dq, &ConvolveOptions::default())
}

/// [`convolve`] with explicit options.
pub fn convolve_with(
    q_ref: &[f64],
    r_ref: &[f64],
    q: &[f64],
    dq: &[f64],
    options: &ConvolveOptions,
) -> Result<Vec<f64>> {
    if q_ref.is_empty() {
        return Err(ReflError::LengthMismatch {
            name: "q_ref",
            expected: 1,
            actual: 0,
        });
    }
    check_len("r_ref", r_ref, q_ref.len())?;
    check_len("dq", dq, q.len())?;
    if let Some(index) = (1..q_ref.len()).find(|&i| !(q_ref[i] >= q_ref[i - 1])) {
        return Err(ReflError::Unsorted {
            name: "q_ref",
            index,
        });
    }
    let nsigma = match options.method {
        ConvolveMethod::Exact => f64::INFINITY,
        ConvolveMethod::Windowed { nsigma } => {
            if !(nsigma > 0.0) {
                return Err(ReflError::InvalidParameter(format!(
                    "convolution window must be positive, got {nsigma} sigma"
                )));
            }
            nsigma
        }
    };
    tracing::debug!(
        reference = q_ref.len(),
        points = q.len(),
        method = ?options.method,
        "resolution convolution"
    );

    let curve = Curve { q: q_ref, r: r_ref };
    Ok(map_points(q.len(), |i| curve.smear(q[i], dq[i], nsigma)))
}

struct Curve<'a> {
    q: &'a [f64],
    r: &'a [f64],
}

impl Curve<'_> {
    fn smear(&self, qo: f64, sigma: f64, nsigma: f64) -> f64 {
        if qo.is_nan() || !(sigma >= 0.0) {
            return f64::NAN;
        }
        if sigma == 0.0 {
            return interp_one(qo, self.q, self.r);
        }

        let (lo, hi) = if nsigma.is_finite() {
            (qo - nsigma * sigma, qo + nsigma * sigma)
        } else {
            (f64::NEG_INFINITY, f64::INFINITY)
        };
        let last = self.q.len() - 1;
        let first_seg = self.q.partition_point(|&v| v < lo).saturating_sub(1);
        let end_seg = self.q.partition_point(|&v| v <= hi).min(last);

        let scale = SQRT_2 * sigma;
        let mut weighted = 0.0;
        let mut mass = 0.0;
        for k in first_seg..end_seg {
            let (q0, q1) = (self.q[k], self.q[k + 1]);
            let a = q0.max(lo);
            let c = q1.min(hi);
            if !(c > a) {
                continue;
            }
            let slope = (self.r[k + 1] - self.r[k]) / (q1 - q0);
            let at_center = self.r[k] + slope * (qo - q0);
            let (ua, uc) = ((a - qo) / scale, (c - qo) / scale);

            let m = gaussian_mass(ua, uc);
            weighted += at_center * m
                + slope * sigma * FRAC_1_SQRT_2PI * ((-ua * ua).exp() - (-uc * uc).exp());
            mass += m;
        }

        if mass > 0.0 {
            weighted / mass
        } else {
            tracing::trace!(q = qo, sigma, "no kernel mass over the data, interpolating");
            interp_one(qo, self.q, self.r)
        }
    }
}

/// ½[erf(uc) − erf(ua)] for ua ≤ uc, taken from the tail nearest zero so
/// intervals far out on one side keep their precision.
fn gaussian_mass(ua: f64, uc: f64) -> f64 {
    if ua >= 0.0 {
        0.5 * (erfc_one(ua) - erfc_one(uc))
    } else if uc <= 0.0 {
        0.5 * (erfc_one(-uc) - erfc_one(-ua))
    } else {
        0.5 * (erf_one(uc) - erf_one(ua))
    }
}
