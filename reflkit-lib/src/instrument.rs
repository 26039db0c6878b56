//! Instrument geometry feeding the resolution calculation: slit openings
//! over a scan, the angular divergence they produce, time-of-flight
//! wavelength binning, and conversions between angle, wavelength and Q.
//!
//! Angles are in radians, slit openings and distances in mm, wavelengths
//! in Å. Divergences are FWHM.

use reflkit_data::{SlitGeometry, SlitPair, SlitSchedule};

use crate::constants::{FWHM_PER_SIGMA, PI4};
use crate::error::{ReflError, Result};
use crate::points::{PerPoint, check_len};
use crate::resolution::spread;

/// Convert a Gaussian FWHM to its standard deviation.
pub fn fwhm_to_sigma(fwhm: f64) -> f64 {
    fwhm / FWHM_PER_SIGMA
}

/// Convert a Gaussian standard deviation to its FWHM.
pub fn sigma_to_fwhm(sigma: f64) -> f64 {
    sigma * FWHM_PER_SIGMA
}

/// Q = 4π sin T / L
pub fn q_from_angle(t: f64, wavelength: f64) -> f64 {
    PI4 * t.sin() / wavelength
}

/// T = asin(Q·L / 4π); NaN when |Q·L/4π| > 1.
pub fn angle_from_q(q: f64, wavelength: f64) -> f64 {
    (q * wavelength / PI4).asin()
}

/// ΔQ (FWHM) from per-point angle, divergence, wavelength and wavelength
/// spread, as measured rather than modelled.
///
/// `t` and `dt` are given per point; `wavelength` and `dl` may be a single
/// value.
pub fn resolution_from_angles(
    t: &[f64],
    dt: &[f64],
    wavelength: &[f64],
    dl: &[f64],
) -> Result<Vec<f64>> {
    check_len("dt", dt, t.len())?;
    let wavelength = PerPoint::new("wavelength", wavelength, t.len())?;
    let dl = PerPoint::new("dl", dl, t.len())?;
    Ok(t.iter()
        .zip(dt)
        .enumerate()
        .map(|(i, (&ti, &dti))| {
            let l = wavelength.at(i);
            spread(ti.abs(), l, dl.at(i) / l, dti)
        })
        .collect())
}

/// Slit openings at each angle of a fixed/opening/fixed scan.
///
/// Below `t_lo` the slits sit at `slits_below` (default: `slits_at_t_lo`).
/// Between `t_lo` and `t_hi` they scale with |T|/t_lo so ΔT/T is constant.
/// Above `t_hi` they sit at `slits_above`, by default the opening reached
/// at `t_hi`. Without `t_lo` the slits never move.
pub fn opening_slits(t: &[f64], schedule: &SlitSchedule) -> Vec<SlitPair> {
    let at_lo = schedule.slits_at_t_lo;
    let below = schedule.slits_below.unwrap_or(at_lo);
    let Some(t_lo) = schedule.t_lo else {
        return vec![below; t.len()];
    };
    let t_hi = schedule.t_hi.unwrap_or(f64::INFINITY);
    let above = schedule
        .slits_above
        .unwrap_or_else(|| SlitPair::new(at_lo.s1 * t_hi / t_lo, at_lo.s2 * t_hi / t_lo));

    t.iter()
        .map(|&ti| {
            let ti = ti.abs();
            if ti > t_hi {
                above
            } else if ti >= t_lo {
                SlitPair::new(at_lo.s1 * ti / t_lo, at_lo.s2 * ti / t_lo)
            } else {
                below
            }
        })
        .collect()
}

/// FWHM angular divergence (radians) produced by the slits at each angle.
///
/// The two slits give (s1 + s2) / 2(d1 − d2). When the sample's projection
/// into the beam, w·sin T, is narrower than slit 2, the sample acts as the
/// second slit and the divergence becomes (s1 + w·sin T) / 2·d1. The
/// sample broadening is added last.
pub fn divergence(t: &[f64], slits: &[SlitPair], geometry: &SlitGeometry) -> Result<Vec<f64>> {
    if slits.len() != t.len() {
        return Err(ReflError::LengthMismatch {
            name: "slits",
            expected: t.len(),
            actual: slits.len(),
        });
    }
    let SlitGeometry {
        d_s1,
        d_s2,
        sample_width,
        sample_broadening,
    } = *geometry;

    Ok(t.iter()
        .zip(slits)
        .map(|(&ti, s)| {
            let projection = sample_width * ti.abs().sin();
            let dt = if projection < s.s2 {
                (s.s1 + projection) / (2.0 * d_s1)
            } else {
                (s.s1 + s.s2) / (2.0 * (d_s1 - d_s2))
            };
            dt + sample_broadening
        })
        .collect())
}

/// Wavelength bin centres from `low` to `high` with constant ΔL/L.
///
/// Bin edges grow geometrically by a factor 1 + `dlol`; centres are the
/// midpoints of consecutive edges.
pub fn wavelength_bins(low: f64, high: f64, dlol: f64) -> Result<Vec<f64>> {
    if !(low > 0.0 && high > low && dlol > 0.0) {
        return Err(ReflError::InvalidParameter(format!(
            "wavelength bins need 0 < low < high and dL/L > 0, got low={low}, high={high}, dL/L={dlol}"
        )));
    }
    let step = 1.0 + dlol;
    let n = ((high / low).ln() / step.ln()).ceil() as usize;
    let edges: Vec<f64> = (0..=n).map(|i| low * step.powi(i as i32)).collect();
    Ok(edges.windows(2).map(|e| 0.5 * (e[0] + e[1])).collect())
}

/// Bin widths ΔL for logarithmically spaced bin centres.
///
/// With edges Eᵢ₊₁ = (1 + r)·Eᵢ the centres satisfy Lᵢ₊₁/Lᵢ = 1 + r and
/// ΔLᵢ = 2r/(2 + r)·Lᵢ. The ratio r is read off the first two centres,
/// in whichever order they are stored.
pub fn bin_widths(wavelength: &[f64]) -> Result<Vec<f64>> {
    if wavelength.len() < 2 {
        return Err(ReflError::InvalidParameter(format!(
            "bin widths need at least 2 bins, got {}",
            wavelength.len()
        )));
    }
    let (a, b) = (wavelength[0], wavelength[1]);
    let ratio = if b > a { b / a - 1.0 } else { a / b - 1.0 };
    let scale = 2.0 * ratio / (2.0 + ratio);
    Ok(wavelength.iter().map(|&l| scale * l).collect())
}
