//! Q resolution of slit-collimated reflectometers.
//!
//! With Q = 4π sin T / L, propagation of errors gives
//!
//! ```text
//! ΔQ = (4π/L) · sqrt( sin²T (ΔL/L)² + cos²T ΔT² )
//! ```
//!
//! which, unlike the textbook (ΔQ/Q)² = (ΔL/L)² + (ΔT/tan T)², stays finite
//! at T = 0. All widths are FWHM and angles are in radians; use
//! [`crate::instrument::fwhm_to_sigma`] before convolving.
//!
//! No gravity or beam-footprint term enters ΔT: the angular spread is taken
//! as given. An instrument that needs such a correction adds it to ΔT in
//! quadrature before calling these functions.
//!
//! A point whose geometry is not physical (L ≤ 0, a negative spread,
//! |Q·L/4π| > 1, NaN anywhere) yields NaN for that point only.

use crate::constants::PI4;
use crate::error::Result;
use crate::points::{PerPoint, map_points};

/// ΔQ for slits held fixed during the scan, so ΔT is constant.
///
/// # Arguments
/// * `wavelength` - L (Å), one value or one per Q
/// * `dlol` - Relative wavelength spread ΔL/L (FWHM), one or per Q
/// * `dt` - Angular divergence ΔT (radians FWHM), one or per Q
/// * `q` - Momentum transfer (Å⁻¹)
pub fn resolution_fixed_slits(
    wavelength: &[f64],
    dlol: &[f64],
    dt: &[f64],
    q: &[f64],
) -> Result<Vec<f64>> {
    let wavelength = PerPoint::new("wavelength", wavelength, q.len())?;
    let dlol = PerPoint::new("dlol", dlol, q.len())?;
    let dt = PerPoint::new("dt", dt, q.len())?;
    tracing::debug!(points = q.len(), "fixed slit resolution");

    Ok(map_points(q.len(), |i| {
        let l = wavelength.at(i);
        match angle(q[i], l) {
            Some(t) => spread(t, l, dlol.at(i), dt.at(i)),
            None => f64::NAN,
        }
    }))
}

/// ΔQ for slits that open with the angle, keeping ΔT/T constant.
///
/// # Arguments
/// * `wavelength` - L (Å), one value or one per Q
/// * `dlol` - Relative wavelength spread ΔL/L (FWHM), one or per Q
/// * `dtot` - Relative angular divergence ΔT/T (FWHM), one or per Q
/// * `q` - Momentum transfer (Å⁻¹)
pub fn resolution_varying_slits(
    wavelength: &[f64],
    dlol: &[f64],
    dtot: &[f64],
    q: &[f64],
) -> Result<Vec<f64>> {
    let wavelength = PerPoint::new("wavelength", wavelength, q.len())?;
    let dlol = PerPoint::new("dlol", dlol, q.len())?;
    let dtot = PerPoint::new("dtot", dtot, q.len())?;
    tracing::debug!(points = q.len(), "varying slit resolution");

    Ok(map_points(q.len(), |i| {
        let l = wavelength.at(i);
        let dtot = dtot.at(i);
        if dtot < 0.0 {
            return f64::NAN;
        }
        match angle(q[i], l) {
            Some(t) => spread(t, l, dlol.at(i), dtot * t),
            None => f64::NAN,
        }
    }))
}

/// Incident angle |T| for Q at wavelength L, or `None` when no real angle
/// exists.
fn angle(q: f64, wavelength: f64) -> Option<f64> {
    // NaN fails every comparison and lands in the None arm
    if !(wavelength > 0.0) {
        return None;
    }
    let sin_t = (q * wavelength / PI4).abs();
    if sin_t <= 1.0 { Some(sin_t.asin()) } else { None }
}

/// FWHM ΔQ at angle T ≥ 0 given ΔL/L and ΔT.
pub(crate) fn spread(t: f64, wavelength: f64, dlol: f64, dt: f64) -> f64 {
    if !(dlol >= 0.0 && dt >= 0.0 && wavelength > 0.0) {
        return f64::NAN;
    }
    let (sin_t, cos_t) = t.sin_cos();
    PI4 / wavelength * (sin_t * dlol).hypot(cos_t * dt)
}
