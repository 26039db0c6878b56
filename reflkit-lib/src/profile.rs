//! Depth profiles of a layer stack with error-function interfaces.
//!
//! Depth z runs into the sample with z = 0 at the first interface. The
//! interface below layer j sits at zⱼ = d₁ + … + dⱼ and blends the two
//! neighbouring values with ½(1 + erf((z − zⱼ)/(√2 σⱼ))). Overlapping
//! interfaces simply add.

use crate::erf::erf_one;
use crate::error::{ReflError, Result};
use crate::model::LayerProfile;
use crate::points::check_len;
use crate::reflectivity::{check_layers, check_stack};

use std::f64::consts::SQRT_2;

/// How far past the outermost interfaces, in σ, the rendered profile
/// extends before handing over to the semi-infinite media.
const TAIL_SIGMAS: f64 = 5.0;

/// SLD at each depth `z`.
///
/// A zero roughness gives a sharp step: the deeper layer's value applies
/// from the interface onwards.
pub fn sld_profile(z: &[f64], rho: &[f64], d: &[f64], sigma: &[f64]) -> Result<Vec<f64>> {
    let layers = check_layers(rho, d)?;
    check_len("sigma", sigma, layers - 1)?;
    let offsets = interface_depths(d);
    Ok(z.iter()
        .map(|&zi| blend(zi, rho, &offsets, sigma))
        .collect())
}

/// Slice the rough profile into uniform slabs no thicker than `dz`.
///
/// Each layer and the two interface tails are cut separately, so sharp
/// interfaces fall on slab boundaries. Slab values (SLD and absorption)
/// are the blended profile at the slab centre. The returned profile has
/// sharp interfaces and keeps the original incident medium and substrate.
pub fn microslabs(
    rho: &[f64],
    mu: &[f64],
    d: &[f64],
    sigma: &[f64],
    dz: f64,
) -> Result<LayerProfile> {
    let layers = check_stack(rho, mu, d)?;
    check_len("sigma", sigma, layers - 1)?;
    if !(dz > 0.0 && dz.is_finite()) {
        return Err(ReflError::InvalidParameter(format!(
            "microslab step must be positive and finite, got {dz}"
        )));
    }

    let offsets = interface_depths(d);
    let top = -TAIL_SIGMAS * sigma[0].abs();
    let bottom = offsets[layers - 2] + TAIL_SIGMAS * sigma[layers - 2].abs();
    let mut edges = Vec::with_capacity(layers + 1);
    edges.push(top);
    edges.extend_from_slice(&offsets);
    edges.push(bottom);

    let mut out_rho = vec![rho[0]];
    let mut out_mu = vec![mu[0]];
    let mut out_d = vec![0.0];
    for w in edges.windows(2) {
        let width = w[1] - w[0];
        if !(width > 0.0) {
            continue;
        }
        let n = (width / dz).ceil().max(1.0) as usize;
        let step = width / n as f64;
        for i in 0..n {
            let z = w[0] + (i as f64 + 0.5) * step;
            out_rho.push(blend(z, rho, &offsets, sigma));
            out_mu.push(blend(z, mu, &offsets, sigma));
            out_d.push(step);
        }
    }
    out_rho.push(rho[layers - 1]);
    out_mu.push(mu[layers - 1]);
    out_d.push(0.0);
    tracing::debug!(layers, slabs = out_d.len() - 2, dz, "rendered microslabs");

    let interfaces = vec![0.0; out_rho.len() - 1];
    LayerProfile::new(out_rho, out_mu, out_d, interfaces)
}

/// Depth of the interface below each layer but the substrate.
fn interface_depths(d: &[f64]) -> Vec<f64> {
    let mut z = 0.0;
    let mut out = Vec::with_capacity(d.len() - 1);
    out.push(0.0);
    for &thickness in &d[1..d.len() - 1] {
        z += thickness;
        out.push(z);
    }
    out
}

fn blend(z: f64, values: &[f64], offsets: &[f64], sigma: &[f64]) -> f64 {
    let mut v = values[0];
    for (j, (&zj, &s)) in offsets.iter().zip(sigma).enumerate() {
        let step = values[j + 1] - values[j];
        let fraction = if s == 0.0 {
            if z >= zj { 1.0 } else { 0.0 }
        } else {
            0.5 * (1.0 + erf_one((z - zj) / (SQRT_2 * s.abs())))
        };
        v += step * fraction;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sharp_profile_steps() {
        let rho = [0.0, 4.0, 2.0];
        let d = [0.0, 10.0, 0.0];
        let z = [-1.0, 0.0, 5.0, 10.0, 20.0];
        let p = sld_profile(&z, &rho, &d, &[0.0, 0.0]).unwrap();
        assert_eq!(p, vec![0.0, 4.0, 4.0, 2.0, 2.0]);
    }

    #[test]
    fn test_rough_interface_midpoint() {
        let p = sld_profile(&[0.0, -30.0, 30.0], &[1.0, 3.0], &[0.0, 0.0], &[3.0]).unwrap();
        assert_relative_eq!(p[0], 2.0, epsilon = 1e-15);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_microslabs_of_sharp_stack() {
        let slabs = microslabs(
            &[0.0, 4e-6, 2.07e-6],
            &[0.0, 1e-8, 0.0],
            &[0.0, 10.0, 0.0],
            &[0.0, 0.0],
            3.0,
        )
        .unwrap();
        // one 10 Å layer cut into four 2.5 Å slabs between the two media
        assert_eq!(slabs.len(), 6);
        assert_eq!(slabs.rho()[1], 4e-6);
        assert_eq!(slabs.mu()[4], 1e-8);
        for &t in &slabs.thickness()[1..5] {
            assert_relative_eq!(t, 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_microslab_step_validated() {
        let err = microslabs(&[0.0, 1.0], &[0.0; 2], &[0.0; 2], &[1.0], 0.0).unwrap_err();
        assert!(matches!(err, ReflError::InvalidParameter(_)));
    }
}
