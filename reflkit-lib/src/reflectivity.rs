//! Specular reflectivity of a layered sample, unpolarized beam.
//!
//! The amplitude comes from the Parratt recursion: starting below the
//! substrate with no reflected wave, each interface combines its Fresnel
//! coefficient with the reflection already accumulated beneath it, then
//! advances the phase through the layer above. Phase factors are
//! exp(2i·k·d) with Im k ≥ 0, so nothing grows with depth and thick or
//! strongly absorbing stacks cannot overflow.
//!
//! Conventions shared with [`crate::magnetic`]:
//! * kz = Q/2, plane waves exp(+i·k·z), principal square roots.
//! * The wavevector in layer j is sqrt(kz² + 4π(ρ₀ − ρⱼ) + i·2πμⱼ/L), i.e.
//!   relative to the incident medium, whose absorption is ignored.
//! * Q < 0 means the beam enters through the last layer: the stack is
//!   walked in reverse with |kz|.
//! * |kz| < 1e-10 returns the Q = 0 limit r = −1.

use num_complex::Complex64;

use crate::constants::{KZ_CUTOFF, PI2, PI4};
use crate::error::{ReflError, Result};
use crate::points::{PerPoint, check_len, map_points};

/// Complex reflection amplitude for sharp interfaces.
///
/// # Arguments
/// * `rho` - SLD of each layer (Å⁻²), incident medium first
/// * `mu` - Absorption of each layer (Å⁻²)
/// * `d` - Thickness of each layer (Å); the two semi-infinite media are ignored
/// * `wavelength` - Wavelength (Å), one value or one per Q
/// * `q` - Momentum transfer (Å⁻¹)
pub fn reflectivity_amplitude(
    rho: &[f64],
    mu: &[f64],
    d: &[f64],
    wavelength: &[f64],
    q: &[f64],
) -> Result<Vec<Complex64>> {
    let layers = check_stack(rho, mu, d)?;
    let wavelength = PerPoint::new("wavelength", wavelength, q.len())?;
    tracing::debug!(layers, points = q.len(), "reflectivity amplitude");

    let stack = Stack { rho, mu, d, sigma: None };
    Ok(map_points(q.len(), |i| stack.amplitude(q[i] / 2.0, wavelength.at(i))))
}

/// Complex reflection amplitude with approximate interfacial roughness.
///
/// Each Fresnel coefficient is damped by the Névot–Croce factor
/// exp(−2·kⱼ·kⱼ₊₁·σⱼ²), the reflection factor of an error-function
/// interface. This is an approximation: it is good while σ·Q ≲ 1 and
/// the interface is thin compared with the layers around it, and it
/// degrades as σ·Q grows. For an exact answer slice the profile with
/// [`crate::profile::microslabs`] and use [`reflectivity_amplitude`].
///
/// `sigma[j]` is the roughness between layer j and j+1 (Å), so it has one
/// entry fewer than `rho`.
pub fn reflectivity_amplitude_rough(
    rho: &[f64],
    mu: &[f64],
    d: &[f64],
    sigma: &[f64],
    wavelength: &[f64],
    q: &[f64],
) -> Result<Vec<Complex64>> {
    let layers = check_stack(rho, mu, d)?;
    check_len("sigma", sigma, layers - 1)?;
    let wavelength = PerPoint::new("wavelength", wavelength, q.len())?;

    let sigma_max = sigma.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
    let stretched = q.iter().filter(|&&v| (v * sigma_max).abs() > 1.0).count();
    tracing::debug!(layers, points = q.len(), "rough reflectivity amplitude");
    if stretched > 0 {
        tracing::debug!(
            stretched,
            sigma_max,
            "roughness approximation used beyond sigma*Q = 1"
        );
    }

    let stack = Stack {
        rho,
        mu,
        d,
        sigma: Some(sigma),
    };
    Ok(map_points(q.len(), |i| stack.amplitude(q[i] / 2.0, wavelength.at(i))))
}

/// Reflectivity |r|² for sharp interfaces.
pub fn reflectivity(
    rho: &[f64],
    mu: &[f64],
    d: &[f64],
    wavelength: &[f64],
    q: &[f64],
) -> Result<Vec<f64>> {
    let r = reflectivity_amplitude(rho, mu, d, wavelength, q)?;
    Ok(r.iter().map(|v| v.norm_sqr()).collect())
}

/// Validate a layer stack, returning the number of layers.
pub(crate) fn check_stack(rho: &[f64], mu: &[f64], d: &[f64]) -> Result<usize> {
    let layers = check_layers(rho, d)?;
    check_len("mu", mu, layers)?;
    Ok(layers)
}

/// Layer count and thickness checks shared by everything taking a profile.
pub(crate) fn check_layers(rho: &[f64], d: &[f64]) -> Result<usize> {
    let layers = rho.len();
    if layers < 2 {
        return Err(ReflError::TooFewLayers { layers });
    }
    check_len("d", d, layers)?;
    for (layer, &thickness) in d.iter().enumerate().take(layers - 1).skip(1) {
        if thickness < 0.0 {
            return Err(ReflError::NegativeThickness { layer, thickness });
        }
    }
    Ok(layers)
}

/// Maps traversal position to layer index, reversing for Q < 0.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Order {
    layers: usize,
    reversed: bool,
}

impl Order {
    pub(crate) fn new(layers: usize, kz: f64) -> Self {
        // NaN kz walks in reverse; the NaN reaches the output either way.
        Order {
            layers,
            reversed: kz.is_nan() || kz < 0.0,
        }
    }

    #[inline]
    pub(crate) fn layer(&self, j: usize) -> usize {
        if self.reversed { self.layers - 1 - j } else { j }
    }

    /// Interface between traversal positions j and j+1.
    #[inline]
    pub(crate) fn interface(&self, j: usize) -> usize {
        if self.reversed { self.layers - 2 - j } else { j }
    }
}

/// Imaginary part added to kz² by absorption. Zero absorption stays exactly
/// zero regardless of the wavelength.
#[inline]
pub(crate) fn absorption_term(mu: f64, wavelength: f64) -> f64 {
    if mu == 0.0 { 0.0 } else { PI2 * mu / wavelength }
}

/// Moves a vanishing layer wavevector to `i·KZ_CUTOFF`.
///
/// A non-absorbing layer exactly at its critical edge has k = 0, which
/// turns both neighbouring Fresnel coefficients into ±1 and the phase
/// factor into 1. The product is then 0/0; the floored value reaches the
/// same finite limit as Q approaching that edge.
#[inline]
pub(crate) fn off_edge(k: Complex64) -> Complex64 {
    if k.norm() < KZ_CUTOFF { Complex64::new(0.0, KZ_CUTOFF) } else { k }
}

struct Stack<'a> {
    rho: &'a [f64],
    mu: &'a [f64],
    d: &'a [f64],
    sigma: Option<&'a [f64]>,
}

impl Stack<'_> {
    fn amplitude(&self, kz: f64, wavelength: f64) -> Complex64 {
        if kz.abs() < KZ_CUTOFF {
            return Complex64::new(-1.0, 0.0);
        }
        let n = self.rho.len();
        let order = Order::new(n, kz);
        let kz = kz.abs();
        let kz_sq = kz * kz + PI4 * self.rho[order.layer(0)];

        let wavevector = |j: usize| -> Complex64 {
            if j == 0 {
                return Complex64::new(kz, 0.0);
            }
            let l = order.layer(j);
            off_edge(
                Complex64::new(
                    kz_sq - PI4 * self.rho[l],
                    absorption_term(self.mu[l], wavelength),
                )
                .sqrt(),
            )
        };

        let zero = Complex64::new(0.0, 0.0);
        let mut g = zero;
        let mut k_below = wavevector(n - 1);
        for j in (0..n - 1).rev() {
            let k = wavevector(j);
            let sum = k + k_below;
            // k + k' vanishes only when both media sit exactly at their
            // critical edge, i.e. are the same medium
            let mut f = if sum == zero { zero } else { (k - k_below) / sum };
            if let Some(sigma) = self.sigma {
                let s = sigma[order.interface(j)];
                if s != 0.0 {
                    f *= (-2.0 * s * s * k * k_below).exp();
                }
            }
            let r = (f + g) / (1.0 + f * g);
            g = if j > 0 {
                r * (Complex64::i() * 2.0 * k * self.d[order.layer(j)]).exp()
            } else {
                r
            };
            k_below = k;
        }
        g
    }
}
