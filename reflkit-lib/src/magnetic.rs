//! Polarized neutron reflectivity from magnetic layers.
//!
//! In layer j the neutron sees the spin-space potential
//! 4π(ρⱼ·I + Pⱼ·Sⱼ) with Sⱼ = [[cos θⱼ, sin θⱼ], [sin θⱼ, −cos θⱼ]], where
//! Pⱼ is the magnetic SLD and θⱼ the in-plane angle between the moment and
//! the applied field. Spin + (along the field) sees ρ + P·cos θ; the
//! perpendicular component P·sin θ couples the two spin states.
//!
//! Since S² = I, every layer quantity is a + b combination of the two
//! projectors onto the eigenstates of S, and the scalar Parratt recursion
//! of [`crate::reflectivity`] carries over with 2×2 matrices:
//!
//! ```text
//! W = I + G,  V = I − G
//! R = Kⱼ⁻¹ (Kⱼ W − Kⱼ₊₁ V)(Kⱼ W + Kⱼ₊₁ V)⁻¹ Kⱼ
//! G = Eⱼ R Eⱼ,  Eⱼ = exp(i Kⱼ dⱼ)
//! ```
//!
//! starting from G = 0 below the substrate. Matrix elements are indexed
//! `[out][in]`, so `pm` is the amplitude for an incident + neutron to leave
//! as −. Q sign and Q = 0 follow the scalar engine.

use num_complex::Complex64;

use crate::constants::{KZ_CUTOFF, PI4};
use crate::error::Result;
use crate::points::{PerPoint, check_len, map_points};
use crate::reflectivity::{Order, absorption_term, check_stack, off_edge};
use crate::spin::Spin2;

/// The four polarization cross-section amplitudes, one entry per Q.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagneticAmplitudes {
    /// ++ (non-spin-flip)
    pub pp: Vec<Complex64>,
    /// −− (non-spin-flip)
    pub mm: Vec<Complex64>,
    /// +− (incident +, reflected −)
    pub pm: Vec<Complex64>,
    /// −+ (incident −, reflected +)
    pub mp: Vec<Complex64>,
}

impl MagneticAmplitudes {
    /// Reflectivities |r|² in the order (++, −−, +−, −+).
    pub fn intensities(&self) -> [Vec<f64>; 4] {
        let norm = |v: &[Complex64]| v.iter().map(|r| r.norm_sqr()).collect::<Vec<_>>();
        [norm(&self.pp), norm(&self.mm), norm(&self.pm), norm(&self.mp)]
    }
}

/// Spin-dependent reflection amplitudes.
///
/// # Arguments
/// * `rho`, `mu`, `d` - Nuclear SLD, absorption and thickness, as for
///   [`crate::reflectivity_amplitude`]
/// * `wavelength` - Wavelength (Å), one value or one per Q
/// * `rho_m` - Magnetic SLD of each layer (Å⁻²)
/// * `theta` - Angle between moment and field in each layer (radians)
/// * `q` - Momentum transfer (Å⁻¹)
pub fn magnetic_amplitude(
    rho: &[f64],
    mu: &[f64],
    d: &[f64],
    wavelength: &[f64],
    rho_m: &[f64],
    theta: &[f64],
    q: &[f64],
) -> Result<MagneticAmplitudes> {
    let layers = check_stack(rho, mu, d)?;
    check_len("rho_m", rho_m, layers)?;
    check_len("theta", theta, layers)?;
    let wavelength = PerPoint::new("wavelength", wavelength, q.len())?;
    tracing::debug!(layers, points = q.len(), "magnetic amplitude");

    let stack = MagneticStack {
        rho,
        mu,
        d,
        rho_m,
        theta,
    };
    let reflections = map_points(q.len(), |i| stack.reflection(q[i] / 2.0, wavelength.at(i)));

    let mut out = MagneticAmplitudes {
        pp: Vec::with_capacity(q.len()),
        mm: Vec::with_capacity(q.len()),
        pm: Vec::with_capacity(q.len()),
        mp: Vec::with_capacity(q.len()),
    };
    for g in reflections {
        out.pp.push(g.m[0][0]);
        out.mm.push(g.m[1][1]);
        out.pm.push(g.m[1][0]);
        out.mp.push(g.m[0][1]);
    }
    Ok(out)
}

struct MagneticStack<'a> {
    rho: &'a [f64],
    mu: &'a [f64],
    d: &'a [f64],
    rho_m: &'a [f64],
    theta: &'a [f64],
}

/// Wavevectors of the two spin eigenstates of one layer plus the
/// orientation of its eigenbasis.
struct LayerWaves {
    plus: Complex64,
    minus: Complex64,
    cos: f64,
    sin: f64,
}

impl LayerWaves {
    fn matrix(&self) -> Spin2 {
        Spin2::spectral(self.plus, self.minus, self.cos, self.sin)
    }

    fn inverse(&self) -> Spin2 {
        Spin2::spectral(self.plus.inv(), self.minus.inv(), self.cos, self.sin)
    }

    fn phase(&self, thickness: f64) -> Spin2 {
        let i = Complex64::i();
        Spin2::spectral(
            (i * self.plus * thickness).exp(),
            (i * self.minus * thickness).exp(),
            self.cos,
            self.sin,
        )
    }
}

impl MagneticStack<'_> {
    fn reflection(&self, kz: f64, wavelength: f64) -> Spin2 {
        if kz.abs() < KZ_CUTOFF {
            let mut g = Spin2::ZERO;
            g.m[0][0] = Complex64::new(-1.0, 0.0);
            g.m[1][1] = Complex64::new(-1.0, 0.0);
            return g;
        }
        let n = self.rho.len();
        let order = Order::new(n, kz);
        let kz = kz.abs();
        let kz_sq = kz * kz + PI4 * self.rho[order.layer(0)];

        let waves = |j: usize| -> LayerWaves {
            let l = order.layer(j);
            let (sin, cos) = self.theta[l].sin_cos();
            let p = self.rho_m[l];
            if j == 0 && p == 0.0 {
                let k = Complex64::new(kz, 0.0);
                return LayerWaves {
                    plus: k,
                    minus: k,
                    cos,
                    sin,
                };
            }
            // the incident medium's absorption is ignored, as in the scalar engine
            let absorption = if j == 0 {
                0.0
            } else {
                absorption_term(self.mu[l], wavelength)
            };
            let base = kz_sq - PI4 * self.rho[l];
            LayerWaves {
                plus: off_edge(Complex64::new(base - PI4 * p, absorption).sqrt()),
                minus: off_edge(Complex64::new(base + PI4 * p, absorption).sqrt()),
                cos,
                sin,
            }
        };

        let mut g = Spin2::ZERO;
        let mut k_below = waves(n - 1).matrix();
        for j in (0..n - 1).rev() {
            let layer = waves(j);
            let k = layer.matrix();
            let w = k * (Spin2::IDENTITY + g);
            let v = k_below * (Spin2::IDENTITY - g);
            let r = layer.inverse() * (w - v) * (w + v).inv() * k;
            g = if j > 0 {
                let e = layer.phase(self.d[order.layer(j)]);
                e * r * e
            } else {
                r
            };
            k_below = k;
        }
        g
    }
}
