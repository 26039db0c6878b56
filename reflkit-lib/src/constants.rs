use std::f64::consts::PI;

/// 4π, the scale between SLD (Å⁻²) and the square of a wavevector.
pub const PI4: f64 = 4.0 * PI;

/// 2π, the scale of the absorption term in a layer wavevector.
pub const PI2: f64 = 2.0 * PI;

/// |kz| below which the reflection amplitude takes its Q = 0 limit of -1.
pub const KZ_CUTOFF: f64 = 1e-10;

/// FWHM / σ for a Gaussian, sqrt(8 ln 2).
pub const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949_3;

/// 1/sqrt(π)
pub const FRAC_1_SQRT_PI: f64 = 0.564_189_583_547_756_3;

/// 1/sqrt(2π)
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
