use approx::assert_relative_eq;
use reflkit::instrument::fwhm_to_sigma;
use reflkit::{
    ConvolveMethod, ConvolveOptions, convolve, convolve_with, reflectivity,
    resolution_varying_slits,
};

/// Reflectivity of a 250 Å nickel film on silicon, finely sampled.
fn nickel_film() -> (Vec<f64>, Vec<f64>) {
    let q: Vec<f64> = (0..3000).map(|i| 0.002 + 0.0001 * i as f64).collect();
    let r = reflectivity(
        &[0.0, 9.4e-6, 2.07e-6],
        &[0.0; 3],
        &[0.0, 250.0, 0.0],
        &[5.0],
        &q,
    )
    .unwrap();
    (q, r)
}

#[test]
fn test_zero_width_returns_reference() {
    let (q, r) = nickel_film();
    let out = convolve(&q, &r, &q, &vec![0.0; q.len()]).unwrap();
    assert_eq!(out, r);
}

#[test]
fn test_narrow_kernel_approaches_reference() {
    let (q, r) = nickel_film();
    let targets: Vec<f64> = q.iter().step_by(97).copied().collect();
    let expected: Vec<f64> = r.iter().step_by(97).copied().collect();
    let out = convolve(&q, &r, &targets, &vec![1e-7; targets.len()]).unwrap();
    for (a, b) in out.iter().zip(&expected) {
        assert_relative_eq!(*a, *b, max_relative = 1e-6);
    }
}

#[test]
fn test_smeared_curve_stays_within_data() {
    let (q, r) = nickel_film();
    let lo = r.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let targets: Vec<f64> = (0..200).map(|i| 0.0015 * i as f64).collect();
    let dq = vec![0.004; targets.len()];
    for method in [ConvolveMethod::Exact, ConvolveMethod::default()] {
        let out = convolve_with(&q, &r, &targets, &dq, &ConvolveOptions { method }).unwrap();
        for (t, v) in targets.iter().zip(&out) {
            assert!(*v >= lo * (1.0 - 1e-12) && *v <= hi * (1.0 + 1e-12), "Q = {t}: {v}");
        }
    }
}

#[test]
fn test_resolution_washes_out_fringes() {
    let (q, r) = nickel_film();
    let fwhm = resolution_varying_slits(&[5.0], &[0.03], &[0.03], &q).unwrap();
    let sigma: Vec<f64> = fwhm.iter().map(|&w| fwhm_to_sigma(w)).collect();
    let smeared = convolve(&q, &r, &q, &sigma).unwrap();

    // Kiessig fringes of a 250 Å film are 2π/250 ≈ 0.025 Å⁻¹ apart; by
    // Q ≈ 0.25 the kernel spans several of them and the contrast drops
    let window = |v: &[f64]| {
        let slice = &v[2200..2600];
        let max = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = slice.iter().copied().fold(f64::INFINITY, f64::min);
        max / min
    };
    assert!(window(&smeared) < window(&r));
    assert!(smeared.iter().all(|v| v.is_finite() && *v > 0.0));
}
