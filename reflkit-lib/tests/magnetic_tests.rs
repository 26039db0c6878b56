use approx::assert_relative_eq;
use reflkit::constants::PI4;
use reflkit::reflkit_data::{MagneticSample, MagneticSlab};
use reflkit::{MagneticLayerProfile, magnetic_amplitude, reflectivity_amplitude};

fn q_grid() -> Vec<f64> {
    (1..60).map(|i| 0.002 * i as f64).collect()
}

#[test]
fn test_nonmagnetic_matches_scalar_for_any_angle() {
    let rho = [0.0, 6.0e-6, 3.0e-6, 2.07e-6];
    let mu = [0.0, 1e-8, 0.0, 0.0];
    let d = [0.0, 60.0, 110.0, 0.0];
    let theta = [0.3, 1.2, -2.0, 0.7];
    let q = q_grid();

    let amp = magnetic_amplitude(&rho, &mu, &d, &[5.0], &[0.0; 4], &theta, &q).unwrap();
    let scalar = reflectivity_amplitude(&rho, &mu, &d, &[5.0], &q).unwrap();
    for i in 0..q.len() {
        for v in [amp.pp[i], amp.mm[i]] {
            assert_relative_eq!(v.re, scalar[i].re, epsilon = 1e-10);
            assert_relative_eq!(v.im, scalar[i].im, epsilon = 1e-10);
        }
        assert!(amp.pm[i].norm() < 1e-10, "Q = {}", q[i]);
        assert!(amp.mp[i].norm() < 1e-10, "Q = {}", q[i]);
    }
}

#[test]
fn test_reversed_moment_swaps_spin_states() {
    let rho = [0.0, 8.0e-6, 2.07e-6];
    let d = [0.0, 100.0, 0.0];
    let rho_m = [0.0, 2.0e-6, 0.0];
    let q = q_grid();

    let along = magnetic_amplitude(&rho, &[0.0; 3], &d, &[5.0], &rho_m, &[0.0; 3], &q).unwrap();
    let against = magnetic_amplitude(
        &rho,
        &[0.0; 3],
        &d,
        &[5.0],
        &rho_m,
        &[0.0, std::f64::consts::PI, 0.0],
        &q,
    )
    .unwrap();
    for i in 0..q.len() {
        assert_relative_eq!(along.pp[i].re, against.mm[i].re, epsilon = 1e-10);
        assert_relative_eq!(along.pp[i].im, against.mm[i].im, epsilon = 1e-10);
        assert_relative_eq!(along.mm[i].re, against.pp[i].re, epsilon = 1e-10);
        assert_relative_eq!(along.mm[i].im, against.pp[i].im, epsilon = 1e-10);
    }
}

#[test]
fn test_noncollinear_spin_flip() {
    let rho = [0.0, 8.0e-6, 4.0e-6, 2.07e-6];
    let d = [0.0, 80.0, 150.0, 0.0];
    let rho_m = [0.0, 1.5e-6, 0.0, 0.0];
    let theta = [0.0, std::f64::consts::FRAC_PI_2, 0.0, 0.0];
    let q = q_grid();

    let amp = magnetic_amplitude(&rho, &[0.0; 4], &d, &[5.0], &rho_m, &theta, &q).unwrap();
    let [pp, mm, pm, mp] = amp.intensities();
    let mut flipped = 0.0_f64;
    for i in 0..q.len() {
        // the two spin-flip channels are equal for a non-absorbing sample
        assert_relative_eq!(amp.pm[i].re, amp.mp[i].re, epsilon = 1e-10);
        assert_relative_eq!(amp.pm[i].im, amp.mp[i].im, epsilon = 1e-10);
        // reflected flux cannot exceed incident flux for either spin
        assert!(pp[i] + pm[i] <= 1.0 + 1e-10, "Q = {}", q[i]);
        assert!(mm[i] + mp[i] <= 1.0 + 1e-10, "Q = {}", q[i]);
        flipped = flipped.max(pm[i]);
    }
    assert!(flipped > 1e-6, "max spin flip = {flipped}");
}

#[test]
fn test_negative_q_uses_reversed_stack() {
    let rho = [0.0, 8.0e-6, 2.07e-6];
    let d = [0.0, 100.0, 0.0];
    let rho_m = [0.0, 2.0e-6, 0.0];
    let theta = [0.0, 0.8, 0.0];

    let back =
        magnetic_amplitude(&rho, &[0.0; 3], &d, &[5.0], &rho_m, &theta, &[-0.04]).unwrap();
    let flipped = magnetic_amplitude(
        &[2.07e-6, 8.0e-6, 0.0],
        &[0.0; 3],
        &d,
        &[5.0],
        &rho_m,
        &theta,
        &[0.04],
    )
    .unwrap();
    assert_eq!(back, flipped);
}

#[test]
fn test_profile_from_sample_record() {
    let layer = |rho: f64, thickness: f64, rho_m: f64| MagneticSlab {
        rho,
        mu: 0.0,
        thickness,
        rho_m,
        theta_m: 0.0,
    };
    let sample = MagneticSample {
        layers: vec![layer(0.0, 0.0, 0.0), layer(8e-6, 100.0, 2e-6), layer(2.07e-6, 0.0, 0.0)],
    };
    let profile = MagneticLayerProfile::try_from(&sample).unwrap();
    let q = [0.02, 0.05];
    let amp = profile.amplitude(&[5.0], &q).unwrap();
    let nuclear = profile.nuclear().amplitude(&[5.0], &q).unwrap();
    assert_eq!(profile.len(), 3);
    // the moment splits ++ and −− around the nuclear curve
    for i in 0..q.len() {
        assert!(amp.pp[i] != nuclear[i]);
        assert!(amp.mm[i] != nuclear[i]);
    }
}

#[test]
fn test_spin_state_at_its_critical_edge() {
    for kz in [0.0125, 0.008, 0.015] {
        let rho_film = kz * kz / PI4;
        let rho = [0.0, rho_film, 2.07e-6];
        let d = [0.0, 50.0, 0.0];
        let q = 2.0 * kz;
        let theta = [0.0, 1.0, 0.0];

        // without a moment both spin states sit on the edge together
        let amp = magnetic_amplitude(&rho, &[0.0; 3], &d, &[5.0], &[0.0; 3], &theta, &[q]).unwrap();
        let scalar = reflectivity_amplitude(&rho, &[0.0; 3], &d, &[5.0], &[q]).unwrap()[0];
        assert!((amp.pp[0] - scalar).norm() < 1e-10, "kz = {kz}");
        assert!((amp.mm[0] - scalar).norm() < 1e-10, "kz = {kz}");
        assert!(amp.pm[0].norm() < 1e-10 && amp.mp[0].norm() < 1e-10);

        for rho_m in [[0.0; 3], [0.0, 1e-6, 0.0]] {
            let at = magnetic_amplitude(&rho, &[0.0; 3], &d, &[5.0], &rho_m, &theta, &[q]).unwrap();
            let near = magnetic_amplitude(
                &rho,
                &[0.0; 3],
                &d,
                &[5.0],
                &rho_m,
                &theta,
                &[q * (1.0 + 1e-9)],
            )
            .unwrap();
            let pairs = [
                (at.pp[0], near.pp[0]),
                (at.mm[0], near.mm[0]),
                (at.pm[0], near.pm[0]),
                (at.mp[0], near.mp[0]),
            ];
            for (a, b) in pairs {
                assert!(a.re.is_finite() && a.im.is_finite(), "kz = {kz}: {a}");
                assert!((a - b).norm() < 1e-6, "kz = {kz}: {a} vs {b}");
            }
        }
    }
}
