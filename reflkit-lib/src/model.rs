//! Owned, validated layer profiles.
//!
//! The engines take column slices; these types hold the columns, check them
//! once on construction and forward to the free functions. They are built
//! directly or from the serde records in [`reflkit_data`].

use num_complex::Complex64;
use reflkit_data::{MagneticSample, MagneticSlab, Sample, Slab};

use crate::error::Result;
use crate::magnetic::{MagneticAmplitudes, magnetic_amplitude};
use crate::points::check_len;
use crate::profile::{microslabs, sld_profile};
use crate::reflectivity::{
    check_stack, reflectivity, reflectivity_amplitude, reflectivity_amplitude_rough,
};

/// Layers from the incident medium to the substrate, with the roughness of
/// each interface between them.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerProfile {
    rho: Vec<f64>,
    mu: Vec<f64>,
    d: Vec<f64>,
    sigma: Vec<f64>,
}

impl LayerProfile {
    /// `sigma` has one entry per interface, one fewer than `rho`.
    pub fn new(rho: Vec<f64>, mu: Vec<f64>, d: Vec<f64>, sigma: Vec<f64>) -> Result<Self> {
        let layers = check_stack(&rho, &mu, &d)?;
        check_len("sigma", &sigma, layers - 1)?;
        Ok(LayerProfile { rho, mu, d, sigma })
    }

    /// Build from slab records. The `interface` roughness of the last slab
    /// has no interface below it and is ignored.
    pub fn from_slabs(slabs: &[Slab]) -> Result<Self> {
        let rho = slabs.iter().map(|s| s.rho).collect();
        let mu = slabs.iter().map(|s| s.mu).collect();
        let d = slabs.iter().map(|s| s.thickness).collect();
        let sigma = slabs
            .iter()
            .take(slabs.len().saturating_sub(1))
            .map(|s| s.interface)
            .collect();
        Self::new(rho, mu, d, sigma)
    }

    pub fn len(&self) -> usize {
        self.rho.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rho.is_empty()
    }

    pub fn rho(&self) -> &[f64] {
        &self.rho
    }

    pub fn mu(&self) -> &[f64] {
        &self.mu
    }

    pub fn thickness(&self) -> &[f64] {
        &self.d
    }

    pub fn interfaces(&self) -> &[f64] {
        &self.sigma
    }

    /// Amplitude ignoring the interface roughness.
    pub fn amplitude(&self, wavelength: &[f64], q: &[f64]) -> Result<Vec<Complex64>> {
        reflectivity_amplitude(&self.rho, &self.mu, &self.d, wavelength, q)
    }

    /// Amplitude with Névot–Croce damped interfaces.
    pub fn amplitude_rough(&self, wavelength: &[f64], q: &[f64]) -> Result<Vec<Complex64>> {
        reflectivity_amplitude_rough(&self.rho, &self.mu, &self.d, &self.sigma, wavelength, q)
    }

    /// |r|² ignoring the interface roughness.
    pub fn reflectivity(&self, wavelength: &[f64], q: &[f64]) -> Result<Vec<f64>> {
        reflectivity(&self.rho, &self.mu, &self.d, wavelength, q)
    }

    /// |r|² with Névot–Croce damped interfaces.
    pub fn reflectivity_rough(&self, wavelength: &[f64], q: &[f64]) -> Result<Vec<f64>> {
        let r = self.amplitude_rough(wavelength, q)?;
        Ok(r.iter().map(|v| v.norm_sqr()).collect())
    }

    pub fn sld_profile(&self, z: &[f64]) -> Result<Vec<f64>> {
        sld_profile(z, &self.rho, &self.d, &self.sigma)
    }

    pub fn microslabs(&self, dz: f64) -> Result<LayerProfile> {
        microslabs(&self.rho, &self.mu, &self.d, &self.sigma, dz)
    }
}

impl TryFrom<&Sample> for LayerProfile {
    type Error = crate::ReflError;

    fn try_from(sample: &Sample) -> Result<Self> {
        LayerProfile::from_slabs(&sample.layers)
    }
}

/// Layers carrying a magnetic SLD and moment direction.
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticLayerProfile {
    rho: Vec<f64>,
    mu: Vec<f64>,
    d: Vec<f64>,
    rho_m: Vec<f64>,
    theta: Vec<f64>,
}

impl MagneticLayerProfile {
    pub fn new(
        rho: Vec<f64>,
        mu: Vec<f64>,
        d: Vec<f64>,
        rho_m: Vec<f64>,
        theta: Vec<f64>,
    ) -> Result<Self> {
        let layers = check_stack(&rho, &mu, &d)?;
        check_len("rho_m", &rho_m, layers)?;
        check_len("theta", &theta, layers)?;
        Ok(MagneticLayerProfile {
            rho,
            mu,
            d,
            rho_m,
            theta,
        })
    }

    pub fn from_slabs(slabs: &[MagneticSlab]) -> Result<Self> {
        Self::new(
            slabs.iter().map(|s| s.rho).collect(),
            slabs.iter().map(|s| s.mu).collect(),
            slabs.iter().map(|s| s.thickness).collect(),
            slabs.iter().map(|s| s.rho_m).collect(),
            slabs.iter().map(|s| s.theta_m).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rho.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rho.is_empty()
    }

    pub fn rho_m(&self) -> &[f64] {
        &self.rho_m
    }

    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// The nuclear part alone, with sharp interfaces.
    pub fn nuclear(&self) -> LayerProfile {
        LayerProfile {
            rho: self.rho.clone(),
            mu: self.mu.clone(),
            d: self.d.clone(),
            sigma: vec![0.0; self.rho.len() - 1],
        }
    }

    pub fn amplitude(&self, wavelength: &[f64], q: &[f64]) -> Result<MagneticAmplitudes> {
        magnetic_amplitude(
            &self.rho,
            &self.mu,
            &self.d,
            wavelength,
            &self.rho_m,
            &self.theta,
            q,
        )
    }
}

impl TryFrom<&MagneticSample> for MagneticLayerProfile {
    type Error = crate::ReflError;

    fn try_from(sample: &MagneticSample) -> Result<Self> {
        MagneticLayerProfile::from_slabs(&sample.layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReflError;

    #[test]
    fn test_from_slabs_drops_last_interface() {
        let slabs = [
            Slab {
                rho: 0.0,
                mu: 0.0,
                thickness: 0.0,
                interface: 3.0,
            },
            Slab {
                rho: 2.07e-6,
                mu: 0.0,
                thickness: 0.0,
                interface: 9.0,
            },
        ];
        let p = LayerProfile::from_slabs(&slabs).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.interfaces(), &[3.0]);
    }

    #[test]
    fn test_construction_is_validated() {
        assert_eq!(
            LayerProfile::from_slabs(&[]).unwrap_err(),
            ReflError::TooFewLayers { layers: 0 }
        );
        assert!(matches!(
            LayerProfile::new(vec![0.0; 3], vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]),
            Err(ReflError::LengthMismatch { name: "sigma", .. })
        ));
        assert!(matches!(
            MagneticLayerProfile::new(
                vec![0.0; 2],
                vec![0.0; 2],
                vec![0.0; 2],
                vec![0.0; 2],
                vec![0.0]
            ),
            Err(ReflError::LengthMismatch { name: "theta", .. })
        ));
    }
}
