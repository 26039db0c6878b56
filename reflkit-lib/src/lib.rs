pub mod constants;
pub mod convolve;
pub mod erf;
pub mod error;
pub mod instrument;
pub mod interp;
pub mod magnetic;
pub mod model;
pub(crate) mod points;
pub mod profile;
pub mod reflectivity;
pub mod resolution;
pub(crate) mod spin;

pub use convolve::{ConvolveMethod, ConvolveOptions, convolve, convolve_with};
pub use erf::erf;
pub use error::{ReflError, Result};
pub use magnetic::{MagneticAmplitudes, magnetic_amplitude};
pub use model::{LayerProfile, MagneticLayerProfile};
pub use reflectivity::{reflectivity, reflectivity_amplitude, reflectivity_amplitude_rough};
pub use resolution::{resolution_fixed_slits, resolution_varying_slits};
pub use reflkit_data;
