//! 2×2 complex matrices acting on the (+, −) neutron spin basis.

use std::ops::{Add, Mul, Sub};

use num_complex::Complex64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spin2 {
    pub(crate) m: [[Complex64; 2]; 2],
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

impl Spin2 {
    pub(crate) const ZERO: Spin2 = Spin2 {
        m: [[ZERO, ZERO], [ZERO, ZERO]],
    };

    pub(crate) const IDENTITY: Spin2 = Spin2 {
        m: [[ONE, ZERO], [ZERO, ONE]],
    };

    /// a·Π⁺ + b·Π⁻ where Π± = (I ± S)/2 project onto the eigenstates of
    /// S = [[cos θ, sin θ], [sin θ, −cos θ]].
    ///
    /// Any function of a matrix diagonal in that basis, such as the layer
    /// wavevector, its inverse or its phase factor, has this form.
    pub(crate) fn spectral(a: Complex64, b: Complex64, cos: f64, sin: f64) -> Spin2 {
        let mean = (a + b) * 0.5;
        let half = (a - b) * 0.5;
        Spin2 {
            m: [
                [mean + half * cos, half * sin],
                [half * sin, mean - half * cos],
            ],
        }
    }

    pub(crate) fn det(&self) -> Complex64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Inverse by the adjugate. A singular matrix yields non-finite entries.
    pub(crate) fn inv(&self) -> Spin2 {
        let det = self.det();
        Spin2 {
            m: [
                [self.m[1][1] / det, -self.m[0][1] / det],
                [-self.m[1][0] / det, self.m[0][0] / det],
            ],
        }
    }
}

impl Add for Spin2 {
    type Output = Spin2;

    fn add(self, rhs: Spin2) -> Spin2 {
        let mut out = self;
        for (row, rrow) in out.m.iter_mut().zip(rhs.m.iter()) {
            for (v, r) in row.iter_mut().zip(rrow.iter()) {
                *v += *r;
            }
        }
        out
    }
}

impl Sub for Spin2 {
    type Output = Spin2;

    fn sub(self, rhs: Spin2) -> Spin2 {
        let mut out = self;
        for (row, rrow) in out.m.iter_mut().zip(rhs.m.iter()) {
            for (v, r) in row.iter_mut().zip(rrow.iter()) {
                *v -= *r;
            }
        }
        out
    }
}

impl Mul for Spin2 {
    type Output = Spin2;

    fn mul(self, rhs: Spin2) -> Spin2 {
        let a = &self.m;
        let b = &rhs.m;
        Spin2 {
            m: [
                [
                    a[0][0] * b[0][0] + a[0][1] * b[1][0],
                    a[0][0] * b[0][1] + a[0][1] * b[1][1],
                ],
                [
                    a[1][0] * b[0][0] + a[1][1] * b[1][0],
                    a[1][0] * b[0][1] + a[1][1] * b[1][1],
                ],
            ],
        }
    }
}
