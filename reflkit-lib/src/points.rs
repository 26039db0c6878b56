//! Per-point plumbing shared by the engines.

use crate::error::{ReflError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A parameter given either once for all points or once per point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PerPoint<'a> {
    values: &'a [f64],
}

impl<'a> PerPoint<'a> {
    pub(crate) fn new(name: &'static str, values: &'a [f64], points: usize) -> Result<Self> {
        if values.len() == 1 || values.len() == points {
            Ok(PerPoint { values })
        } else {
            Err(ReflError::Broadcast {
                name,
                len: values.len(),
                points,
            })
        }
    }

    #[inline]
    pub(crate) fn at(&self, i: usize) -> f64 {
        if self.values.len() == 1 {
            self.values[0]
        } else {
            self.values[i]
        }
    }
}

pub(crate) fn check_len(name: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(ReflError::LengthMismatch {
            name,
            expected,
            actual: values.len(),
        })
    }
}

/// Evaluate `f` at every point index. Points are independent, so with the
/// `parallel` feature they are spread over the rayon pool.
pub(crate) fn map_points<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..n).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(f).collect()
    }
}
