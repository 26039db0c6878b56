/// Linear interpolation of `(xp, fp)` at points `x`.
///
/// `xp` must be non-decreasing and `fp` at least as long. Values outside the
/// range are clamped to the boundary values. An empty `xp` gives NaN.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| interp_one(xi, xp, fp)).collect()
}

/// Interpolate a single value. NaN when `x` is NaN or `xp` is empty.
pub fn interp_one(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let Some(last) = xp.len().checked_sub(1) else {
        return f64::NAN;
    };
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // first knot at or past x; 0 < idx <= last here
    let idx = xp.partition_point(|&v| v < x);
    if xp[idx] == x {
        return fp[idx];
    }

    let lo = idx - 1;
    let t = (x - xp[lo]) / (xp[idx] - xp[lo]);
    fp[lo] + t * (fp[idx] - fp[lo])
}
