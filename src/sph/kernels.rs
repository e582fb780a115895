//! Smoothing kernels for the SPH estimators.
//!
//! The cubic spline below has compact support of radius `2h` and is
//! normalized so its volume integral over three dimensions equals one, which
//! makes kernel-weighted mass sums proper density estimates.

use std::f64::consts::PI;

/// 3-D cubic-spline kernel W(r, h).
///
/// Piecewise in q = r/h with support radius 2h:
/// `sigma * (1 - 1.5 q^2 + 0.75 q^3)` for q < 1,
/// `sigma * 0.25 (2 - q)^3` for 1 <= q < 2, zero beyond,
/// with `sigma = 1 / (pi h^3)`.
///
/// # Examples
///
/// ```
/// use rs_starform::sph::cubic_spline;
///
/// let h = 0.5;
/// assert!(cubic_spline(0.0, h) > 0.0);
/// // compact support: nothing contributes beyond 2h
/// assert_eq!(cubic_spline(2.0 * h, h), 0.0);
/// assert_eq!(cubic_spline(3.0 * h, h), 0.0);
/// ```
pub fn cubic_spline(r: f64, h: f64) -> f64 {
    let q = r / h;
    let sigma = 1.0 / (PI * h * h * h);
    if q < 1.0 {
        sigma * (1.0 - 1.5 * q * q + 0.75 * q * q * q)
    } else if q < 2.0 {
        let t = 2.0 - q;
        sigma * 0.25 * t * t * t
    } else {
        0.0
    }
}

/// Radial derivative dW/dr of the 3-D cubic spline.
///
/// Returns zero at r <= 0 (the kernel is flat at the center) and beyond the
/// 2h support radius. Negative everywhere in between: the kernel falls off
/// monotonically.
pub fn cubic_spline_grad(r: f64, h: f64) -> f64 {
    if r <= 0.0 {
        return 0.0;
    }
    let q = r / h;
    let sigma = 1.0 / (PI * h * h * h * h);
    if q < 1.0 {
        sigma * (-3.0 * q + 2.25 * q * q)
    } else if q < 2.0 {
        let t = 2.0 - q;
        sigma * (-0.75 * t * t)
    } else {
        0.0
    }
}

/// Support radius of the cubic spline for a given smoothing length.
#[inline]
pub fn support_radius(h: f64) -> f64 {
    2.0 * h
}
