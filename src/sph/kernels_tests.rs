use approx::assert_relative_eq;

use crate::sph::{cubic_spline, cubic_spline_grad, support_radius};

#[test]
fn test_compact_support() {
    let h = 0.5;
    assert!(cubic_spline(0.0, h) > 0.0);
    assert!(cubic_spline(0.99 * support_radius(h), h) > 0.0);
    assert_eq!(cubic_spline(support_radius(h), h), 0.0);
    assert_eq!(cubic_spline(10.0 * h, h), 0.0);
    assert_eq!(cubic_spline_grad(support_radius(h), h), 0.0);
}

#[test]
fn test_volume_integral_is_one() {
    // Radial quadrature of W over its support: int_0^{2h} W(r) 4 pi r^2 dr.
    let h = 0.7;
    let steps = 20_000;
    let dr = support_radius(h) / steps as f64;
    let mut integral = 0.0;
    for s in 0..steps {
        let r = (s as f64 + 0.5) * dr;
        integral += cubic_spline(r, h) * 4.0 * std::f64::consts::PI * r * r * dr;
    }
    assert_relative_eq!(integral, 1.0, max_relative = 1.0e-4);
}

#[test]
fn test_kernel_is_monotone_decreasing() {
    let h = 1.0;
    let mut prev = cubic_spline(0.0, h);
    let mut r = 0.05;
    while r < support_radius(h) {
        let w = cubic_spline(r, h);
        assert!(w <= prev, "kernel increased at r={}", r);
        prev = w;
        r += 0.05;
    }
}

#[test]
fn test_gradient_matches_finite_difference() {
    let h = 0.8;
    let dr = 1.0e-6;
    for &r in &[0.2, 0.5, 0.79, 0.81, 1.1, 1.5] {
        let numeric = (cubic_spline(r + dr, h) - cubic_spline(r - dr, h)) / (2.0 * dr);
        let analytic = cubic_spline_grad(r, h);
        assert_relative_eq!(numeric, analytic, max_relative = 1.0e-4);
    }
}

#[test]
fn test_gradient_is_non_positive_and_zero_at_center() {
    let h = 1.0;
    assert_eq!(cubic_spline_grad(0.0, h), 0.0);
    for &r in &[0.1, 0.5, 1.0, 1.5, 1.9] {
        assert!(cubic_spline_grad(r, h) <= 0.0);
    }
}
