//! Numeric helpers for tolerance-aware routing math.
//!
//! All routing comparisons go through explicit digit-count rounding: final
//! coordinates are rounded at a coarse linear tolerance while derived
//! quantities (distances, angles) use a finer compound tolerance. Keeping
//! both as named operations is what makes repeated-direction comparisons
//! exact across pipeline stages.

use std::f64::consts::PI;

/// Round a value to `digits` decimal places.
///
/// # Example
/// ```
/// use marga::core::math::round_to;
///
/// assert_eq!(round_to(1.23456789, 3), 1.235);
/// assert_eq!(round_to(-0.0004, 3), -0.0);
/// ```
#[inline]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

/// The comparison epsilon implied by a digit count: `0.1^digits`.
#[inline]
pub fn digit_tolerance(digits: u32) -> f64 {
    0.1f64.powi(digits as i32)
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Round an angle in radians to a whole number of degrees.
#[inline]
pub fn rounded_degrees(radians: f64) -> i32 {
    rad_to_deg(radians).round() as i32
}
