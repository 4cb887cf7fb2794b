//! Arithmetic on axial angles, i.e. directions defined modulo π.
//!
//! Image coordinates are used throughout: +x to the right, +y down, and
//! angles grow from +x towards +y.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

/// Quarter turn, the angle of vertical ridges.
pub const VERTICAL: f32 = FRAC_PI_2;

/// Resultant length below which a set of directions has no mean.
const ISOTROPIC_RESULTANT: f32 = 1e-6;

/// Maps any finite angle into `[0, π)`.
#[inline]
pub fn normalize_half_turn(theta: f32) -> f32 {
    let wrapped = theta.rem_euclid(PI);
    // rem_euclid may round up to exactly π for tiny negative inputs.
    if wrapped >= PI { 0.0 } else { wrapped }
}

/// Smallest distance between two axial angles, in `[0, π/2]`.
#[inline]
pub fn axial_distance(a: f32, b: f32) -> f32 {
    let d = normalize_half_turn(a - b);
    d.min(PI - d)
}

/// Ridge angle from doubled-angle moments.
///
/// `gxx = Σ(gx² − gy²)` and `gxy = Σ 2·gx·gy` encode the dominant gradient
/// direction at twice its angle. Halving recovers the gradient direction and
/// the quarter turn rotates it onto the ridge, which runs across the
/// gradient.
#[inline]
pub fn ridge_angle(gxx: f64, gxy: f64) -> f32 {
    let gradient = 0.5 * gxy.atan2(gxx);
    let ridge = (gradient + std::f64::consts::FRAC_PI_2).rem_euclid(std::f64::consts::PI);
    normalize_half_turn(ridge as f32)
}

/// Unit vector along `theta`. The sign is arbitrary for an axial angle.
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::from_angle(theta)
}

/// Doubled-angle mean of axial angles. `None` for an empty or perfectly
/// isotropic input.
pub fn axial_mean(angles: impl IntoIterator<Item = f32>) -> Option<f32> {
    let resultant = doubled_resultant(angles)?;
    if resultant.length() <= ISOTROPIC_RESULTANT {
        return None;
    }
    Some(normalize_half_turn(0.5 * resultant.y.atan2(resultant.x)))
}

/// Circular variance of axial angles, `1 − |mean(e^{2iθ})|`, in `[0, 1]`.
pub fn axial_variance(angles: impl IntoIterator<Item = f32>) -> Option<f32> {
    let resultant = doubled_resultant(angles)?;
    Some((1.0 - resultant.length()).clamp(0.0, 1.0))
}

/// Mean of the doubled-angle unit vectors.
fn doubled_resultant(angles: impl IntoIterator<Item = f32>) -> Option<Vec2> {
    let mut sum_cos = 0.0f64;
    let mut sum_sin = 0.0f64;
    let mut count = 0usize;
    for theta in angles {
        let doubled = 2.0 * theta as f64;
        sum_cos += doubled.cos();
        sum_sin += doubled.sin();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Vec2::new((sum_cos / n) as f32, (sum_sin / n) as f32))
}
