use std::ops::AddAssign;

use crate::angle::ridge_angle;

/// Marker stored in angle grids for undefined cells.
pub(crate) const UNDEFINED: f32 = f32::NAN;

/// Doubled-angle moments of the gradients in one window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    /// `Σ gx² − gy²`
    pub gxx: f64,
    /// `Σ 2·gx·gy`
    pub gxy: f64,
    /// `Σ gx² + gy²`
    pub energy: f64,
}

impl Moments {
    #[inline]
    pub fn of_gradient(gx: f32, gy: f32) -> Self {
        let gx = gx as f64;
        let gy = gy as f64;
        Self {
            gxx: gx * gx - gy * gy,
            gxy: 2.0 * gx * gy,
            energy: gx * gx + gy * gy,
        }
    }

    /// True when both doubled-angle components are within `epsilon` of zero.
    #[inline]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.gxx.abs() <= epsilon && self.gxy.abs() <= epsilon
    }

    /// Ridge angle in `[0, π)`, or `None` for a degenerate window.
    #[inline]
    pub fn orientation(&self, epsilon: f64) -> Option<f32> {
        if self.is_degenerate(epsilon) {
            None
        } else {
            Some(ridge_angle(self.gxx, self.gxy))
        }
    }

    /// `|(gxx, gxy)| / energy`, in `[0, 1]`. Zero for an empty window.
    #[inline]
    pub fn coherence(&self) -> f32 {
        if self.energy <= 0.0 {
            return 0.0;
        }
        let resultant = self.gxx.hypot(self.gxy);
        (resultant / self.energy).clamp(0.0, 1.0) as f32
    }

    /// `(angle, coherence)` as stored in the field grids.
    #[inline]
    pub(crate) fn resolve(&self, epsilon: f64) -> (f32, f32) {
        match self.orientation(epsilon) {
            Some(angle) => (angle, self.coherence()),
            None => (UNDEFINED, 0.0),
        }
    }
}

impl AddAssign for Moments {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.gxx += rhs.gxx;
        self.gxy += rhs.gxy;
        self.energy += rhs.energy;
    }
}
