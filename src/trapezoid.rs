use num::Float;

use crate::error::{FuzzyError, Result};

/// A trapezoidal membership function given by four ordered breakpoints.
///
/// Membership rises linearly from `p0` to `p1`, stays at one until `p2` and
/// falls back to zero at `p3`. A collapsed edge (`p0 == p1` or `p2 == p3`)
/// is a step: the shared point has full membership.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoid<F = f64>([F; 4]);

impl<F: Float> Trapezoid<F> {
    /// Fails with [`FuzzyError::InvalidShape`] unless the breakpoints are
    /// finite and non-decreasing.
    pub fn new(points: [F; 4]) -> Result<Self> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(FuzzyError::shape("breakpoints must be finite"));
        }

        for (i, pair) in points.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(FuzzyError::shape(format!(
                    "breakpoint {} is smaller than breakpoint {}",
                    i + 1,
                    i
                )));
            }
        }

        Ok(Self(points))
    }

    pub fn from_slice(points: &[F]) -> Result<Self> {
        let points: [F; 4] = points
            .try_into()
            .map_err(|_| FuzzyError::shape(format!("expected 4 breakpoints, got {}", points.len())))?;

        Self::new(points)
    }

    /// The degenerate trapezoid `[left, peak, peak, right]`.
    pub fn triangular(left: F, peak: F, right: F) -> Result<Self> {
        Self::new([left, peak, peak, right])
    }

    pub fn points(&self) -> [F; 4] {
        self.0
    }

    /// Degree of membership of `x`. NaN is outside every support.
    pub fn membership(&self, x: F) -> F {
        let [p0, p1, p2, p3] = self.0;

        if !(p0..=p3).contains(&x) {
            F::zero()
        } else if x < p1 {
            let d = p1 - p0;
            if d == F::zero() {
                F::one()
            } else {
                (x - p0) / d
            }
        } else if x > p2 {
            let d = p2 - p3;
            if d == F::zero() {
                F::one()
            } else {
                (x - p3) / d
            }
        } else {
            F::one()
        }
    }

    pub fn membership_set(&self, universe: &[F]) -> Vec<F> {
        universe.iter().map(|x| self.membership(*x)).collect()
    }
}

/// Samples `trapezoid` over every point of `universe`, preserving order.
pub fn membership_set<F: Float>(universe: &[F], trapezoid: &Trapezoid<F>) -> Vec<F> {
    trapezoid.membership_set(universe)
}
