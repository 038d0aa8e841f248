use std::ops::Deref;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// Ordered sample points over which a variable is discretized.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe(Vec<f64>);

/// Upper bound on the number of samples in a generated universe.
pub const MAX_SAMPLES: usize = 1 << 24;

impl Universe {
    /// `n` evenly spaced samples from `min` to `max`, both included.
    pub fn linspace(min: f64, max: f64, n: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(FuzzyError::universe(format!("bad bounds [{min}, {max}]")));
        }
        if n > MAX_SAMPLES {
            return Err(FuzzyError::universe(format!(
                "{n} samples exceed the limit of {MAX_SAMPLES}"
            )));
        }

        Self::from_points(Linspace::new(min, max, n).collect())
    }

    /// Samples `min, min + step, ...` up to `max`. `max` itself is included
    /// when it lands on the grid.
    pub fn arange(min: f64, max: f64, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0. {
            return Err(FuzzyError::universe(format!("step must be positive, got {step}")));
        }
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(FuzzyError::universe(format!("bad bounds [{min}, {max}]")));
        }

        let quotient = (max - min) / step;

        if !quotient.is_finite() || quotient >= MAX_SAMPLES as f64 {
            return Err(FuzzyError::universe(format!(
                "step {step} over [{min}, {max}] exceeds the limit of {MAX_SAMPLES} samples"
            )));
        }

        // a quotient within rounding error of an integer puts max on the grid
        let on_grid = (quotient - quotient.round()).abs() <= quotient * 1e-9;
        let steps = if on_grid { quotient.round() } else { quotient.floor() };
        let num = (steps as usize)
            .checked_add(1)
            .ok_or_else(|| FuzzyError::universe("too many samples"))?;
        let last = if on_grid { max } else { min + step * steps };

        Self::linspace(min, last, num)
    }

    /// Arbitrarily spaced samples. They must be finite and sorted.
    pub fn from_points(points: Vec<f64>) -> Result<Self> {
        if points.is_empty() {
            return Err(FuzzyError::universe("no sample points"));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(FuzzyError::universe("sample points must be finite"));
        }
        if points.windows(2).any(|w| w[1] < w[0]) {
            return Err(FuzzyError::universe("sample points must be sorted"));
        }

        Ok(Self(points))
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for Universe {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

#[test]
fn test_arange_matches_step_grid() {
    let error = Universe::arange(-1., 1., 0.05).unwrap();
    let temp = Universe::arange(-200., 200., 1.).unwrap();

    assert_eq!(error.len(), 41);
    assert_eq!(error.min(), -1.);
    assert_eq!(error.max(), 1.);
    assert_eq!(temp.len(), 401);
    assert_eq!(temp[200], 0.);
    assert_eq!(temp.max(), 200.);
}

#[test]
fn test_arange_stops_on_grid() {
    let u = Universe::arange(0., 1., 0.4).unwrap();

    assert_eq!(u.len(), 3);
    assert!((u.max() - 0.8).abs() < 1e-12);
}

#[test]
fn test_arange_includes_max_on_grid() {
    let u = Universe::arange(0., 0.3, 0.1).unwrap();

    assert_eq!(u.len(), 4);
    assert_eq!(u.max(), 0.3);
    assert!((u[1] - 0.1).abs() < 1e-12);

    let u = Universe::arange(0., 1., 0.1).unwrap();

    assert_eq!(u.len(), 11);
    assert_eq!(u.max(), 1.);
}

#[test]
fn test_oversized_universes() {
    for (min, max, step) in [(0., 1e20, 1.), (0., 1e300, 1e-300), (-f64::MAX, f64::MAX, 1.)] {
        assert!(matches!(
            Universe::arange(min, max, step),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
    }
    assert!(matches!(
        Universe::linspace(0., 1., MAX_SAMPLES + 1),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
}

#[test]
fn test_invalid_universes() {
    assert!(Universe::from_points(vec![]).is_err());
    assert!(Universe::from_points(vec![0., 2., 1.]).is_err());
    assert!(Universe::from_points(vec![0., f64::INFINITY]).is_err());
    assert!(Universe::linspace(1., 0., 5).is_err());
    assert!(Universe::linspace(0., 1., 0).is_err());
    assert!(Universe::arange(0., 1., 0.).is_err());
    assert!(Universe::arange(0., 1., -0.1).is_err());
}

#[test]
fn test_arbitrary_spacing() {
    let u = Universe::from_points(vec![-3., -1., -1., 0.5, 8.]).unwrap();

    assert_eq!(u.len(), 5);
    assert_eq!(u.min(), -3.);
    assert_eq!(u.max(), 8.);
    assert_eq!(u.as_slice()[3], 0.5);
}
