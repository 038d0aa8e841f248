//! Zadeh set operators over membership sets sampled on a common universe.

use std::iter::Sum;

use num::Float;

use crate::error::{FuzzyError, Result};

fn zip_with<F: Float>(a: &[F], b: &[F], op: impl Fn(F, F) -> F) -> Result<Vec<F>> {
    if a.len() != b.len() {
        return Err(FuzzyError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.iter().zip(b).map(|(u, v)| op(*u, *v)).collect())
}

/// Elementwise minimum (T-norm).
pub fn intersection<F: Float>(a: &[F], b: &[F]) -> Result<Vec<F>> {
    zip_with(a, b, F::min)
}

/// Elementwise maximum (T-conorm).
pub fn union<F: Float>(a: &[F], b: &[F]) -> Result<Vec<F>> {
    zip_with(a, b, F::max)
}

/// Elementwise standard negation, `1 - x`.
pub fn complement<F: Float>(a: &[F]) -> Vec<F> {
    a.iter().map(|x| F::one() - *x).collect()
}

/// In-place elementwise maximum, used to aggregate rule outputs.
pub(crate) fn union_assign<F: Float>(acc: &mut [F], other: &[F]) -> Result<()> {
    if acc.len() != other.len() {
        return Err(FuzzyError::LengthMismatch {
            left: acc.len(),
            right: other.len(),
        });
    }

    for (a, o) in acc.iter_mut().zip(other) {
        *a = F::max(*a, *o);
    }

    Ok(())
}

/// Discrete center of gravity, `sum(x * mu) / sum(mu)`.
///
/// Returns `None` when the set is empty everywhere, since the centroid is
/// undefined there. Both slices must be sampled on the same universe.
pub fn centroid<F: Float + Sum>(universe: &[F], membership: &[F]) -> Option<F> {
    let den = membership.iter().copied().sum::<F>();

    if den == F::zero() {
        return None;
    }

    let num = universe
        .iter()
        .zip(membership)
        .map(|(x, mu)| *x * *mu)
        .sum::<F>();

    Some(num / den)
}
