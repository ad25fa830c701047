//! Das–Dennis reference points on the unit simplex.
//!
//! Reference-point niching steers selection toward a uniform spread over
//! the objective trade-off surface. The directions are generated once per
//! run from the objective count and a partition count, then reused every
//! generation; only their niche counts change (and are reset) per call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A point on the unit simplex with a per-generation niche count.
///
/// Coordinates are non-negative multiples of `1 / partitions` summing to
/// 1 (± 1e-8). The niche count is the number of individuals currently
/// associated with this point; it is transient state, reset at the start
/// of every selection call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferencePoint {
    coords: Vec<f64>,
    niche_count: usize,
}

impl ReferencePoint {
    fn new(coords: Vec<f64>) -> Self {
        Self {
            coords,
            niche_count: 0,
        }
    }

    /// The objective-space dimension of this point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The simplex coordinates.
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// The number of individuals currently associated with this point.
    #[must_use]
    pub fn niche_count(&self) -> usize {
        self.niche_count
    }

    pub(crate) fn reset_niche_count(&mut self) {
        self.niche_count = 0;
    }

    pub(crate) fn increment_niche_count(&mut self) {
        self.niche_count += 1;
    }
}

impl core::ops::Index<usize> for ReferencePoint {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.coords[i]
    }
}

/// Generate the full Das–Dennis simplex lattice.
///
/// Returns every point with `nobj` non-negative coordinates, each a
/// multiple of `1 / partitions`, summing to 1. Cardinality is exactly
/// `C(nobj + partitions - 1, partitions)`.
///
/// # Errors
///
/// - [`Error::InvalidDimension`] when `nobj < 2`.
/// - [`Error::InvalidPartitions`] when `partitions == 0`.
pub fn generate_reference_points(nobj: usize, partitions: usize) -> Result<Vec<ReferencePoint>> {
    if nobj < 2 {
        return Err(Error::InvalidDimension { nobj, min: 2 });
    }
    if partitions == 0 {
        return Err(Error::InvalidPartitions(partitions));
    }

    let mut points = Vec::with_capacity(n_combinations(nobj + partitions - 1, partitions));
    let mut coords = vec![0.0_f64; nobj];
    fill_recursive(nobj, partitions, 0, partitions, &mut coords, &mut points);
    Ok(points)
}

/// Assign each of the first `nobj - 1` coordinates any multiple of
/// `1 / partitions` within the remaining budget; the last coordinate
/// absorbs whatever budget is left, so every point sums to exactly 1.
#[allow(clippy::cast_precision_loss)]
fn fill_recursive(
    nobj: usize,
    partitions: usize,
    depth: usize,
    remaining: usize,
    coords: &mut Vec<f64>,
    points: &mut Vec<ReferencePoint>,
) {
    if depth == nobj - 1 {
        coords[depth] = remaining as f64 / partitions as f64;
        points.push(ReferencePoint::new(coords.clone()));
        return;
    }

    for i in 0..=remaining {
        coords[depth] = i as f64 / partitions as f64;
        fill_recursive(nobj, partitions, depth + 1, remaining - i, coords, points);
    }
}

/// Compute `C(n, k)` = n! / (k! · (n−k)!).
#[must_use]
pub fn n_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}

/// Smallest partition count whose lattice has at least `target` points.
#[must_use]
pub fn auto_partitions(nobj: usize, target: usize) -> usize {
    for p in 1..200 {
        if n_combinations(nobj + p - 1, p) >= target {
            return p;
        }
    }
    12
}
