//! Objective normalization for reference-point selection.
//!
//! Reference points live on the unit simplex, so raw objective values
//! must be mapped into comparable `[0, 1]`-ish coordinates before
//! association. The pipeline follows Deb & Jain (2014):
//!
//! 1. translate by the **ideal point** (per-objective minimum),
//! 2. find one **extreme point** per axis via an achievement scalarizing
//!    function,
//! 3. solve the hyperplane through the extreme points for the axis
//!    **intercepts** (Gaussian elimination with partial pivoting),
//! 4. divide each translated value by its axis intercept.
//!
//! A singular hyperplane system is absorbed, not propagated: the
//! intercepts fall back to the per-axis maximum of the translated
//! objectives and [`Normalization::degenerate`] is set.

use crate::error::{Error, Result};

/// Weight placed on off-axis objectives in the achievement scalarizing
/// function.
const ASF_WEIGHT_EPS: f64 = 1e-6;

/// Pivot magnitudes below this are treated as zero during elimination.
const PIVOT_EPS: f64 = 1e-10;

/// Intercepts are clamped to at least this before dividing.
const INTERCEPT_EPS: f64 = 1e-10;

/// Per-objective minimum over a population (component-wise best).
#[must_use]
pub fn ideal_point(fitness: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = fitness.first() else {
        return Vec::new();
    };
    let mut ideal = first.clone();
    for f in &fitness[1..] {
        for (best, &v) in ideal.iter_mut().zip(f.iter()) {
            if v < *best {
                *best = v;
            }
        }
    }
    ideal
}

/// Per-objective maximum over a population (component-wise worst).
#[must_use]
pub fn nadir_point(fitness: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = fitness.first() else {
        return Vec::new();
    };
    let mut nadir = first.clone();
    for f in &fitness[1..] {
        for (worst, &v) in nadir.iter_mut().zip(f.iter()) {
            if v > *worst {
                *worst = v;
            }
        }
    }
    nadir
}

/// Translate every fitness vector by the ideal point.
#[must_use]
pub fn translate_objectives(fitness: &[Vec<f64>], ideal: &[f64]) -> Vec<Vec<f64>> {
    fitness
        .iter()
        .map(|f| f.iter().zip(ideal.iter()).map(|(&v, &z)| v - z).collect())
        .collect()
}

/// Achievement scalarizing function along one axis: `max_j t[j] / w[j]`
/// where the weight is 1 on `axis` and [`ASF_WEIGHT_EPS`] elsewhere.
fn asf(translated: &[f64], axis: usize) -> f64 {
    translated
        .iter()
        .enumerate()
        .map(|(j, &t)| {
            let w = if j == axis { 1.0 } else { ASF_WEIGHT_EPS };
            t / w
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Find one extreme point per objective axis.
///
/// For axis `k`, the member of `working_set` minimizing the ASF with
/// weight concentrated on `k`; ties broken by lowest index. Returns
/// `nobj` indices into `translated` (the same index may serve several
/// axes on degenerate fronts).
#[must_use]
pub fn find_extreme_points(translated: &[Vec<f64>], working_set: &[usize]) -> Vec<usize> {
    let nobj = working_set
        .first()
        .map_or(0, |&i| translated[i].len());

    (0..nobj)
        .map(|axis| {
            let mut best_idx = working_set[0];
            let mut best_asf = f64::INFINITY;
            for &i in working_set {
                let a = asf(&translated[i], axis);
                if a < best_asf {
                    best_asf = a;
                    best_idx = i;
                }
            }
            best_idx
        })
        .collect()
}

/// Solve `A·x = b` by Gaussian elimination with partial pivoting.
///
/// # Errors
///
/// Returns [`Error::SingularSystem`] when the largest available pivot in
/// some column falls below `1e-10` (zero pivot with no admissible row
/// swap).
pub fn gaussian_elimination(mut a: Vec<Vec<f64>>, b: &[f64]) -> Result<Vec<f64>> {
    let n = b.len();
    debug_assert!(a.len() == n && a.iter().all(|row| row.len() == n));

    // Augment with the right-hand side.
    for (row, &rhs) in a.iter_mut().zip(b.iter()) {
        row.push(rhs);
    }

    for col in 0..n {
        // Partial pivoting: bring the largest remaining entry up.
        let pivot_row = (col..n)
            .max_by(|&r, &s| {
                a[r][col]
                    .abs()
                    .partial_cmp(&a[s][col].abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot_row][col].abs() < PIVOT_EPS {
            return Err(Error::SingularSystem);
        }
        a.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..=n {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    // Back substitution.
    let mut x = vec![0.0_f64; n];
    for col in (0..n).rev() {
        let tail: f64 = ((col + 1)..n).map(|k| a[col][k] * x[k]).sum();
        x[col] = (a[col][n] - tail) / a[col][col];
    }
    Ok(x)
}

/// The outcome of normalizing one combined population.
#[derive(Clone, Debug)]
pub struct Normalization {
    /// Per-objective minimum over the combined population.
    pub ideal: Vec<f64>,
    /// Axis intercepts of the extreme-point hyperplane (or the fallback).
    pub intercepts: Vec<f64>,
    /// Normalized objective vectors, one per individual, same order as
    /// the input fitness matrix.
    pub normalized: Vec<Vec<f64>>,
    /// Indices of the extreme points, one per objective axis.
    pub extreme_points: Vec<usize>,
    /// True when the hyperplane system was singular (or produced a
    /// non-positive intercept) and the per-axis maximum fallback was used.
    pub degenerate: bool,
}

impl Normalization {
    /// Normalize a combined population given its front partition.
    ///
    /// The working set for extreme-point extraction is front 0, extended
    /// with further fronts in rank order until it has at least `nobj`
    /// members. The ideal point and the degenerate fallback always use
    /// the full population.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] when `nobj < 2`.
    /// - [`Error::FitnessDimensionMismatch`] on ragged fitness vectors.
    /// - [`Error::InsufficientCandidates`] when the whole population has
    ///   fewer than `nobj` members.
    pub fn compute(fitness: &[Vec<f64>], fronts: &[Vec<usize>]) -> Result<Self> {
        let nobj = fitness.first().map_or(0, Vec::len);
        if nobj < 2 {
            return Err(Error::InvalidDimension { nobj, min: 2 });
        }
        for (index, f) in fitness.iter().enumerate() {
            if f.len() != nobj {
                return Err(Error::FitnessDimensionMismatch {
                    expected: nobj,
                    got: f.len(),
                    index,
                });
            }
        }
        if fitness.len() < nobj {
            return Err(Error::InsufficientCandidates {
                available: fitness.len(),
                required: nobj,
            });
        }

        let ideal = ideal_point(fitness);
        let translated = translate_objectives(fitness, &ideal);

        // Working set: front 0, extended until it can span a hyperplane.
        let mut working_set: Vec<usize> = Vec::new();
        for front in fronts {
            if working_set.len() >= nobj {
                break;
            }
            working_set.extend_from_slice(front);
        }

        let extreme_points = find_extreme_points(&translated, &working_set);

        let hyperplane: Vec<Vec<f64>> = extreme_points
            .iter()
            .map(|&i| translated[i].clone())
            .collect();
        let ones = vec![1.0_f64; nobj];

        let (mut intercepts, mut degenerate) = match gaussian_elimination(hyperplane, &ones) {
            Ok(solution) => {
                let intercepts: Vec<f64> = solution.iter().map(|&x| 1.0 / x).collect();
                (intercepts, false)
            }
            Err(Error::SingularSystem) => (nadir_point(&translated), true),
            Err(e) => return Err(e),
        };

        // A hyperplane crossing an axis at or below zero cannot scale
        // that objective; fall back the same way as a singular system.
        if !degenerate && intercepts.iter().any(|&a| !a.is_finite() || a <= INTERCEPT_EPS) {
            intercepts = nadir_point(&translated);
            degenerate = true;
        }

        let normalized = translated
            .iter()
            .map(|t| {
                t.iter()
                    .zip(intercepts.iter())
                    .map(|(&v, &a)| v / a.max(INTERCEPT_EPS))
                    .collect()
            })
            .collect();

        Ok(Self {
            ideal,
            intercepts,
            normalized,
            extreme_points,
            degenerate,
        })
    }
}
