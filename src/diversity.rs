//! Diversity metrics and preference rankings within and across fronts.
//!
//! Pareto rank alone cannot discriminate between members of the same
//! front, so evolutionary selection pairs it with a diversity estimate.
//! Three mechanisms are provided here:
//!
//! | Metric | Preference | Used by |
//! |--------|-----------|---------|
//! | [`crowding_distance`] | larger is better | crowded ranking / NSGA-II style truncation |
//! | [`niche_count`] | smaller is better | Fonseca–Fleming sharing |
//! | [`max_min_strength`] | smaller (more negative) is better | max-min Pareto strength |
//!
//! The corresponding whole-population orderings ([`crowded_ranking`],
//! [`niche_count_ranking`], [`max_min_ranking`]) produce the preference
//! ranking consumed by leader-sampling callers. The fourth mechanism,
//! reference-point niching, lives in [`niching`](crate::niching).

use crate::normalize::{ideal_point, nadir_point};
use crate::pareto::non_dominated_sort;

/// Crowding distance for the members of one front.
///
/// `front_indices` are indices into `fitness`. Returns one distance per
/// front member, in the same order. Boundary members (per-objective min
/// and max) receive [`f64::INFINITY`]; interior members accumulate
/// `(f[i+1] - f[i-1]) / (max - min)` per objective, with zero-spread
/// objectives contributing nothing. A front of one or two members is
/// all-infinite. Larger = more isolated = preferred for truncation.
#[must_use]
pub fn crowding_distance(front_indices: &[usize], fitness: &[Vec<f64>]) -> Vec<f64> {
    let n = front_indices.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = fitness[front_indices[0]].len();
    let mut distances = vec![0.0_f64; n];

    // Objective value of the front member at position `pos`.
    let val = |pos: usize, obj: usize| -> f64 { fitness[front_indices[pos]][obj] };

    for obj in 0..m {
        let mut sorted: Vec<usize> = (0..n).collect();
        sorted.sort_by(|&a, &b| {
            val(a, obj)
                .partial_cmp(&val(b, obj))
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        distances[sorted[0]] = f64::INFINITY;
        distances[sorted[n - 1]] = f64::INFINITY;

        let range = val(sorted[n - 1], obj) - val(sorted[0], obj);
        if range > 0.0 {
            for i in 1..(n - 1) {
                distances[sorted[i]] += (val(sorted[i + 1], obj) - val(sorted[i - 1], obj)) / range;
            }
        }
    }

    distances
}

/// Euclidean distance between two fitness vectors.
#[must_use]
pub(crate) fn euclidean_distance(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Fonseca–Fleming niche radius δ for a set of fitness vectors.
///
/// Closed form for 2 objectives: `(Δ1 + Δ2) / (|P| - 1)`. Closed form for
/// 3 objectives: the analytic quadratic expression over the three axis
/// spreads. For 4+ objectives the volume spanned by nadir − ideal is
/// divided equally: `(Π Δk)^(1/nobj) / |P|`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn sharing_radius(fitness: &[Vec<f64>]) -> f64 {
    let n = fitness.len();
    if n < 2 {
        return 1.0;
    }
    let nobj = fitness[0].len();
    let ideal = ideal_point(fitness);
    let nadir = nadir_point(fitness);
    let spread: Vec<f64> = nadir.iter().zip(&ideal).map(|(&hi, &lo)| hi - lo).collect();
    let size = n as f64;

    match nobj {
        2 => (spread[0] + spread[1]) / (size - 1.0),
        3 => {
            let (d1, d2, d3) = (spread[0], spread[1], spread[2]);
            (4.0 * d2 * d1 * size + 4.0 * d3 * d1 * size + 4.0 * d2 * d3 * size
                + d1.powi(2)
                + d2.powi(2)
                + d3.powi(2)
                - 2.0 * d2 * d1
                - 2.0 * d3 * d1
                - 2.0 * d2 * d3
                + d1
                + d2
                + d3)
                .sqrt()
                / (2.0 * (size - 1.0))
        }
        _ => {
            let volume: f64 = spread.iter().product();
            volume.powf(1.0 / nobj as f64) / size
        }
    }
}

/// Niche count under sharing radius `delta`.
///
/// `count[i]` = number of vectors (including `i` itself) within Euclidean
/// distance strictly less than `delta` of vector `i`. Lower = less
/// crowded = preferred.
#[must_use]
pub fn niche_count(fitness: &[Vec<f64>], delta: f64) -> Vec<usize> {
    let n = fitness.len();
    let mut count = vec![0_usize; n];
    for i in 0..n {
        for j in 0..n {
            if euclidean_distance(&fitness[i], &fitness[j]) < delta {
                count[i] += 1;
            }
        }
    }
    count
}

/// Worst-case pairwise margin of individual `i` against individual `j`:
/// the minimum over objectives of `f[i][k] - f[j][k]`.
fn min_fit(fitness: &[Vec<f64>], i: usize, j: usize) -> f64 {
    fitness[i]
        .iter()
        .zip(fitness[j].iter())
        .map(|(&a, &b)| a - b)
        .fold(f64::INFINITY, f64::min)
}

/// Max-min Pareto strength: `score[i] = max_{j≠i} min_k (f[i][k] - f[j][k])`.
///
/// A negative score means no other individual is at least as good in
/// every objective, i.e. `i` is non-dominated. Lower (more negative) is
/// preferred. A population of one individual gets score 0.
#[must_use]
pub fn max_min_strength(fitness: &[Vec<f64>]) -> Vec<f64> {
    let n = fitness.len();
    let mut scores = vec![0.0_f64; n];
    for i in 0..n {
        let mut best = f64::NEG_INFINITY;
        for j in 0..n {
            if i != j {
                best = best.max(min_fit(fitness, i, j));
            }
        }
        if best > f64::NEG_INFINITY {
            scores[i] = best;
        }
    }
    scores
}

// ---------------------------------------------------------------------------
// Preference rankings
// ---------------------------------------------------------------------------

/// Rank the whole population by non-domination rank, then by descending
/// crowding distance within each front. Returns all indices, best first.
#[must_use]
pub fn crowded_ranking(fitness: &[Vec<f64>]) -> Vec<usize> {
    let sorted = non_dominated_sort(fitness);
    let mut ranking = Vec::with_capacity(fitness.len());
    for front in &sorted.fronts {
        let distances = crowding_distance(front, fitness);
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| {
            distances[b]
                .partial_cmp(&distances[a])
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        ranking.extend(order.into_iter().map(|pos| front[pos]));
    }
    ranking
}

/// Rank the Pareto front by ascending niche count.
///
/// The sharing radius is derived from the front members' own spread. When
/// the front has a single member, the ranking is extended with members of
/// later fronts so at least two individuals are returned (a one-point
/// leader pool collapses the search to that point).
#[must_use]
pub fn niche_count_ranking(fitness: &[Vec<f64>]) -> Vec<usize> {
    let sorted = non_dominated_sort(fitness);
    if sorted.fronts.is_empty() {
        return Vec::new();
    }

    let front0 = &sorted.fronts[0];
    if front0.len() > 1 {
        let front_fitness: Vec<Vec<f64>> = front0.iter().map(|&i| fitness[i].clone()).collect();
        let delta = sharing_radius(&front_fitness);
        let counts = niche_count(&front_fitness, delta);
        let mut order: Vec<usize> = (0..front0.len()).collect();
        order.sort_by_key(|&pos| counts[pos]);
        order.into_iter().map(|pos| front0[pos]).collect()
    } else {
        sorted
            .fronts
            .iter()
            .flatten()
            .copied()
            .take(2.min(fitness.len()))
            .collect()
    }
}

/// Rank the whole population by ascending max-min strength and truncate
/// to the non-dominated prefix (scores < 0), keeping at least two
/// individuals when available.
#[must_use]
pub fn max_min_ranking(fitness: &[Vec<f64>]) -> Vec<usize> {
    let scores = max_min_strength(fitness);
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    let mut cut = 1;
    while cut < order.len() && scores[order[cut]] < 0.0 {
        cut += 1;
    }
    if cut < 2 {
        cut = 2.min(order.len());
    }
    order.truncate(cut);
    order
}
