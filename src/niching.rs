//! Reference-point association and niche-preserving environmental
//! selection.
//!
//! Given a combined parent + offspring population of size 2N, selection
//! keeps exactly N individuals: whole fronts are accepted in rank order
//! until the next front would meet or exceed N (the **critical front**),
//! then the remaining slots are filled one at a time from the critical
//! front, always serving the reference direction with the fewest
//! individuals so far. This is the NSGA-III environmental selection rule
//! (Deb & Jain, 2014).
//!
//! The engine is a pure function of `(fitness, reference points, RNG)`:
//! niche counts on the reference points are reset at the start of every
//! call, and the only randomness is the draw among a non-empty niche's
//! candidates, taken from the caller-seeded RNG.

use crate::error::{Error, Result};
use crate::normalize::Normalization;
use crate::pareto::non_dominated_sort;
use crate::reference::ReferencePoint;

/// Perpendicular distance from `point` to the line through the origin
/// and `reference`.
#[must_use]
pub fn perpendicular_distance(point: &[f64], reference: &[f64]) -> f64 {
    let dot: f64 = point.iter().zip(reference).map(|(&p, &r)| p * r).sum();
    let ref_norm_sq: f64 = reference.iter().map(|&r| r * r).sum();

    if ref_norm_sq < 1e-30 {
        return f64::INFINITY;
    }

    let proj_scalar = dot / ref_norm_sq;
    let dist_sq: f64 = point
        .iter()
        .zip(reference)
        .map(|(&p, &r)| (p - proj_scalar * r).powi(2))
        .sum();

    dist_sq.sqrt()
}

/// Associate each normalized objective vector with its nearest reference
/// point by perpendicular distance.
///
/// Returns `(reference index, distance)` per vector, in input order.
/// Panics (in debug) if the reference set is empty.
#[must_use]
pub fn associate(
    normalized: &[Vec<f64>],
    reference_points: &[ReferencePoint],
) -> Vec<(usize, f64)> {
    debug_assert!(!reference_points.is_empty());

    normalized
        .iter()
        .map(|point| {
            let mut best_ref = 0;
            let mut best_dist = f64::INFINITY;
            for (j, rp) in reference_points.iter().enumerate() {
                let d = perpendicular_distance(point, rp.coords());
                if d < best_dist {
                    best_dist = d;
                    best_ref = j;
                }
            }
            (best_ref, best_dist)
        })
        .collect()
}

/// Niche-preserving environmental selection of exactly `n` individuals.
///
/// `fitness` is the combined population (typically size 2N), all
/// objectives minimized. `reference_points` are owned by the caller and
/// reused across generations; their niche counts are reset here before
/// association. The returned indices are distinct: whole pre-critical
/// fronts first (rank order), then the niche-filled remainder.
///
/// # Errors
///
/// - [`Error::InvalidDimension`] when `nobj < 2`.
/// - [`Error::InsufficientCandidates`] when `n > fitness.len()`.
/// - [`Error::SelectionShortfall`] when the niche-filling loop runs out
///   of associated candidates before reaching `n` (diversity collapse);
///   the result is never padded.
/// - Any structural error from [`Normalization::compute`].
pub fn niche_select(
    fitness: &[Vec<f64>],
    n: usize,
    reference_points: &mut [ReferencePoint],
    rng: &mut fastrand::Rng,
) -> Result<Vec<usize>> {
    let nobj = fitness.first().map_or(0, Vec::len);
    if nobj < 2 {
        return Err(Error::InvalidDimension { nobj, min: 2 });
    }
    if n > fitness.len() {
        return Err(Error::InsufficientCandidates {
            available: fitness.len(),
            required: n,
        });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let sorted = non_dominated_sort(fitness);

    // 1. Accept whole fronts until the next one meets or exceeds n.
    let mut selected: Vec<usize> = Vec::with_capacity(n);
    let mut critical_front: &[usize] = &[];
    for front in &sorted.fronts {
        if selected.len() + front.len() >= n {
            critical_front = front;
            break;
        }
        selected.extend_from_slice(front);
    }

    let remaining = n - selected.len();
    trace_debug!(
        accepted = selected.len(),
        critical_front = critical_front.len(),
        remaining,
        "environmental selection front accumulation"
    );

    if reference_points.is_empty() {
        return Err(Error::SelectionShortfall {
            selected: selected.len(),
            required: n,
        });
    }

    // 2. Normalize and associate accepted + critical individuals.
    let norm = Normalization::compute(fitness, &sorted.fronts)?;
    if norm.degenerate {
        trace_info!("degenerate hyperplane: intercepts fell back to per-axis maximum");
    }
    let associations = associate(&norm.normalized, reference_points);

    for rp in &mut *reference_points {
        rp.reset_niche_count();
    }
    for &idx in &selected {
        reference_points[associations[idx].0].increment_niche_count();
    }

    // Candidate lists per reference point, drawn from the critical front.
    let mut candidates: Vec<Vec<(usize, f64)>> = vec![Vec::new(); reference_points.len()];
    for &idx in critical_front {
        let (ref_idx, dist) = associations[idx];
        candidates[ref_idx].push((idx, dist));
    }

    // 3. Fill the remaining slots from the least-crowded niches.
    let mut taken = vec![false; fitness.len()];
    for _ in 0..remaining {
        let chosen_ref = (0..reference_points.len())
            .filter(|&j| candidates[j].iter().any(|&(idx, _)| !taken[idx]))
            .min_by_key(|&j| (reference_points[j].niche_count(), j));

        let Some(chosen_ref) = chosen_ref else {
            return Err(Error::SelectionShortfall {
                selected: selected.len(),
                required: n,
            });
        };

        let available: Vec<(usize, f64)> = candidates[chosen_ref]
            .iter()
            .filter(|&&(idx, _)| !taken[idx])
            .copied()
            .collect();

        let chosen_idx = if reference_points[chosen_ref].niche_count() == 0 {
            // Empty niche: take the candidate closest to the reference line.
            available
                .iter()
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(core::cmp::Ordering::Equal))
                .map(|&(idx, _)| idx)
                .ok_or(Error::SelectionShortfall {
                    selected: selected.len(),
                    required: n,
                })?
        } else {
            available[rng.usize(0..available.len())].0
        };

        taken[chosen_idx] = true;
        selected.push(chosen_idx);
        reference_points[chosen_ref].increment_niche_count();
    }

    trace_debug!(selected = selected.len(), "environmental selection complete");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::generate_reference_points;

    #[test]
    fn test_perpendicular_distance_basic() {
        // Point (1, 0) to the 45-degree line: projection is (0.5, 0.5),
        // distance = sqrt(0.5).
        let d = perpendicular_distance(&[1.0, 0.0], &[1.0, 1.0]);
        assert!((d - 0.5_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_perpendicular_distance_on_line() {
        let d = perpendicular_distance(&[2.0, 2.0], &[1.0, 1.0]);
        assert!(d < 1e-10);
    }

    #[test]
    fn test_perpendicular_distance_zero_reference() {
        assert!(perpendicular_distance(&[1.0, 1.0], &[0.0, 0.0]).is_infinite());
    }

    #[test]
    fn test_associate_picks_nearest() {
        let refs = generate_reference_points(2, 1).unwrap(); // (0,1) and (1,0)
        let normalized = vec![vec![0.9, 0.1], vec![0.1, 0.9]];
        let assoc = associate(&normalized, &refs);
        // Whichever order the lattice generated, the two points must map
        // to different, axis-matching references.
        assert_ne!(assoc[0].0, assoc[1].0);
        assert!(refs[assoc[0].0].coords()[0] > 0.5);
        assert!(refs[assoc[1].0].coords()[1] > 0.5);
    }

    #[test]
    fn test_select_exact_count_no_duplicates() {
        let fitness: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                let x = f64::from(i) / 19.0;
                vec![x, 1.0 - x, (x - 0.5).abs()]
            })
            .collect();
        let mut refs = generate_reference_points(3, 4).unwrap();
        let mut rng = fastrand::Rng::with_seed(7);

        let selected = niche_select(&fitness, 10, &mut refs, &mut rng).unwrap();
        assert_eq!(selected.len(), 10);
        let mut unique = selected.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_select_keeps_better_fronts() {
        // Front 0: four non-dominated points. Front 1: four dominated.
        let fitness = vec![
            vec![0.0, 3.0],
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![3.0, 0.0],
            vec![5.0, 8.0],
            vec![6.0, 7.0],
            vec![7.0, 6.0],
            vec![8.0, 5.0],
        ];
        let mut refs = generate_reference_points(2, 6).unwrap();
        let mut rng = fastrand::Rng::with_seed(1);

        let selected = niche_select(&fitness, 4, &mut refs, &mut rng).unwrap();
        let mut got = selected.clone();
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_select_resets_niche_counts_between_calls() {
        let fitness = vec![
            vec![0.0, 2.0],
            vec![1.0, 1.0],
            vec![2.0, 0.0],
            vec![3.0, 3.0],
        ];
        let mut refs = generate_reference_points(2, 3).unwrap();

        let mut rng = fastrand::Rng::with_seed(3);
        let first = niche_select(&fitness, 2, &mut refs, &mut rng).unwrap();

        let mut rng = fastrand::Rng::with_seed(3);
        let second = niche_select(&fitness, 2, &mut refs, &mut rng).unwrap();
        assert_eq!(first, second, "reuse of reference points changed the result");
    }

    #[test]
    fn test_select_empty_reference_set_is_shortfall() {
        let fitness = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![2.0, 2.0]];
        let mut refs: Vec<ReferencePoint> = Vec::new();
        let mut rng = fastrand::Rng::with_seed(0);

        let err = niche_select(&fitness, 2, &mut refs, &mut rng).unwrap_err();
        assert!(matches!(err, Error::SelectionShortfall { required: 2, .. }));
    }

    #[test]
    fn test_select_more_than_population_rejected() {
        let fitness = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let mut refs = generate_reference_points(2, 2).unwrap();
        let mut rng = fastrand::Rng::with_seed(0);

        let err = niche_select(&fitness, 5, &mut refs, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientCandidates {
                available: 2,
                required: 5
            }
        ));
    }

    #[test]
    fn test_select_single_objective_rejected() {
        let fitness = vec![vec![1.0], vec![2.0]];
        let mut refs = generate_reference_points(2, 2).unwrap();
        let mut rng = fastrand::Rng::with_seed(0);

        let err = niche_select(&fitness, 1, &mut refs, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { nobj: 1, min: 2 }));
    }
}
