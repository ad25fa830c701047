//! Pareto dominance and fast non-dominated sorting.
//!
//! In multi-objective optimization there is generally no single best
//! solution. Instead, solutions are partially ordered by **Pareto
//! dominance** and partitioned into successive **fronts**: front 0 is the
//! set of non-dominated solutions, front 1 is non-dominated once front 0
//! is removed, and so on. Every selection mechanism in this crate starts
//! from this partition.
//!
//! All objectives are minimized. Callers with maximized objectives should
//! negate them before building the fitness matrix.
//!
//! # Example
//!
//! ```
//! use moselect::pareto::{dominates, non_dominated_sort};
//!
//! let fitness = vec![
//!     vec![1.0, 5.0], // front 0
//!     vec![5.0, 1.0], // front 0
//!     vec![3.0, 3.0], // front 0
//!     vec![4.0, 4.0], // front 1, dominated by (3, 3)
//! ];
//!
//! assert!(dominates(&fitness[2], &fitness[3]));
//!
//! let sorted = non_dominated_sort(&fitness);
//! assert_eq!(sorted.fronts.len(), 2);
//! assert_eq!(sorted.ranks[3], 1);
//! ```

/// Result of [`non_dominated_sort`]: the front partition and the rank of
/// every individual.
///
/// Invariants: `fronts` is a partition of `0..n` into disjoint, non-empty
/// sets; `ranks[i]` is the index of the front containing `i`; every
/// individual in front `k > 0` is dominated by at least one individual in
/// front `k - 1`. Order *within* a front is unspecified.
#[derive(Clone, Debug)]
pub struct NonDominatedSort {
    /// Successive fronts; `fronts[0]` is the Pareto front. Each inner vec
    /// contains indices into the fitness matrix.
    pub fronts: Vec<Vec<usize>>,
    /// `ranks[i]` = front index of individual `i` (0 = best).
    pub ranks: Vec<usize>,
}

impl NonDominatedSort {
    /// Returns the rank of individual `i`.
    #[must_use]
    pub fn rank(&self, i: usize) -> usize {
        self.ranks[i]
    }
}

/// Returns `true` if solution `a` Pareto-dominates solution `b`.
///
/// `a` dominates `b` if it is no worse in every objective and strictly
/// better in at least one (all objectives minimized). Equal vectors
/// dominate neither way.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b.iter()) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Partitions the population into successive fronts and computes the rank
/// of every individual. Complexity: O(M × N²) where M = objectives,
/// N = individuals. Deterministic: identical inputs always produce the
/// same partition.
#[must_use]
pub fn non_dominated_sort(fitness: &[Vec<f64>]) -> NonDominatedSort {
    let n = fitness.len();
    if n == 0 {
        return NonDominatedSort {
            fronts: Vec::new(),
            ranks: Vec::new(),
        };
    }

    // S_p: solutions dominated by p.
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    // n_p: domination count for p.
    let mut domination_count: Vec<usize> = vec![0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&fitness[i], &fitness[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&fitness[j], &fitness[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut ranks = vec![0_usize; n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &p in &current_front {
            ranks[p] = fronts.len();
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        fronts.push(current_front);
        current_front = next_front;
    }

    NonDominatedSort { fronts, ranks }
}

/// Filter to the non-dominated (Pareto-optimal) indices only.
///
/// Equivalent to `non_dominated_sort(fitness).fronts[0]` but communicates
/// the intent more clearly when the full ranking is not needed.
#[must_use]
pub fn pareto_front_indices(fitness: &[Vec<f64>]) -> Vec<usize> {
    non_dominated_sort(fitness).fronts.into_iter().next().unwrap_or_default()
}
