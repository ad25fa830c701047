//! Environmental selection facade.
//!
//! [`EnvironmentalSelection`] bundles a validated [`SelectionConfig`]
//! with the two operations the outer evolutionary loop needs each
//! generation:
//!
//! - [`select`](EnvironmentalSelection::select) — pick exactly N
//!   survivors from a combined parent + offspring pool, and
//! - [`rank`](EnvironmentalSelection::rank) — an ordered preference
//!   ranking for algorithms that sample leaders among the best
//!   candidates (e.g. multi-objective particle swarms).
//!
//! The facade holds no per-generation state: fronts, normalization and
//! niche counts are recomputed from scratch on every call, and all
//! randomness flows through the caller-supplied RNG. This makes a single
//! instance safe to use across disjoint populations, as long as no two
//! concurrent calls share one population or reference-point set.
//!
//! # Example
//!
//! ```
//! use moselect::prelude::*;
//!
//! let engine = EnvironmentalSelection::new(SelectionConfig {
//!     mechanism: DiversityMechanism::ReferencePoint,
//!     partitions: 4,
//!     leader_selection_range: 10,
//! })
//! .unwrap();
//!
//! // Combined pool of 8, keep 4.
//! let fitness: Vec<Vec<f64>> = (0..8)
//!     .map(|i| {
//!         let x = f64::from(i) / 7.0;
//!         vec![x, 1.0 - x]
//!     })
//!     .collect();
//! let mut refs = generate_reference_points(2, 4).unwrap();
//! let mut rng = fastrand::Rng::with_seed(42);
//!
//! let survivors = engine.select(&fitness, 4, &mut refs, &mut rng).unwrap();
//! assert_eq!(survivors.len(), 4);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diversity::{
    crowded_ranking, crowding_distance, max_min_ranking, max_min_strength, niche_count,
    niche_count_ranking, sharing_radius,
};
use crate::error::{Error, Result};
use crate::niching::niche_select;
use crate::pareto::non_dominated_sort;
use crate::reference::ReferencePoint;
use crate::types::DiversityMechanism;

/// Configuration for one selection engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionConfig {
    /// Which diversity mechanism drives selection and ranking.
    pub mechanism: DiversityMechanism,
    /// Das–Dennis partition count (reference-point mechanism only).
    pub partitions: usize,
    /// Percentile of the preference ranking that leader-sampling callers
    /// draw from, in (0, 100]. Consumed outside this core; validated
    /// here because it travels with the rest of the configuration.
    pub leader_selection_range: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mechanism: DiversityMechanism::CrowdingDistance,
            partitions: 12,
            leader_selection_range: 10,
        }
    }
}

/// A validated, stateless environmental selection engine.
#[derive(Clone, Debug)]
pub struct EnvironmentalSelection {
    config: SelectionConfig,
}

impl EnvironmentalSelection {
    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLeaderRange`] when `leader_selection_range` is
    ///   0 or above 100.
    /// - [`Error::InvalidPartitions`] when the reference-point mechanism
    ///   is configured with zero partitions.
    pub fn new(config: SelectionConfig) -> Result<Self> {
        if config.leader_selection_range == 0 || config.leader_selection_range > 100 {
            return Err(Error::InvalidLeaderRange(config.leader_selection_range));
        }
        if config.mechanism == DiversityMechanism::ReferencePoint && config.partitions == 0 {
            return Err(Error::InvalidPartitions(config.partitions));
        }
        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Select exactly `n` survivors from a combined population.
    ///
    /// For the reference-point mechanism this is NSGA-III environmental
    /// selection ([`niche_select`]); `reference_points` must match the
    /// objective count and is mutated (niche counts) but never resized.
    /// The other mechanisms truncate deterministically: rank order with
    /// the critical front resolved by descending crowding distance or
    /// ascending niche count, or the best `n` max-min scores. `rng` is
    /// only drawn from by the reference-point mechanism.
    ///
    /// # Errors
    ///
    /// See [`niche_select`]; additionally [`Error::InvalidDimension`]
    /// when the fitness matrix has no objectives and
    /// [`Error::InsufficientCandidates`] when `n > fitness.len()`.
    pub fn select(
        &self,
        fitness: &[Vec<f64>],
        n: usize,
        reference_points: &mut [ReferencePoint],
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<usize>> {
        let nobj = fitness.first().map_or(0, Vec::len);
        if nobj == 0 {
            return Err(Error::InvalidDimension { nobj, min: 1 });
        }
        if n > fitness.len() {
            return Err(Error::InsufficientCandidates {
                available: fitness.len(),
                required: n,
            });
        }

        match self.config.mechanism {
            DiversityMechanism::ReferencePoint => {
                niche_select(fitness, n, reference_points, rng)
            }
            DiversityMechanism::CrowdingDistance => Ok(truncate_by_fronts(
                fitness,
                n,
                |front, fitness| {
                    let distances = crowding_distance(front, fitness);
                    // Larger crowding distance first.
                    order_by(front.len(), |a, b| {
                        distances[b]
                            .partial_cmp(&distances[a])
                            .unwrap_or(core::cmp::Ordering::Equal)
                    })
                },
            )),
            DiversityMechanism::NicheCount => Ok(truncate_by_fronts(
                fitness,
                n,
                |front, fitness| {
                    let members: Vec<Vec<f64>> =
                        front.iter().map(|&i| fitness[i].clone()).collect();
                    let counts = niche_count(&members, sharing_radius(&members));
                    // Less crowded niches first.
                    order_by(front.len(), |a, b| counts[a].cmp(&counts[b]))
                },
            )),
            DiversityMechanism::MaxMin => {
                let scores = max_min_strength(fitness);
                let mut order: Vec<usize> = (0..fitness.len()).collect();
                order.sort_by(|&a, &b| {
                    scores[a]
                        .partial_cmp(&scores[b])
                        .unwrap_or(core::cmp::Ordering::Equal)
                });
                order.truncate(n);
                Ok(order)
            }
        }
    }

    /// Ordered preference ranking, best candidates first.
    ///
    /// Crowding distance ranks the whole population (rank, then spread);
    /// niche count ranks the Pareto front (least crowded first, at least
    /// two members); max-min keeps the negative-score prefix. The
    /// reference-point mechanism has no total preference order and falls
    /// back to the crowded ranking.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimension`] when the fitness matrix has no
    /// objectives.
    pub fn rank(&self, fitness: &[Vec<f64>]) -> Result<Vec<usize>> {
        let nobj = fitness.first().map_or(0, Vec::len);
        if nobj == 0 && !fitness.is_empty() {
            return Err(Error::InvalidDimension { nobj, min: 1 });
        }

        Ok(match self.config.mechanism {
            DiversityMechanism::CrowdingDistance | DiversityMechanism::ReferencePoint => {
                crowded_ranking(fitness)
            }
            DiversityMechanism::NicheCount => niche_count_ranking(fitness),
            DiversityMechanism::MaxMin => max_min_ranking(fitness),
        })
    }

    /// Size of the leader pool for a preference ranking of `len`
    /// candidates: the top `leader_selection_range` percent, rounded up,
    /// never fewer than two and never more than `len`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn leader_pool_size(&self, len: usize) -> usize {
        let range = self.config.leader_selection_range as usize;
        (len * range).div_ceil(100).max(2).min(len)
    }
}

/// Sort positions `0..len` of a front by `cmp`.
fn order_by(
    len: usize,
    cmp: impl Fn(usize, usize) -> core::cmp::Ordering,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by(|&a, &b| cmp(a, b));
    order
}

/// Accept whole fronts in rank order; resolve the critical front with
/// the mechanism-specific within-front ordering.
fn truncate_by_fronts(
    fitness: &[Vec<f64>],
    n: usize,
    front_order: impl Fn(&[usize], &[Vec<f64>]) -> Vec<usize>,
) -> Vec<usize> {
    let sorted = non_dominated_sort(fitness);
    let mut selected = Vec::with_capacity(n);
    for front in &sorted.fronts {
        if selected.len() + front.len() <= n {
            selected.extend_from_slice(front);
        } else {
            let order = front_order(front, fitness);
            for pos in order {
                if selected.len() == n {
                    break;
                }
                selected.push(front[pos]);
            }
        }
        if selected.len() == n {
            break;
        }
    }
    selected
}
