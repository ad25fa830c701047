#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Multi-objective environmental selection for evolutionary algorithms:
//! given a combined pool of candidates scored on several competing
//! objectives, decide which survive into the next generation while
//! preserving both Pareto quality and diversity across the trade-off
//! surface. It ships fast non-dominated sorting, three classic diversity
//! metrics, Das–Dennis reference points, and NSGA-III-style niche
//! selection — all behind a stateless, caller-seeded API.
//!
//! # Getting Started
//!
//! Keep the best half of a combined parent + offspring pool:
//!
//! ```
//! use moselect::prelude::*;
//!
//! let engine = EnvironmentalSelection::new(SelectionConfig {
//!     mechanism: DiversityMechanism::ReferencePoint,
//!     partitions: 12,
//!     leader_selection_range: 10,
//! })
//! .unwrap();
//!
//! // 3 objectives on the linear trade-off surface x + y + z = 1.
//! let fitness: Vec<Vec<f64>> = (0..24)
//!     .map(|i| {
//!         let x = f64::from(i) / 23.0;
//!         vec![x / 2.0, (1.0 - x) / 2.0, 0.5]
//!     })
//!     .collect();
//!
//! let mut refs = generate_reference_points(3, 12).unwrap();
//! let mut rng = fastrand::Rng::with_seed(42);
//! let survivors = engine.select(&fitness, 12, &mut refs, &mut rng).unwrap();
//! assert_eq!(survivors.len(), 12);
//! ```
//!
//! # Core Concepts
//!
//! | Type / function | Role |
//! |-----------------|------|
//! | [`non_dominated_sort`](pareto::non_dominated_sort) | Partition candidates into ranked Pareto fronts. |
//! | [`crowding_distance`](diversity::crowding_distance), [`niche_count`](diversity::niche_count), [`max_min_strength`](diversity::max_min_strength) | Diversity estimates within and across fronts. |
//! | [`generate_reference_points`](reference::generate_reference_points) | Das–Dennis simplex lattice of reference directions. |
//! | [`Normalization`](normalize::Normalization) | Ideal-point translation, extreme points, hyperplane intercepts. |
//! | [`niche_select`](niching::niche_select) | Reference-point niching over the critical front. |
//! | [`EnvironmentalSelection`](engine::EnvironmentalSelection) | Validated facade over all four mechanisms. |
//! | [`Problem`](problem::Problem) | Seam for the user problem evaluated by outer metaheuristics. |
//!
//! # Determinism and concurrency
//!
//! Every function is a pure transformation of its inputs. The only
//! randomness (tie-breaking inside a non-empty niche) is drawn from an
//! explicit `&mut fastrand::Rng` supplied by the caller, so
//! `(population, reference points, seed)` reproduces a run exactly.
//! Distinct populations can be processed concurrently as long as they do
//! not share a reference-point set.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on configuration and reference points | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key selection points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod diversity;
pub mod engine;
mod error;
pub mod niching;
pub mod normalize;
pub mod pareto;
pub mod problem;
pub mod reference;
mod types;

pub use engine::{EnvironmentalSelection, SelectionConfig};
pub use error::{Error, Result};
pub use reference::ReferencePoint;
pub use types::DiversityMechanism;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use moselect::prelude::*;
/// ```
pub mod prelude {
    pub use crate::diversity::{crowding_distance, max_min_strength, niche_count};
    pub use crate::engine::{EnvironmentalSelection, SelectionConfig};
    pub use crate::error::{Error, Result};
    pub use crate::niching::niche_select;
    pub use crate::normalize::Normalization;
    pub use crate::pareto::{NonDominatedSort, dominates, non_dominated_sort};
    pub use crate::problem::Problem;
    pub use crate::reference::{ReferencePoint, generate_reference_points};
    pub use crate::types::DiversityMechanism;
}
