//! Core types for the selection engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The diversity mechanism steering environmental selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiversityMechanism {
    /// Crowding distance within each front (NSGA-II style).
    CrowdingDistance,
    /// Fonseca–Fleming niche-count sharing on the Pareto front.
    NicheCount,
    /// Max-min Pareto strength over the whole population.
    MaxMin,
    /// Das–Dennis reference-point niching (NSGA-III style).
    ReferencePoint,
}
