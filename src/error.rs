#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the number of objectives is too small for the
    /// requested machinery (reference-point selection needs at least 2).
    #[error("invalid objective dimension: got {nobj}, need at least {min}")]
    InvalidDimension {
        /// The number of objectives supplied.
        nobj: usize,
        /// The minimum number of objectives required.
        min: usize,
    },

    /// Returned when the simplex-lattice partition count is zero.
    #[error("invalid partition count: {0} must be at least 1")]
    InvalidPartitions(usize),

    /// Returned when the leader selection range percentile is outside (0, 100].
    #[error("invalid leader selection range: {0} must be in (0, 100]")]
    InvalidLeaderRange(u32),

    /// Returned when fewer individuals are available than a structural
    /// request needs (e.g. selecting more individuals than exist).
    #[error("insufficient candidates: {available} available, {required} required")]
    InsufficientCandidates {
        /// The number of individuals available.
        available: usize,
        /// The number of individuals required.
        required: usize,
    },

    /// Returned when a linear system has no usable pivot.
    ///
    /// Absorbed internally by the intercept fallback during normalization;
    /// only observable through
    /// [`gaussian_elimination`](crate::normalize::gaussian_elimination).
    #[error("singular linear system: no pivot above tolerance")]
    SingularSystem,

    /// Returned when niche-preserving selection runs out of associated
    /// candidates before filling every slot. Signals diversity collapse;
    /// the selection is never padded with arbitrary individuals.
    #[error("selection shortfall: selected {selected} of {required} individuals")]
    SelectionShortfall {
        /// The number of individuals selected before candidates ran out.
        selected: usize,
        /// The number of individuals that were required.
        required: usize,
    },

    /// Returned when fitness vectors in one population disagree in length.
    #[error(
        "fitness dimension mismatch: expected {expected} objectives but individual {index} has {got}"
    )]
    FitnessDimensionMismatch {
        /// The expected number of objectives.
        expected: usize,
        /// The actual number of objectives found.
        got: usize,
        /// The index of the offending individual.
        index: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
