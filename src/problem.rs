//! The [`Problem`] trait defines what gets evaluated.
//!
//! The selection engine itself only consumes fitness matrices; the
//! problem seam exists so outer metaheuristics (differential evolution,
//! particle swarms, ant colonies) can be written against one interface
//! and drive this engine with whatever they evaluated. Implementations
//! are used boxed (`Box<dyn Problem>`) or shared (`Arc<dyn Problem>`)
//! by those callers.
//!
//! ```
//! use moselect::problem::Problem;
//!
//! /// Two-objective Schaffer problem on one decision variable.
//! struct Schaffer;
//!
//! impl Problem for Schaffer {
//!     fn dimension(&self) -> usize {
//!         1
//!     }
//!
//!     fn n_objectives(&self) -> usize {
//!         2
//!     }
//!
//!     fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
//!         (vec![-1000.0], vec![1000.0])
//!     }
//!
//!     fn evaluate(&self, x: &[f64]) -> Vec<f64> {
//!         vec![x[0].powi(2), (x[0] - 2.0).powi(2)]
//!     }
//! }
//!
//! let problem: Box<dyn Problem> = Box::new(Schaffer);
//! assert_eq!(problem.evaluate(&[2.0]), vec![4.0, 0.0]);
//! ```

/// A user-defined optimization problem.
///
/// All objectives are minimized; callers with maximized objectives
/// should negate them inside [`evaluate`](Problem::evaluate). The trait
/// is object-safe.
pub trait Problem {
    /// Number of decision variables.
    fn dimension(&self) -> usize;

    /// Number of objectives (at least 2 for the reference-point
    /// machinery in this crate).
    fn n_objectives(&self) -> usize;

    /// Lower and upper bounds of the decision space, each of length
    /// [`dimension`](Problem::dimension).
    fn bounds(&self) -> (Vec<f64>, Vec<f64>);

    /// Evaluate a decision vector into a fitness vector of length
    /// [`n_objectives`](Problem::n_objectives).
    fn evaluate(&self, x: &[f64]) -> Vec<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bi;

    impl Problem for Bi {
        fn dimension(&self) -> usize {
            2
        }

        fn n_objectives(&self) -> usize {
            2
        }

        fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
            (vec![0.0, 0.0], vec![1.0, 1.0])
        }

        fn evaluate(&self, x: &[f64]) -> Vec<f64> {
            vec![x[0], 1.0 - x[1]]
        }
    }

    #[test]
    fn test_object_safety_and_evaluate() {
        let problem: Box<dyn Problem> = Box::new(Bi);
        assert_eq!(problem.dimension(), 2);
        let f = problem.evaluate(&[0.25, 0.5]);
        assert_eq!(f, vec![0.25, 0.5]);
        let (lb, ub) = problem.bounds();
        assert_eq!(lb.len(), problem.dimension());
        assert_eq!(ub.len(), problem.dimension());
    }
}
