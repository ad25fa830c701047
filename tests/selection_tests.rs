//! End-to-end tests for environmental selection across all diversity
//! mechanisms.

use moselect::prelude::*;

/// Three-objective test problem on the plane f1 + f2 + f3 = 0.5 + g,
/// with g measuring distance from the optimal manifold (DTLZ1 shape).
struct PlaneProblem;

impl Problem for PlaneProblem {
    fn dimension(&self) -> usize {
        4
    }

    fn n_objectives(&self) -> usize {
        3
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![0.0; 4], vec![1.0; 4])
    }

    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        let g: f64 = x[2..].iter().map(|&v| (v - 0.5).powi(2)).sum();
        let scale = 0.5 * (1.0 + g);
        vec![
            x[0] * x[1] * scale,
            x[0] * (1.0 - x[1]) * scale,
            (1.0 - x[0]) * scale,
        ]
    }
}

/// Evaluate `count` random decision vectors of the problem.
fn random_population(problem: &dyn Problem, count: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let (lb, ub) = problem.bounds();
    (0..count)
        .map(|_| {
            let x: Vec<f64> = lb
                .iter()
                .zip(&ub)
                .map(|(&lo, &hi)| lo + rng.f64() * (hi - lo))
                .collect();
            problem.evaluate(&x)
        })
        .collect()
}

#[test]
fn test_end_to_end_reference_point_generation_survival() {
    // 52-member swarm, 3 objectives, partition count 12: the classic
    // NSGA-III setup. Combined pool is 2N; exactly N survive.
    let n = 52;
    let combined = random_population(&PlaneProblem, 2 * n, 23);

    let sorted = non_dominated_sort(&combined);
    assert!(!sorted.fronts[0].is_empty());

    let mut refs = generate_reference_points(3, 12).unwrap();
    assert_eq!(refs.len(), 91);

    let norm = Normalization::compute(&combined, &sorted.fronts).unwrap();
    for &ext in &norm.extreme_points {
        for &v in &norm.normalized[ext] {
            assert!(
                (-1e-8..=1.0 + 1e-8).contains(&v),
                "extreme-point coordinate {v} outside [0, 1]"
            );
        }
    }

    let mut rng = fastrand::Rng::with_seed(7);
    let selected = niche_select(&combined, n, &mut refs, &mut rng).unwrap();
    assert_eq!(selected.len(), n);

    let mut unique = selected.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), n, "selection contains duplicates");
    assert!(unique.iter().all(|&i| i < combined.len()));
}

#[test]
fn test_selection_is_deterministic_per_seed() {
    let combined = random_population(&PlaneProblem, 60, 99);
    let engine = EnvironmentalSelection::new(SelectionConfig {
        mechanism: DiversityMechanism::ReferencePoint,
        partitions: 6,
        leader_selection_range: 10,
    })
    .unwrap();

    let run = |seed: u64| {
        let mut refs = generate_reference_points(3, 6).unwrap();
        let mut rng = fastrand::Rng::with_seed(seed);
        engine.select(&combined, 30, &mut refs, &mut rng).unwrap()
    };

    assert_eq!(run(5), run(5), "same seed must reproduce the selection");
}

#[test]
fn test_selected_fronts_dominate_rejected_ones() {
    let combined = random_population(&PlaneProblem, 40, 3);
    let sorted = non_dominated_sort(&combined);

    let mut refs = generate_reference_points(3, 5).unwrap();
    let mut rng = fastrand::Rng::with_seed(1);
    let selected = niche_select(&combined, 20, &mut refs, &mut rng).unwrap();

    // No rejected individual may out-rank a selected one from a
    // strictly earlier front than the worst selected rank.
    let worst_selected_rank = selected.iter().map(|&i| sorted.ranks[i]).max().unwrap();
    for i in 0..combined.len() {
        if !selected.contains(&i) {
            assert!(
                sorted.ranks[i] + 1 > worst_selected_rank,
                "rejected individual {i} in front {} but worst selected front is {worst_selected_rank}",
                sorted.ranks[i]
            );
        }
    }
}

#[test]
fn test_all_mechanisms_produce_n_survivors() {
    let combined = random_population(&PlaneProblem, 48, 17);

    for mechanism in [
        DiversityMechanism::CrowdingDistance,
        DiversityMechanism::NicheCount,
        DiversityMechanism::MaxMin,
        DiversityMechanism::ReferencePoint,
    ] {
        let engine = EnvironmentalSelection::new(SelectionConfig {
            mechanism,
            partitions: 6,
            leader_selection_range: 20,
        })
        .unwrap();

        let mut refs = generate_reference_points(3, 6).unwrap();
        let mut rng = fastrand::Rng::with_seed(2);
        let selected = engine.select(&combined, 24, &mut refs, &mut rng).unwrap();

        assert_eq!(selected.len(), 24, "{mechanism:?} selected wrong count");
        let mut unique = selected;
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 24, "{mechanism:?} selected duplicates");
    }
}

#[test]
fn test_preference_ranking_feeds_leader_pool() {
    let combined = random_population(&PlaneProblem, 30, 8);
    let engine = EnvironmentalSelection::new(SelectionConfig {
        mechanism: DiversityMechanism::MaxMin,
        partitions: 1,
        leader_selection_range: 25,
    })
    .unwrap();

    let ranking = engine.rank(&combined).unwrap();
    assert!(ranking.len() >= 2);

    let pool = engine.leader_pool_size(ranking.len());
    assert!(pool >= 2);
    assert!(pool <= ranking.len());

    // Sampling a leader stays within the ranking.
    let mut rng = fastrand::Rng::with_seed(4);
    let leader = ranking[rng.usize(0..pool)];
    assert!(leader < combined.len());
}

#[test]
fn test_reference_points_reusable_across_generations() {
    let engine = EnvironmentalSelection::new(SelectionConfig {
        mechanism: DiversityMechanism::ReferencePoint,
        partitions: 6,
        leader_selection_range: 10,
    })
    .unwrap();

    let mut refs = generate_reference_points(3, 6).unwrap();
    let mut rng = fastrand::Rng::with_seed(31);

    // Simulate successive generations sharing one reference-point set.
    for generation in 0..5 {
        let combined = random_population(&PlaneProblem, 40, 100 + generation);
        let selected = engine.select(&combined, 20, &mut refs, &mut rng).unwrap();
        assert_eq!(selected.len(), 20, "generation {generation}");
    }
}

#[test]
fn test_equal_fitness_population_selects_without_shortfall() {
    // Fully collapsed population: one front, zero spread everywhere.
    let combined = vec![vec![1.0, 2.0, 3.0]; 10];
    let mut refs = generate_reference_points(3, 4).unwrap();
    let mut rng = fastrand::Rng::with_seed(0);

    let selected = niche_select(&combined, 5, &mut refs, &mut rng).unwrap();
    assert_eq!(selected.len(), 5);
}
