//! Integration tests for reproducibility and mutation guarantees.

use grnevo_sim::prelude::*;
use proptest::prelude::*;

/// Generation-by-generation (fitness, levels) trajectory.
type Trajectory = Vec<(Vec<f64>, Vec<Vec<f64>>)>;

fn engine(seed: u64, rate: f64, magnitude: f64) -> GeneNetwork {
    let network = RegulatoryNetwork::new(
        &["g0", "g1", "g2", "g3"],
        [("g0", "g1", 0.8), ("g1", "g2", -0.4), ("g2", "g3", 0.3), ("g3", "g0", 0.1)],
    )
    .unwrap();

    GeneNetworkBuilder::new()
        .uniform_population(&["g0", "g1", "g2", "g3"], 1.0, 8)
        .expression_model(CompositeExpression::new(
            HillExpression::new(2.0, 0.5, 2.0).unwrap(),
            AdditiveRegulation::new(0.7).unwrap(),
        ))
        .selection_model(ProportionalSelection)
        .mutation_model(PointMutation::new(rate, magnitude).unwrap())
        .regulatory_network(network)
        .conditions(Conditions::default().with_tf_concentration(0.4))
        .seed(seed)
        .build()
        .unwrap()
}

fn trajectory(sim: &mut GeneNetwork, steps: usize) -> Trajectory {
    (0..steps)
        .map(|_| {
            sim.step().unwrap();
            let pop = sim.population();
            (
                pop.fitness_values(),
                pop.individuals()
                    .iter()
                    .map(Individual::expression_levels)
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn test_same_seed_identical_trajectories() {
    let a = trajectory(&mut engine(1234, 0.3, 0.5), 25);
    let b = trajectory(&mut engine(1234, 0.3, 0.5), 25);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_diverge() {
    let a = trajectory(&mut engine(1, 0.9, 0.5), 10);
    let b = trajectory(&mut engine(2, 0.9, 0.5), 10);
    assert_ne!(a, b);
}

#[test]
fn test_run_matches_repeated_step() {
    let mut stepped = engine(77, 0.5, 0.2);
    let mut ran = engine(77, 0.5, 0.2);

    trajectory(&mut stepped, 12);
    ran.run(12).unwrap();

    assert_eq!(ran.generation(), 12);
    assert_eq!(ran.population(), stepped.population());
}

#[test]
fn test_zero_rate_never_changes_genes() {
    // Constant expression fixes levels at 1.0 each generation; only mutation
    // could move them.
    let mut sim = GeneNetworkBuilder::new()
        .uniform_population(&["a", "b", "c"], 1.0, 10)
        .expression_model(ConstantExpression::new(1.0).unwrap())
        .selection_model(ProportionalSelection)
        .mutation_model(PointMutation::new(0.0, 5.0).unwrap())
        .seed(3)
        .build()
        .unwrap();

    for _ in 0..50 {
        sim.step().unwrap();
        for ind in sim.population().individuals() {
            assert_eq!(ind.expression_levels(), vec![1.0; 3]);
        }
    }
}

#[test]
fn test_full_rate_changes_within_five_generations() {
    let mut sim = GeneNetworkBuilder::new()
        .uniform_population(&["a", "b"], 1.0, 3)
        .expression_model(ConstantExpression::new(1.0).unwrap())
        .selection_model(ProportionalSelection)
        .mutation_model(PointMutation::new(1.0, 0.5).unwrap())
        .seed(99)
        .build()
        .unwrap();

    let mut changed = false;
    for _ in 0..5 {
        sim.step().unwrap();
        changed |= sim
            .population()
            .individuals()
            .iter()
            .any(|ind| ind.expression_levels() != vec![1.0, 1.0]);
    }
    assert!(changed);
}

proptest! {
    #[test]
    fn prop_levels_never_negative(seed in any::<u64>(), magnitude in 0.0f64..50.0) {
        let mut sim = engine(seed, 1.0, magnitude);
        for _ in 0..5 {
            sim.step().unwrap();
            for ind in sim.population().individuals() {
                prop_assert!(ind.expression_levels().iter().all(|&x| x >= 0.0));
            }
        }
    }

    #[test]
    fn prop_tf_inputs_are_linear(
        x in prop::collection::vec(-10.0f64..10.0, 3),
        y in prop::collection::vec(-10.0f64..10.0, 3),
        alpha in -5.0f64..5.0,
        beta in -5.0f64..5.0,
    ) {
        let network = RegulatoryNetwork::new(
            &["a", "b", "c"],
            [("a", "b", 1.5), ("b", "c", -0.5), ("c", "a", 2.0), ("a", "c", 0.25)],
        ).unwrap();

        let combined: Vec<f64> = x.iter().zip(&y).map(|(xi, yi)| alpha * xi + beta * yi).collect();
        let lhs = network.compute_tf_inputs(&combined).unwrap();
        let tx = network.compute_tf_inputs(&x).unwrap();
        let ty = network.compute_tf_inputs(&y).unwrap();

        for i in 0..3 {
            let rhs = alpha * tx[i] + beta * ty[i];
            prop_assert!((lhs[i] - rhs).abs() < 1e-9);
        }
    }
}
