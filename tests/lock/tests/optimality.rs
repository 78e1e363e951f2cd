//! Optimality lock tests.
//!
//! Every random graph keeps edge weights at or above endpoint distance, so
//! the Euclidean heuristic is admissible. A* must then agree with both the
//! zero heuristic and an independent edge-relaxation baseline.

use lock_tests::graph_fixtures::{grid_graph, random_graph, relaxation_best_cost};
use meridian_kernel::model::NodeId;
use meridian_search::heuristic::{Euclidean, Zero};
use meridian_search::policy::{SearchPolicy, StartCostPolicy};
use meridian_search::search::search;

const SEEDS: u64 = 200;

fn assert_close(actual: Option<f64>, expected: Option<f64>, context: &str) {
    match (actual, expected) {
        (Some(a), Some(e)) => assert!((a - e).abs() < 1e-9, "{context}: {a} vs {e}"),
        (None, None) => {}
        _ => panic!("{context}: reachability differs ({actual:?} vs {expected:?})"),
    }
}

#[test]
fn euclidean_matches_relaxation_baseline() {
    let policy = SearchPolicy::default();
    let mut reached = 0;
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 8, 18);
        let (start, goal) = (NodeId::new("n0"), NodeId::new("n7"));
        let result = search(&graph, &start, &goal, &Euclidean, &policy).unwrap();
        let expected = relaxation_best_cost(&graph, &start, &goal, StartCostPolicy::Exclude);
        assert_close(result.total_cost(), expected, &format!("seed {seed}"));
        if expected.is_some() {
            reached += 1;
        }
    }
    assert!(reached > 0, "no seed produced a reachable goal");
}

#[test]
fn euclidean_matches_zero_heuristic() {
    let policy = SearchPolicy::default();
    for seed in 0..SEEDS {
        let graph = random_graph(seed ^ 0x5eed, 10, 25);
        let (start, goal) = (NodeId::new("n3"), NodeId::new("n9"));
        let informed = search(&graph, &start, &goal, &Euclidean, &policy).unwrap();
        let uninformed = search(&graph, &start, &goal, &Zero, &policy).unwrap();
        assert_close(
            informed.total_cost(),
            uninformed.total_cost(),
            &format!("seed {seed}"),
        );
    }
}

#[test]
fn include_policy_matches_baseline() {
    let policy = SearchPolicy {
        start_cost: StartCostPolicy::Include,
        ..SearchPolicy::default()
    };
    for seed in 0..50 {
        let graph = random_graph(seed, 8, 20);
        let (start, goal) = (NodeId::new("n1"), NodeId::new("n6"));
        let result = search(&graph, &start, &goal, &Euclidean, &policy).unwrap();
        let expected = relaxation_best_cost(&graph, &start, &goal, StartCostPolicy::Include);
        assert_close(result.total_cost(), expected, &format!("seed {seed}"));
    }
}

#[test]
fn reconstructed_path_cost_matches_total() {
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 9, 24);
        let (start, goal) = (NodeId::new("n0"), NodeId::new("n8"));
        let result = search(&graph, &start, &goal, &Euclidean, &SearchPolicy::default()).unwrap();
        let Some(total) = result.total_cost() else {
            continue;
        };
        let path = result.path(&graph).unwrap();
        assert_eq!(path.nodes.first(), Some(&start));
        assert_eq!(path.nodes.last(), Some(&goal));

        let mut walked = 0.0;
        for (from, to) in &path.transitions {
            let cheapest = graph
                .neighbors(from)
                .filter(|(next, _)| *next == to)
                .map(|(_, w)| w)
                .fold(f64::INFINITY, f64::min);
            walked += cheapest + graph.node(to).unwrap().traversal_cost;
        }
        assert!((walked - total).abs() < 1e-9, "seed {seed}: {walked} vs {total}");
    }
}

#[test]
fn grid_manhattan_distance_is_optimal() {
    let graph = grid_graph(7, 5);
    let result = search(
        &graph,
        &NodeId::new("6,0"),
        &NodeId::new("0,4"),
        &Euclidean,
        &SearchPolicy::default(),
    )
    .unwrap();
    assert!((result.total_cost().unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(result.path(&graph).unwrap().hop_count(), 10);
}
