//! Graph fixtures and an independent cost baseline.
//!
//! Random graphs keep every edge weight at or above the straight-line
//! distance between its endpoints, so the Euclidean heuristic stays
//! admissible and A* must match [`relaxation_best_cost`] exactly.

use std::collections::BTreeMap;

use meridian_harness::request::{EdgeSpec, GraphRequest, NodeRef, NodeSpec};
use meridian_kernel::model::{Edge, Graph, GraphBuilder, GraphNode, NodeId};
use meridian_search::policy::{SearchPolicy, StartCostPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn node_spec(id: &str, x: f64, y: f64) -> NodeSpec {
    NodeSpec {
        id: NodeRef::from(id),
        x,
        y,
        label: None,
        traversal_cost: 0.0,
    }
}

fn edge_spec(from: &str, to: &str, weight: f64) -> EdgeSpec {
    EdgeSpec {
        from: NodeRef::from(from),
        to: NodeRef::from(to),
        weight: Some(weight),
    }
}

/// `A(0,0)`, `B(3,0)`, `C(3,4)` with directed edges `A→B` 3, `A→C` 5,
/// `B→C` 4.
#[must_use]
pub fn triangle_request(start: &str, goal: &str) -> GraphRequest {
    GraphRequest {
        nodes: vec![
            node_spec("A", 0.0, 0.0),
            node_spec("B", 3.0, 0.0),
            node_spec("C", 3.0, 4.0),
        ],
        edges: vec![
            edge_spec("A", "B", 3.0),
            edge_spec("A", "C", 5.0),
            edge_spec("B", "C", 4.0),
        ],
        directed: true,
        start: NodeRef::from(start),
        goal: NodeRef::from(goal),
        policy: SearchPolicy::default(),
    }
}

/// Two parallel `A→B` edges (weights 5 and 2) and a `B→C` edge.
#[must_use]
pub fn duplicate_edge_request() -> GraphRequest {
    GraphRequest {
        nodes: vec![
            node_spec("A", 0.0, 0.0),
            node_spec("B", 1.0, 0.0),
            node_spec("C", 2.0, 0.0),
        ],
        edges: vec![
            edge_spec("A", "B", 5.0),
            edge_spec("A", "B", 2.0),
            edge_spec("B", "C", 1.0),
        ],
        directed: true,
        start: NodeRef::from("A"),
        goal: NodeRef::from("C"),
        policy: SearchPolicy::default(),
    }
}

/// Undirected `width × height` lattice with unit edges. Node ids are `x,y`.
///
/// # Panics
///
/// Panics if the lattice fails validation, which it cannot for finite sizes.
#[must_use]
pub fn grid_graph(width: u32, height: u32) -> Graph {
    let id = |x: u32, y: u32| format!("{x},{y}");
    let mut builder = GraphBuilder::undirected();
    for y in 0..height {
        for x in 0..width {
            builder.add_node(GraphNode::new(id(x, y), f64::from(x), f64::from(y)));
        }
    }
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                builder.add_edge(Edge::new(id(x, y), id(x + 1, y), 1.0));
            }
            if y + 1 < height {
                builder.add_edge(Edge::new(id(x, y), id(x, y + 1), 1.0));
            }
        }
    }
    builder.build().expect("lattice is valid")
}

/// Random directed graph named `n0..n{node_count}` on a 20×20 integer plane.
///
/// Edge weights are the endpoint distance scaled by 1.0 to 1.9; traversal
/// costs are integers in `0..3`.
///
/// # Panics
///
/// Panics if `node_count` is zero.
#[must_use]
pub fn random_graph(seed: u64, node_count: u32, edge_count: u32) -> Graph {
    assert!(node_count > 0, "random graph needs at least one node");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::directed();
    let mut positions = Vec::new();
    for i in 0..node_count {
        let x = f64::from(rng.gen_range(0..20_u32));
        let y = f64::from(rng.gen_range(0..20_u32));
        let cost = f64::from(rng.gen_range(0..3_u32));
        positions.push((x, y));
        builder.add_node(GraphNode::new(format!("n{i}"), x, y).with_traversal_cost(cost));
    }
    for _ in 0..edge_count {
        let from = rng.gen_range(0..node_count);
        let to = rng.gen_range(0..node_count);
        let (fx, fy) = positions[from as usize];
        let (tx, ty) = positions[to as usize];
        let stretch = 1.0 + f64::from(rng.gen_range(0..10_u32)) / 10.0;
        let weight = (tx - fx).hypot(ty - fy) * stretch;
        builder.add_edge(Edge::new(
            format!("n{from}"),
            format!("n{to}"),
            weight,
        ));
    }
    builder.build().expect("random graph is valid")
}

/// Minimum path cost by repeated edge relaxation, independent of the
/// frontier. `None` when `goal` is unreachable.
#[must_use]
pub fn relaxation_best_cost(
    graph: &Graph,
    start: &NodeId,
    goal: &NodeId,
    start_cost: StartCostPolicy,
) -> Option<f64> {
    let start_node = graph.node(start)?;
    let mut best: BTreeMap<NodeId, f64> = BTreeMap::new();
    best.insert(start.clone(), start_cost.initial_cost(start_node));

    for _ in 0..graph.node_count() {
        let mut changed = false;
        for node in graph.nodes() {
            let Some(&base) = best.get(&node.id) else {
                continue;
            };
            for (next, weight) in graph.neighbors(&node.id) {
                let entry = graph.node(next).map_or(0.0, |n| n.traversal_cost);
                let candidate = base + weight + entry;
                let improves = match best.get(next) {
                    Some(&current) => candidate < current,
                    None => true,
                };
                if improves {
                    best.insert(next.clone(), candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    best.get(goal).copied()
}
