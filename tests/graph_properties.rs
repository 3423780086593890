use citymap::{Graph, GraphError, Point, Solution};
use proptest::prelude::*;

const MAX_NODES: usize = 8;

fn node_id(i: usize) -> String {
    format!("n{i}")
}

/// Random small graph: node count plus (a, b, weight) edge attempts
/// Self loops and duplicate pairs are simply rejected by the graph
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1..=MAX_NODES)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n, 0i64..50), 0..(n * 3)),
            )
        })
        .prop_map(|(n, edges)| {
            let mut graph = Graph::new();
            for i in 0..n {
                graph.add_node(node_id(i), Point::new(i as f64, 0.0)).unwrap();
            }
            for (a, b, w) in edges {
                let _ = graph.add_edge(&node_id(a), &node_id(b), w);
            }
            graph
        })
}

/// All pairs shortest distances by Floyd-Warshall, used as the reference answer
fn reference_distances(graph: &Graph) -> Vec<Vec<Option<i64>>> {
    let ids: Vec<&str> = graph.node_ids().collect();
    let n = ids.len();
    let mut dist = vec![vec![None; n]; n];
    for i in 0..n {
        dist[i][i] = Some(0);
        for j in 0..n {
            if let Some(w) = graph.edge_weight(ids[i], ids[j]) {
                dist[i][j] = Some(w);
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j]) {
                    if dist[i][j].is_none_or(|ij| ik + kj < ij) {
                        dist[i][j] = Some(ik + kj);
                    }
                }
            }
        }
    }
    dist
}

fn assert_valid_path(graph: &Graph, solution: &Solution, start: &str, end: &str) {
    if !solution.is_found() {
        assert_eq!(solution.cost, None);
        return;
    }
    assert_eq!(solution.path.first().map(String::as_str), Some(start));
    assert_eq!(solution.path.last().map(String::as_str), Some(end));
    assert_eq!(graph.path_cost(&solution.path), solution.cost);
}

#[derive(Clone, Debug)]
enum Op {
    AddNode { idx: u8, x: i16, y: i16 },
    RemoveNode { idx: u8 },
    Connect { a: u8, b: u8 },
    RemoveEdge { a: u8, b: u8 },
    MoveNode { idx: u8, x: i16, y: i16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0u8..MAX_NODES as u8;
    prop_oneof![
        (idx.clone(), any::<i16>(), any::<i16>()).prop_map(|(idx, x, y)| Op::AddNode { idx, x, y }),
        idx.clone().prop_map(|idx| Op::RemoveNode { idx }),
        (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Connect { a, b }),
        (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::RemoveEdge { a, b }),
        (idx, any::<i16>(), any::<i16>()).prop_map(|(idx, x, y)| Op::MoveNode { idx, x, y }),
    ]
}

fn apply_op(graph: &mut Graph, removed: &mut Vec<String>, op: Op) {
    match op {
        Op::AddNode { idx, x, y } => {
            let id = node_id(idx as usize);
            if graph.add_node(id.clone(), Point::new(x as f64, y as f64)).is_ok() {
                removed.retain(|r| *r != id);
            }
        }
        Op::RemoveNode { idx } => {
            let id = node_id(idx as usize);
            if graph.remove_node(&id).is_ok() {
                removed.push(id);
            }
        }
        Op::Connect { a, b } => {
            let _ = graph.connect(&node_id(a as usize), &node_id(b as usize));
        }
        Op::RemoveEdge { a, b } => {
            graph.remove_edge(&node_id(a as usize), &node_id(b as usize));
        }
        Op::MoveNode { idx, x, y } => {
            let _ = graph.update_node_position(&node_id(idx as usize), Point::new(x as f64, y as f64));
        }
    }
}

fn assert_invariants(graph: &Graph, removed: &[String]) {
    for (key, w) in graph.edges() {
        let (a, b) = key.endpoints();
        assert_ne!(a, b, "self loop on {a}");
        assert!(w >= 0, "negative weight on {a}-{b}");

        // weight tracks the current positions
        let (pa, pb) = (graph.position(a).unwrap(), graph.position(b).unwrap());
        assert_eq!(w, pa.rounded_distance(&pb), "stale weight on {a}-{b}");
    }

    let mut degree_sum = 0;
    for id in graph.node_ids() {
        let neighbors = graph.neighbors(id).unwrap();
        degree_sum += neighbors.len();
        for (n, w) in neighbors {
            assert!(!removed.iter().any(|r| r == n), "{id} still lists removed node {n}");
            assert_eq!(graph.edge_weight(n, id), Some(w));
        }
    }
    assert_eq!(degree_sum, graph.edge_count() * 2);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, .. ProptestConfig::default() })]

    #[test]
    fn exact_matches_reference(graph in graph_strategy()) {
        let ids: Vec<String> = graph.node_ids().map(str::to_string).collect();
        let dist = reference_distances(&graph);

        for (i, start) in ids.iter().enumerate() {
            for (j, end) in ids.iter().enumerate() {
                let solution = graph.solve_exact(start, end).unwrap();
                prop_assert_eq!(solution.cost, dist[i][j]);
                assert_valid_path(&graph, &solution, start, end);
            }
        }
    }

    #[test]
    fn exact_never_costs_more_than_greedy(graph in graph_strategy()) {
        let ids: Vec<String> = graph.node_ids().map(str::to_string).collect();

        for start in &ids {
            for end in &ids {
                let exact = graph.solve_exact(start, end).unwrap();
                let greedy = graph.solve_greedy(start, end).unwrap();
                assert_valid_path(&graph, &greedy, start, end);

                if let Some(greedy_cost) = greedy.cost {
                    let exact_cost = exact.cost.unwrap();
                    prop_assert!(exact_cost <= greedy_cost);
                }

                // greedy never visits a node twice
                let mut seen = greedy.path.clone();
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), greedy.path.len());
            }
        }
    }

    #[test]
    fn solving_is_idempotent(graph in graph_strategy(), a in 0..MAX_NODES, b in 0..MAX_NODES) {
        let n = graph.node_count();
        let (start, end) = (node_id(a % n), node_id(b % n));

        prop_assert_eq!(graph.solve_exact(&start, &end).unwrap(), graph.solve_exact(&start, &end).unwrap());
        prop_assert_eq!(graph.solve_greedy(&start, &end).unwrap(), graph.solve_greedy(&start, &end).unwrap());
    }

    #[test]
    fn start_equals_end(graph in graph_strategy(), a in 0..MAX_NODES) {
        let id = node_id(a % graph.node_count());
        let expected = Solution { path: vec![id.clone()], cost: Some(0) };

        prop_assert_eq!(graph.solve_exact(&id, &id).unwrap(), expected.clone());
        prop_assert_eq!(graph.solve_greedy(&id, &id).unwrap(), expected);
    }

    #[test]
    fn duplicate_edges_rejected(graph in graph_strategy()) {
        let mut graph = graph;
        let pairs: Vec<(String, String)> = graph
            .edges()
            .map(|(k, _)| {
                let (a, b) = k.endpoints();
                (a.to_string(), b.to_string())
            })
            .collect();

        for (a, b) in pairs {
            prop_assert_eq!(graph.add_edge(&b, &a, 1), Err(GraphError::DuplicateEdge(b.clone(), a.clone())));
            prop_assert_eq!(graph.add_edge(&a, &b, 1), Err(GraphError::DuplicateEdge(a.clone(), b.clone())));
        }
    }

    #[test]
    fn edit_sequences_keep_graph_consistent(ops in prop::collection::vec(op_strategy(), 5..40)) {
        let mut graph = Graph::new();
        let mut removed = Vec::new();
        for op in ops {
            apply_op(&mut graph, &mut removed, op);
        }
        assert_invariants(&graph, &removed);
    }
}
