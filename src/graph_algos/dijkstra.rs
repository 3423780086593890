use crate::errors::PathPlannerError;
use super::{shortest_path, GraphNodeMap, Route};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::{CheckedAdd, Zero};
use indexmap::map::Entry::{Occupied, Vacant};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Edge costs must be non-negative
/// Paths whose total cost would overflow C are treated as impassable
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<Route<N, C>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is settled
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    match goal_index {
        Some(goal_index) => shortest_path(&node_map, goal_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
/// Nodes missing from the map were never reached - their distance is infinite
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest, NodeId inverts the order
    // so the cheapest (then earliest discovered) node is popped first
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // Tentative costs + parents, keyed by node in discovery order
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    let start_index = nodes_map.insert_full(start, (usize::MAX, Zero::zero())).0;
    nodes_to_visit.push(NodeId {
        index: start_index,
        cost: Zero::zero(),
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId { cost, index }) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // Stale heap entry, a cheaper path to this node was already settled
        if cost > c {
            continue;
        }

        // Goal is settled - its cost can no longer improve
        if goal_fn(node) {
            return (nodes_map, Some(index));
        }

        tracing::trace!(node = ?node, cost = ?c, "settled");

        let node = node.clone();

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(&node) {

            // new cost to reach this node = edge cost + node cost
            let Some(new_cost) = c.checked_add(&edge_cost) else {
                tracing::trace!(from = ?node, to = ?neighbor, "cost overflow, edge skipped");
                continue;
            };

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        // The existing path is at least as good
                        continue;
                    }
                }
            };

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    // Heap exhausted: every remaining node is unreachable
    (nodes_map, None)
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - equal costs fall back to discovery order (lower index first)
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}
