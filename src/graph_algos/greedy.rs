use crate::errors::PathPlannerError;
use crate::collections::FxIndexSet;
use super::Route;

use std::{hash::Hash, fmt::Debug};
use num_traits::{CheckedAdd, Zero};


/// Greedy nearest neighbor walk
/// From start Node, repeatedly step along the cheapest edge to a node not yet visited
/// until a node meets the goal criteria
///
/// The walk never backtracks and never looks ahead, so it can miss a path that exists
/// or return a more expensive path than Dijkstra would. Ties on edge cost go to the
/// neighbor yielded first.
/// Every step visits a new node, so the walk ends after at most one step per node.
/// A step whose running cost would overflow C ends the walk without a path.
pub fn greedy<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<Route<N, C>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // visited nodes in visiting order - since the walk never backtracks this is also the path
    let mut visited: FxIndexSet<N> = FxIndexSet::default();
    visited.insert(start.clone());

    let mut current = start;
    let mut cost: C = Zero::zero();

    while !goal(&current) {

        // cheapest edge to an unvisited neighbor, first seen wins ties
        let mut next: Option<(N, C)> = None;
        for (neighbor, edge_cost) in neighbors(&current) {
            if visited.contains(&neighbor) {
                continue;
            }
            let cheaper = match &next {
                Some((_, best)) => edge_cost < *best,
                None => true,
            };
            if cheaper {
                next = Some((neighbor, edge_cost));
            }
        }

        // Dead end - every neighbor was already visited
        let Some((neighbor, edge_cost)) = next else {
            tracing::trace!(node = ?current, "greedy walk stuck");
            return Err(PathPlannerError::NoPathFound);
        };

        tracing::trace!(from = ?current, to = ?neighbor, cost = ?edge_cost, "greedy step");

        let Some(total) = cost.checked_add(&edge_cost) else {
            tracing::trace!(node = ?current, "greedy cost overflow");
            return Err(PathPlannerError::NoPathFound);
        };
        cost = total;
        visited.insert(neighbor.clone());
        current = neighbor;
    }

    Ok(Route {
        path: visited.into_iter().collect(),
        cost,
    })
}
