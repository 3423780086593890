pub mod locate;

use rand::Rng;
use serde::Serialize;

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::config::CanvasConfig;
use crate::errors::{GraphError, PathPlannerError};
use crate::geometry::Point;
use crate::graph_algos::{dijkstra::dijkstra, greedy::greedy, Route};


/// Edge weight - rounded Euclidean distance between the endpoints
pub type Weight = i64;


/// Unordered pair of node ids
/// Endpoints are stored sorted so {a, b} and {b, a} hash to the same key
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(String, String);

impl EdgeKey {

    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}


/// Which solver answers a route query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// Dijkstra - always the cheapest path
    #[default]
    Exact,
    /// Nearest unvisited neighbor walk - fast, myopic, may fail or overpay
    Greedy,
}


/// Result of a route query handed back to the map view
/// An empty path means the goal could not be reached, cost is then None
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub path: Vec<String>,
    pub cost: Option<Weight>,
}

impl Solution {

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

impl From<Route<String, Weight>> for Solution {
    fn from(route: Route<String, Weight>) -> Self {
        Self {
            path: route.path,
            cost: Some(route.cost),
        }
    }
}


/// Undirected weighted graph of named nodes placed on a canvas
///
/// The graph owns every node and edge. Iteration over nodes, edges and neighbors
/// follows insertion order, so both solvers are deterministic for a given edit history.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    positions: FxIndexMap<String, Point>,
    adjacency: FxIndexMap<String, FxIndexSet<String>>,
    edges: FxIndexMap<EdgeKey, Weight>,
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, position: Point) -> Result<(), GraphError> {
        let id = id.into();
        if self.positions.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        if !position.is_finite() {
            return Err(GraphError::InvalidPosition(id));
        }

        tracing::debug!(node = %id, x = position.x, y = position.y, "add node");

        self.adjacency.insert(id.clone(), FxIndexSet::default());
        self.positions.insert(id, position);
        Ok(())
    }

    /// Add a node at a random spot on the canvas, returns where it landed
    pub fn add_node_random<R: Rng>(&mut self, id: impl Into<String>, canvas: &CanvasConfig, rng: &mut R) -> Result<Point, GraphError> {
        let position = canvas.random_position(rng);
        self.add_node(id, position)?;
        Ok(position)
    }

    /// Remove a node together with every edge touching it
    /// Unknown ids are reported rather than ignored
    pub fn remove_node(&mut self, id: &str) -> Result<(), GraphError> {
        let Some(neighbors) = self.adjacency.shift_remove(id) else {
            return Err(GraphError::NodeNotFound(id.to_string()));
        };
        self.positions.shift_remove(id);

        for neighbor in &neighbors {
            if let Some(set) = self.adjacency.get_mut(neighbor) {
                set.shift_remove(id);
            }
            self.edges.shift_remove(&EdgeKey::new(id, neighbor));
        }

        tracing::debug!(node = %id, edges_removed = neighbors.len(), "remove node");
        Ok(())
    }

    /// Move a node and recompute the weight of every incident edge
    pub fn update_node_position(&mut self, id: &str, position: Point) -> Result<(), GraphError> {
        let Some(current) = self.positions.get_mut(id) else {
            return Err(GraphError::NodeNotFound(id.to_string()));
        };
        if !position.is_finite() {
            return Err(GraphError::InvalidPosition(id.to_string()));
        }
        *current = position;

        if let Some(neighbors) = self.adjacency.get(id) {
            for neighbor in neighbors {
                let Some(other) = self.positions.get(neighbor) else {
                    continue;
                };
                let weight = position.rounded_distance(other);
                if let Some(w) = self.edges.get_mut(&EdgeKey::new(id, neighbor)) {
                    *w = weight;
                }
            }
        }

        tracing::debug!(node = %id, x = position.x, y = position.y, "move node");
        Ok(())
    }

    /// Drag a node to a point, keeping it inside the canvas
    pub fn drag_node(&mut self, id: &str, point: Point, canvas: &CanvasConfig) -> Result<Point, GraphError> {
        let clamped = canvas.clamp(point);
        self.update_node_position(id, clamped)?;
        Ok(clamped)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn add_edge(&mut self, a: &str, b: &str, weight: Weight) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a.to_string()));
        }
        for id in [a, b] {
            if !self.contains_node(id) {
                return Err(GraphError::NodeNotFound(id.to_string()));
            }
        }
        if weight < 0 {
            return Err(GraphError::InvalidWeight(weight));
        }

        let key = EdgeKey::new(a, b);
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(a.to_string(), b.to_string()));
        }

        tracing::debug!(a, b, weight, "add edge");

        self.edges.insert(key, weight);
        for (from, to) in [(a, b), (b, a)] {
            if let Some(set) = self.adjacency.get_mut(from) {
                set.insert(to.to_string());
            }
        }
        Ok(())
    }

    /// Link two nodes with an edge weighted by the distance between them
    pub fn connect(&mut self, a: &str, b: &str) -> Result<Weight, GraphError> {
        let (pa, pb) = match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => (pa, pb),
            (None, _) => return Err(GraphError::NodeNotFound(a.to_string())),
            (_, None) => return Err(GraphError::NodeNotFound(b.to_string())),
        };
        let weight = pa.rounded_distance(&pb);
        self.add_edge(a, b, weight)?;
        Ok(weight)
    }

    /// Remove the edge between two nodes in either order
    /// Returns false if there was no such edge
    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        if self.edges.shift_remove(&EdgeKey::new(a, b)).is_none() {
            return false;
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Some(set) = self.adjacency.get_mut(from) {
                set.shift_remove(to);
            }
        }

        tracing::debug!(a, b, "remove edge");
        true
    }

    pub fn edge_weight(&self, a: &str, b: &str) -> Option<Weight> {
        self.edges.get(&EdgeKey::new(a, b)).copied()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, Weight)> {
        self.edges.iter().map(|(key, w)| (key, *w))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adjacent nodes with the weight of the connecting edge, in edge insertion order
    pub fn neighbors(&self, id: &str) -> Result<Vec<(&str, Weight)>, GraphError> {
        let set = self.adjacency.get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        Ok(set.iter()
            .filter_map(|n| {
                let key = EdgeKey::new(id, n);
                let w = self.edges.get(&key)?;
                Some((n.as_str(), *w))
            })
            .collect())
    }

    /// Drop every node and edge
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.positions.len(), edges = self.edges.len(), "clear graph");
        self.positions.clear();
        self.adjacency.clear();
        self.edges.clear();
    }

    /// Total weight along a path
    /// None if two consecutive nodes are not linked or the total overflows
    pub fn path_cost<S: AsRef<str>>(&self, path: &[S]) -> Option<Weight> {
        path.windows(2).try_fold(0 as Weight, |total, pair| {
            total.checked_add(self.edge_weight(pair[0].as_ref(), pair[1].as_ref())?)
        })
    }

    /// Cheapest route between two nodes (Dijkstra)
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn solve_exact(&self, start: &str, end: &str) -> Result<Solution, GraphError> {
        self.solve(Strategy::Exact, start, end)
    }

    /// Route found by always taking the cheapest edge to an unvisited node
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn solve_greedy(&self, start: &str, end: &str) -> Result<Solution, GraphError> {
        self.solve(Strategy::Greedy, start, end)
    }

    /// Route between two nodes with the given strategy
    /// An unreachable end is a normal outcome (empty Solution), unknown ids are errors
    pub fn solve(&self, strategy: Strategy, start: &str, end: &str) -> Result<Solution, GraphError> {
        for id in [start, end] {
            if !self.contains_node(id) {
                return Err(GraphError::NodeNotFound(id.to_string()));
            }
        }

        let neighbors = |node: &String| self.weighted_neighbors(node);
        let goal = |node: &String| node == end;

        let result = match strategy {
            Strategy::Exact => dijkstra(start.to_string(), neighbors, goal),
            Strategy::Greedy => greedy(start.to_string(), neighbors, goal),
        };

        let solution = match result {
            Ok(route) => Solution::from(route),
            Err(PathPlannerError::NoPathFound) => Solution::unreachable(),
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(?strategy, path = ?solution.path, cost = ?solution.cost, "solved");
        Ok(solution)
    }

    /// Owned neighbor list in the shape the planners expect
    fn weighted_neighbors(&self, id: &str) -> Vec<(String, Weight)> {
        let Some(set) = self.adjacency.get(id) else {
            return Vec::new();
        };
        set.iter()
            .filter_map(|n| {
                self.edges.get(&EdgeKey::new(id, n)).map(|w| (n.clone(), *w))
            })
            .collect()
    }
}
