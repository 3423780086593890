use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;

use crate::errors::PathPlannerError;
use crate::geometry::Point;
use super::Graph;


/// Spatial index over node positions - answers "which node is under the cursor"
/// Built from a snapshot, rebuild after nodes are added, moved or removed
pub struct NodeLocator {
    ids: Vec<String>,
    tree: KdTree<f64, usize, [f64; 2]>, // stores point -> index in ids
}

impl NodeLocator {

    pub fn build(graph: &Graph) -> Result<Self, PathPlannerError> {
        let mut ids = Vec::with_capacity(graph.node_count());
        let mut tree = KdTree::new(2);

        for (id, p) in graph.nodes() {
            tree.add([p.x, p.y], ids.len())?;
            ids.push(id.to_string());
        }

        Ok(Self { ids, tree })
    }

    /// Closest node to a point along with its straight line distance
    pub fn nearest(&self, point: &Point) -> Result<Option<(&str, f64)>, PathPlannerError> {
        if self.ids.is_empty() {
            return Ok(None);
        }

        let found = self.tree.nearest(&[point.x, point.y], 1, &kt_squared_euclidean)?;

        Ok(found.first().map(|&(d2, &idx)| (self.ids[idx].as_str(), d2.sqrt())))
    }

    /// Node whose drawn circle contains the point, if any
    pub fn node_at(&self, point: &Point, radius: f64) -> Result<Option<&str>, PathPlannerError> {
        Ok(self.nearest(point)?
            .filter(|&(_, d)| d <= radius)
            .map(|(id, _)| id))
    }
}

impl Graph {

    pub fn locator(&self) -> Result<NodeLocator, PathPlannerError> {
        NodeLocator::build(self)
    }
}
