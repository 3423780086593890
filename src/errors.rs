use thiserror::Error;

use crate::graph::Weight;


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathPlannerError {
    #[error("no path found")]
    NoPathFound, // Unable to find a path to the goal
    #[error("kd-tree error: {0}")]
    KdTreeError(String),
}

/// Errors raised by graph mutations and queries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node `{0}` already exists")]
    DuplicateNode(String),
    #[error("node `{0}` not found")]
    NodeNotFound(String),
    #[error("edge `{0}`-`{1}` already exists")]
    DuplicateEdge(String, String),
    #[error("edge `{0}`-`{0}` would be a self-loop")]
    SelfLoop(String),
    #[error("edge weight {0} is negative")]
    InvalidWeight(Weight),
    #[error("node `{0}` has a non-finite position")]
    InvalidPosition(String),
    #[error(transparent)]
    Planner(#[from] PathPlannerError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse canvas config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("canvas {width}x{height} leaves no room for nodes of radius {radius}")]
    InvalidBounds { width: f64, height: f64, radius: f64 },
}


impl From<kdtree::ErrorKind> for PathPlannerError {
    fn from(error: kdtree::ErrorKind) -> Self {
        PathPlannerError::KdTreeError(error.to_string())
    }
}
