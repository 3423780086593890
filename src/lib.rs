//! City map route planning
//!
//! Nodes (cities) sit on a canvas and are linked by undirected edges weighted with the
//! rounded distance between them. Routes between two cities are answered either exactly
//! with Dijkstra or with a greedy nearest neighbor walk, which is quick to explain but
//! can fail or overpay where Dijkstra succeeds.
//!
//! ```
//! use citymap::{Graph, Point};
//!
//! let mut map = Graph::new();
//! map.add_node("A", Point::new(0.0, 0.0)).unwrap();
//! map.add_node("B", Point::new(30.0, 40.0)).unwrap();
//! map.connect("A", "B").unwrap();
//!
//! let route = map.solve_exact("A", "B").unwrap();
//! assert_eq!(route.path, vec!["A", "B"]);
//! assert_eq!(route.cost, Some(50));
//! ```

mod collections;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;

pub use config::CanvasConfig;
pub use errors::{ConfigError, GraphError, PathPlannerError};
pub use geometry::Point;
pub use graph::{locate::NodeLocator, EdgeKey, Graph, Solution, Strategy, Weight};
