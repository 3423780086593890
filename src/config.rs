use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::geometry::Point;


/// Canvas the map is drawn on
/// Positions only feed edge weights, the bounds here keep placed and dragged nodes on screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    /// Radius of a drawn node, also the hit-test radius
    pub node_radius: f64,
    /// Extra gap kept between a dragged node and the canvas border
    pub drag_margin: f64,
    /// Distance from the border inside which new nodes are never placed
    pub spawn_margin: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            node_radius: 36.0,
            drag_margin: 6.0,
            spawn_margin: 100.0,
        }
    }
}

impl CanvasConfig {

    /// Parse a TOML table, missing keys take their defaults
    ///
    /// ```toml
    /// width = 800.0
    /// height = 500.0
    /// node_radius = 24.0
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: CanvasConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// The canvas must fit at least one node (plus margins) in each direction
    pub fn validate(&self) -> Result<(), ConfigError> {
        let inset = self.node_radius + self.drag_margin;
        let fits = self.width > 2.0 * inset
            && self.height > 2.0 * inset
            && self.width > 2.0 * self.spawn_margin
            && self.height > 2.0 * self.spawn_margin;

        if !fits || inset < 0.0 || self.spawn_margin < 0.0 {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
                radius: self.node_radius,
            });
        }
        Ok(())
    }

    /// Clamp a point so a node drawn there stays fully on the canvas
    pub fn clamp(&self, point: Point) -> Point {
        let inset = self.node_radius + self.drag_margin;
        Point {
            x: point.x.max(inset).min(self.width - inset),
            y: point.y.max(inset).min(self.height - inset),
        }
    }

    /// Uniformly random position inside the spawn margins
    /// Falls back to the middle of an axis the margins leave no room on
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Point {
        Point {
            x: spawn_coordinate(rng, self.spawn_margin, self.width),
            y: spawn_coordinate(rng, self.spawn_margin, self.height),
        }
    }
}

fn spawn_coordinate<R: Rng>(rng: &mut R, margin: f64, extent: f64) -> f64 {
    let (lo, hi) = (margin, extent - margin);
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        extent / 2.0
    }
}
