//! Layout layer: turns a tree into boxes, bands and connector lines.

pub mod engine;
pub mod geometry;
pub mod metrics;

pub use engine::{LayoutEngine, NodePlacement, TreeLayout};
pub use geometry::{Band, Connector, Point, Rect, Size};
pub use metrics::LayoutMetrics;
