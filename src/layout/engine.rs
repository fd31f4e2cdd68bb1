//! Proportional tree layout.
//!
//! Every subtree receives a horizontal band whose width is its leaf count
//! times [`LayoutMetrics::node_total_width`]. Children split their parent's
//! band left to right in order, so sibling bands are contiguous, never overlap
//! and add up exactly to the parent's band. A node is centred in its band; its
//! depth fixes the vertical position.
//!
//! Space is allocated by leaf count only, not by subtree contours. A deep
//! narrow chain next to a bushy sibling therefore gets a narrow band even where
//! the bushy side leaves room to spare.

use tracing::{debug, instrument, trace};

use crate::domain::{DomainResult, NodeId, TreeArena};
use crate::layout::geometry::{Band, Connector, Point, Rect, Size};
use crate::layout::metrics::LayoutMetrics;

/// Geometry of one placed node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePlacement {
    pub id: NodeId,
    /// Depth below the layout root
    pub depth: usize,
    pub band: Band,
    pub rect: Rect,
    /// Link to the parent box, `None` for the layout root
    pub connector: Option<Connector>,
}

/// Result of a complete layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    canvas: Size,
    leaf_count: usize,
    height: usize,
    displayed_height: Option<usize>,
    placements: Vec<NodePlacement>,
}

impl TreeLayout {
    /// Bounding canvas: leaf count × total node width by height × level height.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Leaves of the displayed (depth-limited) tree.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of displayed levels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn displayed_height(&self) -> Option<usize> {
        self.displayed_height
    }

    /// Placements in pre-order.
    pub fn placements(&self) -> &[NodePlacement] {
        &self.placements
    }

    pub fn placement(&self, id: NodeId) -> Option<&NodePlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        self.placements.iter().filter_map(|p| p.connector.as_ref())
    }

    /// Node whose box contains `point`, for dispatching clicks.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.placements
            .iter()
            .find(|p| p.rect.contains(point))
            .map(|p| p.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    root: NodeId,
    displayed_height: Option<usize>,
    revision: u64,
    metrics: LayoutMetrics,
}

/// Lays out trees and keeps the most recent result.
///
/// Calling [`layout`](Self::layout) again with the same root, displayed height
/// and an unchanged tree returns the previous result without recomputing it.
/// Anything else recomputes the whole layout from scratch.
#[derive(Debug)]
pub struct LayoutEngine {
    metrics: LayoutMetrics,
    last: Option<(LayoutKey, TreeLayout)>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            last: None,
        }
    }
}

impl LayoutEngine {
    pub fn new(metrics: LayoutMetrics) -> DomainResult<Self> {
        metrics.validate()?;
        Ok(Self {
            metrics,
            last: None,
        })
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: LayoutMetrics) -> DomainResult<()> {
        metrics.validate()?;
        self.metrics = metrics;
        Ok(())
    }

    /// Most recent layout, if any.
    pub fn last_layout(&self) -> Option<&TreeLayout> {
        self.last.as_ref().map(|(_, layout)| layout)
    }

    /// Lays out the subtree at `root`.
    ///
    /// With `displayed_height = Some(d)` only nodes down to depth `d` are
    /// placed and nodes at depth `d` are drawn as leaves. The arena itself is
    /// never modified.
    #[instrument(level = "debug", skip(self, arena))]
    pub fn layout<T>(
        &mut self,
        arena: &TreeArena<T>,
        root: NodeId,
        displayed_height: Option<usize>,
    ) -> DomainResult<&TreeLayout> {
        let key = LayoutKey {
            root,
            displayed_height,
            revision: arena.revision(),
            metrics: self.metrics,
        };

        let entry = match self.last.take() {
            Some((last_key, layout)) if last_key == key => {
                trace!("layout unchanged, reusing previous result");
                (last_key, layout)
            }
            previous => match self.compute(arena, root, displayed_height) {
                Ok(layout) => (key, layout),
                Err(e) => {
                    self.last = previous;
                    return Err(e);
                }
            },
        };
        let (_, layout) = self.last.insert(entry);
        Ok(&*layout)
    }

    fn compute<T>(
        &self,
        arena: &TreeArena<T>,
        root: NodeId,
        displayed_height: Option<usize>,
    ) -> DomainResult<TreeLayout> {
        let visible = visible_nodes(arena, root, displayed_height)?;

        // Children follow their parent in pre-order, so one backward sweep
        // totals every subtree's leaves.
        let mut leaves = vec![0usize; visible.len()];
        for (slot, node) in visible.iter().enumerate().rev() {
            if leaves[slot] == 0 {
                leaves[slot] = 1;
            }
            if let Some(parent) = node.parent {
                leaves[parent] += leaves[slot];
            }
        }

        let leaf_count = leaves.first().copied().unwrap_or(0);
        let height = visible.iter().map(|n| n.depth).max().unwrap_or(0) + 1;
        let canvas = Size {
            width: leaf_count as f64 * self.metrics.node_total_width(),
            height: height as f64 * self.metrics.level_height,
        };

        let mut placements: Vec<NodePlacement> = Vec::with_capacity(visible.len());
        // Left edge of the next child band, per placed node
        let mut next_band: Vec<f64> = Vec::with_capacity(visible.len());
        for (slot, node) in visible.iter().enumerate() {
            let (band_left, anchor) = match node.parent {
                Some(parent) => {
                    let left = next_band[parent];
                    let rect = &placements[parent].rect;
                    (left, Some(Point::new(rect.center_x(), rect.bottom())))
                }
                None => (0.0, None),
            };
            let band = Band {
                left: band_left,
                right: band_left + leaves[slot] as f64 * self.metrics.node_total_width(),
            };
            if let Some(parent) = node.parent {
                next_band[parent] = band.right;
            }

            let center = band.center();
            let rect = Rect {
                x: center - self.metrics.node_width / 2.0,
                y: node.depth as f64 * self.metrics.level_height,
                width: self.metrics.node_width,
                height: self.metrics.node_height,
            };
            let connector = anchor.map(|from| Connector {
                from,
                to: Point::new(center, rect.y),
            });
            next_band.push(band.left);
            placements.push(NodePlacement {
                id: node.id,
                depth: node.depth,
                band,
                rect,
                connector,
            });
        }
        debug!(
            nodes = placements.len(),
            leaf_count,
            height,
            width = canvas.width,
            "computed layout"
        );

        Ok(TreeLayout {
            canvas,
            leaf_count,
            height,
            displayed_height,
            placements,
        })
    }
}

struct VisibleNode {
    id: NodeId,
    depth: usize,
    /// Slot of the parent in the visible list
    parent: Option<usize>,
}

/// Pre-order list of the nodes drawn below `root`, stopping at `limit`.
fn visible_nodes<T>(
    arena: &TreeArena<T>,
    root: NodeId,
    limit: Option<usize>,
) -> DomainResult<Vec<VisibleNode>> {
    let mut visible = Vec::new();
    let mut stack = vec![(root, 0usize, None)];
    while let Some((id, depth, parent)) = stack.pop() {
        let node = arena.node(id)?;
        let slot = visible.len();
        visible.push(VisibleNode { id, depth, parent });
        if limit != Some(depth) {
            stack.extend(
                node.children()
                    .iter()
                    .rev()
                    .map(|&child| (child, depth + 1, Some(slot))),
            );
        }
    }
    Ok(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fork() -> (TreeArena<&'static str>, NodeId, NodeId, NodeId) {
        let mut arena = TreeArena::new();
        let root = arena.insert("root");
        let left = arena.insert("left");
        let right = arena.insert("right");
        arena.add_children(root, [left, right]).unwrap();
        (arena, root, left, right)
    }

    #[test]
    fn given_single_node_then_box_is_centred_in_one_slot() {
        let mut arena = TreeArena::new();
        let root = arena.insert(());
        let mut engine = LayoutEngine::default();

        let layout = engine.layout(&arena, root, None).unwrap();
        assert_eq!(layout.canvas(), Size { width: 136.0, height: 80.0 });
        let p = &layout.placements()[0];
        assert_eq!(p.rect.x, 8.0);
        assert_eq!(p.rect.y, 0.0);
        assert!(p.connector.is_none());
    }

    #[test]
    fn given_fork_then_children_split_root_band() {
        let (arena, root, left, right) = fork();
        let mut engine = LayoutEngine::default();
        let layout = engine.layout(&arena, root, None).unwrap();

        let l = layout.placement(left).unwrap();
        let r = layout.placement(right).unwrap();
        assert_eq!(l.band, Band { left: 0.0, right: 136.0 });
        assert_eq!(r.band, Band { left: 136.0, right: 272.0 });
        assert_eq!(layout.placement(root).unwrap().rect.center_x(), 136.0);

        let c = l.connector.unwrap();
        assert_eq!(c.from, Point::new(136.0, 48.0));
        assert_eq!(c.to, Point::new(68.0, 80.0));
    }

    #[test]
    fn given_point_inside_box_then_hit_test_finds_node() {
        let (arena, root, _, right) = fork();
        let mut engine = LayoutEngine::default();
        let layout = engine.layout(&arena, root, None).unwrap();

        assert_eq!(layout.hit_test(Point::new(204.0, 100.0)), Some(right));
        assert_eq!(layout.hit_test(Point::new(204.0, 60.0)), None);
    }

    #[test]
    fn given_failed_pass_then_previous_layout_is_kept() {
        let (mut arena, root, left, _) = fork();
        let mut engine = LayoutEngine::default();
        let first = engine.layout(&arena, root, None).unwrap().clone();

        let stale = arena.insert("stale");
        arena.add_child(left, stale).unwrap();
        arena.trim_and_count(root, Some(1)).unwrap();
        assert!(engine.layout(&arena, stale, None).is_err());

        assert_eq!(engine.last_layout(), Some(&first));
    }

    #[test]
    fn given_changed_metrics_then_layout_is_recomputed() {
        let (arena, root, _, _) = fork();
        let mut engine = LayoutEngine::default();
        let first = engine.layout(&arena, root, None).unwrap().clone();

        engine
            .set_metrics(LayoutMetrics {
                node_width: 100.0,
                ..LayoutMetrics::default()
            })
            .unwrap();
        let second = engine.layout(&arena, root, None).unwrap();
        assert_ne!(&first, second);
        assert_eq!(second.canvas().width, 232.0);
    }
}
