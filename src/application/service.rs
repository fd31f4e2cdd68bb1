//! Family tree use cases: building, cutting, flattening and laying out.

use tracing::{info, instrument};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    checked_depth, FamilySource, NodeId, Person, PersonId, TreeArena, TreeBuilder, TreeListItem,
};
use crate::layout::{LayoutEngine, TreeLayout};

/// Size figures of one descendant tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub people: usize,
    pub height: usize,
    pub leaves: usize,
    /// Depth limit the displayed figures were computed for
    pub max_depth: Option<usize>,
    pub displayed_height: usize,
    pub displayed_leaves: usize,
}

/// Runs tree operations against a family data source.
pub struct FamilyService<S> {
    source: S,
    settings: Settings,
}

impl<S: FamilySource> FamilyService<S> {
    pub fn new(source: S, settings: Settings) -> ApplicationResult<Self> {
        settings.validate()?;
        Ok(Self { source, settings })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// An explicit request wins over the configured default depth.
    pub fn resolve_depth(&self, requested: Option<i64>) -> ApplicationResult<Option<usize>> {
        match requested {
            Some(depth) => Ok(Some(checked_depth(depth)?)),
            None => self.settings.max_depth(),
        }
    }

    pub fn descendants(&self, root: PersonId) -> ApplicationResult<(TreeArena<Person>, NodeId)> {
        Ok(TreeBuilder::new().build_descendants(&self.source, root)?)
    }

    /// Descendant tree cut at the requested depth.
    #[instrument(level = "debug", skip(self))]
    pub fn display_tree(
        &self,
        root: PersonId,
        max_depth: Option<i64>,
    ) -> ApplicationResult<(TreeArena<Person>, NodeId)> {
        let depth = self.resolve_depth(max_depth)?;
        let (mut tree, root_idx) = self.descendants(root)?;
        // Built for this call only, so it is cut in place
        let leaves = tree.trim_and_count(root_idx, depth)?;
        info!(leaves, "prepared tree for display");
        Ok((tree, root_idx))
    }

    /// Pre-order list of descendants starting at `start_depth`, skipping
    /// people more than `max_depth` generations below the root.
    #[instrument(level = "debug", skip(self))]
    pub fn pre_order(
        &self,
        root: PersonId,
        start_depth: i64,
        max_depth: Option<i64>,
    ) -> ApplicationResult<Vec<TreeListItem<Person>>> {
        let start = checked_depth(start_depth)?;
        let depth = self.resolve_depth(max_depth)?;
        let (tree, root_idx) = self.descendants(root)?;

        let mut items = tree.to_pre_order_list(root_idx, start)?;
        if let Some(limit) = depth {
            items.retain(|item| item.depth() - start <= limit);
        }
        Ok(items)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn stats(&self, root: PersonId, max_depth: Option<i64>) -> ApplicationResult<TreeStats> {
        let depth = self.resolve_depth(max_depth)?;
        let (tree, root_idx) = self.descendants(root)?;
        Ok(TreeStats {
            people: tree.node_count(root_idx)?,
            height: tree.height(root_idx)?,
            leaves: tree.count_leaves(root_idx, None)?,
            max_depth: depth,
            displayed_height: tree.limited_height(root_idx, depth)?,
            displayed_leaves: tree.count_leaves(root_idx, depth)?,
        })
    }

    /// Lays out the descendant tree with the configured metrics.
    #[instrument(level = "debug", skip(self))]
    pub fn layout(
        &self,
        root: PersonId,
        max_depth: Option<i64>,
    ) -> ApplicationResult<(TreeArena<Person>, TreeLayout)> {
        let depth = self.resolve_depth(max_depth)?;
        let (tree, root_idx) = self.descendants(root)?;
        let mut engine = LayoutEngine::new(self.settings.layout)?;
        let layout = engine.layout(&tree, root_idx, depth)?.clone();
        Ok((tree, layout))
    }
}
