use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{DomainError, DomainResult, NodeId, TreeArena};

/// Conversion of an arena subtree into a printable `termtree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, root: NodeId) -> DomainResult<Tree<String>>;
}

impl<T: fmt::Display> TreeNodeConvert for TreeArena<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: NodeId) -> DomainResult<Tree<String>> {
        self.node(root)?;

        // (label, parent slot) in pre-order
        let mut slots: Vec<(String, Option<usize>)> = Vec::new();
        let mut path: Vec<usize> = Vec::new();
        for (_, depth, node) in self.iter_pre_order(root) {
            path.truncate(depth);
            let parent = path.last().copied();
            path.push(slots.len());
            slots.push((node.data.to_string(), parent));
        }

        // Assemble bottom-up; a child's slot always follows its parent's
        let mut pending: Vec<Vec<Tree<String>>> = slots.iter().map(|_| Vec::new()).collect();
        let mut assembled = None;
        for (slot, (label, parent)) in slots.into_iter().enumerate().rev() {
            let mut tree = Tree::new(label);
            for child in std::mem::take(&mut pending[slot]).into_iter().rev() {
                tree.push(child);
            }
            match parent {
                Some(parent) => pending[parent].push(tree),
                None => assembled = Some(tree),
            }
        }
        assembled.ok_or(DomainError::NodeNotFound(root))
    }
}
