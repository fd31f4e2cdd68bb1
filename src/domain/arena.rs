//! Arena-backed payload tree.
//!
//! Nodes are stored in a generational arena and refer to each other by
//! [`NodeId`]. A node's `parent` is a plain id, so upward queries never
//! create ownership cycles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::list::TreeListItem;

/// Source of revision stamps. Shared by all arenas so two different tree
/// states never carry the same stamp.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Handle of a node inside a [`TreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "node#{slot}.{generation}")
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Payload carried by this node
    pub data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<T> TreeNode<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parent handle, `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based N-ary tree holding arbitrary payloads.
///
/// An arena may hold several detached trees at once; every node that has no
/// parent is the root of one of them.
#[derive(Debug, Clone)]
pub struct TreeArena<T> {
    arena: Arena<TreeNode<T>>,
    revision: u64,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            revision: next_revision(),
        }
    }

    /// Stamp that changes on every structural mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = next_revision();
    }

    /// Inserts a detached node (no parent, no children).
    pub fn insert(&mut self, data: T) -> NodeId {
        let id = NodeId(self.arena.insert(TreeNode::new(data)));
        self.touch();
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.arena.get(id.0)
    }

    /// Mutable access to a node's payload. Structure stays untouched.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.arena.get_mut(id.0).map(|node| &mut node.data)
    }

    pub fn node(&self, id: NodeId) -> DomainResult<&TreeNode<T>> {
        self.get(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Total number of nodes across all trees in the arena.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Appends `child` to `parent`'s children and links it back.
    ///
    /// The child must be a root and must not be an ancestor of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        self.node(parent)?;
        let child_node = self.node(child)?;
        if let Some(existing) = child_node.parent {
            return Err(DomainError::AlreadyHasParent {
                child,
                parent: existing,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomainError::CycleDetected { child, parent });
        }

        self.attach(parent, child);
        self.touch();
        Ok(())
    }

    /// Applies [`add_child`](Self::add_child) for each item in order,
    /// stopping at the first failure.
    pub fn add_children<I>(&mut self, parent: NodeId, children: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = NodeId>,
    {
        children
            .into_iter()
            .try_for_each(|child| self.add_child(parent, child))
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Walks parent links upward from `start`, looking for `candidate`.
    fn is_ancestor_or_self(&self, candidate: NodeId, start: NodeId) -> bool {
        let mut current = Some(start);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.get(id).and_then(|node| node.parent);
        }
        false
    }

    pub fn is_root(&self, id: NodeId) -> DomainResult<bool> {
        Ok(self.node(id)?.is_root())
    }

    pub fn is_leaf(&self, id: NodeId) -> DomainResult<bool> {
        Ok(self.node(id)?.is_leaf())
    }

    /// Root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> DomainResult<NodeId> {
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// Lazy depth-first pre-order walk below (and including) `id`.
    /// Depths are relative to `id`. A stale id yields nothing.
    pub fn iter_pre_order(&self, id: NodeId) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self, id)
    }

    /// Number of nodes in the subtree rooted at `id`.
    pub fn node_count(&self, id: NodeId) -> DomainResult<usize> {
        self.node(id)?;
        Ok(self.iter_pre_order(id).count())
    }

    /// 1 for a leaf, otherwise one more than the tallest child.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self, id: NodeId) -> DomainResult<usize> {
        self.limited_height(id, None)
    }

    /// Height of the view that keeps nodes down to `max_depth` only.
    pub fn limited_height(&self, id: NodeId, max_depth: Option<usize>) -> DomainResult<usize> {
        let mut deepest = 0;
        self.walk_limited(id, max_depth, |depth, _| deepest = deepest.max(depth))?;
        Ok(deepest + 1)
    }

    /// Leaf count of the depth-limited view of the subtree at `id`.
    ///
    /// Nodes at `max_depth` count as leaves. The tree is not modified.
    #[instrument(level = "trace", skip(self))]
    pub fn count_leaves(&self, id: NodeId, max_depth: Option<usize>) -> DomainResult<usize> {
        let mut leaves = 0;
        self.walk_limited(id, max_depth, |depth, node| {
            if node.is_leaf() || max_depth == Some(depth) {
                leaves += 1;
            }
        })?;
        Ok(leaves)
    }

    /// Visits every node of the subtree at `id` down to `max_depth` with its
    /// relative depth. Unlike [`iter_pre_order`](Self::iter_pre_order) a
    /// dangling child is an error.
    fn walk_limited<F>(
        &self,
        id: NodeId,
        max_depth: Option<usize>,
        mut visit: F,
    ) -> DomainResult<()>
    where
        F: FnMut(usize, &TreeNode<T>),
    {
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            let node = self.node(current)?;
            visit(depth, node);
            if max_depth != Some(depth) {
                stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        Ok(())
    }

    /// Destructively cuts the subtree at `id` below `max_depth` and returns
    /// the resulting leaf count.
    ///
    /// Every node at depth `max_depth` loses its descendants, which are
    /// removed from the arena. With `max_depth = None` nothing is altered
    /// and the existing leaves are counted.
    #[instrument(level = "debug", skip(self))]
    pub fn trim_and_count(&mut self, id: NodeId, max_depth: Option<usize>) -> DomainResult<usize> {
        let Some(limit) = max_depth else {
            return self.count_leaves(id, None);
        };
        let removed_before = self.arena.len();
        let leaves = self.trim_from(id, limit)?;
        if self.arena.len() != removed_before {
            debug!(
                removed = removed_before - self.arena.len(),
                leaves, "trimmed tree"
            );
            self.touch();
        }
        Ok(leaves)
    }

    fn trim_from(&mut self, id: NodeId, limit: usize) -> DomainResult<usize> {
        let mut leaves = 0;
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            let node = self.node(current)?;
            if node.is_leaf() {
                leaves += 1;
                continue;
            }
            if depth == limit {
                let cut = match self.arena.get_mut(current.0) {
                    Some(node) => std::mem::take(&mut node.children),
                    None => Vec::new(),
                };
                for child in cut {
                    self.remove_subtree(child);
                }
                leaves += 1;
                continue;
            }
            stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
        }
        Ok(leaves)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current.0) {
                stack.extend(node.children);
            }
        }
    }
}

impl<T: Clone> TreeArena<T> {
    /// Depth-first pre-order flattening of the subtree at `id`.
    ///
    /// The node itself comes first at `start_depth`, followed by each child's
    /// flattened subtree one level deeper. Payloads are cloned, so the list
    /// holds no reference into the arena.
    pub fn to_pre_order_list(
        &self,
        id: NodeId,
        start_depth: usize,
    ) -> DomainResult<Vec<TreeListItem<T>>> {
        self.node(id)?;
        Ok(self
            .iter_pre_order(id)
            .map(|(_, depth, node)| TreeListItem::at(node.data.clone(), start_depth + depth))
            .collect())
    }

    /// Materialises the depth-limited view of the subtree at `id` as a new
    /// arena. Payloads are cloned into fresh nodes and `self` is untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn trimmed_copy(
        &self,
        id: NodeId,
        max_depth: Option<usize>,
    ) -> DomainResult<(TreeArena<T>, NodeId)> {
        let source_root = self.node(id)?;
        let mut copy = TreeArena::new();
        let root = copy.insert(source_root.data.clone());

        let mut stack = vec![(id, 0usize, root)];
        while let Some((source, depth, target)) = stack.pop() {
            if max_depth == Some(depth) {
                continue;
            }
            let node = self.node(source)?;
            let mut pending = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                let child_node = self.node(child)?;
                let copied = copy.insert(child_node.data.clone());
                copy.attach(target, copied);
                pending.push((child, depth + 1, copied));
            }
            stack.extend(pending.into_iter().rev());
        }
        copy.touch();
        Ok((copy, root))
    }
}

/// Pre-order iterator yielding `(id, depth, node)` with depth relative to the
/// start node.
pub struct PreOrderIter<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(arena: &'a TreeArena<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push((start, 0));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (NodeId, usize, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, depth, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chain(len: usize) -> (TreeArena<usize>, NodeId) {
        let mut arena = TreeArena::new();
        let root = arena.insert(0);
        let mut tip = root;
        for i in 1..len {
            let next = arena.insert(i);
            arena.add_child(tip, next).unwrap();
            tip = next;
        }
        (arena, root)
    }

    #[test]
    fn given_new_node_then_it_is_root_and_leaf() {
        let mut arena = TreeArena::new();
        let id = arena.insert("solo");
        assert!(arena.is_root(id).unwrap());
        assert!(arena.is_leaf(id).unwrap());
        assert_eq!(arena.height(id).unwrap(), 1);
    }

    #[test]
    fn given_child_with_parent_when_attaching_again_then_rejects() {
        let mut arena = TreeArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        let c = arena.insert("c");
        arena.add_child(a, c).unwrap();

        let err = arena.add_child(b, c).unwrap_err();
        assert_eq!(err, DomainError::AlreadyHasParent { child: c, parent: a });
        assert!(arena.node(b).unwrap().children().is_empty());
    }

    #[test]
    fn given_ancestor_when_attaching_below_descendant_then_rejects_cycle() {
        let (mut arena, root) = chain(3);
        let tip = arena.iter_pre_order(root).last().map(|(id, _, _)| id).unwrap();

        let err = arena.add_child(tip, root).unwrap_err();
        assert_eq!(err, DomainError::CycleDetected { child: root, parent: tip });
        assert!(arena.is_root(root).unwrap());
    }

    #[test]
    fn given_self_attachment_then_rejects_cycle() {
        let mut arena = TreeArena::new();
        let a = arena.insert(1);
        assert!(matches!(
            arena.add_child(a, a),
            Err(DomainError::CycleDetected { .. })
        ));
    }

    #[rstest]
    #[case(None, 1, 5)]
    #[case(Some(0), 1, 1)]
    #[case(Some(2), 1, 3)]
    #[case(Some(10), 1, 5)]
    fn given_chain_when_trimming_then_height_is_bounded(
        #[case] max_depth: Option<usize>,
        #[case] leaves: usize,
        #[case] height: usize,
    ) {
        let (mut arena, root) = chain(5);
        assert_eq!(arena.trim_and_count(root, max_depth).unwrap(), leaves);
        assert_eq!(arena.height(root).unwrap(), height);
        assert_eq!(arena.len(), height);
    }

    #[test]
    fn given_trim_without_limit_then_revision_is_unchanged() {
        let (mut arena, root) = chain(4);
        let before = arena.revision();
        arena.trim_and_count(root, None).unwrap();
        arena.trim_and_count(root, Some(8)).unwrap();
        assert_eq!(arena.revision(), before);
        arena.trim_and_count(root, Some(1)).unwrap();
        assert_ne!(arena.revision(), before);
    }

    #[test]
    fn given_stale_id_when_querying_then_reports_not_found() {
        let (mut arena, root) = chain(3);
        let tip = arena.iter_pre_order(root).last().map(|(id, _, _)| id).unwrap();
        arena.trim_and_count(root, Some(0)).unwrap();

        assert_eq!(arena.height(tip), Err(DomainError::NodeNotFound(tip)));
        assert_eq!(arena.iter_pre_order(tip).count(), 0);
    }

    #[test]
    fn given_nested_node_when_finding_root_then_walks_parent_links() {
        let (arena, root) = chain(4);
        let tip = arena.iter_pre_order(root).last().map(|(id, _, _)| id).unwrap();
        assert_eq!(arena.root_of(tip).unwrap(), root);
        assert_eq!(arena.root_of(root).unwrap(), root);
    }
}
