#![allow(dead_code)]

use famtree::domain::{NodeId, TreeArena};

/// Grandparent
/// ├── Parent1
/// │   ├── Child1
/// │   ├── Child2
/// │   │   ├── Grandchild1
/// │   │   └── Grandchild2
/// │   └── Child3
/// ├── Parent2
/// │   └── Child4
/// │       ├── Grandchild3
/// │       ├── Grandchild4
/// │       ├── Grandchild5
/// │       └── Grandchild6
/// └── Parent3
pub fn grandparent_tree() -> (TreeArena<&'static str>, NodeId) {
    let mut tree = TreeArena::new();
    let root = tree.insert("Grandparent");

    let p1 = tree.insert("Parent1");
    let p2 = tree.insert("Parent2");
    let p3 = tree.insert("Parent3");
    tree.add_children(root, [p1, p2, p3]).unwrap();

    let c1 = tree.insert("Child1");
    let c2 = tree.insert("Child2");
    let c3 = tree.insert("Child3");
    tree.add_children(p1, [c1, c2, c3]).unwrap();

    let g1 = tree.insert("Grandchild1");
    let g2 = tree.insert("Grandchild2");
    tree.add_children(c2, [g1, g2]).unwrap();

    let c4 = tree.insert("Child4");
    tree.add_child(p2, c4).unwrap();
    let grandchildren =
        ["Grandchild3", "Grandchild4", "Grandchild5", "Grandchild6"].map(|name| tree.insert(name));
    tree.add_children(c4, grandchildren).unwrap();

    (tree, root)
}

/// root → {A → {A1, A2}, B → {B1, B2}}: height 3, 4 leaves.
pub fn small_tree() -> (TreeArena<&'static str>, NodeId) {
    let mut tree = TreeArena::new();
    let root = tree.insert("root");
    let a = tree.insert("A");
    let b = tree.insert("B");
    tree.add_children(root, [a, b]).unwrap();
    let a1 = tree.insert("A1");
    let a2 = tree.insert("A2");
    tree.add_children(a, [a1, a2]).unwrap();
    let b1 = tree.insert("B1");
    let b2 = tree.insert("B2");
    tree.add_children(b, [b1, b2]).unwrap();
    (tree, root)
}

/// Finds a node by payload below `root`.
pub fn find(tree: &TreeArena<&'static str>, root: NodeId, name: &str) -> NodeId {
    tree.iter_pre_order(root)
        .find(|(_, _, node)| node.data == name)
        .map(|(id, _, _)| id)
        .unwrap_or_else(|| panic!("no node named {name}"))
}

/// Single line of `len` nodes with a two-leaf fork at the bottom.
pub fn deep_chain(len: usize) -> (TreeArena<usize>, NodeId, NodeId) {
    let mut tree = TreeArena::new();
    let root = tree.insert(0);
    let mut tail = root;
    for n in 1..len {
        let next = tree.insert(n);
        tree.add_child(tail, next).unwrap();
        tail = next;
    }
    let left = tree.insert(len);
    let right = tree.insert(len + 1);
    tree.add_children(tail, [left, right]).unwrap();
    (tree, root, tail)
}
