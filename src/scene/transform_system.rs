//! Transform system
//!
//! Hierarchy bookkeeping and matrix propagation over the node arena. Works on
//! the `SlotMap` directly so the scene can hold borrows of its actor arena at
//! the same time.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeKey;
use crate::scene::node::Node;

/// Cached world matrix of `key`'s parent, if it has one.
#[must_use]
pub fn parent_world(nodes: &SlotMap<NodeKey, Node>, key: NodeKey) -> Option<Affine3A> {
    let parent = nodes.get(key)?.parent?;
    nodes.get(parent).map(|p| p.transform.world_matrix)
}

/// Whether `ancestor` appears on the parent chain of `node` (or is `node`).
#[must_use]
pub fn is_ancestor_or_self(nodes: &SlotMap<NodeKey, Node>, ancestor: NodeKey, node: NodeKey) -> bool {
    let mut current = Some(node);
    // Bounded by the arena size in case the invariant was broken elsewhere.
    let mut budget = nodes.len() + 1;
    while let Some(key) = current {
        if key == ancestor {
            return true;
        }
        if budget == 0 {
            log::error!("parent chain of {node:?} does not terminate");
            return true;
        }
        budget -= 1;
        current = nodes.get(key).and_then(|n| n.parent);
    }
    false
}

/// Removes `child` from its parent's child list and clears its parent link.
pub fn unlink(nodes: &mut SlotMap<NodeKey, Node>, child: NodeKey) {
    let Some(old_parent) = nodes.get(child).and_then(|n| n.parent) else {
        return;
    };
    if let Some(p) = nodes.get_mut(old_parent)
        && let Some(i) = p.children.iter().position(|&c| c == child)
    {
        p.children.remove(i);
    }
    if let Some(c) = nodes.get_mut(child) {
        c.parent = None;
    }
}

/// Links `child` under `parent`. The caller has already ruled out cycles.
pub fn link(nodes: &mut SlotMap<NodeKey, Node>, child: NodeKey, parent: NodeKey) {
    unlink(nodes, child);
    if let Some(p) = nodes.get_mut(parent) {
        p.children.push(child);
    }
    if let Some(c) = nodes.get_mut(child) {
        c.parent = Some(parent);
        c.transform.mark_dirty();
    }
}

/// Recomputes world matrices top-down from the given roots using an
/// explicit stack.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeKey, Node>, roots: &[NodeKey]) {
    let mut stack: Vec<(NodeKey, Option<Affine3A>)> = Vec::with_capacity(64);

    for &root in roots.iter().rev() {
        stack.push((root, None));
    }

    while let Some((key, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(key) else {
            continue;
        };

        let world = *node.transform.compose(parent_world.as_ref());

        for &child in node.children.iter().rev() {
            stack.push((child, Some(world)));
        }
    }
}

/// Handles of every node without a parent.
#[must_use]
pub fn roots(nodes: &SlotMap<NodeKey, Node>) -> Vec<NodeKey> {
    nodes
        .iter()
        .filter(|(_, n)| n.parent.is_none())
        .map(|(k, _)| k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Pose;
    use glam::Vec3;

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();

        let parent = nodes.insert(Node::with_pose(Pose::from_translation(Vec3::new(1.0, 0.0, 0.0))));
        let child = nodes.insert(Node::with_pose(Pose::from_translation(Vec3::new(0.0, 1.0, 0.0))));
        link(&mut nodes, child, parent);

        let r = roots(&nodes);
        update_hierarchy_iterative(&mut nodes, &r);

        let child_world_pos = nodes[child].transform.world_matrix.translation;
        assert!((child_world_pos.x - 1.0).abs() < 1e-5);
        assert!((child_world_pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ancestor_walk() {
        let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
        let a = nodes.insert(Node::new());
        let b = nodes.insert(Node::new());
        let c = nodes.insert(Node::new());
        link(&mut nodes, b, a);
        link(&mut nodes, c, b);

        assert!(is_ancestor_or_self(&nodes, a, c));
        assert!(is_ancestor_or_self(&nodes, c, c));
        assert!(!is_ancestor_or_self(&nodes, c, a));
    }

    #[test]
    fn test_relink_moves_child() {
        let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
        let a = nodes.insert(Node::new());
        let b = nodes.insert(Node::new());
        let c = nodes.insert(Node::new());
        link(&mut nodes, c, a);
        link(&mut nodes, c, b);

        assert!(nodes[a].children.is_empty());
        assert_eq!(nodes[b].children.as_slice(), &[c]);
        assert_eq!(nodes[c].parent, Some(b));

        unlink(&mut nodes, c);
        assert!(nodes[b].children.is_empty());
        assert_eq!(nodes[c].parent, None);
    }
}
