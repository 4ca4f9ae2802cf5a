use std::iter::FusedIterator;

use super::Node;

/// Depth-first walk over the nodes of a tree: a node, then its left subtree, then its right
///
/// This is the order in which parent lookups inspect the tree.
pub(crate) struct NodesPreorder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> NodesPreorder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, K, V> Iterator for NodesPreorder<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes first so the left subtree is popped (visited) first
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

impl<'a, K, V> FusedIterator for NodesPreorder<'a, K, V> {}

/// Pre-order traversal over the entries of a tree
pub struct IterPreorder<'a, K, V> {
    nodes: NodesPreorder<'a, K, V>,
}

impl<'a, K, V> IterPreorder<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            nodes: NodesPreorder::new(root),
        }
    }
}

impl<'a, K, V> Iterator for IterPreorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (node.key(), node.value()))
    }
}

impl<'a, K, V> FusedIterator for IterPreorder<'a, K, V> {}
