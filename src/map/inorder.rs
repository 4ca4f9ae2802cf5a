use std::iter::FusedIterator;

use super::Node;

/// In-order traversal over the entries of a tree
///
/// Entries come out sorted by key.
pub struct IterInorder<'a, K, V> {
    /// Nodes whose left subtree has been pushed but whose entry is not yet yielded
    stack: Vec<&'a Node<K, V>>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, K, V> IterInorder<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut iter = Self {stack: Vec::new()};
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

impl<'a, K, V> Iterator for IterInorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some((node.key(), node.value()))
    }
}

impl<'a, K, V> FusedIterator for IterInorder<'a, K, V> {}
