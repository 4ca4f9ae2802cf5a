use std::fmt;
use std::mem;
use std::borrow::Borrow;

/// An exclusively owned child slot. `None` marks an empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single node of the binary search tree
///
/// Nodes never store a reference to their parent. Use
/// [`BSTMap::get_parent`](crate::BSTMap::get_parent) to find it.
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> fmt::Debug for Node<K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    // Children are shown by key only, so formatting never walks the whole subtree
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("value", self.value())
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    pub(crate) fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Returns the key of this node
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value of this node
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value of this node
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        !self.has_left() && !self.has_right()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the left child node (subtree) of this node, if any
    ///
    /// Only values can be modified through the returned node.
    pub fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.as_deref_mut()
    }

    /// Returns the right child node (subtree) of this node, if any
    ///
    /// Only values can be modified through the returned node.
    pub fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.as_deref_mut()
    }

    /// Returns true if either direct child of this node holds `key`
    ///
    /// The left child is checked first. The key of this node itself is never compared.
    pub fn is_parent_of<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.left_holds(key) || self.right_holds(key)
    }

    fn left_holds<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.left().map_or(false, |left| key.cmp(left.key.borrow()).is_eq())
    }

    fn right_holds<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.right().map_or(false, |right| key.cmp(right.key.borrow()).is_eq())
    }

    /// Both child slots at once, so a traversal can descend into either side
    pub(crate) fn children_mut(&mut self) -> (Option<&mut Self>, Option<&mut Self>) {
        (self.left.as_deref_mut(), self.right.as_deref_mut())
    }

    pub(crate) fn left_link_mut(&mut self) -> &mut Link<K, V> {
        &mut self.left
    }

    pub(crate) fn right_link_mut(&mut self) -> &mut Link<K, V> {
        &mut self.right
    }

    /// Returns the slot of the direct child holding `key`, left side first
    pub(crate) fn child_link_mut<Q>(&mut self, key: &Q) -> Option<&mut Link<K, V>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        if self.left_holds(key) {
            Some(&mut self.left)
        } else if self.right_holds(key) {
            Some(&mut self.right)
        } else {
            None
        }
    }

    /// New node MUST maintain BST property
    pub(crate) fn set_left(&mut self, new_node: Self) {
        debug_assert!(self.left.is_none());
        self.left = Some(Box::new(new_node));
    }

    /// New node MUST maintain BST property
    pub(crate) fn set_right(&mut self, new_node: Self) {
        debug_assert!(self.right.is_none());
        self.right = Some(Box::new(new_node));
    }

    /// Takes both subtrees out of this node, leaving it a leaf
    pub(crate) fn take_children(&mut self) -> (Link<K, V>, Link<K, V>) {
        (self.left.take(), self.right.take())
    }

    /// Attaches both subtrees to a leaf
    ///
    /// New children MUST maintain BST property
    pub(crate) fn attach_children(&mut self, left: Link<K, V>, right: Link<K, V>) {
        debug_assert!(self.is_leaf());
        self.left = left;
        self.right = right;
    }

    /// Takes the only child of this node, if it has one
    ///
    /// Must not be called on a node with two children.
    pub(crate) fn take_only_child(&mut self) -> Link<K, V> {
        debug_assert!(!(self.has_left() && self.has_right()));
        self.left.take().or_else(|| self.right.take())
    }

    /// Moves a new entry into this node, returning the old one
    ///
    /// The new key MUST sort into the same position as the old key.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        let old_key = mem::replace(&mut self.key, key);
        let old_value = mem::replace(&mut self.value, value);
        (old_key, old_value)
    }
}
