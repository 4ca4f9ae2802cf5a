use std::fmt;
use std::cmp::Ordering;
use std::borrow::Borrow;
use std::iter::FromIterator;

use tracing::{debug, trace};

use crate::error::{DuplicateKey, KeyNotFound};

mod node;
mod preorder;
mod inorder;

pub use node::Node;
pub use preorder::IterPreorder;
pub use inorder::IterInorder;

use node::Link;
use preorder::NodesPreorder;

/// A binary search tree (BST) mapping unique keys to values
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// Each key appears at most once. The tree is never rebalanced, so its shape depends entirely on
/// the order of insertions and deletions.
///
/// Nodes do not store parent pointers. Any question about a node's parent is answered by walking
/// down from the root again (see [`get_parent`](Self::get_parent)).
///
/// Dropping, clearing and cloning never recurse, so a tree that has degenerated into one long
/// chain is as safe to tear down or copy as a balanced one.
pub struct BSTMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for BSTMap<K, V> {
    fn default() -> Self {
        Self {
            root: None,
            len: 0,
        }
    }
}

impl<K, V> Drop for BSTMap<K, V> {
    fn drop(&mut self) {
        // Detach children before each node is dropped so no drop ever recurses
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            let (left, right) = node.take_children();
            stack.extend(left);
            stack.extend(right);
        }
    }
}

impl<K: Clone, V: Clone> Clone for BSTMap<K, V> {
    fn clone(&self) -> Self {
        // Node, right, left order reversed is a post-order: both subtrees of a node are built
        // (and on the stack, left below right) by the time the node itself is copied
        let mut order = Vec::with_capacity(self.len);
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left());
            pending.extend(node.right());
        }

        let mut built: Vec<Box<Node<K, V>>> = Vec::new();
        for node in order.into_iter().rev() {
            let right = if node.has_right() { built.pop() } else { None };
            let left = if node.has_left() { built.pop() } else { None };

            let mut copy = Node::new(node.key().clone(), node.value().clone());
            copy.attach_children(left, right);
            built.push(Box::new(copy));
        }
        debug_assert!(built.len() <= 1);

        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for BSTMap<K, V>
    where K: Ord + fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_inorder()).finish()
    }
}

impl<K: Ord + PartialEq, V: PartialEq> PartialEq for BSTMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Two trees holding the same entries may be shaped differently depending on insertion
        // order, so compare the sorted entry sequences rather than the structure.
        if self.len() != other.len() {
            return false;
        }

        self.iter_inorder().zip(other.iter_inorder()).all(|((k1, v1), (k2, v2))| {
            k1.eq(k2) && v1.eq(v2)
        })
    }
}

impl<K: Ord + Eq, V: Eq> Eq for BSTMap<K, V> {}

impl<K: Ord, V> BSTMap<K, V> {
    /// Creates an empty `BSTMap`
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BSTMap;
    /// let mut map: BSTMap<&str, i32> = BSTMap::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the map (i.e. the number of nodes in the binary search
    /// tree)
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.len != 0 || self.root.is_none());
        self.len == 0
    }

    /// Returns the node holding the given key, or `None` if no such key exists in the binary
    /// search tree
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(depth)`
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BSTMap;
    ///
    /// let mut map = BSTMap::new();
    /// map.insert(1, "a").unwrap();
    ///
    /// let node = map.search(&1).unwrap();
    /// assert_eq!((node.key(), node.value()), (&1, &"a"));
    /// assert!(map.search(&2).is_none());
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(node),
            }
        }

        None
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// Time complexity: `O(depth)`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Returns a reference to the value corresponding to the given key, or `None` if no such key
    /// exists in the binary search tree
    ///
    /// Time complexity: `O(depth)`
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BSTMap;
    ///
    /// let mut map = BSTMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search(key).map(Node::value)
    }

    /// Returns a key-value pair corresponding to the given key, or `None` if no such key exists in
    /// the binary search tree
    ///
    /// Time complexity: `O(depth)`
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search(key).map(|node| (node.key(), node.value()))
    }

    /// Returns a mutable reference to the value corresponding to the given key, or `None` if no
    /// such key exists in the binary search tree
    ///
    /// Time complexity: `O(depth)`
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BSTMap;
    ///
    /// let mut map = BSTMap::new();
    /// map.insert(1, "a").unwrap();
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current.take() {
            match key.cmp(node.key().borrow()) {
                Ordering::Less => current = node.left_mut(),
                Ordering::Greater => current = node.right_mut(),
                Ordering::Equal => return Some(node.value_mut()),
            }
        }

        None
    }

    /// Returns the parent of the node holding the given key
    ///
    /// Returns `None` both when the key belongs to the root (which has no parent) and when the key
    /// is not in the tree at all. Use [`parent_of`](Self::parent_of) to tell those cases apart.
    ///
    /// Only the keys of children are ever compared against `key`: at every node, the left child
    /// and then the right child are checked before descending. The left subtree is searched
    /// entirely before the right one.
    ///
    /// Time complexity: `O(n)` in the worst case, since the search does not use the key ordering
    /// to pick a side
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::bstmap;
    ///
    /// let map = bstmap! {
    ///     50 => (),
    ///     30 => (),
    ///     70 => (),
    ///     20 => (),
    /// };
    ///
    /// assert_eq!(map.get_parent(&20).map(|node| *node.key()), Some(30));
    /// assert_eq!(map.get_parent(&70).map(|node| *node.key()), Some(50));
    /// assert!(map.get_parent(&50).is_none());
    /// assert!(map.get_parent(&99).is_none());
    /// ```
    pub fn get_parent<Q>(&self, key: &Q) -> Option<&Node<K, V>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        NodesPreorder::new(self.root()).find(|node| node.is_parent_of(key))
    }

    /// Returns the parent of the node holding the given key, keeping "is the root" and "is
    /// missing" apart
    ///
    /// * `Ok(Some(parent))` if the key is in the tree below the root
    /// * `Ok(None)` if the key belongs to the root
    /// * `Err(KeyNotFound)` if the key is not in the tree (including when the tree is empty)
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{bstmap, KeyNotFound};
    ///
    /// let map = bstmap! { 2 => 'b', 1 => 'a' };
    ///
    /// assert_eq!(map.parent_of(&1).unwrap().map(|node| *node.key()), Some(2));
    /// assert!(map.parent_of(&2).unwrap().is_none());
    /// assert_eq!(map.parent_of(&3).unwrap_err(), KeyNotFound);
    /// ```
    pub fn parent_of<Q>(&self, key: &Q) -> Result<Option<&Node<K, V>>, KeyNotFound>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            return Err(KeyNotFound);
        }

        Ok(self.get_parent(key))
    }

    /// Inserts a new entry into the binary search tree
    ///
    /// Fails with [`DuplicateKey`] if the key is already present. In that case the tree is not
    /// modified and the given key and value are dropped.
    ///
    /// Time complexity: `O(depth)`
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{BSTMap, DuplicateKey};
    ///
    /// let mut map = BSTMap::new();
    /// assert_eq!(map.insert(37, "a"), Ok(()));
    /// assert_eq!(map.insert(37, "b"), Err(DuplicateKey));
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey> {
        let mut current = match self.root.as_deref_mut() {
            Some(root) => Some(root),
            None => {
                self.root = Some(Box::new(Node::new(key, value)));

                debug_assert_eq!(self.len, 0);
                self.len = 1;

                trace!(len = self.len, "inserted root");
                return Ok(());
            },
        };

        while let Some(node) = current.take() {
            match key.cmp(node.key()) {
                Ordering::Less => {
                    // Key not found, insert where we stopped
                    if !node.has_left() {
                        node.set_left(Node::new(key, value));
                        break;
                    }
                    current = node.left_mut();
                },

                Ordering::Greater => {
                    // Key not found, insert where we stopped
                    if !node.has_right() {
                        node.set_right(Node::new(key, value));
                        break;
                    }
                    current = node.right_mut();
                },

                Ordering::Equal => {
                    debug!(len = self.len, "insert rejected, key already present");
                    return Err(DuplicateKey);
                },
            }
        }

        self.len += 1;
        trace!(len = self.len, "inserted key");
        Ok(())
    }

    /// Removes a key from the map, returning the value that was stored at the key
    ///
    /// Fails with [`KeyNotFound`] if the key is not in the tree. In that case the tree is not
    /// modified.
    ///
    /// A node with at most one child is replaced in its parent by that child. A node with two
    /// children takes over the entry of its in-order successor (the smallest key in its right
    /// subtree), and the successor's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{BSTMap, KeyNotFound};
    ///
    /// let mut map = BSTMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.delete(&1), Ok("a"));
    /// assert_eq!(map.delete(&1), Err(KeyNotFound));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            debug!(len = self.len, "delete rejected, key not present");
            return Err(KeyNotFound);
        }

        let is_root = self.root().map_or(false, |root| key.cmp(root.key().borrow()).is_eq());
        let link = if is_root {
            &mut self.root
        } else {
            self.parent_mut(key)
                .and_then(|parent| parent.child_link_mut(key))
                .ok_or(KeyNotFound)?
        };

        let value = Self::remove_at(link).ok_or(KeyNotFound)?;
        self.len -= 1;
        trace!(len = self.len, root = is_root, "deleted key");

        Ok(value)
    }

    /// Clears the map, removing all elements
    ///
    /// The old nodes are released without recursion, however deep the tree is.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<'_, K, V> {
        IterPreorder::new(self.root())
    }

    /// Performs an in-order traversal of the tree
    ///
    /// Entries are yielded in strictly increasing key order.
    pub fn iter_inorder(&self) -> IterInorder<'_, K, V> {
        IterInorder::new(self.root())
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// The root is whichever node currently sits at the top: the first key inserted, unless that
    /// node has since been deleted or has taken over another entry during a deletion.
    ///
    /// This is a low-level API meant to be used for implementing traversals. For a guaranteed
    /// ordering, use [`iter_inorder`](Self::iter_inorder).
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{BSTMap, map::Node};
    ///
    /// // Recurse through left and right subtrees to find the depth of a key
    /// fn depth_of(node: Option<&Node<i32, ()>>, key: i32) -> Option<usize> {
    ///     let node = node?;
    ///     if *node.key() == key {
    ///         return Some(0);
    ///     }
    ///     depth_of(node.left(), key)
    ///         .or_else(|| depth_of(node.right(), key))
    ///         .map(|depth| depth + 1)
    /// }
    ///
    /// let mut map = BSTMap::new();
    /// map.insert(2, ()).unwrap();
    /// map.insert(1, ()).unwrap();
    /// map.insert(3, ()).unwrap();
    /// map.insert(4, ()).unwrap();
    ///
    /// assert_eq!(depth_of(map.root(), 4), Some(2));
    /// ```
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Mutable counterpart of `get_parent`, used to find the slot to splice during deletion
    ///
    /// Visits nodes in the same order as `get_parent`, so both always agree on the parent.
    fn parent_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut stack: Vec<&mut Node<K, V>> = self.root.as_deref_mut().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.is_parent_of(key) {
                return Some(node);
            }

            let (left, right) = node.children_mut();
            stack.extend(right);
            stack.extend(left);
        }

        None
    }

    /// Removes the node in `link` and returns its value
    fn remove_at(link: &mut Link<K, V>) -> Option<V> {
        let node = link.as_deref_mut()?;

        if node.has_left() && node.has_right() {
            trace!(case = "two_children", "removing node");
            // The successor has no left child, so detaching it is a plain splice
            let successor = Self::detach_leftmost(node.right_link_mut())?;
            let successor = *successor;
            let (key, value) = successor.into_inner();
            let (_, old_value) = node.replace_entry(key, value);
            return Some(old_value);
        }

        let case = if node.is_leaf() { "leaf" } else { "one_child" };
        trace!(case, "removing node");
        Self::splice_out(link).map(|node| (*node).into_inner().1)
    }

    /// Detaches the node with the smallest key in the subtree at `link`
    fn detach_leftmost(link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
        match *link {
            Some(ref mut node) if node.has_left() => Self::detach_leftmost(node.left_link_mut()),
            _ => Self::splice_out(link),
        }
    }

    /// Takes the node out of `link`, moving its only child (if any) into its place
    ///
    /// The node in `link` must not have two children.
    fn splice_out(link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
        let mut node = link.take()?;
        *link = node.take_only_child();
        Some(node)
    }
}

impl<K: Ord, V> Extend<(K, V)> for BSTMap<K, V> {
    /// Inserts every entry, skipping any whose key is already present
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            // The first entry for a key wins
            let _ = self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BSTMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
