//! An unbalanced binary search tree with parent lookup that does not need parent pointers
//!
//! Every node owns its children exclusively and nothing points back up the tree. To find the
//! parent of a key, [`BSTMap::get_parent`] walks down from the root and stops at the first node
//! with a child holding that key. Deletion uses the same walk to find the slot to splice.
//!
//! ```
//! use parent_bst::{BSTMap, KeyNotFound};
//!
//! let mut map = BSTMap::new();
//! for &key in &[50, 30, 70, 20, 40, 60, 80] {
//!     map.insert(key, key * 10).unwrap();
//! }
//!
//! assert_eq!(map.get_parent(&20).map(|node| *node.key()), Some(30));
//! assert!(map.get_parent(&50).is_none());
//!
//! // 30 has two children, so its node takes over the entry of its successor, 40
//! assert_eq!(map.delete(&30), Ok(300));
//! assert_eq!(map.get_parent(&20).map(|node| *node.key()), Some(40));
//! assert_eq!(map.delete(&30), Err(KeyNotFound));
//! ```

pub mod map;
mod error;

pub use error::{DuplicateKey, KeyNotFound, TreeError};
pub use map::BSTMap;

/// Builds a [`BSTMap`] from `key => value` pairs
///
/// Pairs are inserted in the order written. A repeated key keeps its first value.
#[macro_export(local_inner_macros)]
macro_rules! bstmap {
    // trailing comma case
    ($($key:expr => $value:expr,)+) => (bstmap!($($key => $value),+));

    ( $($key:expr => $value:expr),* ) => {
        {
            let mut _map = $crate::BSTMap::new();
            $(
                let _ = _map.insert($key, $value);
            )*
            _map
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bstmap_macro() {
        let map = bstmap! {
            2 => 3,
            1 => 2,
            3 => 4,
            2 => 99, // duplicate, trailing comma
        };

        let pairs: Vec<(_, _)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(1, 2), (2, 3), (3, 4)]);
        assert_eq!(map.root().map(|root| *root.key()), Some(2));

        // No trailing comma
        let map = bstmap![3 => 4];

        let pairs: Vec<(_, _)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(3, 4)]);

        // Zero items
        let map = bstmap!();

        let pairs: Vec<(i32, i32)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[]);
    }

    #[test]
    fn tree_error_from_operations() {
        fn shuffle(map: &mut BSTMap<i32, ()>) -> Result<(), TreeError> {
            map.insert(1, ())?;
            map.delete(&1)?;
            map.delete(&1)?;
            Ok(())
        }

        let mut map = BSTMap::new();
        assert_eq!(shuffle(&mut map), Err(TreeError::KeyNotFound(KeyNotFound)));

        map.insert(1, ()).unwrap();
        assert_eq!(shuffle(&mut map), Err(TreeError::DuplicateKey(DuplicateKey)));
    }
}
