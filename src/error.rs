use thiserror::Error;

/// Returned by [`BSTMap::insert`](crate::BSTMap::insert) when the key is already in the tree
///
/// The tree is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("key is already present in the tree")]
pub struct DuplicateKey;

/// Returned by operations that require an existing key, such as
/// [`BSTMap::delete`](crate::BSTMap::delete), when no node holds that key
///
/// An empty tree reports this error as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("key is not present in the tree")]
pub struct KeyNotFound;

/// Any error produced by a tree operation
///
/// Useful when a single function both inserts and deletes and wants to use `?` on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TreeError {
    #[error(transparent)]
    DuplicateKey(#[from] DuplicateKey),
    #[error(transparent)]
    KeyNotFound(#[from] KeyNotFound),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(DuplicateKey.to_string(), "key is already present in the tree");
        assert_eq!(KeyNotFound.to_string(), "key is not present in the tree");
        assert_eq!(TreeError::from(KeyNotFound).to_string(), KeyNotFound.to_string());
    }

    #[test]
    fn question_mark_converts() {
        fn insert() -> Result<(), DuplicateKey> {
            Err(DuplicateKey)
        }

        fn delete() -> Result<(), KeyNotFound> {
            Err(KeyNotFound)
        }

        fn fails_on_insert() -> Result<(), TreeError> {
            insert()?;
            delete()?;
            Ok(())
        }

        fn fails_on_delete() -> Result<(), TreeError> {
            delete()?;
            insert()?;
            Ok(())
        }

        assert_eq!(fails_on_insert(), Err(TreeError::DuplicateKey(DuplicateKey)));
        assert_eq!(fails_on_delete(), Err(TreeError::KeyNotFound(KeyNotFound)));
    }
}
