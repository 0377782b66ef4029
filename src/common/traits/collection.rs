//! Standardized ordered collection trait
//!
//! This module defines the sorted-access contract shared by the stores that
//! hold individuals and groups: unique keys, ordered iteration, point lookup
//! and inclusive range scans. The backing structure is left to implementors.

/// Core trait for ordered, uniquely keyed collections
pub trait OrderedCollection<T> {
    /// The key items are ordered and looked up by
    type Key: ?Sized;

    /// Insert an item in key order
    ///
    /// If an item with an equivalent key is already stored, nothing changes
    /// and `false` is returned. Callers wanting an error check first.
    fn insert(&mut self, item: T) -> bool;

    /// Remove the item with the given key, reporting whether one was removed
    fn remove(&mut self, key: &Self::Key) -> bool;

    /// Get a mutable handle to the item with the given key
    fn search(&mut self, key: &Self::Key) -> Option<&mut T>;

    /// Get the item with the given key
    fn get(&self, key: &Self::Key) -> Option<&T>;

    /// Items whose keys lie in `[start, end]`, in key order
    fn range(&self, start: &Self::Key, end: &Self::Key) -> Vec<&T>;

    /// Every item in key order, open for in-place field updates
    ///
    /// Callers must not change the key of an item through this view.
    fn all_values(&mut self) -> Vec<&mut T>;

    /// Every item in key order
    fn values(&self) -> Vec<&T>;

    /// Count the items in the collection
    fn size(&self) -> usize;

    /// Check if the collection holds an item with the given key
    fn contains(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Check if the collection is empty
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Insert multiple items, returning how many were actually added
    fn insert_all<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        items
            .into_iter()
            .map(|item| self.insert(item))
            .filter(|&inserted| inserted)
            .count()
    }
}
