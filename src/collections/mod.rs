//! Ordered model collections
//!
//! This module provides [`OrderedStore`], the sorted associative container
//! behind the membership registry. Items are kept in a `Vec` sorted by a key
//! extracted from each item, and every lookup is a binary search. Ordering
//! comes from a pluggable [`KeyComparator`]; two keys are the same key when
//! neither is less than the other, so the comparator is the only source of
//! equality.

use std::fmt;

use log::debug;

use crate::common::traits::OrderedCollection;
use crate::models::EntityModel;

/// Strict weak ordering over keys
pub trait KeyComparator<K: ?Sized> {
    /// Whether `a` orders strictly before `b`
    fn less(&self, a: &K, b: &K) -> bool;

    /// Whether neither key orders before the other
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// The natural `Ord` ordering of the key type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> KeyComparator<K> for NaturalOrder {
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Ordering given by a `less` closure
#[derive(Clone, Copy)]
pub struct FnOrder<F>(pub F);

impl<F> fmt::Debug for FnOrder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnOrder")
    }
}

impl<K: ?Sized, F> KeyComparator<K> for FnOrder<F>
where
    F: Fn(&K, &K) -> bool,
{
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

/// Sorted associative container keyed by an extracted key
///
/// Items live in a single sorted `Vec`; insert and remove shift the tail,
/// lookups and range bounds are `O(log n)` binary searches.
pub struct OrderedStore<T, K: ?Sized, C = NaturalOrder> {
    /// Items in key order
    items: Vec<T>,
    /// Key extractor
    key_fn: fn(&T) -> &K,
    /// Key ordering
    comparator: C,
}

impl<T, K: ?Sized, C> OrderedStore<T, K, C>
where
    C: KeyComparator<K>,
{
    /// Create an empty store with the default comparator
    #[must_use]
    pub fn new(key_fn: fn(&T) -> &K) -> Self
    where
        C: Default,
    {
        Self::with_comparator(key_fn, C::default())
    }

    /// Create an empty store with an explicit comparator
    #[must_use]
    pub const fn with_comparator(key_fn: fn(&T) -> &K, comparator: C) -> Self {
        Self {
            items: Vec::new(),
            key_fn,
            comparator,
        }
    }

    /// Index of the first item whose key is not less than `key`
    fn lower_bound(&self, key: &K) -> usize {
        self.items
            .partition_point(|item| self.comparator.less((self.key_fn)(item), key))
    }

    /// Index of the first item whose key is greater than `key`
    fn upper_bound(&self, key: &K) -> usize {
        self.items
            .partition_point(|item| !self.comparator.less(key, (self.key_fn)(item)))
    }

    /// Index of the item stored under `key`
    fn position(&self, key: &K) -> Option<usize> {
        let index = self.lower_bound(key);
        self.items
            .get(index)
            .filter(|&item| self.comparator.equivalent((self.key_fn)(item), key))
            .map(|_| index)
    }

    /// Items whose keys lie in `[start, end]` as a contiguous slice
    #[must_use]
    pub fn range_slice(&self, start: &K, end: &K) -> &[T] {
        if self.comparator.less(end, start) {
            return &[];
        }
        let low = self.lower_bound(start);
        let high = self.upper_bound(end);
        &self.items[low..high]
    }

    /// Iterate over the items in key order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The items in key order
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// The items in key order, open for in-place field updates
    ///
    /// Changing an item's key through this slice breaks the ordering.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether every key orders strictly before the next under the comparator
    #[must_use]
    pub fn is_strictly_ordered(&self) -> bool {
        self.items
            .windows(2)
            .all(|pair| self.comparator.less((self.key_fn)(&pair[0]), (self.key_fn)(&pair[1])))
    }
}

impl<T: EntityModel> OrderedStore<T, T::Id, NaturalOrder> {
    /// Create an empty store keyed by the model's identifier
    #[must_use]
    pub fn for_entities() -> Self {
        Self::new(T::id)
    }
}

impl<T: EntityModel> Default for OrderedStore<T, T::Id, NaturalOrder> {
    fn default() -> Self {
        Self::for_entities()
    }
}

impl<T: Clone, K: ?Sized, C: Clone> Clone for OrderedStore<T, K, C> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            key_fn: self.key_fn,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T, K: ?Sized, C> fmt::Debug for OrderedStore<T, K, C>
where
    T: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedStore")
            .field("items", &self.items)
            .field("comparator", &self.comparator)
            .finish_non_exhaustive()
    }
}

impl<T, K: ?Sized, C> OrderedCollection<T> for OrderedStore<T, K, C>
where
    C: KeyComparator<K>,
{
    type Key = K;

    fn insert(&mut self, item: T) -> bool {
        let index = {
            let key = (self.key_fn)(&item);
            let index = self.lower_bound(key);
            if self
                .items
                .get(index)
                .is_some_and(|existing| self.comparator.equivalent((self.key_fn)(existing), key))
            {
                None
            } else {
                Some(index)
            }
        };

        match index {
            Some(index) => {
                self.items.insert(index, item);
                true
            }
            None => {
                debug!("Ignoring insert of an item whose key is already stored");
                false
            }
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    fn search(&mut self, key: &K) -> Option<&mut T> {
        let index = self.position(key)?;
        self.items.get_mut(index)
    }

    fn get(&self, key: &K) -> Option<&T> {
        self.position(key).map(|index| &self.items[index])
    }

    fn range(&self, start: &K, end: &K) -> Vec<&T> {
        self.range_slice(start, end).iter().collect()
    }

    fn all_values(&mut self) -> Vec<&mut T> {
        self.items.iter_mut().collect()
    }

    fn values(&self) -> Vec<&T> {
        self.items.iter().collect()
    }

    fn size(&self) -> usize {
        self.items.len()
    }
}

impl<'a, T, K: ?Sized, C> IntoIterator for &'a OrderedStore<T, K, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
