//! A generic ordered collection.
//!
//! [`OrderedCollection`] keeps items in insertion order and supports the
//! positional edits list editors need: add, remove, move and update by
//! index.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An ordered list of items addressed by position.
///
/// # Example
///
/// ```
/// use tariff_engine::catalog::OrderedCollection;
///
/// let mut items = OrderedCollection::new();
/// items.add("a");
/// items.add("b");
/// items.add("c");
/// items.move_at(2, 0).unwrap();
/// assert_eq!(items.iter().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrderedCollection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item and returns its index.
    pub fn add(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Removes and returns the item at `index`, shifting later items down.
    pub fn remove_at(&mut self, index: usize) -> EngineResult<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Moves the item at `from` so that it ends up at index `to`.
    pub fn move_at(&mut self, from: usize, to: usize) -> EngineResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        Ok(())
    }

    /// Applies `update` to the item at `index`.
    ///
    /// If `update` fails the item is left as it was.
    pub fn update_at<F>(&mut self, index: usize, update: F) -> EngineResult<()>
    where
        F: FnOnce(&mut T) -> EngineResult<()>,
        T: Clone,
    {
        self.check_index(index)?;
        let mut candidate = self.items[index].clone();
        update(&mut candidate)?;
        self.items[index] = candidate;
        Ok(())
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the index of the first item matching `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn check_index(&self, index: usize) -> EngineResult<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(EngineError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<T> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
