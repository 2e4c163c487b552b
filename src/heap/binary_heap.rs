use std::fmt;

use crate::{
    compare::{Compare, Natural, Reversed},
    config::HeapConfig,
    error::HeapError,
    tree_view,
};

/// A heap which keeps the greatest element (by `Ord`) at the root.
pub type BinaryMaxHeap<T> = BinaryHeap<T, Natural>;
/// A heap which keeps the smallest element (by `Ord`) at the root.
pub type BinaryMinHeap<T> = BinaryHeap<T, Reversed>;

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// An array-backed binary heap ordered by `C`.
///
/// The element which is the greatest under `C` sits at index 0 and every
/// node is greater than or equal to its children. With [`Natural`] this is a
/// max-heap; [`Reversed`] turns it into a min-heap.
///
/// Values the heap throws away without handing them back to the caller
/// (`clear`, `retain`, `remove_item`, ...) are kept in *retired* slots
/// behind the live ones until a later `insert` overwrites them, unless
/// [`HeapConfig::clear_removed_indices`] is set.
#[derive(Clone)]
pub struct BinaryHeap<T, C = Natural> {
    /// `slots[..size]` are live elements. The rest are retired values.
    slots: Vec<T>,
    size: usize,
    cmp: C,
    config: HeapConfig,
}

impl<T, C: Compare<T> + Default> BinaryHeap<T, C> {
    pub fn new() -> BinaryHeap<T, C> {
        BinaryHeap::with_config(HeapConfig::default())
    }

    pub fn with_config(config: HeapConfig) -> BinaryHeap<T, C> {
        BinaryHeap::with_comparator(C::default(), config)
    }

    /// Turns `vec` into a heap in place.
    ///
    /// # Complexity
    ///
    /// Runs in O(N) time.
    pub fn from_vec(vec: Vec<T>) -> BinaryHeap<T, C> {
        BinaryHeap::from_vec_with(C::default(), HeapConfig::default(), vec)
    }
}

impl<T, C: Compare<T>> BinaryHeap<T, C> {
    pub fn with_comparator(cmp: C, config: HeapConfig) -> BinaryHeap<T, C> {
        BinaryHeap {
            slots: Vec::with_capacity(config.initial_capacity),
            size: 0,
            cmp,
            config,
        }
    }

    pub fn from_vec_with(cmp: C, config: HeapConfig, vec: Vec<T>) -> BinaryHeap<T, C> {
        let size = vec.len();
        let mut heap = BinaryHeap {
            slots: vec,
            size,
            cmp,
            config,
        };
        heap.rebuild();
        heap
    }

    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots the backing storage can hold without
    /// reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of discarded values still held by the backing
    /// storage. Always zero with `clear_removed_indices`.
    pub fn retired_len(&self) -> usize {
        self.slots.len() - self.size
    }

    /// Returns the live elements in storage (level) order.
    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.size]
    }

    /// Iterates over the live elements in storage order, which is not sorted.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Adds `value` and restores the heap order by sifting it up.
    ///
    /// # Complexity
    ///
    /// Runs in O(log N) time (amortized when the storage grows).
    pub fn insert(&mut self, value: T) {
        if self.size < self.slots.len() {
            // Overwrite the first retired slot. Its stale value is dropped here.
            self.slots[self.size] = value;
        } else {
            if self.slots.len() == self.slots.capacity() {
                trace!(
                    "heap storage is full, growing: capacity={}",
                    self.slots.capacity()
                );
            }
            self.slots.push(value);
        }

        self.size += 1;
        self.sift_up(self.size - 1);
    }

    /// Returns the greatest element without removing it.
    pub fn peek_max(&self) -> Result<&T, HeapError> {
        self.as_slice().first().ok_or(HeapError::Empty)
    }

    /// Removes and returns the greatest element.
    ///
    /// The last live element is moved to the root and sifted down. When
    /// both children of a node are equal and greater than the node, the
    /// left one is chosen.
    ///
    /// # Complexity
    ///
    /// Runs in O(log N) time.
    pub fn remove_max(&mut self) -> Result<T, HeapError> {
        if self.is_empty() {
            return Err(HeapError::Empty);
        }

        Ok(self.take(0))
    }

    /// Removes and returns the live element at `index` (storage order).
    ///
    /// # Complexity
    ///
    /// Runs in O(log N) time.
    pub fn remove_at(&mut self, index: usize) -> Result<T, HeapError> {
        if self.is_empty() {
            return Err(HeapError::Empty);
        }

        if index >= self.size {
            return Err(HeapError::IndexOutOfBounds {
                index,
                len: self.size,
            });
        }

        Ok(self.take(index))
    }

    /// Removes the first occurrence of `item`. Returns `false` if there's
    /// no such element.
    ///
    /// # Complexity
    ///
    /// Runs in O(N) time.
    pub fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(item) {
            Some(index) => {
                let removed = self.take(index);
                self.retire(removed);
                true
            }
            None => false,
        }
    }

    /// Removes the first occurrence of each of `items`. Returns `true` if
    /// at least one element has been removed.
    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: PartialEq + 'a,
    {
        let mut modified = false;
        for item in items {
            if self.remove_item(item) {
                modified = true;
            }
        }
        modified
    }

    /// Keeps only the elements for which `keep` returns `true`. Returns
    /// `true` if at least one element has been removed.
    ///
    /// # Complexity
    ///
    /// Runs in O(N) time.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.size;
        let mut i = 0;
        while i < self.size {
            if keep(&self.slots[i]) {
                i += 1;
            } else {
                // Move it right behind the live elements; it becomes retired.
                self.size -= 1;
                self.slots.swap(i, self.size);
            }
        }

        if self.size == before {
            return false;
        }

        self.rebuild();
        if self.config.clear_removed_indices {
            self.compact();
        }

        true
    }

    /// Removes all elements. Without `clear_removed_indices` the values
    /// stay in the storage as retired slots.
    pub fn clear(&mut self) {
        self.size = 0;
        if self.config.clear_removed_indices {
            self.compact();
        }
    }

    /// Drops retired values and releases unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.slots.truncate(self.size);
        self.slots.shrink_to_fit();
    }

    pub fn reserve(&mut self, additional: usize) {
        let retired = self.retired_len();
        self.slots.reserve(additional.saturating_sub(retired));
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Returns the storage index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|value| value == item)
    }

    /// Returns the storage index of the last element equal to `item`.
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().rposition(|value| value == item)
    }

    /// Consumes the heap and returns its elements from the greatest to the
    /// smallest.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.size);
        sorted.extend(self.drain_sorted());
        sorted
    }

    /// Removes elements from the greatest to the smallest as they're
    /// iterated. Elements not yielded stay in the heap.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, C> {
        DrainSorted { heap: self }
    }

    /// Returns the number of layers of the tree.
    pub fn height(&self) -> usize {
        tree_view::height(self.size)
    }

    /// Returns the elements on the `y`-th layer (the root is layer 0).
    pub fn layer(&self, y: usize) -> &[T] {
        tree_view::layer(self.as_slice(), y)
    }

    pub fn to_tree_string(&self) -> String
    where
        T: fmt::Display,
    {
        tree_view::render(self.as_slice())
    }

    /// Removes the live element at `index`. The caller checks the bounds.
    fn take(&mut self, index: usize) -> T {
        let last = self.size - 1;
        self.slots.swap(index, last);
        self.size = last;
        // The hole is filled with the last retired value, if any.
        let removed = self.slots.swap_remove(last);

        if index < last && self.sift_up(index) == index {
            self.sift_down(index);
        }

        if self.config.clear_removed_indices {
            self.compact();
        }

        removed
    }

    fn retire(&mut self, value: T) {
        if !self.config.clear_removed_indices {
            self.slots.push(value);
        }
    }

    fn compact(&mut self) {
        self.slots.truncate(self.size);

        let floor = self.size.max(self.config.initial_capacity);
        if self.slots.capacity() > floor.saturating_mul(4) {
            debug!(
                "compacting heap storage: capacity={}, size={}",
                self.slots.capacity(),
                self.size
            );
            self.slots.shrink_to(floor.saturating_mul(2));
        }
    }

    fn rebuild(&mut self) {
        if self.size < 2 {
            return;
        }

        for i in (0..=parent(self.size - 1)).rev() {
            self.sift_down(i);
        }
    }

    /// Returns the index where the element ended up.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = parent(index);
            if !self.cmp.greater(&self.slots[index], &self.slots[parent]) {
                break;
            }

            self.slots.swap(index, parent);
            index = parent;
        }

        index
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = left_child(index);
            if left >= self.size {
                break;
            }

            // Ties go to the left child.
            let right = left + 1;
            let child =
                if right < self.size && self.cmp.greater(&self.slots[right], &self.slots[left]) {
                    right
                } else {
                    left
                };

            if !self.cmp.greater(&self.slots[child], &self.slots[index]) {
                break;
            }

            self.slots.swap(index, child);
            index = child;
        }
    }
}

impl<T, C: Compare<T> + Default> Default for BinaryHeap<T, C> {
    fn default() -> BinaryHeap<T, C> {
        BinaryHeap::new()
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for BinaryHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> BinaryHeap<T, C> {
        BinaryHeap::from_vec(iter.into_iter().collect())
    }
}

impl<T, C: Compare<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, C: Compare<T>> IntoIterator for &'a BinaryHeap<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> std::slice::Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("heap", &&self.slots[..self.size])
            .field("size", &self.size)
            .field("retired", &(self.slots.len() - self.size))
            .finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryHeap{{heap=[")?;
        for (i, value) in self.slots[..self.size].iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "], size={}}}", self.size)
    }
}

pub struct DrainSorted<'a, T, C: Compare<T>> {
    heap: &'a mut BinaryHeap<T, C>,
}

impl<'a, T, C: Compare<T>> Iterator for DrainSorted<'a, T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.remove_max().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<'a, T, C: Compare<T>> ExactSizeIterator for DrainSorted<'a, T, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index_arithmetic() {
        assert_eq!(parent(1), 0);
        assert_eq!(parent(2), 0);
        assert_eq!(parent(5), 2);
        assert_eq!(parent(6), 2);
        assert_eq!(left_child(0), 1);
        assert_eq!(left_child(2), 5);
    }

    #[test]
    fn test_sift_down_prefers_left_child_on_ties() {
        // Root 1 with two equal children: the left one must be promoted.
        let mut heap: BinaryMaxHeap<(i32, char)> = BinaryHeap::with_comparator(
            Natural,
            HeapConfig::default(),
        );
        heap.slots = vec![(1, 'r'), (5, 'a'), (5, 'a')];
        heap.size = 3;
        heap.sift_down(0);
        assert_eq!(heap.as_slice(), &[(5, 'a'), (1, 'r'), (5, 'a')]);

        let mut heap = BinaryHeap::with_comparator(
            crate::compare::OrderBy(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0)),
            HeapConfig::default(),
        );
        heap.slots = vec![(1, 'r'), (5, 'L'), (5, 'R')];
        heap.size = 3;
        heap.sift_down(0);
        assert_eq!(heap.as_slice(), &[(5, 'L'), (1, 'r'), (5, 'R')]);
    }

    #[test]
    fn test_take_fills_hole_with_retired_value() {
        let mut heap = BinaryMaxHeap::new();
        heap.extend([4, 3, 2, 1]);
        assert!(heap.remove_item(&2));
        assert_eq!(heap.retired_len(), 1);
        assert_eq!(heap.remove_max(), Ok(4));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.retired_len(), 1);
        assert_eq!(heap.slots[2], 2);
    }
}
