use std::cmp::Ordering;

/// An ordering over `T` used by the heap. The heap keeps the *greatest*
/// element under this ordering at the root.
pub trait Compare<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    fn greater(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

/// The element's own `Ord`. A heap using it is a max-heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Compare<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of the element's `Ord`. A heap using it is a min-heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reversed;

impl<T: Ord> Compare<T> for Reversed {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

/// Orders elements with a closure.
///
/// ```
/// use heapkit_heap::{BinaryHeap, HeapConfig, OrderBy};
///
/// let mut heap = BinaryHeap::with_comparator(
///     OrderBy(|a: &i32, b: &i32| a.abs().cmp(&b.abs())),
///     HeapConfig::default(),
/// );
/// heap.insert(3);
/// heap.insert(-7);
/// heap.insert(5);
/// assert_eq!(heap.peek_max(), Ok(&-7));
/// ```
#[derive(Clone, Copy)]
pub struct OrderBy<F>(pub F);

impl<T, F> Compare<T> for OrderBy<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}
