use std::rc::Rc;

use heapkit_heap::*;
use pretty_assertions::assert_eq;

fn heap_of(values: &[Rc<i32>], clear_removed_indices: bool) -> BinaryMaxHeap<Rc<i32>> {
    let config = HeapConfig::default().clear_removed_indices(clear_removed_indices);
    let mut heap = BinaryMaxHeap::with_config(config);
    heap.extend(values.iter().cloned());
    heap
}

fn strong_counts(values: &[Rc<i32>]) -> Vec<usize> {
    values.iter().map(Rc::strong_count).collect()
}

#[test]
fn test_remove_max_hands_out_ownership() {
    for &compact in &[false, true] {
        let values: Vec<Rc<i32>> = (0..50).map(Rc::new).collect();
        let mut heap = heap_of(&values, compact);
        assert_eq!(strong_counts(&values), vec![2; 50]);

        while let Ok(value) = heap.remove_max() {
            drop(value);
        }

        assert!(heap.is_empty());
        assert_eq!(heap.retired_len(), 0);
        assert_eq!(strong_counts(&values), vec![1; 50]);
    }
}

#[test]
fn test_clear_without_compaction_retires_values() {
    let values: Vec<Rc<i32>> = (0..3).map(Rc::new).collect();
    let mut heap = heap_of(&values, false);

    heap.clear();
    assert!(heap.is_empty());
    assert_eq!(heap.retired_len(), 3);
    assert_eq!(strong_counts(&values), vec![2, 2, 2]);

    // Inserting overwrites the first retired slot.
    heap.insert(Rc::new(100));
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.retired_len(), 2);
    assert_eq!(strong_counts(&values).iter().sum::<usize>(), 5);
    assert_eq!(heap.peek_max().map(|v| **v), Ok(100));

    heap.shrink_to_fit();
    assert_eq!(heap.retired_len(), 0);
    assert_eq!(strong_counts(&values), vec![1, 1, 1]);
}

#[test]
fn test_clear_with_compaction_drops_values() {
    let values: Vec<Rc<i32>> = (0..3).map(Rc::new).collect();
    let mut heap = heap_of(&values, true);

    heap.clear();
    assert!(heap.is_empty());
    assert_eq!(heap.retired_len(), 0);
    assert_eq!(strong_counts(&values), vec![1, 1, 1]);
}

#[test]
fn test_remove_item_and_retain() {
    let values: Vec<Rc<i32>> = (0..6).map(Rc::new).collect();

    let mut heap = heap_of(&values, false);
    assert!(heap.remove_item(&values[2]));
    assert!(heap.retain(|v| **v % 2 == 0));
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.retired_len(), 4);
    assert_eq!(strong_counts(&values), vec![2; 6]);
    drop(heap);
    assert_eq!(strong_counts(&values), vec![1; 6]);

    let mut heap = heap_of(&values, true);
    assert!(heap.remove_item(&values[2]));
    assert!(heap.retain(|v| **v % 2 == 0));
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.retired_len(), 0);
    assert_eq!(strong_counts(&values), vec![2, 1, 1, 1, 2, 1]);
}

#[test]
fn test_compaction_releases_capacity() {
    let mut heap = BinaryMaxHeap::with_config(HeapConfig::default().clear_removed_indices(true));
    heap.extend(0..1000);
    let grown = heap.capacity();
    assert!(grown >= 1000);

    while heap.remove_max().is_ok() {}
    assert!(heap.capacity() < grown);

    let mut heap = BinaryMaxHeap::with_config(HeapConfig::default());
    heap.extend(0..1000);
    let grown = heap.capacity();
    while heap.remove_max().is_ok() {}
    assert_eq!(heap.capacity(), grown);
}
