use serde::Deserialize;

pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Per-heap settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeapConfig {
    /// Drop values the heap discards (by `clear`, `retain`, `remove_item`,
    /// ...) right away and release spare storage after removals, instead of
    /// keeping them in retired slots until a later insert overwrites them.
    pub clear_removed_indices: bool,
    /// Number of slots reserved when the heap is created.
    pub initial_capacity: usize,
}

impl HeapConfig {
    pub fn clear_removed_indices(mut self, enabled: bool) -> HeapConfig {
        self.clear_removed_indices = enabled;
        self
    }

    pub fn initial_capacity(mut self, capacity: usize) -> HeapConfig {
        self.initial_capacity = capacity;
        self
    }
}

impl Default for HeapConfig {
    fn default() -> HeapConfig {
        HeapConfig {
            clear_removed_indices: false,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
