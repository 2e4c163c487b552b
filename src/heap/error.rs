use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek_max` or `remove_max` was called on a heap without live elements.
    #[error("heap is empty")]
    Empty,
    #[error("index {index} is out of bounds (heap size is {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}
