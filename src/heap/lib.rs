#[macro_use]
extern crate log;

pub mod binary_heap;
pub mod compare;
pub mod config;
pub mod error;
pub mod tree_view;

pub use binary_heap::{BinaryHeap, BinaryMaxHeap, BinaryMinHeap};
pub use compare::{Compare, Natural, OrderBy, Reversed};
pub use config::HeapConfig;
pub use error::HeapError;
