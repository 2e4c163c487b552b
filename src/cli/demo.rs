use std::{cell::Cell, io::Write, rc::Rc};

use anyhow::Result;
use heapkit_common::{logger::OopsExt, time_report::TimeReport};
use heapkit_events::Property;
use heapkit_heap::{BinaryHeap, Compare, HeapConfig, Natural, Reversed};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub struct DemoOptions {
    pub count: usize,
    pub seed: Option<u64>,
    pub min: bool,
    pub tree: bool,
    pub heap: HeapConfig,
}

#[derive(Debug)]
pub struct Summary {
    /// Values in the order `remove_max` returned them.
    pub drained: Vec<i64>,
    /// How many times the root changed while filling and draining.
    pub root_changes: usize,
}

/// Fills a heap with `count` random numbers, printing it after each insert,
/// drains it, and inserts one more number into the emptied heap.
pub fn run(opts: &DemoOptions, out: &mut impl Write) -> Result<Summary> {
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if opts.min {
        drive(BinaryHeap::with_comparator(Reversed, opts.heap), &mut rng, opts, out)
    } else {
        drive(BinaryHeap::with_comparator(Natural, opts.heap), &mut rng, opts, out)
    }
}

fn drive<C: Compare<i64>>(
    mut heap: BinaryHeap<i64, C>,
    rng: &mut StdRng,
    opts: &DemoOptions,
    out: &mut impl Write,
) -> Result<Summary> {
    let report = TimeReport::new("demo");

    let root_changes = Rc::new(Cell::new(0));
    let mut root = Property::new(None);
    {
        let root_changes = root_changes.clone();
        root.listeners_mut()
            .register_fn("count", move |old: &Option<i64>, new: &Option<i64>| {
                trace!("root: {:?} -> {:?}", old, new);
                root_changes.set(root_changes.get() + 1);
                Ok(false)
            });
    }

    writeln!(out, "heap -1 = {}", heap)?;
    for i in 0..opts.count {
        heap.insert(rng.gen());
        root.set(heap.peek_max().ok().copied()).oops();
        writeln!(out, "heap {:>2} = {}", i, heap)?;
        if opts.tree {
            write!(out, "{}", heap.to_tree_string())?;
        }
    }

    writeln!(out)?;
    let mut drained = Vec::with_capacity(heap.len());
    while let Ok(value) = heap.remove_max() {
        root.set(heap.peek_max().ok().copied()).oops();
        writeln!(out, "{}", value)?;
        writeln!(out, "heap = {}", heap)?;
        drained.push(value);
    }

    writeln!(out)?;
    writeln!(out, "heap = {:?}", heap)?;
    heap.insert(rng.gen());
    writeln!(out, "heap = {}", heap)?;

    report.report();
    Ok(Summary {
        drained,
        root_changes: root_changes.get(),
    })
}
