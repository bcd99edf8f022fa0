//! A local cell stream engine.
//!
//! The engine applies transformers and selectors to every cell independently,
//! optionally spread over several worker threads. The external value is
//! shared by reference between all workers and never mutated. Output keeps
//! the order of the input cells.

use std::panic;
use std::thread;

use tracing::debug;

use crate::cell::Cell;
use crate::position::{ExpandablePosition, Position};
use crate::sample::SelectorWithValue;
use crate::schema::Schema;
use crate::transform::{ExpandingTransformerWithValue, TransformerWithValue};

#[derive(Clone, Debug)]
pub struct Engine {
    workers: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Engine {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Decodes raw `(position, text)` rows into cells, dropping every row the
    /// schema does not accept.
    pub fn materialize<P: Position>(
        &self,
        rows: impl IntoIterator<Item = (P, String)>,
        schema: &Schema,
    ) -> Vec<Cell<P>> {
        let mut rejected = 0usize;
        let cells: Vec<Cell<P>> = rows
            .into_iter()
            .filter_map(|(position, text)| match schema.decode(&text) {
                Some(content) => Some(Cell::new(position, content)),
                None => {
                    rejected += 1;
                    None
                }
            })
            .collect();
        debug!(schema = %schema, decoded = cells.len(), rejected, "materialized cells");
        cells
    }

    pub fn present<P, W, T>(&self, cells: &[Cell<P>], transformer: &T, ext: &W) -> Vec<Cell<P>>
    where
        P: Position,
        W: ?Sized + Sync,
        T: TransformerWithValue<P, W> + Sync,
    {
        let presented = self.run(cells, |cell| transformer.present_with_value(cell, ext));
        debug!(input = cells.len(), output = presented.len(), "presented cells");
        presented
    }

    pub fn expand<P, W, T>(&self, cells: &[Cell<P>], transformer: &T, ext: &W) -> Vec<Cell<P::Expanded>>
    where
        P: ExpandablePosition,
        W: ?Sized + Sync,
        T: ExpandingTransformerWithValue<P, W> + Sync,
    {
        let expanded = self.run(cells, |cell| {
            transformer.present_expanded_with_value(cell, ext)
        });
        debug!(input = cells.len(), output = expanded.len(), "expanded cells");
        expanded
    }

    /// Selects on the calling thread with a single selector, which may own
    /// state such as a random generator.
    pub fn select<P, W, S>(&self, cells: &[Cell<P>], selector: &S, ext: &W) -> Vec<Cell<P>>
    where
        P: Position,
        W: ?Sized,
        S: SelectorWithValue<P, W>,
    {
        let selected: Vec<Cell<P>> = cells
            .iter()
            .filter(|cell| selector.select_with_value(cell, ext))
            .cloned()
            .collect();
        debug!(input = cells.len(), output = selected.len(), "selected cells");
        selected
    }

    /// Selects on all workers, each with its own selector made by `make` from
    /// the worker's index.
    pub fn select_per_worker<P, W, S, F>(&self, cells: &[Cell<P>], make: F, ext: &W) -> Vec<Cell<P>>
    where
        P: Position,
        W: ?Sized + Sync,
        S: SelectorWithValue<P, W>,
        F: Fn(usize) -> S + Sync,
    {
        let selected: Vec<Cell<P>> = self.scatter(cells, |worker, chunk| {
            let selector = make(worker);
            chunk
                .iter()
                .filter(|cell| selector.select_with_value(cell, ext))
                .cloned()
                .collect()
        });
        debug!(input = cells.len(), output = selected.len(), workers = self.workers, "selected cells");
        selected
    }

    fn run<P, Q, F>(&self, cells: &[Cell<P>], f: F) -> Vec<Cell<Q>>
    where
        P: Position,
        Q: Position,
        F: Fn(&Cell<P>) -> Vec<Cell<Q>> + Sync,
    {
        self.scatter(cells, |_, chunk| chunk.iter().flat_map(&f).collect())
    }

    // Splits the cells into one chunk per worker and concatenates the results
    // in chunk order. A fault in a worker is resumed on the calling thread.
    fn scatter<P, Q, F>(&self, cells: &[Cell<P>], f: F) -> Vec<Cell<Q>>
    where
        P: Position,
        Q: Position,
        F: Fn(usize, &[Cell<P>]) -> Vec<Cell<Q>> + Sync,
    {
        if self.workers == 1 || cells.len() < 2 {
            return f(0, cells);
        }
        let size = cells.len().div_ceil(self.workers);
        thread::scope(|scope| {
            let handles: Vec<_> = cells
                .chunks(size)
                .enumerate()
                .map(|(worker, chunk)| {
                    let f = &f;
                    scope.spawn(move || f(worker, chunk))
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|fault| panic::resume_unwind(fault)))
                .collect()
        })
    }
}
