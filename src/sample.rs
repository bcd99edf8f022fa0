//! Selectors: keep or drop a cell, optionally looking at an external value.
//!
//! Selectors share the two value axes of the transformer algebra but never
//! change the rank of a cell. Wrap a [`Selector`] in [`Lifted`] to use it as a
//! [`SelectorWithValue`].

// the generator is owned by exactly one execution context, hence not Sync
use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::cell::{Aggregates, Cell};
use crate::error::{CellError, Result};
use crate::position::{Dimension, Position, Position1D};
use crate::transform::Lifted;

pub trait Selector<P: Position> {
    fn select(&self, cell: &Cell<P>) -> bool;
}

pub trait SelectorWithValue<P: Position, W: ?Sized> {
    fn select_with_value(&self, cell: &Cell<P>, ext: &W) -> bool;
}

impl<P: Position, W: ?Sized, S: Selector<P>> SelectorWithValue<P, W> for Lifted<S> {
    fn select_with_value(&self, cell: &Cell<P>, _ext: &W) -> bool {
        self.inner().select(cell)
    }
}

// ------------- RandomSample -------------
/// Keeps each cell with probability `ratio`.
///
/// The generator is not shared: every concurrent worker needs its own
/// instance, which the missing `Sync` enforces.
#[derive(Debug)]
pub struct RandomSample {
    ratio: f64,
    rng: RefCell<StdRng>,
}

impl RandomSample {
    /// The ratio is clamped to `[0, 1]`.
    pub fn new(ratio: f64) -> Self {
        Self::with_rng(ratio, StdRng::from_entropy())
    }
    pub fn with_seed(ratio: f64, seed: u64) -> Self {
        Self::with_rng(ratio, StdRng::seed_from_u64(seed))
    }
    fn with_rng(ratio: f64, rng: StdRng) -> Self {
        let ratio = if ratio.is_nan() { 0. } else { ratio.clamp(0., 1.) };
        Self {
            ratio,
            rng: RefCell::new(rng),
        }
    }
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl<P: Position> Selector<P> for RandomSample {
    fn select(&self, _cell: &Cell<P>) -> bool {
        self.rng.borrow_mut().gen_range(0.0..1.0) < self.ratio
    }
}

// ------------- HashSample -------------
/// Keeps a cell when the stable hash of its coordinate at `dim`, modulo
/// `base`, is below `ratio`. The same coordinates are kept on every run.
#[derive(Clone, Debug)]
pub struct HashSample {
    dim: Dimension,
    ratio: u64,
    base: u64,
}

impl HashSample {
    pub fn new(dim: Dimension, ratio: u64, base: u64) -> Result<Self> {
        if base == 0 {
            return Err(CellError::InvalidArgument(String::from(
                "hash sampling base must be positive",
            )));
        }
        Ok(Self { dim, ratio, base })
    }
}

impl<P: Position> Selector<P> for HashSample {
    fn select(&self, cell: &Cell<P>) -> bool {
        cell.position()
            .get(self.dim)
            .is_some_and(|coordinate| coordinate.stable_hash() % self.base < self.ratio)
    }
}

// ------------- HashSampleToSize -------------
/// Keeps roughly `size` distinct coordinates at `dim`. The number of distinct
/// coordinates is looked up in the external aggregates under the dimension's
/// name, e.g. `Position1D::new("First")`.
#[derive(Clone, Debug)]
pub struct HashSampleToSize {
    dim: Dimension,
    size: u64,
}

impl HashSampleToSize {
    pub fn new(dim: Dimension, size: u64) -> Self {
        Self { dim, size }
    }
}

impl<P: Position> SelectorWithValue<P, Aggregates> for HashSampleToSize {
    fn select_with_value(&self, cell: &Cell<P>, ext: &Aggregates) -> bool {
        let count = ext
            .get(&Position1D::new(self.dim.name()))
            .and_then(|content| content.value().try_narrow::<i64>())
            .copied()
            .filter(|count| *count > 0);
        let Some(count) = count else {
            trace!(dim = %self.dim, "no distinct count available");
            return false;
        };
        cell.position()
            .get(self.dim)
            .is_some_and(|coordinate| coordinate.stable_hash() % (count as u64) < self.size)
    }
}
