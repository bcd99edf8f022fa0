// Sequential and parallel composition, once per transformer shape.
//
// The sequences carry the position (and external value) type as phantom data
// so that chaining generic transformers infers it from the cell they are
// eventually given.

use std::marker::PhantomData;

use crate::cell::Cell;
use crate::position::{ExpandablePosition, Position};

use super::{ExpandingTransformer, ExpandingTransformerWithValue, Transformer, TransformerWithValue};

// ------------- Lifted -------------
/// Lets a transformer without an external value stand in where one is passed.
#[derive(Clone, Debug)]
pub struct Lifted<T>(T);

impl<T> Lifted<T> {
    pub fn new(transformer: T) -> Self {
        Self(transformer)
    }
    pub fn inner(&self) -> &T {
        &self.0
    }
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<P: Position, W: ?Sized, T: Transformer<P>> TransformerWithValue<P, W> for Lifted<T> {
    fn present_with_value(&self, cell: &Cell<P>, _ext: &W) -> Vec<Cell<P>> {
        self.0.present(cell)
    }
}

impl<P: ExpandablePosition, W: ?Sized, T: ExpandingTransformer<P>> ExpandingTransformerWithValue<P, W>
    for Lifted<T>
{
    fn present_expanded_with_value(&self, cell: &Cell<P>, _ext: &W) -> Vec<Cell<P::Expanded>> {
        self.0.present_expanded(cell)
    }
}

// ------------- Sequences -------------
/// `first`, then `second` on every cell `first` produced, in that order.
/// When `first` produces nothing, `second` is never invoked.
pub struct Sequence<P, A, B> {
    first: A,
    second: B,
    position: PhantomData<fn() -> P>,
}

impl<P, A, B> Sequence<P, A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            position: PhantomData,
        }
    }
}

impl<P: Position, A: Transformer<P>, B: Transformer<P>> Transformer<P> for Sequence<P, A, B> {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        self.first
            .present(cell)
            .iter()
            .flat_map(|c| self.second.present(c))
            .collect()
    }
}

pub struct SequenceWithValue<P, W: ?Sized, A, B> {
    first: A,
    second: B,
    types: PhantomData<(fn() -> P, fn(&W))>,
}

impl<P, W: ?Sized, A, B> SequenceWithValue<P, W, A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            types: PhantomData,
        }
    }
}

impl<P, W, A, B> TransformerWithValue<P, W> for SequenceWithValue<P, W, A, B>
where
    P: Position,
    W: ?Sized,
    A: TransformerWithValue<P, W>,
    B: TransformerWithValue<P, W>,
{
    fn present_with_value(&self, cell: &Cell<P>, ext: &W) -> Vec<Cell<P>> {
        self.first
            .present_with_value(cell, ext)
            .iter()
            .flat_map(|c| self.second.present_with_value(c, ext))
            .collect()
    }
}

/// An expansion followed by a rank preserving transformer over the expanded cells.
pub struct ExpandingSequence<P, A, B> {
    first: A,
    second: B,
    position: PhantomData<fn() -> P>,
}

impl<P, A, B> ExpandingSequence<P, A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            position: PhantomData,
        }
    }
}

impl<P, A, B> ExpandingTransformer<P> for ExpandingSequence<P, A, B>
where
    P: ExpandablePosition,
    A: ExpandingTransformer<P>,
    B: Transformer<P::Expanded>,
{
    fn present_expanded(&self, cell: &Cell<P>) -> Vec<Cell<P::Expanded>> {
        self.first
            .present_expanded(cell)
            .iter()
            .flat_map(|c| self.second.present(c))
            .collect()
    }
}

pub struct ExpandingSequenceWithValue<P, W: ?Sized, A, B> {
    first: A,
    second: B,
    types: PhantomData<(fn() -> P, fn(&W))>,
}

impl<P, W: ?Sized, A, B> ExpandingSequenceWithValue<P, W, A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            types: PhantomData,
        }
    }
}

impl<P, W, A, B> ExpandingTransformerWithValue<P, W> for ExpandingSequenceWithValue<P, W, A, B>
where
    P: ExpandablePosition,
    W: ?Sized,
    A: ExpandingTransformerWithValue<P, W>,
    B: TransformerWithValue<P::Expanded, W>,
{
    fn present_expanded_with_value(&self, cell: &Cell<P>, ext: &W) -> Vec<Cell<P::Expanded>> {
        self.first
            .present_expanded_with_value(cell, ext)
            .iter()
            .flat_map(|c| self.second.present_with_value(c, ext))
            .collect()
    }
}

// ------------- Combined -------------
// A combination owns one or more transformers of the same shape, runs each on
// the same input cell and concatenates their outputs in order. A single
// transformer is simply a combination of one.

pub struct Combined<P: Position> {
    transformers: Vec<Box<dyn Transformer<P> + Send + Sync>>,
}

impl<P: Position> Combined<P> {
    pub fn new<T: Transformer<P> + Send + Sync + 'static>(transformer: T) -> Self {
        Self {
            transformers: vec![Box::new(transformer)],
        }
    }
    pub fn with<T: Transformer<P> + Send + Sync + 'static>(mut self, transformer: T) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }
    /// `None` for an empty list.
    pub fn combine(transformers: Vec<Box<dyn Transformer<P> + Send + Sync>>) -> Option<Self> {
        if transformers.is_empty() {
            None
        } else {
            Some(Self { transformers })
        }
    }
    pub fn len(&self) -> usize {
        self.transformers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl<P: Position> Transformer<P> for Combined<P> {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        self.transformers
            .iter()
            .flat_map(|t| t.present(cell))
            .collect()
    }
}

pub struct CombinedWithValue<P: Position, W: ?Sized + 'static> {
    transformers: Vec<Box<dyn TransformerWithValue<P, W> + Send + Sync>>,
}

impl<P: Position, W: ?Sized + 'static> CombinedWithValue<P, W> {
    pub fn new<T: TransformerWithValue<P, W> + Send + Sync + 'static>(transformer: T) -> Self {
        Self {
            transformers: vec![Box::new(transformer)],
        }
    }
    pub fn with<T: TransformerWithValue<P, W> + Send + Sync + 'static>(
        mut self,
        transformer: T,
    ) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }
    pub fn combine(
        transformers: Vec<Box<dyn TransformerWithValue<P, W> + Send + Sync>>,
    ) -> Option<Self> {
        if transformers.is_empty() {
            None
        } else {
            Some(Self { transformers })
        }
    }
    pub fn len(&self) -> usize {
        self.transformers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl<P: Position, W: ?Sized + 'static> TransformerWithValue<P, W> for CombinedWithValue<P, W> {
    fn present_with_value(&self, cell: &Cell<P>, ext: &W) -> Vec<Cell<P>> {
        self.transformers
            .iter()
            .flat_map(|t| t.present_with_value(cell, ext))
            .collect()
    }
}

pub struct CombinedExpanding<P: ExpandablePosition> {
    transformers: Vec<Box<dyn ExpandingTransformer<P> + Send + Sync>>,
}

impl<P: ExpandablePosition> CombinedExpanding<P> {
    pub fn new<T: ExpandingTransformer<P> + Send + Sync + 'static>(transformer: T) -> Self {
        Self {
            transformers: vec![Box::new(transformer)],
        }
    }
    pub fn with<T: ExpandingTransformer<P> + Send + Sync + 'static>(mut self, transformer: T) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }
    pub fn combine(
        transformers: Vec<Box<dyn ExpandingTransformer<P> + Send + Sync>>,
    ) -> Option<Self> {
        if transformers.is_empty() {
            None
        } else {
            Some(Self { transformers })
        }
    }
    pub fn len(&self) -> usize {
        self.transformers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl<P: ExpandablePosition> ExpandingTransformer<P> for CombinedExpanding<P> {
    fn present_expanded(&self, cell: &Cell<P>) -> Vec<Cell<P::Expanded>> {
        self.transformers
            .iter()
            .flat_map(|t| t.present_expanded(cell))
            .collect()
    }
}

pub struct CombinedExpandingWithValue<P: ExpandablePosition, W: ?Sized + 'static> {
    transformers: Vec<Box<dyn ExpandingTransformerWithValue<P, W> + Send + Sync>>,
}

impl<P: ExpandablePosition, W: ?Sized + 'static> CombinedExpandingWithValue<P, W> {
    pub fn new<T: ExpandingTransformerWithValue<P, W> + Send + Sync + 'static>(transformer: T) -> Self {
        Self {
            transformers: vec![Box::new(transformer)],
        }
    }
    pub fn with<T: ExpandingTransformerWithValue<P, W> + Send + Sync + 'static>(
        mut self,
        transformer: T,
    ) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }
    pub fn combine(
        transformers: Vec<Box<dyn ExpandingTransformerWithValue<P, W> + Send + Sync>>,
    ) -> Option<Self> {
        if transformers.is_empty() {
            None
        } else {
            Some(Self { transformers })
        }
    }
    pub fn len(&self) -> usize {
        self.transformers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl<P: ExpandablePosition, W: ?Sized + 'static> ExpandingTransformerWithValue<P, W>
    for CombinedExpandingWithValue<P, W>
{
    fn present_expanded_with_value(&self, cell: &Cell<P>, ext: &W) -> Vec<Cell<P::Expanded>> {
        self.transformers
            .iter()
            .flat_map(|t| t.present_expanded_with_value(cell, ext))
            .collect()
    }
}
