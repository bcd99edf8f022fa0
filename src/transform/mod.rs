//! The transformer algebra.
//!
//! A transformer maps one cell to zero or more cells. There are four shapes,
//! along two axes: whether the output keeps the rank of the input or grows it
//! by one dimension, and whether an external value is threaded through.
//!
//! | shape                             | input                 | output                    |
//! |-----------------------------------|-----------------------|---------------------------|
//! | [`Transformer`]                   | `Cell<P>`             | `Vec<Cell<P>>`            |
//! | [`TransformerWithValue`]          | `Cell<P>`, `&W`       | `Vec<Cell<P>>`            |
//! | [`ExpandingTransformer`]          | `Cell<P>`             | `Vec<Cell<P::Expanded>>`  |
//! | [`ExpandingTransformerWithValue`] | `Cell<P>`, `&W`       | `Vec<Cell<P::Expanded>>`  |
//!
//! Wrapping a [`Transformer`] in [`Lifted`] makes it a [`TransformerWithValue`]
//! for any `W`, and likewise an [`ExpandingTransformer`] becomes an
//! [`ExpandingTransformerWithValue`]; the value is ignored. An engine can
//! therefore always pass an external value (`&()` when there is none).
//!
//! An empty output is not an error; the cell just contributes nothing.
//!
//! Transformers hold no state that changes between cells, so the same
//! transformer can be applied to many cells at once.

pub mod combinator;
pub mod library;

pub use combinator::{
    Combined, CombinedExpanding, CombinedExpandingWithValue, CombinedWithValue, ExpandingSequence,
    ExpandingSequenceWithValue, Lifted, Sequence, SequenceWithValue,
};
pub use library::{Binarise, Clamp, Expand, Indicator, Log, Normalise, Share};

use crate::cell::Cell;
use crate::position::{ExpandablePosition, Position};

pub trait Transformer<P: Position> {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>>;

    /// Feeds every cell this transformer produces to `next`.
    fn and_then<T: Transformer<P>>(self, next: T) -> Sequence<P, Self, T>
    where
        Self: Sized,
    {
        Sequence::new(self, next)
    }
}

pub trait TransformerWithValue<P: Position, W: ?Sized> {
    fn present_with_value(&self, cell: &Cell<P>, ext: &W) -> Vec<Cell<P>>;

    fn and_then_with_value<T: TransformerWithValue<P, W>>(
        self,
        next: T,
    ) -> SequenceWithValue<P, W, Self, T>
    where
        Self: Sized,
    {
        SequenceWithValue::new(self, next)
    }
}

pub trait ExpandingTransformer<P: ExpandablePosition> {
    fn present_expanded(&self, cell: &Cell<P>) -> Vec<Cell<P::Expanded>>;

    /// Feeds every expanded cell to the rank preserving `next`.
    fn and_then_expanded<T: Transformer<P::Expanded>>(self, next: T) -> ExpandingSequence<P, Self, T>
    where
        Self: Sized,
    {
        ExpandingSequence::new(self, next)
    }
}

pub trait ExpandingTransformerWithValue<P: ExpandablePosition, W: ?Sized> {
    fn present_expanded_with_value(&self, cell: &Cell<P>, ext: &W) -> Vec<Cell<P::Expanded>>;

    fn and_then_expanded_with_value<T: TransformerWithValue<P::Expanded, W>>(
        self,
        next: T,
    ) -> ExpandingSequenceWithValue<P, W, Self, T>
    where
        Self: Sized,
    {
        ExpandingSequenceWithValue::new(self, next)
    }
}
