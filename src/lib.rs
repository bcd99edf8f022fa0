//! Cellgrid – typed data cells for sparse, multi-dimensional datasets.
//!
//! Every datum is a [`cell::Cell`]: a position plus a content, where:
//! * A [`codex::Codex`] parses, formats and compares one primitive kind
//!   (long, double, string, boolean, date, date-time).
//! * A [`value::Value`] is an immutable datum produced by a codex.
//! * A [`schema::Schema`] declares the domain of a value: continuous,
//!   discrete, nominal, ordinal or date, with optional constraints.
//! * A [`content::Content`] pairs a schema with a value it accepts.
//! * A [`position::Position`] is a coordinate with a fixed number of
//!   dimensions; expandable positions can grow by one.
//!
//! ## Transformers
//! The [`transform`] module holds an algebra of transformers that map a cell
//! to zero, one or many cells, with or without a read-only external value and
//! with or without adding a dimension. Transformers of the same shape can be
//! chained (`and_then`) or run side by side ([`transform::Combined`] and its
//! siblings).
//!
//! ## Selectors
//! The [`sample`] module has the predicate counterpart used for sampling.
//!
//! ## Errors
//! Malformed text and out of domain values are ordinary outcomes: decoding
//! gives `None` and validation `false`. Using a value as a primitive it does
//! not hold is a programmer error and unwinds with [`error::TypeMismatch`].
//!
//! ## Quick Start
//! ```
//! use cellgrid::cell::Cell;
//! use cellgrid::codex::Codex;
//! use cellgrid::position::Position2D;
//! use cellgrid::schema::Schema;
//! use cellgrid::transform::{Clamp, Indicator, Transformer};
//!
//! let schema = Schema::continuous_range(Codex::Double, 0.0, 10.0).unwrap();
//! let content = schema.decode("12.5");
//! assert!(content.is_none());
//!
//! let content = schema.decode("2.5").unwrap();
//! let cell = Cell::new(Position2D::new("doc", "word"), content);
//! let cells = Clamp::new(0.0, 1.0).and_then(Indicator).present(&cell);
//! assert_eq!(cells.len(), 1);
//! assert_eq!(cells[0].to_short_string("|"), "doc|word|ContinuousSchema[LongCodex]()|1");
//! ```

pub mod cell;
pub mod codex;
pub mod content;
pub mod engine;
pub mod error;
pub mod position;
pub mod sample;
pub mod schema;
pub mod settings;
pub mod transform;
pub mod value;

pub use error::{CellError, Result, TypeMismatch};
