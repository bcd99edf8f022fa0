use lazy_static::lazy_static;

use crate::cell::{Aggregates, Cell};
use crate::codex::Codex;
use crate::content::Content;
use crate::position::{Dimension, ExpandablePosition, Position};
use crate::schema::{Schema, SchemaKind};
use crate::value::Value;

use super::{ExpandingTransformer, ExpandingTransformerWithValue, Transformer, TransformerWithValue};

lazy_static! {
    static ref LONG: Schema = Schema::continuous(Codex::Long).unwrap();
    static ref DOUBLE: Schema = Schema::continuous(Codex::Double).unwrap();
}

fn indicator() -> Content {
    Content::new(LONG.clone(), Value::Long(1))
}

fn double(value: f64) -> Content {
    Content::new(DOUBLE.clone(), Value::Double(value))
}

// the numeric value held by the cell, looked up under the key at `dim`
fn lookup<P: Position>(cell: &Cell<P>, dim: Dimension, ext: &Aggregates) -> Option<(f64, f64)> {
    let value = cell.content().value().as_double()?;
    let key = cell.position().select(dim)?;
    let aggregate = ext.get(&key)?.value().as_double()?;
    Some((value, aggregate))
}

/// Replaces every content with a long `1`.
#[derive(Clone, Debug, Default)]
pub struct Indicator;

impl<P: Position> Transformer<P> for Indicator {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        vec![Cell::new(cell.position().clone(), indicator())]
    }
}

/// Limits numeric values to `[lower, upper]`; other values give no cell.
#[derive(Clone, Debug)]
pub struct Clamp {
    lower: f64,
    upper: f64,
}

impl Clamp {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

impl<P: Position> Transformer<P> for Clamp {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        match cell.content().value().as_double() {
            Some(v) => vec![Cell::new(
                cell.position().clone(),
                double(v.max(self.lower).min(self.upper)),
            )],
            None => Vec::new(),
        }
    }
}

/// Logarithm in the given base; non-positive and non-numeric values give no cell.
#[derive(Clone, Debug)]
pub struct Log {
    base: f64,
}

impl Log {
    pub fn new(base: f64) -> Self {
        Self { base }
    }
    pub fn natural() -> Self {
        Self::new(std::f64::consts::E)
    }
}

impl<P: Position> Transformer<P> for Log {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        match cell.content().value().as_double() {
            Some(v) if v > 0.0 => vec![Cell::new(
                cell.position().clone(),
                double(v.ln() / self.base.ln()),
            )],
            _ => Vec::new(),
        }
    }
}

/// One-hot encoding of categorical content: the coordinate at `dim` becomes
/// `coordinate=value` and the content an indicator. Other schemas give no cell.
#[derive(Clone, Debug)]
pub struct Binarise {
    dim: Dimension,
}

impl Binarise {
    pub fn new(dim: Dimension) -> Self {
        Self { dim }
    }
}

impl<P: Position> Transformer<P> for Binarise {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        if !matches!(
            cell.content().schema().kind(),
            SchemaKind::Nominal | SchemaKind::Ordinal
        ) {
            return Vec::new();
        }
        let position = cell.position().get(self.dim).and_then(|coordinate| {
            let name = format!(
                "{}={}",
                coordinate.to_short_string(),
                cell.content().value().to_short_string()
            );
            cell.position().update(self.dim, name)
        });
        position
            .map(|position| Cell::new(position, indicator()))
            .into_iter()
            .collect()
    }
}

/// Divides each value by the maximum absolute value of its group; the group
/// is the coordinate at `dim`, looked up in the external aggregates.
#[derive(Clone, Debug)]
pub struct Normalise {
    dim: Dimension,
}

impl Normalise {
    pub fn new(dim: Dimension) -> Self {
        Self { dim }
    }
}

impl<P: Position> TransformerWithValue<P, Aggregates> for Normalise {
    fn present_with_value(&self, cell: &Cell<P>, ext: &Aggregates) -> Vec<Cell<P>> {
        match lookup(cell, self.dim, ext) {
            Some((value, max_abs)) if max_abs != 0.0 => vec![Cell::new(
                cell.position().clone(),
                double(value / max_abs.abs()),
            )],
            _ => Vec::new(),
        }
    }
}

/// Appends a fixed coordinate, keeping the content.
#[derive(Clone, Debug)]
pub struct Expand {
    coordinate: Value,
}

impl Expand {
    pub fn new(coordinate: impl Into<Value>) -> Self {
        Self {
            coordinate: coordinate.into(),
        }
    }
}

impl<P: ExpandablePosition> ExpandingTransformer<P> for Expand {
    fn present_expanded(&self, cell: &Cell<P>) -> Vec<Cell<P::Expanded>> {
        vec![Cell::new(
            cell.position().append(self.coordinate.clone()),
            cell.content().clone(),
        )]
    }
}

/// The share of each value in its group total, at a new coordinate `name`.
#[derive(Clone, Debug)]
pub struct Share {
    dim: Dimension,
    name: Value,
}

impl Share {
    pub fn new(dim: Dimension, name: impl Into<Value>) -> Self {
        Self {
            dim,
            name: name.into(),
        }
    }
}

impl<P: ExpandablePosition> ExpandingTransformerWithValue<P, Aggregates> for Share {
    fn present_expanded_with_value(&self, cell: &Cell<P>, ext: &Aggregates) -> Vec<Cell<P::Expanded>> {
        match lookup(cell, self.dim, ext) {
            Some((value, total)) if total != 0.0 => vec![Cell::new(
                cell.position().append(self.name.clone()),
                double(value / total),
            )],
            _ => Vec::new(),
        }
    }
}
