use std::collections::HashMap;
use std::fmt;

use crate::content::Content;
use crate::position::{Position, Position1D};

/// The atomic datum: a content at a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<P: Position> {
    position: P,
    content: Content,
}

impl<P: Position> Cell<P> {
    pub fn new(position: P, content: Content) -> Self {
        Self { position, content }
    }
    pub fn position(&self) -> &P {
        &self.position
    }
    pub fn content(&self) -> &Content {
        &self.content
    }
    pub fn into_parts(self) -> (P, Content) {
        (self.position, self.content)
    }
    pub fn to_short_string(&self, separator: &str) -> String {
        format!(
            "{}{}{}",
            self.position.to_short_string(separator),
            separator,
            self.content.to_short_string(separator)
        )
    }
}

impl<P: Position> fmt::Display for Cell<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cell({},{})", self.position, self.content)
    }
}

/// A read-only external value keyed by position, typically per-group
/// aggregates computed by an upstream stage.
pub type Aggregates = HashMap<Position1D, Content>;
