use std::fmt;

use crate::schema::Schema;
use crate::value::Value;

/// The payload of a cell: a value together with the schema that governs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    schema: Schema,
    value: Value,
}

impl Content {
    // Contents are normally made by Schema::decode, which validates first.
    pub fn new(schema: Schema, value: Value) -> Self {
        Self { schema, value }
    }
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
    pub fn value(&self) -> &Value {
        &self.value
    }
    pub fn to_short_string(&self, separator: &str) -> String {
        format!("{}{}{}", self.schema, separator, self.value.to_short_string())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Content({},{})", self.schema, self.value)
    }
}
