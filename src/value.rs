// used for the temporal primitives
use chrono::{NaiveDate, NaiveDateTime};
// used for reproducible hashing of values
use seahash::SeaHasher;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codex::{Codex, Primitive};
use crate::error::TypeMismatch;

/// An immutable typed datum, tagged by the codex that produced it.
#[derive(Clone, Debug)]
pub enum Value {
    Long(i64),
    Double(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn codex(&self) -> Codex {
        match self {
            Value::Long(_) => Codex::Long,
            Value::Double(_) => Codex::Double,
            Value::String(_) => Codex::String,
            Value::Boolean(_) => Codex::Boolean,
            Value::Date(_) => Codex::Date,
            Value::DateTime(_) => Codex::DateTime,
        }
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Long(_) => "LongValue",
            Value::Double(_) => "DoubleValue",
            Value::String(_) => "StringValue",
            Value::Boolean(_) => "BooleanValue",
            Value::Date(_) => "DateValue",
            Value::DateTime(_) => "DateTimeValue",
        }
    }
    /// Narrows to the primitive this value holds. Asking for any other
    /// primitive is a type contract violation and raises [`TypeMismatch`].
    pub fn narrow<T: Primitive>(&self) -> &T {
        match T::narrow(self) {
            Some(v) => v,
            None => TypeMismatch::new(T::CODEX.name(), self.codex().name()).raise(),
        }
    }
    pub fn try_narrow<T: Primitive>(&self) -> Option<&T> {
        T::narrow(self)
    }
    /// Numeric widening, used by transformers that accept either numeric codex.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Long(l) => Some(*l as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
    pub fn to_short_string(&self) -> String {
        self.codex().format(self)
    }
    /// Folds `-0.0` into `0.0` and every NaN into a single NaN, so that equal
    /// values also format the same. Other values are returned as they are.
    pub fn canonical(self) -> Value {
        match self {
            Value::Double(d) if d == 0.0 => Value::Double(0.0),
            Value::Double(d) if d.is_nan() => Value::Double(f64::NAN),
            value => value,
        }
    }
    /// A hash that is identical between runs and platforms, and for equal values.
    pub fn stable_hash(&self) -> u64 {
        let text = match self {
            Value::Double(_) => self.clone().canonical().to_short_string(),
            _ => self.to_short_string(),
        };
        let mut hasher = SeaHasher::new();
        hasher.write(self.codex().name().as_bytes());
        hasher.write_u8(0);
        hasher.write(text.as_bytes());
        hasher.finish()
    }
}

// Doubles are equal when numerically equal, and all NaNs are equal to each
// other, which keeps Eq and Hash lawful.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.codex().hash(state);
        match self {
            Value::Long(l) => l.hash(state),
            Value::Double(d) => {
                let bits = if *d == 0.0 {
                    0u64
                } else if d.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    d.to_bits()
                };
                bits.hash(state)
            }
            Value::String(s) => s.hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Date(d) => d.hash(state),
            Value::DateTime(d) => d.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.to_short_string())
    }
}
