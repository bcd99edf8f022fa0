// used for the temporal codices
use chrono::{NaiveDate, NaiveDateTime};

// used to compare two values of the same codex
use std::cmp::Ordering;
// used to print out readable forms of a codex
use std::fmt;
// used when looking up a codex by its name
use std::str::FromStr;

use crate::error::{CellError, TypeMismatch};
use crate::value::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
// the fraction is only written (and only required) when it is non-zero
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses, formats and compares the values of one primitive kind.
///
/// A codex is stateless, so the variants double as process wide singletons.
/// For every value `v` a codex produces, `decode(&format(&v)) == Some(v)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codex {
    Long,
    Double,
    String,
    Boolean,
    Date,
    DateTime,
}

impl Codex {
    pub const ALL: [Codex; 6] = [
        Codex::Long,
        Codex::Double,
        Codex::String,
        Codex::Boolean,
        Codex::Date,
        Codex::DateTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Codex::Long => "LongCodex",
            Codex::Double => "DoubleCodex",
            Codex::String => "StringCodex",
            Codex::Boolean => "BooleanCodex",
            Codex::Date => "DateCodex",
            Codex::DateTime => "DateTimeCodex",
        }
    }
    pub fn is_numeric(&self) -> bool {
        matches!(self, Codex::Long | Codex::Double)
    }
    pub fn is_temporal(&self) -> bool {
        matches!(self, Codex::Date | Codex::DateTime)
    }
    /// Returns `None` for any text that is not exactly the textual grammar of
    /// the primitive, so the long codex rejects `"3.1415"`.
    pub fn decode(&self, text: &str) -> Option<Value> {
        match self {
            Codex::Long => text.parse::<i64>().ok().map(Value::Long),
            Codex::Double => text.parse::<f64>().ok().map(Value::Double),
            Codex::String => Some(Value::String(text.to_owned())),
            Codex::Boolean => {
                if text.eq_ignore_ascii_case("true") {
                    Some(Value::Boolean(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(Value::Boolean(false))
                } else {
                    None
                }
            }
            Codex::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .map(Value::Date),
            Codex::DateTime => NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
                .ok()
                .map(Value::DateTime),
        }
    }
    /// Formats a value produced by this codex. Passing a value of another
    /// codex is a type contract violation.
    pub fn format(&self, value: &Value) -> String {
        if value.codex() != *self {
            TypeMismatch::new(self.name(), value.codex().name()).raise();
        }
        match value {
            Value::Long(l) => l.to_string(),
            // debug formatting keeps the decimal point and is round-trip exact
            Value::Double(d) => format!("{:?}", d),
            Value::String(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::DateTime(d) => d.format(DATE_TIME_FORMAT).to_string(),
        }
    }
    /// Orders two values of this codex. Values of another codex, and NaN
    /// doubles, are incomparable.
    pub fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        if a.codex() != *self || b.codex() != *self {
            return None;
        }
        match (a, b) {
            (Value::Long(x), Value::Long(y)) => Some(x.cmp(y)),
            (Value::Double(x), Value::Double(y)) => x.partial_cmp(y),
            (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
            (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
            (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
            (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
            _ => None,
        }
    }
}

impl fmt::Display for Codex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Codex {
    type Err = CellError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codex::ALL
            .into_iter()
            .find(|codex| codex.name() == s)
            .ok_or_else(|| CellError::parse(format!("unknown codex '{}'", s)))
    }
}

// ------------- Primitives --------------
/// A Rust type that a [`Value`] can hold, and be narrowed back to.
pub trait Primitive: Sized + Clone + fmt::Debug + Send + Sync + 'static {
    // static stuff which needs to be implemented downstream
    const CODEX: Codex;
    fn wrap(self) -> Value;
    fn narrow(value: &Value) -> Option<&Self>;
    // instance callable with pre-made implementation
    fn codex(&self) -> Codex {
        Self::CODEX
    }
}

macro_rules! primitive {
    ($primitive:ty, $codex:ident) => {
        impl Primitive for $primitive {
            const CODEX: Codex = Codex::$codex;
            fn wrap(self) -> Value {
                Value::$codex(self)
            }
            fn narrow(value: &Value) -> Option<&Self> {
                match value {
                    Value::$codex(v) => Some(v),
                    _ => None,
                }
            }
        }
        impl From<$primitive> for Value {
            fn from(v: $primitive) -> Value {
                v.wrap()
            }
        }
    };
}

primitive!(i64, Long);
primitive!(f64, Double);
primitive!(String, String);
primitive!(bool, Boolean);
primitive!(NaiveDate, Date);
primitive!(NaiveDateTime, DateTime);

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::String(v.to_owned())
    }
}
