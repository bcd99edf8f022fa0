// used to share the (possibly large) domain between every content of a schema
use std::sync::Arc;
// used to check bounds with the codex comparator
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// used when parsing the canonical string form back into a schema
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::codex::Codex;
use crate::content::Content;
use crate::error::{CellError, Result, TypeMismatch};
use crate::value::Value;

lazy_static! {
    static ref CANONICAL: Regex = Regex::new(r"^(\w+)\[(\w+)\]\((.*)\)$").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Continuous,
    Discrete,
    Nominal,
    Ordinal,
    Date,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 5] = [
        SchemaKind::Continuous,
        SchemaKind::Discrete,
        SchemaKind::Nominal,
        SchemaKind::Ordinal,
        SchemaKind::Date,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Continuous => "ContinuousSchema",
            SchemaKind::Discrete => "DiscreteSchema",
            SchemaKind::Nominal => "NominalSchema",
            SchemaKind::Ordinal => "OrdinalSchema",
            SchemaKind::Date => "DateSchema",
        }
    }
    /// Whether values of `codex` may be governed by a schema of this kind.
    pub fn admits(&self, codex: Codex) -> bool {
        match self {
            SchemaKind::Continuous => codex.is_numeric(),
            SchemaKind::Discrete => codex == Codex::Long,
            SchemaKind::Nominal | SchemaKind::Ordinal => true,
            SchemaKind::Date => codex.is_temporal(),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SchemaKind {
    type Err = CellError;
    fn from_str(s: &str) -> Result<Self> {
        SchemaKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CellError::parse(format!("unknown schema kind '{}'", s)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Domain {
    Unconstrained,
    Range { lower: Value, upper: Value },
    Step { lower: i64, upper: i64, step: i64 },
    // sorted (doubles by total order), canonical, free of duplicates, never empty
    Set(Vec<Value>),
}

// ------------- Schema -------------
/// A validation policy: which values of one codex a piece of content may hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    kind: SchemaKind,
    codex: Codex,
    domain: Arc<Domain>,
}

impl Schema {
    fn build(kind: SchemaKind, codex: Codex, domain: Domain) -> Result<Self> {
        if !kind.admits(codex) {
            return Err(CellError::InvalidSchema(format!(
                "{} cannot be used with {}",
                codex, kind
            )));
        }
        Ok(Self {
            kind,
            codex,
            domain: Arc::new(domain),
        })
    }
    pub fn unconstrained(kind: SchemaKind, codex: Codex) -> Result<Self> {
        Self::build(kind, codex, Domain::Unconstrained)
    }
    pub fn continuous(codex: Codex) -> Result<Self> {
        Self::unconstrained(SchemaKind::Continuous, codex)
    }
    /// A closed range `[lower, upper]`; both bounds must be values of `codex`.
    pub fn continuous_range(
        codex: Codex,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Result<Self> {
        let (lower, upper) = (lower.into(), upper.into());
        for bound in [&lower, &upper] {
            if bound.codex() != codex {
                return Err(CellError::InvalidSchema(format!(
                    "bound {} is not a value of {}",
                    bound, codex
                )));
            }
        }
        match codex.compare(&lower, &upper) {
            Some(Ordering::Less) | Some(Ordering::Equal) => (),
            _ => {
                return Err(CellError::InvalidSchema(format!(
                    "lower bound {} is not below upper bound {}",
                    lower, upper
                )));
            }
        }
        Self::build(SchemaKind::Continuous, codex, Domain::Range { lower, upper })
    }
    pub fn discrete(codex: Codex) -> Result<Self> {
        Self::unconstrained(SchemaKind::Discrete, codex)
    }
    /// A closed range `[lower, upper]` where only every `step` from `lower` is valid.
    pub fn discrete_range(codex: Codex, lower: i64, upper: i64, step: i64) -> Result<Self> {
        if step <= 0 {
            return Err(CellError::InvalidSchema(format!("step {} must be positive", step)));
        }
        if lower > upper {
            return Err(CellError::InvalidSchema(format!(
                "lower bound {} is not below upper bound {}",
                lower, upper
            )));
        }
        Self::build(SchemaKind::Discrete, codex, Domain::Step { lower, upper, step })
    }
    /// Permits only the listed values; an empty list permits every value of `codex`.
    pub fn nominal<V: Into<Value>>(codex: Codex, values: impl IntoIterator<Item = V>) -> Result<Self> {
        Self::with_set(SchemaKind::Nominal, codex, values)
    }
    /// Like [`Schema::nominal`], but declares the permitted values as ordered by the codex.
    pub fn ordinal<V: Into<Value>>(codex: Codex, values: impl IntoIterator<Item = V>) -> Result<Self> {
        Self::with_set(SchemaKind::Ordinal, codex, values)
    }
    pub fn date(codex: Codex) -> Result<Self> {
        Self::unconstrained(SchemaKind::Date, codex)
    }
    fn with_set<V: Into<Value>>(
        kind: SchemaKind,
        codex: Codex,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let mut set = Vec::new();
        for value in values.into_iter().map(Into::into) {
            if value.codex() != codex {
                return Err(CellError::InvalidSchema(format!(
                    "permitted value {} is not a value of {}",
                    value, codex
                )));
            }
            set.push(value.canonical());
        }
        if set.is_empty() {
            return Self::build(kind, codex, Domain::Unconstrained);
        }
        set.sort_by(|a, b| match (a, b) {
            // NaN is incomparable under the codex, but a set needs a total order
            (Value::Double(x), Value::Double(y)) => x.total_cmp(y),
            _ => codex.compare(a, b).unwrap_or(Ordering::Equal),
        });
        set.dedup();
        Self::build(kind, codex, Domain::Set(set))
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }
    pub fn codex(&self) -> Codex {
        self.codex
    }
    pub fn is_unconstrained(&self) -> bool {
        *self.domain == Domain::Unconstrained
    }
    /// The permitted values of a constrained nominal or ordinal schema, in codex order.
    pub fn permitted(&self) -> Option<&[Value]> {
        match &*self.domain {
            Domain::Set(values) => Some(values),
            _ => None,
        }
    }

    /// Parses `text` with the codex and keeps it only if it is in the domain.
    /// Both kinds of failure give `None`.
    pub fn decode(&self, text: &str) -> Option<Content> {
        let Some(value) = self.codex.decode(text) else {
            trace!(schema = %self, text, "not decodable");
            return None;
        };
        if !self.is_valid(&value) {
            trace!(schema = %self, text, "outside of domain");
            return None;
        }
        Some(Content::new(self.clone(), value))
    }
    /// Checks that `value` is in the domain. A value of another codex than the
    /// schema's is a type contract violation and raises [`TypeMismatch`].
    pub fn is_valid(&self, value: &Value) -> bool {
        match self.try_is_valid(value) {
            Ok(valid) => valid,
            Err(mismatch) => mismatch.raise(),
        }
    }
    pub fn try_is_valid(&self, value: &Value) -> std::result::Result<bool, TypeMismatch> {
        if value.codex() != self.codex {
            return Err(TypeMismatch::new(self.codex.name(), value.codex().name()));
        }
        Ok(match &*self.domain {
            Domain::Unconstrained => true,
            Domain::Range { lower, upper } => {
                matches!(
                    self.codex.compare(lower, value),
                    Some(Ordering::Less) | Some(Ordering::Equal)
                ) && matches!(
                    self.codex.compare(value, upper),
                    Some(Ordering::Less) | Some(Ordering::Equal)
                )
            }
            Domain::Step { lower, upper, step } => {
                let v = *value.narrow::<i64>();
                v >= *lower
                    && v <= *upper
                    && (v as i128 - *lower as i128) % (*step as i128) == 0
            }
            Domain::Set(values) => values.contains(value),
        })
    }

    fn params(&self) -> String {
        let join = |values: &[Value]| {
            values
                .iter()
                .map(|v| self.codex.format(v))
                .collect::<Vec<_>>()
                .join(",")
        };
        match &*self.domain {
            Domain::Unconstrained => String::new(),
            Domain::Range { lower, upper } => {
                format!("{},{}", self.codex.format(lower), self.codex.format(upper))
            }
            Domain::Step { lower, upper, step } => format!("{},{},{}", lower, upper, step),
            Domain::Set(values) if self.kind == SchemaKind::Ordinal => {
                format!("[{}]", join(values))
            }
            Domain::Set(values) => format!("{{{}}}", join(values)),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]({})", self.kind.name(), self.codex.name(), self.params())
    }
}

fn decode_param(codex: Codex, text: &str) -> Result<Value> {
    codex
        .decode(text)
        .ok_or_else(|| CellError::parse(format!("'{}' is not a value of {}", text, codex)))
}

// Parameters holding a ',' (or a closing bracket) cannot be told apart from
// separators, so such schemas do not survive the trip through a string.
impl FromStr for Schema {
    type Err = CellError;
    fn from_str(s: &str) -> Result<Self> {
        let captures = CANONICAL
            .captures(s)
            .ok_or_else(|| CellError::parse(format!("'{}' is not a schema", s)))?;
        let kind = captures[1].parse::<SchemaKind>()?;
        let codex = captures[2].parse::<Codex>()?;
        let params = &captures[3];
        if params.is_empty() {
            return Schema::unconstrained(kind, codex);
        }
        let fields = |expected: usize| {
            let fields: Vec<&str> = params.split(',').collect();
            if fields.len() == expected {
                Ok(fields)
            } else {
                Err(CellError::parse(format!(
                    "{} expects {} parameters, found '{}'",
                    kind, expected, params
                )))
            }
        };
        match kind {
            SchemaKind::Continuous => {
                let fields = fields(2)?;
                Schema::continuous_range(
                    codex,
                    decode_param(codex, fields[0])?,
                    decode_param(codex, fields[1])?,
                )
            }
            SchemaKind::Discrete => {
                let fields = fields(3)?;
                let mut longs = [0i64; 3];
                for (long, field) in longs.iter_mut().zip(fields) {
                    *long = field
                        .parse::<i64>()
                        .map_err(|_| CellError::parse(format!("'{}' is not a long", field)))?;
                }
                Schema::discrete_range(codex, longs[0], longs[1], longs[2])
            }
            SchemaKind::Nominal | SchemaKind::Ordinal => {
                let (open, close) = if kind == SchemaKind::Ordinal { ('[', ']') } else { ('{', '}') };
                let inner = params
                    .strip_prefix(open)
                    .and_then(|p| p.strip_suffix(close))
                    .ok_or_else(|| {
                        CellError::parse(format!("{} expects {}...{}, found '{}'", kind, open, close, params))
                    })?;
                // an unconstrained set has no brackets at all, so "{}" holds one empty member
                let values = inner
                    .split(',')
                    .map(|field| decode_param(codex, field))
                    .collect::<Result<Vec<_>>>()?;
                Schema::with_set(kind, codex, values)
            }
            SchemaKind::Date => Err(CellError::parse(format!(
                "{} takes no parameters, found '{}'",
                kind, params
            ))),
        }
    }
}
