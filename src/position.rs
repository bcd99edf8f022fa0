use std::fmt;
use std::hash::Hash;

use crate::value::Value;

// ------------- Dimension -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl Dimension {
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::First => "First",
            Dimension::Second => "Second",
            Dimension::Third => "Third",
            Dimension::Fourth => "Fourth",
            Dimension::Fifth => "Fifth",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Position -------------
/// An immutable coordinate whose number of dimensions is fixed by its type.
pub trait Position: Clone + fmt::Debug + fmt::Display + Eq + Hash + Send + Sync + 'static {
    const DIMENSIONS: usize;
    fn coordinates(&self) -> &[Value];
    /// A copy with the coordinate at `dim` replaced, `None` if `dim` is out of range.
    fn update<V: Into<Value>>(&self, dim: Dimension, coordinate: V) -> Option<Self>;

    fn get(&self, dim: Dimension) -> Option<&Value> {
        self.coordinates().get(dim.index())
    }
    fn select(&self, dim: Dimension) -> Option<Position1D> {
        self.get(dim).map(|coordinate| Position1D::new(coordinate.clone()))
    }
    fn to_short_string(&self, separator: &str) -> String {
        self.coordinates()
            .iter()
            .map(Value::to_short_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// A position that can grow by one dimension.
pub trait ExpandablePosition: Position {
    type Expanded: Position;
    /// A new position with `coordinate` after the existing ones; `self` is untouched.
    fn append<V: Into<Value>>(&self, coordinate: V) -> Self::Expanded;
}

macro_rules! position {
    ($name:ident, $dimensions:expr, $($coordinate:ident),+) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            coordinates: Vec<Value>,
        }
        impl $name {
            pub fn new($($coordinate: impl Into<Value>),+) -> Self {
                Self {
                    coordinates: vec![$($coordinate.into()),+],
                }
            }
        }
        impl Position for $name {
            const DIMENSIONS: usize = $dimensions;
            fn coordinates(&self) -> &[Value] {
                &self.coordinates
            }
            fn update<V: Into<Value>>(&self, dim: Dimension, coordinate: V) -> Option<Self> {
                if dim.index() >= Self::DIMENSIONS {
                    return None;
                }
                let mut coordinates = self.coordinates.clone();
                coordinates[dim.index()] = coordinate.into();
                Some(Self { coordinates })
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let coordinates = self
                    .coordinates
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{}({})", stringify!($name), coordinates)
            }
        }
    };
}

macro_rules! expandable {
    ($name:ident, $expanded:ident) => {
        impl ExpandablePosition for $name {
            type Expanded = $expanded;
            fn append<V: Into<Value>>(&self, coordinate: V) -> $expanded {
                let mut coordinates = self.coordinates.clone();
                coordinates.push(coordinate.into());
                $expanded { coordinates }
            }
        }
    };
}

position!(Position1D, 1, first);
position!(Position2D, 2, first, second);
position!(Position3D, 3, first, second, third);
position!(Position4D, 4, first, second, third, fourth);
position!(Position5D, 5, first, second, third, fourth, fifth);

expandable!(Position1D, Position2D);
expandable!(Position2D, Position3D);
expandable!(Position3D, Position4D);
expandable!(Position4D, Position5D);
