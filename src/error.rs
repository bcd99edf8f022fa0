use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Parse error: {message}")]
    Parse { message: String },
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CellError>;

impl CellError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }
}

// Helper conversions
impl From<config::ConfigError> for CellError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

/// A value was used as, or validated against, a primitive type it does not hold.
///
/// This is a programmer error rather than a data quality issue. The fatal code
/// paths raise it with [`TypeMismatch::raise`], which unwinds with this exact type
/// as the panic payload so that a supervisor can tell it apart from other faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Type mismatch: expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl TypeMismatch {
    pub fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }
    pub fn raise(self) -> ! {
        tracing::error!(expected = self.expected, found = self.found, "type contract violated");
        std::panic::panic_any(self)
    }
}
