// config lets you read a separate config file, layered under the environment
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::schema::Schema;

/// Runner settings: built-in defaults, then an optional file, then
/// `CELLGRID_*` environment variables (e.g. `CELLGRID_SEPARATOR`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_filter: String,
    pub separator: String,
    // canonical schema string, see Schema's Display
    pub schema: String,
    pub sample_ratio: Option<f64>,
    pub seed: Option<u64>,
    pub workers: usize,
    pub verbose: bool,
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("log_filter", "info")?
            .set_default("separator", "|")?
            .set_default("schema", "NominalSchema[StringCodex]()")?
            .set_default("workers", 1i64)?
            .set_default("verbose", false)?;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("CELLGRID"))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
    pub fn schema(&self) -> Result<Schema> {
        self.schema.parse()
    }
}
