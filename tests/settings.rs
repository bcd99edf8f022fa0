use std::fs;

use cellgrid::codex::Codex;
use cellgrid::schema::{Schema, SchemaKind};
use cellgrid::settings::Settings;

#[test]
fn defaults_without_a_file() {
    let settings = Settings::load(Some("/nonexistent/cellgrid-settings")).unwrap();
    assert_eq!(settings.separator, "|");
    assert_eq!(settings.workers, 1);
    assert_eq!(settings.sample_ratio, None);
    assert!(!settings.verbose);
    let schema = settings.schema().unwrap();
    assert_eq!(schema, Schema::nominal(Codex::String, Vec::<&str>::new()).unwrap());
}

#[test]
fn file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("cellgrid-settings-{}.toml", std::process::id()));
    fs::write(
        &path,
        "separator = \",\"\nworkers = 3\nschema = \"DiscreteSchema[LongCodex](-4,4,2)\"\nsample_ratio = 0.25\nseed = 9\n",
    )
    .unwrap();
    let settings = Settings::load(path.to_str()).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(settings.separator, ",");
    assert_eq!(settings.workers, 3);
    assert_eq!(settings.sample_ratio, Some(0.25));
    assert_eq!(settings.seed, Some(9));
    let schema = settings.schema().unwrap();
    assert_eq!(schema.kind(), SchemaKind::Discrete);
    assert_eq!(schema.to_string(), "DiscreteSchema[LongCodex](-4,4,2)");
}

#[test]
fn malformed_schema_setting() {
    let path = std::env::temp_dir().join(format!("cellgrid-bad-schema-{}.toml", std::process::id()));
    fs::write(&path, "schema = \"ContinuousSchema[StringCodex]()\"\n").unwrap();
    let settings = Settings::load(path.to_str()).unwrap();
    fs::remove_file(&path).unwrap();
    assert!(settings.schema().is_err());
}
