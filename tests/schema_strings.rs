use cellgrid::codex::Codex;
use cellgrid::schema::Schema;
use cellgrid::value::Value;

fn schemas() -> Vec<(Schema, &'static str)> {
    vec![
        (Schema::continuous(Codex::Long).unwrap(), "ContinuousSchema[LongCodex]()"),
        (
            Schema::continuous_range(Codex::Double, -3.1415, 1.4142).unwrap(),
            "ContinuousSchema[DoubleCodex](-3.1415,1.4142)",
        ),
        (Schema::continuous_range(Codex::Long, -1i64, 1i64).unwrap(), "ContinuousSchema[LongCodex](-1,1)"),
        (Schema::discrete(Codex::Long).unwrap(), "DiscreteSchema[LongCodex]()"),
        (Schema::discrete_range(Codex::Long, -4, 4, 2).unwrap(), "DiscreteSchema[LongCodex](-4,4,2)"),
        (
            Schema::nominal(Codex::String, ["c", "a", "b", "a"]).unwrap(),
            "NominalSchema[StringCodex]({a,b,c})",
        ),
        (Schema::nominal(Codex::String, Vec::<&str>::new()).unwrap(), "NominalSchema[StringCodex]()"),
        (Schema::nominal(Codex::String, [""]).unwrap(), "NominalSchema[StringCodex]({})"),
        (Schema::ordinal(Codex::String, ["b", ""]).unwrap(), "OrdinalSchema[StringCodex]([,b])"),
        (
            Schema::nominal(Codex::Double, [f64::NAN, 1.0, -0.0]).unwrap(),
            "NominalSchema[DoubleCodex]({0.0,1.0,NaN})",
        ),
        (Schema::ordinal(Codex::Long, [3i64, 1, 2]).unwrap(), "OrdinalSchema[LongCodex]([1,2,3])"),
        (Schema::date(Codex::Date).unwrap(), "DateSchema[DateCodex]()"),
        (Schema::date(Codex::DateTime).unwrap(), "DateSchema[DateTimeCodex]()"),
    ]
}

#[test]
fn canonical_strings() {
    for (schema, expected) in schemas() {
        assert_eq!(schema.to_string(), expected);
    }
}

#[test]
fn canonical_strings_parse_back() {
    for (schema, expected) in schemas() {
        let parsed: Schema = expected.parse().unwrap();
        assert_eq!(parsed, schema, "{}", expected);
    }
}

#[test]
fn malformed_schema_strings() {
    for text in [
        "Foo",
        "ContinuousSchema[StringCodex]()",
        "ContinuousSchema[LongCodex](1)",
        "ContinuousSchema[LongCodex](1.5,2)",
        "DiscreteSchema[LongCodex](1,2)",
        "NominalSchema[StringCodex](a,b)",
        "OrdinalSchema[LongCodex]({1,2})",
        "DateSchema[DateCodex](2024-01-01)",
        "SpecialSchema[LongCodex]()",
        "NominalSchema[UuidCodex]()",
        "NominalSchema[LongCodex]({})",
    ] {
        assert!(text.parse::<Schema>().is_err(), "{} should not parse", text);
    }
}

#[test]
fn content_strings() {
    let content = Schema::continuous(Codex::Long).unwrap().decode("42").unwrap();
    assert_eq!(content.to_string(), "Content(ContinuousSchema[LongCodex](),LongValue(42))");
    assert_eq!(content.to_short_string("|"), "ContinuousSchema[LongCodex]()|42");

    let content = Schema::nominal(Codex::String, ["x", "y"]).unwrap().decode("y").unwrap();
    assert_eq!(content.to_short_string(";"), "NominalSchema[StringCodex]({x,y});y");
}

#[test]
fn value_strings() {
    assert_eq!(Value::from("x").to_string(), "StringValue(x)");
    assert_eq!(Value::from(1.5).to_string(), "DoubleValue(1.5)");
    assert_eq!(Value::from(false).to_short_string(), "false");
}
