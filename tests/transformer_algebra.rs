use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cellgrid::cell::{Aggregates, Cell};
use cellgrid::codex::Codex;
use cellgrid::content::Content;
use cellgrid::position::{Dimension, Position, Position1D, Position2D, Position3D};
use cellgrid::schema::Schema;
use cellgrid::transform::{
    Binarise, Clamp, Combined, CombinedExpanding, CombinedExpandingWithValue, CombinedWithValue,
    Expand, ExpandingTransformer, ExpandingTransformerWithValue, Indicator, Lifted, Log, Normalise,
    Share, Transformer, TransformerWithValue,
};
use cellgrid::value::Value;

fn double(value: f64) -> Content {
    Schema::continuous(Codex::Double)
        .unwrap()
        .decode(&value.to_string())
        .unwrap()
}

fn cell(value: f64) -> Cell<Position2D> {
    Cell::new(Position2D::new("doc", "word"), double(value))
}

fn number<P: Position>(cell: &Cell<P>) -> f64 {
    *cell.content().value().narrow::<f64>()
}

// Two cells per input, with ".a" and ".b" appended to the first coordinate.
struct Split;

impl<P: Position> Transformer<P> for Split {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        ["a", "b"]
            .iter()
            .filter_map(|suffix| {
                let first = cell.position().get(Dimension::First)?.to_short_string();
                cell.position()
                    .update(Dimension::First, format!("{}.{}", first, suffix))
                    .map(|position| Cell::new(position, cell.content().clone()))
            })
            .collect()
    }
}

struct Nothing;

impl<P: Position> Transformer<P> for Nothing {
    fn present(&self, _cell: &Cell<P>) -> Vec<Cell<P>> {
        Vec::new()
    }
}

struct Counting(Arc<AtomicUsize>);

impl<P: Position> Transformer<P> for Counting {
    fn present(&self, cell: &Cell<P>) -> Vec<Cell<P>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        vec![cell.clone()]
    }
}

// Adds the external number to the value.
struct AddExt;

impl<P: Position> TransformerWithValue<P, f64> for AddExt {
    fn present_with_value(&self, cell: &Cell<P>, ext: &f64) -> Vec<Cell<P>> {
        vec![Cell::new(cell.position().clone(), double(number(cell) + ext))]
    }
}

fn aggregates(key: &str, value: f64) -> Aggregates {
    let mut ext = Aggregates::new();
    ext.insert(Position1D::new(key), double(value));
    ext
}

#[test]
fn sequence_is_flat_map() {
    let c = cell(2.0);
    let expected: Vec<_> = Split.present(&c).iter().flat_map(|x| Split.present(x)).collect();
    assert_eq!(Split.and_then(Split).present(&c), expected);
    assert_eq!(expected.len(), 4);
    assert_eq!(expected[0].position().to_short_string("|"), "doc.a.a|word");
    assert_eq!(expected[3].position().to_short_string("|"), "doc.b.b|word");
}

#[test]
fn empty_first_stage_skips_second() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seq = Nothing.and_then(Counting(calls.clone()));
    assert!(seq.present(&cell(2.0)).is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let seq = Split.and_then(Counting(calls.clone()));
    assert_eq!(seq.present(&cell(2.0)).len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn combine_concatenates_in_order() {
    let c = cell(2.0);
    let mut expected = Split.present(&c);
    expected.extend(Indicator.present(&c));

    let combined = Combined::new(Split).with(Indicator);
    assert_eq!(combined.len(), 2);
    assert!(!combined.is_empty());
    assert_eq!(combined.present(&c), expected);

    let reversed = Combined::new(Indicator).with(Split).present(&c);
    assert_eq!(reversed[0], Indicator.present(&c)[0]);
    assert_eq!(reversed.len(), 3);
}

#[test]
fn combine_of_nothing_is_none() {
    assert!(Combined::<Position2D>::combine(Vec::new()).is_none());
    let calls = Arc::new(AtomicUsize::new(0));
    let combined = Combined::<Position2D>::combine(vec![
        Box::new(Counting(calls.clone())),
        Box::new(Counting(calls.clone())),
    ])
    .unwrap();
    assert_eq!(combined.present(&cell(1.0)).len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn sequence_with_value_threads_the_value() {
    let out = AddExt.and_then_with_value(AddExt).present_with_value(&cell(2.0), &1.5);
    assert_eq!(out.len(), 1);
    assert_eq!(number(&out[0]), 5.0);

    let out = Lifted::new(Split)
        .and_then_with_value(AddExt)
        .present_with_value(&cell(2.0), &1.0);
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|c| number(c) == 3.0));
}

#[test]
fn combine_with_value() {
    let combined = CombinedWithValue::new(Lifted::new(Indicator)).with(AddExt);
    let out = combined.present_with_value(&cell(2.0), &0.5);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].content().value(), &Value::from(1i64));
    assert_eq!(number(&out[1]), 2.5);
}

#[test]
fn lifted_ignores_the_value() {
    let c = cell(2.0);
    let plain = Indicator.present(&c);
    assert_eq!(Lifted::new(Indicator).present_with_value(&c, &()), plain);
    assert_eq!(Lifted::new(Indicator).present_with_value(&c, &"anything"), plain);
}

#[test]
fn expansion_appends_one_coordinate() {
    let c = cell(2.0);
    let out = Expand::new("x").present_expanded(&c);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position(), &Position3D::new("doc", "word", "x"));
    assert_eq!(out[0].position().coordinates().len(), Position2D::DIMENSIONS + 1);
    assert_eq!(out[0].content(), c.content());
    // the input is untouched
    assert_eq!(c.position(), &Position2D::new("doc", "word"));
}

#[test]
fn expanding_sequence() {
    let out = Expand::new("x").and_then_expanded(Split).present_expanded(&cell(2.0));
    let positions: Vec<String> = out.iter().map(|c| c.position().to_short_string("|")).collect();
    assert_eq!(positions, vec!["doc.a|word|x", "doc.b|word|x"]);

    let out = Expand::new("x").and_then_expanded(Nothing).present_expanded(&cell(2.0));
    assert!(out.is_empty());
}

#[test]
fn combine_expanding_in_order() {
    let out = CombinedExpanding::new(Expand::new("x"))
        .with(Expand::new("y"))
        .present_expanded(&cell(2.0));
    let last: Vec<_> = out.iter().map(|c| c.position().get(Dimension::Third).cloned()).collect();
    assert_eq!(last, vec![Some(Value::from("x")), Some(Value::from("y"))]);
}

#[test]
fn expanding_with_value() {
    let ext = aggregates("doc", 8.0);
    let out = Share::new(Dimension::First, "share").present_expanded_with_value(&cell(2.0), &ext);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position(), &Position3D::new("doc", "word", "share"));
    assert_eq!(number(&out[0]), 0.25);

    let out = Lifted::new(Expand::new("x"))
        .and_then_expanded_with_value(Normalise::new(Dimension::First))
        .present_expanded_with_value(&cell(2.0), &aggregates("doc", 4.0));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position(), &Position3D::new("doc", "word", "x"));
    assert_eq!(number(&out[0]), 0.5);
}

#[test]
fn combine_expanding_with_value() {
    let ext = aggregates("doc", 4.0);
    let out = CombinedExpandingWithValue::new(Share::new(Dimension::First, "share"))
        .with(Lifted::new(Expand::new("raw")))
        .present_expanded_with_value(&cell(2.0), &ext);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].position().get(Dimension::Third), Some(&Value::from("share")));
    assert_eq!(number(&out[0]), 0.5);
    assert_eq!(out[1].position().get(Dimension::Third), Some(&Value::from("raw")));
    assert_eq!(number(&out[1]), 2.0);
}

#[test]
fn indicator_and_clamp() {
    let out = Indicator.present(&cell(2.0));
    assert_eq!(out[0].content().to_short_string("|"), "ContinuousSchema[LongCodex]()|1");

    assert_eq!(number(&Clamp::new(0.0, 1.0).present(&cell(2.0))[0]), 1.0);
    assert_eq!(number(&Clamp::new(3.0, 4.0).present(&cell(2.0))[0]), 3.0);

    let long = Schema::continuous(Codex::Long).unwrap().decode("5").unwrap();
    let out = Clamp::new(0.0, 10.0).present(&Cell::new(Position1D::new("k"), long));
    assert_eq!(out[0].content().value(), &Value::from(5.0));

    let text = Schema::nominal(Codex::String, ["red"]).unwrap().decode("red").unwrap();
    assert!(Clamp::new(0.0, 1.0).present(&Cell::new(Position1D::new("k"), text)).is_empty());
}

#[test]
fn log_skips_non_positive() {
    let out = Log::new(2.0).present(&cell(8.0));
    assert!((number(&out[0]) - 3.0).abs() < 1e-12);
    assert!(Log::natural().present(&cell(0.0)).is_empty());
    assert!(Log::natural().present(&cell(-1.0)).is_empty());
}

#[test]
fn binarise_categorical_content() {
    let colour = Schema::nominal(Codex::String, ["red", "green"]).unwrap();
    let c = Cell::new(Position2D::new("doc", "colour"), colour.decode("red").unwrap());
    let out = Binarise::new(Dimension::Second).present(&c);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position(), &Position2D::new("doc", "colour=red"));
    assert_eq!(out[0].content().value(), &Value::from(1i64));

    assert!(Binarise::new(Dimension::Second).present(&cell(1.0)).is_empty());
    assert!(Binarise::new(Dimension::Third).present(&c).is_empty());
}

#[test]
fn normalise_by_group_maximum() {
    let normalise = Normalise::new(Dimension::First);
    let out = normalise.present_with_value(&cell(2.0), &aggregates("doc", -4.0));
    assert_eq!(number(&out[0]), 0.5);
    assert!(normalise.present_with_value(&cell(2.0), &aggregates("other", 4.0)).is_empty());
    assert!(normalise.present_with_value(&cell(2.0), &aggregates("doc", 0.0)).is_empty());
}
