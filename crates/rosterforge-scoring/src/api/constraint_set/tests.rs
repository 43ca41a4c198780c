use rosterforge_core::score::SimpleScore;

use super::{ConstraintSet, IncrementalConstraint};
use crate::stream::ConstraintFactory;

#[derive(Clone, Debug)]
struct Item {
    size: i64,
}

struct Bin {
    items: Vec<Item>,
    labels: Vec<Item>,
}

fn items(b: &Bin) -> &[Item] {
    b.items.as_slice()
}

fn labels(b: &Bin) -> &[Item] {
    b.labels.as_slice()
}

fn bin() -> Bin {
    Bin {
        items: vec![Item { size: 3 }, Item { size: 8 }],
        labels: vec![Item { size: 1 }],
    }
}

fn large_items() -> impl IncrementalConstraint<Bin, SimpleScore> {
    ConstraintFactory::<Bin, SimpleScore>::new()
        .for_each(0, items)
        .filter(|i: &Item| i.size > 5)
        .penalize_with(SimpleScore::of(1), |i: &Item| i.size)
        .as_constraint("Large items")
}

fn labelled() -> impl IncrementalConstraint<Bin, SimpleScore> {
    ConstraintFactory::<Bin, SimpleScore>::new()
        .for_each(1, labels)
        .reward(SimpleScore::of(2))
        .as_constraint("Labelled")
}

#[test]
fn test_empty_set() {
    let mut set = ();
    let bin = bin();
    assert_eq!(ConstraintSet::<Bin, SimpleScore>::constraint_count(&set), 0);
    assert_eq!(ConstraintSet::<Bin, SimpleScore>::evaluate_all(&set, &bin), SimpleScore::of(0));
    assert_eq!(
        ConstraintSet::<Bin, SimpleScore>::initialize_all(&mut set, &bin),
        SimpleScore::of(0)
    );
}

#[test]
fn test_evaluate_each_keeps_order() {
    let set = (large_items(), labelled());
    let results = set.evaluate_each(&bin());

    assert_eq!(set.constraint_count(), 2);
    assert_eq!(results[0].name, "Large items");
    assert_eq!(results[0].score, SimpleScore::of(-8));
    assert_eq!(results[1].name, "Labelled");
    assert_eq!(results[1].score, SimpleScore::of(2));
    assert_eq!(set.evaluate_all(&bin()), SimpleScore::of(-6));
}

#[test]
fn test_evaluate_detailed_sums_matches() {
    let set = (large_items(), labelled());
    let analyses = set.evaluate_detailed(&bin());

    assert_eq!(analyses.len(), 2);
    assert_eq!(analyses[0].score, SimpleScore::of(-8));
    assert_eq!(analyses[0].weight, SimpleScore::of(1));
    assert_eq!(analyses[1].match_count(), 1);
}

#[test]
fn test_deltas_route_by_descriptor() {
    let mut set = (large_items(), labelled());
    let mut bin = bin();
    assert_eq!(set.initialize_all(&bin), SimpleScore::of(-6));

    assert_eq!(set.on_retract_all(&bin, 0, 0), SimpleScore::of(0));
    bin.items[0].size = 6;
    assert_eq!(set.on_insert_all(&bin, 0, 0), SimpleScore::of(-6));

    bin.labels.push(Item { size: 2 });
    assert_eq!(set.on_insert_all(&bin, 1, 1), SimpleScore::of(2));
    assert_eq!(set.evaluate_all(&bin), SimpleScore::of(-10));

    set.reset_all();
    assert_eq!(set.initialize_all(&bin), SimpleScore::of(-10));
}
