//! Tests for score analysis types.

use super::analysis::*;
use rosterforge_core::score::SimpleScore;
use rosterforge_core::ConstraintRef;

#[derive(Clone, Debug, PartialEq)]
struct Shift {
    id: i32,
    employee: String,
}

fn shift(id: i32, employee: &str) -> Shift {
    Shift {
        id,
        employee: employee.to_string(),
    }
}

fn overlap() -> ConstraintRef {
    ConstraintRef::new("employee-rostering", "No overlapping shifts")
}

fn unassigned() -> ConstraintRef {
    ConstraintRef::new("employee-rostering", "Assign every shift")
}

fn pair_match(cr: ConstraintRef, score: i64, a: &Shift, b: &Shift) -> DetailedConstraintMatch<SimpleScore> {
    DetailedConstraintMatch::new(
        cr,
        SimpleScore::of(score),
        ConstraintJustification::new(vec![EntityRef::new(a), EntityRef::new(b)]),
    )
}

fn single_match(cr: ConstraintRef, score: i64, a: &Shift) -> DetailedConstraintMatch<SimpleScore> {
    DetailedConstraintMatch::new(
        cr,
        SimpleScore::of(score),
        ConstraintJustification::new(vec![EntityRef::new(a)]),
    )
}

#[test]
fn test_entity_ref_creation() {
    let entity_ref = EntityRef::new(&shift(1, "Amy"));

    assert!(entity_ref.type_name.contains("Shift"));
    assert_eq!(entity_ref.short_type_name(), "Shift");
    assert!(entity_ref.display.contains("Amy"));
}

#[test]
fn test_entity_ref_downcast() {
    let entity_ref = EntityRef::new(&shift(42, "Beth"));

    let recovered: Option<&Shift> = entity_ref.as_entity();
    assert_eq!(recovered.map(|s| s.id), Some(42));
    assert!(entity_ref.as_entity::<String>().is_none());
}

#[test]
fn test_entity_ref_equality() {
    let ref1 = EntityRef::new(&shift(1, "Amy"));
    let ref2 = EntityRef::new(&shift(1, "Amy"));
    let ref3 = EntityRef::new(&shift(2, "Beth"));

    assert_eq!(ref1, ref2);
    assert_ne!(ref1, ref3);
}

#[test]
fn test_entity_ref_with_display() {
    let entity_ref = EntityRef::with_display(&shift(7, "Amy"), "Shift 7".to_string());
    assert_eq!(entity_ref.display, "Shift 7");
}

#[test]
fn test_constraint_justification() {
    let just = ConstraintJustification::new(vec![
        EntityRef::new(&shift(1, "Amy")),
        EntityRef::new(&shift(2, "Beth")),
    ]);

    assert_eq!(just.entities.len(), 2);
    assert!(just.description.contains("Amy"));
    assert!(just.description.contains("Beth"));

    let empty = ConstraintJustification::new(Vec::new());
    assert!(empty.description.is_empty());
}

#[test]
fn test_score_explanation_queries() {
    let a = shift(1, "Amy");
    let b = shift(2, "Amy");
    let c = shift(3, "Beth");

    let explanation = ScoreExplanation::new(
        SimpleScore::of(-9),
        vec![
            ConstraintAnalysis::new(
                overlap(),
                SimpleScore::of(1),
                SimpleScore::of(-8),
                vec![pair_match(overlap(), -8, &a, &b)],
                true,
            ),
            ConstraintAnalysis::new(
                unassigned(),
                SimpleScore::of(1),
                SimpleScore::of(-1),
                vec![single_match(unassigned(), -1, &c)],
                false,
            ),
            ConstraintAnalysis::new(
                ConstraintRef::new("employee-rostering", "Desired time slot for an employee"),
                SimpleScore::of(0),
                SimpleScore::of(0),
                Vec::new(),
                false,
            ),
        ],
    );

    assert_eq!(explanation.total_match_count(), 2);
    assert_eq!(explanation.non_zero_constraints().len(), 2);
    assert_eq!(explanation.all_matches().len(), 2);

    let analysis = explanation.constraint("No overlapping shifts").unwrap();
    assert_eq!(analysis.score, SimpleScore::of(-8));
    assert_eq!(analysis.match_count(), 1);
    assert!(explanation.constraint("Unknown").is_none());

    let indictments = explanation.indictments();
    assert_eq!(indictments.len(), 3);
}

#[test]
fn test_indictment_groups_by_constraint() {
    let a = shift(1, "Amy");
    let b = shift(2, "Amy");
    let mut indictment = Indictment::new(EntityRef::new(&a));
    indictment.add_match(pair_match(overlap(), -8, &a, &b));
    indictment.add_match(single_match(unassigned(), -1, &a));
    indictment.add_match(pair_match(overlap(), -2, &a, &b));

    assert_eq!(indictment.score, SimpleScore::of(-11));
    assert_eq!(indictment.match_count(), 3);
    assert_eq!(indictment.constraint_count(), 2);

    let violated = indictment.violated_constraints();
    assert_eq!(violated[0].name, "Assign every shift");
    assert_eq!(violated[1].name, "No overlapping shifts");
}

#[test]
fn test_indictment_map_from_matches() {
    let a = shift(1, "Amy");
    let b = shift(2, "Amy");
    let c = shift(3, "Beth");

    let map = IndictmentMap::from_matches(vec![
        pair_match(overlap(), -8, &a, &b),
        single_match(unassigned(), -1, &c),
        single_match(unassigned(), -1, &a),
    ]);

    assert_eq!(map.len(), 3);
    assert!(!map.is_empty());
    let indictment_a = map.get(&EntityRef::new(&a)).unwrap();
    assert_eq!(indictment_a.score, SimpleScore::of(-9));
    assert_eq!(indictment_a.match_count(), 2);
    assert_eq!(map.get(&EntityRef::new(&b)).unwrap().score, SimpleScore::of(-8));
}

#[test]
fn test_worst_entities_order_and_ties() {
    let a = shift(1, "Amy");
    let b = shift(2, "Amy");
    let c = shift(3, "Beth");
    let d = shift(4, "Cleo");

    let map = IndictmentMap::from_matches(vec![
        single_match(unassigned(), -5, &d),
        single_match(unassigned(), -5, &c),
        pair_match(overlap(), -2, &a, &b),
        single_match(unassigned(), -20, &b),
    ]);

    let worst: Vec<i32> = map
        .worst_entities()
        .into_iter()
        .filter_map(|e| e.as_entity::<Shift>().map(|s| s.id))
        .collect();
    // b: -22, c and d tie at -5 (ordered by display), a: -2
    assert_eq!(worst, vec![2, 3, 4, 1]);

    let top = map.worst_n(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].score, SimpleScore::of(-22));
    assert_eq!(map.worst_n(10).len(), 4);
}

#[test]
fn test_empty_indictment_map() {
    let map: IndictmentMap<SimpleScore> = IndictmentMap::default();
    assert!(map.is_empty());
    assert!(map.worst_entities().is_empty());
    assert_eq!(map.entities().count(), 0);
}
