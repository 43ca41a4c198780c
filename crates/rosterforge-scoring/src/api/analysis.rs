//! Score explanation: matches, per-constraint totals and per-fact indictments.
//!
//! Every map here is ordered, so two explanations of the same facts list
//! constraints, matches and indicted facts in the same order.

use std::any::Any;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rosterforge_core::score::Score;
use rosterforge_core::ConstraintRef;

/// A fact taking part in a constraint match.
///
/// Identity is the fact's type plus its display string; the fact itself is
/// kept behind an `Arc` so callers can downcast it again.
#[derive(Clone)]
pub struct EntityRef {
    /// Full type name of the fact, e.g. `my_crate::domain::Shift`.
    pub type_name: String,
    /// How the fact is shown in explanations.
    pub display: String,
    fact: Arc<dyn Any + Send + Sync>,
}

impl EntityRef {
    /// Shows the fact with its `Debug` output.
    pub fn new<T>(fact: &T) -> Self
    where
        T: Clone + fmt::Debug + Send + Sync + 'static,
    {
        Self::with_display(fact, format!("{fact:?}"))
    }

    pub fn with_display<T>(fact: &T, display: String) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<T>().to_owned(),
            display,
            fact: Arc::new(fact.clone()),
        }
    }

    /// Downcasts to the fact's concrete type.
    pub fn as_entity<T: 'static>(&self) -> Option<&T> {
        self.fact.downcast_ref()
    }

    /// Type name without its module path.
    pub fn short_type_name(&self) -> &str {
        match self.type_name.rfind("::") {
            Some(i) => &self.type_name[i + 2..],
            None => &self.type_name,
        }
    }

    fn identity(&self) -> (&str, &str) {
        (&self.type_name, &self.display)
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.short_type_name(), self.display)
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for EntityRef {}

impl PartialOrd for EntityRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl std::hash::Hash for EntityRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// The facts behind one match and a line describing them.
#[derive(Debug, Clone)]
pub struct ConstraintJustification {
    pub entities: Vec<EntityRef>,
    pub description: String,
}

impl ConstraintJustification {
    /// Describes the match by listing its facts.
    pub fn new(entities: Vec<EntityRef>) -> Self {
        let description = entities
            .iter()
            .map(|e| e.display.as_str())
            .collect::<Vec<_>>()
            .join(" + ");
        Self::with_description(entities, description)
    }

    pub fn with_description(entities: Vec<EntityRef>, description: String) -> Self {
        Self {
            entities,
            description,
        }
    }
}

/// One match of one constraint.
#[derive(Debug, Clone)]
pub struct DetailedConstraintMatch<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Signed impact, weight and magnitude applied.
    pub score: Sc,
    pub justification: ConstraintJustification,
}

impl<Sc: Score> DetailedConstraintMatch<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        score: Sc,
        justification: ConstraintJustification,
    ) -> Self {
        Self {
            constraint_ref,
            score,
            justification,
        }
    }
}

/// Everything one constraint contributed.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Configured weight.
    pub weight: Sc,
    /// Sum of all match impacts.
    pub score: Sc,
    pub matches: Vec<DetailedConstraintMatch<Sc>>,
    /// Whether the weight has a hard component.
    pub is_hard: bool,
}

impl<Sc: Score> ConstraintAnalysis<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        weight: Sc,
        score: Sc,
        matches: Vec<DetailedConstraintMatch<Sc>>,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            weight,
            score,
            matches,
            is_hard,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// A total score together with each constraint's share of it.
///
/// Contributions are never merged across constraints.
#[derive(Debug, Clone)]
pub struct ScoreExplanation<Sc: Score> {
    pub score: Sc,
    /// One entry per constraint, in constraint-set order.
    pub constraint_analyses: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    pub fn new(score: Sc, constraint_analyses: Vec<ConstraintAnalysis<Sc>>) -> Self {
        Self {
            score,
            constraint_analyses,
        }
    }

    /// Looks up a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses.iter().find(|a| a.name() == name)
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses
            .iter()
            .fold(0, |n, a| n + a.match_count())
    }

    /// Constraints whose total is not zero.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis<Sc>> {
        let mut out = Vec::new();
        for analysis in &self.constraint_analyses {
            if !analysis.score.is_zero() {
                out.push(analysis);
            }
        }
        out
    }

    /// Every match of every constraint, constraint by constraint.
    pub fn all_matches(&self) -> Vec<&DetailedConstraintMatch<Sc>> {
        let mut out = Vec::with_capacity(self.total_match_count());
        for analysis in &self.constraint_analyses {
            out.extend(analysis.matches.iter());
        }
        out
    }

    pub fn indictments(&self) -> IndictmentMap<Sc> {
        IndictmentMap::from_matches(self.all_matches().into_iter().cloned())
    }
}

/// Every match a single fact takes part in.
#[derive(Debug, Clone)]
pub struct Indictment<Sc: Score> {
    pub entity: EntityRef,
    /// Sum of the impacts of those matches.
    pub score: Sc,
    pub constraint_matches: BTreeMap<ConstraintRef, Vec<DetailedConstraintMatch<Sc>>>,
}

impl<Sc: Score> Indictment<Sc> {
    pub fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            score: Sc::zero(),
            constraint_matches: BTreeMap::new(),
        }
    }

    pub fn add_match(&mut self, constraint_match: DetailedConstraintMatch<Sc>) {
        self.score = self.score + constraint_match.score;
        let key = constraint_match.constraint_ref.clone();
        self.constraint_matches
            .entry(key)
            .or_default()
            .push(constraint_match);
    }

    pub fn match_count(&self) -> usize {
        self.constraint_matches.values().map(Vec::len).sum()
    }

    /// Constraints this fact matched, in `ConstraintRef` order.
    pub fn violated_constraints(&self) -> Vec<&ConstraintRef> {
        self.constraint_matches.keys().collect()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraint_matches.len()
    }
}

/// Indictments of every fact that took part in some match.
#[derive(Debug, Clone)]
pub struct IndictmentMap<Sc: Score> {
    pub indictments: BTreeMap<EntityRef, Indictment<Sc>>,
}

impl<Sc: Score> IndictmentMap<Sc> {
    pub fn new() -> Self {
        Self {
            indictments: BTreeMap::new(),
        }
    }

    /// Records each match against every fact it involves.
    pub fn from_matches(matches: impl IntoIterator<Item = DetailedConstraintMatch<Sc>>) -> Self {
        let mut map = Self::new();
        for m in matches {
            for entity in &m.justification.entities {
                if let Some(indictment) = map.indictments.get_mut(entity) {
                    indictment.add_match(m.clone());
                } else {
                    let mut indictment = Indictment::new(entity.clone());
                    indictment.add_match(m.clone());
                    map.indictments.insert(entity.clone(), indictment);
                }
            }
        }
        map
    }

    pub fn get(&self, entity: &EntityRef) -> Option<&Indictment<Sc>> {
        self.indictments.get(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityRef> {
        self.indictments.keys()
    }

    /// Facts from the most negative total upwards; ties keep fact order.
    pub fn worst_entities(&self) -> Vec<&EntityRef> {
        let mut ranked: Vec<&Indictment<Sc>> = self.indictments.values().collect();
        // stable sort, so equal scores stay in map order
        ranked.sort_by(|a, b| a.score.cmp(&b.score));
        ranked.into_iter().map(|i| &i.entity).collect()
    }

    /// The `n` facts with the most negative totals.
    pub fn worst_n(&self, n: usize) -> Vec<&Indictment<Sc>> {
        let mut ranked: Vec<&Indictment<Sc>> = self.indictments.values().collect();
        ranked.sort_by(|a, b| a.score.cmp(&b.score));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.indictments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indictments.is_empty()
    }
}

impl<Sc: Score> Default for IndictmentMap<Sc> {
    fn default() -> Self {
        Self::new()
    }
}
