//! Shared helpers for the constraint kinds.

use rosterforge_core::score::Score;
use rosterforge_core::ImpactType;

/// Signed contribution of one match: `weight * magnitude`, negated for penalties.
///
/// ```
/// use rosterforge_core::{ImpactType, SimpleScore};
/// use rosterforge_scoring::constraint::shared::impact;
///
/// assert_eq!(impact(SimpleScore::of(2), ImpactType::Penalty, 30), SimpleScore::of(-60));
/// assert_eq!(impact(SimpleScore::of(2), ImpactType::Reward, 30), SimpleScore::of(60));
/// ```
#[inline]
pub fn impact<Sc: Score>(weight: Sc, impact_type: ImpactType, magnitude: i64) -> Sc {
    weight.scale(magnitude * impact_type.sign())
}

/// Pairs an entity takes part in. Usually a handful, so kept inline.
pub(crate) type PairList = smallvec::SmallVec<[(usize, usize); 4]>;

/// Removes `pair` from an unordered pair list.
#[inline]
pub(crate) fn remove_pair(list: &mut PairList, pair: (usize, usize)) {
    if let Some(pos) = list.iter().position(|p| *p == pair) {
        list.swap_remove(pos);
    }
}
