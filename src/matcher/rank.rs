use crate::model::Combination;

/// Order combinations by entry count, fewest first.
///
/// The sort is stable: combinations of equal size keep discovery order and
/// no secondary key (such as distance to the target) is applied.
pub fn rank(mut combinations: Vec<Combination>) -> Vec<Combination> {
    combinations.sort_by_key(Combination::len);
    combinations
}
