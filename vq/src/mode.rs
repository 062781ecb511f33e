use std::collections::HashMap;
use std::hash::Hash;

use nohash_hasher::{BuildNoHashHasher, IsEnabled};

use crate::assign::histogram;
use crate::errors::VqError;

/// Most frequent label in `0..=limit`, lowest label on ties.
pub fn mode_with_array(labels: &[usize], limit: usize) -> Result<usize, VqError> {
    let counts = histogram(labels, limit + 1)?;
    let mut best = 0;
    for (label, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = label;
        }
    }
    Ok(best)
}

/// Most frequent value of an arbitrary integer sequence, smallest value on
/// ties. None if `values` is empty.
pub fn mode_with_map<T>(values: &[T]) -> Option<T>
where
    T: Copy + Eq + Hash + Ord + IsEnabled,
{
    let mut counts: HashMap<T, usize, BuildNoHashHasher<T>> = HashMap::default();
    for value in values {
        *counts.entry(*value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(value, _)| value)
}
