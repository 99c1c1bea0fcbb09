//! Partitioned row numbering.
//!
//! The equivalent of `ROW_NUMBER() OVER (PARTITION BY .. ORDER BY ..)`
//! followed by a `rank <= n` filter: group rows by a partition key, sort
//! each group with a total order, number the rows from 1, cut.
//!
//! The comparator must be total over rows that can share a partition,
//! otherwise equal rows would keep their input order and the output would
//! depend on how the input happened to be arranged.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A row with its 1-based position inside its partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    pub rank: u32,
    pub row: T,
}

/// Rank rows within partitions and keep those with `rank <= cutoff`.
///
/// Output is ordered by partition key, then rank.
pub fn rank_within<T, K, P, C>(rows: Vec<T>, partition: P, compare: C, cutoff: u32) -> Vec<Ranked<T>>
where
    K: Ord,
    P: Fn(&T) -> K,
    C: Fn(&T, &T) -> Ordering,
{
    let mut partitions: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for row in rows {
        partitions.entry(partition(&row)).or_default().push(row);
    }

    let mut ranked = Vec::new();
    for (_, mut group) in partitions {
        group.sort_by(&compare);
        ranked.extend(
            group
                .into_iter()
                .take(cutoff as usize)
                .zip(1..)
                .map(|(row, rank)| Ranked { rank, row }),
        );
    }
    ranked
}

/// Descending order on a measure, ascending on a name for ties.
pub fn desc_then_name<M: Ord>(a: (M, &str), b: (M, &str)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1))
}
