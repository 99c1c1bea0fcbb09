//! `frequent_visitors`: each restaurant's most frequent customer.

use crate::model::{CleanedRecord, FrequentVisitor};

use super::rank::{desc_then_name, rank_within};
use super::visits::count_visits;

/// One row per restaurant, ordered by `visit_count` descending, then
/// restaurant name. Ties between customers go to the name that sorts first.
pub fn frequent_visitors(records: &[CleanedRecord]) -> Vec<FrequentVisitor> {
    let mut visitors: Vec<FrequentVisitor> = rank_within(
        count_visits(records),
        |v| v.restaurant,
        |a, b| desc_then_name((a.count, a.customer), (b.count, b.customer)),
        1,
    )
    .into_iter()
    .map(|ranked| FrequentVisitor {
        restaurant: ranked.row.restaurant.to_string(),
        customer: ranked.row.customer.to_string(),
        visit_count: ranked.row.count,
    })
    .collect();

    visitors.sort_by(|a, b| {
        b.visit_count
            .cmp(&a.visit_count)
            .then_with(|| a.restaurant.cmp(&b.restaurant))
    });
    visitors
}
