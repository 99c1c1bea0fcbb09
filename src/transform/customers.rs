//! `customer_stats`: how many restaurants each customer visited, and which
//! one most often.

use std::collections::BTreeMap;

use crate::model::{CleanedRecord, CustomerStats};

use super::rank::{desc_then_name, rank_within};
use super::visits::count_visits;

/// One row per customer, ordered by `restaurants_visited` descending, then
/// customer name.
///
/// The favourite restaurant is the one with the most visits; on a tie the
/// restaurant name that sorts first wins.
pub fn customer_stats(records: &[CleanedRecord]) -> Vec<CustomerStats> {
    let visits = count_visits(records);

    // Every pair is distinct, so the pair count per customer is the
    // number of distinct restaurants.
    let mut restaurants_visited: BTreeMap<&str, u64> = BTreeMap::new();
    for v in &visits {
        *restaurants_visited.entry(v.customer).or_default() += 1;
    }

    let favourites = rank_within(
        visits,
        |v| v.customer,
        |a, b| desc_then_name((a.count, a.restaurant), (b.count, b.restaurant)),
        1,
    );

    let mut stats: Vec<CustomerStats> = favourites
        .into_iter()
        .map(|ranked| CustomerStats {
            customer: ranked.row.customer.to_string(),
            restaurants_visited: restaurants_visited
                .get(ranked.row.customer)
                .copied()
                .unwrap_or_default(),
            most_visited_restaurant: ranked.row.restaurant.to_string(),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.restaurants_visited
            .cmp(&a.restaurants_visited)
            .then_with(|| a.customer.cmp(&b.customer))
    });
    stats
}
