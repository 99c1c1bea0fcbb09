//! Visit counting shared by `customer_stats` and `frequent_visitors`.
//!
//! A visit is one order row; a customer ordering twice at a restaurant
//! visited it twice.

use std::collections::BTreeMap;

use crate::model::CleanedRecord;

/// Visit count of one customer at one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Visits<'a> {
    pub restaurant: &'a str,
    pub customer: &'a str,
    pub count: u64,
}

/// One entry per distinct (restaurant, customer) pair.
pub(crate) fn count_visits(records: &[CleanedRecord]) -> Vec<Visits<'_>> {
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.restaurant.as_str(), record.customer.as_str()))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((restaurant, customer), count)| Visits {
            restaurant,
            customer,
            count,
        })
        .collect()
}
