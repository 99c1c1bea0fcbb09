//! `restaurant_stats`: distinct customers and revenue per restaurant.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::model::{CleanedRecord, RestaurantStats};

use super::fixed_revenue;

/// One row per restaurant, ordered by restaurant name.
pub fn restaurant_stats(records: &[CleanedRecord]) -> Vec<RestaurantStats> {
    let mut groups: BTreeMap<&str, (BTreeSet<&str>, Decimal)> = BTreeMap::new();
    for record in records {
        let (customers, revenue) = groups.entry(record.restaurant.as_str()).or_default();
        customers.insert(record.customer.as_str());
        *revenue += record.cost;
    }

    groups
        .into_iter()
        .map(|(restaurant, (customers, revenue))| RestaurantStats {
            restaurant: restaurant.to_string(),
            customer_count: customers.len() as u64,
            total_revenue: fixed_revenue(revenue),
        })
        .collect()
}
