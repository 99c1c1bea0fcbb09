//! `popular_dishes` and `profitable_dishes`: top dishes per restaurant.
//!
//! Both rank (restaurant, dish) groups within each restaurant, by order
//! count or by revenue, descending. Ties go to the dish name that sorts
//! first.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::model::{CleanedRecord, PopularDish, ProfitableDish};

use super::fixed_revenue;
use super::rank::{desc_then_name, rank_within};

#[derive(Debug, Clone)]
struct DishTotals<'a> {
    restaurant: &'a str,
    dish: &'a str,
    orders: u64,
    revenue: Decimal,
}

fn dish_totals(records: &[CleanedRecord]) -> Vec<DishTotals<'_>> {
    let mut groups: BTreeMap<(&str, &str), (u64, Decimal)> = BTreeMap::new();
    for record in records {
        let (orders, revenue) = groups
            .entry((record.restaurant.as_str(), record.dish.as_str()))
            .or_default();
        *orders += 1;
        *revenue += record.cost;
    }

    groups
        .into_iter()
        .map(|((restaurant, dish), (orders, revenue))| DishTotals {
            restaurant,
            dish,
            orders,
            revenue,
        })
        .collect()
}

/// Up to `cutoff` dishes per restaurant by order count.
///
/// Ordered by restaurant name, then order count descending.
pub fn popular_dishes(records: &[CleanedRecord], cutoff: u32) -> Vec<PopularDish> {
    rank_within(
        dish_totals(records),
        |d| d.restaurant,
        |a, b| desc_then_name((a.orders, a.dish), (b.orders, b.dish)),
        cutoff,
    )
    .into_iter()
    .map(|ranked| PopularDish {
        restaurant: ranked.row.restaurant.to_string(),
        dish: ranked.row.dish.to_string(),
        order_count: ranked.row.orders,
        rank: ranked.rank,
    })
    .collect()
}

/// Up to `cutoff` dishes per restaurant by revenue.
///
/// Ordered by restaurant name, then revenue descending.
pub fn profitable_dishes(records: &[CleanedRecord], cutoff: u32) -> Vec<ProfitableDish> {
    rank_within(
        dish_totals(records),
        |d| d.restaurant,
        |a, b| desc_then_name((a.revenue, a.dish), (b.revenue, b.dish)),
        cutoff,
    )
    .into_iter()
    .map(|ranked| ProfitableDish {
        restaurant: ranked.row.restaurant.to_string(),
        dish: ranked.row.dish.to_string(),
        total_revenue: fixed_revenue(ranked.row.revenue),
        rank: ranked.rank,
    })
    .collect()
}
