//! Row types of the derived analytical tables.
//!
//! Field renames pin the CSV headers and warehouse column names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-restaurant customer count and revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantStats {
    #[serde(rename = "restaurant_names")]
    pub restaurant: String,
    pub customer_count: u64,
    pub total_revenue: Decimal,
}

/// A dish ranked by number of orders within its restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularDish {
    #[serde(rename = "restaurant_names")]
    pub restaurant: String,
    #[serde(rename = "food_names")]
    pub dish: String,
    pub order_count: u64,
    #[serde(rename = "popularity_rank")]
    pub rank: u32,
}

/// A dish ranked by revenue within its restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitableDish {
    #[serde(rename = "restaurant_names")]
    pub restaurant: String,
    #[serde(rename = "food_names")]
    pub dish: String,
    pub total_revenue: Decimal,
    #[serde(rename = "profit_rank")]
    pub rank: u32,
}

/// Per-customer breadth of visits and favourite restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerStats {
    #[serde(rename = "first_name")]
    pub customer: String,
    pub restaurants_visited: u64,
    pub most_visited_restaurant: String,
}

/// The customer with the most visits at a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequentVisitor {
    #[serde(rename = "restaurant_names")]
    pub restaurant: String,
    #[serde(rename = "most_frequent_visitor")]
    pub customer: String,
    pub visit_count: u64,
}
