// src/model/table.rs
use std::fmt;

use serde::Serialize;

use crate::sql::{ColumnDef, ColumnType, CreateTable};

use super::derived::{CustomerStats, FrequentVisitor, PopularDish, ProfitableDish, RestaurantStats};
use super::record::{CleanedRecord, COST_PRECISION, COST_SCALE};

/// Precision used for revenue sums.
const REVENUE_PRECISION: u8 = 18;

/// The six tables produced by a run, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableName {
    CleanedData,
    RestaurantStats,
    CustomerStats,
    PopularDishes,
    ProfitableDishes,
    FrequentVisitors,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::CleanedData,
        TableName::RestaurantStats,
        TableName::CustomerStats,
        TableName::PopularDishes,
        TableName::ProfitableDishes,
        TableName::FrequentVisitors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::CleanedData => "cleaned_data",
            TableName::RestaurantStats => "restaurant_stats",
            TableName::CustomerStats => "customer_stats",
            TableName::PopularDishes => "popular_dishes",
            TableName::ProfitableDishes => "profitable_dishes",
            TableName::FrequentVisitors => "frequent_visitors",
        }
    }

    /// File name of the exported CSV.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Column definitions, in export order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let cost = ColumnType::Decimal(COST_PRECISION as u8, COST_SCALE as u8);
        let revenue = ColumnType::Decimal(REVENUE_PRECISION, COST_SCALE as u8);
        let text = |name: &str| ColumnDef::new(name, ColumnType::String).not_null();
        let int = |name: &str| ColumnDef::new(name, ColumnType::Int64).not_null();

        match self {
            TableName::CleanedData => vec![
                text("restaurant_names"),
                text("food_names"),
                text("first_name"),
                ColumnDef::new("food_cost", cost).not_null(),
            ],
            TableName::RestaurantStats => vec![
                text("restaurant_names"),
                int("customer_count"),
                ColumnDef::new("total_revenue", revenue).not_null(),
            ],
            TableName::CustomerStats => vec![
                text("first_name"),
                int("restaurants_visited"),
                text("most_visited_restaurant"),
            ],
            TableName::PopularDishes => vec![
                text("restaurant_names"),
                text("food_names"),
                int("order_count"),
                int("popularity_rank"),
            ],
            TableName::ProfitableDishes => vec![
                text("restaurant_names"),
                text("food_names"),
                ColumnDef::new("total_revenue", revenue).not_null(),
                int("profit_rank"),
            ],
            TableName::FrequentVisitors => vec![
                text("restaurant_names"),
                text("most_frequent_visitor"),
                int("visit_count"),
            ],
        }
    }

    /// CREATE TABLE statement for provisioning the warehouse table.
    pub fn create_table(&self) -> CreateTable {
        CreateTable::new(self.as_str())
            .if_not_exists()
            .columns(self.columns())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A row type that is exported as exactly one table.
pub trait TableRow: Serialize {
    const TABLE: TableName;
}

impl TableRow for CleanedRecord {
    const TABLE: TableName = TableName::CleanedData;
}

impl TableRow for RestaurantStats {
    const TABLE: TableName = TableName::RestaurantStats;
}

impl TableRow for CustomerStats {
    const TABLE: TableName = TableName::CustomerStats;
}

impl TableRow for PopularDish {
    const TABLE: TableName = TableName::PopularDishes;
}

impl TableRow for ProfitableDish {
    const TABLE: TableName = TableName::ProfitableDishes;
}

impl TableRow for FrequentVisitor {
    const TABLE: TableName = TableName::FrequentVisitors;
}
