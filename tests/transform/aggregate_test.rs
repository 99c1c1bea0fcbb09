//! Integration tests for the derived tables.
//!
//! Each test builds a small cleaned table and checks the exact rows,
//! including rank order and tie-breaks.

use std::str::FromStr;

use rust_decimal::Decimal;
use tablecheck::model::{
    CleanedRecord, CustomerStats, FrequentVisitor, PopularDish, ProfitableDish, RawRecord,
    RestaurantStats,
};
use tablecheck::transform::{
    customer_stats, frequent_visitors, popular_dishes, profitable_dishes, restaurant_stats,
    DerivedTables, Session, TransformOptions,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn rec(restaurant: &str, dish: &str, customer: &str, cost: &str) -> CleanedRecord {
    CleanedRecord {
        restaurant: restaurant.to_string(),
        dish: dish.to_string(),
        customer: customer.to_string(),
        cost: dec(cost),
    }
}

#[test]
fn test_three_row_scenario() {
    let raw = vec![
        RawRecord::new("A", "Pasta", "Tom", dec("10.00")),
        RawRecord::new("A", "Pasta", "Tom", dec("10.00")),
        RawRecord::new("A", "Pizza", "Ann", dec("8.00")),
    ];

    let mut session = Session::from_raw(&raw);
    assert_eq!(session.cleaned().len(), 3);

    let derived = session.derive(&TransformOptions::default());
    assert_eq!(
        derived.restaurant_stats,
        vec![RestaurantStats {
            restaurant: "A".into(),
            customer_count: 2,
            total_revenue: dec("28.00"),
        }]
    );
    assert_eq!(derived.restaurant_stats[0].total_revenue.to_string(), "28.00");
    assert_eq!(
        derived.popular_dishes,
        vec![
            PopularDish {
                restaurant: "A".into(),
                dish: "Pasta".into(),
                order_count: 2,
                rank: 1,
            },
            PopularDish {
                restaurant: "A".into(),
                dish: "Pizza".into(),
                order_count: 1,
                rank: 2,
            },
        ]
    );
}

#[test]
fn test_restaurant_stats_counts_distinct_customers() {
    let records = vec![
        rec("B", "Soup", "Sue", "4.00"),
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Salad", "Tom", "6.50"),
        rec("B", "Soup", "Ann", "4.00"),
    ];

    let stats = restaurant_stats(&records);
    assert_eq!(
        stats,
        vec![
            RestaurantStats {
                restaurant: "A".into(),
                customer_count: 1,
                total_revenue: dec("26.50"),
            },
            RestaurantStats {
                restaurant: "B".into(),
                customer_count: 2,
                total_revenue: dec("8.00"),
            },
        ]
    );
}

#[test]
fn test_popular_dishes_cutoff_and_ties() {
    // Seven dishes at one restaurant; "Beta" and "Alpha" tie on 3 orders.
    let mut records = Vec::new();
    for (dish, orders) in [
        ("Beta", 3),
        ("Alpha", 3),
        ("Gamma", 5),
        ("Delta", 1),
        ("Eps", 2),
        ("Zeta", 1),
        ("Eta", 4),
    ] {
        for _ in 0..orders {
            records.push(rec("R", dish, "Tom", "1.00"));
        }
    }

    let ranked: Vec<(String, u64, u32)> = popular_dishes(&records, 5)
        .into_iter()
        .map(|d| (d.dish, d.order_count, d.rank))
        .collect();

    assert_eq!(
        ranked,
        vec![
            ("Gamma".to_string(), 5, 1),
            ("Eta".to_string(), 4, 2),
            ("Alpha".to_string(), 3, 3),
            ("Beta".to_string(), 3, 4),
            ("Eps".to_string(), 2, 5),
        ]
    );
}

#[test]
fn test_profitable_dishes_rank_by_revenue_not_orders() {
    let records = vec![
        rec("A", "Tea", "Tom", "1.00"),
        rec("A", "Tea", "Ann", "1.00"),
        rec("A", "Tea", "Sue", "1.00"),
        rec("A", "Steak", "Tom", "25.00"),
        rec("B", "Bread", "Tom", "2.00"),
    ];

    let dishes = profitable_dishes(&records, 5);
    assert_eq!(
        dishes,
        vec![
            ProfitableDish {
                restaurant: "A".into(),
                dish: "Steak".into(),
                total_revenue: dec("25.00"),
                rank: 1,
            },
            ProfitableDish {
                restaurant: "A".into(),
                dish: "Tea".into(),
                total_revenue: dec("3.00"),
                rank: 2,
            },
            ProfitableDish {
                restaurant: "B".into(),
                dish: "Bread".into(),
                total_revenue: dec("2.00"),
                rank: 1,
            },
        ]
    );
}

#[test]
fn test_customer_stats() {
    let records = vec![
        rec("A", "Pasta", "Tom", "10.00"),
        rec("B", "Soup", "Tom", "4.00"),
        rec("B", "Soup", "Tom", "4.00"),
        rec("C", "Tart", "Tom", "3.00"),
        rec("A", "Pasta", "Ann", "10.00"),
        rec("C", "Tart", "Ann", "3.00"),
        rec("C", "Tart", "Bob", "3.00"),
    ];

    let stats = customer_stats(&records);
    assert_eq!(
        stats,
        vec![
            CustomerStats {
                customer: "Tom".into(),
                restaurants_visited: 3,
                most_visited_restaurant: "B".into(),
            },
            // Ann ties A and C at one visit each; A wins on name.
            CustomerStats {
                customer: "Ann".into(),
                restaurants_visited: 2,
                most_visited_restaurant: "A".into(),
            },
            CustomerStats {
                customer: "Bob".into(),
                restaurants_visited: 1,
                most_visited_restaurant: "C".into(),
            },
        ]
    );
}

#[test]
fn test_frequent_visitors() {
    let records = vec![
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Pizza", "Ann", "8.00"),
        rec("B", "Soup", "Zed", "4.00"),
        rec("B", "Soup", "Amy", "4.00"),
    ];

    let visitors = frequent_visitors(&records);
    assert_eq!(
        visitors,
        vec![
            FrequentVisitor {
                restaurant: "A".into(),
                customer: "Tom".into(),
                visit_count: 3,
            },
            FrequentVisitor {
                restaurant: "B".into(),
                customer: "Amy".into(),
                visit_count: 1,
            },
        ]
    );
}

#[test]
fn test_results_do_not_depend_on_input_order() {
    let records = vec![
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Pizza", "Ann", "8.00"),
        rec("B", "Soup", "Ann", "4.00"),
        rec("B", "Tart", "Tom", "4.00"),
        rec("A", "Salad", "Sue", "8.00"),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let options = TransformOptions::default();
    assert_eq!(
        DerivedTables::compute(&records, &options),
        DerivedTables::compute(&reversed, &options)
    );
}

#[test]
fn test_empty_input_gives_empty_tables() {
    let derived = DerivedTables::compute(&[], &TransformOptions::default());
    assert_eq!(derived, DerivedTables::default());
}

#[test]
fn test_custom_cutoff() {
    let records = vec![
        rec("A", "Pasta", "Tom", "10.00"),
        rec("A", "Pizza", "Ann", "8.00"),
        rec("A", "Salad", "Sue", "6.00"),
    ];

    let derived = DerivedTables::compute(&records, &TransformOptions::default().with_dish_rank_cutoff(2));
    assert_eq!(derived.popular_dishes.len(), 2);
    assert_eq!(derived.profitable_dishes.len(), 2);
    assert_eq!(derived.profitable_dishes[1].dish, "Pizza");
}
