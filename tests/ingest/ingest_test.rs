//! Integration tests for ingestion and cleaning.
//!
//! These tests read real files from a scratch directory and check which
//! rows survive cleaning and how costs are normalized.

use std::fs;
use std::path::PathBuf;

use tablecheck::ingest::{self, IngestError};
use tempfile::TempDir;

fn write_source(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_and_clean_mixed_rows() {
    let (_dir, path) = write_source(
        "restaurant_names,food_names,first_name,food_cost\n\
         A,Pasta,Tom,10.00\n\
         A,,Tom,10.00\n\
         ,Pizza,Ann,8.00\n\
         B,Soup,Sue,\n\
         B,Soup,Sue,-1.00\n\
         B,Salad, Ann ,4.5\n",
    );

    let raw = ingest::load(&path).unwrap();
    assert_eq!(raw.len(), 6);

    let outcome = ingest::clean(&raw);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.dropped, 4);

    let salad = &outcome.records[1];
    assert_eq!(salad.customer, "Ann");
    assert_eq!(salad.cost.to_string(), "4.50");
}

#[test]
fn test_costs_are_rounded_to_two_places() {
    let (_dir, path) = write_source(
        "restaurant_names,food_names,first_name,food_cost\n\
         A,Pasta,Tom,10.005\n\
         A,Pasta,Tom,10.004\n\
         A,Pasta,Tom,1e1\n\
         A,Pasta,Tom,-0\n",
    );

    let cleaned = ingest::clean(&ingest::load(&path).unwrap()).records;
    let costs: Vec<String> = cleaned.iter().map(|r| r.cost.to_string()).collect();
    assert_eq!(costs, vec!["10.01", "10.00", "10.00", "0.00"]);
}

#[test]
fn test_costs_outside_fixed_point_range_are_dropped() {
    let (_dir, path) = write_source(
        "restaurant_names,food_names,first_name,food_cost\n\
         A,Caviar,Tom,99999999.99\n\
         A,Yacht,Tom,100000000\n",
    );

    let outcome = ingest::clean(&ingest::load(&path).unwrap());
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].dish, "Caviar");
}

#[test]
fn test_header_order_and_aliases() {
    let (_dir, path) = write_source(
        "Customer,Price,Notes,Restaurant Name,Dish\n\
         Tom,3.25,late,Bistro,Tart\n",
    );

    let raw = ingest::load(&path).unwrap();
    let cleaned = ingest::clean(&raw).records;
    assert_eq!(cleaned[0].restaurant, "Bistro");
    assert_eq!(cleaned[0].dish, "Tart");
    assert_eq!(cleaned[0].customer, "Tom");
    assert_eq!(cleaned[0].cost.to_string(), "3.25");
}

#[test]
fn test_quoted_fields() {
    let (_dir, path) = write_source(
        "restaurant_names,food_names,first_name,food_cost\n\
         \"Fish, Chips & Co\",\"Cod \"\"Special\"\"\",Tom,9.99\n",
    );

    let cleaned = ingest::clean(&ingest::load(&path).unwrap()).records;
    assert_eq!(cleaned[0].restaurant, "Fish, Chips & Co");
    assert_eq!(cleaned[0].dish, "Cod \"Special\"");
}

#[test]
fn test_source_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = ingest::load(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, IngestError::SourceNotFound(_)));
}

#[test]
fn test_malformed_cost_aborts_load() {
    let (_dir, path) = write_source(
        "restaurant_names,food_names,first_name,food_cost\n\
         A,Pasta,Tom,10.00\n\
         A,Pasta,Tom,ten\n",
    );

    let err = ingest::load(&path).unwrap_err();
    match err {
        IngestError::Parse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("ten"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_header_only_file() {
    let (_dir, path) = write_source("restaurant_names,food_names,first_name,food_cost\n");
    let raw = ingest::load(&path).unwrap();
    assert!(raw.is_empty());
    assert_eq!(ingest::clean(&raw).dropped, 0);
}
