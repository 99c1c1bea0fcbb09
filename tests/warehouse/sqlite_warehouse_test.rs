//! Integration tests for loading exported tables into SQLite.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rusqlite::Connection;
use rust_decimal::Decimal;
use tablecheck::export::{table_path, Exporter};
use tablecheck::model::RawRecord;
use tablecheck::transform::{Session, TransformOptions};
use tablecheck::warehouse::{load_all, SqliteWarehouse, TableOutcome, Warehouse};
use tablecheck::TableName;

fn export_sample(dir: &Path) {
    let raw = vec![
        RawRecord::new("A", "Pasta", "Tom", Decimal::from_str("10.00").unwrap()),
        RawRecord::new("A", "Pasta", "Tom", Decimal::from_str("10.00").unwrap()),
        RawRecord::new("A", "Pizza", "Ann", Decimal::from_str("8.00").unwrap()),
        RawRecord::new("B", "Soup", "Ann", Decimal::from_str("4.25").unwrap()),
    ];
    let mut session = Session::from_raw(&raw);
    session.derive(&TransformOptions::default());
    Exporter::new(dir).export_session(&session).unwrap();
}

fn column_types(db: &Path, table: TableName) -> Vec<(String, String)> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info(\"{}\")", table.as_str()))
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))
        .unwrap();
    rows.collect::<Result<Vec<_>, _>>().unwrap()
}

#[tokio::test]
async fn test_load_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    export_sample(dir.path());

    let db = dir.path().join("warehouse.db");
    let warehouse = SqliteWarehouse::open(&db).unwrap();
    let report = load_all(&warehouse, dir.path(), &TableName::ALL).await;

    assert!(!report.is_degraded());
    assert_eq!(report.loaded().count(), 6);
    assert_eq!(warehouse.row_count(TableName::CleanedData).unwrap(), 4);
    assert_eq!(warehouse.row_count(TableName::RestaurantStats).unwrap(), 2);
    assert_eq!(warehouse.row_count(TableName::PopularDishes).unwrap(), 3);
    assert_eq!(warehouse.row_count(TableName::FrequentVisitors).unwrap(), 2);
}

#[tokio::test]
async fn test_reload_replaces_rows() {
    let dir = tempfile::tempdir().unwrap();
    export_sample(dir.path());

    let warehouse = SqliteWarehouse::open(&dir.path().join("warehouse.db")).unwrap();
    load_all(&warehouse, dir.path(), &TableName::ALL).await;
    let report = load_all(&warehouse, dir.path(), &TableName::ALL).await;

    assert!(!report.is_degraded());
    assert_eq!(warehouse.row_count(TableName::CleanedData).unwrap(), 4);
    assert_eq!(warehouse.row_count(TableName::CustomerStats).unwrap(), 2);
}

#[tokio::test]
async fn test_inferred_column_types() {
    let dir = tempfile::tempdir().unwrap();
    export_sample(dir.path());

    let db = dir.path().join("warehouse.db");
    let warehouse = SqliteWarehouse::open(&db).unwrap();
    load_all(&warehouse, dir.path(), &[TableName::RestaurantStats]).await;

    assert_eq!(
        column_types(&db, TableName::RestaurantStats),
        vec![
            ("restaurant_names".to_string(), "TEXT".to_string()),
            ("customer_count".to_string(), "INTEGER".to_string()),
            ("total_revenue".to_string(), "NUMERIC".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_files_are_skipped_without_failure() {
    let dir = tempfile::tempdir().unwrap();
    export_sample(dir.path());
    fs::remove_file(table_path(dir.path(), TableName::FrequentVisitors)).unwrap();

    let warehouse = SqliteWarehouse::open_in_memory().unwrap();
    let report = load_all(&warehouse, dir.path(), &TableName::ALL).await;

    assert!(!report.is_degraded());
    assert_eq!(report.skipped().collect::<Vec<_>>(), vec![TableName::FrequentVisitors]);
    assert_eq!(report.loaded().count(), 5);
}

#[tokio::test]
async fn test_failed_table_does_not_stop_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    export_sample(dir.path());
    // A ragged row makes the file unreadable.
    fs::write(
        table_path(dir.path(), TableName::CustomerStats),
        "first_name,restaurants_visited\nTom,1,extra\n",
    )
    .unwrap();

    let warehouse = SqliteWarehouse::open_in_memory().unwrap();
    let report = load_all(&warehouse, dir.path(), &TableName::ALL).await;

    assert!(report.is_degraded());
    let failed: Vec<TableName> = report.failed().map(|(table, _)| table).collect();
    assert_eq!(failed, vec![TableName::CustomerStats]);
    assert!(matches!(
        report.outcomes.last(),
        Some(TableOutcome::Loaded(summary)) if summary.table == TableName::FrequentVisitors
    ));
}

#[tokio::test]
async fn test_load_csv_reports_row_count() {
    let dir = tempfile::tempdir().unwrap();
    export_sample(dir.path());

    let warehouse = SqliteWarehouse::open_in_memory().unwrap();
    let summary = warehouse
        .load_csv(
            TableName::ProfitableDishes,
            &table_path(dir.path(), TableName::ProfitableDishes),
        )
        .await
        .unwrap();

    assert_eq!(summary.table, TableName::ProfitableDishes);
    assert_eq!(summary.output_rows, 3);
}

#[tokio::test]
async fn test_reload_after_empty_export_keeps_numeric_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(dir.path(), TableName::RestaurantStats);
    let db = dir.path().join("warehouse.db");
    let warehouse = SqliteWarehouse::open(&db).unwrap();

    fs::write(&path, "restaurant_names,customer_count,total_revenue\n").unwrap();
    warehouse
        .load_csv(TableName::RestaurantStats, &path)
        .await
        .unwrap();
    assert_eq!(column_types(&db, TableName::RestaurantStats)[1].1, "INTEGER");

    fs::write(&path, "restaurant_names,customer_count,total_revenue\nA,2,28.00\n").unwrap();
    warehouse
        .load_csv(TableName::RestaurantStats, &path)
        .await
        .unwrap();

    let conn = Connection::open(&db).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT typeof(customer_count) FROM restaurant_stats",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "integer");
}

#[tokio::test]
async fn test_reload_picks_up_changed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(dir.path(), TableName::FrequentVisitors);
    let db = dir.path().join("warehouse.db");
    let warehouse = SqliteWarehouse::open(&db).unwrap();

    fs::write(&path, "restaurant_names,visit_count\nA,one\n").unwrap();
    warehouse
        .load_csv(TableName::FrequentVisitors, &path)
        .await
        .unwrap();
    assert_eq!(column_types(&db, TableName::FrequentVisitors)[1].1, "TEXT");

    fs::write(
        &path,
        "restaurant_names,most_frequent_visitor,visit_count\nA,Tom,3\n",
    )
    .unwrap();
    warehouse
        .load_csv(TableName::FrequentVisitors, &path)
        .await
        .unwrap();

    assert_eq!(
        column_types(&db, TableName::FrequentVisitors),
        vec![
            ("restaurant_names".to_string(), "TEXT".to_string()),
            ("most_frequent_visitor".to_string(), "TEXT".to_string()),
            ("visit_count".to_string(), "INTEGER".to_string()),
        ]
    );
    assert_eq!(warehouse.row_count(TableName::FrequentVisitors).unwrap(), 1);
}
