//! Integration tests for CSV export.

use std::fs;
use std::str::FromStr;

use rust_decimal::Decimal;
use tablecheck::export::{read_table, table_path, Exporter};
use tablecheck::model::{
    CleanedRecord, CustomerStats, FrequentVisitor, PopularDish, ProfitableDish, RawRecord,
    RestaurantStats,
};
use tablecheck::transform::{Session, TransformOptions};
use tablecheck::TableName;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_session() -> Session {
    let raw = vec![
        RawRecord::new("Bistro", "Tart", "Ann", dec("4.5")),
        RawRecord::new("Bistro", "Tart", "Tom", dec("4.50")),
        RawRecord::new("Bistro", "Steak", "Tom", dec("21.999")),
        RawRecord::new("Fish, Chips & Co", "Cod", "Ann", dec("9.99")),
        RawRecord {
            customer: None,
            ..RawRecord::new("Bistro", "Soup", "", dec("3.00"))
        },
    ];
    let mut session = Session::from_raw(&raw);
    session.derive(&TransformOptions::default());
    session
}

#[test]
fn test_exports_all_six_tables_in_load_order() {
    let dir = tempfile::tempdir().unwrap();
    let session = sample_session();

    let exported = Exporter::new(dir.path()).export_session(&session).unwrap();
    let tables: Vec<TableName> = exported.iter().map(|f| f.table).collect();
    assert_eq!(
        tables,
        vec![
            TableName::CleanedData,
            TableName::RestaurantStats,
            TableName::CustomerStats,
            TableName::PopularDishes,
            TableName::ProfitableDishes,
            TableName::FrequentVisitors,
        ]
    );
    for file in &exported {
        assert!(file.path.exists(), "{} missing", file.path.display());
        assert_eq!(file.path, table_path(dir.path(), file.table));
    }
}

#[test]
fn test_exported_tables_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let session = sample_session();
    Exporter::new(dir.path()).export_session(&session).unwrap();

    let cleaned: Vec<CleanedRecord> =
        read_table(&table_path(dir.path(), TableName::CleanedData)).unwrap();
    assert_eq!(cleaned, session.cleaned());

    let stats: Vec<RestaurantStats> =
        read_table(&table_path(dir.path(), TableName::RestaurantStats)).unwrap();
    let revenue: Decimal = stats.iter().map(|s| s.total_revenue).sum();
    assert_eq!(revenue, dec("40.99"));

    let customers: Vec<CustomerStats> =
        read_table(&table_path(dir.path(), TableName::CustomerStats)).unwrap();
    assert_eq!(customers.len(), 2);

    let popular: Vec<PopularDish> =
        read_table(&table_path(dir.path(), TableName::PopularDishes)).unwrap();
    assert_eq!(popular[0].dish, "Tart");
    assert_eq!(popular[0].order_count, 2);

    let profitable: Vec<ProfitableDish> =
        read_table(&table_path(dir.path(), TableName::ProfitableDishes)).unwrap();
    assert_eq!(profitable[0].dish, "Steak");
    assert_eq!(profitable[0].total_revenue, dec("22.00"));

    let visitors: Vec<FrequentVisitor> =
        read_table(&table_path(dir.path(), TableName::FrequentVisitors)).unwrap();
    assert_eq!(visitors.len(), 2);
}

#[test]
fn test_cleaned_data_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    Exporter::new(dir.path())
        .export_session(&sample_session())
        .unwrap();

    let text = fs::read_to_string(table_path(dir.path(), TableName::CleanedData)).unwrap();
    assert_eq!(
        text,
        "restaurant_names,food_names,first_name,food_cost\n\
         Bistro,Tart,Ann,4.50\n\
         Bistro,Tart,Tom,4.50\n\
         Bistro,Steak,Tom,22.00\n\
         \"Fish, Chips & Co\",Cod,Ann,9.99\n"
    );
}

#[test]
fn test_empty_session_exports_headers_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::from_raw(&[]);
    session.derive(&TransformOptions::default());

    let exported = Exporter::new(dir.path()).export_session(&session).unwrap();
    assert_eq!(exported.len(), 6);

    for file in exported {
        assert_eq!(file.rows, 0);
        let text = fs::read_to_string(&file.path).unwrap();
        assert_eq!(text.lines().count(), 1, "{} should be header only", file.table);
        let header: Vec<String> = file.table.columns().into_iter().map(|c| c.name).collect();
        assert_eq!(text.trim_end(), header.join(","));
    }
}

#[test]
fn test_underived_session_exports_cleaned_only() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::from_raw(&[RawRecord::new("A", "Pasta", "Tom", dec("1"))]);

    let exported = Exporter::new(dir.path()).export_session(&session).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].table, TableName::CleanedData);
    assert!(!table_path(dir.path(), TableName::RestaurantStats).exists());
}

#[test]
fn test_export_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");

    Exporter::new(&nested)
        .export_session(&sample_session())
        .unwrap();
    assert!(table_path(&nested, TableName::FrequentVisitors).exists());
}
