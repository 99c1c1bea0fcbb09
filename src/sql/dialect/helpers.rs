//! Shared helper functions for SQL dialect implementations.

use crate::sql::types::ColumnType;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: DuckDB, SQLite
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: BigQuery
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "\\`"))
}

// =============================================================================
// Data Types
// =============================================================================

/// Emit data type for BigQuery.
pub fn emit_data_type_bigquery(ty: &ColumnType) -> String {
    match ty {
        ColumnType::Int64 => "INT64".into(),
        // NUMERIC caps at (29, 9); wider values need BIGNUMERIC
        ColumnType::Decimal(p, s) if *p <= 29 && *s <= 9 => format!("NUMERIC({}, {})", p, s),
        ColumnType::Decimal(p, s) => format!("BIGNUMERIC({}, {})", p, s),
        ColumnType::String => "STRING".into(),
    }
}

/// Emit data type for DuckDB.
pub fn emit_data_type_duckdb(ty: &ColumnType) -> String {
    match ty {
        ColumnType::Int64 => "BIGINT".into(),
        ColumnType::Decimal(p, s) => format!("DECIMAL({}, {})", p, s),
        ColumnType::String => "VARCHAR".into(),
    }
}

/// Emit data type for SQLite (type affinity names).
pub fn emit_data_type_sqlite(ty: &ColumnType) -> String {
    match ty {
        ColumnType::Int64 => "INTEGER".into(),
        ColumnType::Decimal(..) => "NUMERIC".into(),
        ColumnType::String => "TEXT".into(),
    }
}
