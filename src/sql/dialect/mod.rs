//! SQL Dialect definitions and formatting rules.
//!
//! Each dialect implements `SqlDialect` to handle its specific syntax:
//!
//! - Identifier quoting: `"` (DuckDB/SQLite), `` ` `` (BigQuery)
//! - Type names: `INT64`/`NUMERIC`/`STRING` vs `BIGINT`/`DECIMAL`/`VARCHAR`
//! - Parameter placeholders: `?N` vs `$N` vs `@pN`
//!
//! # Usage
//!
//! ```ignore
//! use tablecheck::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::BigQuery;
//! let quoted = dialect.quote_identifier("restaurant_stats");  // `restaurant_stats`
//! ```

mod bigquery;
mod duckdb;
pub mod helpers;
mod sqlite;

pub use bigquery::BigQuery;
pub use duckdb::DuckDb;
pub use sqlite::Sqlite;

use super::types::ColumnType;

/// SQL dialect trait - defines how SQL constructs are rendered.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table, column).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Render a column type.
    fn emit_data_type(&self, ty: &ColumnType) -> String;

    /// Whether `CREATE TABLE IF NOT EXISTS` exists.
    fn supports_if_not_exists(&self) -> bool {
        true
    }

    /// Positional parameter placeholder, 1-based.
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    BigQuery,
    DuckDb,
    Sqlite,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::BigQuery => &BigQuery,
            Dialect::DuckDb => &DuckDb,
            Dialect::Sqlite => &Sqlite,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn emit_data_type(&self, ty: &ColumnType) -> String {
        self.dialect().emit_data_type(ty)
    }

    fn supports_if_not_exists(&self) -> bool {
        self.dialect().supports_if_not_exists()
    }

    fn placeholder(&self, index: usize) -> String {
        self.dialect().placeholder(index)
    }
}
