//! DuckDB SQL dialect.
//!
//! PostgreSQL-compatible: ANSI identifier quoting (`"`) and `$N` parameters.

use super::helpers;
use super::SqlDialect;
use crate::sql::types::ColumnType;

/// DuckDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn emit_data_type(&self, ty: &ColumnType) -> String {
        helpers::emit_data_type_duckdb(ty)
    }
}
