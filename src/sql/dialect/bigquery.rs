//! BigQuery SQL dialect.
//!
//! BigQuery features:
//! - Backtick identifier quoting
//! - `INT64`, `NUMERIC`, `STRING` type names
//! - Named query parameters (`@name`)

use super::helpers;
use super::SqlDialect;
use crate::sql::types::ColumnType;

/// BigQuery SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct BigQuery;

impl SqlDialect for BigQuery {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn emit_data_type(&self, ty: &ColumnType) -> String {
        helpers::emit_data_type_bigquery(ty)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{}", index)
    }
}
