//! SQLite dialect.
//!
//! SQLite quirks:
//! - Type affinities instead of sized types
//! - `?N` positional parameters

use super::helpers;
use super::SqlDialect;
use crate::sql::types::ColumnType;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn emit_data_type(&self, ty: &ColumnType) -> String {
        helpers::emit_data_type_sqlite(ty)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }
}
