//! Test utilities for SQL emission validation.
//!
//! Parses emitted SQL with sqlparser-rs so every rendered statement is
//! checked for syntax against a matching parser dialect.

use sqlparser::dialect::{BigQueryDialect, DuckDbDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Validates that a SQL string is syntactically valid for the given dialect.
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::BigQuery => Box::new(BigQueryDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM restaurant_stats", Dialect::Sqlite).unwrap();
        validate_sql("SELECT * FROM restaurant_stats", Dialect::DuckDb).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM restaurant_stats", Dialect::Sqlite);
        assert!(result.is_err());
    }
}
