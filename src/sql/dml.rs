//! DML (Data Manipulation Language) support.
//!
//! Only parameterized INSERT is needed: values are bound by the driver,
//! never spliced into the SQL text.

use super::dialect::{Dialect, SqlDialect};

/// INSERT statement with one row of positional parameters.
#[derive(Debug, Clone)]
#[must_use = "DML statements have no effect until converted to SQL with to_sql()"]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
}

impl Insert {
    /// Create a new INSERT statement.
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// Set the columns to insert.
    pub fn columns(mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = cols.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let target = dialect.quote_identifier(&self.table);
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| dialect.quote_identifier(c))
            .collect();
        let params: Vec<String> = (1..=self.columns.len())
            .map(|i| dialect.placeholder(i))
            .collect();

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            target,
            columns.join(", "),
            params.join(", ")
        )
    }
}
