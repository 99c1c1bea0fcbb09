//! DDL (Data Definition Language) support.
//!
//! # Examples
//!
//! ```ignore
//! use tablecheck::sql::ddl::{ColumnDef, CreateTable};
//! use tablecheck::sql::{ColumnType, Dialect};
//!
//! let table = CreateTable::new("restaurant_stats")
//!     .if_not_exists()
//!     .column(ColumnDef::new("restaurant_names", ColumnType::String).not_null())
//!     .column(ColumnDef::new("customer_count", ColumnType::Int64).not_null());
//!
//! println!("{}", table.to_sql(Dialect::BigQuery));
//! ```

use super::dialect::{Dialect, SqlDialect};
use super::types::ColumnType;

/// Render `schema.name` with each part quoted.
fn qualified_name(dialect: Dialect, schema: Option<&str>, name: &str) -> String {
    match schema {
        Some(schema) => format!(
            "{}.{}",
            dialect.quote_identifier(schema),
            dialect.quote_identifier(name)
        ),
        None => dialect.quote_identifier(name),
    }
}

// ============================================================================
// CREATE TABLE
// ============================================================================

/// CREATE TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateTable {
    pub if_not_exists: bool,
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl CreateTable {
    /// Create a new CREATE TABLE statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_not_exists: false,
            schema: None,
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Set the schema (dataset in BigQuery terms).
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add IF NOT EXISTS clause.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Add a column definition.
    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    /// Add multiple column definitions.
    pub fn columns(mut self, cols: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(cols);
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists && dialect.supports_if_not_exists() {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&qualified_name(dialect, self.schema.as_deref(), &self.name));

        let columns: Vec<String> = self.columns.iter().map(|c| c.to_sql(dialect)).collect();
        sql.push_str(" (");
        sql.push_str(&columns.join(", "));
        sql.push(')');
        sql
    }
}

/// Column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    /// Create a new nullable column definition.
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Mark column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = format!(
            "{} {}",
            dialect.quote_identifier(&self.name),
            dialect.emit_data_type(&self.data_type)
        );
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        sql
    }
}

// ============================================================================
// DROP TABLE
// ============================================================================

/// DROP TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct DropTable {
    pub if_exists: bool,
    pub name: String,
}

impl DropTable {
    /// Create a new DROP TABLE statement.
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            if_exists: false,
            name: name.into(),
        }
    }

    /// Add IF EXISTS clause.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = String::from("DROP TABLE ");
        if self.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&dialect.quote_identifier(&self.name));
        sql
    }
}
