//! SQL generation module.
//!
//! A small builder for the statements the warehouse backends need:
//!
//! - [`ddl`] - CREATE TABLE and DROP TABLE
//! - [`dml`] - INSERT with positional parameters
//! - [`types`] - column types and CSV type autodetection
//! - [`dialect`] - SQL dialect implementations

pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use ddl::{ColumnDef, CreateTable, DropTable};
pub use dialect::{Dialect, SqlDialect};
pub use dml::Insert;
pub use types::{infer_column_type, ColumnType};
