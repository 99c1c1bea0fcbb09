//! SQLite warehouse backend.
//!
//! Loads run in a single transaction: drop the table, recreate it with the
//! column types inferred from the file, insert the file's rows. Any error
//! rolls the whole load back and leaves the previous table in place.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use super::{LoadError, LoadResult, LoadSummary, Warehouse};
use crate::model::TableName;
use crate::sql::{
    infer_column_type, ColumnDef, ColumnType, CreateTable, Dialect, DropTable, Insert, SqlDialect,
};

pub struct SqliteWarehouse {
    name: String,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteWarehouse {
    /// Open or create a database file.
    pub fn open(path: &Path) -> LoadResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Ok(Self::with_connection(conn, path.to_path_buf()))
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> LoadResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::with_connection(conn, PathBuf::from(":memory:")))
    }

    fn with_connection(conn: Connection, path: PathBuf) -> Self {
        Self {
            name: format!("sqlite:{}", path.display()),
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Number of rows currently in a table.
    pub fn row_count(&self, table: TableName) -> LoadResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}",
            Dialect::Sqlite.quote_identifier(table.as_str())
        );
        let count: i64 = lock(&self.conn).query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Column types for a file: inferred from the values, or the table's
/// declared type when a column has no values at all.
fn column_types(table: TableName, headers: &[String], rows: &[csv::StringRecord]) -> Vec<ColumnType> {
    let declared = table.columns();
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values = rows.iter().filter_map(|r| r.get(i));
            if values.clone().all(|v| v.trim().is_empty()) {
                declared
                    .iter()
                    .find(|c| c.name == *name)
                    .map_or(ColumnType::String, |c| c.data_type)
            } else {
                infer_column_type(values)
            }
        })
        .collect()
}

fn load_file(conn: &Mutex<Connection>, table: TableName, path: &Path) -> LoadResult<LoadSummary> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, _>>()?;

    let types = column_types(table, &headers, &rows);
    for (name, ty) in headers.iter().zip(&types) {
        debug!(table = %table, column = %name, ty = %ty, "Column type");
    }

    let drop = DropTable::table(table.as_str())
        .if_exists()
        .to_sql(Dialect::Sqlite);
    let create = CreateTable::new(table.as_str())
        .columns(
            headers
                .iter()
                .zip(&types)
                .map(|(name, ty)| ColumnDef::new(name.as_str(), *ty)),
        )
        .to_sql(Dialect::Sqlite);
    let insert = Insert::into(table.as_str())
        .columns(headers.iter().map(String::as_str))
        .to_sql(Dialect::Sqlite);
    debug!(%drop, %create, %insert, "SQLite load statements");

    let mut conn = lock(conn);
    let tx = conn.transaction()?;
    tx.execute(&drop, [])?;
    tx.execute(&create, [])?;
    {
        let mut stmt = tx.prepare(&insert)?;
        for row in &rows {
            stmt.execute(params_from_iter(
                types.iter().enumerate().map(|(i, ty)| to_value(row.get(i), *ty)),
            ))?;
        }
    }
    tx.commit()?;

    Ok(LoadSummary {
        table,
        output_rows: rows.len() as u64,
    })
}

/// Bind a CSV field according to its inferred column type.
fn to_value(field: Option<&str>, ty: ColumnType) -> Value {
    let text = match field.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Value::Null,
    };
    match ty {
        ColumnType::Int64 => text
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(text.to_string())),
        ColumnType::Decimal(..) | ColumnType::String => Value::Text(text.to_string()),
    }
}

#[async_trait]
impl Warehouse for SqliteWarehouse {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_csv(&self, table: TableName, path: &Path) -> LoadResult<LoadSummary> {
        let conn = Arc::clone(&self.conn);
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || load_file(&conn, table, &path))
            .await
            .map_err(|e| LoadError::load_failure(table, format!("load task failed: {e}")))?
    }
}
