//! SQLite index sink implementation
//!
//! This module provides a SQLite-backed implementation of the IndexSink trait.

use crate::config::{validate_identifier, IndexingConfig};
use crate::index::schema::{
    create_edges_table_sql, create_unique_links_table_sql, is_builtin_schema,
    multi_row_insert_sql, EDGE_COLUMNS, UNIQUE_LINK_COLUMNS,
};
use crate::index::traits::{IndexError, IndexResult, IndexSink};
use crate::index::{Edge, IndexTarget, UniqueLinkRecord};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OpenFlags};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Rows per INSERT statement; keeps bound parameters under SQLite's limit
const MAX_ROWS_PER_INSERT: usize = 250;

/// SQLite index backend
pub struct SqliteIndexSink {
    conn: Option<Connection>,
    edges_table: String,
    unique_links_table: String,
}

impl SqliteIndexSink {
    /// Opens (or creates) the index database described by `config`.
    ///
    /// Schemas other than `main`/`temp` are attached from `<schema>.db` next
    /// to the main database file. Both tables are created if absent.
    pub fn open(config: &IndexingConfig) -> IndexResult<Self> {
        let conn = Connection::open(&config.database_path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        let base_dir = base_dir(&config.database_path);
        let sink = Self::with_connection(conn, config, |schema| schema_path(&base_dir, schema))?;
        sink.create_tables()?;
        Ok(sink)
    }

    /// Opens an existing index database read-only.
    ///
    /// Nothing is created: a missing database file is an error, and so is a
    /// missing attached schema file.
    pub fn open_read_only(config: &IndexingConfig) -> IndexResult<Self> {
        if !config.database_path.is_file() {
            return Err(IndexError::MissingDatabase(config.database_path.clone()));
        }

        let conn = Connection::open_with_flags(
            &config.database_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let base_dir = base_dir(&config.database_path);
        Self::with_connection(conn, config, |schema| schema_path(&base_dir, schema))
    }

    /// Creates an in-memory index; attached schemas are in-memory too
    pub fn open_in_memory(config: &IndexingConfig) -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        let sink = Self::with_connection(conn, config, |_| ":memory:".to_string())?;
        sink.create_tables()?;
        Ok(sink)
    }

    fn with_connection<F>(
        conn: Connection,
        config: &IndexingConfig,
        attach_path: F,
    ) -> IndexResult<Self>
    where
        F: Fn(&str) -> String,
    {
        for identifier in [
            &config.edges_schema,
            &config.edges_table,
            &config.unique_links_schema,
            &config.unique_links_table,
        ] {
            validate_identifier(identifier).map_err(|e| IndexError::Definition(e.to_string()))?;
        }

        let schemas: BTreeSet<&str> = [
            config.edges_schema.as_str(),
            config.unique_links_schema.as_str(),
        ]
        .into_iter()
        .filter(|schema| !is_builtin_schema(schema))
        .collect();

        for schema in schemas {
            let path = attach_path(schema);
            tracing::debug!("Attaching schema {} from {}", schema, path);
            conn.execute(
                &format!("ATTACH DATABASE ?1 AS {}", schema),
                params![path],
            )?;
        }

        let edges_table = format!("{}.{}", config.edges_schema, config.edges_table);
        let unique_links_table = format!(
            "{}.{}",
            config.unique_links_schema, config.unique_links_table
        );

        Ok(Self {
            conn: Some(conn),
            edges_table,
            unique_links_table,
        })
    }

    fn create_tables(&self) -> IndexResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(&create_edges_table_sql(&self.edges_table))?;
        conn.execute_batch(&create_unique_links_table_sql(&self.unique_links_table))?;
        Ok(())
    }

    fn connection(&self) -> IndexResult<&Connection> {
        self.conn.as_ref().ok_or(IndexError::Closed)
    }

    /// Fully qualified `schema.table` for a target
    pub fn table_for(&self, target: IndexTarget) -> &str {
        match target {
            IndexTarget::Edges => &self.edges_table,
            IndexTarget::UniqueLinks => &self.unique_links_table,
        }
    }

    /// Appends rows to `target` with chunked multi-row inserts in one transaction
    fn append_rows(&mut self, target: IndexTarget, rows: Vec<Vec<Value>>) -> IndexResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let table = self.table_for(target).to_string();
        let columns = match target {
            IndexTarget::Edges => EDGE_COLUMNS,
            IndexTarget::UniqueLinks => UNIQUE_LINK_COLUMNS,
        };

        let conn = self.conn.as_mut().ok_or(IndexError::Closed)?;
        let tx = conn.transaction()?;
        for chunk in rows.chunks(MAX_ROWS_PER_INSERT) {
            let sql = multi_row_insert_sql(&table, columns, chunk.len());
            tx.execute(&sql, params_from_iter(chunk.iter().flatten()))?;
        }
        tx.commit()?;

        tracing::trace!("Appended {} rows to {}", rows.len(), table);
        Ok(())
    }

    /// Counts rows currently stored for a target
    pub fn count(&self, target: IndexTarget) -> IndexResult<u64> {
        let count: i64 = self.connection()?.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table_for(target)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Reads back every stored edge in insertion order
    pub fn load_edges(&self) -> IndexResult<Vec<Edge>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT pen_depth, parent_link, child_link FROM {} ORDER BY rowid",
            self.edges_table
        ))?;

        let edges = stmt
            .query_map([], |row| {
                Ok(Edge {
                    depth: row.get(0)?,
                    parent: row.get(1)?,
                    child: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(edges)
    }

    /// Reads back every stored unique link in insertion order
    pub fn load_unique_links(&self) -> IndexResult<Vec<UniqueLinkRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT link_id, link_name FROM {} ORDER BY rowid",
            self.unique_links_table
        ))?;

        let links = stmt
            .query_map([], |row| {
                Ok(UniqueLinkRecord {
                    link_id: row.get(0)?,
                    link: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }
}

fn base_dir(database_path: &Path) -> PathBuf {
    database_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf()
}

/// `<schema>.db` next to the main database file
fn schema_path(base_dir: &Path, schema: &str) -> String {
    base_dir
        .join(format!("{}.db", schema))
        .to_string_lossy()
        .into_owned()
}

impl IndexSink for SqliteIndexSink {
    fn record_edges(&mut self, edges: &[Edge]) -> IndexResult<()> {
        let rows = edges
            .iter()
            .map(|edge| {
                vec![
                    Value::Integer(i64::from(edge.depth)),
                    Value::Text(edge.parent.clone()),
                    Value::Text(edge.child.clone()),
                ]
            })
            .collect();
        self.append_rows(IndexTarget::Edges, rows)
    }

    fn record_unique_links(&mut self, links: &[UniqueLinkRecord]) -> IndexResult<()> {
        let rows = links
            .iter()
            .map(|record| {
                vec![
                    Value::Integer(record.link_id),
                    Value::Text(record.link.clone()),
                ]
            })
            .collect();
        self.append_rows(IndexTarget::UniqueLinks, rows)
    }

    fn close(&mut self) -> IndexResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| IndexError::Sqlite(e))?;
            tracing::debug!("Index connection closed");
        }
        Ok(())
    }
}
