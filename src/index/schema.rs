//! Table definitions for the index database
//!
//! Schema and table names come from configuration and have already been
//! checked to be plain identifiers before they reach these builders.

/// Column list of the edges table, in insert order
pub const EDGE_COLUMNS: &[&str] = &["pen_depth", "parent_link", "child_link"];

/// Column list of the unique links table, in insert order
pub const UNIQUE_LINK_COLUMNS: &[&str] = &["link_id", "link_name"];

/// Schemas SQLite provides without an ATTACH
pub fn is_builtin_schema(schema: &str) -> bool {
    schema.eq_ignore_ascii_case("main") || schema.eq_ignore_ascii_case("temp")
}

pub fn create_edges_table_sql(qualified_table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (
            pen_depth INTEGER NOT NULL,
            parent_link TEXT NOT NULL,
            child_link TEXT NOT NULL
        )",
        qualified_table
    )
}

pub fn create_unique_links_table_sql(qualified_table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (
            link_id INTEGER NOT NULL,
            link_name TEXT NOT NULL
        )",
        qualified_table
    )
}

/// Builds `INSERT INTO t (a, b) VALUES (?, ?), (?, ?), ...` for `rows` rows
pub fn multi_row_insert_sql(qualified_table: &str, columns: &[&str], rows: usize) -> String {
    let placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
    let values = vec![placeholders; rows].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        qualified_table,
        columns.join(", "),
        values
    )
}
