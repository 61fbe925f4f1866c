//! Table-of-contents reshape for v1 (management/legacy-query) datasets.
//!
//! A v1 response is a single JSON object carrying a flat `Tables` array; the
//! service labels each table's role (primary result vs. metadata) either
//! through a trailing table-of-contents table or, when that's absent, by
//! position and column shape. This module applies that reshape so callers
//! don't have to special-case the TOC table themselves.

use crate::models::v1::{Column, Dataset, Table};
use crate::models::ColumnType;

/// The role a v1 table plays once the reshape pass has classified it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum V1TableKind {
    /// Holds actual query results.
    Primary,
    /// Holds query-level properties (e.g. `@ExtendedProperties`).
    QueryProperties,
    /// Holds query completion/diagnostic information.
    QueryCompletionInformation,
    /// Any other kind, preserved verbatim from the table-of-contents label.
    Other,
}

/// One v1 table alongside the role [`reshape`] assigned it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTable {
    /// The assigned role.
    pub kind: V1TableKind,
    /// The underlying table.
    pub table: Table,
}

/// A v1 dataset after table-of-contents reshape.
#[derive(Debug, Clone, PartialEq)]
pub struct ReshapedDataset {
    /// Tables in source order, each labeled with its role.
    pub tables: Vec<ClassifiedTable>,
}

impl ReshapedDataset {
    /// All tables classified as [`V1TableKind::Primary`], in source order.
    pub fn primary_results(&self) -> impl Iterator<Item = &Table> {
        self.tables
            .iter()
            .filter(|t| t.kind == V1TableKind::Primary)
            .map(|t| &t.table)
    }

    /// The query-properties table, if one was present.
    pub fn query_properties(&self) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.kind == V1TableKind::QueryProperties)
            .map(|t| &t.table)
    }

    /// The query-completion-information table, if one was present.
    pub fn query_completion_information(&self) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.kind == V1TableKind::QueryCompletionInformation)
            .map(|t| &t.table)
    }
}

/// Column schema the final table must match to be treated as a
/// table-of-contents rather than a (highly unusual) fifth primary result.
const TOC_SCHEMA: &[(&str, ColumnType)] = &[
    ("Ordinal", ColumnType::Long),
    ("Kind", ColumnType::String),
    ("Name", ColumnType::String),
    ("Id", ColumnType::String),
    ("PrettyName", ColumnType::String),
];

fn is_toc_schema(columns: &[Column]) -> bool {
    columns.len() == TOC_SCHEMA.len()
        && columns
            .iter()
            .zip(TOC_SCHEMA)
            .all(|(c, (name, kind))| c.column_name == *name && c.column_type == *kind)
}

fn kind_for_toc_entry(kind: &str) -> V1TableKind {
    match kind {
        "QueryResult" => V1TableKind::Primary,
        "QueryProperties" => V1TableKind::QueryProperties,
        "QueryCompletionInformation" => V1TableKind::QueryCompletionInformation,
        _ => V1TableKind::Other,
    }
}

/// Reshapes a raw v1 dataset (spec.md §4.C).
///
/// If the last table's schema matches the table-of-contents shape, every
/// prior table is classified by the TOC row naming its position. Otherwise
/// the dataset has no TOC, and the permissive heuristic decided for that
/// case applies: the first table is always Primary, and so is every later
/// table unless its column shape matches a known metadata table — see
/// DESIGN.md for why this (rather than single-primary-only) was chosen.
pub fn reshape_dataset(dataset: Dataset) -> ReshapedDataset {
    let mut tables = dataset.tables;

    if let Some(last) = tables.last() {
        if is_toc_schema(&last.columns) {
            let toc = tables.pop().expect("checked non-empty by `last()` above");
            let classified = tables
                .into_iter()
                .enumerate()
                .map(|(ordinal, table)| {
                    let kind = toc
                        .rows
                        .iter()
                        .find(|row| {
                            row.first()
                                .and_then(serde_json::Value::as_i64)
                                .is_some_and(|o| o as usize == ordinal)
                        })
                        .and_then(|row| row.get(1))
                        .and_then(serde_json::Value::as_str)
                        .map(kind_for_toc_entry)
                        .unwrap_or(V1TableKind::Other);
                    ClassifiedTable { kind, table }
                })
                .collect();
            return ReshapedDataset { tables: classified };
        }
    }

    heuristic_reshape(tables)
}

fn heuristic_reshape(tables: Vec<Table>) -> ReshapedDataset {
    let classified = tables
        .into_iter()
        .enumerate()
        .map(|(i, table)| {
            let kind = if i == 0 {
                V1TableKind::Primary
            } else if looks_like_query_properties(&table) {
                V1TableKind::QueryProperties
            } else if looks_like_query_completion_information(&table) {
                V1TableKind::QueryCompletionInformation
            } else {
                V1TableKind::Primary
            };
            ClassifiedTable { kind, table }
        })
        .collect();
    ReshapedDataset { tables: classified }
}

fn looks_like_query_properties(table: &Table) -> bool {
    table.columns.iter().any(|c| c.column_name == "Value")
        && table.columns.iter().any(|c| c.column_name == "Key")
}

fn looks_like_query_completion_information(table: &Table) -> bool {
    table.columns.iter().any(|c| c.column_name == "EventTypeName")
}

impl Dataset {
    /// Applies the table-of-contents reshape pass (spec.md §4.C).
    pub fn reshape(self) -> ReshapedDataset {
        reshape_dataset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::v1::Column;
    use serde_json::json;

    fn col(name: &str, kind: ColumnType) -> Column {
        Column {
            column_name: name.to_string(),
            column_type: kind,
            data_type: None,
        }
    }

    fn table(name: &str, columns: Vec<Column>, rows: Vec<Vec<serde_json::Value>>) -> Table {
        Table {
            table_name: name.to_string(),
            columns,
            rows,
        }
    }

    /// S6 — v1 TOC reshape.
    #[test]
    fn toc_reshape_classifies_by_toc_rows() {
        let dataset = Dataset {
            tables: vec![
                table("Table_0", vec![col("ID", ColumnType::Long)], vec![vec![json!(1)]]),
                table(
                    "Table_1",
                    vec![col("Value", ColumnType::String), col("Key", ColumnType::String)],
                    vec![],
                ),
                table("Table_2", vec![col("ID", ColumnType::Long)], vec![vec![json!(2)]]),
                table(
                    "Table_3",
                    vec![
                        col("Ordinal", ColumnType::Long),
                        col("Kind", ColumnType::String),
                        col("Name", ColumnType::String),
                        col("Id", ColumnType::String),
                        col("PrettyName", ColumnType::String),
                    ],
                    vec![
                        vec![json!(0), json!("QueryResult"), json!("PrimaryResult"), json!("a"), json!("a")],
                        vec![json!(1), json!("QueryProperties"), json!("@ExtendedProperties"), json!("b"), json!("b")],
                        vec![json!(2), json!("QueryResult"), json!("PrimaryResult"), json!("c"), json!("c")],
                    ],
                ),
            ],
        };

        let reshaped = reshape_dataset(dataset);
        assert_eq!(reshaped.primary_results().count(), 2);
        assert!(reshaped.query_properties().is_some());
        assert_eq!(reshaped.tables.len(), 3);
    }

    #[test]
    fn toc_less_dataset_treats_first_table_as_primary() {
        let dataset = Dataset {
            tables: vec![table("Table_0", vec![col("ID", ColumnType::Long)], vec![vec![json!(1)]])],
        };
        let reshaped = reshape_dataset(dataset);
        assert_eq!(reshaped.tables[0].kind, V1TableKind::Primary);
    }
}
