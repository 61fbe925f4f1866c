//! Collapses a progressive [`IterativeDataset`] into a fully materialized
//! [`FullDataset`] (spec.md §4.E), for callers that don't need
//! backpressure-aware streaming and just want the whole result in memory.

use crate::error::Result;
use crate::models::v2::{DataSetHeader, QueryCompletionInformation, QueryProperties};
use crate::operations::v2::iterative::{FullTable, IterativeDataset, Table};
use futures::StreamExt;

/// A dataset drained to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct FullDataset {
    /// The dataset header, if one was observed before completion.
    pub header: Option<DataSetHeader>,
    /// Tables, in arrival order.
    pub tables: Vec<FullTable>,
    /// Rows of the `QueryProperties` metadata table, if present.
    pub query_properties: Vec<QueryProperties>,
    /// Rows of the `QueryCompletionInformation` metadata table, if present.
    pub query_completion_information: Vec<QueryCompletionInformation>,
}

impl FullDataset {
    /// Primary-result tables, in arrival order.
    pub fn primary_results(&self) -> impl Iterator<Item = &FullTable> {
        self.tables
            .iter()
            .filter(|t| t.table_kind == crate::models::v2::TableKind::PrimaryResult)
    }
}

/// Drains `dataset` into a [`FullDataset`], materializing any streaming
/// table in full along the way.
///
/// Tables already received before a fatal dataset error are kept: the
/// caller gets `Err` back, but nothing already delivered is discarded — the
/// error is returned once all in-flight work has been drained, not in place
/// of the partial result.
pub async fn to_full(mut dataset: IterativeDataset) -> Result<FullDataset> {
    let mut tables = Vec::new();
    let mut first_error = None;

    {
        let mut stream = dataset.tables();
        while let Some(result) = stream.next().await {
            match result {
                Ok(Table::Full(table)) => tables.push(table),
                Ok(Table::Streaming(table)) => tables.push(table.to_full().await),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                    break;
                }
            }
        }
    }

    let header = dataset.header();
    let query_properties = dataset.query_properties();
    let query_completion_information = dataset.query_completion_information();
    dataset.close();

    if let Some(e) = first_error {
        return Err(e);
    }

    Ok(FullDataset {
        header,
        tables,
        query_properties,
        query_completion_information,
    })
}
