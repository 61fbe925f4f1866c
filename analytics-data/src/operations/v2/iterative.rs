//! The progressive v2 dataset router (spec.md §4.D).
//!
//! A router task consumes a [`Frame`] stream and drives a per-stream state
//! machine (`AwaitHeader -> AwaitTable -> InProgressiveTable(tid) ->
//! AwaitTable ... -> AwaitCompletion/Terminal`), delivering tables on a
//! bounded `Tables()` channel and, for progressive primary tables, rows on a
//! bounded per-table `Rows()` channel. Metadata tables (`QueryProperties`,
//! `QueryCompletionInformation`) are buffered on the dataset itself rather
//! than delivered as streaming tables.
//!
//! Every table yielded by [`IterativeDataset::tables`] must be fully
//! consumed (via [`StreamingTable::rows`] or [`StreamingTable::to_full`]) or
//! explicitly [`StreamingTable::skip_to_end`]-ed, or the router — and the
//! whole dataset — stalls waiting for the row channel to drain.

use crate::error::{Error, Result};
use crate::models::v2::{
    Column, DataSetHeader, DataTable, Frame, QueryCompletionInformation, QueryProperties,
    TableFragmentType, TableKind,
};
use crate::value::{to_structs, FromRow, Value};
use futures::{Stream, StreamExt};
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Default bounded capacity for a primary table's row channel (spec.md §4.D).
pub const DEFAULT_ROW_CHANNEL_CAPACITY: usize = 1024;

/// One row delivered on a primary table's row channel.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamedRow {
    /// The row's cells, in column order, still as raw JSON (decode into
    /// [`crate::value::Value`] via [`crate::value::Value::parse`] against
    /// the table's columns).
    pub values: Vec<serde_json::Value>,
    /// Set on the first row of a fragment whose `TableFragmentType` was
    /// `DataReplace`: the consumer must discard every row of this table
    /// delivered so far before accepting this one.
    pub replace: bool,
}

/// A row or an inline per-row error, as delivered on a table's row channel.
pub type RowResult = Result<StreamedRow>;

/// A table fully materialized up front: a metadata table, or — in
/// non-progressive mode — a primary table synthesized from its one
/// `DataTable` frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTable {
    /// Unique id of the table within its dataset.
    pub table_id: i32,
    /// Table name.
    pub table_name: String,
    /// The table's role.
    pub table_kind: TableKind,
    /// Column schema.
    pub columns: Vec<Column>,
    /// Rows (or inline row errors), in arrival order.
    pub rows: Vec<RowResult>,
}

/// A primary table whose rows arrive progressively over a bounded channel.
///
/// Consuming it (via [`rows`](Self::rows), [`to_full`](Self::to_full), or
/// [`skip_to_end`](Self::skip_to_end)) takes ownership, so the "at most one
/// consumption path, no restart" invariant from spec.md §3.4 is enforced by
/// the type system rather than a runtime flag.
pub struct StreamingTable {
    /// Unique id of the table within its dataset.
    pub table_id: i32,
    /// Table name.
    pub table_name: String,
    /// The table's role — always `PrimaryResult` for a streaming table.
    pub table_kind: TableKind,
    /// Column schema, known as soon as the table's `TableHeader` arrives.
    pub columns: Vec<Column>,
    rows: mpsc::Receiver<RowResult>,
}

impl fmt::Debug for StreamingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingTable")
            .field("table_id", &self.table_id)
            .field("table_name", &self.table_name)
            .field("table_kind", &self.table_kind)
            .finish_non_exhaustive()
    }
}

impl StreamingTable {
    /// Consumes the table as an ordered stream of rows, honoring backpressure:
    /// the router blocks sending further fragments of this table until the
    /// returned stream is polled.
    pub fn rows(self) -> impl Stream<Item = RowResult> {
        futures::stream::unfold(self.rows, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })
    }

    /// Discards all remaining rows without materializing them, unblocking
    /// the router without paying for row decode.
    pub async fn skip_to_end(mut self) {
        while self.rows.recv().await.is_some() {}
    }

    /// Materializes the remaining rows into a [`FullTable`].
    pub async fn to_full(mut self) -> FullTable {
        let mut rows = Vec::new();
        while let Some(row) = self.rows.recv().await {
            rows.push(row);
        }
        FullTable {
            table_id: self.table_id,
            table_name: self.table_name,
            table_kind: self.table_kind,
            columns: self.columns,
            rows,
        }
    }
}

/// One table as delivered on [`IterativeDataset::tables`].
#[derive(Debug)]
pub enum Table {
    /// A table materialized in full up front.
    Full(FullTable),
    /// A primary table whose rows are still arriving.
    Streaming(StreamingTable),
}

impl Table {
    /// The table's id.
    pub fn table_id(&self) -> i32 {
        match self {
            Table::Full(t) => t.table_id,
            Table::Streaming(t) => t.table_id,
        }
    }

    /// The table's role.
    pub fn table_kind(&self) -> TableKind {
        match self {
            Table::Full(t) => t.table_kind.clone(),
            Table::Streaming(t) => t.table_kind.clone(),
        }
    }
}

/// One table, or a fatal dataset-level error, as delivered on
/// [`IterativeDataset::tables`].
pub type TableResult = Result<Table>;

#[derive(Default)]
struct DatasetMetadata {
    header: Option<DataSetHeader>,
    query_properties: Vec<QueryProperties>,
    query_completion_information: Vec<QueryCompletionInformation>,
}

/// Per-stream router state (spec.md §4.D).
#[derive(Debug)]
enum RouterState {
    AwaitHeader,
    AwaitTable,
    InProgressiveTable(i32),
    Terminal,
}

/// Consumes a frame stream and routes it into per-table row channels.
///
/// Owns the router task; dropping the dataset (or calling
/// [`close`](Self::close)) aborts the router, which causes any outstanding
/// [`StreamingTable::rows`] stream to end without further items.
pub struct IterativeDataset {
    tables: mpsc::Receiver<TableResult>,
    metadata: Arc<Mutex<DatasetMetadata>>,
    router: tokio::task::JoinHandle<()>,
}

impl fmt::Debug for IterativeDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterativeDataset").finish_non_exhaustive()
    }
}

impl Drop for IterativeDataset {
    fn drop(&mut self) {
        self.router.abort();
    }
}

impl IterativeDataset {
    /// Spawns the router task over `frames`, with the given bounded capacity
    /// for each primary table's row channel.
    pub fn spawn(
        frames: impl Stream<Item = Result<Frame>> + Unpin + Send + 'static,
        row_channel_capacity: usize,
    ) -> Self {
        let (tables_tx, tables_rx) = mpsc::channel(16);
        let metadata = Arc::new(Mutex::new(DatasetMetadata::default()));
        let router_metadata = metadata.clone();
        let router = tokio::spawn(run_router(
            frames,
            tables_tx,
            router_metadata,
            row_channel_capacity,
        ));
        Self {
            tables: tables_rx,
            metadata,
            router,
        }
    }

    /// Cancels in-flight decoding and releases the underlying reader
    /// (spec.md §3.5). Equivalent to dropping the dataset.
    pub fn close(self) {}

    /// The dataset header, once its frame has been observed.
    pub fn header(&self) -> Option<DataSetHeader> {
        self.metadata.lock().expect("metadata mutex poisoned").header.clone()
    }

    /// Rows bound from the `QueryProperties` metadata table, once observed.
    pub fn query_properties(&self) -> Vec<QueryProperties> {
        self.metadata
            .lock()
            .expect("metadata mutex poisoned")
            .query_properties
            .clone()
    }

    /// Rows bound from the `QueryCompletionInformation` metadata table, once observed.
    pub fn query_completion_information(&self) -> Vec<QueryCompletionInformation> {
        self.metadata
            .lock()
            .expect("metadata mutex poisoned")
            .query_completion_information
            .clone()
    }

    /// The dataset's tables, in emission order. Each streaming table
    /// delivered here must be drained, skipped, or the dataset closed.
    pub fn tables(&mut self) -> impl Stream<Item = TableResult> + '_ {
        futures::stream::unfold(&mut self.tables, |rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })
    }
}

/// Binds each row of `table` against `T` via [`FromRow`], decoding cells
/// through [`Value::parse`] first. Rows that fail to decode or bind are
/// dropped; this is metadata-table binding, where partial results aren't
/// worth failing the whole dataset over.
fn bind_metadata_rows<T: FromRow>(table: &DataTable) -> Vec<T> {
    let mut decoded_rows = Vec::new();
    for row in &table.rows {
        let Ok(raw_values) = row.clone().into_result() else {
            continue;
        };
        let mut values = Vec::with_capacity(raw_values.len());
        let mut ok = true;
        for (column, raw) in table.columns.iter().zip(&raw_values) {
            match Value::parse(column.column_type, raw) {
                Ok(v) => values.push(v),
                Err(_) => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            decoded_rows.push(values);
        }
    }
    to_structs::<T, Column>(&table.columns, decoded_rows)
        .ignore_partial_results_vec()
}

trait IgnorePartialVec<T> {
    fn ignore_partial_results_vec(self) -> Vec<T>;
}

impl<T> IgnorePartialVec<T> for crate::error::Partial<Vec<T>> {
    fn ignore_partial_results_vec(self) -> Vec<T> {
        match self {
            Ok(v) => v,
            Err((Some(v), _)) => v,
            Err((None, _)) => Vec::new(),
        }
    }
}

fn full_table_from_data_table(table: DataTable) -> FullTable {
    let table_id = table.table_id;
    let table_name = table.table_name;
    let table_kind = table.table_kind;
    let columns = table.columns;
    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            row.into_result()
                .map(|values| StreamedRow { values, replace: false })
        })
        .collect();
    FullTable {
        table_id,
        table_name,
        table_kind,
        columns,
        rows,
    }
}

async fn run_router(
    mut frames: impl Stream<Item = Result<Frame>> + Unpin + Send,
    tables_tx: mpsc::Sender<TableResult>,
    metadata: Arc<Mutex<DatasetMetadata>>,
    row_channel_capacity: usize,
) {
    let mut state = RouterState::AwaitHeader;
    let mut open: Option<mpsc::Sender<RowResult>> = None;

    while let Some(frame) = frames.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                let _ = tables_tx.send(Err(e)).await;
                return;
            }
        };

        state = match std::mem::replace(&mut state, RouterState::Terminal) {
            RouterState::Terminal => {
                let _ = tables_tx
                    .send(Err(Error::StateMachine(format!(
                        "frame {frame:?} received after dataset completion"
                    ))))
                    .await;
                return;
            }

            RouterState::AwaitHeader => match frame {
                Frame::DataSetHeader(header) => {
                    metadata.lock().expect("metadata mutex poisoned").header = Some(header);
                    RouterState::AwaitTable
                }
                other => {
                    let _ = tables_tx
                        .send(Err(Error::StateMachine(format!(
                            "expected DataSetHeader as the first frame, got {other:?}"
                        ))))
                        .await;
                    return;
                }
            },

            RouterState::AwaitTable => match frame {
                Frame::DataTable(table) => {
                    if table.table_kind == TableKind::QueryProperties {
                        let rows = bind_metadata_rows::<QueryProperties>(&table);
                        metadata.lock().expect("metadata mutex poisoned").query_properties = rows;
                    }
                    if table.table_kind == TableKind::QueryCompletionInformation {
                        let rows = bind_metadata_rows::<QueryCompletionInformation>(&table);
                        metadata
                            .lock()
                            .expect("metadata mutex poisoned")
                            .query_completion_information = rows;
                    }
                    let full = full_table_from_data_table(table);
                    if tables_tx.send(Ok(Table::Full(full))).await.is_err() {
                        return;
                    }
                    RouterState::AwaitTable
                }
                Frame::TableHeader(header) => {
                    let (rows_tx, rows_rx) = mpsc::channel(row_channel_capacity);
                    let streaming = StreamingTable {
                        table_id: header.table_id,
                        table_name: header.table_name,
                        table_kind: header.table_kind,
                        columns: header.columns,
                        rows: rows_rx,
                    };
                    let table_id = streaming.table_id;
                    if tables_tx.send(Ok(Table::Streaming(streaming))).await.is_err() {
                        return;
                    }
                    open = Some(rows_tx);
                    RouterState::InProgressiveTable(table_id)
                }
                Frame::DataSetCompletion(completion) => {
                    if completion.has_errors || completion.cancelled {
                        let _ = tables_tx
                            .send(Err(Error::StateMachine(
                                "dataset completed with errors".into(),
                            )))
                            .await;
                    }
                    return;
                }
                other => {
                    let _ = tables_tx
                        .send(Err(Error::StateMachine(format!(
                            "unexpected frame {other:?} while awaiting the next table"
                        ))))
                        .await;
                    return;
                }
            },

            RouterState::InProgressiveTable(tid) => match frame {
                Frame::TableFragment(fragment) if fragment.table_id == tid => {
                    let Some(tx) = open.as_mut() else {
                        let _ = tables_tx
                            .send(Err(Error::StateMachine(format!(
                                "fragment for table {tid} with no open row channel"
                            ))))
                            .await;
                        return;
                    };
                    let replace = fragment.table_fragment_type == TableFragmentType::DataReplace;
                    for (i, row) in fragment.rows.into_iter().enumerate() {
                        let streamed = match row.into_result() {
                            Ok(values) => Ok(StreamedRow {
                                values,
                                replace: replace && i == 0,
                            }),
                            Err(e) => Err(e),
                        };
                        if tx.send(streamed).await.is_err() {
                            // Consumer dropped the row stream without draining it;
                            // the dataset is abandoned, not an error.
                            return;
                        }
                    }
                    RouterState::InProgressiveTable(tid)
                }
                Frame::TableFragment(fragment) => {
                    let _ = tables_tx
                        .send(Err(Error::StateMachine(format!(
                            "fragment for table {} with no prior TableHeader (currently routing table {tid})",
                            fragment.table_id
                        ))))
                        .await;
                    return;
                }
                Frame::TableProgress(_) => RouterState::InProgressiveTable(tid),
                Frame::TableCompletion(completion) if completion.table_id == tid => {
                    open = None; // dropping the sender closes the row channel
                    RouterState::AwaitTable
                }
                other => {
                    let _ = tables_tx
                        .send(Err(Error::StateMachine(format!(
                            "unexpected frame {other:?} while table {tid} is open"
                        ))))
                        .await;
                    return;
                }
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::v2::{
        Column as V2Column, DataSetCompletion, DataTable, Row, TableCompletion, TableFragment,
        TableHeader,
    };
    use futures::StreamExt;

    fn frames_stream(frames: Vec<Frame>) -> impl Stream<Item = Result<Frame>> + Unpin + Send + 'static {
        futures::stream::iter(frames.into_iter().map(Ok))
    }

    fn col(name: &str, kind: crate::models::ColumnType) -> V2Column {
        V2Column {
            column_name: name.to_string(),
            column_type: kind,
        }
    }

    /// S1 — non-progressive v2 parse.
    #[tokio::test]
    async fn non_progressive_dataset_collects_into_one_full_table() {
        let frames = vec![
            Frame::DataSetHeader(DataSetHeader {
                is_progressive: false,
                version: "v2.0".into(),
                is_fragmented: Some(false),
                error_reporting_placement: None,
            }),
            Frame::DataTable(DataTable {
                table_id: 0,
                table_name: "Table_0".into(),
                table_kind: TableKind::PrimaryResult,
                columns: vec![col("Name", crate::models::ColumnType::String)],
                rows: vec![Row::Values(vec![serde_json::json!("Doak")])],
            }),
            Frame::DataSetCompletion(DataSetCompletion {
                has_errors: false,
                cancelled: false,
                one_api_errors: None,
            }),
        ];

        let mut dataset = IterativeDataset::spawn(frames_stream(frames), DEFAULT_ROW_CHANNEL_CAPACITY);
        let mut tables = Vec::new();
        {
            let mut stream = dataset.tables();
            while let Some(t) = stream.next().await {
                tables.push(t.unwrap());
            }
        }
        assert_eq!(tables.len(), 1);
        assert!(matches!(&tables[0], Table::Full(t) if t.rows.len() == 1));
        assert!(dataset.header().is_some());
    }

    /// S2 — progressive v2 with replace.
    #[tokio::test]
    async fn progressive_table_delivers_rows_in_order_with_replace_tag() {
        let frames = vec![
            Frame::DataSetHeader(DataSetHeader {
                is_progressive: true,
                version: "v2.0".into(),
                is_fragmented: Some(true),
                error_reporting_placement: None,
            }),
            Frame::TableHeader(TableHeader {
                table_id: 0,
                table_name: "Table_0".into(),
                table_kind: TableKind::PrimaryResult,
                columns: vec![col("Name", crate::models::ColumnType::String)],
            }),
            Frame::TableFragment(TableFragment {
                table_id: 0,
                table_fragment_type: TableFragmentType::DataAppend,
                rows: vec![Row::Values(vec![serde_json::json!("Doak")])],
            }),
            Frame::TableFragment(TableFragment {
                table_id: 0,
                table_fragment_type: TableFragmentType::DataReplace,
                rows: vec![
                    Row::Values(vec![serde_json::json!("Dub")]),
                    Row::Values(vec![serde_json::json!("Ev")]),
                ],
            }),
            Frame::TableCompletion(TableCompletion {
                table_id: 0,
                row_count: 2,
                one_api_errors: None,
            }),
            Frame::DataSetCompletion(DataSetCompletion {
                has_errors: false,
                cancelled: false,
                one_api_errors: None,
            }),
        ];

        let mut dataset = IterativeDataset::spawn(frames_stream(frames), DEFAULT_ROW_CHANNEL_CAPACITY);
        let table = {
            let mut stream = dataset.tables();
            stream.next().await.unwrap().unwrap()
        };
        let Table::Streaming(streaming) = table else {
            panic!("expected a streaming table");
        };
        let rows: Vec<StreamedRow> = streaming.rows().map(|r| r.unwrap()).collect().await;
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].replace);
        assert!(rows[1].replace);
        assert!(!rows[2].replace);
    }

    #[tokio::test]
    async fn fragment_for_unknown_table_is_fatal() {
        let frames = vec![
            Frame::DataSetHeader(DataSetHeader {
                is_progressive: true,
                version: "v2.0".into(),
                is_fragmented: Some(true),
                error_reporting_placement: None,
            }),
            Frame::TableFragment(TableFragment {
                table_id: 7,
                table_fragment_type: TableFragmentType::DataAppend,
                rows: vec![],
            }),
        ];
        let mut dataset = IterativeDataset::spawn(frames_stream(frames), DEFAULT_ROW_CHANNEL_CAPACITY);
        let mut stream = dataset.tables();
        let result = stream.next().await.unwrap();
        assert!(result.is_err());
    }
}
