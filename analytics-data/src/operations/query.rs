//! Executes a query or management command and assembles its response dataset.
//!
//! [`QueryRunner`] is kind-agnostic; [`AnalyticsClient::execute_query`] and
//! [`AnalyticsClient::execute_command`] wrap it in the kind-specific
//! [`V2QueryRunner`]/[`V1QueryRunner`] newtypes so callers get back the
//! dataset shape their call site asked for instead of an `AnalyticsResponse`
//! they'd have to match on.

use crate::client::{AnalyticsClient, QueryKind};
use crate::error::{Error, Result};
use crate::models::{v1, v2, QueryBody};
use crate::operations::v2::{
    parse_frames_full, parse_frames_iterative, IterativeDataset, DEFAULT_ROW_CHANNEL_CAPACITY,
};
use crate::request_options::{ClientRequestProperties, RequestOptions};
use azure_core::prelude::*;
use azure_core::{collect_pinned_stream, Context, Method, Response as HttpResponse};
use derive_builder::Builder;
use futures::future::BoxFuture;
use futures::io::{BufReader, Cursor};
use futures::TryStreamExt;

/// Either dataset shape a query or management call can return.
#[derive(Debug, Clone)]
pub enum AnalyticsResponse {
    /// Response to a management command.
    V1(AnalyticsResponseDataSetV1),
    /// Response to a query.
    V2(AnalyticsResponseDataSetV2),
}

/// Response dataset for a v1 (management) call.
pub type AnalyticsResponseDataSetV1 = v1::Dataset;

/// Response dataset for a v2 query, fully drained of its frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResponseDataSetV2 {
    /// Tables in the dataset, in the order the service emitted them.
    pub tables: Vec<v2::DataTable>,
}

impl AnalyticsResponseDataSetV2 {
    /// Number of tables in the dataset, including metadata tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Tables whose kind is [`v2::TableKind::PrimaryResult`], in emission order.
    pub fn into_primary_results(self) -> impl Iterator<Item = v2::DataTable> {
        self.tables
            .into_iter()
            .filter(|table| table.table_kind == v2::TableKind::PrimaryResult)
    }
}

/// Runs a single query or management command to completion.
///
/// Built by [`AnalyticsClient::execute_with_options`]; most callers go through
/// the kind-specific [`V1QueryRunner`]/[`V2QueryRunner`] wrappers instead.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into, prefix = "with"))]
pub struct QueryRunner {
    client: AnalyticsClient,
    kind: QueryKind,
    database: String,
    query: String,
    #[builder(setter(strip_option), default)]
    options: Option<RequestOptions>,
    context: Context,
}

impl QueryRunner {
    fn url(&self) -> &str {
        match self.kind {
            QueryKind::Query => self.client.query_url(),
            QueryKind::Management => self.client.management_url(),
        }
    }

    fn op_label(&self) -> &'static str {
        match self.kind {
            QueryKind::Query => "execute",
            QueryKind::Management => "mgmt",
        }
    }

    async fn into_response(self) -> Result<HttpResponse> {
        let url = self.url().parse().map_err(azure_core::error::Error::from)?;
        let mut request = self
            .client
            .prepare_request(url, Method::Post, self.op_label());

        let properties = match self.kind {
            QueryKind::Query => {
                let mut options = self.options.clone().unwrap_or_default();
                options.results_progressive_enabled.get_or_insert(true);
                options
                    .results_error_reporting_placement
                    .get_or_insert(crate::models::v2::ErrorReportingPlacement::EndOfTable);
                options
                    .results_v2_fragment_primary_tables
                    .get_or_insert(true);
                options
                    .results_v2_newlines_between_frames
                    .get_or_insert(true);
                Some(ClientRequestProperties::from(options))
            }
            QueryKind::Management => self.options.clone().map(ClientRequestProperties::from),
        };

        if let Some(client_request_id) = properties.as_ref().and_then(|p| p.client_request_id.clone()) {
            request.insert_header(
                "x-ms-client-request-id",
                format!("KGC.{};{client_request_id}", self.op_label()),
            );
        }
        if let Some(app) = properties.as_ref().and_then(|p| p.application.clone()) {
            request.insert_header("x-ms-app", app);
        }
        if let Some(user) = properties.as_ref().and_then(|p| p.user.clone()) {
            request.insert_header("x-ms-user", user);
        }

        let body = QueryBody {
            db: self.database,
            csl: self.query,
            properties,
        };
        let bytes = bytes::Bytes::from(serde_json::to_string(&body)?);
        request.insert_headers(&ContentLength::new(bytes.len() as i32));
        request.set_body(bytes.into());

        let mut context = self.context.clone();
        Ok(self
            .client
            .pipeline()
            .send(&mut context, &mut request)
            .await?)
    }

    /// Runs the request, routing the response body directly into a progressive
    /// [`IterativeDataset`] rather than buffering it to completion first.
    ///
    /// Only meaningful for [`QueryKind::Query`]; the service doesn't stream
    /// management command responses.
    pub fn into_iterative_dataset(self) -> BoxFuture<'static, Result<IterativeDataset>> {
        Box::pin(async move {
            let response = self.into_response().await?;
            let (_status_code, _header_map, pinned_stream) = response.deconstruct();
            let reader = pinned_stream
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
                .into_async_read();
            let reader = BufReader::new(reader);
            let frames = parse_frames_iterative(reader);
            Ok(IterativeDataset::spawn(
                Box::pin(frames),
                DEFAULT_ROW_CHANNEL_CAPACITY,
            ))
        })
    }

    /// Runs the request and returns the dataset shape matching [`QueryKind`].
    pub fn into_future(self) -> BoxFuture<'static, Result<AnalyticsResponse>> {
        let kind = self.kind;
        Box::pin(async move {
            let response = self.into_response().await?;
            let (_status_code, _header_map, pinned_stream) = response.deconstruct();
            let data = collect_pinned_stream(pinned_stream).await?;
            match kind {
                QueryKind::Management => Ok(AnalyticsResponse::V1(serde_json::from_slice(
                    &data.to_vec(),
                )?)),
                QueryKind::Query => {
                    let frames = parse_frames_full(Cursor::new(data.to_vec())).await?;
                    let tables = frames
                        .into_iter()
                        .filter_map(|frame| match frame {
                            v2::Frame::DataTable(table) => Some(table),
                            _ => None,
                        })
                        .collect();
                    Ok(AnalyticsResponse::V2(AnalyticsResponseDataSetV2 { tables }))
                }
            }
        })
    }
}

/// A [`QueryRunner`] known at the call site to be a management command.
#[derive(Debug, Clone)]
pub struct V1QueryRunner(pub(crate) QueryRunner);

impl V1QueryRunner {
    /// Runs the command and returns its v1 dataset.
    pub fn into_future(self) -> BoxFuture<'static, Result<AnalyticsResponseDataSetV1>> {
        Box::pin(async move {
            match self.0.into_future().await? {
                AnalyticsResponse::V1(dataset) => Ok(dataset),
                AnalyticsResponse::V2(_) => Err(Error::UnsupportedOperation(
                    "expected a v1 response for a management command".into(),
                )),
            }
        })
    }
}

/// A [`QueryRunner`] known at the call site to be a query.
#[derive(Debug, Clone)]
pub struct V2QueryRunner(pub(crate) QueryRunner);

impl V2QueryRunner {
    /// Runs the query and returns its v2 dataset.
    pub fn into_future(self) -> BoxFuture<'static, Result<AnalyticsResponseDataSetV2>> {
        Box::pin(async move {
            match self.0.into_future().await? {
                AnalyticsResponse::V2(dataset) => Ok(dataset),
                AnalyticsResponse::V1(_) => Err(Error::UnsupportedOperation(
                    "expected a v2 response for a query".into(),
                )),
            }
        })
    }

    /// Runs the query progressively, returning tables and (for unfragmented
    /// primary tables) rows as they arrive rather than buffering the whole
    /// response first.
    pub fn into_iterative_dataset(self) -> BoxFuture<'static, Result<IterativeDataset>> {
        self.0.into_iterative_dataset()
    }
}
