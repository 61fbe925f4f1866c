//! This module contains the client for the Azure Analytics Data service.

use crate::authorization_policy::AuthorizationPolicy;
use crate::connection_string::{ConnectionString, ConnectionStringAuth};
use crate::error::Result;
use crate::operations::query::{QueryRunner, QueryRunnerBuilder, V1QueryRunner, V2QueryRunner};

use azure_core::prelude::{Accept, AcceptEncoding, ContentLength};
use azure_core::{ClientOptions, Context, Method, Pipeline, Request};

use crate::request_options::RequestOptions;
use std::convert::TryFrom;
use std::fmt::Debug;
use std::sync::Arc;

/// Header carrying the product/version string the service uses for client telemetry.
const CLIENT_VERSION_HEADER: &str = "x-ms-client-version";
/// Header the service reads to correlate a request with a caller-chosen id.
const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// Options for specifying how a Analytics client will behave
#[derive(Clone, Default)]
pub struct AnalyticsClientOptions {
    options: ClientOptions,
}

impl From<ClientOptions> for AnalyticsClientOptions {
    fn from(c: ClientOptions) -> Self {
        Self { options: c }
    }
}

impl AnalyticsClientOptions {
    /// Create new options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "mock_transport_framework")]
    /// Create new options with a given transaction name
    pub fn new_with_transaction_name<T: Into<String>>(name: T) -> Self {
        Self {
            options: ClientOptions::new_with_transaction_name(name.into()),
        }
    }
}

fn new_pipeline_from_options(
    auth: ConnectionStringAuth,
    resource: String,
    options: AnalyticsClientOptions,
) -> Pipeline {
    let auth_policy = Arc::new(AuthorizationPolicy::new(auth, resource));
    // take care of adding the AuthorizationPolicy as **last** retry policy.
    let per_retry_policies: Vec<Arc<(dyn azure_core::Policy + 'static)>> = vec![auth_policy];

    Pipeline::new(
        option_env!("CARGO_PKG_NAME"),
        option_env!("CARGO_PKG_VERSION"),
        options.options,
        Vec::new(),
        per_retry_policies,
    )
}

/// Analytics client for Rust.
/// The client is a wrapper around the Analytics REST API.
/// 
///
/// The primary methods are:
/// `execute_query`:  executes a query against the Analytics service.
#[derive(Clone, Debug)]
pub struct AnalyticsClient {
    pipeline: Arc<Pipeline>,
    service_url: Arc<String>,
    query_url: Arc<String>,
    management_url: Arc<String>,
}

/// Denotes what kind of query is being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// A Management query. The returned type is [`AnalyticsResponse::V1`](crate::operations::query::AnalyticsResponse::V1)
    Management,
    /// A query. The returned type is [`AnalyticsResponse::V2`](crate::operations::query::AnalyticsResponse::V2)
    Query,
}

impl AnalyticsClient {
    /// Create a new Analytics client.
    /// This method accepts a connection string, that includes the Analytics cluster and the authentication information for the cluster.
    /// # Example
    /// ```rust
    /// use analytics_data::prelude::*;
    ///
    /// let client = AnalyticsClient::new(
    ///    ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///    AnalyticsClientOptions::default());
    ///
    /// assert!(client.is_ok());
    /// ```
    pub fn new(connection_string: ConnectionString, options: AnalyticsClientOptions) -> Result<Self> {
        let (data_source, credentials) = connection_string.into_data_source_and_auth();
        let service_url = Arc::new(data_source.trim_end_matches('/').to_string());
        let query_url = format!("{}/v2/rest/query", service_url);
        let management_url = format!("{}/v1/rest/mgmt", service_url);
        let pipeline = new_pipeline_from_options(credentials, (*service_url).clone(), options);

        Ok(Self {
            pipeline: pipeline.into(),
            service_url: service_url.into(),
            query_url: query_url.into(),
            management_url: management_url.into(),
        })
    }

    pub(crate) fn query_url(&self) -> &str {
        &self.query_url
    }

    pub(crate) fn management_url(&self) -> &str {
        &self.management_url
    }

    pub(crate) fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Builds a request carrying the headers the service expects on every call:
    /// a default client request id (`KGC.{op};{uuid}`, overridable by the caller),
    /// the client version string, and the accepted response encodings.
    pub(crate) fn prepare_request(&self, url: url::Url, method: Method, op: &str) -> Request {
        let mut request = Request::new(url, method);
        request.insert_header(
            CLIENT_REQUEST_ID_HEADER,
            format!("KGC.{op};{}", uuid::Uuid::new_v4()),
        );
        request.insert_header(
            CLIENT_VERSION_HEADER,
            format!(
                "Analytics.Rust.Client:{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0")
            ),
        );
        request.insert_headers(&Accept::from("application/json"));
        request.insert_headers(&AcceptEncoding::from("gzip,deflate"));
        request
    }

    /// Execute a query against the Analytics cluster.
    /// The `kind` parameter determines whether the request is a query (retrieves data from the tables) or a management query (commands to monitor and manage the cluster).
    /// This method should only be used if the query kind is not known at compile time, otherwise use [execute](#method.execute) or [execute_command](#method.execute_command).
    /// # Example
    /// ```no_run
    /// use analytics_data::prelude::*;
    /// # #[tokio::main] async fn main() -> Result<(), Error> {
    ///
    /// let client = AnalyticsClient::new(
    ///   ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///   AnalyticsClientOptions::default())?;
    ///
    ///  // Once the [IntoFuture] trait is stabilized, we can drop the call the `into_future()` here
    ///  let result = client.execute_with_options("some_database", ".show version", QueryKind::Management, None).into_future().await?;
    ///
    /// assert!(matches!(result, AnalyticsResponse::V1(..)));
    /// # Ok(())}
    /// ```
    #[must_use]
    pub fn execute_with_options(
        &self,
        database: impl Into<String>,
        query: impl Into<String>,
        kind: QueryKind,
        options: impl Into<Option<RequestOptions>>,
    ) -> QueryRunner {
        let mut builder = QueryRunnerBuilder::default();
        builder
            .with_kind(kind)
            .with_client(self.clone())
            .with_database(database)
            .with_query(query)
            .with_context(Context::new());
        if let Some(options) = options.into() {
            builder.with_options(options);
        }
        builder
            .build()
            .expect("Unexpected error when building query runner - please report this issue to the Analytics team")
    }

    /// Execute a query with additional request options.
    ///
    /// # Example
    /// ```no_run
    /// use analytics_data::prelude::*;
    /// # #[tokio::main] async fn main() -> Result<(), Error> {
    /// use analytics_data::client::QueryKind;
    /// use analytics_data::request_options::RequestOptionsBuilder;
    ///
    /// let client = AnalyticsClient::new(
    ///    ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///    AnalyticsClientOptions::default())?;
    ///    // Once the [IntoFuture] trait is stabilized, we can drop the call the `into_future()` here
    ///    let result = client.execute_query_with_options(
    ///         "some_database",
    ///         "MyTable | take 10",
    ///         Some(RequestOptionsBuilder::default().with_request_app_name("app name").build().unwrap()))
    ///     .into_future().await?;
    ///
    ///   for table in result.into_primary_results() {
    ///        println!("{}", table.table_name);
    ///    }
    /// # Ok(())}
    /// ```
    ///
    #[must_use]
    pub fn execute_query_with_options(
        &self,
        database: impl Into<String>,
        query: impl Into<String>,
        options: impl Into<Option<RequestOptions>>,
    ) -> V2QueryRunner {
        V2QueryRunner(self.execute_with_options(database, query, QueryKind::Query, options))
    }

    /// Execute a query.
    ///
    /// # Example
    /// ```no_run
    /// use analytics_data::prelude::*;
    ///
    /// # #[tokio::main] async fn main() -> Result<(), Error> {
    /// let client = AnalyticsClient::new(
    ///    ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///    AnalyticsClientOptions::default())?;
    ///
    ///   // Once the [IntoFuture] trait is stabilized, we can drop the call the `into_future()` here
    ///    let result = client.execute_query("some_database", "MyTable | take 10").into_future().await?;
    ///
    ///    for table in result.into_primary_results() {
    ///        println!("{}", table.table_name);
    ///    }
    /// # Ok(())}
    /// ```
    #[must_use]
    pub fn execute_query(
        &self,
        database: impl Into<String>,
        query: impl Into<String>,
    ) -> V2QueryRunner {
        V2QueryRunner(self.execute_with_options(database, query, QueryKind::Query, None))
    }

    /// Run a query progressively: tables (and, for non-fragmented primary
    /// tables, their rows) are delivered as they arrive from the service
    /// rather than only once the whole response has been read.
    ///
    /// # Example
    /// ```no_run
    /// use analytics_data::prelude::*;
    /// use futures::StreamExt;
    /// # #[tokio::main] async fn main() -> Result<(), Error> {
    /// let client = AnalyticsClient::new(
    ///    ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///    AnalyticsClientOptions::default())?;
    ///
    /// let mut dataset = client.iterative_query("some_database", "MyTable | take 10").into_iterative_dataset().await?;
    /// let mut tables = dataset.tables();
    /// while let Some(table) = tables.next().await {
    ///     let _table = table?;
    /// }
    /// # Ok(())}
    /// ```
    #[must_use]
    pub fn iterative_query(
        &self,
        database: impl Into<String>,
        query: impl Into<String>,
    ) -> V2QueryRunner {
        V2QueryRunner(self.execute_with_options(database, query, QueryKind::Query, None))
    }

    /// Execute a management command with additional options.
    ///
    /// # Example
    /// ```no_run
    /// use analytics_data::prelude::*;
    /// # #[tokio::main] async fn main() -> Result<(), Error> {
    /// let client = AnalyticsClient::new(
    ///    ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///    AnalyticsClientOptions::default())?;
    ///
    /// // Once the [IntoFuture] trait is stabilized, we can drop the call the `into_future()` here
    ///    let result = client.execute_command_with_options("some_database", ".show version",
    ///     Some(RequestOptionsBuilder::default().with_request_app_name("app name").build().unwrap()))
    ///     .into_future().await?;
    ///
    /// for table in result.tables {
    ///        println!("{}", table.table_name);
    ///    }
    /// # Ok(())}
    /// ```
    #[must_use]
    pub fn execute_command_with_options(
        &self,
        database: impl Into<String>,
        query: impl Into<String>,
        options: impl Into<Option<RequestOptions>>,
    ) -> V1QueryRunner {
        V1QueryRunner(self.execute_with_options(database, query, QueryKind::Management, options))
    }

    /// Execute a management command.
    ///
    /// # Example
    /// ```no_run
    /// use analytics_data::prelude::*;
    ///
    /// # #[tokio::main] async fn main() -> Result<(), Error> {
    ///
    /// let client = AnalyticsClient::new(
    ///    ConnectionString::with_default_auth("https://mycluster.region.example.com/"),
    ///    AnalyticsClientOptions::default())?;
    ///
    ///    // Once the [IntoFuture] trait is stabilized, we can drop the call the `into_future()` here
    ///    let result = client.execute_command("some_database", ".show version").into_future().await?;
    ///
    ///    for table in result.tables {
    ///        println!("{}", table.table_name);
    ///    }
    /// # Ok(())}
    /// ```
    #[must_use]
    pub fn execute_command(
        &self,
        database: impl Into<String>,
        query: impl Into<String>,
    ) -> V1QueryRunner {
        V1QueryRunner(self.execute_with_options(database, query, QueryKind::Management, None))
    }

    /// POSTs a compressed data payload to the streaming ingestion endpoint
    /// (`/v1/rest/ingest/{database}/{table}`) and returns the response status
    /// code for the caller to classify (2xx succeeded, 4xx permanent, 5xx
    /// transient — see the ingestion crate's streaming ingestion policy).
    pub async fn execute_streaming_ingest(
        &self,
        database: &str,
        table: &str,
        stream_format: &str,
        mapping_name: Option<&str>,
        content_encoding: Option<&str>,
        body: bytes::Bytes,
    ) -> Result<azure_core::StatusCode> {
        let mut url = format!(
            "{}/v1/rest/ingest/{}/{}?streamFormat={}",
            self.service_url, database, table, stream_format
        );
        if let Some(mapping_name) = mapping_name {
            url.push_str(&format!("&mappingName={mapping_name}"));
        }
        let url = url.parse().map_err(azure_core::error::Error::from)?;

        let mut request = self.prepare_request(url, Method::Post, "ingest");
        if let Some(encoding) = content_encoding {
            request.insert_header("Content-Encoding", encoding.to_string());
        }
        request.insert_headers(&ContentLength::new(body.len() as i32));
        request.set_body(body);

        let mut context = Context::new();
        let response = self.pipeline.send(&mut context, &mut request).await?;
        let (status_code, _header_map, _pinned_stream) = response.deconstruct();
        Ok(status_code)
    }
}

impl TryFrom<ConnectionString> for AnalyticsClient {
    type Error = crate::error::Error;

    fn try_from(value: ConnectionString) -> Result<Self> {
        Self::new(value, AnalyticsClientOptions::new())
    }
}
