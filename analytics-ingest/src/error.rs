//! Defines [Error] for representing failures in various operations.

/// Error type for analytics ingestion operations, mirroring the classification
/// `analytics_data::Error` uses: each variant is either retryable (transient,
/// safe to hand to the next ranked account or a managed-ingestion retry) or
/// not (the caller's input or the cluster's state won't change on retry).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Caller-supplied arguments were invalid (bad database/table name, unreadable path, etc).
    #[error("Invalid ingestion arguments: {0}")]
    ClientArgs(String),

    /// An invariant inside this crate was violated; indicates a bug rather than bad input.
    #[error("Internal ingestion client error: {0}")]
    ClientInternal(String),

    /// Error raised failing to obtain or refresh ingestion resources.
    #[error("Error obtaining ingestion resources: {0}")]
    ResourceManagerError(#[from] super::resource_manager::ResourceManagerError),

    /// A streaming ingestion HTTP call failed with the given status code.
    #[error("Streaming ingestion request failed with status {0}: {1}")]
    HttpError(azure_core::StatusCode, String),

    /// Failure writing to or reading from blob storage while staging a blob for queued ingestion.
    #[error("Blob storage error: {0}")]
    Blobstore(String),

    /// Failure reading a local file or stream handed to a descriptor.
    #[error("Local file/stream error: {0}")]
    LocalFileSystem(#[from] std::io::Error),

    /// The source data exceeds a hard ingestion limit (e.g. streaming ingestion's 4MiB cap).
    #[error("Ingestion limit exceeded: {0}")]
    LimitsExceeded(String),

    /// Error relating to (de-)serialization of JSON data
    #[error("Error in JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error occurring within core azure crates
    #[error("Error in azure-core: {0}")]
    AzureError(#[from] azure_core::error::Error),

    /// Error surfaced by the underlying query client (e.g. fetching an auth token).
    #[error("Error in analytics-data: {0}")]
    AnalyticsDataError(#[from] analytics_data::error::Error),

    /// Every ranked storage account was tried and failed.
    #[error("All ranked storage accounts failed for this operation")]
    AllAccountsFailed,
}

impl Error {
    /// Whether retrying the same operation (against the same or a different
    /// ranked account) has a reasonable chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::HttpError(status, _) => {
                status.as_u16() >= 500 || status.as_u16() == 408 || status.as_u16() == 429
            }
            Error::Blobstore(_) => true,
            Error::ResourceManagerError(_) => true,
            Error::AnalyticsDataError(inner) => inner.is_retryable(),
            Error::ClientArgs(_)
            | Error::ClientInternal(_)
            | Error::LocalFileSystem(_)
            | Error::LimitsExceeded(_)
            | Error::JsonError(_)
            | Error::AzureError(_)
            | Error::AllAccountsFailed => false,
        }
    }
}

/// Result type for analytics ingest operations.
pub type Result<T> = std::result::Result<T, Error>;
