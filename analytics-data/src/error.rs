//! Defines [Error] for representing failures in various operations.
use azure_core::StatusCode;
use std::fmt::Debug;

use crate::models::v2::OneApiError;
use thiserror;
/// Error type for analytics operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Raised when failing to convert a analytics response to the expected type.
    #[error("Error converting Analytics response for {0}")]
    ConversionError(String),

    /// Error in an external crate
    #[error("Error in external crate {0}")]
    ExternalError(String),

    /// Error in HTTP
    #[error("Error in HTTP: {0} {1}")]
    HttpError(StatusCode, String),

    /// Error in parsing
    #[error("Error in parsing: {0}")]
    ParseError(#[from] ParseError),

    /// Error raised when specific functionality is not (yet) implemented
    #[error("Feature not implemented")]
    NotImplemented(String),

    /// Error relating to (de-)serialization of JSON data
    #[error("Error in JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error occurring within core azure crates
    #[error("Error in azure-core: {0}")]
    AzureError(#[from] azure_core::error::Error),

    /// Errors raised when parsing connection information
    #[error("Connection string error: {0}")]
    ConnectionStringError(#[from] ConnectionStringError),

    /// Errors raised when the operation is not supported
    #[error("Operation not supported: {0}")]
    UnsupportedOperation(String),

    /// Errors raised when the query is invalid
    #[error("Invalid query: {0}")]
    QueryError(String),

    /// Errors raised for IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Errors raised from the api calls to analytics
    #[error("Query API error: {0}")]
    QueryApiError(OneApiError),

    /// Multiple errors
    #[error("Multiple errors: {0:?}")]
    MultipleErrors(Vec<Error>),

    /// Raised when a single cell's raw token cannot be parsed for its column kind.
    /// The row is still produced with this cell set to null.
    #[error("error decoding column {ordinal} (raw token {token:?}): {source}")]
    DecodeError {
        /// Ordinal of the offending column within its row.
        ordinal: usize,
        /// The raw JSON token that failed to parse.
        token: String,
        /// Underlying parse failure.
        #[source]
        source: Box<Error>,
    },

    /// Raised by [`crate::value::FromRow`] implementations when a field cannot be
    /// bound to its column.
    #[error("error converting field {0}")]
    FieldConvertError(String),

    /// A v2 frame arrived out of the order the router's state machine
    /// expects (spec.md §4.D), or a completion frame reported dataset-level
    /// errors. Fatal to the containing dataset only — `KInternal` in the
    /// error taxonomy.
    #[error("dataset state machine error: {0}")]
    StateMachine(String),

    /// Raised when a dataset, row stream, or poller was torn down by the
    /// caller (e.g. [`crate::operations::v2::IterativeDataset::close`])
    /// before it finished on its own.
    #[error("operation cancelled")]
    Cancelled,

    /// `KClientArgs`: caller gave invalid parameters. Never retried.
    #[error("invalid arguments: {0}")]
    ClientArgs(String),

    /// `KClientInternal`: a driver bug, not a caller or service fault. Never
    /// retried.
    #[error("internal client error: {0}")]
    ClientInternal(String),
}

impl Error {
    /// Whether a caller's local retry loop (§4.H/§4.I's bounded streaming
    /// retry, §4.G's next-account fallback) should treat this as transient.
    /// Everything not listed here is permanent or fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::HttpError(status, _) => {
                status.as_u16() >= 500 || status.as_u16() == 408 || status.as_u16() == 429
            }
            _ => false,
        }
    }
}

impl From<Vec<Error>> for Error {
    fn from(errors: Vec<Error>) -> Self {
        if errors.len() == 1 {
            Error::from(errors.into_iter().next().unwrap())
        } else {
            Error::MultipleErrors(errors)
        }
    }
}

impl From<Vec<OneApiError>> for Error {
    fn from(errors: Vec<OneApiError>) -> Self {
        if errors.len() == 1 {
            Error::from(
                errors
                    .into_iter()
                    .next()
                    .map(Error::QueryApiError)
                    .expect("Should be one"),
            )
        } else {
            Error::MultipleErrors(errors.into_iter().map(Error::QueryApiError).collect())
        }
    }
}

/// Errors raised when parsing values.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// Raised when a value is null, but the type is not nullable.
    #[error("Error parsing null value for {0}")]
    ValueNull(String),
    /// Raised when an int value is failed to be parsed.
    #[error("Error parsing int: {0}")]
    Int(#[from] std::num::ParseIntError),
    /// Raised when a long value is failed to be parsed.
    #[error("Error parsing float: {0}")]
    Float(#[from] std::num::ParseFloatError),
    /// Raised when a bool value is failed to be parsed.
    #[error("Error parsing bool: {0}")]
    Bool(#[from] std::str::ParseBoolError),
    /// Raised when a timespan value is failed to be parsed.
    #[error("Error parsing timespan: {0}")]
    Timespan(String),
    /// Raised when a datetime value is failed to be parsed.
    #[error("Error parsing datetime: {0}")]
    DateTime(#[from] time::error::Parse),
    /// Raised when a guid value is failed to be parsed.
    #[error("Error parsing guid: {0}")]
    Guid(#[from] uuid::Error),
    /// Raised when a decimal value is failed to be parsed.
    #[error("Error parsing decimal")]
    Decimal(#[from] rust_decimal::Error),
    /// Raised when a dynamic value is failed to be parsed.
    #[error("Error parsing dynamic: {0}")]
    Dynamic(#[from] serde_json::Error),

    #[error("Error parsing url: {0}")]
    Url(#[from] url::ParseError),
    /// Raised when v2 frames arrive out of the expected header/fragment/completion order.
    #[error("Error parsing frame stream: {0}")]
    Frame(String),
}

/// Errors raised when parsing connection strings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStringError {
    /// Raised when a connection string is missing a required key.
    #[error("Missing value for key '{}'", key)]
    MissingValue {
        /// The key that is missing.
        key: String,
    },
    /// Raised when a connection string has an unexpected key.
    #[error("Unexpected key '{}'", key)]
    UnexpectedKey {
        /// The key that is unexpected.
        key: String,
    },
    /// Raised when a connection string has an invalid value.
    #[error("Parsing error: {}", msg)]
    Parsing {
        /// The error message.
        msg: String,
    },
}

impl ConnectionStringError {
    pub(crate) fn from_missing_value(key: impl Into<String>) -> Self {
        Self::MissingValue { key: key.into() }
    }
    pub(crate) fn from_unexpected_key(key: impl Into<String>) -> Self {
        Self::UnexpectedKey { key: key.into() }
    }
    pub(crate) fn from_parsing_error(msg: impl Into<String>) -> Self {
        Self::Parsing { msg: msg.into() }
    }
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, Error>;
pub type Partial<T> = std::result::Result<T, (Option<T>, Error)>;

/// Collapses a [`Partial`] down to a plain [`Result`], keeping whatever data
/// made it through even if some rows failed to convert.
pub trait PartialExt<T> {
    /// Returns the partial data if any was produced, otherwise the error.
    fn ignore_partial_results(self) -> Result<T>;
}

impl<T> PartialExt<T> for Partial<T> {
    fn ignore_partial_results(self) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err((Some(v), _)) => Ok(v),
            Err((None, e)) => Err(e),
        }
    }
}
