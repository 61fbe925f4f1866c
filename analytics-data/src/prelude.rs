//! The analytics prelude.
//!
//! The prelude re-exports most commonly used items from this crate.
//!
//! # Examples
//!
//! Import the prelude with:
//!
//! ```
//! # #[allow(unused_imports)]
//! use analytics_data::prelude::*;
//! ```

pub use crate::client::{AnalyticsClient, AnalyticsClientOptions, QueryKind};
pub use crate::connection_string::{
    ConnectionString, ConnectionStringAuth, DeviceCodeFunction, TokenCallbackFunction,
};
pub use crate::error::Error;
pub use crate::models::v2::DataTable;
pub use crate::operations::query::{AnalyticsResponse, AnalyticsResponseDataSetV1, AnalyticsResponseDataSetV2};
pub use crate::operations::v1::{ClassifiedTable, ReshapedDataset, V1TableKind};
pub use crate::operations::v2::{
    to_full, FullDataset, FullTable, IterativeDataset, RowResult, StreamedRow, StreamingTable,
    Table, TableResult, DEFAULT_ROW_CHANNEL_CAPACITY,
};
pub use crate::request_options::{
    ClientRequestProperties, ClientRequestPropertiesBuilder, Options, OptionsBuilder, RequestOptions,
    RequestOptionsBuilder,
};
pub use crate::value::{BoundRow, FromRow, Value};

// Token credentials are re-exported for user convenience
pub use azure_identity::{
    AzureCliCredential, ClientSecretCredential,
    DefaultAzureCredential, DefaultAzureCredentialBuilder, EnvironmentCredential,
    TokenCredentialOptions,
};
