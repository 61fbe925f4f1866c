use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data_format::DataFormat;

/// Which ingestion outcomes get a status record written (spec.md §3.6).
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ReportLevel {
    FailuresOnly,
    None,
    FailuresAndSuccesses,
}

/// Where ingestion status reports are written.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ReportMethod {
    Queue,
    Table,
    QueueAndTable,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ValidationOptions {
    DoNotValidate,
    ValidateCsvInputConstantColumns,
    ValidateCsvInputColumnLevelOnly,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ValidationImplications {
    Fail,
    BestEffort,
}

/// Pre-ingestion validation to run against the source data before committing it.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    #[serde(rename = "ValidationOptions")]
    pub validation_options: ValidationOptions,
    #[serde(rename = "ValidationImplications")]
    pub validation_implications: ValidationImplications,
}

/// Properties of ingestion that can be used when ingesting data into Analytics allowing for customisation of the ingestion process
#[derive(Clone, Debug, Default)]
pub struct IngestionProperties {
    /// Name of the database to ingest into
    pub database_name: String,
    /// Name of the table to ingest into
    pub table_name: String,
    /// Whether the blob is retained after ingestion.
    /// Note that the default when not provided is `false`, meaning that Analytics will attempt to delete the blob upon ingestion.
    /// This will only be successful if provided sufficient permissions on the blob
    pub retain_blob_on_success: Option<bool>,
    /// Format of the data being ingested
    pub data_format: DataFormat,
    /// If set to `true`, any aggregation will be skipped. Default is `false`
    pub flush_immediately: Option<bool>,
    /// Name of a pre-created ingestion mapping to apply to the source data.
    pub ingestion_mapping_reference: Option<String>,
    /// Which ingestion outcomes get a status record written.
    pub report_level: Option<ReportLevel>,
    /// Where ingestion status reports are written.
    pub report_method: Option<ReportMethod>,
    /// Overrides the creation time recorded for ingested extents; used for historical imports.
    pub creation_time: Option<DateTime<Utc>>,
    /// If set to `true`, the first record of the source data is dropped (e.g. a CSV header row).
    pub ignore_first_record: Option<bool>,
    /// Validation to run against the source data before committing it.
    pub validation_policy: Option<ValidationPolicy>,
}
