use uuid::Uuid;

pub use crate::status::IngestionStatus;

/// The result of handing data to the ingestion service. Carries only the
/// status known at the point the call returns; callers that need the final
/// outcome poll via [`crate::status::IngestionStatusPoller`] using `source_id`.
#[derive(Debug)]
pub struct IngestionResult {
    /// `Queued` for queued ingestion, `Pending`/`Succeeded` for streaming depending on
    /// whether the call returned before or after the service acknowledged the data.
    pub status: IngestionStatus,
    /// The name of the database where the ingestion was performed.
    pub database: String,
    /// The name of the table where the ingestion was performed.
    pub table: String,
    /// The source id of the ingestion.
    pub source_id: Uuid,
    /// The blob uri of the ingestion, if the data was staged to a blob.
    pub blob_uri: Option<String>,
}

impl IngestionResult {
    pub fn new(
        status: IngestionStatus,
        database: &str,
        table: &str,
        source_id: Uuid,
        blob_uri: Option<String>,
    ) -> Self {
        Self {
            status,
            database: database.to_owned(),
            table: table.to_owned(),
            source_id,
            blob_uri,
        }
    }
}
