//! Streaming ingestion: posts data directly to the engine and gets a
//! synchronous success/failure back, instead of handing it off to the queued
//! ingestion pipeline (spec.md §3.5).

use std::io::Write;

use analytics_data::prelude::AnalyticsClient;
use flate2::{write::GzEncoder, Compression};
use uuid::Uuid;

use crate::data_format::IngestionMappingKind;
use crate::error::{Error, Result};
use crate::ingestion_properties::IngestionProperties;
use crate::result::{IngestionResult, IngestionStatus};

/// Largest payload streaming ingestion accepts, compressed. Larger sources
/// should go through queued ingestion instead (enforced by
/// [`crate::managed_ingest`], not by this module).
pub const MAX_STREAMING_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Client for ingesting data into Analytics using the streaming flavour of ingestion.
#[derive(Clone)]
pub struct StreamingIngestClient {
    client: AnalyticsClient,
}

impl StreamingIngestClient {
    pub fn new(client: AnalyticsClient) -> Self {
        Self { client }
    }

    /// Streams `data` directly to the engine. `data` is gzip-compressed unless
    /// the format is non-compressible or `already_compressed` is set.
    pub async fn ingest_from_bytes(
        &self,
        data: Vec<u8>,
        already_compressed: bool,
        ingestion_properties: &IngestionProperties,
        source_id: Uuid,
    ) -> Result<IngestionResult> {
        let compressible = ingestion_properties.data_format.clone().compressible();
        let (body, content_encoding) = if already_compressed || !compressible {
            (data, already_compressed.then_some("gzip"))
        } else {
            (gzip(&data)?, Some("gzip"))
        };

        if body.len() > MAX_STREAMING_PAYLOAD_BYTES {
            return Err(Error::LimitsExceeded(format!(
                "streaming ingestion payload is {} bytes, exceeding the {} byte limit",
                body.len(),
                MAX_STREAMING_PAYLOAD_BYTES
            )));
        }

        let mapping_name = ingestion_properties.ingestion_mapping_reference.as_deref();
        let status = self
            .client
            .execute_streaming_ingest(
                &ingestion_properties.database_name,
                &ingestion_properties.table_name,
                &stream_format(ingestion_properties),
                mapping_name,
                content_encoding,
                bytes::Bytes::from(body),
            )
            .await?;

        if status.as_u16() < 300 {
            Ok(IngestionResult::new(
                IngestionStatus::Succeeded,
                &ingestion_properties.database_name,
                &ingestion_properties.table_name,
                source_id,
                None,
            ))
        } else if status.as_u16() < 500 {
            Err(Error::HttpError(status, "streaming ingestion rejected".into()))
        } else {
            Err(Error::HttpError(status, "streaming ingestion request failed".into()))
        }
    }
}

/// The `streamFormat` query parameter value, derived from the data format's
/// mapping kind (the engine accepts the same vocabulary for both).
fn stream_format(ingestion_properties: &IngestionProperties) -> String {
    match ingestion_properties.data_format.clone().ingestion_mapping_kind() {
        IngestionMappingKind::CSV => "csv".to_string(),
        IngestionMappingKind::JSON => "json".to_string(),
        IngestionMappingKind::Avro => "avro".to_string(),
        IngestionMappingKind::ApacheAvro => "apacheavro".to_string(),
        IngestionMappingKind::Parquet => "parquet".to_string(),
        IngestionMappingKind::SStream => "sstream".to_string(),
        IngestionMappingKind::ORC => "orc".to_string(),
        IngestionMappingKind::W3CLOGFILE => "w3clogfile".to_string(),
        IngestionMappingKind::Unknown => "csv".to_string(),
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(Error::LocalFileSystem)?;
    encoder.finish().map_err(Error::LocalFileSystem)
}
