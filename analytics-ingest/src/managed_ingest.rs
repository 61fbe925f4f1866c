//! Managed ingestion: tries streaming first and falls back to queued ingestion
//! when the source is too large to stream or streaming keeps failing
//! (spec.md §3.5's managed ingestion policy).

use std::io::Read;
use std::time::Duration;

use analytics_data::prelude::AnalyticsClient;
use uuid::Uuid;

use crate::client_options::QueuedIngestClientOptions;
use crate::descriptors::{BlobDescriptor, FileDescriptor, StreamDescriptor};
use crate::error::{Error, Result};
use crate::ingestion_properties::IngestionProperties;
use crate::queued_ingest::QueuedIngestClient;
use crate::result::IngestionResult;
use crate::streaming_ingest::{StreamingIngestClient, MAX_STREAMING_PAYLOAD_BYTES};

/// How many times managed ingestion attempts streaming before falling back to queued.
const MAX_STREAMING_ATTEMPTS: u32 = 3;
/// Backoff before the first retry.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
/// Backoff never grows past this, regardless of attempt count.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Client that picks a flavour of ingestion per call: streaming when the
/// source is small and the service accepts it, queued otherwise. Source data
/// is read into memory once and gzip-compressed once, then reused across
/// every streaming attempt and the eventual queued fallback.
#[derive(Clone)]
pub struct ManagedIngestClient {
    streaming: StreamingIngestClient,
    queued: QueuedIngestClient,
}

impl ManagedIngestClient {
    pub fn new(analytics_client: AnalyticsClient) -> Self {
        Self::new_with_client_options(analytics_client, QueuedIngestClientOptions::default())
    }

    pub fn new_with_client_options(
        analytics_client: AnalyticsClient,
        options: QueuedIngestClientOptions,
    ) -> Self {
        Self {
            streaming: StreamingIngestClient::new(analytics_client.clone()),
            queued: QueuedIngestClient::new_with_client_options(analytics_client, options),
        }
    }

    /// A blob already staged to storage can only be handed to the aggregation
    /// queue; there's no direct-bytes path for it, so this always queues.
    pub async fn ingest_from_blob(
        &self,
        blob_descriptor: BlobDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        self.queued.ingest_from_blob(blob_descriptor, ingestion_properties).await
    }

    pub async fn ingest_from_file(
        &self,
        file_descriptor: FileDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        let stream_descriptor = StreamDescriptor::from_file_descriptor(file_descriptor)?;
        self.ingest_from_stream(stream_descriptor, ingestion_properties).await
    }

    /// Reads `stream_descriptor` fully, then tries streaming ingestion up to
    /// [`MAX_STREAMING_ATTEMPTS`] times with exponential backoff between
    /// attempts. Falls back to queued ingestion if the payload is too large to
    /// stream, or if every streaming attempt fails with a retryable error.
    /// A non-retryable streaming failure is returned immediately without
    /// falling back, since queued ingestion would hit the same rejection.
    pub async fn ingest_from_stream(
        &self,
        stream_descriptor: StreamDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        let source_id = stream_descriptor.source_id();
        let already_compressed = stream_descriptor.compressed();

        let (mut stream, _size, _source_id, compressed, _name) = stream_descriptor.into_parts();
        let mut data = Vec::new();
        stream.read_to_end(&mut data).map_err(Error::LocalFileSystem)?;

        if data.len() > MAX_STREAMING_PAYLOAD_BYTES {
            let stream_descriptor = to_stream_descriptor(data, source_id, compressed);
            return self.queued.ingest_from_stream(stream_descriptor, ingestion_properties).await;
        }

        let mut backoff = INITIAL_BACKOFF;
        let mut last_err = None;
        for attempt in 0..MAX_STREAMING_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }

            match self
                .streaming
                .ingest_from_bytes(data.clone(), already_compressed, &ingestion_properties, source_id)
                .await
            {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => last_err = Some(e),
            }
        }

        let _ = last_err;
        let stream_descriptor = to_stream_descriptor(data, source_id, compressed);
        self.queued.ingest_from_stream(stream_descriptor, ingestion_properties).await
    }
}

fn to_stream_descriptor(data: Vec<u8>, source_id: Uuid, compressed: bool) -> StreamDescriptor {
    let size = data.len() as u64;
    StreamDescriptor::new(
        Box::new(std::io::Cursor::new(data)),
        Some(size),
        Some(source_id),
        compressed,
        String::new(),
    )
}
