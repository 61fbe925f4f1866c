//! Top-level entry point for ingestion: wires the resource manager, queued,
//! streaming, and managed ingestion flavours together behind one client.

use analytics_data::prelude::AnalyticsClient;

use crate::client_options::QueuedIngestClientOptions;
use crate::descriptors::{BlobDescriptor, FileDescriptor, StreamDescriptor};
use crate::error::Result;
use crate::ingestion_properties::IngestionProperties;
use crate::managed_ingest::ManagedIngestClient;
use crate::queued_ingest::QueuedIngestClient;
use crate::result::IngestionResult;
use crate::streaming_ingest::StreamingIngestClient;

/// Client for ingesting data into Analytics, offering queued, streaming, and
/// managed (streaming with a queued fallback) flavours of ingestion.
#[derive(Clone)]
pub struct IngestClient {
    queued: QueuedIngestClient,
    streaming: StreamingIngestClient,
    managed: ManagedIngestClient,
}

impl IngestClient {
    pub fn new(analytics_client: AnalyticsClient) -> Self {
        Self::new_with_client_options(analytics_client, QueuedIngestClientOptions::default())
    }

    pub fn new_with_client_options(
        analytics_client: AnalyticsClient,
        options: QueuedIngestClientOptions,
    ) -> Self {
        Self {
            queued: QueuedIngestClient::new_with_client_options(analytics_client.clone(), options.clone()),
            streaming: StreamingIngestClient::new(analytics_client.clone()),
            managed: ManagedIngestClient::new_with_client_options(analytics_client, options),
        }
    }

    /// Queues a file already staged to blob storage for ingestion.
    pub async fn ingest_from_blob(
        &self,
        blob_descriptor: BlobDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        self.queued.ingest_from_blob(blob_descriptor, ingestion_properties).await
    }

    /// Stages a local file to blob storage and queues it for ingestion.
    pub async fn ingest_from_file(
        &self,
        file_descriptor: FileDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        self.queued.ingest_from_file(file_descriptor, ingestion_properties).await
    }

    /// Stages a stream to blob storage and queues it for ingestion.
    pub async fn ingest_from_stream(
        &self,
        stream_descriptor: StreamDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        self.queued.ingest_from_stream(stream_descriptor, ingestion_properties).await
    }

    /// Posts `data` directly to the engine without staging or queueing it.
    pub async fn ingest_from_stream_direct(
        &self,
        stream_descriptor: StreamDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        let source_id = stream_descriptor.source_id();
        let already_compressed = stream_descriptor.compressed();
        let (mut stream, _size, _source_id, _compressed, _name) = stream_descriptor.into_parts();
        let mut data = Vec::new();
        std::io::Read::read_to_end(&mut stream, &mut data).map_err(crate::error::Error::LocalFileSystem)?;
        self.streaming
            .ingest_from_bytes(data, already_compressed, &ingestion_properties, source_id)
            .await
    }

    /// Tries streaming first, falling back to queued ingestion when the
    /// source is too large to stream or streaming keeps failing.
    pub async fn ingest_from_file_managed(
        &self,
        file_descriptor: FileDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        self.managed.ingest_from_file(file_descriptor, ingestion_properties).await
    }

    /// Tries streaming first, falling back to queued ingestion when the
    /// source is too large to stream or streaming keeps failing.
    pub async fn ingest_from_stream_managed(
        &self,
        stream_descriptor: StreamDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        self.managed.ingest_from_stream(stream_descriptor, ingestion_properties).await
    }

    /// Releases this client; ingestion clients hold no connections or
    /// background tasks of their own, so this is a no-op kept for symmetry
    /// with the query client's lifecycle.
    pub fn close(self) {}
}
