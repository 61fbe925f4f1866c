use std::io::{Read, Write};
use std::sync::Arc;

use analytics_data::prelude::AnalyticsClient;
use azure_core::base64;
use flate2::{write::GzEncoder, Compression};
use uuid::Uuid;

use crate::client_options::QueuedIngestClientOptions;
use crate::descriptors::{BlobDescriptor, FileDescriptor, StreamDescriptor};
use crate::error::{Error, Result};
use crate::ingestion_blob_info::QueuedIngestionMessage;
use crate::ingestion_properties::IngestionProperties;
use crate::resource_manager::{RankedResource, ResourceManager, TempStorageContainer};
use crate::result::{IngestionResult, IngestionStatus};

/// Client for ingesting data into Analytics using the queued flavour of ingestion.
///
/// Source data handed to [`Self::ingest_from_file`]/[`Self::ingest_from_stream`] is
/// gzip-compressed (unless the format is already compressed or non-compressible)
/// and staged to a temp-storage container before the queue message is sent;
/// [`Self::ingest_from_blob`] assumes the caller already staged the blob.
#[derive(Clone)]
pub struct QueuedIngestClient {
    resource_manager: Arc<ResourceManager>,
}

impl QueuedIngestClient {
    /// Creates a new client from the given [AnalyticsClient]
    pub fn new(analytics_client: AnalyticsClient) -> Self {
        Self::new_with_client_options(analytics_client, QueuedIngestClientOptions::default())
    }

    /// Creates a new client from the given [AnalyticsClient] and [QueuedIngestClientOptions]
    /// This allows for customisation of the [ClientOptions] used for the storage clients
    pub fn new_with_client_options(
        analytics_client: AnalyticsClient,
        options: QueuedIngestClientOptions,
    ) -> Self {
        let resource_manager = Arc::new(ResourceManager::new(analytics_client, options));
        Self { resource_manager }
    }

    /// Ingest a file already staged to Azure Blob Storage.
    pub async fn ingest_from_blob(
        &self,
        blob_descriptor: BlobDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        let auth_context = self.resource_manager.authorization_context().await?;
        let message =
            QueuedIngestionMessage::new(&blob_descriptor, &ingestion_properties, auth_context);

        self.enqueue(message).await?;

        Ok(IngestionResult::new(
            IngestionStatus::Queued,
            &ingestion_properties.database_name,
            &ingestion_properties.table_name,
            blob_descriptor.source_id,
            Some(blob_descriptor.uri()),
        ))
    }

    /// Ingest a local file into Analytics, staging it to blob storage first.
    pub async fn ingest_from_file(
        &self,
        file_descriptor: FileDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        let stream_descriptor = StreamDescriptor::from_file_descriptor(file_descriptor)?;
        self.ingest_from_stream(stream_descriptor, ingestion_properties).await
    }

    /// Ingest a stream into Analytics, staging it to blob storage first.
    pub async fn ingest_from_stream(
        &self,
        stream_descriptor: StreamDescriptor,
        ingestion_properties: IngestionProperties,
    ) -> Result<IngestionResult> {
        let source_id = stream_descriptor.source_id();
        let compressible = ingestion_properties.data_format.clone().compressible();
        let already_compressed = stream_descriptor.compressed();
        let blob_name = staged_blob_name(&ingestion_properties, source_id, compressible && !already_compressed);

        let (mut stream, raw_size, _source_id, compressed, _stream_name) = stream_descriptor.into_parts();
        let mut data = Vec::new();
        stream.read_to_end(&mut data).map_err(Error::LocalFileSystem)?;
        // The service wants the size of the *uncompressed* data; we only know it
        // here when the caller didn't hand us already-compressed bytes.
        let raw_data_size = raw_size.or_else(|| (!compressed).then(|| data.len() as u64));

        let payload = if compressed || !compressible {
            data
        } else {
            gzip(&data)?
        };

        let containers = self.resource_manager.ranked_temp_storage_containers().await?;
        let blob_uri = self.stage_blob(&containers, &blob_name, payload).await?;

        let blob_descriptor = BlobDescriptor::new(blob_uri, raw_data_size, Some(source_id));
        let auth_context = self.resource_manager.authorization_context().await?;
        let message =
            QueuedIngestionMessage::new(&blob_descriptor, &ingestion_properties, auth_context);

        self.enqueue(message).await?;

        Ok(IngestionResult::new(
            IngestionStatus::Queued,
            &ingestion_properties.database_name,
            &ingestion_properties.table_name,
            source_id,
            Some(blob_descriptor.uri()),
        ))
    }

    /// Uploads `payload` to the first ranked container that accepts it, recording
    /// success/failure per account so future calls prefer whichever container
    /// actually worked.
    async fn stage_blob(
        &self,
        containers: &[RankedResource<TempStorageContainer>],
        blob_name: &str,
        payload: Vec<u8>,
    ) -> Result<url::Url> {
        if containers.is_empty() {
            return Err(Error::ClientInternal(
                "no temp storage containers available for staging".into(),
            ));
        }

        let mut last_err = None;
        for container in containers {
            let blob_client = container.client.client.blob_client(blob_name);
            match blob_client.put_block_blob(payload.clone()).await {
                Ok(_) => {
                    self.resource_manager.record_account_result(&container.account, true);
                    return container
                        .client
                        .resource_uri
                        .child_uri(blob_name)
                        .map_err(|e| Error::Blobstore(e.to_string()));
                }
                Err(e) => {
                    self.resource_manager.record_account_result(&container.account, false);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .map(|e| Error::Blobstore(e.to_string()))
            .unwrap_or(Error::AllAccountsFailed))
    }

    /// Enqueues `message` onto the first ranked queue that accepts it, recording
    /// success/failure per account.
    async fn enqueue(&self, message: QueuedIngestionMessage) -> Result<()> {
        let queues = self.resource_manager.ranked_ingestion_queues().await?;
        if queues.is_empty() {
            return Err(Error::ClientInternal(
                "no ingestion queues available".into(),
            ));
        }

        let encoded = base64::encode(serde_json::to_string(&message)?);

        let mut last_err = None;
        for queue in &queues {
            match queue.client.put_message(encoded.clone()).await {
                Ok(_) => {
                    self.resource_manager.record_account_result(&queue.account, true);
                    return Ok(());
                }
                Err(e) => {
                    self.resource_manager.record_account_result(&queue.account, false);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .map(Error::from)
            .unwrap_or(Error::AllAccountsFailed))
    }
}

fn staged_blob_name(
    ingestion_properties: &IngestionProperties,
    source_id: Uuid,
    will_gzip: bool,
) -> String {
    let extension = if will_gzip { ".gz" } else { "" };
    format!(
        "{}__{}__{}{}",
        ingestion_properties.database_name, ingestion_properties.table_name, source_id, extension
    )
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(Error::LocalFileSystem)?;
    encoder.finish().map_err(Error::LocalFileSystem)
}
