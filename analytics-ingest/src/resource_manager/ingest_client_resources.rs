use std::sync::Arc;

use crate::client_options::QueuedIngestClientOptions;

use super::{
    cache::{Cached, Refreshing},
    resource_uri::{ClientFromResourceUri, ResourceUri},
    RESOURCE_REFRESH_PERIOD,
};
use anyhow::Result;
use async_lock::RwLock;
use azure_core::ClientOptions;
use analytics_data::{models::TableV1, prelude::AnalyticsClient};
use azure_data_tables::prelude::TableClient;
use azure_storage_blobs::prelude::ContainerClient;
use azure_storage_queues::QueueClient;

/// Helper to get a column index from a table
fn get_column_index(table: &TableV1, column_name: &str) -> Result<usize> {
    table
        .columns
        .iter()
        .position(|c| c.column_name == column_name)
        .ok_or(anyhow::anyhow!(
            "{} column is missing in the table",
            column_name
        ))
}

/// Helper to get resource URIs from a table for the given resource type name. `required`
/// controls whether an empty result is treated as an error; clusters that don't publish a
/// status table, for example, simply omit that resource type rather than failing the call.
fn get_resource_by_name(
    table: &TableV1,
    resource_name: &str,
    required: bool,
) -> Result<Vec<ResourceUri>> {
    let storage_root_index = get_column_index(table, "StorageRoot")?;
    let resource_type_name_index = get_column_index(table, "ResourceTypeName")?;

    let resource_uris: Vec<Result<ResourceUri>> = table
        .rows
        .iter()
        .filter(|r| r[resource_type_name_index] == resource_name)
        .map(|r| {
            ResourceUri::try_from(r[storage_root_index].as_str().ok_or(anyhow::anyhow!(
                "Response returned from Analytics could not be parsed as a string"
            ))?)
        })
        .collect();

    if required && resource_uris.is_empty() {
        return Err(anyhow::anyhow!(
            "No {} resources found in the table",
            resource_name
        ));
    }

    resource_uris.into_iter().collect()
}

/// Turns a vector of resource URIs into clients of type `T`, tagging each with the
/// storage account it was created from so [`super::RankedStorageAccountSet`] can track
/// per-account success rates.
fn create_clients_vec<T>(resource_uris: &[ResourceUri], client_options: &ClientOptions) -> Vec<(String, T)>
where
    T: ClientFromResourceUri,
{
    resource_uris
        .iter()
        .map(|uri| {
            let account = uri.service_uri().to_string();
            (account, T::create_client(uri.clone(), client_options.clone()))
        })
        .collect()
}

/// A temp-storage container client paired with the resource URI it was built
/// from, so callers that upload into it can reconstruct a SAS'd blob URI for
/// the resulting blob without an extra round trip.
#[derive(Clone)]
pub struct TempStorageContainer {
    pub client: ContainerClient,
    pub resource_uri: ResourceUri,
}

fn create_temp_storage_vec(
    resource_uris: &[ResourceUri],
    client_options: &ClientOptions,
) -> Vec<(String, TempStorageContainer)> {
    resource_uris
        .iter()
        .map(|uri| {
            let account = uri.service_uri().to_string();
            let client = ContainerClient::create_client(uri.clone(), client_options.clone());
            (
                account,
                TempStorageContainer {
                    client,
                    resource_uri: uri.clone(),
                },
            )
        })
        .collect()
}

/// Storage of the clients required for ingestion, each tagged with the storage account
/// it came from.
#[derive(Clone)]
pub struct InnerIngestClientResources {
    pub ingestion_queues: Vec<(String, QueueClient)>,
    pub temp_storage_containers: Vec<(String, TempStorageContainer)>,
    pub status_tables: Vec<(String, TableClient)>,
}

impl TryFrom<(&TableV1, &QueuedIngestClientOptions)> for InnerIngestClientResources {
    type Error = anyhow::Error;

    /// Attempts to create a new InnerIngestClientResources from the given [TableV1] and [QueuedIngestClientOptions]
    fn try_from((table, client_options): (&TableV1, &QueuedIngestClientOptions)) -> Result<Self> {
        let secured_ready_for_aggregation_queues =
            get_resource_by_name(table, "SecuredReadyForAggregationQueue", true)?;
        let temp_storage = get_resource_by_name(table, "TempStorage", true)?;
        // Not every cluster exposes a status table resource; treat its absence as "no
        // table reporting available" rather than a fatal discovery error.
        let ingestions_status_tables = get_resource_by_name(table, "IngestionsStatusTable", false)?;

        Ok(Self {
            ingestion_queues: create_clients_vec(
                &secured_ready_for_aggregation_queues,
                &client_options.queue_service,
            ),
            temp_storage_containers: create_temp_storage_vec(&temp_storage, &client_options.blob_service),
            status_tables: create_clients_vec(&ingestions_status_tables, &client_options.blob_service),
        })
    }
}

pub struct IngestClientResources {
    client: AnalyticsClient,
    resources: Refreshing<Option<InnerIngestClientResources>>,
    client_options: QueuedIngestClientOptions,
}

impl IngestClientResources {
    pub fn new(client: AnalyticsClient, client_options: QueuedIngestClientOptions) -> Self {
        Self {
            client,
            resources: Arc::new(RwLock::new(Cached::new(None, RESOURCE_REFRESH_PERIOD))),
            client_options,
        }
    }

    /// Executes a the query language management query that retrieves resource URIs for the various Azure resources used for ingestion
    async fn query_ingestion_resources(&self) -> Result<InnerIngestClientResources> {
        let results = self
            .client
            .execute_command("NetDefaultDB", ".get ingestion resources", None)
            .await?;

        let new_resources = results.tables.first().ok_or(anyhow::anyhow!(
            "Analytics expected a table containing ingestion resource results, found no tables",
        ))?;

        InnerIngestClientResources::try_from((new_resources, &self.client_options))
    }

    /// Gets the latest resources either from cache, or fetching from Analytics and updating the cached resources
    pub async fn get(&self) -> Result<InnerIngestClientResources> {
        let resources = self.resources.read().await;
        if !resources.is_expired() {
            if let Some(inner_value) = resources.get() {
                return Ok(inner_value.clone());
            }
        }

        // otherwise, drop the read lock and get a write lock to refresh the analytics response
        drop(resources);
        let mut resources = self.resources.write().await;

        // check again in case another thread refreshed while we were waiting on the write lock
        if !resources.is_expired() {
            if let Some(inner_value) = resources.get() {
                return Ok(inner_value.clone());
            }
        }

        let new_resources = self.query_ingestion_resources().await?;
        resources.update(Some(new_resources.clone()));

        Ok(new_resources)
    }
}
