//! Discovers and caches the Azure resources (queues, containers, status tables)
//! an ingestion client needs, and ranks storage accounts by recent reliability
//! so callers try the healthiest one first (spec.md §3.7, §4.F).

pub mod authorization_context;
pub mod cache;
pub mod ingest_client_resources;
pub mod ranking;
pub mod resource_uri;

use std::time::{Duration, Instant};

use analytics_data::prelude::AnalyticsClient;
use azure_data_tables::prelude::TableClient;
use azure_storage_queues::QueueClient;

use crate::client_options::QueuedIngestClientOptions;

pub use authorization_context::AnalyticsIdentityToken;
use authorization_context::AuthorizationContext;
pub use ingest_client_resources::TempStorageContainer;
use ingest_client_resources::IngestClientResources;
pub use ranking::RankedStorageAccountSet;

/// How long a cached resource-discovery or auth-context response is trusted
/// before a fresh one is fetched.
pub const RESOURCE_REFRESH_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Errors raised discovering or refreshing ingestion resources.
#[derive(thiserror::Error, Debug)]
pub enum ResourceManagerError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A client tagged with the storage account it was created from, so the
/// outcome of using it can be fed back into the ranked account selector.
#[derive(Clone)]
pub struct RankedResource<T> {
    pub account: String,
    pub client: T,
}

/// A point-in-time view of an ingestion client's discovered resources
/// (spec.md §3.7's `ResourceSnapshot`): the auth token to stamp on ingestion
/// messages, the queue/container/status-table clients ranked by account
/// reliability, and when the snapshot was assembled.
#[derive(Clone)]
pub struct ResourceSnapshot {
    pub auth_context: AnalyticsIdentityToken,
    pub ingestion_queues: Vec<RankedResource<QueueClient>>,
    pub temp_storage_containers: Vec<RankedResource<TempStorageContainer>>,
    pub status_tables: Vec<RankedResource<TableClient>>,
    pub fetched_at: Instant,
}

/// Facade over ingestion resource discovery: cached queue/container/status-table
/// clients, the auth token cache, and the ranked storage account selector that
/// orders them. A refresh failure leaves the previous cached values in place
/// and surfaces the error to the caller; it never clears a working cache.
#[derive(Clone)]
pub struct ResourceManager {
    ingest_client_resources: std::sync::Arc<IngestClientResources>,
    authorization_context: std::sync::Arc<AuthorizationContext>,
    ranked_accounts: std::sync::Arc<RankedStorageAccountSet>,
}

impl ResourceManager {
    pub fn new(client: AnalyticsClient, options: QueuedIngestClientOptions) -> Self {
        Self {
            ingest_client_resources: std::sync::Arc::new(IngestClientResources::new(
                client.clone(),
                options,
            )),
            authorization_context: std::sync::Arc::new(AuthorizationContext::new(client)),
            ranked_accounts: std::sync::Arc::new(RankedStorageAccountSet::default()),
        }
    }

    pub async fn authorization_context(&self) -> Result<AnalyticsIdentityToken, ResourceManagerError> {
        Ok(self.authorization_context.get().await?)
    }

    /// Queue clients ranked by account reliability, most reliable first.
    pub async fn ranked_ingestion_queues(
        &self,
    ) -> Result<Vec<RankedResource<QueueClient>>, ResourceManagerError> {
        let resources = self.ingest_client_resources.get().await?;
        Ok(self.rank(resources.ingestion_queues))
    }

    /// Container clients ranked by account reliability, most reliable first.
    pub async fn ranked_temp_storage_containers(
        &self,
    ) -> Result<Vec<RankedResource<TempStorageContainer>>, ResourceManagerError> {
        let resources = self.ingest_client_resources.get().await?;
        Ok(self.rank(resources.temp_storage_containers))
    }

    /// Status table clients ranked by account reliability, most reliable first.
    /// Empty when the cluster doesn't publish a status table resource.
    pub async fn ranked_status_tables(
        &self,
    ) -> Result<Vec<RankedResource<TableClient>>, ResourceManagerError> {
        let resources = self.ingest_client_resources.get().await?;
        Ok(self.rank(resources.status_tables))
    }

    /// Back-compat accessor for callers that only need the raw queue clients
    /// without ranking.
    pub async fn secured_ready_for_aggregation_queues(
        &self,
    ) -> Result<Vec<QueueClient>, ResourceManagerError> {
        let resources = self.ingest_client_resources.get().await?;
        Ok(resources.ingestion_queues.into_iter().map(|(_, c)| c).collect())
    }

    /// Combined view of the current auth token plus all ranked resources.
    pub async fn snapshot(&self) -> Result<ResourceSnapshot, ResourceManagerError> {
        let (auth_context, queues, containers, status_tables) = (
            self.authorization_context().await?,
            self.ranked_ingestion_queues().await?,
            self.ranked_temp_storage_containers().await?,
            self.ranked_status_tables().await?,
        );

        Ok(ResourceSnapshot {
            auth_context,
            ingestion_queues: queues,
            temp_storage_containers: containers,
            status_tables,
            fetched_at: Instant::now(),
        })
    }

    /// Records whether an operation against `account` succeeded, feeding the ranker.
    pub fn record_account_result(&self, account: &str, success: bool) {
        self.ranked_accounts.add_result(account, success);
    }

    fn rank<T>(&self, resources: Vec<(String, T)>) -> Vec<RankedResource<T>> {
        let accounts: Vec<String> = resources.iter().map(|(account, _)| account.clone()).collect();
        let order = self.ranked_accounts.ranked_shuffled_accounts(accounts);

        let mut by_account: std::collections::HashMap<String, Vec<T>> = std::collections::HashMap::new();
        for (account, client) in resources {
            by_account.entry(account).or_default().push(client);
        }

        order
            .into_iter()
            .filter_map(|account| {
                let clients = by_account.get_mut(&account)?;
                let client = clients.pop()?;
                Some(RankedResource { account, client })
            })
            .collect()
    }
}
