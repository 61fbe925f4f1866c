//! Tracks the lifecycle of a single ingestion after it has been handed to
//! the service, and polls a status source until it reaches a final state
//! (spec.md §3.6).

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use uuid::Uuid;

/// How often [`IngestionStatusPoller`] checks for an updated status.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Why an ingestion failed, mirroring the service's own failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Retrying the same input won't help (bad schema, malformed data, etc).
    Permanent,
    /// A transient condition; the same input could succeed on retry.
    Transient,
    /// Retries were exhausted before the ingestion could succeed.
    Exhausted,
}

/// Lifecycle state of a tracked ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionStatus {
    /// Queued or streamed, not yet picked up by the ingestion pipeline.
    Pending,
    /// Sitting in a queue awaiting aggregation.
    Queued,
    /// Ingested successfully.
    Succeeded,
    /// Some source data ingested, some did not.
    PartiallySucceeded,
    /// Ingestion failed.
    Failed,
    /// The ingestion was dropped without being attempted (e.g. policy skip).
    Skipped,
    /// Reading the status itself failed; the underlying ingestion's real
    /// status is unknown. Transient by nature, so polling continues.
    StatusRetrievalFailed,
    /// The caller cancelled the poll before a final status was observed.
    StatusRetrievalCanceled,
    /// Polling exceeded its deadline before a final status was observed.
    StatusRetrievalTimedOut,
}

impl IngestionStatus {
    /// Whether this status is a terminal outcome a poller should stop on.
    pub fn is_final(self) -> bool {
        !matches!(
            self,
            IngestionStatus::Pending | IngestionStatus::Queued | IngestionStatus::StatusRetrievalFailed
        )
    }
}

/// A point-in-time ingestion status record, whether read from a service
/// status table or synthesized locally (e.g. on cancellation or timeout).
#[derive(Debug, Clone)]
pub struct IngestionStatusRecord {
    pub status: IngestionStatus,
    pub source_id: Uuid,
    pub database: String,
    pub table: String,
    pub failure_kind: Option<FailureKind>,
    pub error_code: Option<String>,
    pub details: Option<String>,
    pub operation_id: Option<Uuid>,
    pub activity_id: Option<Uuid>,
    pub update_time: DateTime<Utc>,
}

impl IngestionStatusRecord {
    pub fn pending(source_id: Uuid, database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            status: IngestionStatus::Pending,
            source_id,
            database: database.into(),
            table: table.into(),
            failure_kind: None,
            error_code: None,
            details: None,
            operation_id: None,
            activity_id: None,
            update_time: Utc::now(),
        }
    }

    fn with_status(&self, status: IngestionStatus) -> Self {
        Self {
            status,
            update_time: Utc::now(),
            ..self.clone()
        }
    }

    fn canceled(&self) -> Self {
        self.with_status(IngestionStatus::StatusRetrievalCanceled)
    }

    fn timed_out(&self) -> Self {
        self.with_status(IngestionStatus::StatusRetrievalTimedOut)
    }
}

/// Polls a status source until it reports a final [`IngestionStatus`], or the
/// caller cancels the wait. The fetch callback is left generic so the actual
/// status-table client lives at the call site rather than in this module.
pub struct IngestionStatusPoller<F> {
    fetch: F,
    poll_interval: Duration,
    deadline: Option<Duration>,
}

impl<F, Fut> IngestionStatusPoller<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = crate::error::Result<Option<IngestionStatusRecord>>>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Polls until a final status arrives, `cancel` resolves, or the deadline
    /// (if any) elapses. A fetch error is treated as a transient
    /// [`IngestionStatus::StatusRetrievalFailed`] and polling continues; a
    /// missing row (ingestion not yet visible) is treated the same way.
    pub async fn poll_until_final(
        &self,
        mut cancel: oneshot::Receiver<()>,
        pending: IngestionStatusRecord,
    ) -> IngestionStatusRecord {
        let start = tokio::time::Instant::now();
        let mut last = pending;

        loop {
            if let Some(deadline) = self.deadline {
                if start.elapsed() >= deadline {
                    return last.timed_out();
                }
            }

            tokio::select! {
                biased;
                _ = &mut cancel => return last.canceled(),
                _ = tokio::time::sleep(self.poll_interval) => {
                    match (self.fetch)().await {
                        Ok(Some(record)) => {
                            last = record;
                            if last.status.is_final() {
                                return last;
                            }
                        }
                        Ok(None) => continue,
                        Err(_) => {
                            last = last.with_status(IngestionStatus::StatusRetrievalFailed);
                        }
                    }
                }
            }
        }
    }
}
