use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{DeliveryError, SchedulerError};
use crate::job::{TriggeredWebhook, WebhookExecutionResult, WebhookJob};

/// The external delivery call.
///
/// Blocks (asynchronously) on network I/O and must never run on a
/// request-serving thread. May report failure or raise; the runner treats
/// both the same way. No timeout is imposed here — that is the
/// implementation's concern.
#[async_trait]
pub trait WebhookDelivery: Send + Sync {
    async fn execute_now(
        &self,
        triggered_webhook: &TriggeredWebhook,
    ) -> Result<WebhookExecutionResult, DeliveryError>;
}

/// The scheduling boundary: "enqueue this job to run again after the delay".
///
/// Assumed at-least-once and payload-preserving. Enqueueing is
/// fire-and-forget relative to the current invocation; once accepted, a job
/// will fire — there is no cancellation primitive.
pub trait JobScheduler: Send + Sync {
    fn enqueue(&self, job: WebhookJob, delay: Duration) -> Result<(), SchedulerError>;
}

#[async_trait]
impl<T: WebhookDelivery + ?Sized> WebhookDelivery for Arc<T> {
    async fn execute_now(
        &self,
        triggered_webhook: &TriggeredWebhook,
    ) -> Result<WebhookExecutionResult, DeliveryError> {
        (**self).execute_now(triggered_webhook).await
    }
}

impl<T: JobScheduler + ?Sized> JobScheduler for Arc<T> {
    fn enqueue(&self, job: WebhookJob, delay: Duration) -> Result<(), SchedulerError> {
        (**self).enqueue(job, delay)
    }
}
