use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::SchedulerError;
use crate::job::{TriggeredWebhook, WebhookJob};
use crate::runner::WebhookJobRunner;
use crate::traits::{JobScheduler, WebhookDelivery};

struct DelayedJob {
    job: WebhookJob,
    delay: Duration,
    // Keeps the channel open while this job is buffered or sleeping, and
    // becomes the runner's scheduler once the delay has elapsed.
    requeue: WebhookQueue,
}

/// Handle to an in-process delivery worker.
///
/// Cloneable; implements [`JobScheduler`] so the runner's re-enqueues flow
/// back into the same worker. Dropping every handle shuts the worker down
/// once already-scheduled retries have fired.
#[derive(Clone)]
pub struct WebhookQueue {
    tx: mpsc::UnboundedSender<DelayedJob>,
}

impl WebhookQueue {
    /// Submit a freshly triggered webhook for immediate delivery.
    pub fn submit(&self, triggered_webhook: TriggeredWebhook) -> Result<(), SchedulerError> {
        self.enqueue(WebhookJob::new(triggered_webhook), Duration::ZERO)
    }
}

impl JobScheduler for WebhookQueue {
    fn enqueue(&self, job: WebhookJob, delay: Duration) -> Result<(), SchedulerError> {
        self.tx
            .send(DelayedJob {
                job,
                delay,
                requeue: self.clone(),
            })
            .map_err(|_| SchedulerError::QueueClosed)
    }
}

/// Spawn the in-process delivery worker.
///
/// The dispatcher task pulls scheduled jobs off the queue and spawns one
/// sleeping task per job, so a long backoff never blocks other webhooks.
/// Delivery runs entirely on the worker's tasks — never on a request-serving
/// thread — and the eventual retry is fire-and-forget: nothing awaits it.
/// Retries of different webhooks are unordered relative to each other;
/// within one webhook's chain each retry fires only after its predecessor's
/// delay has elapsed and only if the predecessor failed.
pub fn spawn_delivery_worker<D>(delivery: Arc<D>) -> (WebhookQueue, JoinHandle<()>)
where
    D: WebhookDelivery + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<DelayedJob>();
    let queue = WebhookQueue { tx };

    let handle = tokio::spawn(async move {
        // The dispatcher holds no sender of its own: each queued job carries
        // one, so `recv` returns `None` exactly when every external handle
        // is dropped and no job is buffered or sleeping.
        while let Some(DelayedJob {
            job,
            delay,
            requeue,
        }) = rx.recv().await
        {
            let delivery = Arc::clone(&delivery);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let runner = WebhookJobRunner::new(delivery, requeue);
                let outcome = runner.perform(job).await;
                debug!(?outcome, "webhook job finished");
            });
        }
    });

    (queue, handle)
}
