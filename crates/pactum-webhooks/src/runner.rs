use std::time::Duration;

use tracing::{debug, error};

use crate::job::{JobOutcome, WebhookJob, BACKOFF_SECONDS};
use crate::traits::{JobScheduler, WebhookDelivery};

/// The retry state machine.
///
/// `perform` executes one delivery attempt and converts every possible
/// result into a retry-or-give-up decision. Nothing propagates past it: a
/// raised delivery error is logged and then treated exactly like a reported
/// failure. Repeated attempts for the same webhook are expected; the
/// delivery target owns any deduplication.
pub struct WebhookJobRunner<D, S> {
    delivery: D,
    scheduler: S,
}

impl<D: WebhookDelivery, S: JobScheduler> WebhookJobRunner<D, S> {
    pub fn new(delivery: D, scheduler: S) -> Self {
        Self { delivery, scheduler }
    }

    /// Execute one delivery attempt for the job.
    pub async fn perform(&self, job: WebhookJob) -> JobOutcome {
        match self.delivery.execute_now(&job.triggered_webhook).await {
            Ok(result) if result.success => {
                debug!(
                    webhook = %job.triggered_webhook.webhook_uuid,
                    attempts = job.error_count + 1,
                    "webhook delivered"
                );
                JobOutcome::Succeeded
            }
            Ok(result) => {
                debug!(
                    webhook = %job.triggered_webhook.webhook_uuid,
                    status = ?result.status,
                    "webhook delivery reported failure"
                );
                self.reschedule(job)
            }
            Err(e) => {
                error!(
                    webhook = %job.triggered_webhook.webhook_uuid,
                    error = %e,
                    "webhook delivery raised"
                );
                self.reschedule(job)
            }
        }
    }

    fn reschedule(&self, job: WebhookJob) -> JobOutcome {
        let uuid = job.triggered_webhook.webhook_uuid;
        match BACKOFF_SECONDS.get(job.error_count as usize) {
            Some(&seconds) => {
                let delay = Duration::from_secs(seconds);
                let retry = job.after_failure();
                debug!(
                    webhook = %uuid,
                    delay_seconds = seconds,
                    error_count = retry.error_count,
                    "re-enqueuing webhook job"
                );
                match self.scheduler.enqueue(retry, delay) {
                    Ok(()) => JobOutcome::RetryScheduled {
                        delay,
                        next_error_count: job.error_count + 1,
                    },
                    Err(e) => {
                        error!(webhook = %uuid, error = %e, "could not re-enqueue webhook job");
                        JobOutcome::PermanentlyFailed
                    }
                }
            }
            None => {
                error!(
                    webhook = %uuid,
                    attempts = BACKOFF_SECONDS.len() + 1,
                    "giving up on webhook after exhausting retries"
                );
                JobOutcome::PermanentlyFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::error::{DeliveryError, SchedulerError};
    use crate::job::{DeliveryTarget, TriggeredWebhook, WebhookExecutionResult};

    fn triggered() -> TriggeredWebhook {
        TriggeredWebhook {
            webhook_uuid: Uuid::now_v7(),
            target: DeliveryTarget {
                method: "POST".into(),
                url: "https://ci.example.com/hook".into(),
                body: None,
            },
        }
    }

    /// Delivery stub that plays back a scripted sequence of results.
    struct ScriptedDelivery {
        script: Mutex<VecDeque<Result<WebhookExecutionResult, DeliveryError>>>,
        attempts: AtomicUsize,
    }

    impl ScriptedDelivery {
        fn new(
            script: impl IntoIterator<Item = Result<WebhookExecutionResult, DeliveryError>>,
        ) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                attempts: AtomicUsize::new(0),
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WebhookDelivery for ScriptedDelivery {
        async fn execute_now(
            &self,
            _triggered_webhook: &TriggeredWebhook,
        ) -> Result<WebhookExecutionResult, DeliveryError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(WebhookExecutionResult::failure(500)))
        }
    }

    /// Scheduler stub that records enqueues instead of running them.
    #[derive(Default)]
    struct RecordingScheduler {
        enqueued: Mutex<Vec<(WebhookJob, Duration)>>,
    }

    impl RecordingScheduler {
        fn enqueued(&self) -> Vec<(WebhookJob, Duration)> {
            self.enqueued.lock().unwrap().clone()
        }
    }

    impl JobScheduler for RecordingScheduler {
        fn enqueue(&self, job: WebhookJob, delay: Duration) -> Result<(), SchedulerError> {
            self.enqueued.lock().unwrap().push((job, delay));
            Ok(())
        }
    }

    /// Scheduler stub whose queue has shut down.
    struct ClosedScheduler;

    impl JobScheduler for ClosedScheduler {
        fn enqueue(&self, _job: WebhookJob, _delay: Duration) -> Result<(), SchedulerError> {
            Err(SchedulerError::QueueClosed)
        }
    }

    #[tokio::test]
    async fn success_ends_the_chain() {
        let runner = WebhookJobRunner::new(
            ScriptedDelivery::new([Ok(WebhookExecutionResult::success())]),
            RecordingScheduler::default(),
        );
        let outcome = runner.perform(WebhookJob::new(triggered())).await;
        assert_eq!(outcome, JobOutcome::Succeeded);
        assert!(runner.scheduler.enqueued().is_empty());
    }

    #[tokio::test]
    async fn success_at_a_late_attempt_schedules_nothing_more() {
        let runner = WebhookJobRunner::new(
            ScriptedDelivery::new([Ok(WebhookExecutionResult::success())]),
            RecordingScheduler::default(),
        );
        let mut job = WebhookJob::new(triggered());
        job.error_count = 5;
        let outcome = runner.perform(job).await;
        assert_eq!(outcome, JobOutcome::Succeeded);
        assert!(runner.scheduler.enqueued().is_empty());
    }

    #[tokio::test]
    async fn consecutive_failures_walk_the_backoff_table_exactly() {
        let runner = WebhookJobRunner::new(
            ScriptedDelivery::new([]),
            RecordingScheduler::default(),
        );

        let mut job = WebhookJob::new(triggered());
        for (i, &seconds) in BACKOFF_SECONDS.iter().enumerate() {
            let outcome = runner.perform(job.clone()).await;
            assert_eq!(
                outcome,
                JobOutcome::RetryScheduled {
                    delay: Duration::from_secs(seconds),
                    next_error_count: (i + 1) as u32,
                }
            );
            // Re-enter with the payload the scheduler received, as the
            // external queue would.
            job = runner.scheduler.enqueued().last().unwrap().0.clone();
        }

        let delays: Vec<u64> = runner
            .scheduler
            .enqueued()
            .iter()
            .map(|(_, d)| d.as_secs())
            .collect();
        assert_eq!(delays, vec![10, 60, 120, 300, 600, 1200]);

        let counts: Vec<u32> = runner
            .scheduler
            .enqueued()
            .iter()
            .map(|(j, _)| j.error_count)
            .collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5, 6]);

        // The seventh failure exhausts the budget: no further enqueue.
        let outcome = runner.perform(job).await;
        assert_eq!(outcome, JobOutcome::PermanentlyFailed);
        assert_eq!(runner.scheduler.enqueued().len(), BACKOFF_SECONDS.len());
    }

    #[tokio::test]
    async fn a_raised_error_retries_like_a_reported_failure() {
        let runner = WebhookJobRunner::new(
            ScriptedDelivery::new([Err(DeliveryError::Transport("connection refused".into()))]),
            RecordingScheduler::default(),
        );
        let outcome = runner.perform(WebhookJob::new(triggered())).await;
        assert_eq!(
            outcome,
            JobOutcome::RetryScheduled {
                delay: Duration::from_secs(10),
                next_error_count: 1,
            }
        );
    }

    #[tokio::test]
    async fn retry_payload_carries_the_same_webhook() {
        let runner = WebhookJobRunner::new(
            ScriptedDelivery::new([Ok(WebhookExecutionResult::failure(502))]),
            RecordingScheduler::default(),
        );
        let job = WebhookJob::new(triggered());
        let uuid = job.triggered_webhook.webhook_uuid;
        runner.perform(job).await;
        let (retry, _) = runner.scheduler.enqueued().pop().unwrap();
        assert_eq!(retry.triggered_webhook.webhook_uuid, uuid);
    }

    #[tokio::test]
    async fn a_closed_queue_fails_the_job_permanently() {
        let runner = WebhookJobRunner::new(ScriptedDelivery::new([]), ClosedScheduler);
        let outcome = runner.perform(WebhookJob::new(triggered())).await;
        assert_eq!(outcome, JobOutcome::PermanentlyFailed);
    }

    #[tokio::test]
    async fn each_perform_makes_exactly_one_delivery_attempt() {
        let runner = WebhookJobRunner::new(
            ScriptedDelivery::new([]),
            RecordingScheduler::default(),
        );
        runner.perform(WebhookJob::new(triggered())).await;
        assert_eq!(runner.delivery.attempts(), 1);
    }
}
